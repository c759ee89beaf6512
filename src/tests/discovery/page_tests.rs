    use super::*;
    use crate::discovery::test_support::{ScriptedCatalog, abc_catalog, item};

    fn page_of(ids: &[&str], next: bool) -> ApplicationPage {
        ApplicationPage {
            list: ids.iter().map(|id| item(id)).collect(),
            pagination: Some(crate::catalog::Pagination {
                next: next.then(|| "next".to_string()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn pages_forward_and_back_over_three_items() {
        let cat = abc_catalog();
        let mut pc = PageCoordinator::new(2);

        assert!(matches!(pc.fetch(&cat, Some("env1"), Some(0)), FetchOutcome::Applied));
        assert_eq!(pc.items().len(), 2);
        assert!(pc.has_next());
        assert!(!pc.has_previous());

        assert!(matches!(pc.go_next(&cat), FetchOutcome::Applied));
        assert_eq!(pc.offset(), 2);
        assert_eq!(pc.items()[0].external_id, "C");
        assert!(!pc.has_next());
        assert!(pc.has_previous());

        assert!(matches!(pc.go_next(&cat), FetchOutcome::Skipped));
        assert_eq!(pc.offset(), 2);

        assert!(matches!(pc.go_previous(&cat), FetchOutcome::Applied));
        assert_eq!(pc.offset(), 0);
        assert!(matches!(pc.go_previous(&cat), FetchOutcome::Skipped));
        assert_eq!(pc.offset(), 0);
    }

    #[test]
    fn fetch_without_environment_is_a_no_op() {
        let cat = abc_catalog();
        let mut pc = PageCoordinator::new(2);
        assert!(pc.begin_fetch(None, None).is_none());
        assert!(matches!(pc.fetch(&cat, None, Some(4)), FetchOutcome::Skipped));
        assert!(!pc.is_loading());
        assert!(pc.page().is_none());
    }

    #[test]
    fn loading_environments_defaults_to_the_first() {
        let cat = abc_catalog();
        let mut pc = PageCoordinator::new(2);
        assert!(matches!(pc.load_environments(&cat), FetchOutcome::Applied));
        assert_eq!(pc.environments().len(), 2);
        assert_eq!(pc.environment_id(), Some("env1"));
        assert_eq!(pc.items().len(), 2);
    }

    #[test]
    fn empty_environment_list_never_fetches() {
        let cat = crate::catalog::MemoryCatalog::new(Default::default());
        let mut pc = PageCoordinator::new(2);
        assert!(matches!(pc.load_environments(&cat), FetchOutcome::Skipped));
        assert!(pc.environment_id().is_none());
        assert!(pc.page().is_none());
        assert!(!pc.is_loading());
    }

    #[test]
    fn environment_switch_resets_offset_and_selection() {
        let cat = abc_catalog();
        let mut pc = PageCoordinator::new(2);
        pc.fetch(&cat, Some("env1"), Some(0));
        pc.go_next(&cat);
        assert!(pc.page_mut().expect("page").toggle("C"));

        let ticket = pc.set_environment("env2").expect("valid env");
        assert_eq!(ticket.query().offset, 0);
        assert_eq!(pc.offset(), 0);
        assert!(pc.page().expect("page").selection().is_empty());

        assert!(matches!(pc.run(&cat, ticket), FetchOutcome::Applied));
        assert_eq!(pc.items()[0].external_id, "X");
    }

    #[test]
    fn empty_environment_id_is_invalid() {
        let mut pc = PageCoordinator::new(2);
        assert!(matches!(
            pc.set_environment("  "),
            Err(DiscoveryError::InvalidEnvironment(_))
        ));
        assert!(!pc.is_loading());
    }

    #[test]
    fn unknown_environment_surfaces_as_invalid() {
        let cat = abc_catalog();
        let mut pc = PageCoordinator::new(2);
        match pc.select_environment(&cat, "env9") {
            FetchOutcome::Failed(DiscoveryError::InvalidEnvironment(id)) => assert_eq!(id, "env9"),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(!pc.is_loading());
    }

    #[test]
    fn search_text_is_stored_until_triggered() {
        let cat = abc_catalog();
        let mut pc = PageCoordinator::new(10);
        pc.fetch(&cat, Some("env1"), Some(0));
        pc.page_mut().expect("page").toggle_all();
        assert!(pc.page().expect("page").is_all_selected());

        pc.set_search_query("App B");
        assert!(!pc.is_loading());
        assert_eq!(pc.items().len(), 3);

        let ticket = pc.search().expect("ticket");
        assert!(pc.page().expect("page").selection().is_empty());
        assert_eq!(ticket.page_request().query, "App B");

        assert!(matches!(pc.run(&cat, ticket), FetchOutcome::Applied));
        assert_eq!(pc.items().len(), 1);
    }

    #[test]
    fn no_matches_is_a_valid_empty_page() {
        let cat = abc_catalog();
        let mut pc = PageCoordinator::new(2);
        pc.fetch(&cat, Some("env1"), Some(0));
        pc.set_search_query("nothing like this");
        assert!(matches!(pc.run_search(&cat), FetchOutcome::Applied));
        let page = pc.page().expect("page");
        assert!(page.items().is_empty());
        assert!(!page.is_all_selected());
        assert!(!pc.has_next());
    }

    #[test]
    fn failed_fetch_keeps_the_prior_page() {
        let cat = ScriptedCatalog::new();
        let mut pc = PageCoordinator::new(2);
        pc.fetch(&cat, Some("env1"), Some(0));

        cat.fail_listing(true);
        match pc.go_next(&cat) {
            FetchOutcome::Failed(DiscoveryError::Fetch(err)) => {
                assert!(err.to_string().contains("503"))
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(!pc.is_loading());
        assert_eq!(pc.offset(), 0);
        assert_eq!(pc.items()[0].external_id, "A");

        cat.fail_listing(false);
        assert!(matches!(pc.go_next(&cat), FetchOutcome::Applied));
        assert_eq!(pc.offset(), 2);
    }

    #[test]
    fn selection_is_empty_after_every_successful_fetch() {
        let cat = abc_catalog();
        let mut pc = PageCoordinator::new(2);
        pc.fetch(&cat, Some("env1"), Some(0));
        for _ in 0..3 {
            pc.page_mut().expect("page").toggle_all();
            let ticket = pc.refresh().expect("ticket");
            assert!(matches!(pc.run(&cat, ticket), FetchOutcome::Applied));
            assert!(pc.page().expect("page").selection().is_empty());
        }
    }

    #[test]
    fn toggle_ignores_ids_not_on_the_page() {
        let cat = abc_catalog();
        let mut pc = PageCoordinator::new(2);
        pc.fetch(&cat, Some("env1"), Some(0));
        let page = pc.page_mut().expect("page");
        assert!(!page.toggle("C"));
        assert!(page.toggle("A"));
        assert!(page.is_partially_selected());
        assert_eq!(page.selected_items().len(), 1);
    }

    #[test]
    fn navigation_is_disabled_while_loading() {
        let mut pc = PageCoordinator::new(2);
        let first = pc.begin_fetch(Some("env1"), Some(0)).expect("ticket");
        pc.apply(first, Ok(page_of(&["A", "B"], true)));

        let pending = pc.next_page().expect("next page ticket");
        assert!(pc.is_loading());
        assert!(pc.next_page().is_none());
        assert!(pc.previous_page().is_none());

        pc.apply(pending, Ok(page_of(&["C"], false)));
        assert_eq!(pc.offset(), 2);
    }

    #[test]
    fn navigation_follows_the_page_in_view_after_a_failed_switch() {
        let mut pc = PageCoordinator::new(2);
        let first = pc.begin_fetch(Some("env1"), Some(0)).expect("ticket");
        pc.apply(first, Ok(page_of(&["A", "B"], true)));

        let switch = pc.set_environment("env2").expect("switch");
        assert!(matches!(
            pc.apply(switch, Err(CatalogError::BadRequest("down".to_string()))),
            FetchOutcome::Failed(_)
        ));
        assert_eq!(pc.page().expect("page").query().environment_id, "env1");

        let next = pc.next_page().expect("next page ticket");
        assert_eq!(next.environment_id(), "env1");
        assert_eq!(next.query().offset, 2);
        assert_eq!(pc.environment_id(), Some("env1"));

        pc.apply(next, Ok(page_of(&["C"], false)));
        let previous = pc.previous_page().expect("previous page ticket");
        assert_eq!(previous.environment_id(), "env1");
        assert_eq!(previous.query().offset, 0);
    }

    #[test]
    fn paging_keeps_the_search_the_page_was_fetched_with() {
        let cat = abc_catalog();
        let mut pc = PageCoordinator::new(1);
        pc.set_search_query("app");
        pc.fetch(&cat, Some("env1"), Some(0));
        assert!(pc.has_next());

        pc.set_search_query("unrelated text");
        let ticket = pc.next_page().expect("ticket");
        assert_eq!(ticket.page_request().query, "app");
        assert!(matches!(pc.run(&cat, ticket), FetchOutcome::Applied));
        assert_eq!(pc.items()[0].external_id, "B");
    }

    #[test]
    fn last_request_wins_over_late_responses() {
        let mut pc = PageCoordinator::new(2);
        let older = pc.begin_fetch(Some("env1"), Some(0)).expect("older");
        let newer = pc.set_environment("env2").expect("newer");

        assert!(matches!(
            pc.apply(newer, Ok(page_of(&["X"], false))),
            FetchOutcome::Applied
        ));
        assert!(matches!(
            pc.apply(older, Ok(page_of(&["A", "B"], true))),
            FetchOutcome::Stale
        ));

        let page = pc.page().expect("page");
        assert_eq!(page.query().environment_id, "env2");
        assert_eq!(page.items()[0].external_id, "X");
        assert!(!pc.is_loading());
    }

    #[test]
    fn stale_response_does_not_clear_loading() {
        let mut pc = PageCoordinator::new(2);
        let older = pc.begin_fetch(Some("env1"), Some(0)).expect("older");
        let newer = pc.search().expect("newer");

        assert!(matches!(
            pc.apply(older, Ok(page_of(&["A"], false))),
            FetchOutcome::Stale
        ));
        assert!(pc.is_loading());
        assert!(pc.page().is_none());

        assert!(matches!(pc.apply(newer, Ok(page_of(&["B"], false))), FetchOutcome::Applied));
        assert!(!pc.is_loading());
    }

    #[test]
    fn stale_environment_list_is_dropped() {
        let mut pc = PageCoordinator::new(2);
        let older = pc.begin_load_environments();
        let newer = pc.begin_load_environments();

        let list = EnvironmentList {
            list: vec![crate::discovery::test_support::env("env1")],
        };
        assert!(pc.apply_environments(older, Ok(list.clone())).expect("stale ok").is_none());
        assert!(pc.environments().is_empty());

        let ticket = pc.apply_environments(newer, Ok(list)).expect("applied");
        assert_eq!(ticket.expect("default fetch").environment_id(), "env1");
    }
