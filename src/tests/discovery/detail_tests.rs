    use super::*;
    use crate::discovery::test_support::{ScriptedCatalog, abc_catalog};

    #[test]
    fn loads_the_requested_application() {
        let cat = abc_catalog();
        let mut detail = DetailState::new("env1", "B");
        assert!(matches!(detail.load(&cat), FetchOutcome::Applied));
        assert!(!detail.is_loading());
        assert_eq!(detail.item().map(|i| i.name.as_str()), Some("App B"));
    }

    #[test]
    fn missing_application_is_a_terminal_empty_state() {
        let cat = abc_catalog();
        let mut detail = DetailState::new("env1", "nope");
        match detail.load(&cat) {
            FetchOutcome::Failed(DiscoveryError::NotFound { application_id, .. }) => {
                assert_eq!(application_id, "nope")
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(detail.is_not_found());
        assert!(detail.item().is_none());

        let mut importer = ImportCoordinator::new();
        assert!(matches!(
            detail.import(&cat, &mut importer),
            Err(DiscoveryError::NothingToImport)
        ));
    }

    #[test]
    fn import_then_reload_shows_imported() {
        let cat = abc_catalog();
        let mut importer = ImportCoordinator::new();
        let mut detail = DetailState::new("env1", "A");
        detail.load(&cat);

        let outcome = detail.import(&cat, &mut importer).expect("import allowed");
        assert!(outcome.is_success());

        detail.load(&cat);
        let item = detail.item().expect("item");
        assert!(item.already_imported);
        assert!(item.imported_application_id.is_some());
        assert!(matches!(
            detail.import(&cat, &mut importer),
            Err(DiscoveryError::AlreadyImported(_))
        ));
    }

    #[test]
    fn import_is_refused_while_one_is_running() {
        let cat = ScriptedCatalog::new();
        let mut importer = ImportCoordinator::new();
        let mut detail = DetailState::new("env1", "C");
        detail.load(&cat);

        let ticket = detail.begin_import(&mut importer).expect("first import");
        assert!(matches!(
            detail.begin_import(&mut importer),
            Err(DiscoveryError::ImportInProgress(_))
        ));
        assert!(importer.run(&cat, ticket).is_success());
    }

    #[test]
    fn stale_detail_response_is_dropped() {
        let mut detail = DetailState::new("env1", "A");
        let older = detail.begin_load();
        let newer = detail.begin_load();
        assert!(matches!(
            detail.apply(older, Ok(CatalogItem::new("A", "old"))),
            FetchOutcome::Stale
        ));
        assert!(detail.is_loading());
        assert!(matches!(
            detail.apply(newer, Ok(CatalogItem::new("A", "new"))),
            FetchOutcome::Applied
        ));
        assert_eq!(detail.item().map(|i| i.name.as_str()), Some("new"));
    }
