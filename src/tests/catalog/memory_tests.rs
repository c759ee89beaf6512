    use super::*;

    fn catalog() -> MemoryCatalog {
        let mut applications = BTreeMap::new();
        applications.insert(
            "env1".to_string(),
            vec![
                CatalogItem::new("a", "Alpha"),
                CatalogItem::new("b", "Beta"),
                CatalogItem::new("c", "Gamma"),
            ],
        );
        MemoryCatalog::new(CatalogFixture {
            environments: vec![Environment {
                id: "env1".to_string(),
                name: "Gateway One".to_string(),
                display_name: None,
            }],
            applications,
        })
    }

    fn page(limit: usize, offset: usize, query: &str) -> PageRequest {
        PageRequest {
            limit,
            offset,
            query: query.to_string(),
        }
    }

    #[test]
    fn pages_through_applications_with_cursor() {
        let cat = catalog();
        let first = cat
            .list_discovered_applications("env1", &page(2, 0, ""))
            .expect("first page");
        assert_eq!(first.list.len(), 2);
        assert!(first.has_next());

        let second = cat
            .list_discovered_applications("env1", &page(2, 2, ""))
            .expect("second page");
        assert_eq!(second.list[0].external_id, "c");
        assert!(!second.has_next());
        assert!(second.pagination.as_ref().and_then(|p| p.previous.as_ref()).is_some());
    }

    #[test]
    fn offset_past_the_end_is_an_empty_last_page() {
        let cat = catalog();
        let listed = cat
            .list_discovered_applications("env1", &page(2, usize::MAX, ""))
            .expect("page");
        assert!(listed.list.is_empty());
        assert!(!listed.has_next());
        let pagination = listed.pagination.as_ref().expect("pagination");
        assert_eq!(pagination.total, 3);
        assert!(pagination.previous.is_some());

        let listed = cat
            .list_discovered_applications("env1", &page(usize::MAX, 1, ""))
            .expect("page");
        assert_eq!(listed.list.len(), 2);
        assert!(!listed.has_next());
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let cat = catalog();
        let found = cat
            .list_discovered_applications("env1", &page(10, 0, "ALP"))
            .expect("search");
        assert_eq!(found.list.len(), 1);
        assert_eq!(found.list[0].name, "Alpha");

        let none = cat
            .list_discovered_applications("env1", &page(10, 0, "zzz"))
            .expect("empty search");
        assert!(none.list.is_empty());
        assert!(!none.has_next());
    }

    #[test]
    fn unknown_environment_is_not_found() {
        let cat = catalog();
        let err = cat
            .list_discovered_applications("nope", &page(2, 0, ""))
            .expect_err("unknown env");
        assert!(err.is_not_found());
        let err = cat
            .get_discovered_application("env1", "zz")
            .expect_err("unknown app");
        assert!(err.is_not_found());
    }

    #[test]
    fn second_import_conflicts() {
        let cat = catalog();
        let item = cat.get_discovered_application("env1", "b").expect("get b");
        let req = ImportRequest::for_item(&item, "env1");

        let res = cat.import_application(&req).expect("first import");
        assert_eq!(res.name.as_deref(), Some("Beta"));
        let id = res.application_id.expect("local id");

        let after = cat.get_discovered_application("env1", "b").expect("get b");
        assert!(after.already_imported);
        assert_eq!(after.imported_application_id.as_deref(), Some(id.as_str()));

        let err = cat.import_application(&req).expect_err("second import");
        assert!(err.is_conflict());
    }

    #[test]
    fn verbatim_artifact_resolves_by_equality() {
        let mut fixture = catalog().snapshot();
        if let Some(apps) = fixture.applications.get_mut("env1") {
            apps[2].reference_artifact = Some("opaque-gamma".to_string());
        }
        let cat = MemoryCatalog::new(fixture);
        let res = cat
            .import_application(&ImportRequest {
                environment_id: "env1".to_string(),
                reference_artifact: "opaque-gamma".to_string(),
            })
            .expect("import by artifact");
        assert_eq!(res.name.as_deref(), Some("Gamma"));

        let err = cat
            .import_application(&ImportRequest {
                environment_id: "env1".to_string(),
                reference_artifact: "unknown".to_string(),
            })
            .expect_err("unresolvable artifact");
        assert!(err.is_not_found());
    }
