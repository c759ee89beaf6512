    use std::collections::BTreeMap;
    use std::time::Duration;

    use ratatui::backend::TestBackend;

    use super::*;
    use crate::catalog::{CatalogFixture, ImportRequest, MemoryCatalog, RemoteCatalog};
    use crate::model::Environment;

    fn fixture() -> Arc<MemoryCatalog> {
        let mut applications = BTreeMap::new();
        applications.insert(
            "env1".to_string(),
            vec![
                CatalogItem::new("a", "Alpha"),
                CatalogItem::new("b", "Beta"),
                CatalogItem::new("c", "Gamma"),
            ],
        );
        applications.insert("env2".to_string(), vec![CatalogItem::new("x", "Xray")]);
        let environments = ["env1", "env2"]
            .iter()
            .map(|id| Environment {
                id: id.to_string(),
                name: id.to_string(),
                display_name: None,
            })
            .collect();
        Arc::new(MemoryCatalog::new(CatalogFixture {
            environments,
            applications,
        }))
    }

    fn app_with(catalog: Arc<MemoryCatalog>, bulk_import: bool) -> App {
        let cfg = DiscoverConfig {
            page_size: 2,
            bulk_import,
            ..DiscoverConfig::default()
        };
        let mut app = App::new(catalog, &cfg).expect("app");
        settle(&mut app);
        app
    }

    fn settle(app: &mut App) {
        while app.worker.is_busy() {
            let done = app
                .worker
                .recv_timeout(Duration::from_secs(5))
                .expect("worker completion");
            app.apply_completion(done);
        }
    }

    fn names(app: &App) -> Vec<String> {
        app.pages.items().iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn startup_selects_first_environment_and_loads_first_page() {
        let app = app_with(fixture(), false);
        assert_eq!(app.pages.environment_id(), Some("env1"));
        assert_eq!(names(&app), vec!["Alpha", "Beta"]);
        assert!(app.pages.has_next());
        assert!(!app.pages.has_previous());
        assert!(app.updated_at.is_some());
    }

    #[test]
    fn paging_clears_selection() {
        let mut app = app_with(fixture(), false);
        app.toggle_current();
        assert_eq!(app.pages.page().map(|p| p.selection().len()), Some(1));

        app.next_page();
        settle(&mut app);
        assert_eq!(names(&app), vec!["Gamma"]);
        assert!(app.pages.page().is_some_and(|p| p.selection().is_empty()));

        app.previous_page();
        settle(&mut app);
        assert_eq!(app.pages.offset(), 0);
    }

    #[test]
    fn switching_environment_resets_offset() {
        let mut app = app_with(fixture(), false);
        app.next_page();
        settle(&mut app);

        app.cycle_environment(true);
        settle(&mut app);
        assert_eq!(app.pages.environment_id(), Some("env2"));
        assert_eq!(app.pages.offset(), 0);
        assert_eq!(names(&app), vec!["Xray"]);

        app.cycle_environment(true);
        settle(&mut app);
        assert_eq!(app.pages.environment_id(), Some("env1"));
    }

    #[test]
    fn search_runs_from_first_page() {
        let mut app = app_with(fixture(), false);
        app.search.set("gam");
        app.run_search();
        settle(&mut app);
        assert_eq!(names(&app), vec!["Gamma"]);
        assert_eq!(app.pages.search_query(), "gam");
    }

    #[test]
    fn search_keys_clear_and_cancel_edits() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let mut app = app_with(fixture(), false);
        let press = |app: &mut App, code: KeyCode, modifiers: KeyModifiers| {
            event_loop::handle_key(app, KeyEvent::new(code, modifiers));
        };
        app.search.set("gam");
        app.run_search();
        settle(&mut app);

        app.focus = Focus::Search;
        press(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(app.search.buf, "");
        press(&mut app, KeyCode::Char('b'), KeyModifiers::NONE);
        assert_eq!(app.search.buf, "b");

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.focus, Focus::List);
        assert_eq!(app.search.buf, "gam");
        assert_eq!(app.search.cursor, 3);
        assert!(!app.worker.is_busy());
        assert_eq!(names(&app), vec!["Gamma"]);
    }

    #[test]
    fn bulk_import_disabled_only_shows_notice() {
        let catalog = fixture();
        let mut app = app_with(catalog.clone(), false);
        app.toggle_all();
        app.import_selected();
        settle(&mut app);

        let notice = app.notice.as_ref().expect("notice");
        assert_eq!(notice.kind, NoticeKind::Info);
        assert!(notice.text.contains("2 selected"));
        let snapshot = catalog.snapshot();
        assert!(snapshot.applications["env1"].iter().all(|i| !i.already_imported));
    }

    #[test]
    fn bulk_import_enabled_imports_selection_and_refreshes() {
        let catalog = fixture();
        let mut app = app_with(catalog.clone(), true);
        app.toggle_all();
        app.import_selected();
        settle(&mut app);

        let notice = app.notice.as_ref().expect("notice");
        assert_eq!(notice.text, "Imported 2 of 2 (0 already existed, 0 failed)");
        assert!(app.pages.items().iter().all(|i| i.already_imported));
        assert!(app.pages.page().is_some_and(|p| p.selection().is_empty()));
    }

    #[test]
    fn bulk_import_tallies_conflicts_per_selected_row() {
        let catalog = fixture();
        catalog
            .import_application(&ImportRequest::for_item(
                &CatalogItem::new("a", "Alpha"),
                "env1",
            ))
            .expect("seed import");
        let mut app = app_with(catalog.clone(), true);
        app.toggle_all();
        app.import_selected();
        assert!(app.bulk.as_ref().is_some_and(|b| b.pending.len() == 2));
        settle(&mut app);

        let notice = app.notice.as_ref().expect("notice");
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.text, "Imported 1 of 2 (1 already existed, 0 failed)");
        assert!(app.bulk.is_none());
        assert!(!app.importer.is_importing());
    }

    #[test]
    fn detail_import_returns_to_refreshed_list() {
        let mut app = app_with(fixture(), false);
        app.move_cursor(true);
        app.open_detail();
        settle(&mut app);
        assert_eq!(
            app.detail.as_ref().and_then(|d| d.item()).map(|i| i.name.as_str()),
            Some("Beta")
        );

        app.import_detail();
        settle(&mut app);
        assert!(app.detail.is_none());
        assert!(app.pages.items()[1].already_imported);
        let notice = app.notice.as_ref().expect("notice");
        assert!(notice.text.starts_with("Imported Beta as "));
    }

    #[test]
    fn importing_an_imported_application_is_refused() {
        let mut app = app_with(fixture(), false);
        app.open_detail();
        settle(&mut app);
        app.import_detail();
        settle(&mut app);

        app.open_detail();
        settle(&mut app);
        app.import_detail();
        let notice = app.notice.as_ref().expect("notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.contains("already imported"));
        assert!(!app.worker.is_busy());
    }

    #[test]
    fn renders_rows_and_hints() {
        let mut app = app_with(fixture(), false);
        app.toggle_current();

        let mut terminal = Terminal::new(TestBackend::new(140, 20)).expect("terminal");
        terminal
            .draw(|f| render::draw(f, &app))
            .expect("draw");
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("[x] Alpha"));
        assert!(text.contains("[ ] Beta"));
        assert!(text.contains("1 selected (bulk import disabled)"));
        assert!(text.contains("env1"));
    }
