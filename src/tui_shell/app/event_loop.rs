use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::{App, Focus};

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.poll_worker();
        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            tracing::info!("tui quit");
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit = true;
        return;
    }

    if app.detail.is_some() {
        handle_detail_key(app, key);
        return;
    }

    match app.focus {
        Focus::Search => handle_search_key(app, key),
        Focus::Environment => handle_environment_key(app, key),
        Focus::List => handle_list_key(app, key),
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.close_detail(),
        KeyCode::Char('i') => app.import_detail(),
        KeyCode::Char('r') => app.reload_detail(),
        KeyCode::Char('q') => app.quit = true,
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.run_search();
            app.focus = Focus::List;
        }
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.search.clear(),
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::Backspace => app.search.backspace(),
        KeyCode::Delete => app.search.delete(),
        KeyCode::Left => app.search.move_left(),
        KeyCode::Right => app.search.move_right(),
        KeyCode::Char(c) => app.search.insert_char(c),
        _ => {}
    }
}

fn handle_environment_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Up => app.cycle_environment(false),
        KeyCode::Right | KeyCode::Down => app.cycle_environment(true),
        KeyCode::Enter | KeyCode::Esc => app.focus = Focus::List,
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::Char('r') => app.reload_environments(),
        KeyCode::Char('q') => app.quit = true,
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Esc => {
            if let Some(page) = app.pages.page_mut() {
                page.clear_selection();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(false),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(true),
        KeyCode::Right | KeyCode::Char('n') => app.next_page(),
        KeyCode::Left | KeyCode::Char('p') => app.previous_page(),
        KeyCode::Char(' ') => app.toggle_current(),
        KeyCode::Char('a') => app.toggle_all(),
        KeyCode::Char('i') => app.import_selected(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Enter => app.open_detail(),
        _ => {}
    }
}
