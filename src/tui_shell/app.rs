use std::collections::HashSet;
use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use time::OffsetDateTime;

use crate::discovery::{
    DetailState, DiscoveryError, FetchOutcome, FetchTicket, ImportCoordinator, ImportOutcome,
    PageCoordinator,
};
use crate::model::{CatalogItem, DiscoverConfig};
use crate::remote::RemoteClient;

use super::input::Input;
use super::worker::{Completion, Job, SharedCatalog, Worker};

mod event_loop;
mod render;
mod time_utils;

pub(super) use self::time_utils::fmt_since;

pub(super) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let cfg = opts.store.read_config()?;
    let remote = cfg
        .remote
        .clone()
        .context("no remote configured (run `discover remote set --url ... --token ...`)")?;
    let catalog: SharedCatalog = Arc::new(RemoteClient::new(remote)?);
    let mut app = App::new(catalog, &cfg)?;
    tracing::info!(page_size = cfg.page_size, bulk_import = cfg.bulk_import, "tui started");

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = event_loop::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Focus {
    Environment,
    Search,
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Environment => Focus::Search,
            Focus::Search => Focus::List,
            Focus::List => Focus::Environment,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum NoticeKind {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub(super) struct Notice {
    pub(super) kind: NoticeKind,
    pub(super) text: String,
}

/// Bulk import started from the list, tallied as completions arrive.
#[derive(Debug, Default)]
struct BulkProgress {
    pending: HashSet<String>,
    outcomes: Vec<ImportOutcome>,
}

pub(super) struct App {
    bulk_import: bool,

    pages: PageCoordinator,
    importer: ImportCoordinator,
    detail: Option<DetailState>,
    bulk: Option<BulkProgress>,
    worker: Worker,

    focus: Focus,
    search: Input,
    cursor: usize,
    notice: Option<Notice>,
    updated_at: Option<OffsetDateTime>,
    quit: bool,
}

impl App {
    pub(super) fn new(catalog: SharedCatalog, cfg: &DiscoverConfig) -> Result<Self> {
        let mut app = Self {
            bulk_import: cfg.bulk_import,
            pages: PageCoordinator::new(cfg.page_size),
            importer: ImportCoordinator::new(),
            detail: None,
            bulk: None,
            worker: Worker::spawn(catalog)?,
            focus: Focus::List,
            search: Input::default(),
            cursor: 0,
            notice: None,
            updated_at: None,
            quit: false,
        };
        app.reload_environments();
        Ok(app)
    }

    fn info(&mut self, text: impl Into<String>) {
        self.set_notice(NoticeKind::Info, text.into());
    }

    fn warn(&mut self, text: impl Into<String>) {
        self.set_notice(NoticeKind::Warning, text.into());
    }

    fn error(&mut self, err: &DiscoveryError) {
        self.set_notice(NoticeKind::Error, err.to_string());
    }

    fn set_notice(&mut self, kind: NoticeKind, text: String) {
        match kind {
            NoticeKind::Error => tracing::warn!(notice = %text),
            _ => tracing::debug!(notice = %text),
        }
        self.notice = Some(Notice { kind, text });
    }

    fn submit_page(&mut self, ticket: Option<FetchTicket>) {
        if let Some(ticket) = ticket {
            self.worker.submit(Job::Page(ticket));
        }
    }

    fn current_item(&self) -> Option<&CatalogItem> {
        self.pages.items().get(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let len = self.pages.items().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn display_name(&self, id: &str) -> String {
        self.detail
            .as_ref()
            .and_then(|d| d.item())
            .filter(|i| i.external_id == id)
            .or_else(|| self.pages.page().and_then(|p| p.find(id)))
            .map(|i| i.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub(super) fn is_busy(&self) -> bool {
        self.worker.is_busy()
    }

    /// Drains finished catalog calls. Called once per UI tick.
    pub(super) fn poll_worker(&mut self) {
        while let Some(done) = self.worker.try_recv() {
            self.apply_completion(done);
        }
    }

    fn apply_completion(&mut self, done: Completion) {
        match done {
            Completion::Environments(ticket, result) => {
                match self.pages.apply_environments(ticket, result) {
                    Ok(next) => {
                        if self.pages.environments().is_empty() {
                            self.warn("No gateway environments available");
                        }
                        self.submit_page(next);
                    }
                    Err(err) => self.error(&err),
                }
            }
            Completion::Page(ticket, result) => match self.pages.apply(ticket, result) {
                FetchOutcome::Applied => {
                    self.updated_at = Some(OffsetDateTime::now_utc());
                    self.clamp_cursor();
                }
                FetchOutcome::Failed(err) => self.error(&err),
                FetchOutcome::Stale | FetchOutcome::Skipped => {}
            },
            Completion::Detail {
                ticket,
                environment_id,
                application_id,
                result,
            } => {
                // A ticket only means something to the detail view that issued it.
                let Some(detail) = self.detail.as_mut() else {
                    return;
                };
                if detail.environment_id() != environment_id
                    || detail.application_id() != application_id
                {
                    return;
                }
                if let FetchOutcome::Failed(err) = detail.apply(ticket, result) {
                    self.error(&err);
                }
            }
            Completion::Import(ticket, result) => {
                if let Some(outcome) = self.importer.finish(ticket, result) {
                    self.apply_import(outcome);
                }
            }
        }
    }

    fn apply_import(&mut self, outcome: ImportOutcome) {
        if let Some(bulk) = self.bulk.as_mut()
            && bulk.pending.remove(outcome.id())
        {
            bulk.outcomes.push(outcome);
            if bulk.pending.is_empty() {
                self.finish_bulk();
            }
            return;
        }

        let name = self.display_name(outcome.id());
        match outcome {
            ImportOutcome::Succeeded { result, .. } => {
                match result.application_id.as_deref() {
                    Some(id) => self.info(format!("Imported {} as {}", name, id)),
                    None => self.info(format!("Imported {}", name)),
                }
                self.detail = None;
                self.refresh();
            }
            ImportOutcome::Conflict { .. } => {
                self.warn(format!("Application already exists: {}", name));
            }
            ImportOutcome::Failed { cause, .. } => {
                self.set_notice(
                    NoticeKind::Error,
                    format!("Error importing {}: {}", name, cause),
                );
            }
            ImportOutcome::Skipped { .. } => {}
        }
    }

    fn finish_bulk(&mut self) {
        let Some(bulk) = self.bulk.take() else {
            return;
        };
        let total = bulk.outcomes.len();
        let imported = bulk.outcomes.iter().filter(|o| o.is_success()).count();
        let conflicts = bulk
            .outcomes
            .iter()
            .filter(|o| matches!(o, ImportOutcome::Conflict { .. }))
            .count();
        let failed = total - imported - conflicts;

        let text = format!(
            "Imported {} of {} ({} already existed, {} failed)",
            imported, total, conflicts, failed
        );
        if failed > 0 {
            self.set_notice(NoticeKind::Error, text);
        } else if conflicts > 0 {
            self.warn(text);
        } else {
            self.info(text);
        }
        if imported > 0 {
            self.refresh();
        }
    }

    pub(super) fn reload_environments(&mut self) {
        let ticket = self.pages.begin_load_environments();
        self.worker.submit(Job::Environments(ticket));
    }

    pub(super) fn refresh(&mut self) {
        let ticket = self.pages.refresh();
        self.submit_page(ticket);
    }

    /// Steps through the environment list, wrapping at both ends.
    pub(super) fn cycle_environment(&mut self, forward: bool) {
        let envs = self.pages.environments();
        if envs.is_empty() {
            return;
        }
        let current = self
            .pages
            .environment_id()
            .and_then(|id| envs.iter().position(|e| e.id == id))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % envs.len()
        } else {
            (current + envs.len() - 1) % envs.len()
        };
        let id = envs[next].id.clone();
        match self.pages.set_environment(&id) {
            Ok(ticket) => {
                self.cursor = 0;
                self.worker.submit(Job::Page(ticket));
            }
            Err(err) => self.error(&err),
        }
    }

    pub(super) fn run_search(&mut self) {
        self.pages.set_search_query(self.search.buf.trim());
        self.cursor = 0;
        let ticket = self.pages.search();
        self.submit_page(ticket);
    }

    /// Leaves the search field, restoring the text of the search in effect.
    pub(super) fn cancel_search(&mut self) {
        self.search.set(self.pages.search_query());
        self.focus = Focus::List;
    }

    pub(super) fn next_page(&mut self) {
        let ticket = self.pages.next_page();
        if ticket.is_some() {
            self.cursor = 0;
        }
        self.submit_page(ticket);
    }

    pub(super) fn previous_page(&mut self) {
        let ticket = self.pages.previous_page();
        if ticket.is_some() {
            self.cursor = 0;
        }
        self.submit_page(ticket);
    }

    pub(super) fn move_cursor(&mut self, down: bool) {
        if down {
            self.cursor += 1;
            self.clamp_cursor();
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    pub(super) fn toggle_current(&mut self) {
        if self.pages.is_loading() {
            return;
        }
        let Some(id) = self.current_item().map(|i| i.external_id.clone()) else {
            return;
        };
        if let Some(page) = self.pages.page_mut() {
            page.toggle(&id);
        }
    }

    pub(super) fn toggle_all(&mut self) {
        if self.pages.is_loading() {
            return;
        }
        if let Some(page) = self.pages.page_mut() {
            page.toggle_all();
        }
    }

    pub(super) fn open_detail(&mut self) {
        let (Some(env), Some(item)) = (self.pages.environment_id(), self.current_item()) else {
            return;
        };
        let mut detail = DetailState::new(env, &item.external_id);
        let ticket = detail.begin_load();
        self.worker.submit(Job::Detail {
            ticket,
            environment_id: detail.environment_id().to_string(),
            application_id: detail.application_id().to_string(),
        });
        self.detail = Some(detail);
    }

    pub(super) fn reload_detail(&mut self) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let ticket = detail.begin_load();
        let job = Job::Detail {
            ticket,
            environment_id: detail.environment_id().to_string(),
            application_id: detail.application_id().to_string(),
        };
        self.worker.submit(job);
    }

    pub(super) fn close_detail(&mut self) {
        self.detail = None;
    }

    pub(super) fn import_detail(&mut self) {
        let Some(detail) = self.detail.as_ref() else {
            return;
        };
        match detail.begin_import(&mut self.importer) {
            Ok(ticket) => {
                let name = self.display_name(ticket.id());
                self.info(format!("Importing {}...", name));
                self.worker.submit(Job::Import(ticket));
            }
            Err(err) => self.error(&err),
        }
    }

    /// "Import selected" on the list. Shows a notice only, unless bulk import
    /// is enabled in settings, in which case the page's selection goes
    /// through [`ImportCoordinator::begin_many`].
    pub(super) fn import_selected(&mut self) {
        let Some(page) = self.pages.page() else {
            return;
        };
        let selected = page.selection().len();
        if selected == 0 {
            self.warn("Select applications first (Space, or `a` for the whole page)");
            return;
        }
        if !self.bulk_import {
            self.info(format!(
                "{} selected. Bulk import is disabled; open an application and press `i`, or run `discover settings --bulk-import true`",
                selected
            ));
            return;
        }
        if self.bulk.is_some() || self.importer.is_importing() {
            self.warn("An import is already running");
            return;
        }

        let batch = self.importer.begin_many(
            page.selection(),
            page.items(),
            &page.query().environment_id,
        );
        let mut bulk = BulkProgress {
            pending: HashSet::new(),
            outcomes: batch.skipped,
        };
        for ticket in batch.tickets {
            bulk.pending.insert(ticket.id().to_string());
            self.worker.submit(Job::Import(ticket));
        }
        self.bulk = Some(bulk);
        if self.bulk.as_ref().is_some_and(|b| b.pending.is_empty()) {
            self.finish_bulk();
        } else {
            self.info(format!("Importing {} applications...", selected));
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
