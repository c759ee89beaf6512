use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use time::OffsetDateTime;

use super::super::{RenderCtx, View, render_view_chrome};
use crate::discovery::{ImportCoordinator, ImportState, PageCoordinator};
use crate::model::CatalogItem;

/// The discovered-applications table for the selected environment.
pub(in crate::tui_shell) struct ListView<'a> {
    pub(in crate::tui_shell) pages: &'a PageCoordinator,
    pub(in crate::tui_shell) importer: &'a ImportCoordinator,
    pub(in crate::tui_shell) cursor: usize,
    pub(in crate::tui_shell) focused: bool,
    pub(in crate::tui_shell) bulk_import: bool,
    pub(in crate::tui_shell) updated_at: Option<OffsetDateTime>,
}

fn checkbox(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

fn status_span(item: &CatalogItem, state: ImportState) -> Span<'static> {
    match state {
        ImportState::Importing => Span::styled("importing", Style::default().fg(Color::Yellow)),
        ImportState::Succeeded => Span::styled("imported", Style::default().fg(Color::Green)),
        ImportState::Conflict => Span::styled("exists", Style::default().fg(Color::Yellow)),
        ImportState::Failed(_) => Span::styled("failed", Style::default().fg(Color::Red)),
        ImportState::Idle if item.already_imported => {
            Span::styled("imported", Style::default().fg(Color::Green))
        }
        ImportState::Idle => Span::raw(""),
    }
}

impl ListView<'_> {
    fn header_line(&self) -> Line<'static> {
        let page = self.pages.page();
        let all = checkbox(page.is_some_and(|p| p.is_all_selected()));
        let all = if page.is_some_and(|p| p.is_partially_selected()) {
            "[-]"
        } else {
            all
        };
        Line::from(Span::styled(
            format!(
                "{} {:<28} {:<16} {:<16} {:<20} {}",
                all, "Name", "Owner", "Policy", "Created", "Status"
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    }

    fn row(&self, item: &CatalogItem, selected: bool) -> ListItem<'static> {
        let created = item
            .created_time
            .as_ref()
            .map(|t| t.display())
            .unwrap_or_else(|| "-".to_string());
        let line = Line::from(vec![
            Span::raw(format!(
                "{} {:<28} {:<16} {:<16} {:<20} ",
                checkbox(selected),
                truncate(&item.name, 28),
                truncate(item.owner_label(), 16),
                truncate(item.policy_label(), 16),
                created
            )),
            status_span(item, self.importer.state(&item.external_id)),
        ]);
        ListItem::new(line)
    }

    fn footer_line(&self) -> Line<'static> {
        let page_no = self.pages.offset() / self.pages.page_size() + 1;
        let selected = self.pages.page().map(|p| p.selection().len()).unwrap_or(0);
        let mut parts = vec![format!("page {}", page_no)];
        if self.pages.has_previous() {
            parts.push("p: previous".to_string());
        }
        if self.pages.has_next() {
            parts.push("n: next".to_string());
        }
        if selected > 0 {
            let action = if self.bulk_import {
                "i: import selected"
            } else {
                "bulk import disabled"
            };
            parts.push(format!("{} selected ({})", selected, action));
        }
        Line::from(Span::styled(
            parts.join("  "),
            Style::default().fg(Color::Gray),
        ))
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('~');
    out
}

impl View for ListView<'_> {
    fn title(&self) -> String {
        "Discovered applications".to_string()
    }

    fn updated_at(&self) -> Option<OffsetDateTime> {
        self.updated_at
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, &self.title(), self.updated_at(), ctx, area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(self.header_line()), parts[0]);

        let items = self.pages.items();
        let selection = self.pages.page().map(|p| p.selection());
        let mut rows: Vec<ListItem> = items
            .iter()
            .map(|item| {
                let selected = selection.is_some_and(|s| s.contains(&item.external_id));
                self.row(item, selected)
            })
            .collect();
        if rows.is_empty() {
            let empty = if self.pages.is_loading() || self.pages.is_loading_environments() {
                "(loading...)"
            } else if self.pages.environment_id().is_none() {
                "(select an environment)"
            } else if self.pages.search_query().is_empty() {
                "(no discovered applications)"
            } else {
                "(no applications match the search)"
            };
            rows.push(ListItem::new(empty));
        }

        let mut state = ListState::default();
        if self.focused && !items.is_empty() {
            state.select(Some(self.cursor.min(items.len().saturating_sub(1))));
        }
        let list = List::new(rows).highlight_style(Style::default().bg(Color::DarkGray));
        frame.render_stateful_widget(list, parts[1], &mut state);

        frame.render_widget(Paragraph::new(self.footer_line()), parts[2]);
    }
}
