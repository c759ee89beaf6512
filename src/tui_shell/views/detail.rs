use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use time::OffsetDateTime;

use super::super::{RenderCtx, View, render_view_chrome};
use crate::discovery::{DetailState, ImportState};
use crate::model::CatalogItem;

pub(in crate::tui_shell) struct DetailView<'a> {
    pub(in crate::tui_shell) detail: &'a DetailState,
    pub(in crate::tui_shell) import_state: ImportState,
}

fn field(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::Gray)),
        Span::raw(value.into()),
    ])
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

impl DetailView<'_> {
    fn item_lines(&self, item: &CatalogItem) -> Vec<Line<'static>> {
        let mut out = vec![
            field("name", item.name.clone()),
            field("id", item.external_id.clone()),
            field("owner", item.owner_label()),
            field("policy", item.policy_label()),
            field("tier", item.tier_label()),
            field(
                "created",
                item.created_time
                    .as_ref()
                    .map(|t| t.display())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ];
        if let Some(desc) = item.description.as_deref().filter(|d| !d.trim().is_empty()) {
            out.push(field("description", desc));
        }

        let status = match (&self.import_state, item.already_imported) {
            (ImportState::Importing, _) => "importing...".to_string(),
            (ImportState::Succeeded, _) => "imported".to_string(),
            (ImportState::Conflict, _) => "already exists in the registry".to_string(),
            (ImportState::Failed(cause), _) => format!("import failed: {}", cause),
            (ImportState::Idle, true) => match item.imported_application_id.as_deref() {
                Some(id) => format!("imported ({})", id),
                None => "imported".to_string(),
            },
            (ImportState::Idle, false) => "not imported (i: import)".to_string(),
        };
        out.push(field("status", status));

        if !item.attributes.is_empty() {
            out.push(Line::from(""));
            out.push(section("Attributes"));
            for (k, v) in &item.attributes {
                out.push(field(&format!("  {}", k), v.clone()));
            }
        }
        if !item.key_info_list.is_empty() {
            out.push(Line::from(""));
            out.push(section("Keys"));
            for key in &item.key_info_list {
                let name = key.key_name.as_deref().unwrap_or(&key.key_type);
                let masked = key.masked_key_value.as_deref().unwrap_or("");
                out.push(Line::from(format!(
                    "  {} {} [{}]",
                    name,
                    masked,
                    key.state_label()
                )));
            }
        }
        if !item.subscribed_apis.is_empty() {
            out.push(Line::from(""));
            out.push(section("Subscribed APIs"));
            for api in &item.subscribed_apis {
                out.push(Line::from(format!(
                    "  {} {} {} [{}]",
                    api.api_name,
                    api.api_version,
                    api.api_context,
                    api.status_label()
                )));
            }
        }
        out
    }
}

impl View for DetailView<'_> {
    fn title(&self) -> String {
        match self.detail.item() {
            Some(item) => format!("Application: {}", item.name),
            None => format!("Application: {}", self.detail.application_id()),
        }
    }

    fn updated_at(&self) -> Option<OffsetDateTime> {
        None
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, &self.title(), self.updated_at(), ctx, area);
        let lines = if self.detail.is_loading() {
            vec![Line::from("(loading...)")]
        } else if self.detail.is_not_found() {
            vec![Line::from(Span::styled(
                format!(
                    "Application {} was not found in {}",
                    self.detail.application_id(),
                    self.detail.environment_id()
                ),
                Style::default().fg(Color::Yellow),
            ))]
        } else if let Some(item) = self.detail.item() {
            self.item_lines(item)
        } else {
            vec![Line::from("(no data)")]
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
