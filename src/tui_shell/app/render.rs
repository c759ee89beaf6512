use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use time::OffsetDateTime;

use super::super::views::{DetailView, ListView};
use super::super::{RenderCtx, View};
use super::{App, Focus, NoticeKind};

fn focus_style(app: &App, focus: Focus) -> Style {
    if app.detail.is_none() && app.focus == focus {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(area);

    // Header: environment selector and search field.
    let env_label = if app.pages.is_loading_environments() {
        "loading...".to_string()
    } else {
        app.pages
            .environment()
            .map(|e| e.label().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    };
    let mut spans = vec![
        Span::styled(
            "Discover",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::styled("env: ", focus_style(app, Focus::Environment)),
        Span::styled(format!("< {} >", env_label), Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::styled("search: ", focus_style(app, Focus::Search)),
    ];
    if app.focus == Focus::Search && app.detail.is_none() {
        spans.push(Span::raw(format!("{}_", app.search.buf)));
    } else if app.pages.search_query().is_empty() {
        spans.push(Span::styled("(all)", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(app.pages.search_query().to_string()));
    }
    if app.is_busy() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("working...", Style::default().fg(Color::Yellow)));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
    };
    if let Some(detail) = app.detail.as_ref() {
        DetailView {
            detail,
            import_state: detail
                .item()
                .map(|i| app.importer.state(&i.external_id))
                .unwrap_or_default(),
        }
        .render(frame, chunks[1], &ctx);
    } else {
        ListView {
            pages: &app.pages,
            importer: &app.importer,
            cursor: app.cursor,
            focused: app.focus == Focus::List,
            bulk_import: app.bulk_import,
            updated_at: app.updated_at,
        }
        .render(frame, chunks[1], &ctx);
    }

    // Last notice
    let notice = match app.notice.as_ref() {
        Some(n) => {
            let color = match n.kind {
                NoticeKind::Info => Color::White,
                NoticeKind::Warning => Color::Yellow,
                NoticeKind::Error => Color::Red,
            };
            Line::from(Span::styled(n.text.as_str(), Style::default().fg(color)))
        }
        None => Line::from(""),
    };
    frame.render_widget(
        Paragraph::new(notice)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP)),
        chunks[2],
    );

    let hints = if app.detail.is_some() {
        "i import  r reload  Esc back  q quit"
    } else {
        match app.focus {
            Focus::Environment => "←/→ switch environment  Enter done  Tab next  q quit",
            Focus::Search => "type to search  Enter run  Ctrl-U clear  Esc cancel  Tab next",
            Focus::List => {
                "↑/↓ move  Space select  a all  i import selected  Enter details  n/p page  / search  Tab next  q quit"
            }
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[3],
    );
}
