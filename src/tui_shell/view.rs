use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use time::OffsetDateTime;

#[derive(Clone, Copy, Debug)]
pub(super) struct RenderCtx {
    pub(super) now: OffsetDateTime,
}

/// A screen drawn inside the main area. Views borrow the coordinator state
/// they show; nothing is copied per frame.
pub(super) trait View {
    fn title(&self) -> String;
    fn updated_at(&self) -> Option<OffsetDateTime>;

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx);
}

pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    updated_at: Option<OffsetDateTime>,
    ctx: &RenderCtx,
    area: Rect,
) -> Rect {
    let mut spans = vec![Span::styled(
        title.to_string(),
        Style::default().fg(Color::Yellow),
    )];
    if let Some(ts) = updated_at {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("updated {}", super::fmt_since(ts, ctx.now)),
            Style::default().fg(Color::Gray),
        ));
    }

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(spans));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}
