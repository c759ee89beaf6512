use anyhow::Result;

mod app;

mod input;
mod view;
mod views;
mod worker;

// Make core TUI types/helpers available to submodules via `super::...`.
use app::fmt_since;
use view::{RenderCtx, View, render_view_chrome};

pub fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
