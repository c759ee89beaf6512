pub mod catalog;
pub mod discovery;
pub mod logging;
pub mod model;
pub mod remote;
pub mod store;
pub mod tui;

mod tui_shell;
