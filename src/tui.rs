use anyhow::Result;

use crate::store::ConfigStore;

#[derive(Clone, Debug)]
pub struct TuiRunOptions {
    pub store: ConfigStore,
}

pub fn run(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run(opts)
}
