use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub(crate) struct InitArgs {
    /// Re-initialize if .discover already exists
    #[arg(long)]
    pub(crate) force: bool,
    /// Directory to initialize (defaults to current directory)
    #[arg(long)]
    pub(crate) path: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct SettingsArgs {
    /// Rows per page of discovered applications
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=500))]
    pub(crate) page_size: Option<u64>,
    /// Let "import selected" in the discovery list call the catalog
    #[arg(long)]
    pub(crate) bulk_import: Option<bool>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
