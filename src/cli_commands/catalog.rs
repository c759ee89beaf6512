use clap::Args;

#[derive(Args)]
pub(crate) struct EnvsArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ListArgs {
    /// Gateway environment id (defaults to the first environment)
    #[arg(long)]
    pub(crate) env: Option<String>,
    /// Search by application name
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    /// Rows to skip; a multiple of the page size
    #[arg(long, default_value_t = 0)]
    pub(crate) offset: usize,
    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Gateway environment id
    #[arg(long)]
    pub(crate) env: String,
    /// Discovered application id
    pub(crate) application_id: String,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ImportArgs {
    /// Gateway environment id
    #[arg(long)]
    pub(crate) env: String,
    /// Discovered application id
    pub(crate) application_id: String,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
