use clap::Subcommand;

pub(crate) mod catalog;
pub(crate) mod config;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Initialize client configuration (.discover)
    Init(config::InitArgs),

    /// Configure or show the gateway catalog remote
    Remote {
        #[command(subcommand)]
        command: RemoteCommands,
    },

    /// Show or change discovery settings
    Settings(config::SettingsArgs),

    /// List external gateway environments
    Envs(catalog::EnvsArgs),

    /// List discovered applications in an environment
    List(catalog::ListArgs),

    /// Show one discovered application
    Show(catalog::ShowArgs),

    /// Import one discovered application into the registry
    Import(catalog::ImportArgs),
}

#[derive(Subcommand)]
pub(crate) enum RemoteCommands {
    /// Show the configured remote
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the configured remote
    Set {
        #[arg(long)]
        url: String,
        #[arg(long)]
        token: String,
    },
}
