use anyhow::{Context, Result};
use clap::Parser;

use discover::logging::{self, LogSink, Verbosity};
use discover::model::RemoteConfig;
use discover::store::ConfigStore;

use crate::Commands;

#[derive(Parser)]
#[command(name = "discover")]
#[command(about = "Discover and import applications from external API gateways", long_about = None)]
pub(crate) struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        None => {
            let store = open_store()?;
            if let Err(err) = logging::init(verbosity, LogSink::File(store.log_path())) {
                eprintln!("warning: {:#}; logging disabled", err);
                logging::init(verbosity, LogSink::Discard)?;
            }
            discover::tui::run(discover::tui::TuiRunOptions { store })?;
        }
        Some(command) => {
            logging::init(verbosity, LogSink::Stderr)?;
            crate::cli_exec::handle_command(command)?
        }
    }

    Ok(())
}

pub(crate) fn open_store() -> Result<ConfigStore> {
    ConfigStore::discover(&std::env::current_dir().context("get current dir")?)
}

pub(crate) fn require_remote(store: &ConfigStore) -> Result<RemoteConfig> {
    let cfg = store.read_config()?;
    cfg.remote
        .context("no remote configured (run `discover remote set --url ... --token ...`)")
}
