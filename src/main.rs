mod cli_commands;
mod cli_exec;
mod cli_runtime;

pub(crate) use cli_commands::{Commands, RemoteCommands};
pub(crate) use cli_runtime::{open_store, require_remote};

fn main() {
    if let Err(err) = cli_runtime::run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
