use anyhow::Result;
use discover::store::ConfigStore;

use super::catalog::{
    handle_envs_command, handle_import_command, handle_list_command, handle_show_command,
};
use super::config::{handle_init_command, handle_remote_command, handle_settings_command};
use crate::Commands;

fn with_store<T>(f: impl FnOnce(&ConfigStore) -> Result<T>) -> Result<T> {
    let store = crate::open_store()?;
    f(&store)
}

pub(super) fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Init(args) => handle_init_command(args.force, args.path)?,
        Commands::Remote { command } => with_store(|s| handle_remote_command(s, command))?,
        Commands::Settings(args) => with_store(|s| handle_settings_command(s, args))?,
        Commands::Envs(args) => with_store(|s| handle_envs_command(s, args.json))?,
        Commands::List(args) => with_store(|s| handle_list_command(s, args))?,
        Commands::Show(args) => with_store(|s| {
            handle_show_command(s, &args.env, &args.application_id, args.json)
        })?,
        Commands::Import(args) => with_store(|s| {
            handle_import_command(s, &args.env, &args.application_id, args.json)
        })?,
    }
    Ok(())
}
