use std::path::PathBuf;

use anyhow::{Context, Result};
use discover::model::RemoteConfig;
use discover::store::ConfigStore;

use crate::RemoteCommands;
use crate::cli_commands::config::SettingsArgs;

pub(super) fn handle_init_command(force: bool, path: Option<PathBuf>) -> Result<()> {
    let root = match path {
        Some(p) => p,
        None => std::env::current_dir().context("get current dir")?,
    };
    ConfigStore::init(&root, force)?;
    println!("Initialized discover configuration at {}", root.display());
    Ok(())
}

pub(super) fn handle_remote_command(store: &ConfigStore, command: RemoteCommands) -> Result<()> {
    match command {
        RemoteCommands::Show { json } => {
            let cfg = store.read_config()?;
            if json {
                // Never echo the token.
                let view = cfg
                    .remote
                    .as_ref()
                    .map(|r| serde_json::json!({ "base_url": r.base_url }));
                println!(
                    "{}",
                    serde_json::to_string_pretty(&view).context("serialize remote json")?
                );
            } else if let Some(remote) = cfg.remote {
                println!("url: {}", remote.base_url);
            } else {
                println!("No remote configured");
            }
        }
        RemoteCommands::Set { url, token } => {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("remote url must start with http:// or https://");
            }
            let mut cfg = store.read_config()?;
            cfg.remote = Some(RemoteConfig {
                base_url: url,
                token,
            });
            store.write_config(&cfg)?;
            println!("Remote configured");
        }
    }
    Ok(())
}

pub(super) fn handle_settings_command(store: &ConfigStore, args: SettingsArgs) -> Result<()> {
    let mut cfg = store.read_config()?;
    let mut changed = false;
    if let Some(n) = args.page_size {
        cfg.page_size = usize::try_from(n).context("page size out of range")?;
        changed = true;
    }
    if let Some(b) = args.bulk_import {
        cfg.bulk_import = b;
        changed = true;
    }
    if changed {
        store.write_config(&cfg)?;
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "page_size": cfg.page_size,
                "bulk_import": cfg.bulk_import,
            }))
            .context("serialize settings json")?
        );
    } else {
        println!("page_size: {}", cfg.page_size);
        println!("bulk_import: {}", cfg.bulk_import);
    }
    Ok(())
}
