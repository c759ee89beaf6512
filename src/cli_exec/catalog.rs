use anyhow::{Context, Result};
use discover::catalog::RemoteCatalog;
use discover::discovery::{DetailState, ImportCoordinator, ImportOutcome, PageCoordinator};
use discover::model::CatalogItem;
use discover::remote::RemoteClient;
use discover::store::ConfigStore;

use crate::cli_commands::catalog::ListArgs;
use crate::require_remote;

fn connect(store: &ConfigStore) -> Result<RemoteClient> {
    let remote = require_remote(store)?;
    RemoteClient::new(remote)
}

pub(super) fn handle_envs_command(store: &ConfigStore, json: bool) -> Result<()> {
    let client = connect(store)?;
    let envs = client.list_environments()?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&envs.list).context("serialize environments json")?
        );
    } else if envs.list.is_empty() {
        println!("No gateway environments");
    } else {
        for env in &envs.list {
            println!("{}  {}", env.id, env.label());
        }
    }
    Ok(())
}

pub(super) fn handle_list_command(store: &ConfigStore, args: ListArgs) -> Result<()> {
    let cfg = store.read_config()?;
    let page_size = args.limit.unwrap_or(cfg.page_size).max(1);
    if args.offset % page_size != 0 {
        anyhow::bail!(
            "--offset {} is not a multiple of the page size {}",
            args.offset,
            page_size
        );
    }
    let client = connect(store)?;

    let mut pages = PageCoordinator::new(page_size);
    pages.set_search_query(&args.query);
    match args.env.as_deref() {
        Some(env) => {
            let mut ticket = pages.set_environment(env)?;
            if args.offset > 0 {
                // Supersedes the first-page ticket, which is never run.
                ticket = pages
                    .begin_fetch(None, Some(args.offset))
                    .context("no environment selected")?;
            }
            pages.run(&client, ticket).into_result()?;
        }
        None => {
            pages.load_environments(&client).into_result()?;
            if pages.environment_id().is_none() {
                anyhow::bail!("no gateway environments configured on the remote");
            }
            if args.offset > 0 {
                pages
                    .fetch(&client, None, Some(args.offset))
                    .into_result()?;
            }
        }
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "environment": pages.environment_id(),
                "offset": pages.offset(),
                "has_next": pages.has_next(),
                "has_previous": pages.has_previous(),
                "list": pages.items(),
            }))
            .context("serialize list json")?
        );
        return Ok(());
    }

    let env = pages.environment_id().unwrap_or("-");
    if pages.items().is_empty() {
        println!("No discovered applications in {}", env);
        return Ok(());
    }
    println!("Environment: {}", env);
    for item in pages.items() {
        let marker = if item.already_imported { "*" } else { " " };
        println!(
            "{} {}  {}  owner={} policy={}",
            marker,
            item.external_id,
            item.name,
            item.owner_label(),
            item.policy_label()
        );
    }
    let mut nav = Vec::new();
    if pages.has_previous() {
        nav.push(format!(
            "--offset {}",
            pages.offset().saturating_sub(pages.page_size())
        ));
    }
    if pages.has_next() {
        nav.push(format!("--offset {}", pages.offset() + pages.page_size()));
    }
    if !nav.is_empty() {
        println!("More: {}", nav.join(" | "));
    }
    Ok(())
}

pub(super) fn handle_show_command(
    store: &ConfigStore,
    environment_id: &str,
    application_id: &str,
    json: bool,
) -> Result<()> {
    let client = connect(store)?;
    let mut detail = DetailState::new(environment_id, application_id);
    detail.load(&client).into_result()?;
    let item = detail.item().context("application not loaded")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(item).context("serialize application json")?
        );
    } else {
        print_detail(item);
    }
    Ok(())
}

fn print_detail(item: &CatalogItem) {
    println!("{}", item.name);
    println!("  id:          {}", item.external_id);
    println!("  owner:       {}", item.owner_label());
    println!("  policy:      {}", item.policy_label());
    println!("  tier:        {}", item.tier_label());
    println!(
        "  created:     {}",
        item.created_time
            .as_ref()
            .map(|t| t.display())
            .unwrap_or_else(|| "-".to_string())
    );
    if let Some(desc) = item.description.as_deref().filter(|d| !d.trim().is_empty()) {
        println!("  description: {}", desc);
    }
    if item.already_imported {
        match item.imported_application_id.as_deref() {
            Some(id) => println!("  imported:    yes ({})", id),
            None => println!("  imported:    yes"),
        }
    }
    for (key, value) in &item.attributes {
        println!("  attribute:   {} = {}", key, value);
    }
    for key in &item.key_info_list {
        println!("  key:         {} [{}]", key.key_type, key.state_label());
    }
    for api in &item.subscribed_apis {
        println!(
            "  api:         {} {} ({}) [{}]",
            api.api_name,
            api.api_version,
            api.api_context,
            api.status_label()
        );
    }
}

pub(super) fn handle_import_command(
    store: &ConfigStore,
    environment_id: &str,
    application_id: &str,
    json: bool,
) -> Result<()> {
    let client = connect(store)?;
    let mut detail = DetailState::new(environment_id, application_id);
    detail.load(&client).into_result()?;

    let mut importer = ImportCoordinator::new();
    let outcome = detail.import(&client, &mut importer)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome_json(&outcome))
                .context("serialize import json")?
        );
    }
    match outcome {
        ImportOutcome::Succeeded { result, .. } => {
            if !json {
                println!(
                    "Imported {} as {}",
                    result.name.as_deref().unwrap_or(application_id),
                    result.application_id.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        ImportOutcome::Conflict { id } => {
            anyhow::bail!("Application already exists: {}", id)
        }
        ImportOutcome::Failed { id, cause } => {
            anyhow::bail!("Error importing {}: {}", id, cause)
        }
        ImportOutcome::Skipped { id } => anyhow::bail!("Nothing imported for {}", id),
    }
}

fn outcome_json(outcome: &ImportOutcome) -> serde_json::Value {
    match outcome {
        ImportOutcome::Succeeded { id, result } => serde_json::json!({
            "id": id,
            "status": "imported",
            "applicationId": result.application_id,
            "name": result.name,
        }),
        ImportOutcome::Conflict { id } => serde_json::json!({ "id": id, "status": "conflict" }),
        ImportOutcome::Failed { id, cause } => {
            serde_json::json!({ "id": id, "status": "failed", "error": cause })
        }
        ImportOutcome::Skipped { id } => serde_json::json!({ "id": id, "status": "skipped" }),
    }
}
