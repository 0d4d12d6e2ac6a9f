//! CLI command handlers.
//!
//! Each handler drives the `CredentialStoreClient` that `run` has already
//! loaded; output goes to the given writer so it can be captured in tests.

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use vaultora_app::ClientConfig;
use vaultora_core::services::{CredentialStoreClient, LoadOutcome};
use vaultora_core::types::{CredentialField, CredentialInput};

use super::{Commands, FieldArg};

/// Execute one parsed command.
pub async fn execute(
    command: Commands,
    client: &mut CredentialStoreClient,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Commands::List { reveal, show } => cmd_list(client, reveal, &show, out),
        Commands::Add {
            website,
            username,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => read_password(&mut std::io::stdin().lock())?,
            };
            cmd_add(client, CredentialInput::new(website, username, password), out).await
        }
        Commands::Edit {
            target,
            website,
            username,
            password,
        } => cmd_edit(client, &target, website, username, password, out).await,
        Commands::Delete { target } => cmd_delete(client, &target, out).await,
        Commands::Copy { target, field } => cmd_copy(client, &target, field, out).await,
        Commands::Refresh => cmd_refresh(client, out).await,
        // answered before the client is built
        Commands::Path => Ok(()),
    }
}

// ─── Read ────────────────────────────────────────────────────────────────────

fn cmd_list(
    client: &mut CredentialStoreClient,
    reveal_all: bool,
    show: &[usize],
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let count = client.records().len();
    if count == 0 {
        writeln!(out, "No passwords to show")?;
        return Ok(());
    }

    let mut rows: Vec<usize> = show
        .iter()
        .map(|&row| row_index(row, count))
        .collect::<anyhow::Result<_>>()?;
    if reveal_all {
        rows = (0..count).collect();
    }
    for row in rows {
        if !client.is_revealed(row) {
            client.toggle_visibility(row);
        }
    }

    let website_width = column_width(client, "WEBSITE", |r| r.website.chars().count());
    let username_width = column_width(client, "USERNAME", |r| r.username.chars().count());

    writeln!(
        out,
        "{:>3}  {:<website_width$}  {:<username_width$}  PASSWORD",
        "#", "WEBSITE", "USERNAME"
    )?;
    for (index, record) in client.records().iter().enumerate() {
        let password = client.display_password(index).unwrap_or_default();
        writeln!(
            out,
            "{:>3}  {:<website_width$}  {:<username_width$}  {password}",
            index + 1,
            record.website,
            record.username
        )?;
    }
    Ok(())
}

fn column_width<F>(client: &CredentialStoreClient, header: &str, len: F) -> usize
where
    F: Fn(&vaultora_core::types::CredentialRecord) -> usize,
{
    client
        .records()
        .iter()
        .map(len)
        .max()
        .unwrap_or(0)
        .max(header.len())
}

// ─── Write ───────────────────────────────────────────────────────────────────

async fn cmd_add(
    client: &mut CredentialStoreClient,
    input: CredentialInput,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let record = client.save(input, None).await?;
    writeln!(out, "✓ Saved {} ({})", record.website, record.id)?;
    Ok(())
}

async fn cmd_edit(
    client: &mut CredentialStoreClient,
    target: &str,
    website: Option<String>,
    username: Option<String>,
    password: Option<String>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let id = resolve_target(client, target)?;
    let mut input = client.begin_edit(&id)?;
    if let Some(website) = website {
        input.website = website;
    }
    if let Some(username) = username {
        input.username = username;
    }
    if let Some(password) = password {
        input.password = password;
    }

    let record = match client.submit(input).await {
        Ok(record) => record,
        Err(e) => {
            // leave no half-finished edit behind
            if client.editing_id().is_some() {
                client.cancel_edit()?;
            }
            return Err(e.into());
        }
    };
    writeln!(out, "✓ Updated {} ({})", record.website, record.id)?;
    Ok(())
}

async fn cmd_delete(
    client: &mut CredentialStoreClient,
    target: &str,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let id = resolve_target(client, target)?;
    let removed = client.delete(&id).await?;
    writeln!(out, "✓ Deleted {} ({})", removed.website, removed.id)?;
    Ok(())
}

async fn cmd_copy(
    client: &CredentialStoreClient,
    target: &str,
    field: FieldArg,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let id = resolve_target(client, target)?;
    client
        .copy_field(&id, CredentialField::from(field))
        .await
        .context("failed to copy to clipboard")?;
    writeln!(out, "✓ Copied {field:?} to clipboard")?;
    Ok(())
}

async fn cmd_refresh(client: &mut CredentialStoreClient, out: &mut dyn Write) -> anyhow::Result<()> {
    match client.refresh().await {
        LoadOutcome::Remote { count } | LoadOutcome::Cache { count } => {
            writeln!(out, "✓ Loaded {count} password(s) from service")?;
        }
        LoadOutcome::Fallback(e) => {
            bail!("refresh failed, kept {} local password(s): {e}", client.records().len())
        }
    }
    Ok(())
}

// ─── Misc ────────────────────────────────────────────────────────────────────

pub fn print_paths(config: &ClientConfig, ephemeral: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let config_path = ClientConfig::default_path()
        .map_or_else(|| "(unavailable)".to_string(), |p| p.display().to_string());
    let cache = if ephemeral {
        "(memory)".to_string()
    } else {
        config.cache_dir.display().to_string()
    };

    writeln!(out, "config:  {config_path}")?;
    writeln!(out, "cache:   {cache}")?;
    writeln!(out, "service: {}", config.service_url)?;
    writeln!(out, "sync:    {:?}", config.sync_policy)?;
    Ok(())
}

/// Accept either a record id or a 1-based row number.
fn resolve_target(client: &CredentialStoreClient, target: &str) -> anyhow::Result<String> {
    if client.find(target).is_some() {
        return Ok(target.to_string());
    }
    if let Ok(row) = target.parse::<usize>() {
        let index = row_index(row, client.records().len())?;
        return Ok(client.records()[index].id.clone());
    }
    bail!("no credential with id {target:?}")
}

fn row_index(row: usize, count: usize) -> anyhow::Result<usize> {
    if row == 0 || row > count {
        bail!("row {row} is out of range (1-{count})");
    }
    Ok(row - 1)
}

fn read_password(input: &mut dyn BufRead) -> anyhow::Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
