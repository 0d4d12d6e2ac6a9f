//! Command-line interface using clap derive macros.
//!
//! Subcommands: list, add, edit, delete, copy, refresh, path.

mod commands;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use vaultora_app::adapters::MemoryCache;
use vaultora_app::{AppStateBuilder, ClientConfig};
use vaultora_core::services::SyncPolicy;
use vaultora_core::types::CredentialField;

pub use commands::execute;

/// Vaultora: a small website/username/password store.
#[derive(Parser, Debug)]
#[command(name = "vaultora")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Credential service URL (overrides config and VAULTORA_SERVICE_URL)
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Remote sync policy
    #[arg(long, global = true, value_enum)]
    pub sync: Option<SyncArg>,

    /// Keep the list in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show stored credentials, passwords masked
    List {
        /// Reveal every password
        #[arg(long)]
        reveal: bool,

        /// Reveal the password of these rows (1-based, repeatable)
        #[arg(long, value_name = "ROW")]
        show: Vec<usize>,
    },

    /// Add a credential. The password is read from stdin when omitted.
    Add {
        #[arg(long)]
        website: String,

        #[arg(long)]
        username: String,

        /// Prefer stdin to keep the password out of shell history
        #[arg(long)]
        password: Option<String>,
    },

    /// Change fields of an existing credential
    Edit {
        /// Record id or 1-based row number
        target: String,

        #[arg(long)]
        website: Option<String>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        password: Option<String>,
    },

    /// Delete a credential
    Delete {
        /// Record id or 1-based row number
        target: String,
    },

    /// Copy one field of a credential to the clipboard
    Copy {
        /// Record id or 1-based row number
        target: String,

        #[arg(long, value_enum, default_value_t = FieldArg::Password)]
        field: FieldArg,
    },

    /// Drop the local snapshot and reload from the service
    Refresh,

    /// Print the config file and cache locations
    Path,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncArg {
    LocalOnly,
    BestEffort,
}

impl From<SyncArg> for SyncPolicy {
    fn from(arg: SyncArg) -> Self {
        match arg {
            SyncArg::LocalOnly => Self::LocalOnly,
            SyncArg::BestEffort => Self::BestEffort,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldArg {
    Website,
    Username,
    Password,
}

impl From<FieldArg> for CredentialField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Website => Self::Website,
            FieldArg::Username => Self::Username,
            FieldArg::Password => Self::Password,
        }
    }
}

/// Resolve configuration, load the list and run one command.
pub async fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut config = ClientConfig::load().context("failed to load client configuration")?;
    if let Some(url) = cli.service_url {
        config.service_url = url;
    }
    if let Some(sync) = cli.sync {
        config.sync_policy = sync.into();
    }

    if let Commands::Path = cli.command {
        return commands::print_paths(&config, cli.ephemeral, out);
    }

    let mut builder = AppStateBuilder::new().config(config);
    if cli.ephemeral {
        builder = builder.local_cache(Arc::new(MemoryCache::new()));
    }
    let mut state = builder.build().context("failed to initialise client")?;

    state.run_startup().await;
    if let Some(err) = state.client.last_error() {
        eprintln!("Failed to load passwords. Using empty list. ({err})");
    }

    execute(cli.command, &mut state.client, out).await?;

    if let Some(err) = state.client.sync_error() {
        eprintln!("Saved locally, but the service was not updated: {err}");
    }
    Ok(())
}
