//! CLI module for Armory
//!
//! Provides commands:
//! - `serve`: Start the HTTP server
//! - `init-db`: Create the database schema at the configured path
//! - `import`: Load reference data (weapons, ammo, operators) from JSON

use anyhow::{Context, Result};
use armory_core::{ArmoryStore, ReferenceData};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Armory CLI
#[derive(Parser, Debug)]
#[command(name = "armory")]
#[command(about = "Operator and weapon reference service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server
    Serve,
    /// Create the database schema
    InitDb,
    /// Import reference data from a JSON file
    Import {
        /// Path to the JSON bundle
        path: PathBuf,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Serve) => crate::server::run().await,
        Some(Commands::InitDb) => {
            let store = open_store().await?;
            store.health_check().await.context("Database check failed")?;
            info!("Database schema ready");
            Ok(())
        }
        Some(Commands::Import { path }) => {
            let data = read_bundle(&path)?;
            let store = open_store().await?;
            store
                .import(&data)
                .await
                .with_context(|| format!("Failed to import {}", path.display()))?;
            Ok(())
        }
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

async fn open_store() -> Result<ArmoryStore> {
    let config = crate::server::load_config().context("Failed to load configuration")?;
    let path = config.database.resolve_path()?;
    ArmoryStore::from_path(&path)
        .await
        .with_context(|| format!("Failed to open database at {}", path.display()))
}

fn read_bundle(path: &std::path::Path) -> Result<ReferenceData> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid reference data in {}", path.display()))
}
