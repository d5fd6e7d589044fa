//! Configuration loading
//!
//! Sources, lowest priority first:
//! 1. `config/default.toml` embedded at build time
//! 2. `config/{profile}.toml`, where the profile comes from `ARMORY_ENV`
//!    (default `development`)
//! 3. `config/local.toml`
//! 4. The file named by `ARMORY_CONFIG`, which must exist when set
//! 5. `ARMORY_*` environment variables, e.g. `ARMORY_DATABASE__PATH`

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Embedded default configuration
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

const DEFAULT_PROFILE: &str = "development";

/// Load configuration from files and environment.
pub fn load_config() -> Result<AppConfig> {
    let profile = std::env::var("ARMORY_ENV").unwrap_or_else(|_| DEFAULT_PROFILE.to_string());
    let explicit = std::env::var("ARMORY_CONFIG").ok();
    build_config(&profile, explicit.as_deref().map(Path::new), true)
}

fn build_config(profile: &str, explicit: Option<&Path>, with_env: bool) -> Result<AppConfig> {
    let mut builder = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::with_name(&format!("config/{profile}")).required(false))
        .add_source(File::with_name("config/local").required(false));

    if let Some(path) = explicit {
        builder = builder.add_source(File::from(path).required(true));
    }

    if with_env {
        builder = builder.add_source(
            Environment::with_prefix("ARMORY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
    }

    builder
        .build()
        .context("Failed to build configuration")?
        .try_deserialize()
        .context("Failed to deserialize configuration")
}
