use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::{
    error::{Result, RewardError},
    rewards::Project,
};

/// Built-in roster used when no configuration file is present
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub reward: RewardConfig,
    pub projects: Vec<Project>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RewardConfig {
    /// Amount received from the sponsor for each eligible project
    pub per_project: u64,
    pub currency: String,
}

impl Config {
    /// Layer the built-in roster, the optional file at `path`, and `GSOC_*`
    /// environment variables (`GSOC_REWARD__PER_PROJECT=600`).
    pub fn load(path: &str) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::load_with_env(path, None)
    }

    /// Same as [`Config::load`], reading `GSOC_*` overrides from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(path: &str, env: Option<config::Map<String, String>>) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(Path::new(path)).required(false))
            .add_source(
                config::Environment::with_prefix("GSOC")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("Failed to load configuration from {}", path))?;

        Ok(config.try_deserialize()?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the roster to `path`, refusing to replace an existing file unless `force`
    pub fn write_to(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(RewardError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        std::fs::write(path, self.to_toml()?)?;
        info!("Roster written to {}", path.display());
        Ok(())
    }
}
