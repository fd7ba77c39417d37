//! Centralized configuration management for flagedit

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::errors::{EditorError, EditorResult};
use crate::models::Seed;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON seed with the flag's initial state
    pub seed_path: PathBuf,
    /// File the TUI logs to
    pub log_file: PathBuf,
    /// Amount the sort field moves per increment key press
    pub sort_step: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_path: PathBuf::from("./flag.json"),
            log_file: PathBuf::from("flagedit.log"),
            sort_step: 1,
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let seed_path = std::env::var("FLAGEDIT_SEED")
            .map(PathBuf::from)
            .unwrap_or(defaults.seed_path);

        let log_file = std::env::var("FLAGEDIT_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        let sort_step = parse_env_var("FLAGEDIT_SORT_STEP")?.unwrap_or(defaults.sort_step);

        Ok(Config {
            seed_path,
            log_file,
            sort_step,
        })
    }

    /// Command line seed path wins over the environment
    pub fn with_seed_path(mut self, seed_path: Option<PathBuf>) -> Self {
        if let Some(path) = seed_path {
            self.seed_path = path;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> EditorResult<()> {
        if self.sort_step == 0 {
            return Err(EditorError::Config(
                "FLAGEDIT_SORT_STEP must not be zero".to_string(),
            ));
        }
        // PageDown applies the negated step
        if self.sort_step == i64::MIN {
            return Err(EditorError::Config(format!(
                "FLAGEDIT_SORT_STEP must be greater than {}",
                i64::MIN
            )));
        }
        Ok(())
    }

    pub fn load_seed(&self) -> Result<Seed, EditorError> {
        load_seed(&self.seed_path)
    }
}

/// Read and parse a seed file
pub fn load_seed(path: &Path) -> Result<Seed, EditorError> {
    let text = std::fs::read_to_string(path).map_err(|source| EditorError::SeedRead {
        path: path.to_path_buf(),
        source,
    })?;
    let seed: Seed = serde_json::from_str(&text).map_err(|source| EditorError::SeedParse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded seed from {}", path.display());
    Ok(seed)
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
