use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONTENT_DB_ENV: &str = "ADEFT_CONTENT_DB";
pub const UPDATE_DB_ENV: &str = "ADEFT_UPDATE_DB";

/// SQLite's default host-parameter cap is 999; stay under it.
pub const DEFAULT_BATCH_SIZE: usize = 900;

/// Locations of the two logical stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLocations {
    /// agent_text_pmids, entrez_pmids, entity_pmids(_major), best_content
    pub content_db: PathBuf,
    /// text_content
    pub update_db: PathBuf,
}

impl Default for StoreLocations {
    fn default() -> Self {
        Self {
            content_db: PathBuf::from("content.db"),
            update_db: PathBuf::from("update.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Worker count for text extraction; 1 runs serially.
    pub n_jobs: usize,
    /// Maximum number of bound identifiers per IN-query.
    pub batch_size: usize,
    pub stores: StoreLocations,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            n_jobs: 1,
            batch_size: DEFAULT_BATCH_SIZE,
            stores: StoreLocations::default(),
        }
    }
}

impl ContentConfig {
    /// Override store locations from `ADEFT_CONTENT_DB` / `ADEFT_UPDATE_DB`.
    pub fn apply_env(mut self) -> Self {
        if let Ok(path) = std::env::var(CONTENT_DB_ENV) {
            self.stores.content_db = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var(UPDATE_DB_ENV) {
            self.stores.update_db = PathBuf::from(path);
        }
        self
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.n_jobs == 0 {
            return Err(crate::Error::Config("n_jobs must be at least 1".to_string()));
        }
        if self.batch_size == 0 {
            return Err(crate::Error::Config("batch_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("adeft-content.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ContentConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ContentConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &ContentConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
