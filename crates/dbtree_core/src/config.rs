use crate::{CachePolicy, TreeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_sort_children() -> bool {
    true
}

/// User-tunable behavior of the resource tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub cache: CachePolicy,

    /// Sort leaves by label before handing them to the host.
    #[serde(default = "default_sort_children")]
    pub sort_children: bool,

    /// Overrides the directory icon assets are resolved against.
    #[serde(default)]
    pub asset_root: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            cache: CachePolicy::default(),
            sort_children: default_sort_children(),
            asset_root: None,
        }
    }
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new() -> Result<Self, TreeError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            TreeError::IoError(std::io::Error::other("Could not find config directory"))
        })?;

        let app_dir = config_dir.join("dbtree");
        fs::create_dir_all(&app_dir).map_err(TreeError::IoError)?;

        Ok(Self::with_path(app_dir.join("config.json")))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the config, falling back to defaults when the file is absent.
    pub fn load(&self) -> Result<ProviderConfig, TreeError> {
        if !self.path.exists() {
            return Ok(ProviderConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(TreeError::IoError)?;
        let config: ProviderConfig =
            serde_json::from_str(&content).map_err(|e| TreeError::Config(e.to_string()))?;

        log::debug!("Loaded tree config from {}", self.path.display());

        Ok(config)
    }

    pub fn save(&self, config: &ProviderConfig) -> Result<(), TreeError> {
        let content =
            serde_json::to_string_pretty(config).map_err(|e| TreeError::Config(e.to_string()))?;

        fs::write(&self.path, content).map_err(TreeError::IoError)?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
