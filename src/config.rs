use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::models::ViewMode;

pub const PAGE_SIZES: [usize; 4] = [25, 50, 100, 250];

/// User preferences, persisted as JSON under the config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub default_page_size: usize,
    pub default_view_mode: ViewMode,
    /// External catalog file to load instead of the built-in catalog.
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            default_page_size: 50,
            default_view_mode: ViewMode::Table,
            catalog_path: None,
        }
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::new())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".config").join("material-browser").join("config.json"))
    }
}
