use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::models::Tab;

/// UI state restored on the next launch: open tabs and the sidebar layout.
#[derive(Serialize, Deserialize)]
pub struct AppState {
    pub tabs: Vec<Tab>,
    pub active_tab: usize,
    pub next_tab_id: usize,
    pub expanded_categories: HashSet<String>,
}

impl AppState {
    pub fn save_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".config").join("material-browser").join("state.json"))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::save_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn load() -> Result<Self> {
        let path = Self::save_path()?;
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let state: AppState = serde_json::from_str(&content)?;
            Ok(state)
        } else {
            Err(anyhow::anyhow!("State file does not exist"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Tab, TabSource, ViewMode};

    #[test]
    fn state_round_trips_through_json() {
        let state = AppState {
            tabs: vec![Tab::new(0, TabSource::All, ViewMode::Table, 50)],
            active_tab: 0,
            next_tab_id: 1,
            expanded_categories: HashSet::from(["pcr".to_string()]),
        };
        let json = serde_json::to_string(&state).unwrap();
        let back: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tabs.len(), 1);
        assert_eq!(back.tabs[0].source, TabSource::All);
        assert_eq!(back.next_tab_id, 1);
        assert!(back.expanded_categories.contains("pcr"));
    }
}
