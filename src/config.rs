//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration for the TUI
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Backend base URL
    pub api_base_url: Option<String>,
    /// Owner id used to scope clone listings
    pub owner_id: Option<String>,
    /// Clone grid sort field
    pub clone_sort_field: Option<String>,
    /// Clone grid sort direction
    pub clone_sort_direction: Option<String>,
    /// Show draft clones in the grid by default
    pub show_draft_clones: Option<bool>,
}

#[allow(dead_code)]
impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "cloneai", "cloneai-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.owner_id.is_none());
        assert!(config.clone_sort_field.is_none());
        assert!(config.clone_sort_direction.is_none());
        assert!(config.show_draft_clones.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = AppConfig {
            api_base_url: Some("http://localhost:8000".to_string()),
            owner_id: Some("expert-7".to_string()),
            clone_sort_field: Some("created".to_string()),
            clone_sort_direction: Some("desc".to_string()),
            show_draft_clones: Some(true),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.api_base_url, Some("http://localhost:8000".to_string()));
        assert_eq!(parsed.owner_id, Some("expert-7".to_string()));
        assert_eq!(parsed.clone_sort_field, Some("created".to_string()));
        assert_eq!(parsed.clone_sort_direction, Some("desc".to_string()));
        assert_eq!(parsed.show_draft_clones, Some(true));
    }

    #[test]
    fn test_partial_serialization() {
        let config = AppConfig {
            owner_id: Some("expert-7".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.owner_id, Some("expert-7".to_string()));
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.owner_id.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"owner_id": "expert-7", "unknown_field": "value"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.owner_id, Some("expert-7".to_string()));
    }

    #[test]
    fn test_load_returns_default_when_no_file() {
        let result = AppConfig::load();
        assert!(result.is_ok());
    }
}
