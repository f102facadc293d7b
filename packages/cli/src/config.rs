use serde::{Deserialize, Serialize};
use sitebuilder_editor::EditorConfig;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "sitebuilder.config.json";

/// Sitebuilder configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding saved site documents
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Undo levels kept per page (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    /// Indent saved documents
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_data_dir() -> String {
    "sites".to_string()
}

fn default_pretty_json() -> bool {
    true
}

impl Config {
    /// Load config from a directory, falling back to defaults
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Absolute path of the data directory
    pub fn get_data_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.data_dir)
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            history_limit: self.history_limit,
            pretty_json: self.pretty_json,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_limit: 0,
            pretty_json: default_pretty_json(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "dataDir": "content",
            "historyLimit": 50,
            "prettyJson": false
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.data_dir, "content");
        assert_eq!(config.history_limit, 50);
        assert!(!config.pretty_json);
        assert_eq!(config.editor_config().history_limit, 50);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_dir, "sites");
        assert!(config.pretty_json);
    }

    #[test]
    fn test_load_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.get_data_dir(dir.path()), dir.path().join("sites"));
    }
}
