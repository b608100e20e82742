//! Process-wide settings controlling storage location and save-time behaviour.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fields::{parse_bool, ConfigAttribute, SortKey};

/// Default configuration file name, looked up in the starting directory.
pub const CONFIG_FILE_NAME: &str = "task_manager.config.json";

/// Settings persisted in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Config {
    pub list_directory: PathBuf,
    pub file_name_same_as_list_name: bool,
    pub delete_completed_tasks: bool,
    pub sort_attribute: String,
}

impl Config {
    /// Defaults used when no configuration file exists yet: lists live next to it.
    ///
    /// The list directory is made absolute so later launches from another
    /// working directory still find it.
    pub fn default_for(config_path: &Path) -> Self {
        let base = std::path::absolute(config_path)
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Config {
            list_directory: base.join("lists"),
            ..Config::default()
        }
    }

    /// Display ordering selected by `SortAttribute`, if any.
    pub fn sort_key(&self) -> Option<SortKey> {
        SortKey::parse(&self.sort_attribute)
    }

    /// Apply a raw string value to one attribute. On error nothing changes.
    pub fn set(&mut self, attribute: ConfigAttribute, value: &str) -> Result<()> {
        match attribute {
            ConfigAttribute::ListDirectory => {
                if value.trim().is_empty() {
                    return Err(Error::Validation("ListDirectory cannot be empty".into()));
                }
                self.list_directory = PathBuf::from(value);
            }
            ConfigAttribute::FileNameSameAsListName => {
                self.file_name_same_as_list_name = parse_bool(value)?;
            }
            ConfigAttribute::DeleteCompletedTasks => {
                self.delete_completed_tasks = parse_bool(value)?;
            }
            ConfigAttribute::SortAttribute => {
                if value.is_empty() || value.eq_ignore_ascii_case("none") {
                    self.sort_attribute = String::new();
                } else {
                    let key = SortKey::parse(value).ok_or_else(|| {
                        Error::Validation(format!(
                            "'{value}' is not a sort attribute (use name, severity, completionStatus or none)"
                        ))
                    })?;
                    self.sort_attribute = key.as_str().to_string();
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case_keys() {
        let cfg = Config {
            list_directory: PathBuf::from("/tmp/lists"),
            file_name_same_as_list_name: true,
            delete_completed_tasks: false,
            sort_attribute: "severity".into(),
        };
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ListDirectory": "/tmp/lists",
                "FileNameSameAsListName": true,
                "DeleteCompletedTasks": false,
                "SortAttribute": "severity"
            })
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"ListDirectory":"/data"}"#).unwrap();
        assert_eq!(cfg.list_directory, PathBuf::from("/data"));
        assert!(!cfg.delete_completed_tasks);
        assert_eq!(cfg.sort_key(), None);
    }

    #[test]
    fn test_set_rejects_bad_values_without_change() {
        let mut cfg = Config::default();
        assert!(cfg.set(ConfigAttribute::DeleteCompletedTasks, "maybe").is_err());
        assert!(cfg.set(ConfigAttribute::SortAttribute, "colour").is_err());
        assert_eq!(cfg, Config::default());

        cfg.set(ConfigAttribute::SortAttribute, "Severity").unwrap();
        assert_eq!(cfg.sort_attribute, "severity");
        cfg.set(ConfigAttribute::SortAttribute, "none").unwrap();
        assert_eq!(cfg.sort_attribute, "");
    }

    #[test]
    fn test_default_for_places_lists_beside_config() {
        let cfg = Config::default_for(Path::new("/home/me/task_manager.config.json"));
        assert_eq!(cfg.list_directory, PathBuf::from("/home/me/lists"));
    }

    #[test]
    fn test_default_for_relative_config_is_absolute() {
        let cfg = Config::default_for(Path::new("task_manager.config.json"));
        assert!(cfg.list_directory.is_absolute());
        assert!(cfg.list_directory.ends_with("lists"));
    }
}
