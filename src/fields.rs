//! Enumerations and value parsers shared by the command handlers.
//!
//! This module defines the sort keys understood by `SortAttribute`, the
//! editable configuration attributes with their accepted aliases, and the
//! editable task fields.

use std::fmt;

use crate::error::{Error, Result};

/// Available display orderings for `vwls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Severity,
    CompletionStatus,
}

impl SortKey {
    /// Parse a `SortAttribute` value. Empty and unknown values yield `None`.
    pub fn parse(s: &str) -> Option<SortKey> {
        match normalise_key(s).as_str() {
            "name" => Some(SortKey::Name),
            "severity" | "importance" => Some(SortKey::Severity),
            "completionstatus" | "completed" | "status" => Some(SortKey::CompletionStatus),
            _ => None,
        }
    }

    /// Canonical spelling stored in the configuration file.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Severity => "severity",
            SortKey::CompletionStatus => "completionStatus",
        }
    }
}

/// Configuration attributes that `edconf` can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAttribute {
    ListDirectory,
    FileNameSameAsListName,
    DeleteCompletedTasks,
    SortAttribute,
}

impl ConfigAttribute {
    /// Resolve an attribute alias. Matching ignores case and spaces.
    pub fn parse(s: &str) -> Option<ConfigAttribute> {
        match normalise_key(s).as_str() {
            "listdirectory" | "listdir" | "lsdir" => Some(ConfigAttribute::ListDirectory),
            "filenamesameaslistname" | "fnsame" => Some(ConfigAttribute::FileNameSameAsListName),
            "deletecompletedtasks" | "delcomptk" => Some(ConfigAttribute::DeleteCompletedTasks),
            "sortattribute" | "statt" => Some(ConfigAttribute::SortAttribute),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfigAttribute::ListDirectory => "ListDirectory",
            ConfigAttribute::FileNameSameAsListName => "FileNameSameAsListName",
            ConfigAttribute::DeleteCompletedTasks => "DeleteCompletedTasks",
            ConfigAttribute::SortAttribute => "SortAttribute",
        };
        f.write_str(s)
    }
}

/// A single-field change to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEdit {
    Name(String),
    Severity(i64),
    CompletionStatus(bool),
}

/// Task attributes accepted by the interactive editor. Spelling is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Name,
    Severity,
    CompletionStatus,
}

impl TaskField {
    pub fn parse(s: &str) -> Option<TaskField> {
        match s {
            "name" => Some(TaskField::Name),
            "severity" => Some(TaskField::Severity),
            "completionStatus" => Some(TaskField::CompletionStatus),
            _ => None,
        }
    }

    /// Convert raw user input into an edit for this field.
    pub fn edit_from(self, raw: &str) -> Result<TaskEdit> {
        match self {
            TaskField::Name => Ok(TaskEdit::Name(raw.to_string())),
            TaskField::Severity => parse_severity(raw).map(TaskEdit::Severity),
            TaskField::CompletionStatus => parse_bool(raw).map(TaskEdit::CompletionStatus),
        }
    }
}

/// Lowercase and strip spaces so `"List Directory"` matches `"listdirectory"`.
fn normalise_key(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect()
}

/// Parse a boolean in the conventional `ParseBool` forms.
pub fn parse_bool(s: &str) -> Result<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::Validation(format!("'{s}' is not a boolean (use true or false)"))),
    }
}

/// Parse a severity as a base-10 integer. Range checks happen in the session.
pub fn parse_severity(s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| Error::Validation(format!("severity '{s}' is not a whole number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_attribute_aliases() {
        for alias in ["ListDirectory", "List Directory", "listdir", "lsdir", "LISTDIRECTORY"] {
            assert_eq!(ConfigAttribute::parse(alias), Some(ConfigAttribute::ListDirectory), "{alias}");
        }
        for alias in ["DeleteCompletedTasks", "delete completed tasks", "delcomptk"] {
            assert_eq!(ConfigAttribute::parse(alias), Some(ConfigAttribute::DeleteCompletedTasks), "{alias}");
        }
        for alias in ["SortAttribute", "Sort Attribute", "statt"] {
            assert_eq!(ConfigAttribute::parse(alias), Some(ConfigAttribute::SortAttribute), "{alias}");
        }
        assert_eq!(ConfigAttribute::parse("fnsame"), Some(ConfigAttribute::FileNameSameAsListName));
        assert_eq!(ConfigAttribute::parse("colour"), None);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("T").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("False").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(matches!(parse_bool("yes"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("severity"), Some(SortKey::Severity));
        assert_eq!(SortKey::parse("completionStatus"), Some(SortKey::CompletionStatus));
        assert_eq!(SortKey::parse(""), None);
        assert_eq!(SortKey::parse("due"), None);
    }

    #[test]
    fn test_task_field_edit_from() {
        assert_eq!(TaskField::parse("severity").unwrap().edit_from("4").unwrap(), TaskEdit::Severity(4));
        assert!(TaskField::parse("Severity").is_none());
        assert!(TaskField::Severity.edit_from("high").is_err());
        assert_eq!(
            TaskField::CompletionStatus.edit_from("true").unwrap(),
            TaskEdit::CompletionStatus(true)
        );
    }
}
