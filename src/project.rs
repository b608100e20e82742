//! List file naming and discovery.
//!
//! Each list is stored as `<stem>.json` inside the list directory. The stem is
//! the public identifier used by commands and is independent of the list's
//! display name.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rand::Rng;

use crate::error::{Error, Result};

/// Extension of every list file.
pub const LIST_EXTENSION: &str = "json";

const RANDOM_NAME_PREFIX: &str = "New_List_";
const RANDOM_NAME_LEN: usize = 10;
const RANDOM_NAME_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Path of the list file for `stem` inside `list_dir`.
pub fn list_path(list_dir: &Path, stem: &str) -> PathBuf {
    list_dir.join(format!("{stem}.{LIST_EXTENSION}"))
}

/// File name with its extension stripped.
pub fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}

/// Reject stems that would escape the list directory or produce no file name.
pub fn validate_stem(stem: &str) -> Result<()> {
    if stem.trim().is_empty() {
        return Err(Error::Validation("list name cannot be empty".into()));
    }
    if stem == "." || stem == ".." || stem.contains('/') || stem.contains('\\') {
        return Err(Error::Validation(format!(
            "'{stem}' cannot be used as a list file name"
        )));
    }
    Ok(())
}

/// `New_List_` followed by ten random uppercase alphanumerics.
pub fn random_list_name() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..RANDOM_NAME_LEN)
        .map(|_| RANDOM_NAME_CHARSET[rng.gen_range(0..RANDOM_NAME_CHARSET.len())] as char)
        .collect();
    format!("{RANDOM_NAME_PREFIX}{suffix}")
}

/// One entry of the list directory.
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
    pub modified: Option<DateTime<Local>>,
}

/// Read the list directory, sorted by name.
pub fn read_list_dir(list_dir: &Path) -> Result<Vec<DirEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(list_dir).map_err(|e| Error::io(list_dir, e))? {
        let entry = entry.map_err(|e| Error::io(list_dir, e))?;
        let metadata = entry.metadata().map_err(|e| Error::io(entry.path(), e))?;

        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: metadata.is_dir(),
            modified: metadata.modified().ok().map(DateTime::<Local>::from),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
