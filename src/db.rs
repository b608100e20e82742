//! Persistence for list files and the configuration file.
//!
//! `save_list` is the one place where save-time policy is applied: the
//! completed-task purge and the list name / file name consistency warning.
//! Every command that changes a list goes through it.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::project::file_stem;
use crate::task::TaskList;

/// What a save did besides writing the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Completed tasks discarded by the purge policy.
    pub purged: usize,
    /// The list name differs from its file stem while the consistency check is on.
    pub name_mismatch: bool,
}

/// Read and decode a list file. A missing file is an error, never an empty list.
pub fn load_list(path: &Path) -> Result<TaskList> {
    let mut buf = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut buf))
        .map_err(|e| Error::io(path, e))?;
    let list = serde_json::from_str(&buf).map_err(|e| Error::decode(path, e))?;
    debug!(path = %path.display(), "loaded list");
    Ok(list)
}

/// Encode and write a list without applying any save policy.
pub fn write_list(list: &TaskList, path: &Path) -> Result<()> {
    write_json(list, path)
}

/// Apply save-time policy to `list` in place, then write it to `path`.
///
/// With `DeleteCompletedTasks` on, completed tasks are removed from the
/// caller's list, not just from the written copy.
pub fn save_list(list: &mut TaskList, path: &Path, config: &Config) -> Result<SaveReport> {
    let mut report = SaveReport::default();

    if config.delete_completed_tasks {
        report.purged = list.purge_completed();
        if report.purged > 0 {
            info!(list = %list.name, purged = report.purged, "removed completed tasks");
        }
    }

    if config.file_name_same_as_list_name {
        let stem = file_stem(path).unwrap_or_default();
        if stem != list.name {
            warn!(list = %list.name, file = %stem, "list name does not equal file name");
            report.name_mismatch = true;
        }
    }

    write_json(list, path)?;
    debug!(path = %path.display(), tasks = list.tasks.len(), "saved list");
    Ok(report)
}

/// Read the configuration file.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut buf = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut buf))
        .map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&buf).map_err(|e| Error::decode(path, e))
}

/// Read the configuration file, writing defaults first if it does not exist.
pub fn load_or_init_config(path: &Path) -> Result<Config> {
    if path.exists() {
        return load_config(path);
    }
    let config = Config::default_for(path);
    fs::create_dir_all(&config.list_directory).map_err(|e| Error::io(&config.list_directory, e))?;
    save_config(&config, path)?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(config)
}

/// Overwrite the configuration file with `config`.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    write_json(config, path)?;
    debug!(path = %path.display(), "saved configuration");
    Ok(())
}

/// Write JSON via temp file + rename so readers never see a half-written file.
fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let data = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    let mut f = File::create(&tmp).map_err(|e| Error::io(&tmp, e))?;
    f.write_all(data.as_bytes()).map_err(|e| Error::io(&tmp, e))?;
    f.flush().map_err(|e| Error::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| Error::io(path, e))?;
    Ok(())
}
