//! Session state: the configuration plus at most one active list.
//!
//! Every list and task command goes through a `Session`. Mutations are made
//! on a copy of the active list and only committed once the save succeeds, so
//! a failed command leaves both memory and disk as they were.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::db::{self, SaveReport};
use crate::error::{Error, Result};
use crate::fields::{parse_severity, ConfigAttribute, TaskEdit};
use crate::project::{list_path, random_list_name, read_list_dir, validate_stem, DirEntry};
use crate::task::{Task, TaskList, MAX_SEVERITY, MIN_SEVERITY};

/// Ends the `edls tasks` prompts, so no task may carry it as a name.
pub const RESERVED_TASK_NAME: &str = "none";

/// The open list together with the file it is saved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveList {
    pub list: TaskList,
    pub path: PathBuf,
}

impl ActiveList {
    /// File name of the backing file, extension included.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Result of a single task edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub report: SaveReport,
    /// Where the edited task sits after the save, `None` if the purge removed it.
    pub index: Option<usize>,
}

/// Interactive session over one configuration file.
#[derive(Debug)]
pub struct Session {
    config: Config,
    config_path: PathBuf,
    active: Option<ActiveList>,
}

impl Session {
    pub fn new(config: Config, config_path: impl Into<PathBuf>) -> Self {
        Session {
            config,
            config_path: config_path.into(),
            active: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn active(&self) -> Option<&ActiveList> {
        self.active.as_ref()
    }

    pub fn list_dir(&self) -> &Path {
        &self.config.list_directory
    }

    fn require_active(&self) -> Result<&ActiveList> {
        self.active.as_ref().ok_or(Error::NoActiveList)
    }

    /// Run `f` on a copy of the active list, save it, and commit on success.
    fn update_active<T>(&mut self, f: impl FnOnce(&mut TaskList) -> Result<T>) -> Result<(T, SaveReport)> {
        let active = self.active.as_mut().ok_or(Error::NoActiveList)?;
        let mut list = active.list.clone();
        let value = f(&mut list)?;
        let report = db::save_list(&mut list, &active.path, &self.config)?;
        active.list = list;
        Ok((value, report))
    }

    // ---- lists ----

    /// Create an empty list, make it active and write it out.
    ///
    /// Without a name a random `New_List_XXXXXXXXXX` name is used. An existing
    /// file with the same stem is never overwritten.
    pub fn create_list(&mut self, name: Option<&str>) -> Result<SaveReport> {
        let name = match name {
            Some(n) => n.to_string(),
            None => random_list_name(),
        };
        validate_stem(&name)?;

        let path = list_path(self.list_dir(), &name);
        if path.exists() {
            return Err(Error::ListExists(path));
        }

        let mut list = TaskList::new(&name);
        let report = db::save_list(&mut list, &path, &self.config)?;
        info!(list = %name, path = %path.display(), "created list");
        self.active = Some(ActiveList { list, path });
        Ok(report)
    }

    /// Load `<stem>.json`, rewrite it in normalised form and make it active.
    ///
    /// The previously active list is replaced without being saved.
    pub fn open_list(&mut self, stem: Option<&str>) -> Result<&ActiveList> {
        let stem = stem.filter(|s| !s.is_empty()).ok_or_else(|| {
            Error::Usage("a file name is required: \"opls <file-name (no file extension)>\"".into())
        })?;
        validate_stem(stem)?;

        let path = list_path(self.list_dir(), stem);
        let list = db::load_list(&path)?;
        db::write_list(&list, &path)?;
        info!(list = %list.name, path = %path.display(), "opened list");
        Ok(self.active.insert(ActiveList { list, path }))
    }

    pub fn view_list(&self) -> Result<&TaskList> {
        Ok(&self.require_active()?.list)
    }

    /// Change the display name of the active list. The file is not renamed.
    pub fn rename_list(&mut self, new_name: &str) -> Result<SaveReport> {
        self.require_active()?;
        if new_name.trim().is_empty() {
            return Err(Error::Validation("list name cannot be empty".into()));
        }
        let (_, report) = self.update_active(|list| {
            list.name = new_name.to_string();
            Ok(())
        })?;
        Ok(report)
    }

    /// Save the active list as it stands.
    pub fn save_active(&mut self) -> Result<SaveReport> {
        let (_, report) = self.update_active(|_| Ok(()))?;
        Ok(report)
    }

    /// Delete `<stem>.json` after checking it decodes as a list.
    ///
    /// The active list is saved first and stays active. Deleting the file that
    /// backs the active list is refused.
    pub fn delete_list(&mut self, stem: &str) -> Result<PathBuf> {
        let active = self.require_active()?;
        validate_stem(stem)?;

        let path = list_path(self.list_dir(), stem);
        if same_file(&path, &active.path) {
            return Err(Error::Validation(format!(
                "'{stem}' is the open list; open or create another list before deleting it"
            )));
        }

        self.save_active()?;
        let doomed = db::load_list(&path)?;
        fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
        info!(list = %doomed.name, path = %path.display(), "deleted list");
        Ok(path)
    }

    // ---- tasks ----

    fn check_task_name(list: &TaskList, name: &str, skip: Option<usize>) -> Result<()> {
        if name.is_empty() {
            return Err(Error::Validation("task name cannot be empty".into()));
        }
        if name == RESERVED_TASK_NAME {
            return Err(Error::Validation(format!(
                "'{RESERVED_TASK_NAME}' is reserved for leaving the task editor and cannot name a task"
            )));
        }
        let clash = list
            .tasks
            .iter()
            .enumerate()
            .any(|(i, t)| Some(i) != skip && t.name == name);
        if clash {
            return Err(Error::Validation(format!("a task named '{name}' already exists in this list")));
        }
        Ok(())
    }

    fn check_severity(severity: i64) -> Result<()> {
        if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&severity) {
            return Err(Error::Validation(format!(
                "severity must be between {MIN_SEVERITY} and {MAX_SEVERITY}, got {severity}"
            )));
        }
        Ok(())
    }

    /// Append an incomplete task to the active list.
    pub fn create_task(&mut self, name: &str, severity: &str) -> Result<SaveReport> {
        let active = self.require_active()?;
        let severity = parse_severity(severity)?;
        Self::check_task_name(&active.list, name, None)?;
        Self::check_severity(severity)?;

        let (_, report) = self.update_active(|list| {
            list.tasks.push(Task::new(name, severity));
            Ok(())
        })?;
        Ok(report)
    }

    /// Index of the first task named exactly `name`.
    pub fn task_index(&self, name: &str) -> Result<usize> {
        self.require_active()?
            .list
            .position(name)
            .ok_or_else(|| Error::TaskNotFound(name.to_string()))
    }

    /// Change one field of the task at `index` and save.
    pub fn edit_task(&mut self, index: usize, edit: TaskEdit) -> Result<EditOutcome> {
        let active = self.require_active()?;
        if index >= active.list.tasks.len() {
            return Err(Error::Validation(format!("no task at position {}", index + 1)));
        }
        match &edit {
            TaskEdit::Name(name) => Self::check_task_name(&active.list, name, Some(index))?,
            TaskEdit::Severity(severity) => Self::check_severity(*severity)?,
            TaskEdit::CompletionStatus(_) => {}
        }

        let purge = self.config.delete_completed_tasks;
        let (index, report) = self.update_active(|list| {
            let task = &mut list.tasks[index];
            match edit {
                TaskEdit::Name(name) => task.name = name,
                TaskEdit::Severity(severity) => task.severity = severity,
                TaskEdit::CompletionStatus(done) => task.completion_status = done,
            }
            if !purge {
                return Ok(Some(index));
            }
            if list.tasks[index].completion_status {
                return Ok(None);
            }
            Ok(Some(list.tasks[..index].iter().filter(|t| !t.completion_status).count()))
        })?;
        Ok(EditOutcome { report, index })
    }

    /// Remove the first task named `name`. An unknown name changes nothing.
    pub fn delete_task(&mut self, name: &str) -> Result<(Task, SaveReport)> {
        let index = self.task_index(name)?;
        let (task, report) = self.update_active(|list| Ok(list.tasks.remove(index)))?;
        info!(task = %task.name, "deleted task");
        Ok((task, report))
    }

    // ---- configuration ----

    /// Set one configuration attribute and persist the configuration file.
    pub fn set_config(&mut self, attribute: ConfigAttribute, value: &str) -> Result<()> {
        let mut next = self.config.clone();
        next.set(attribute, value)?;
        db::save_config(&next, &self.config_path)?;
        info!(%attribute, value, "configuration changed");
        self.config = next;
        Ok(())
    }

    /// Direct form of `edconf`: resolve the attribute alias, then set it.
    pub fn edit_config(&mut self, attribute: &str, value: &str) -> Result<ConfigAttribute> {
        let attr = ConfigAttribute::parse(attribute).ok_or_else(|| {
            Error::Usage(format!(
                "'{attribute}' is not an attribute of the config file (ListDirectory, FileNameSameAsListName, DeleteCompletedTasks, SortAttribute)"
            ))
        })?;
        self.set_config(attr, value)?;
        Ok(attr)
    }

    /// Point `ListDirectory` somewhere else. Returns the old directory.
    ///
    /// The path is not checked. An open list keeps saving to its own file.
    pub fn change_directory(&mut self, path: &str) -> Result<PathBuf> {
        let old = self.config.list_directory.clone();
        self.set_config(ConfigAttribute::ListDirectory, path)?;
        Ok(old)
    }

    pub fn list_lists(&self) -> Result<Vec<DirEntry>> {
        read_list_dir(self.list_dir())
    }
}

/// Whether two paths name the same file, however they are spelled.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
