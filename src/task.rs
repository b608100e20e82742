//! Task and task list data structures.
//!
//! A `TaskList` is what lives in a single list file: a display name plus the
//! tasks in insertion order. The JSON field names are part of the on-disk
//! format and must not change.

use serde::{Deserialize, Serialize};

use crate::fields::SortKey;

/// Lowest accepted severity for new or edited tasks.
pub const MIN_SEVERITY: i64 = 1;
/// Highest accepted severity for new or edited tasks.
pub const MAX_SEVERITY: i64 = 5;

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub severity: i64,
    #[serde(rename = "completionStatus", default)]
    pub completion_status: bool,
}

impl Task {
    /// Create an incomplete task.
    pub fn new(name: impl Into<String>, severity: i64) -> Self {
        Task {
            name: name.into(),
            severity,
            completion_status: false,
        }
    }
}

/// A named, ordered collection of tasks backed by one list file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskList {
    /// Create an empty list with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        TaskList {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Position of the first task whose name matches exactly.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.name == name)
    }

    /// Drop every completed task, keeping the rest in order. Returns how many were removed.
    pub fn purge_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completion_status);
        before - self.tasks.len()
    }

    /// Tasks paired with their 1-based insertion position, ordered for display.
    ///
    /// The stored order is never touched; `None` keeps insertion order.
    pub fn display_order(&self, sort: Option<SortKey>) -> Vec<(usize, &Task)> {
        let mut rows: Vec<(usize, &Task)> = self.tasks.iter().enumerate().map(|(i, t)| (i + 1, t)).collect();
        match sort {
            Some(SortKey::Name) => rows.sort_by(|a, b| a.1.name.cmp(&b.1.name)),
            Some(SortKey::Severity) => rows.sort_by(|a, b| b.1.severity.cmp(&a.1.severity)),
            Some(SortKey::CompletionStatus) => {
                rows.sort_by_key(|(_, t)| t.completion_status)
            }
            None => {}
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaskList {
        TaskList {
            name: "chores".into(),
            tasks: vec![
                Task { name: "b".into(), severity: 2, completion_status: true },
                Task { name: "a".into(), severity: 5, completion_status: false },
                Task { name: "c".into(), severity: 1, completion_status: false },
            ],
        }
    }

    #[test]
    fn test_json_field_names() {
        let list = TaskList {
            name: "groceries".into(),
            tasks: vec![Task::new("milk", 3)],
        };
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "groceries",
                "tasks": [{"name": "milk", "severity": 3, "completionStatus": false}]
            })
        );
    }

    #[test]
    fn test_missing_tasks_key_decodes_as_empty() {
        let list: TaskList = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert!(list.tasks.is_empty());
    }

    #[test]
    fn test_purge_completed_keeps_order() {
        let mut list = sample();
        list.tasks.push(Task { name: "d".into(), severity: 3, completion_status: true });
        list.tasks.push(Task::new("e", 4));
        assert_eq!(list.purge_completed(), 2);
        let names: Vec<_> = list.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "e"]);
    }

    #[test]
    fn test_display_order() {
        let list = sample();
        let by_insertion: Vec<_> = list.display_order(None).iter().map(|(i, _)| *i).collect();
        assert_eq!(by_insertion, vec![1, 2, 3]);

        let by_name: Vec<_> = list.display_order(Some(SortKey::Name)).iter().map(|(_, t)| t.name.clone()).collect();
        assert_eq!(by_name, vec!["a", "b", "c"]);

        let by_severity: Vec<_> = list.display_order(Some(SortKey::Severity)).iter().map(|(_, t)| t.severity).collect();
        assert_eq!(by_severity, vec![5, 2, 1]);

        let by_status: Vec<_> = list
            .display_order(Some(SortKey::CompletionStatus))
            .iter()
            .map(|(i, _)| *i)
            .collect();
        assert_eq!(by_status, vec![2, 3, 1]);

        // stored order untouched
        assert_eq!(list.tasks[0].name, "b");
    }

    #[test]
    fn test_position_first_match_wins() {
        let mut list = sample();
        list.tasks.push(Task::new("a", 1));
        assert_eq!(list.position("a"), Some(1));
        assert_eq!(list.position("zzz"), None);
    }
}
