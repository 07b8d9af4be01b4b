//! Task resource and payload shapes.
//!
//! A task belongs to exactly one tenant; membership is enforced
//! server-side and not re-validated here. The insert and partial-update
//! payloads are distinct types because their wire contracts differ.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task as returned by the read schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial-update payload. `None` fields are omitted from the request
/// body and left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_omits_unset_fields() {
        let patch = TaskPatch::default().completed(true);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn task_tolerates_missing_optional_fields() {
        let json = r#"{"id":"t-1","title":"Ship it","createdAt":"2026-05-01T12:00:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(!task.completed);
        assert!(task.description.is_none());
        assert!(task.updated_at.is_none());
    }
}
