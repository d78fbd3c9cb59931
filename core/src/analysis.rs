//! Structured results extracted from meeting notes.
//!
//! Field names follow the JSON the model is asked to produce (`keyPoints`,
//! `actionItems`, `dueDate`), so the same types serve the Gemini function-call
//! arguments, the HTTP API and the persisted record list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency of an action item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One follow-up obligation extracted from the notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub priority: Priority,
}

impl ActionItem {
    pub fn new(task: impl Into<String>, priority: Priority) -> Self {
        Self {
            task: task.into(),
            assignee: None,
            due_date: None,
            priority,
        }
    }
}

/// Full extraction produced by one analysis call.
///
/// A field the model leaves out reads as empty, so all four are always present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingAnalysis {
    pub title: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub action_items: Vec<ActionItem>,
}

/// Looser result of the summarize flow: a summary and plain task strings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskResult {
    pub summary: String,
    pub tasks: Vec<String>,
}
