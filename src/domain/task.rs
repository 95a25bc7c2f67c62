//! Task Entity
//!
//! A task lives either in the Personal list (flat, with optional
//! section-header rows) or on the Work kanban, where `status` doubles
//! as the column.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Orderable};

/// Which board a task belongs to; also its ordering scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskKind {
    #[default]
    Personal,
    Work,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Personal => "Personal",
            TaskKind::Work => "Work",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Work" => TaskKind::Work,
            _ => TaskKind::Personal,
        }
    }
}

/// Completion state; on the kanban side this is the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    Todo,
    #[serde(rename = "In-Progress")]
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "In-Progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "In-Progress" => TaskStatus::InProgress,
            "Done" => TaskStatus::Done,
            _ => TaskStatus::Todo,
        }
    }
}

/// A task or a section-header row in the personal list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the store
    pub id: u32,
    pub title: String,
    pub kind: TaskKind,
    pub status: TaskStatus,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    /// Section-header rows interleave with tasks in the personal list
    pub is_header: bool,
    /// Fractional sort key; `None` until first reorder (sorts as `id`)
    pub position_order: Option<f64>,
}

impl Task {
    /// Create a new task with default values
    pub fn new(id: u32, title: String, kind: TaskKind) -> Self {
        Self {
            id,
            title,
            kind,
            status: TaskStatus::Todo,
            description: None,
            due_date: None,
            is_header: false,
            position_order: None,
        }
    }

    /// Create a section-header row for the personal list
    pub fn new_header(id: u32, title: String) -> Self {
        Self {
            id,
            title,
            kind: TaskKind::Personal,
            status: TaskStatus::Todo,
            description: None,
            due_date: None,
            is_header: true,
            position_order: None,
        }
    }
}

impl Entity for Task {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for Task {
    fn position_order(&self) -> Option<f64> {
        self.position_order
    }

    fn set_position_order(&mut self, key: f64) {
        self.position_order = Some(key);
    }
}

/// Partial update for a task. Every field is opt-in; `due_date` is
/// doubly optional so a patch can clear a date (`Some(None)`) as well
/// as leave it alone (`None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TaskKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_order: Option<f64>,
}

impl TaskPatch {
    /// Apply the patch to a task, leaving unset fields untouched
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(kind) = self.kind {
            task.kind = kind;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(key) = self.position_order {
            task.position_order = Some(key);
        }
    }
}
