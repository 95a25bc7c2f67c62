//! Actions and Store Writes
//!
//! Discrete UI events arrive as typed `Action`s; the reducer answers
//! with `StoreWrite`s to persist. Both are plain data, serializable for
//! transport.

use serde::{Deserialize, Serialize};

use crate::domain::{BudgetItem, Category, Task, TaskPatch, TaskStatus, VisionItem};

use super::state::DragSource;

/// A task update is either a full-record replacement or an explicit
/// partial patch; the caller decides which, never the field shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TaskUpdate {
    Full { task: Task },
    Partial { id: u32, patch: TaskPatch },
}

/// A discrete UI event
#[derive(Debug, Clone)]
pub enum Action {
    // Full reloads from the store
    TasksLoaded(Vec<Task>),
    BudgetLoaded(Vec<BudgetItem>),
    VisionLoaded(Vec<VisionItem>),
    CategoriesLoaded(Vec<Category>),

    // Reorder gestures; neighbors are the record ids adjacent to the
    // drop position in display order
    MoveTask {
        id: u32,
        above: Option<u32>,
        below: Option<u32>,
    },
    SwapTasks {
        id: u32,
        with: u32,
    },
    /// Drop into a (possibly empty) kanban column
    MoveTaskToColumn {
        id: u32,
        status: TaskStatus,
    },
    SwapBudgetItems {
        id: u32,
        with: u32,
    },
    SwapVisionItems {
        id: u32,
        with: u32,
    },

    UpdateTask(TaskUpdate),

    // Pure UI state
    ToggleTaskSelected(u32),
    ClearSelection,
    BeginDrag(DragSource),
    EndDrag,
}

/// A write to persist against the store, emitted by the reducer after
/// the optimistic update has already been applied locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StoreWrite {
    SetTaskOrder { id: u32, new_order: f64 },
    SwapTasks { id: u32, swap_with_id: u32 },
    MoveTaskToColumn { id: u32, new_status: TaskStatus, new_order: f64 },
    SwapBudgetItems { id: u32, swap_with_id: u32 },
    SwapVisionItems { id: u32, swap_with_id: u32 },
    UpdateTask { update: TaskUpdate },
}
