//! Task Ordering Operations
//!
//! Position-key persistence for tasks, including the two-row swap and
//! kanban column moves.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, Task, TaskKind, TaskStatus};

use super::super::traits::OrderedRepository;
use super::task_repo::{row_to_task, TaskRepository, TASK_COLUMNS};

/// Ordering operations specific to tasks
#[async_trait]
pub trait TaskOrderingOperations {
    /// Drop a task into a (possibly empty) kanban column: set the new
    /// status and an end-of-scope key in one statement.
    async fn move_to_status(&self, id: u32, new_status: TaskStatus, new_key: f64) -> DomainResult<()>;
}

#[async_trait]
impl OrderedRepository<Task> for TaskRepository {
    type Scope = TaskKind;

    async fn list_by_scope(&self, scope: &TaskKind) -> DomainResult<Vec<Task>> {
        let conn = self.conn.lock().await;
        let query = format!("SELECT {} FROM tasks WHERE kind = ?", TASK_COLUMNS);
        let mut stmt = conn
            .prepare(&query)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let tasks = stmt
            .query_map(params![scope.as_str()], row_to_task)
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(tasks)
    }

    async fn set_position_order(&self, id: u32, new_key: f64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE tasks SET position_order = ? WHERE id = ?",
                params![new_key, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Task {} not found", id)));
        }
        tracing::debug!(id, new_key, "task position_order updated");
        Ok(())
    }

    async fn swap_position_orders(&self, id_a: u32, id_b: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let tx = guard
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        // Effective keys: rows with a NULL or zero key sort by id
        let read = |id: u32| -> DomainResult<(f64, String)> {
            tx.query_row(
                "SELECT COALESCE(NULLIF(position_order, 0), id), status FROM tasks WHERE id = ?",
                params![id],
                |row| Ok((row.get::<_, f64>(0)?, row.get::<_, String>(1)?)),
            )
            .map_err(|_| DomainError::NotFound(format!("Task {} not found", id)))
        };
        let (key_a, status_a) = read(id_a)?;
        let (key_b, status_b) = read(id_b)?;

        // Keys exchange verbatim; when the drag crossed a kanban column
        // boundary the statuses exchange with them, so the dragged task
        // takes the target's column
        tx.execute(
            "UPDATE tasks SET position_order = ?, status = ? WHERE id = ?",
            params![key_b, status_b, id_a],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        tx.execute(
            "UPDATE tasks SET position_order = ?, status = ? WHERE id = ?",
            params![key_a, status_a, id_b],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        tx.commit()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        tracing::debug!(id_a, id_b, "task keys swapped");
        Ok(())
    }
}

#[async_trait]
impl TaskOrderingOperations for TaskRepository {
    async fn move_to_status(&self, id: u32, new_status: TaskStatus, new_key: f64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE tasks SET status = ?, position_order = ? WHERE id = ?",
                params![new_status.as_str(), new_key, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Task {} not found", id)));
        }
        tracing::debug!(id, status = new_status.as_str(), new_key, "task moved to column");
        Ok(())
    }
}
