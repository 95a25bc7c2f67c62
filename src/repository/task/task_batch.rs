//! Task Batch Operations
//!
//! Bulk update/delete used by the selection toolbar (move, re-date and
//! delete many tasks in one gesture). Each batch runs in a single
//! transaction.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, TaskPatch};

use super::task_repo::{row_to_task, TaskRepository, TASK_COLUMNS};

/// Bulk operations over a set of task ids
#[async_trait]
pub trait TaskBatchOperations {
    /// Apply the same patch to every listed task. Missing ids are
    /// skipped rather than failing the batch.
    async fn batch_update(&self, ids: &[u32], patch: &TaskPatch) -> DomainResult<usize>;

    /// Delete every listed task
    async fn batch_delete(&self, ids: &[u32]) -> DomainResult<usize>;
}

#[async_trait]
impl TaskBatchOperations for TaskRepository {
    async fn batch_update(&self, ids: &[u32], patch: &TaskPatch) -> DomainResult<usize> {
        let mut guard = self.conn.lock().await;
        let tx = guard
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut updated = 0;
        {
            let query = format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS);
            let mut select = tx
                .prepare(&query)
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            let mut update = tx
                .prepare(
                    "UPDATE tasks SET title = ?, kind = ?, status = ?, description = ?, due_date = ?, position_order = ? WHERE id = ?",
                )
                .map_err(|e| DomainError::Internal(e.to_string()))?;

            for &id in ids {
                let mut rows = select
                    .query_map(params![id], row_to_task)
                    .map_err(|e| DomainError::Internal(e.to_string()))?;
                let Some(task) = rows.next().transpose().map_err(|e| DomainError::Internal(e.to_string()))? else {
                    continue;
                };
                let mut task = task;
                patch.apply(&mut task);
                update
                    .execute(params![
                        task.title,
                        task.kind.as_str(),
                        task.status.as_str(),
                        task.description,
                        task.due_date.map(|d| d.to_string()),
                        task.position_order,
                        id,
                    ])
                    .map_err(|e| DomainError::Internal(e.to_string()))?;
                updated += 1;
            }
        }

        tx.commit()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        tracing::debug!(count = updated, "batch task update");
        Ok(updated)
    }

    async fn batch_delete(&self, ids: &[u32]) -> DomainResult<usize> {
        let mut guard = self.conn.lock().await;
        let tx = guard
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut deleted = 0;
        for &id in ids {
            deleted += tx
                .execute("DELETE FROM tasks WHERE id = ?", params![id])
                .map_err(|e| DomainError::Internal(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        tracing::debug!(count = deleted, "batch task delete");
        Ok(deleted)
    }
}
