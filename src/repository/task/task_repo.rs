//! Task Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Task CRUD. Specialized operations
//! live in sibling modules:
//! - task_ordering: position keys, swaps, column moves
//! - task_batch: bulk update/delete for the selection toolbar

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Task, TaskKind, TaskStatus};

use super::super::db::SharedConnection;
use super::super::traits::Repository;

pub(super) const TASK_COLUMNS: &str =
    "id, title, kind, status, description, due_date, is_header, position_order";

/// SQLite implementation of the Task repository
pub struct TaskRepository {
    pub(super) conn: SharedConnection,
}

impl TaskRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// List tasks in one kanban column
    pub async fn list_by_status(&self, status: TaskStatus) -> DomainResult<Vec<Task>> {
        let conn = self.conn.lock().await;
        let query = format!("SELECT {} FROM tasks WHERE status = ?", TASK_COLUMNS);
        let mut stmt = conn
            .prepare(&query)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let tasks = stmt
            .query_map(params![status.as_str()], row_to_task)
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(tasks)
    }

    /// Set or clear a task's due date without touching other fields
    pub async fn set_due_date(&self, id: u32, due_date: Option<NaiveDate>) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE tasks SET due_date = ? WHERE id = ?",
                params![due_date.map(|d| d.to_string()), id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Task {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository<Task> for TaskRepository {
    async fn create(&self, entity: &Task) -> DomainResult<Task> {
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO tasks (title, kind, status, description, due_date, is_header, position_order)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.title,
                entity.kind.as_str(),
                entity.status.as_str(),
                entity.description,
                entity.due_date.map(|d| d.to_string()),
                entity.is_header as i32,
                entity.position_order,
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let id = conn.last_insert_rowid() as u32;

        // Default the key to the fresh id so new records sort in
        // creation order without a reorder ever having happened
        let position_order = match entity.position_order {
            Some(key) => Some(key),
            None => {
                conn.execute(
                    "UPDATE tasks SET position_order = id WHERE id = ?",
                    params![id],
                )
                .map_err(|e| DomainError::Internal(e.to_string()))?;
                Some(f64::from(id))
            }
        };

        Ok(Task {
            id,
            position_order,
            ..entity.clone()
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Task>> {
        let conn = self.conn.lock().await;
        let query = format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS);
        conn.query_row(&query, params![id], row_to_task)
            .optional()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn list(&self) -> DomainResult<Vec<Task>> {
        let conn = self.conn.lock().await;
        let query = format!("SELECT {} FROM tasks", TASK_COLUMNS);
        let mut stmt = conn
            .prepare(&query)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let tasks = stmt
            .query_map([], row_to_task)
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(tasks)
    }

    async fn update(&self, entity: &Task) -> DomainResult<Task> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE tasks SET title = ?, kind = ?, status = ?, description = ?, due_date = ?, is_header = ?, position_order = ? WHERE id = ?",
                params![
                    entity.title,
                    entity.kind.as_str(),
                    entity.status.as_str(),
                    entity.description,
                    entity.due_date.map(|d| d.to_string()),
                    entity.is_header as i32,
                    entity.position_order,
                    entity.id,
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Task {} not found", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM tasks WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}

/// Convert a database row to Task
pub(super) fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        kind: TaskKind::from_str(&row.get::<_, String>(2)?),
        status: TaskStatus::from_str(&row.get::<_, String>(3)?),
        description: row.get(4)?,
        due_date: row
            .get::<_, Option<String>>(5)?
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        is_header: row.get::<_, i32>(6)? != 0,
        position_order: row.get(7)?,
    })
}
