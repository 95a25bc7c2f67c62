//! Task Service
//!
//! Entry points an API layer would expose for tasks.

use chrono::NaiveDate;

use crate::domain::{DomainError, DomainResult, Task, TaskKind};
use crate::mirror::TaskUpdate;
use crate::repository::{Repository, TaskRepository};

/// Create a new task; the store assigns the id and defaults the key
pub async fn create_task(repo: &TaskRepository, title: String, kind: TaskKind) -> DomainResult<Task> {
    if title.is_empty() {
        return Err(DomainError::InvalidInput("Task title required".to_string()));
    }
    repo.create(&Task::new(0, title, kind)).await
}

/// Create a section-header row for the personal list
pub async fn create_header(repo: &TaskRepository, title: String) -> DomainResult<Task> {
    if title.is_empty() {
        return Err(DomainError::InvalidInput("Header title required".to_string()));
    }
    repo.create(&Task::new_header(0, title)).await
}

/// Apply a tagged update: full replacement or explicit partial patch
pub async fn update_task(repo: &TaskRepository, update: TaskUpdate) -> DomainResult<Task> {
    match update {
        TaskUpdate::Full { task } => repo.update(&task).await,
        TaskUpdate::Partial { id, patch } => {
            let mut task = repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::NotFound(format!("Task {} not found", id)))?;
            patch.apply(&mut task);
            repo.update(&task).await
        }
    }
}

/// Set a preset due date, or clear it with `None`
pub async fn set_task_due_date(
    repo: &TaskRepository,
    id: u32,
    due_date: Option<NaiveDate>,
) -> DomainResult<()> {
    repo.set_due_date(id, due_date).await
}

pub async fn delete_task(repo: &TaskRepository, id: u32) -> DomainResult<()> {
    repo.delete(id).await
}
