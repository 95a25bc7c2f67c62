//! Service Layer
//!
//! Thin async bridge between typed requests and the repositories.
//! This is the seam an HTTP layer would call. `apply_write` persists
//! the writes the mirror's reducer emits.

mod budget_service;
mod task_service;
mod vision_service;

pub use budget_service::{create_budget_item, delete_budget_item, reset_month, toggle_paid};
pub use task_service::{create_header, create_task, delete_task, set_task_due_date, update_task};
pub use vision_service::{
    create_category, create_vision_item, delete_category, delete_vision_item, rename_vision_item,
};

use crate::domain::DomainResult;
use crate::mirror::{BoardState, StoreWrite};
use crate::repository::{
    BudgetRepository, CategoryRepository, OrderedRepository, Repository, SharedConnection,
    TaskOrderingOperations, TaskRepository, VisionRepository,
};

/// All repositories over one shared connection
pub struct BoardRepos {
    pub tasks: TaskRepository,
    pub budget: BudgetRepository,
    pub vision: VisionRepository,
    pub categories: CategoryRepository,
}

impl BoardRepos {
    pub fn new(conn: SharedConnection) -> Self {
        Self {
            tasks: TaskRepository::new(conn.clone()),
            budget: BudgetRepository::new(conn.clone()),
            vision: VisionRepository::new(conn.clone()),
            categories: CategoryRepository::new(conn),
        }
    }
}

/// Persist one write emitted by the mirror's reducer.
///
/// Failures surface as errors for the caller to report; nothing here
/// retries, and the mirror is never rolled back.
pub async fn apply_write(repos: &BoardRepos, write: StoreWrite) -> DomainResult<()> {
    match write {
        StoreWrite::SetTaskOrder { id, new_order } => {
            repos.tasks.set_position_order(id, new_order).await
        }
        StoreWrite::SwapTasks { id, swap_with_id } => {
            repos.tasks.swap_position_orders(id, swap_with_id).await
        }
        StoreWrite::MoveTaskToColumn {
            id,
            new_status,
            new_order,
        } => repos.tasks.move_to_status(id, new_status, new_order).await,
        StoreWrite::SwapBudgetItems { id, swap_with_id } => {
            repos.budget.swap_position_orders(id, swap_with_id).await
        }
        StoreWrite::SwapVisionItems { id, swap_with_id } => {
            repos.vision.swap_position_orders(id, swap_with_id).await
        }
        StoreWrite::UpdateTask { update } => {
            task_service::update_task(&repos.tasks, update).await.map(|_| ())
        }
    }
}

/// Fetch every scope from the store into a freshly sorted mirror.
/// This is the full-reload reconciliation path.
pub async fn load_state(repos: &BoardRepos) -> DomainResult<BoardState> {
    let mut state = BoardState::new();
    state.load_tasks(repos.tasks.list().await?);
    state.load_budget_items(repos.budget.list().await?);
    state.load_vision_items(repos.vision.list().await?);
    state.load_categories(repos.categories.list().await?);
    Ok(state)
}
