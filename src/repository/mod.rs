//! Repository Layer
//!
//! Data access abstractions and the SQLite implementations behind them.

mod budget_repo;
mod db;
mod task;
mod traits;
mod vision_repo;

#[cfg(test)]
mod tests;

pub use budget_repo::BudgetRepository;
pub use db::{init_db, SharedConnection};
pub use task::{TaskBatchOperations, TaskOrderingOperations, TaskRepository};
pub use traits::{OrderedRepository, Repository};
pub use vision_repo::{CategoryRepository, VisionRepository};
