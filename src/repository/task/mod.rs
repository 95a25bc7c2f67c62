//! Task Repository
//!
//! CRUD in `task_repo`; ordering and bulk operations as extension
//! traits on the same struct.

mod task_batch;
mod task_ordering;
mod task_repo;

pub use task_batch::TaskBatchOperations;
pub use task_ordering::TaskOrderingOperations;
pub use task_repo::TaskRepository;
