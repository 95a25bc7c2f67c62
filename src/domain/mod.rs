//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no dependencies beyond serde and chrono.

mod budget;
mod entity;
mod task;
mod vision;

pub use budget::{BudgetItem, BudgetItemKind};
pub use entity::{DomainError, DomainResult, Entity, Orderable};
pub use task::{Task, TaskKind, TaskPatch, TaskStatus};
pub use vision::{Category, VisionItem};
