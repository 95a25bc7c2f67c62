//! Domain Layer - Core Entity Traits
//!
//! Basic contracts shared by all record types: a stable identifier and,
//! for records that live in ordered lists, a fractional sort key.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Records that carry a fractional `position_order` sort key.
///
/// The key is a plain float: not required to be unique or contiguous,
/// only to sort records into the user's intended display order within
/// their scope. A record that has never been reordered carries no key.
pub trait Orderable: Entity<Id = u32> {
    /// Raw key as stored, `None` if never assigned
    fn position_order(&self) -> Option<f64>;

    /// Overwrite the sort key
    fn set_position_order(&mut self, key: f64);

    /// Key used for sorting. Missing (or legacy zero) keys fall back to
    /// the record's own id, which reproduces creation order since ids
    /// are monotonically increasing.
    fn effective_order(&self) -> f64 {
        match self.position_order() {
            Some(key) if key != 0.0 => key,
            _ => f64::from(self.id()),
        }
    }
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
