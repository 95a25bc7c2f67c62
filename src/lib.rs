//! orderboard
//!
//! Fractional-ordering core of a board-style personal list app:
//! tasks, bills and vision cards each carry a float `position_order`
//! key, and moving a record only ever rewrites its own key.
//!
//! Layered architecture:
//! - domain: record types and core traits
//! - ordering: stateless key computations (the reorder engine)
//! - repository: SQLite-backed record stores
//! - mirror: optimistic client-side cache with a typed action reducer
//! - service: async bridge from typed requests to the repositories

pub mod domain;
pub mod mirror;
pub mod ordering;
pub mod repository;
pub mod service;

pub use domain::{DomainError, DomainResult};
