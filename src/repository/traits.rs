//! Repository Layer - Core Traits
//!
//! Abstract interfaces for data access. The store performs no ordering
//! logic beyond persisting and returning the key; scope partitioning
//! and sorting are the caller's responsibility.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity, Orderable};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity; the store assigns the id
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities, in no particular order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Full-record update of an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Extension for repositories whose records carry a `position_order`
/// key: the Ordered Collection Store contract.
#[async_trait]
pub trait OrderedRepository<T: Orderable>: Repository<T> {
    /// The subset key within which relative ordering is meaningful
    /// (task kind, budget category, ...)
    type Scope: Send + Sync + ?Sized;

    /// List records in one ordering scope, unsorted; callers sort by
    /// effective key
    async fn list_by_scope(&self, scope: &Self::Scope) -> DomainResult<Vec<T>>;

    /// Persist a single record's new key
    async fn set_position_order(&self, id: u32, new_key: f64) -> DomainResult<()>;

    /// Atomically exchange two records' keys. Both writes land in one
    /// transaction so a concurrent read never observes a torn swap.
    async fn swap_position_orders(&self, id_a: u32, id_b: u32) -> DomainResult<()>;
}
