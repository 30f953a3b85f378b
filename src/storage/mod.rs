//! Storage abstraction and backends
//!
//! The crate is agnostic to the underlying storage mechanism: services only
//! ever see [`EntityStore`] trait objects. The in-memory backend is the one
//! shipped here; swapping in an embedded table or a real database means
//! implementing the trait, not touching the lifecycle logic.

pub mod in_memory;

use crate::core::{Entity, EntityId, FieldValue, StoreError};
use crate::entities::{Listing, OrderRequest, Shop};
use async_trait::async_trait;
use std::sync::Arc;

pub use in_memory::InMemoryStore;

/// Keyed storage capability for one entity collection.
///
/// `upsert` inserts when the id is unseen and otherwise performs a
/// full-record replace guarded by optimistic versioning: the incoming
/// record's version must equal the stored one, and the stored copy comes
/// back with its version bumped. There is no partial-field merge; callers
/// pass the complete entity.
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    /// Get a record by id
    async fn get(&self, id: &EntityId) -> Result<Option<T>, StoreError>;

    /// List all records in insertion order
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Find records whose indexed `field` equals `value`
    async fn find_by(&self, field: &str, value: &FieldValue) -> Result<Vec<T>, StoreError>;

    /// Insert or replace a record, returning the stored copy
    async fn upsert(&self, entity: T) -> Result<T, StoreError>;

    /// Remove a record by id; removing an unknown id is a no-op
    async fn remove(&self, id: &EntityId) -> Result<(), StoreError>;
}

/// The per-collection stores the services operate over.
#[derive(Clone)]
pub struct MarketStores {
    pub shops: Arc<dyn EntityStore<Shop>>,
    pub listings: Arc<dyn EntityStore<Listing>>,
    pub rentals: Arc<dyn EntityStore<OrderRequest>>,
}

impl MarketStores {
    /// Fresh in-memory stores, one per collection.
    pub fn in_memory() -> Self {
        Self {
            shops: Arc::new(InMemoryStore::<Shop>::new()),
            listings: Arc::new(InMemoryStore::<Listing>::new()),
            rentals: Arc::new(InMemoryStore::<OrderRequest>::new()),
        }
    }
}
