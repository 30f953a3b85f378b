//! Entity trait defining the storage abstraction for all record types

use crate::core::field::FieldValue;
use crate::core::id::EntityId;

/// Base trait for every record the stores can hold.
///
/// All entities have:
/// - id: the persisted `id_<base36>` key
/// - version: a monotonic counter guarding upserts against stale writes
/// - a set of indexed fields addressable through [`Entity::field_value`]
pub trait Entity: Clone + Send + Sync + 'static {
    /// The collection name this entity type is stored under (e.g. "rentals")
    fn collection() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> &EntityId;

    /// Get the record's current version
    fn version(&self) -> u64;

    /// Set the record's version.
    ///
    /// Only stores call this; an upsert of an existing id bumps the stored
    /// version by one and hands the bumped record back to the caller.
    fn set_version(&mut self, version: u64);

    /// Fields that can be used with `EntityStore::find_by`
    fn indexed_fields() -> &'static [&'static str];

    /// Get the value of an indexed field by name.
    ///
    /// Returns `None` for unknown fields; optional fields that are unset
    /// report [`FieldValue::Null`].
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}
