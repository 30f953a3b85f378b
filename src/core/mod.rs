//! Core module containing fundamental traits and types for the crate

pub mod entity;
pub mod error;
pub mod field;
pub mod id;
pub mod identity;

pub use entity::Entity;
pub use error::{
    AccessError, ConflictError, MarketError, MarketResult, StoreError, TransitionError,
    ValidationError,
};
pub use field::{FieldFormat, FieldValue};
pub use id::EntityId;
pub use identity::{AuthContext, Party};
