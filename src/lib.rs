//! # HomeBase Core
//!
//! The domain core of a marketplace for home-run shops: entity storage,
//! availability checking, and the order/rental lifecycle.
//!
//! ## Features
//!
//! - **Entity Store Abstraction**: `get`/`list`/`find_by`/`upsert`/`remove`
//!   over any backend; an insertion-ordered in-memory store is included
//! - **Optimistic Versioning**: every record carries a monotonic version;
//!   stale upserts fail instead of silently losing writes
//! - **Order State Machine**: a closed status enum with a fixed transition
//!   table enforcing who may move an order where
//! - **Availability Checking**: closed-interval date conflict detection
//!   over pending/approved reservations
//! - **Owner-Scoped Catalog**: shop and listing CRUD with delist/relist and
//!   proximity search
//! - **Typed Errors**: every failure path is a specific error variant, not
//!   a message string
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use homebase::prelude::*;
//!
//! let stores = MarketStores::in_memory();
//! let orders = OrderService::new(stores.clone());
//!
//! let rae = AuthContext::member(Party::new("Rae", "rae@example.com")?);
//! let request = orders
//!     .create_request(
//!         OrderDraft {
//!             listing_id,
//!             fulfiller: owner.clone(),
//!             start_date: "2024-04-01".parse()?,
//!             end_date: Some("2024-04-03".parse()?),
//!             start_time: "09:00:00".parse()?,
//!             end_time: None,
//!             message: "Weekend project".into(),
//!             quantity: None,
//!             total_cost: 30.0,
//!         },
//!         &rae,
//!     )
//!     .await?;
//!
//! assert_eq!(request.status, OrderStatus::Pending);
//! ```

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod core;
pub mod entities;
pub mod orders;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AccessError, AuthContext, ConflictError, Entity, EntityId, FieldFormat, FieldValue,
        MarketError, MarketResult, Party, StoreError, TransitionError, ValidationError,
    };

    // === Entities ===
    pub use crate::entities::{
        Coordinates, Listing, ListingDraft, ListingKind, OrderDraft, OrderRequest, OrderStatus,
        PartyRole, PricePeriod, Shop, ShopDraft, TransitionActor,
    };

    // === Storage ===
    pub use crate::storage::{EntityStore, InMemoryStore, MarketStores};

    // === Services ===
    pub use crate::analytics::{AnalyticsService, CannedSuggestions, ShopMetrics, SuggestionProvider};
    pub use crate::catalog::{ListingService, ShopService};
    pub use crate::config::SeedCatalog;
    pub use crate::orders::{
        AvailabilityChecker, AvailabilitySlot, BlockedRange, OrderBoard, OrderService, SlotPlanner,
    };

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
