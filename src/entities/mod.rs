//! Domain entity models

pub mod listing;
pub mod order;
pub mod shop;

pub use listing::{Coordinates, Listing, ListingDraft, ListingKind, PricePeriod};
pub use order::{OrderDraft, OrderRequest, OrderStatus, PartyRole, TransitionActor};
pub use shop::{Shop, ShopDraft};
