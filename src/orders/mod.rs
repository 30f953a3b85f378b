//! Order lifecycle: creation, status transitions, availability, slots

pub mod availability;
pub mod board;
pub mod service;
pub mod slots;

pub use availability::{AvailabilityChecker, BlockedRange};
pub use board::OrderBoard;
pub use service::OrderService;
pub use slots::{AvailabilitySlot, SlotPlanner};
