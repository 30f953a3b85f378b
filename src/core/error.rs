//! Typed error handling for the HomeBase core
//!
//! Every failure path in the crate surfaces as a specific variant here so
//! callers can handle errors by kind rather than matching on message text.
//!
//! # Error Categories
//!
//! - [`MarketError::NotFound`]: unknown id on get/transition
//! - [`ValidationError`]: missing or malformed input fields
//! - [`ConflictError`]: availability overlap on request creation
//! - [`TransitionError`]: illegal status change or wrong actor
//! - [`AccessError`]: missing acting identity, non-owner mutation
//! - [`StoreError`]: storage backend failures (lock poisoning, stale writes)

use crate::core::id::EntityId;
use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// The main error type for the HomeBase core
#[derive(Debug)]
pub enum MarketError {
    /// Unknown entity id
    NotFound {
        collection: &'static str,
        id: EntityId,
    },

    /// Input validation failures
    Validation(ValidationError),

    /// Availability conflicts
    Conflict(ConflictError),

    /// Order lifecycle violations
    Transition(TransitionError),

    /// Identity and ownership failures
    Access(AccessError),

    /// Storage backend failures
    Storage(StoreError),
}

impl fmt::Display for MarketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketError::NotFound { collection, id } => {
                write!(f, "no {} record with id '{}'", collection, id)
            }
            MarketError::Validation(e) => write!(f, "{}", e),
            MarketError::Conflict(e) => write!(f, "{}", e),
            MarketError::Transition(e) => write!(f, "{}", e),
            MarketError::Access(e) => write!(f, "{}", e),
            MarketError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MarketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MarketError::NotFound { .. } => None,
            MarketError::Validation(e) => Some(e),
            MarketError::Conflict(e) => Some(e),
            MarketError::Transition(e) => Some(e),
            MarketError::Access(e) => Some(e),
            MarketError::Storage(e) => Some(e),
        }
    }
}

impl MarketError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            MarketError::NotFound { .. } => "NOT_FOUND",
            MarketError::Validation(e) => e.error_code(),
            MarketError::Conflict(e) => e.error_code(),
            MarketError::Transition(e) => e.error_code(),
            MarketError::Access(e) => e.error_code(),
            MarketError::Storage(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// A required field was absent or empty
    MissingField { field: &'static str },

    /// A monetary or quantity field was negative
    NegativeAmount { field: &'static str, value: f64 },

    /// End date precedes start date
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Slot end time does not follow its start time
    InvalidTimeWindow { start: NaiveTime, end: NaiveTime },

    /// Malformed entity id
    InvalidId { value: String },

    /// Malformed contact email
    InvalidEmail { value: String },

    /// The listing is delisted and accepts no new orders
    ListingInactive { id: EntityId },

    /// A slot with the same date and start time already exists
    DuplicateSlot { date: NaiveDate, start: NaiveTime },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField { field } => {
                write!(f, "required field '{}' is missing", field)
            }
            ValidationError::NegativeAmount { field, value } => {
                write!(f, "field '{}' must not be negative (got {})", field, value)
            }
            ValidationError::InvalidDateRange { start, end } => {
                write!(f, "end date {} is before start date {}", end, start)
            }
            ValidationError::InvalidTimeWindow { start, end } => {
                write!(f, "slot end time {} is not after start time {}", end, start)
            }
            ValidationError::InvalidId { value } => {
                write!(f, "invalid entity id format: '{}'", value)
            }
            ValidationError::InvalidEmail { value } => {
                write!(f, "invalid contact email: '{}'", value)
            }
            ValidationError::ListingInactive { id } => {
                write!(f, "listing '{}' is delisted and cannot be ordered", id)
            }
            ValidationError::DuplicateSlot { date, start } => {
                write!(f, "a slot on {} starting at {} already exists", date, start)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "MISSING_FIELD",
            ValidationError::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            ValidationError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            ValidationError::InvalidTimeWindow { .. } => "INVALID_TIME_WINDOW",
            ValidationError::InvalidId { .. } => "INVALID_ID",
            ValidationError::InvalidEmail { .. } => "INVALID_EMAIL",
            ValidationError::ListingInactive { .. } => "LISTING_INACTIVE",
            ValidationError::DuplicateSlot { .. } => "DUPLICATE_SLOT",
        }
    }
}

impl From<ValidationError> for MarketError {
    fn from(err: ValidationError) -> Self {
        MarketError::Validation(err)
    }
}

// =============================================================================
// Conflict Errors
// =============================================================================

/// Errors related to availability conflicts
#[derive(Debug)]
pub enum ConflictError {
    /// The requested window overlaps an existing active reservation
    DatesUnavailable {
        listing_id: EntityId,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl fmt::Display for ConflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictError::DatesUnavailable {
                listing_id,
                start,
                end,
            } => {
                write!(
                    f,
                    "listing '{}' is unavailable between {} and {}",
                    listing_id, start, end
                )
            }
        }
    }
}

impl std::error::Error for ConflictError {}

impl ConflictError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConflictError::DatesUnavailable { .. } => "DATES_UNAVAILABLE",
        }
    }
}

impl From<ConflictError> for MarketError {
    fn from(err: ConflictError) -> Self {
        MarketError::Conflict(err)
    }
}

// =============================================================================
// Transition Errors
// =============================================================================

/// Errors related to the order status state machine
#[derive(Debug)]
pub enum TransitionError {
    /// No rule permits this status change
    Illegal {
        from: &'static str,
        to: &'static str,
    },

    /// The rule exists but the acting party holds the wrong role
    WrongActor {
        from: &'static str,
        to: &'static str,
        required: &'static str,
    },

    /// The acting party is neither requester nor fulfiller of the order
    NotParticipant { id: EntityId },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::Illegal { from, to } => {
                write!(f, "cannot move an order from '{}' to '{}'", from, to)
            }
            TransitionError::WrongActor { from, to, required } => {
                write!(
                    f,
                    "only the {} may move an order from '{}' to '{}'",
                    required, from, to
                )
            }
            TransitionError::NotParticipant { id } => {
                write!(f, "acting party is not a participant of order '{}'", id)
            }
        }
    }
}

impl std::error::Error for TransitionError {}

impl TransitionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TransitionError::Illegal { .. } => "INVALID_TRANSITION",
            TransitionError::WrongActor { .. } => "WRONG_ACTOR",
            TransitionError::NotParticipant { .. } => "NOT_PARTICIPANT",
        }
    }
}

impl From<TransitionError> for MarketError {
    fn from(err: TransitionError) -> Self {
        MarketError::Transition(err)
    }
}

// =============================================================================
// Access Errors
// =============================================================================

/// Errors related to identity and ownership
#[derive(Debug)]
pub enum AccessError {
    /// The operation requires an acting identity and none was provided
    Unauthenticated { operation: &'static str },

    /// The acting party does not own the targeted record
    NotOwner {
        collection: &'static str,
        id: EntityId,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::Unauthenticated { operation } => {
                write!(f, "'{}' requires an authenticated acting party", operation)
            }
            AccessError::NotOwner { collection, id } => {
                write!(
                    f,
                    "acting party does not own {} record '{}'",
                    collection, id
                )
            }
        }
    }
}

impl std::error::Error for AccessError {}

impl AccessError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::Unauthenticated { .. } => "UNAUTHENTICATED",
            AccessError::NotOwner { .. } => "NOT_OWNER",
        }
    }
}

impl From<AccessError> for MarketError {
    fn from(err: AccessError) -> Self {
        MarketError::Access(err)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors raised by storage backends
#[derive(Debug)]
pub enum StoreError {
    /// A collection lock was poisoned by a panicking writer
    LockPoisoned { collection: &'static str },

    /// An upsert carried a version that no longer matches the stored record
    VersionConflict {
        collection: &'static str,
        id: EntityId,
        stored: u64,
        given: u64,
    },

    /// A collection could not be encoded or decoded
    Serialization {
        collection: &'static str,
        message: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned { collection } => {
                write!(f, "lock for collection '{}' is poisoned", collection)
            }
            StoreError::VersionConflict {
                collection,
                id,
                stored,
                given,
            } => {
                write!(
                    f,
                    "stale write to {} '{}': stored version {}, given {}",
                    collection, id, stored, given
                )
            }
            StoreError::Serialization {
                collection,
                message,
            } => {
                write!(f, "failed to encode/decode '{}': {}", collection, message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::LockPoisoned { .. } => "LOCK_POISONED",
            StoreError::VersionConflict { .. } => "VERSION_CONFLICT",
            StoreError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<StoreError> for MarketError {
    fn from(err: StoreError) -> Self {
        MarketError::Storage(err)
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for HomeBase core operations
pub type MarketResult<T> = Result<T, MarketError>;

// =============================================================================
// Tests
// =============================================================================
