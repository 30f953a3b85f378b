//! Order/rental request entity and its status state machine

use crate::core::{Entity, EntityId, FieldValue, MarketResult, Party, ValidationError};
use crate::entities::listing::ListingKind;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an order request.
///
/// `pending` is the initial state. `declined`, `completed` and `cancelled`
/// are terminal; `approved` can still progress to `completed` or
/// `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Declined,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Declined => "declined",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is possible from this state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Declined | OrderStatus::Completed | OrderStatus::Cancelled
        )
    }

    /// Whether a request in this state blocks the listing's availability.
    pub fn blocks_availability(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Approved)
    }

    /// The actor a transition rule requires, or `None` when no rule
    /// permits the `(from, to)` pair at all.
    pub fn permitted_actor(from: OrderStatus, to: OrderStatus) -> Option<TransitionActor> {
        use OrderStatus::*;
        match (from, to) {
            (Pending, Approved) => Some(TransitionActor::Fulfiller),
            (Pending, Declined) => Some(TransitionActor::Fulfiller),
            (Pending, Cancelled) => Some(TransitionActor::Requester),
            (Approved, Completed) => Some(TransitionActor::Requester),
            (Approved, Cancelled) => Some(TransitionActor::Either),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The side of an order a party stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    Requester,
    Fulfiller,
}

/// Which role(s) a transition rule admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionActor {
    Requester,
    Fulfiller,
    Either,
}

impl TransitionActor {
    pub fn permits(&self, role: PartyRole) -> bool {
        match self {
            TransitionActor::Requester => role == PartyRole::Requester,
            TransitionActor::Fulfiller => role == PartyRole::Fulfiller,
            TransitionActor::Either => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionActor::Requester => "requester",
            TransitionActor::Fulfiller => "fulfiller",
            TransitionActor::Either => "requester or fulfiller",
        }
    }
}

/// A single reservation of a listing by a requester from a fulfiller.
///
/// Requests are never physically deleted in normal operation; cancellation
/// is a status. Dates are plain calendar dates with no timezone
/// normalization, and a request without an `end_date` reserves the single
/// day of `start_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub id: EntityId,
    pub listing_id: EntityId,
    pub listing_name: String,
    #[serde(default)]
    pub kind: Option<ListingKind>,
    pub requester: Party,
    pub fulfiller: Party,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub total_cost: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub shop_id: Option<EntityId>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "initial_version")]
    pub version: u64,
}

fn default_quantity() -> u32 {
    1
}

fn initial_version() -> u64 {
    1
}

/// Caller-supplied fields for creating an order request.
///
/// The requester comes from the acting identity; listing name, kind and
/// shop reference are filled in from the listing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub listing_id: EntityId,
    pub fulfiller: Party,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub quantity: Option<u32>,
    pub total_cost: f64,
}

impl OrderDraft {
    pub fn validate(&self) -> MarketResult<()> {
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::InvalidDateRange {
                    start: self.start_date,
                    end,
                }
                .into());
            }
        }
        if self.total_cost < 0.0 || self.total_cost.is_nan() {
            return Err(ValidationError::NegativeAmount {
                field: "total_cost",
                value: self.total_cost,
            }
            .into());
        }
        if self.fulfiller.email.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "fulfiller.email",
            }
            .into());
        }
        Ok(())
    }
}

impl OrderRequest {
    /// The effective reserved range: `[start_date, end_date or start_date]`.
    pub fn effective_range(&self) -> (NaiveDate, NaiveDate) {
        (self.start_date, self.end_date.unwrap_or(self.start_date))
    }

    /// The role `party` plays on this order, if any.
    pub fn role_of(&self, party: &Party) -> Option<PartyRole> {
        if self.requester.same_identity(party) {
            Some(PartyRole::Requester)
        } else if self.fulfiller.same_identity(party) {
            Some(PartyRole::Fulfiller)
        } else {
            None
        }
    }
}

impl Entity for OrderRequest {
    fn collection() -> &'static str {
        "rentals"
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    fn indexed_fields() -> &'static [&'static str] {
        &[
            "listing_id",
            "requester_email",
            "fulfiller_email",
            "status",
            "shop_id",
        ]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "listing_id" => Some(FieldValue::Id(self.listing_id.clone())),
            "requester_email" => Some(FieldValue::String(self.requester.email.clone())),
            "fulfiller_email" => Some(FieldValue::String(self.fulfiller.email.clone())),
            "status" => Some(FieldValue::String(self.status.as_str().to_string())),
            "shop_id" => Some(
                self.shop_id
                    .as_ref()
                    .map(|id| FieldValue::Id(id.clone()))
                    .unwrap_or(FieldValue::Null),
            ),
            _ => None,
        }
    }
}
