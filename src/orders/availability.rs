//! Availability checking over existing reservations

use crate::core::{EntityId, FieldValue, MarketResult};
use crate::entities::{OrderRequest, OrderStatus};
use crate::storage::EntityStore;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// A reserved span blocking a listing's calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: OrderStatus,
}

/// Decides whether a candidate reservation window conflicts with existing
/// requests for the same listing.
///
/// Only requests in a blocking state (pending or approved) count; declined,
/// cancelled and completed requests never block. Ranges are closed
/// intervals of calendar days, so windows that touch on a boundary day
/// conflict.
#[derive(Clone)]
pub struct AvailabilityChecker {
    rentals: Arc<dyn EntityStore<OrderRequest>>,
}

impl AvailabilityChecker {
    pub fn new(rentals: Arc<dyn EntityStore<OrderRequest>>) -> Self {
        Self { rentals }
    }

    /// Whether `[start, end or start]` overlaps any active reservation of
    /// the listing.
    ///
    /// `exclude` skips one request id, used when re-validating a request's
    /// own dates during an edit. Returns on the first conflict found and
    /// does not report which request conflicted.
    pub async fn has_conflict(
        &self,
        listing_id: &EntityId,
        start: NaiveDate,
        end: Option<NaiveDate>,
        exclude: Option<&EntityId>,
    ) -> MarketResult<bool> {
        let candidate_start = start;
        let candidate_end = end.unwrap_or(start);

        let existing = self
            .rentals
            .find_by("listing_id", &FieldValue::from(listing_id))
            .await?;

        let conflict = existing
            .iter()
            .filter(|r| r.status.blocks_availability())
            .filter(|r| exclude.is_none_or(|id| &r.id != id))
            .any(|r| {
                let (existing_start, existing_end) = r.effective_range();
                !(candidate_end < existing_start || candidate_start > existing_end)
            });

        Ok(conflict)
    }

    /// The approved reservations of a listing, for calendar blocking.
    pub async fn unavailable_ranges(
        &self,
        listing_id: &EntityId,
    ) -> MarketResult<Vec<BlockedRange>> {
        let existing = self
            .rentals
            .find_by("listing_id", &FieldValue::from(listing_id))
            .await?;

        Ok(existing
            .into_iter()
            .filter(|r| r.status == OrderStatus::Approved)
            .map(|r| {
                let (start, end) = r.effective_range();
                BlockedRange {
                    start,
                    end,
                    status: r.status,
                }
            })
            .collect())
    }
}
