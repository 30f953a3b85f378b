//! Order lifecycle controller

use crate::core::{
    AuthContext, EntityId, FieldValue, MarketError, MarketResult, Party, TransitionError,
    ValidationError,
};
use crate::entities::{OrderDraft, OrderRequest, OrderStatus};
use crate::orders::availability::AvailabilityChecker;
use crate::storage::{EntityStore, MarketStores};
use chrono::Utc;

/// Creates order requests and drives them through the status state
/// machine, with role-scoped listing by participant identity.
#[derive(Clone)]
pub struct OrderService {
    stores: MarketStores,
    availability: AvailabilityChecker,
}

impl OrderService {
    pub fn new(stores: MarketStores) -> Self {
        let availability = AvailabilityChecker::new(stores.rentals.clone());
        Self {
            stores,
            availability,
        }
    }

    /// The availability checker backing this service, for calendar queries.
    pub fn availability(&self) -> &AvailabilityChecker {
        &self.availability
    }

    /// Get a request by id, failing on unknown ids.
    pub async fn get(&self, id: &EntityId) -> MarketResult<OrderRequest> {
        self.stores
            .rentals
            .get(id)
            .await?
            .ok_or(MarketError::NotFound {
                collection: "rentals",
                id: id.clone(),
            })
    }

    /// Create a new request with status `pending`.
    ///
    /// The acting party becomes the requester. The listing must exist, be
    /// active, and have no conflicting active reservation for the
    /// requested window.
    pub async fn create_request(
        &self,
        draft: OrderDraft,
        ctx: &AuthContext,
    ) -> MarketResult<OrderRequest> {
        let requester = ctx.require("create order request")?.clone();
        draft.validate()?;

        let listing = self
            .stores
            .listings
            .get(&draft.listing_id)
            .await?
            .ok_or(MarketError::NotFound {
                collection: "listings",
                id: draft.listing_id.clone(),
            })?;

        if !listing.is_active {
            return Err(ValidationError::ListingInactive {
                id: listing.id.clone(),
            }
            .into());
        }

        if self
            .availability
            .has_conflict(&draft.listing_id, draft.start_date, draft.end_date, None)
            .await?
        {
            return Err(crate::core::ConflictError::DatesUnavailable {
                listing_id: draft.listing_id.clone(),
                start: draft.start_date,
                end: draft.end_date.unwrap_or(draft.start_date),
            }
            .into());
        }

        let request = OrderRequest {
            id: EntityId::generate(),
            listing_id: draft.listing_id,
            listing_name: listing.name.clone(),
            kind: Some(listing.kind),
            requester,
            fulfiller: draft.fulfiller,
            start_date: draft.start_date,
            end_date: draft.end_date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            message: draft.message,
            quantity: draft.quantity.unwrap_or(1),
            total_cost: draft.total_cost,
            status: OrderStatus::Pending,
            shop_id: Some(listing.shop_id.clone()),
            created_at: Utc::now(),
            version: 1,
        };

        let stored = self.stores.rentals.upsert(request).await?;

        tracing::info!(
            order_id = %stored.id,
            listing_id = %stored.listing_id,
            requester = %stored.requester.email,
            "order request created"
        );

        Ok(stored)
    }

    /// Move a request to `to`, enforcing the transition table.
    ///
    /// The acting party must be a participant and hold the role the rule
    /// requires; any other `(from, to)` pair fails without touching the
    /// record.
    pub async fn transition(
        &self,
        id: &EntityId,
        to: OrderStatus,
        ctx: &AuthContext,
    ) -> MarketResult<OrderRequest> {
        let actor = ctx.require("transition order request")?;
        let mut request = self.get(id).await?;

        let role = request
            .role_of(actor)
            .ok_or(TransitionError::NotParticipant { id: id.clone() })?;

        let from = request.status;
        let rule = OrderStatus::permitted_actor(from, to).ok_or(TransitionError::Illegal {
            from: from.as_str(),
            to: to.as_str(),
        })?;

        if !rule.permits(role) {
            return Err(TransitionError::WrongActor {
                from: from.as_str(),
                to: to.as_str(),
                required: rule.as_str(),
            }
            .into());
        }

        request.status = to;
        let stored = self.stores.rentals.upsert(request).await?;

        tracing::info!(
            order_id = %stored.id,
            from = %from,
            to = %to,
            actor = %actor.email,
            "order request transitioned"
        );

        Ok(stored)
    }

    /// Replace a request's non-status fields (participant-only edit).
    ///
    /// Status changes must go through [`OrderService::transition`]; a
    /// mismatched status here fails as an illegal transition. Date changes
    /// are re-validated against availability with the request itself
    /// excluded.
    pub async fn update_request(
        &self,
        updated: OrderRequest,
        ctx: &AuthContext,
    ) -> MarketResult<OrderRequest> {
        let actor = ctx.require("update order request")?;
        let current = self.get(&updated.id).await?;

        if current.role_of(actor).is_none() {
            return Err(TransitionError::NotParticipant {
                id: updated.id.clone(),
            }
            .into());
        }

        if updated.status != current.status {
            return Err(TransitionError::Illegal {
                from: current.status.as_str(),
                to: updated.status.as_str(),
            }
            .into());
        }

        if let Some(end) = updated.end_date {
            if end < updated.start_date {
                return Err(ValidationError::InvalidDateRange {
                    start: updated.start_date,
                    end,
                }
                .into());
            }
        }
        if updated.total_cost < 0.0 || updated.total_cost.is_nan() {
            return Err(ValidationError::NegativeAmount {
                field: "total_cost",
                value: updated.total_cost,
            }
            .into());
        }

        let dates_changed = updated.effective_range() != current.effective_range();
        if dates_changed
            && updated.status.blocks_availability()
            && self
                .availability
                .has_conflict(
                    &updated.listing_id,
                    updated.start_date,
                    updated.end_date,
                    Some(&updated.id),
                )
                .await?
        {
            let (start, end) = updated.effective_range();
            return Err(crate::core::ConflictError::DatesUnavailable {
                listing_id: updated.listing_id.clone(),
                start,
                end,
            }
            .into());
        }

        let stored = self.stores.rentals.upsert(updated).await?;

        tracing::debug!(order_id = %stored.id, "order request updated");

        Ok(stored)
    }

    /// Requests placed by `party` (as requester), in store order.
    pub async fn as_requester(&self, party: &Party) -> MarketResult<Vec<OrderRequest>> {
        Ok(self
            .stores
            .rentals
            .find_by("requester_email", &FieldValue::from(party.email.as_str()))
            .await?)
    }

    /// Requests received by `party` (as fulfiller), in store order.
    pub async fn as_fulfiller(&self, party: &Party) -> MarketResult<Vec<OrderRequest>> {
        Ok(self
            .stores
            .rentals
            .find_by("fulfiller_email", &FieldValue::from(party.email.as_str()))
            .await?)
    }
}
