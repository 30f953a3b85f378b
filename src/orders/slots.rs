//! Owner-declared availability slots for service listings
//!
//! Slots live only for the owner's session. They are deliberately kept out
//! of the entity stores: the planner drops with the session and nothing
//! here is ever upserted or versioned.

use crate::core::{EntityId, MarketResult, ValidationError};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A bookable time window on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl AvailabilitySlot {
    /// Create a slot, rejecting empty or inverted windows.
    pub fn new(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> MarketResult<Self> {
        if start_time >= end_time {
            return Err(ValidationError::InvalidTimeWindow {
                start: start_time,
                end: end_time,
            }
            .into());
        }
        Ok(Self {
            date,
            start_time,
            end_time,
        })
    }
}

/// Per-listing slot sets for one owner session.
#[derive(Debug, Default)]
pub struct SlotPlanner {
    slots: HashMap<EntityId, Vec<AvailabilitySlot>>,
}

impl SlotPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slot for a listing.
    ///
    /// Two slots on the same date with the same start time are considered
    /// duplicates.
    pub fn add_slot(&mut self, listing_id: &EntityId, slot: AvailabilitySlot) -> MarketResult<()> {
        let slots = self.slots.entry(listing_id.clone()).or_default();

        if slots
            .iter()
            .any(|s| s.date == slot.date && s.start_time == slot.start_time)
        {
            return Err(ValidationError::DuplicateSlot {
                date: slot.date,
                start: slot.start_time,
            }
            .into());
        }

        slots.push(slot);
        Ok(())
    }

    /// Remove the slot on `date` starting at `start_time`; returns whether
    /// anything was removed.
    pub fn remove_slot(
        &mut self,
        listing_id: &EntityId,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> bool {
        match self.slots.get_mut(listing_id) {
            Some(slots) => {
                let before = slots.len();
                slots.retain(|s| !(s.date == date && s.start_time == start_time));
                slots.len() != before
            }
            None => false,
        }
    }

    /// All slots declared for a listing, in declaration order.
    pub fn slots_for(&self, listing_id: &EntityId) -> &[AvailabilitySlot] {
        self.slots.get(listing_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The slots of a listing falling on `date`.
    pub fn slots_on(&self, listing_id: &EntityId, date: NaiveDate) -> Vec<AvailabilitySlot> {
        self.slots_for(listing_id)
            .iter()
            .filter(|s| s.date == date)
            .copied()
            .collect()
    }

    /// Drop every slot of a listing.
    pub fn clear(&mut self, listing_id: &EntityId) {
        self.slots.remove(listing_id);
    }
}
