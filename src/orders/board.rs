//! Session-scoped view cache of one viewer's order requests

use crate::core::{MarketResult, Party};
use crate::entities::OrderRequest;
use crate::orders::service::OrderService;

/// One viewer's placed and received request lists.
///
/// The stores own the canonical records; a board is a session cache that
/// must absorb every successful mutation result to stay consistent. Newly
/// created requests prepend, updated requests replace in place.
#[derive(Debug, Clone)]
pub struct OrderBoard {
    viewer: Party,
    placed: Vec<OrderRequest>,
    received: Vec<OrderRequest>,
}

impl OrderBoard {
    /// An empty board for `viewer`.
    pub fn new(viewer: Party) -> Self {
        Self {
            viewer,
            placed: Vec::new(),
            received: Vec::new(),
        }
    }

    /// A board populated from the store.
    pub async fn load(viewer: Party, orders: &OrderService) -> MarketResult<Self> {
        let placed = orders.as_requester(&viewer).await?;
        let received = orders.as_fulfiller(&viewer).await?;
        Ok(Self {
            viewer,
            placed,
            received,
        })
    }

    pub fn viewer(&self) -> &Party {
        &self.viewer
    }

    /// Requests the viewer placed as requester.
    pub fn placed(&self) -> &[OrderRequest] {
        &self.placed
    }

    /// Requests the viewer received as fulfiller.
    pub fn received(&self) -> &[OrderRequest] {
        &self.received
    }

    /// Fold a successful mutation result into the cached lists.
    ///
    /// A record the viewer does not participate in is ignored.
    pub fn absorb(&mut self, record: &OrderRequest) {
        if record.requester.same_identity(&self.viewer) {
            Self::merge(&mut self.placed, record);
        }
        if record.fulfiller.same_identity(&self.viewer) {
            Self::merge(&mut self.received, record);
        }
    }

    fn merge(list: &mut Vec<OrderRequest>, record: &OrderRequest) {
        match list.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => *slot = record.clone(),
            None => list.insert(0, record.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;
    use crate::entities::{ListingKind, OrderStatus};
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn party(name: &str, email: &str) -> Party {
        Party::new(name, email).unwrap()
    }

    fn request(requester: &Party, fulfiller: &Party) -> OrderRequest {
        OrderRequest {
            id: EntityId::generate(),
            listing_id: EntityId::generate(),
            listing_name: "Hedge trimmer".to_string(),
            kind: Some(ListingKind::Product),
            requester: requester.clone(),
            fulfiller: fulfiller.clone(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end_date: None,
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: None,
            message: String::new(),
            quantity: 1,
            total_cost: 12.0,
            status: OrderStatus::Pending,
            shop_id: None,
            created_at: Utc::now(),
            version: 1,
        }
    }

    #[test]
    fn test_absorb_prepends_new_and_replaces_existing() {
        let rae = party("Rae", "rae@example.com");
        let maya = party("Maya", "maya@example.com");
        let mut board = OrderBoard::new(rae.clone());

        let first = request(&rae, &maya);
        let second = request(&rae, &maya);
        board.absorb(&first);
        board.absorb(&second);

        // Newest first
        assert_eq!(board.placed()[0].id, second.id);
        assert_eq!(board.placed()[1].id, first.id);
        assert!(board.received().is_empty());

        // Status update replaces in place
        let mut approved = first.clone();
        approved.status = OrderStatus::Approved;
        board.absorb(&approved);

        assert_eq!(board.placed().len(), 2);
        assert_eq!(board.placed()[1].status, OrderStatus::Approved);
    }

    #[test]
    fn test_absorb_routes_by_role() {
        let rae = party("Rae", "rae@example.com");
        let maya = party("Maya", "maya@example.com");

        let mut maya_board = OrderBoard::new(maya.clone());
        maya_board.absorb(&request(&rae, &maya));

        assert!(maya_board.placed().is_empty());
        assert_eq!(maya_board.received().len(), 1);
    }

    #[test]
    fn test_absorb_ignores_foreign_records() {
        let rae = party("Rae", "rae@example.com");
        let maya = party("Maya", "maya@example.com");
        let other = party("Kim", "kim@example.com");

        let mut board = OrderBoard::new(other);
        board.absorb(&request(&rae, &maya));

        assert!(board.placed().is_empty());
        assert!(board.received().is_empty());
    }

    #[test]
    fn test_self_order_lands_on_both_lists() {
        // A shop owner ordering from their own shop appears on both sides
        let maya = party("Maya", "maya@example.com");
        let mut board = OrderBoard::new(maya.clone());
        board.absorb(&request(&maya, &maya));

        assert_eq!(board.placed().len(), 1);
        assert_eq!(board.received().len(), 1);
    }
}
