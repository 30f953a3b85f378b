//! Shared test harness for integration tests
//!
//! Provides a seeded marketplace (one shop, one owner, one product and one
//! service listing) plus helpers for parties, dates and order drafts.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod market_harness;
//! use market_harness::*;
//! ```

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use homebase::prelude::*;

/// A wired marketplace with one seeded shop and two listings.
pub struct Market {
    pub stores: MarketStores,
    pub shops: ShopService,
    pub listings: ListingService,
    pub orders: OrderService,
    pub shop: Shop,
    pub product: Listing,
    pub service: Listing,
    pub owner: Party,
    pub customer: Party,
}

impl Market {
    pub fn owner_ctx(&self) -> AuthContext {
        AuthContext::member(self.owner.clone())
    }

    pub fn customer_ctx(&self) -> AuthContext {
        AuthContext::member(self.customer.clone())
    }
}

pub fn party(name: &str, email: &str) -> Party {
    Party::new(name, email).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Build a marketplace with one shop, one product and one service listing.
pub async fn seeded_market() -> Market {
    init_tracing();

    let stores = MarketStores::in_memory();
    let shops = ShopService::new(stores.shops.clone());
    let listings = ListingService::new(stores.listings.clone(), stores.shops.clone());
    let orders = OrderService::new(stores.clone());

    let owner = party("Maya", "maya@example.com");
    let customer = party("Rae", "rae@example.com");
    let owner_ctx = AuthContext::member(owner.clone());

    let shop = shops
        .create_shop(
            ShopDraft {
                name: "Maya's Tools".to_string(),
                description: "Neighborhood tool rentals".to_string(),
                category: "tools".to_string(),
                location: "Aurora".to_string(),
            },
            &owner_ctx,
        )
        .await
        .unwrap();

    let product = listings
        .add_listing(
            &shop.id,
            ListingDraft {
                name: "Pressure washer".to_string(),
                description: "2000 PSI electric washer".to_string(),
                category: "tools".to_string(),
                kind: ListingKind::Product,
                price: 15.0,
                period: PricePeriod::Day,
                location: "Aurora".to_string(),
                coordinates: None,
                stock: Some(5),
            },
            &owner_ctx,
        )
        .await
        .unwrap();

    let service = listings
        .add_listing(
            &shop.id,
            ListingDraft {
                name: "Garden consultation".to_string(),
                description: "One hour on-site".to_string(),
                category: "services".to_string(),
                kind: ListingKind::Service,
                price: 40.0,
                period: PricePeriod::Session,
                location: "Aurora".to_string(),
                coordinates: None,
                stock: None,
            },
            &owner_ctx,
        )
        .await
        .unwrap();

    Market {
        stores,
        shops,
        listings,
        orders,
        shop,
        product,
        service,
        owner,
        customer,
    }
}

/// A draft for the harness product listing over the given dates.
pub fn product_draft(market: &Market, start: NaiveDate, end: Option<NaiveDate>) -> OrderDraft {
    OrderDraft {
        listing_id: market.product.id.clone(),
        fulfiller: market.owner.clone(),
        start_date: start,
        end_date: end,
        start_time: time(9, 0),
        end_time: Some(time(17, 0)),
        message: "Weekend project".to_string(),
        quantity: None,
        total_cost: 30.0,
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
