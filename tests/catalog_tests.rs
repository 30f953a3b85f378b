//! Integration tests for catalog flows, seeding and analytics.

mod market_harness;

use homebase::prelude::*;
use market_harness::*;
use std::io::Write;

#[tokio::test]
async fn test_delisted_listing_stops_orders_until_relisted() {
    let market = seeded_market().await;
    let owner = market.owner_ctx();
    let customer = market.customer_ctx();

    market.listings.delist(&market.product.id, &owner).await.unwrap();

    let err = market
        .orders
        .create_request(product_draft(&market, date(2024, 4, 1), None), &customer)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "LISTING_INACTIVE");

    market.listings.relist(&market.product.id, &owner).await.unwrap();

    market
        .orders
        .create_request(product_draft(&market, date(2024, 4, 1), None), &customer)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_customer_cannot_mutate_foreign_listing() {
    let market = seeded_market().await;
    let customer = market.customer_ctx();

    let err = market
        .listings
        .delist(&market.product.id, &customer)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_OWNER");

    let mut repriced = market.product.clone();
    repriced.price = 1.0;
    let err = market
        .listings
        .update_listing(repriced, &customer)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_OWNER");
}

#[tokio::test]
async fn test_shop_search_and_owner_lookup() {
    let market = seeded_market().await;

    let found = market.shops.shop_by_owner("maya@example.com").await.unwrap();
    assert_eq!(found.map(|s| s.id), Some(market.shop.id.clone()));

    let hits = market.shops.search("tool", None).await.unwrap();
    assert_eq!(hits.len(), 1);

    let misses = market.shops.search("pottery", None).await.unwrap();
    assert!(misses.is_empty());
}

#[tokio::test]
async fn test_seed_catalog_from_file() {
    let yaml = r#"
shops:
  - id: id_shop00001
    owner:
      name: Seeded Owner
      email: seed@example.com
    name: Seeded Shop
    category: tools
    created_at: 2024-01-01T00:00:00Z
    updated_at: 2024-01-01T00:00:00Z
listings:
  - id: id_listing01
    shop_id: id_shop00001
    name: Seeded Ladder
    kind: product
    price: 8.0
    period: day
    stock: 1
    is_active: true
    created_at: 2024-01-01T00:00:00Z
    updated_at: 2024-01-01T00:00:00Z
rentals:
  - id: id_rental001
    listing_id: id_listing01
    listing_name: Seeded Ladder
    requester:
      name: Rae
      email: rae@example.com
    fulfiller:
      name: Seeded Owner
      email: seed@example.com
    start_date: 2024-04-01
    start_time: "09:00:00"
    total_cost: 8.0
    status: approved
    shop_id: id_shop00001
    created_at: 2024-03-20T12:00:00Z
"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let catalog = SeedCatalog::from_yaml_file(file.path().to_str().unwrap()).unwrap();
    let stores = MarketStores::in_memory();
    let written = catalog.apply(&stores).await.unwrap();
    assert_eq!(written, 3);

    // The seeded approved rental blocks its window
    let orders = OrderService::new(stores.clone());
    let conflict = orders
        .availability()
        .has_conflict(
            &EntityId::parse("id_listing01").unwrap(),
            date(2024, 4, 1),
            None,
            None,
        )
        .await
        .unwrap();
    assert!(conflict);

    // Seeded records participate in role-scoped views
    let received = orders
        .as_fulfiller(&party("Seeded Owner", "seed@example.com"))
        .await
        .unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].status, OrderStatus::Approved);
}

#[tokio::test]
async fn test_seed_missing_file_fails() {
    let err = SeedCatalog::from_yaml_file("/nonexistent/seed.yaml").unwrap_err();
    assert!(err.to_string().contains("seed catalog"));
}

#[tokio::test]
async fn test_analytics_over_full_flow() {
    let market = seeded_market().await;
    let customer = market.customer_ctx();
    let owner = market.owner_ctx();

    let order = market
        .orders
        .create_request(
            product_draft(&market, date(2024, 4, 1), Some(date(2024, 4, 3))),
            &customer,
        )
        .await
        .unwrap();
    market
        .orders
        .transition(&order.id, OrderStatus::Approved, &owner)
        .await
        .unwrap();
    market
        .orders
        .transition(&order.id, OrderStatus::Completed, &customer)
        .await
        .unwrap();

    let analytics = AnalyticsService::new(market.stores.clone());
    let metrics = analytics.shop_metrics(&market.shop.id).await.unwrap();

    assert_eq!(metrics.listing_count, 2);
    assert_eq!(metrics.order_count, 1);
    assert_eq!(metrics.completed_orders, 1);
    assert!((metrics.total_revenue - 30.0).abs() < f64::EPSILON);

    let text = CannedSuggestions
        .generate_suggestions(&metrics)
        .await
        .unwrap();
    assert!(!text.is_empty());
}

#[tokio::test]
async fn test_slot_planner_stays_out_of_the_stores() {
    let market = seeded_market().await;

    let mut planner = SlotPlanner::new();
    planner
        .add_slot(
            &market.service.id,
            AvailabilitySlot::new(date(2024, 6, 1), time(9, 0), time(12, 0)).unwrap(),
        )
        .unwrap();

    assert_eq!(planner.slots_for(&market.service.id).len(), 1);

    // Declaring slots writes nothing to any collection
    assert!(market.stores.rentals.list().await.unwrap().is_empty());
    assert_eq!(market.stores.listings.list().await.unwrap().len(), 2);

    // And slots do not affect conflict checking
    let conflict = market
        .orders
        .availability()
        .has_conflict(&market.service.id, date(2024, 6, 1), None, None)
        .await
        .unwrap();
    assert!(!conflict);
}
