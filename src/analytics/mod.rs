//! Shop analytics aggregation and the suggestion collaborator seam

use crate::core::{EntityId, FieldValue, MarketResult};
use crate::entities::OrderStatus;
use crate::storage::{EntityStore, MarketStores};
use async_trait::async_trait;
use serde::Serialize;

/// Aggregated performance numbers for one shop.
///
/// Revenue and average order value count completed orders only; pending
/// and declined orders contribute to counts but not to revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopMetrics {
    pub shop_id: EntityId,
    pub listing_count: usize,
    pub active_listing_count: usize,
    pub order_count: usize,
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub total_revenue: f64,
    pub average_order_value: f64,
    /// Share of orders that reached `completed`, in percent
    pub conversion_rate: f64,
    pub average_rating: f64,
}

/// Computes [`ShopMetrics`] from the entity stores.
#[derive(Clone)]
pub struct AnalyticsService {
    stores: MarketStores,
}

impl AnalyticsService {
    pub fn new(stores: MarketStores) -> Self {
        Self { stores }
    }

    pub async fn shop_metrics(&self, shop_id: &EntityId) -> MarketResult<ShopMetrics> {
        let listings = self
            .stores
            .listings
            .find_by("shop_id", &FieldValue::from(shop_id))
            .await?;
        let orders = self
            .stores
            .rentals
            .find_by("shop_id", &FieldValue::from(shop_id))
            .await?;

        let completed: Vec<_> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .collect();
        let pending = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count();

        let total_revenue: f64 = completed.iter().map(|o| o.total_cost).sum();
        let average_order_value = if completed.is_empty() {
            0.0
        } else {
            total_revenue / completed.len() as f64
        };
        let conversion_rate = if orders.is_empty() {
            0.0
        } else {
            completed.len() as f64 / orders.len() as f64 * 100.0
        };

        let rated = listings.iter().filter(|l| l.review_count > 0).count();
        let average_rating = if rated == 0 {
            0.0
        } else {
            listings
                .iter()
                .filter(|l| l.review_count > 0)
                .map(|l| l.rating)
                .sum::<f64>()
                / rated as f64
        };

        Ok(ShopMetrics {
            shop_id: shop_id.clone(),
            listing_count: listings.len(),
            active_listing_count: listings.iter().filter(|l| l.is_active).count(),
            order_count: orders.len(),
            pending_orders: pending,
            completed_orders: completed.len(),
            total_revenue,
            average_order_value,
            conversion_rate,
            average_rating,
        })
    }
}

/// External collaborator that turns metrics into recommendation text.
///
/// Providers may call remote services and fail for reasons outside this
/// crate's taxonomy, hence the foreign error type. The core computes
/// metrics and defines this seam but never invokes a provider itself.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn generate_suggestions(&self, metrics: &ShopMetrics) -> anyhow::Result<String>;
}

/// Deterministic rule-based suggestions, usable offline.
pub struct CannedSuggestions;

#[async_trait]
impl SuggestionProvider for CannedSuggestions {
    async fn generate_suggestions(&self, metrics: &ShopMetrics) -> anyhow::Result<String> {
        let mut lines = Vec::new();

        if metrics.order_count > 5 && metrics.conversion_rate < 30.0 {
            lines.push(format!(
                "Improve listing descriptions: your conversion rate is {:.1}%.",
                metrics.conversion_rate
            ));
        }
        if metrics.average_rating > 0.0 && metrics.average_rating < 4.0 {
            lines.push(format!(
                "Address quality concerns: average rating is {:.1} stars.",
                metrics.average_rating
            ));
        }
        if metrics.listing_count < 5 {
            lines.push(format!(
                "Expand your catalog: {} listings limits visibility.",
                metrics.listing_count
            ));
        }
        if metrics.pending_orders > 3 {
            lines.push(format!(
                "Respond to orders quickly: {} requests are waiting.",
                metrics.pending_orders
            ));
        }
        if metrics.completed_orders > 0 && metrics.average_order_value < 20.0 {
            lines.push(format!(
                "Review pricing: average order value is ${:.2}.",
                metrics.average_order_value
            ));
        }

        if lines.is_empty() {
            lines.push("Your shop is in good shape. Keep listings fresh and respond promptly to requests.".to_string());
        }

        Ok(lines.join("\n"))
    }
}
