//! Listing entity model: products and services offered by a shop

use crate::core::{Entity, EntityId, FieldValue, MarketResult, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a listing is a physical product or a bookable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Product,
    Service,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Product => "product",
            ListingKind::Service => "service",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit the listed price applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricePeriod {
    Unit,
    Hour,
    Day,
    Week,
    Month,
    Session,
}

impl PricePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricePeriod::Unit => "unit",
            PricePeriod::Hour => "hour",
            PricePeriod::Day => "day",
            PricePeriod::Week => "week",
            PricePeriod::Month => "month",
            PricePeriod::Session => "session",
        }
    }
}

impl fmt::Display for PricePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A WGS84 point for proximity search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

const EARTH_RADIUS_KM: f64 = 6371.0;

impl Coordinates {
    /// Great-circle distance to `other` in kilometres (Haversine).
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

        EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// A product or service offered by a shop.
///
/// `stock` is meaningful for products only and stays `None` for services.
/// A delisted listing (`is_active == false`) remains stored and queryable
/// but accepts no new orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: EntityId,
    pub shop_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub kind: ListingKind,
    pub price: f64,
    pub period: PricePeriod,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub stock: Option<u32>,
    pub is_active: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "initial_version")]
    pub version: u64,
}

fn initial_version() -> u64 {
    1
}

/// Caller-supplied fields for creating a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub kind: ListingKind,
    pub price: f64,
    pub period: PricePeriod,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub stock: Option<u32>,
}

impl ListingDraft {
    pub fn validate(&self) -> MarketResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" }.into());
        }
        if self.price < 0.0 || self.price.is_nan() {
            return Err(ValidationError::NegativeAmount {
                field: "price",
                value: self.price,
            }
            .into());
        }
        Ok(())
    }
}

impl Listing {
    /// Build a new active listing from a draft, attached to `shop_id`.
    ///
    /// Rating and review count start at zero; reviews are aggregated by
    /// collaborators outside this crate.
    pub fn from_draft(shop_id: EntityId, draft: ListingDraft) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            shop_id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            kind: draft.kind,
            price: draft.price,
            period: draft.period,
            location: draft.location,
            coordinates: draft.coordinates,
            stock: draft.stock,
            is_active: true,
            rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    /// Refresh the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Listing {
    fn collection() -> &'static str {
        "listings"
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
        &["shop_id", "name", "category", "kind", "is_active"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "shop_id" => Some(FieldValue::Id(self.shop_id.clone())),
            "name" => Some(FieldValue::String(self.name.clone())),
            "category" => Some(FieldValue::String(self.category.clone())),
            "kind" => Some(FieldValue::String(self.kind.as_str().to_string())),
            "is_active" => Some(FieldValue::Boolean(self.is_active)),
            _ => None,
        }
    }
}
