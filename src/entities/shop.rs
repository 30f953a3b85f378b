//! Shop entity model

use crate::core::{Entity, EntityId, FieldValue, MarketResult, Party, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A home-run shop offering listings on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: EntityId,
    pub owner: Party,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "initial_version")]
    pub version: u64,
}

fn initial_version() -> u64 {
    1
}

/// Caller-supplied fields for creating a shop; the owner comes from the
/// acting identity and the rest is generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
}

impl ShopDraft {
    pub fn validate(&self) -> MarketResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" }.into());
        }
        Ok(())
    }
}

impl Shop {
    /// Build a new shop from a draft, owned by `owner`.
    pub fn from_draft(owner: Party, draft: ShopDraft) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            owner,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            location: draft.location,
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

impl Entity for Shop {
    fn collection() -> &'static str {
        "shops"
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
        &["owner_email", "name", "category"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "owner_email" => Some(FieldValue::String(self.owner.email.clone())),
            "name" => Some(FieldValue::String(self.name.clone())),
            "category" => Some(FieldValue::String(self.category.clone())),
            _ => None,
        }
    }
}
