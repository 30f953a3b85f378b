//! Shop catalog service

use crate::core::{AccessError, AuthContext, EntityId, FieldValue, MarketError, MarketResult};
use crate::entities::{Shop, ShopDraft};
use crate::storage::EntityStore;
use std::sync::Arc;

/// Owner-scoped CRUD and search over shops.
#[derive(Clone)]
pub struct ShopService {
    shops: Arc<dyn EntityStore<Shop>>,
}

impl ShopService {
    pub fn new(shops: Arc<dyn EntityStore<Shop>>) -> Self {
        Self { shops }
    }

    /// Get a shop by id, failing on unknown ids.
    pub async fn get(&self, id: &EntityId) -> MarketResult<Shop> {
        self.shops.get(id).await?.ok_or(MarketError::NotFound {
            collection: "shops",
            id: id.clone(),
        })
    }

    /// Create a shop owned by the acting party.
    pub async fn create_shop(&self, draft: ShopDraft, ctx: &AuthContext) -> MarketResult<Shop> {
        let owner = ctx.require("create shop")?.clone();
        draft.validate()?;

        let shop = Shop::from_draft(owner, draft);
        let stored = self.shops.upsert(shop).await?;

        tracing::info!(shop_id = %stored.id, owner = %stored.owner.email, "shop created");

        Ok(stored)
    }

    /// Replace a shop record. Only the owner may update, and ownership
    /// itself cannot be reassigned here.
    pub async fn update_shop(&self, mut updated: Shop, ctx: &AuthContext) -> MarketResult<Shop> {
        let actor = ctx.require("update shop")?;
        let current = self.get(&updated.id).await?;

        if !current.owner.same_identity(actor) {
            return Err(AccessError::NotOwner {
                collection: "shops",
                id: updated.id.clone(),
            }
            .into());
        }

        updated.owner = current.owner;
        updated.touch();
        let stored = self.shops.upsert(updated).await?;

        tracing::debug!(shop_id = %stored.id, "shop updated");

        Ok(stored)
    }

    /// Delete a shop. Only the owner may delete.
    pub async fn delete_shop(&self, id: &EntityId, ctx: &AuthContext) -> MarketResult<()> {
        let actor = ctx.require("delete shop")?;
        let current = self.get(id).await?;

        if !current.owner.same_identity(actor) {
            return Err(AccessError::NotOwner {
                collection: "shops",
                id: id.clone(),
            }
            .into());
        }

        self.shops.remove(id).await?;

        tracing::info!(shop_id = %id, "shop deleted");

        Ok(())
    }

    /// The shop owned by `email`, if any. Each owner runs at most one shop.
    pub async fn shop_by_owner(&self, email: &str) -> MarketResult<Option<Shop>> {
        let mut owned = self
            .shops
            .find_by("owner_email", &FieldValue::from(email))
            .await?;
        Ok(if owned.is_empty() {
            None
        } else {
            Some(owned.remove(0))
        })
    }

    /// Case-insensitive search over shop names and descriptions,
    /// optionally restricted to a category.
    pub async fn search(&self, term: &str, category: Option<&str>) -> MarketResult<Vec<Shop>> {
        let needle = term.to_lowercase();
        Ok(self
            .shops
            .list()
            .await?
            .into_iter()
            .filter(|shop| category.is_none_or(|c| shop.category == c))
            .filter(|shop| {
                needle.is_empty()
                    || shop.name.to_lowercase().contains(&needle)
                    || shop.description.to_lowercase().contains(&needle)
            })
            .collect())
    }
}
