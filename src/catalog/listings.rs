//! Listing catalog service

use crate::core::{
    AccessError, AuthContext, EntityId, FieldValue, MarketError, MarketResult, Party,
};
use crate::entities::{Coordinates, Listing, ListingDraft, Shop};
use crate::storage::EntityStore;
use std::sync::Arc;

/// Owner-scoped CRUD, delist/relist and search over listings.
///
/// Listing ownership is derived through the owning shop: the acting party
/// must own the shop a listing belongs to before mutating it.
#[derive(Clone)]
pub struct ListingService {
    listings: Arc<dyn EntityStore<Listing>>,
    shops: Arc<dyn EntityStore<Shop>>,
}

impl ListingService {
    pub fn new(listings: Arc<dyn EntityStore<Listing>>, shops: Arc<dyn EntityStore<Shop>>) -> Self {
        Self { listings, shops }
    }

    /// Get a listing by id, failing on unknown ids.
    pub async fn get(&self, id: &EntityId) -> MarketResult<Listing> {
        self.listings.get(id).await?.ok_or(MarketError::NotFound {
            collection: "listings",
            id: id.clone(),
        })
    }

    /// Create a listing under `shop_id`. The acting party must own the shop.
    pub async fn add_listing(
        &self,
        shop_id: &EntityId,
        draft: ListingDraft,
        ctx: &AuthContext,
    ) -> MarketResult<Listing> {
        let actor = ctx.require("create listing")?;
        draft.validate()?;
        self.owned_shop(shop_id, actor).await?;

        let listing = Listing::from_draft(shop_id.clone(), draft);
        let stored = self.listings.upsert(listing).await?;

        tracing::info!(
            listing_id = %stored.id,
            shop_id = %stored.shop_id,
            kind = %stored.kind,
            "listing created"
        );

        Ok(stored)
    }

    /// Replace a listing record. Only the owner of its shop may update,
    /// and the listing cannot be moved to another shop here.
    pub async fn update_listing(
        &self,
        mut updated: Listing,
        ctx: &AuthContext,
    ) -> MarketResult<Listing> {
        let actor = ctx.require("update listing")?;
        let current = self.get(&updated.id).await?;
        self.owned_shop(&current.shop_id, actor).await?;

        updated.shop_id = current.shop_id;
        updated.touch();
        let stored = self.listings.upsert(updated).await?;

        tracing::debug!(listing_id = %stored.id, "listing updated");

        Ok(stored)
    }

    /// Hard-delete a listing. Only the owner of its shop may delete.
    pub async fn delete_listing(&self, id: &EntityId, ctx: &AuthContext) -> MarketResult<()> {
        let actor = ctx.require("delete listing")?;
        let current = self.get(id).await?;
        self.owned_shop(&current.shop_id, actor).await?;

        self.listings.remove(id).await?;

        tracing::info!(listing_id = %id, "listing deleted");

        Ok(())
    }

    /// Soft-delete: mark the listing inactive so it accepts no new orders.
    pub async fn delist(&self, id: &EntityId, ctx: &AuthContext) -> MarketResult<Listing> {
        self.set_active(id, false, ctx).await
    }

    /// Reverse a delist.
    pub async fn relist(&self, id: &EntityId, ctx: &AuthContext) -> MarketResult<Listing> {
        self.set_active(id, true, ctx).await
    }

    async fn set_active(
        &self,
        id: &EntityId,
        active: bool,
        ctx: &AuthContext,
    ) -> MarketResult<Listing> {
        let actor = ctx.require("delist/relist listing")?;
        let mut current = self.get(id).await?;
        self.owned_shop(&current.shop_id, actor).await?;

        current.is_active = active;
        current.touch();
        let stored = self.listings.upsert(current).await?;

        tracing::info!(listing_id = %id, is_active = active, "listing active flag changed");

        Ok(stored)
    }

    /// All listings of one shop, in store order.
    pub async fn listings_by_shop(&self, shop_id: &EntityId) -> MarketResult<Vec<Listing>> {
        Ok(self
            .listings
            .find_by("shop_id", &FieldValue::from(shop_id))
            .await?)
    }

    /// All listings whose shop is owned by `email`.
    pub async fn listings_by_owner(&self, email: &str) -> MarketResult<Vec<Listing>> {
        let owned = self
            .shops
            .find_by("owner_email", &FieldValue::from(email))
            .await?;

        let mut result = Vec::new();
        for shop in owned {
            result.extend(self.listings_by_shop(&shop.id).await?);
        }
        Ok(result)
    }

    /// Case-insensitive search over listing names and descriptions.
    pub async fn search(
        &self,
        term: &str,
        category: Option<&str>,
        active_only: bool,
    ) -> MarketResult<Vec<Listing>> {
        let needle = term.to_lowercase();
        Ok(self
            .listings
            .list()
            .await?
            .into_iter()
            .filter(|l| !active_only || l.is_active)
            .filter(|l| category.is_none_or(|c| l.category == c))
            .filter(|l| {
                needle.is_empty()
                    || l.name.to_lowercase().contains(&needle)
                    || l.description.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Active listings with coordinates within `radius_km` of `point`,
    /// closest first, each paired with its distance in kilometres.
    pub async fn find_near(
        &self,
        point: Coordinates,
        radius_km: f64,
    ) -> MarketResult<Vec<(Listing, f64)>> {
        let mut nearby: Vec<(Listing, f64)> = self
            .listings
            .list()
            .await?
            .into_iter()
            .filter(|l| l.is_active)
            .filter_map(|l| {
                let distance = l.coordinates.as_ref()?.distance_km(&point);
                (distance <= radius_km).then_some((l, distance))
            })
            .collect();

        nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(nearby)
    }

    async fn owned_shop(&self, shop_id: &EntityId, actor: &Party) -> MarketResult<Shop> {
        let shop = self.shops.get(shop_id).await?.ok_or(MarketError::NotFound {
            collection: "shops",
            id: shop_id.clone(),
        })?;

        if !shop.owner.same_identity(actor) {
            return Err(AccessError::NotOwner {
                collection: "shops",
                id: shop_id.clone(),
            }
            .into());
        }

        Ok(shop)
    }
}
