//! Seed catalog loading
//!
//! A seed catalog is a YAML document holding initial shops, listings and
//! order requests. Applying one fills each store collection only when that
//! collection is still empty, so re-applying on every startup is safe.

use crate::core::{Entity, MarketResult};
use crate::entities::{Listing, OrderRequest, Shop};
use crate::storage::{EntityStore, MarketStores};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Initial records for the three entity collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub shops: Vec<Shop>,

    #[serde(default)]
    pub listings: Vec<Listing>,

    #[serde(default)]
    pub rentals: Vec<OrderRequest>,
}

impl SeedCatalog {
    /// Load a seed catalog from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed catalog '{}'", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load a seed catalog from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(yaml).context("failed to parse seed catalog")?;
        Ok(catalog)
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty() && self.listings.is_empty() && self.rentals.is_empty()
    }

    /// Apply the catalog to the stores, seeding only empty collections.
    ///
    /// Returns the number of records written.
    pub async fn apply(&self, stores: &MarketStores) -> MarketResult<usize> {
        let mut written = 0;
        written += seed_collection(stores.shops.as_ref(), &self.shops).await?;
        written += seed_collection(stores.listings.as_ref(), &self.listings).await?;
        written += seed_collection(stores.rentals.as_ref(), &self.rentals).await?;

        if written > 0 {
            tracing::info!(records = written, "seed catalog applied");
        }

        Ok(written)
    }
}

async fn seed_collection<T: Entity>(
    store: &dyn EntityStore<T>,
    records: &[T],
) -> MarketResult<usize> {
    if records.is_empty() || !store.list().await?.is_empty() {
        return Ok(0);
    }

    for record in records {
        store.upsert(record.clone()).await?;
    }
    Ok(records.len())
}
