//! In-memory implementation of EntityStore for testing and development

use crate::core::{Entity, EntityId, FieldValue, StoreError};
use crate::storage::EntityStore;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// In-memory entity store.
///
/// Uses an insertion-ordered map behind an RwLock, so repeated listings of
/// an unchanged collection return identical sequences. Clones share the
/// same underlying collection.
#[derive(Clone)]
pub struct InMemoryStore<T: Entity> {
    records: Arc<RwLock<IndexMap<EntityId, T>>>,
}

impl<T: Entity> InMemoryStore<T> {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Serialize the whole collection as a flat JSON array.
    ///
    /// This is the persisted layout: an ordered list of records keyed by
    /// their string ids.
    pub fn to_json(&self) -> Result<String, StoreError>
    where
        T: serde::Serialize,
    {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned {
                collection: T::collection(),
            })?;

        let all: Vec<&T> = records.values().collect();
        serde_json::to_string(&all).map_err(|e| StoreError::Serialization {
            collection: T::collection(),
            message: e.to_string(),
        })
    }

    /// Replace the collection with records decoded from a flat JSON array.
    ///
    /// Returns the number of records loaded.
    pub fn load_json(&self, json: &str) -> Result<usize, StoreError>
    where
        T: serde::de::DeserializeOwned,
    {
        let decoded: Vec<T> = serde_json::from_str(json).map_err(|e| StoreError::Serialization {
            collection: T::collection(),
            message: e.to_string(),
        })?;

        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned {
                collection: T::collection(),
            })?;

        records.clear();
        let count = decoded.len();
        for entity in decoded {
            records.insert(entity.id().clone(), entity);
        }

        Ok(count)
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for InMemoryStore<T> {
    async fn get(&self, id: &EntityId) -> Result<Option<T>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned {
                collection: T::collection(),
            })?;

        Ok(records.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned {
                collection: T::collection(),
            })?;

        Ok(records.values().cloned().collect())
    }

    async fn find_by(&self, field: &str, value: &FieldValue) -> Result<Vec<T>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned {
                collection: T::collection(),
            })?;

        Ok(records
            .values()
            .filter(|entity| entity.field_value(field).as_ref() == Some(value))
            .cloned()
            .collect())
    }

    async fn upsert(&self, mut entity: T) -> Result<T, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned {
                collection: T::collection(),
            })?;

        if let Some(stored) = records.get(entity.id()) {
            if stored.version() != entity.version() {
                return Err(StoreError::VersionConflict {
                    collection: T::collection(),
                    id: entity.id().clone(),
                    stored: stored.version(),
                    given: entity.version(),
                });
            }
            entity.set_version(stored.version() + 1);
        }

        // IndexMap keeps an existing key's position, so replacing a record
        // does not reorder the collection.
        records.insert(entity.id().clone(), entity.clone());

        Ok(entity)
    }

    async fn remove(&self, id: &EntityId) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned {
                collection: T::collection(),
            })?;

        records.shift_remove(id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Party;
    use crate::entities::{Shop, ShopDraft};

    fn sample_shop(name: &str, email: &str) -> Shop {
        Shop::from_draft(
            Party::new("Owner", email).unwrap(),
            ShopDraft {
                name: name.to_string(),
                description: String::new(),
                category: "tools".to_string(),
                location: String::new(),
            },
        )
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let store = InMemoryStore::<Shop>::new();
        let shop = sample_shop("Maya's Tools", "maya@example.com");

        let stored = store.upsert(shop.clone()).await.unwrap();
        assert_eq!(stored.version, 1);

        let fetched = store.get(&shop.id).await.unwrap();
        assert_eq!(fetched, Some(stored));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = InMemoryStore::<Shop>::new();
        assert_eq!(store.get(&EntityId::generate()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryStore::<Shop>::new();
        let a = sample_shop("Alpha", "a@example.com");
        let b = sample_shop("Beta", "b@example.com");
        let c = sample_shop("Gamma", "c@example.com");

        for shop in [&a, &b, &c] {
            store.upsert(shop.clone()).await.unwrap();
        }

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);

        // Replacing a record keeps its slot
        let mut b2 = store.get(&b.id).await.unwrap().unwrap();
        b2.name = "Beta Prime".to_string();
        store.upsert(b2).await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta Prime", "Gamma"]);
    }

    #[tokio::test]
    async fn test_find_by_indexed_field() {
        let store = InMemoryStore::<Shop>::new();
        store
            .upsert(sample_shop("Maya's Tools", "maya@example.com"))
            .await
            .unwrap();
        store
            .upsert(sample_shop("Ben's Bakes", "ben@example.com"))
            .await
            .unwrap();

        let found = store
            .find_by("owner_email", &FieldValue::from("maya@example.com"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Maya's Tools");

        let none = store
            .find_by("owner_email", &FieldValue::from("nobody@example.com"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_unknown_field_matches_nothing() {
        let store = InMemoryStore::<Shop>::new();
        store
            .upsert(sample_shop("Maya's Tools", "maya@example.com"))
            .await
            .unwrap();

        let found = store
            .find_by("no_such_field", &FieldValue::from("x"))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_bumps_version() {
        let store = InMemoryStore::<Shop>::new();
        let shop = sample_shop("Maya's Tools", "maya@example.com");

        let v1 = store.upsert(shop).await.unwrap();
        let v2 = store.upsert(v1.clone()).await.unwrap();
        assert_eq!(v2.version, 2);

        let v3 = store.upsert(v2).await.unwrap();
        assert_eq!(v3.version, 3);
    }

    #[tokio::test]
    async fn test_stale_upsert_is_rejected() {
        let store = InMemoryStore::<Shop>::new();
        let shop = sample_shop("Maya's Tools", "maya@example.com");

        let stored = store.upsert(shop).await.unwrap();

        // Two callers read the same version; the first write wins
        let mut first = stored.clone();
        first.name = "First Writer".to_string();
        store.upsert(first).await.unwrap();

        let mut second = stored;
        second.name = "Second Writer".to_string();
        let err = store.upsert(second).await.unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { stored: 2, given: 1, .. }));

        let current = store.list().await.unwrap();
        assert_eq!(current[0].name, "First Writer");
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemoryStore::<Shop>::new();
        let shop = sample_shop("Maya's Tools", "maya@example.com");
        store.upsert(shop.clone()).await.unwrap();

        store.remove(&shop.id).await.unwrap();
        assert_eq!(store.get(&shop.id).await.unwrap(), None);

        // Removing again is a no-op
        store.remove(&shop.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_json_roundtrip_preserves_order() {
        let store = InMemoryStore::<Shop>::new();
        store
            .upsert(sample_shop("Alpha", "a@example.com"))
            .await
            .unwrap();
        store
            .upsert(sample_shop("Beta", "b@example.com"))
            .await
            .unwrap();

        let json = store.to_json().unwrap();

        let restored = InMemoryStore::<Shop>::new();
        let count = restored.load_json(&json).unwrap();
        assert_eq!(count, 2);

        assert_eq!(store.list().await.unwrap(), restored.list().await.unwrap());
    }

    #[tokio::test]
    async fn test_load_json_rejects_garbage() {
        let store = InMemoryStore::<Shop>::new();
        let err = store.load_json("{not json").unwrap_err();
        assert!(matches!(err, StoreError::Serialization { .. }));
    }
}
