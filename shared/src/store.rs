use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::constants::MAX_WHEEL_ITEMS;
use crate::error::StoreError;
use crate::items::{CatalogRecipe, Item, ItemSource, DEFAULT_CATALOG};
use crate::palette;
use crate::validation::validate_label;

/// Persistence boundary for recipes and wheel items.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Records `user_id` on first sight. Calling it again is a no-op.
    async fn ensure_user(&self, user_id: Uuid) -> Result<(), StoreError>;

    /// Reference recipes ordered by label.
    async fn list_catalog(&self) -> Result<Vec<CatalogRecipe>, StoreError>;

    /// The user's items in insertion order.
    async fn list_user_items(&self, user_id: Uuid) -> Result<Vec<Item>, StoreError>;

    async fn add_item(
        &self,
        user_id: Uuid,
        label: &str,
        source: ItemSource,
    ) -> Result<Item, StoreError>;

    async fn remove_item(&self, item_id: i64) -> Result<(), StoreError>;

    /// Removes `item_id` only when it belongs to `user_id`; anyone else's item is `NotFound`.
    async fn remove_user_item(&self, user_id: Uuid, item_id: i64) -> Result<(), StoreError>;
}

/// Checks shared by every store before an insert. Returns the trimmed label.
pub fn check_new_item<'a>(existing: &[Item], label: &'a str) -> Result<&'a str, StoreError> {
    let label = validate_label(label)?;
    if existing.iter().any(|item| item.matches_label(label)) {
        return Err(StoreError::Duplicate);
    }
    if existing.len() >= MAX_WHEEL_ITEMS {
        return Err(StoreError::Capacity);
    }
    Ok(label)
}

#[derive(Debug, Default)]
struct Inner {
    users: HashSet<Uuid>,
    catalog: Vec<CatalogRecipe>,
    items: Vec<(Uuid, Item)>,
    next_item_id: i64,
}

/// Process-local store used by tests and when no database is configured.
#[derive(Debug)]
pub struct InMemoryRecipeStore {
    inner: Mutex<Inner>,
}

impl Default for InMemoryRecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::with_catalog(DEFAULT_CATALOG.iter().copied())
    }

    pub fn with_catalog<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut catalog: Vec<CatalogRecipe> = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| CatalogRecipe {
                id: i as i64 + 1,
                label: label.to_string(),
            })
            .collect();
        catalog.sort_by(|a, b| a.label.cmp(&b.label));

        Self {
            inner: Mutex::new(Inner {
                catalog,
                next_item_id: 1,
                ..Inner::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

impl Inner {
    fn items_of(&self, user_id: Uuid) -> Vec<Item> {
        self.items
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, item)| item.clone())
            .collect()
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn ensure_user(&self, user_id: Uuid) -> Result<(), StoreError> {
        self.lock()?.users.insert(user_id);
        Ok(())
    }

    async fn list_catalog(&self) -> Result<Vec<CatalogRecipe>, StoreError> {
        Ok(self.lock()?.catalog.clone())
    }

    async fn list_user_items(&self, user_id: Uuid) -> Result<Vec<Item>, StoreError> {
        Ok(self.lock()?.items_of(user_id))
    }

    async fn add_item(
        &self,
        user_id: Uuid,
        label: &str,
        source: ItemSource,
    ) -> Result<Item, StoreError> {
        let mut inner = self.lock()?;
        let existing = inner.items_of(user_id);
        let label = check_new_item(&existing, label)?;

        let item = Item {
            id: inner.next_item_id,
            label: label.to_string(),
            color_index: palette::color_index_for(existing.len()),
            source,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.next_item_id += 1;
        inner.users.insert(user_id);
        inner.items.push((user_id, item.clone()));
        Ok(item)
    }

    async fn remove_item(&self, item_id: i64) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let before = inner.items.len();
        inner.items.retain(|(_, item)| item.id != item_id);
        if inner.items.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn remove_user_item(&self, user_id: Uuid, item_id: i64) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let before = inner.items.len();
        inner
            .items
            .retain(|(owner, item)| !(*owner == user_id && item.id == item_id));
        if inner.items.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::build;

    #[tokio::test]
    async fn test_catalog_is_sorted() {
        let store = InMemoryRecipeStore::with_catalog(["pizza", "burger", "sushi"]);
        let labels: Vec<String> = store
            .list_catalog()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["burger", "pizza", "sushi"]);
    }

    #[tokio::test]
    async fn test_items_keep_insertion_order_per_user() {
        let store = InMemoryRecipeStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.add_item(alice, "沙拉", ItemSource::Custom).await.unwrap();
        store.add_item(bob, "火锅", ItemSource::Catalog).await.unwrap();
        store.add_item(alice, " 火锅 ", ItemSource::Catalog).await.unwrap();

        let labels: Vec<String> = store
            .list_user_items(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.label)
            .collect();
        assert_eq!(labels, vec!["沙拉", "火锅"]);
        assert_eq!(store.list_user_items(bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_label_is_rejected() {
        let store = InMemoryRecipeStore::new();
        let user = Uuid::new_v4();
        store.add_item(user, "火锅", ItemSource::Custom).await.unwrap();
        assert_eq!(
            store.add_item(user, "火锅", ItemSource::Catalog).await,
            Err(StoreError::Duplicate)
        );

        store.add_item(user, "Pizza", ItemSource::Custom).await.unwrap();
        assert_eq!(
            store.add_item(user, "  PIZZA", ItemSource::Custom).await,
            Err(StoreError::Duplicate)
        );
        assert_eq!(store.list_user_items(user).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_full_wheel_is_rejected() {
        let store = InMemoryRecipeStore::new();
        let user = Uuid::new_v4();
        for i in 0..MAX_WHEEL_ITEMS {
            store.add_item(user, &format!("dish {}", i), ItemSource::Custom).await.unwrap();
        }
        let before = store.list_user_items(user).await.unwrap();

        assert_eq!(
            store.add_item(user, "one more", ItemSource::Custom).await,
            Err(StoreError::Capacity)
        );
        assert_eq!(store.list_user_items(user).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_invalid_label_is_rejected() {
        let store = InMemoryRecipeStore::new();
        let user = Uuid::new_v4();
        let result = store.add_item(user, "   ", ItemSource::Custom).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
        let result = store.add_item(user, &"a".repeat(51), ItemSource::Custom).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_then_remove_restores_partition() {
        let store = InMemoryRecipeStore::new();
        let user = Uuid::new_v4();
        for label in ["火锅", "烧烤", "沙拉"] {
            store.add_item(user, label, ItemSource::Custom).await.unwrap();
        }
        let before = build(&store.list_user_items(user).await.unwrap());

        let added = store.add_item(user, "饺子", ItemSource::Catalog).await.unwrap();
        assert_eq!(build(&store.list_user_items(user).await.unwrap()).len(), 4);
        store.remove_item(added.id).await.unwrap();

        let after = build(&store.list_user_items(user).await.unwrap());
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a.start_angle.to_bits(), b.start_angle.to_bits());
            assert_eq!(a.end_angle.to_bits(), b.end_angle.to_bits());
            assert_eq!(a, b);
        }
    }

    #[tokio::test]
    async fn test_colors_survive_removal() {
        let store = InMemoryRecipeStore::new();
        let user = Uuid::new_v4();
        let first = store.add_item(user, "火锅", ItemSource::Custom).await.unwrap();
        let second = store.add_item(user, "烧烤", ItemSource::Custom).await.unwrap();
        assert_eq!((first.color_index, second.color_index), (0, 1));

        store.remove_item(first.id).await.unwrap();
        let remaining = store.list_user_items(user).await.unwrap();
        assert_eq!(remaining[0].color_index, 1);
        assert_eq!(build(&remaining)[0].color, palette::WHEEL_COLORS[1]);
    }

    #[tokio::test]
    async fn test_remove_unknown_item() {
        let store = InMemoryRecipeStore::new();
        assert_eq!(store.remove_item(404).await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_user_scoped_removal() {
        let store = InMemoryRecipeStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let item = store.add_item(owner, "火锅", ItemSource::Custom).await.unwrap();

        assert_eq!(
            store.remove_user_item(stranger, item.id).await,
            Err(StoreError::NotFound)
        );
        assert_eq!(store.list_user_items(owner).await.unwrap(), vec![item.clone()]);

        store.remove_user_item(owner, item.id).await.unwrap();
        assert!(store.list_user_items(owner).await.unwrap().is_empty());
        assert_eq!(
            store.remove_user_item(owner, item.id).await,
            Err(StoreError::NotFound)
        );
    }
}
