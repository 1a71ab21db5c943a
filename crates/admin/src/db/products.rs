//! Product document store.
//!
//! The catalogue lives in one JSON array on disk. Reads are served from an
//! in-memory copy; writes take the lock, update the copy and replace the
//! file through a temp file and rename so a crash never leaves a torn
//! document behind.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::instrument;

use stockinvent_core::ProductId;

use super::{RepositoryError, fixtures, read_or_seed, write_document};
use crate::listing::matches_search;
use crate::models::{NewProduct, Product, ProductPatch};

/// Persistent product catalogue.
#[derive(Debug)]
pub struct ProductStore {
    path: PathBuf,
    products: RwLock<Vec<Product>>,
}

impl ProductStore {
    /// Open the store at `path`, seeding it when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, or holds
    /// malformed JSON.
    #[instrument(skip_all)]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();

        let products = read_or_seed(&path, || fixtures::products(Utc::now())).await?;

        Ok(Self {
            path,
            products: RwLock::new(products),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing document is still readable.
    pub async fn is_readable(&self) -> bool {
        tokio::fs::metadata(&self.path).await.is_ok()
    }

    /// Every product in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this key.
    pub async fn get(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    /// Products whose name, SKU or supplier contains `query`, restricted to
    /// `category` unless it is empty or `All`.
    pub async fn search(&self, query: &str, category: &str) -> Vec<Product> {
        let any_category = category.is_empty() || category.eq_ignore_ascii_case("all");
        self.products
            .read()
            .await
            .iter()
            .filter(|p| {
                matches_search(
                    query,
                    &[
                        p.name.as_str(),
                        p.sku.as_deref().unwrap_or_default(),
                        p.supplier.as_str(),
                    ],
                )
            })
            .filter(|p| any_category || p.category == category)
            .cloned()
            .collect()
    }

    /// Add a product. The key defaults to the current time in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the key or product code is
    /// already taken, or a storage error if the document cannot be written.
    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn create(
        &self,
        input: NewProduct,
        now: DateTime<Utc>,
    ) -> Result<Product, RepositoryError> {
        let mut products = self.products.write().await;

        if products.iter().any(|p| p.product_id == input.product_id) {
            return Err(RepositoryError::Conflict(format!(
                "product id {} already exists",
                input.product_id
            )));
        }

        let id = match input.id.clone() {
            Some(id) if products.iter().any(|p| p.id == id) => {
                return Err(RepositoryError::Conflict(format!("key {id} already exists")));
            }
            Some(id) => id,
            None => next_timestamp_key(&products, now),
        };

        let product = input.into_product(id, now);
        let mut next = products.clone();
        next.push(product.clone());
        write_document(&self.path, &next).await?;
        *products = next;

        tracing::info!(id = %product.id, "Created product");
        Ok(product)
    }

    /// Put back a complete product record, keeping its timestamps. The key is
    /// replaced with a fresh one if another product holds it now.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product code is taken, or
    /// a storage error.
    #[instrument(skip(self, product), fields(product_id = %product.product_id))]
    pub async fn insert(&self, mut product: Product) -> Result<Product, RepositoryError> {
        let mut products = self.products.write().await;

        if products.iter().any(|p| p.product_id == product.product_id) {
            return Err(RepositoryError::Conflict(format!(
                "product id {} already exists",
                product.product_id
            )));
        }
        if products.iter().any(|p| p.id == product.id) {
            product.id = next_timestamp_key(&products, product.updated_at);
        }

        let mut next = products.clone();
        next.push(product.clone());
        write_document(&self.path, &next).await?;
        *products = next;

        tracing::info!(id = %product.id, "Inserted product");
        Ok(product)
    }

    /// Merge `patch` into the product and stamp `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this key,
    /// `RepositoryError::Conflict` if the patch reuses another product's
    /// code, or a storage error.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: &ProductId,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> Result<Product, RepositoryError> {
        let mut products = self.products.write().await;

        if let Some(code) = &patch.product_id
            && products.iter().any(|p| &p.product_id == code && &p.id != id)
        {
            return Err(RepositoryError::Conflict(format!(
                "product id {code} already exists"
            )));
        }

        let mut next = products.clone();
        let product = next
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        patch.apply(product);
        product.updated_at = now;
        let updated = product.clone();

        write_document(&self.path, &next).await?;
        *products = next;
        Ok(updated)
    }

    /// Remove a product and return it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if nothing was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| &p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        let mut next = products.clone();
        let removed = next.remove(index);
        write_document(&self.path, &next).await?;
        *products = next;

        tracing::info!(id = %removed.id, "Deleted product");
        Ok(removed)
    }

    /// Replace the whole catalogue.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the document cannot be written.
    pub async fn replace_all(&self, replacement: Vec<Product>) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        write_document(&self.path, &replacement).await?;
        *products = replacement;
        Ok(())
    }
}

/// Millisecond timestamp key, bumped past any existing numeric key.
fn next_timestamp_key(products: &[Product], now: DateTime<Utc>) -> ProductId {
    let highest = products
        .iter()
        .filter_map(|p| p.id.as_str().parse::<i64>().ok())
        .max()
        .unwrap_or(0);
    ProductId::new(now.timestamp_millis().max(highest + 1).to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use stockinvent_core::Money;

    fn new_product(code: &str, name: &str) -> NewProduct {
        NewProduct {
            id: None,
            product_id: code.to_string(),
            sku: Some("SKU-77".to_string()),
            name: name.to_string(),
            category: "Accessories".to_string(),
            quantity: 3,
            price: Money::from_cents(1999),
            supplier: "Anker".to_string(),
            location: None,
            reorder_level: None,
            purchase_date: None,
            description: String::new(),
            is_active: true,
        }
    }

    async fn open_temp() -> (tempfile::TempDir, ProductStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProductStore::open(dir.path().join("products.json"))
            .await
            .unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_open_seeds_missing_document() {
        let (dir, store) = open_temp().await;
        assert_eq!(store.list().await.len(), 15);
        assert!(dir.path().join("products.json").exists());
        assert!(store.is_readable().await);
    }

    #[tokio::test]
    async fn test_create_persists_and_reloads() {
        let (dir, store) = open_temp().await;
        let now = Utc::now();
        let created = store.create(new_product("PRD-900", "USB Hub"), now).await.unwrap();
        assert_eq!(created.created_at, now);
        assert_eq!(created.updated_at, now);

        let reopened = ProductStore::open(dir.path().join("products.json"))
            .await
            .unwrap();
        assert_eq!(reopened.get(&created.id).await.unwrap().name, "USB Hub");
        assert_eq!(reopened.list().await.len(), 16);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_code() {
        let (_dir, store) = open_temp().await;
        let err = store
            .create(new_product("PRD-001", "Clone"), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_keys_are_unique_within_one_millisecond() {
        let (_dir, store) = open_temp().await;
        let now = Utc::now();
        let a = store.create(new_product("PRD-901", "A"), now).await.unwrap();
        let b = store.create(new_product("PRD-902", "B"), now).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_update_merges_and_stamps() {
        let (_dir, store) = open_temp().await;
        let first = store.list().await.remove(0);
        let later = first.updated_at + chrono::Duration::minutes(5);

        let updated = store
            .update(
                &first.id,
                ProductPatch {
                    quantity: Some(0),
                    ..ProductPatch::default()
                },
                later,
            )
            .await
            .unwrap();
        assert_eq!(updated.quantity, 0);
        assert_eq!(updated.name, first.name);
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.created_at, first.created_at);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let (_dir, store) = open_temp().await;
        let missing = ProductId::new("nope");
        assert!(matches!(store.get(&missing).await, Err(RepositoryError::NotFound)));
        assert!(matches!(
            store.update(&missing, ProductPatch::default(), Utc::now()).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(store.delete(&missing).await, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_removes() {
        let (_dir, store) = open_temp().await;
        let first = store.list().await.remove(0);
        store.delete(&first.id).await.unwrap();
        assert_eq!(store.list().await.len(), 14);
        assert!(store.get(&first.id).await.is_err());
    }

    #[tokio::test]
    async fn test_search_by_text_and_category() {
        let (_dir, store) = open_temp().await;
        let hits = store.search("office depot", "").await;
        assert_eq!(hits.len(), 2);

        let electronics = store.search("", "Electronics").await;
        assert!(electronics.iter().all(|p| p.category == "Electronics"));
        assert_eq!(electronics.len(), 7);

        assert_eq!(store.search("", "All").await.len(), 15);
        assert!(store.search("wireless", "Furniture").await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_keeps_record_and_rekeys_on_clash() {
        let (_dir, store) = open_temp().await;
        let first = store.delete(&store.list().await.remove(0).id).await.unwrap();

        let back = store.insert(first.clone()).await.unwrap();
        assert_eq!(back, first);
        assert!(matches!(
            store.insert(first.clone()).await,
            Err(RepositoryError::Conflict(_))
        ));

        let mut twin = first.clone();
        twin.product_id = "PRD-950".to_string();
        let rekeyed = store.insert(twin).await.unwrap();
        assert_ne!(rekeyed.id, first.id);
        assert_eq!(rekeyed.created_at, first.created_at);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(matches!(
            ProductStore::open(&path).await,
            Err(RepositoryError::Json(_))
        ));
    }
}
