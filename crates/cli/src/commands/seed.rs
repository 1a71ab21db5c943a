//! Seed the product store with the sample catalogue.

use std::path::Path;

use tracing::info;

use stockinvent_admin::db::{ProductStore, fixtures};

/// Write the sample catalogue to `data_dir/products.json`.
///
/// Opening the store already seeds a missing document, so without `force`
/// an existing catalogue is left alone.
///
/// # Errors
///
/// Returns an error if the document can't be read or written.
pub async fn products(data_dir: &Path, force: bool) -> Result<usize, Box<dyn std::error::Error>> {
    let path = super::products_path(data_dir);
    let existed = tokio::fs::try_exists(&path).await?;
    let store = ProductStore::open(&path).await?;

    if existed && !force {
        let count = store.list().await.len();
        info!(path = %path.display(), count, "Product store already exists, use --force to overwrite");
        return Ok(0);
    }

    let catalogue = fixtures::products(chrono::Utc::now());
    let count = catalogue.len();
    store.replace_all(catalogue).await?;

    info!(path = %path.display(), count, "Seeded product store");
    Ok(count)
}
