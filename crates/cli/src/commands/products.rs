//! List products from the store.

use std::path::Path;

use tracing::info;

/// Log every product matching `search` and `category`.
///
/// # Errors
///
/// Returns an error if the store can't be opened.
pub async fn list(
    data_dir: &Path,
    search: &str,
    category: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    let store = super::open_store(data_dir).await?;
    let products = store.search(search, category).await;

    for product in &products {
        info!(
            id = %product.id,
            product_id = %product.product_id,
            category = %product.category,
            quantity = product.quantity,
            price = %product.price,
            low_stock = product.is_low_stock(),
            "{}",
            product.name
        );
    }
    info!(count = products.len(), "Products listed");
    Ok(products.len())
}
