//! CLI command implementations.

pub mod archive;
pub mod products;
pub mod seed;

use std::path::{Path, PathBuf};

use stockinvent_admin::db::{ArchiveRepository, ProductStore};

/// Path of the product document inside `data_dir`.
pub fn products_path(data_dir: &Path) -> PathBuf {
    data_dir.join("products.json")
}

/// Path of the archive document inside `data_dir`.
pub fn archive_path(data_dir: &Path) -> PathBuf {
    data_dir.join("archive.json")
}

/// Open the product store, seeding it if the document doesn't exist yet.
///
/// # Errors
///
/// Returns an error if the document exists but can't be read or parsed.
pub async fn open_store(data_dir: &Path) -> Result<ProductStore, Box<dyn std::error::Error>> {
    Ok(ProductStore::open(products_path(data_dir)).await?)
}

/// Open the archive, seeding it if the document doesn't exist yet.
///
/// # Errors
///
/// Returns an error if the document exists but can't be read or parsed.
pub async fn open_archive(
    data_dir: &Path,
) -> Result<ArchiveRepository, Box<dyn std::error::Error>> {
    Ok(ArchiveRepository::open(archive_path(data_dir)).await?)
}
