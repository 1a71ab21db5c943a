//! Storage for the back office.
//!
//! # Stores
//!
//! - `products.json` - The product catalogue, a single JSON document under
//!   the configured data directory. Created from the seed catalogue the
//!   first time it is opened and rewritten atomically on every change.
//! - `archive.json` - Archived records, kept next to the catalogue in the
//!   same way so swept products survive a restart.
//! - Purchase orders, bills and damage/returns - Seeded into memory at
//!   startup. Changes last for the life of the process.

pub mod archive;
pub mod bills;
pub mod fixtures;
pub mod orders;
pub mod products;
pub mod returns;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use archive::ArchiveRepository;
pub use bills::BillRepository;
pub use orders::OrderRepository;
pub use products::ProductStore;
pub use returns::ReturnRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the document store failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The document store holds data that does not deserialize.
    #[error("data corruption: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Uniqueness violation (e.g., a product code already in use).
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Read the JSON array at `path`, writing `seed()` there first when the file
/// does not exist.
async fn read_or_seed<T, F>(path: &Path, seed: F) -> Result<Vec<T>, RepositoryError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let seeded = seed();
            write_document(path, &seeded).await?;
            tracing::info!(path = %path.display(), count = seeded.len(), "Seeded document store");
            Ok(seeded)
        }
        Err(e) => Err(e.into()),
    }
}

/// Replace the document through a temp file and rename.
async fn write_document<T: Serialize>(path: &Path, records: &[T]) -> Result<(), RepositoryError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(dir).await?;
    }

    let json = serde_json::to_vec_pretty(records)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
