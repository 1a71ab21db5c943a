//! Archiving policy: sweep long-empty products into the archive and bring
//! archived records back.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::task::JoinHandle;
use tracing::instrument;

use stockinvent_core::{ArchiveEntryId, ProductId};

use crate::db::{ArchiveRepository, ProductStore, RepositoryError};
use crate::models::{ArchiveEntry, ArchivedProduct, ArchivedRecord, Product};

/// Days a product may sit at zero stock before it is archived.
pub const ZERO_STOCK_DAYS: i64 = 90;

pub const SWEEP_REASON: &str = "Zero inventory for over 90 days";

/// `archived_by` of entries created by the sweep.
pub const SYSTEM_USER: &str = "System";

pub const SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Shown next to the inventory table.
pub const POLICY_NOTICE: &str = "Items with zero inventory for over 90 days will be automatically archived. Archived items can be restored at any time from the Archive section.";

/// Whether `product` has been empty for longer than the policy allows.
#[must_use]
pub fn is_stale(product: &Product, now: DateTime<Utc>) -> bool {
    product.is_out_of_stock() && now - product.updated_at > TimeDelta::days(ZERO_STOCK_DAYS)
}

fn archive_entry(product: &Product, now: DateTime<Utc>) -> ArchiveEntry {
    ArchiveEntry {
        // Replaced by the repository.
        id: ArchiveEntryId::new(""),
        archive_date: now.date_naive(),
        reason: SWEEP_REASON.to_string(),
        archived_by: SYSTEM_USER.to_string(),
        record: ArchivedRecord::Product(ArchivedProduct::from_product(product)),
    }
}

/// Move every stale product into the archive. Returns the new entries.
///
/// # Errors
///
/// Returns a storage error if either document cannot be rewritten. Each
/// product is recorded in the archive before it leaves the catalogue, so a
/// failure never loses a product.
#[instrument(skip_all)]
pub async fn sweep(
    products: &ProductStore,
    archive: &ArchiveRepository,
    now: DateTime<Utc>,
) -> Result<Vec<ArchiveEntry>, RepositoryError> {
    let stale: Vec<Product> = products
        .list()
        .await
        .into_iter()
        .filter(|p| is_stale(p, now))
        .collect();

    let mut archived = Vec::with_capacity(stale.len());
    for product in stale {
        let entry = archive.insert(archive_entry(&product, now)).await?;
        products.delete(&product.id).await?;
        tracing::info!(
            product_id = %product.product_id,
            archive_id = %entry.id,
            "Archived empty product"
        );
        archived.push(entry);
    }

    Ok(archived)
}

/// Run [`sweep`] now and then every [`SWEEP_INTERVAL`].
pub fn spawn_sweeper(
    products: Arc<ProductStore>,
    archive: Arc<ArchiveRepository>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            match sweep(&products, &archive, Utc::now()).await {
                Ok(entries) if entries.is_empty() => {
                    tracing::debug!("Archive sweep found nothing to archive");
                }
                Ok(entries) => tracing::info!(count = entries.len(), "Archive sweep complete"),
                Err(e) => tracing::error!(error = %e, "Archive sweep failed"),
            }
        }
    })
}

/// Outcome of restoring an archive entry.
#[derive(Debug, Clone)]
pub struct Restored {
    pub entry: ArchiveEntry,
    /// The product put back in the catalogue, for product entries.
    pub product: Option<Product>,
}

/// Take an entry out of the archive. A product entry goes back into the
/// catalogue as it was archived, with its last known quantity.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` for an unknown entry and
/// `RepositoryError::Conflict` if the product code has been reused since;
/// the entry stays archived in both cases.
#[instrument(skip(products, archive, now))]
pub async fn restore(
    products: &ProductStore,
    archive: &ArchiveRepository,
    id: &ArchiveEntryId,
    now: DateTime<Utc>,
) -> Result<Restored, RepositoryError> {
    let entry = archive.get(id).await?;

    let product = match &entry.record {
        ArchivedRecord::Product(archived) => {
            let fallback_key = ProductId::new(now.timestamp_millis().to_string());
            Some(products.insert(archived.to_product(fallback_key, now)).await?)
        }
        _ => None,
    };

    let entry = archive.remove(id).await?;
    tracing::info!(archive_id = %entry.id, kind = %entry.kind(), "Restored archive entry");
    Ok(Restored { entry, product })
}

/// Permanently delete an archive entry.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` for an unknown entry.
#[instrument(skip(archive))]
pub async fn delete(
    archive: &ArchiveRepository,
    id: &ArchiveEntryId,
) -> Result<ArchiveEntry, RepositoryError> {
    let entry = archive.remove(id).await?;
    tracing::info!(archive_id = %entry.id, "Deleted archive entry");
    Ok(entry)
}
