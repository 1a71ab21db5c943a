//! Run the zero-stock archive sweep against the data directory.

use std::path::Path;

use tracing::info;

use stockinvent_admin::services::archiver;

/// Archive every product that has had zero stock for more than 90 days.
///
/// Products move from `products.json` into `archive.json`, where the server
/// picks them up on its next start. With `dry_run` neither document is
/// touched.
///
/// # Errors
///
/// Returns an error if either document can't be read or written.
pub async fn sweep(data_dir: &Path, dry_run: bool) -> Result<usize, Box<dyn std::error::Error>> {
    let store = super::open_store(data_dir).await?;
    let now = chrono::Utc::now();

    if dry_run {
        let stale: Vec<_> = store
            .list()
            .await
            .into_iter()
            .filter(|p| archiver::is_stale(p, now))
            .collect();
        for product in &stale {
            info!(id = %product.id, name = %product.name, "Would archive");
        }
        info!(count = stale.len(), "Dry run complete");
        return Ok(stale.len());
    }

    let archive = super::open_archive(data_dir).await?;
    let archived = archiver::sweep(&store, &archive, now).await?;
    for entry in &archived {
        info!(id = %entry.id, name = %entry.display_name(), reason = %entry.reason, "Archived");
    }
    info!(count = archived.len(), "Archive sweep complete");
    Ok(archived.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeDelta, Utc};

    use stockinvent_admin::models::{ArchivedRecord, ProductPatch};

    use super::*;
    use crate::commands::{open_archive, open_store};

    async fn stale_product(data_dir: &Path) -> String {
        let store = open_store(data_dir).await.unwrap();
        let target = store.list().await.remove(0);
        store
            .update(
                &target.id,
                ProductPatch {
                    quantity: Some(0),
                    ..ProductPatch::default()
                },
                Utc::now() - TimeDelta::days(120),
            )
            .await
            .unwrap();
        target.product_id
    }

    #[tokio::test]
    async fn test_sweep_writes_the_archive_document() {
        let dir = tempfile::tempdir().unwrap();
        let product_id = stale_product(dir.path()).await;

        assert_eq!(sweep(dir.path(), false).await.unwrap(), 1);

        let store = open_store(dir.path()).await.unwrap();
        assert!(store.list().await.iter().all(|p| p.product_id != product_id));

        let archive = open_archive(dir.path()).await.unwrap();
        let entry = archive
            .list()
            .await
            .into_iter()
            .find(|e| matches!(&e.record, ArchivedRecord::Product(p) if p.product_id == product_id))
            .unwrap();
        let restored = archiver::restore(&store, &archive, &entry.id, Utc::now())
            .await
            .unwrap();
        assert_eq!(restored.product.unwrap().product_id, product_id);
    }

    #[tokio::test]
    async fn test_dry_run_leaves_documents_alone() {
        let dir = tempfile::tempdir().unwrap();
        stale_product(dir.path()).await;

        assert_eq!(sweep(dir.path(), true).await.unwrap(), 1);
        assert!(!dir.path().join("archive.json").exists());
        assert_eq!(open_store(dir.path()).await.unwrap().list().await.len(), 15);
    }
}
