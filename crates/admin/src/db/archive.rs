//! Archive document store.
//!
//! Entries live in `archive.json` next to the catalogue and are written the
//! same way: update the in-memory copy under the lock, then replace the
//! file.

use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use tracing::instrument;

use stockinvent_core::{ArchiveEntryId, ArchiveKind};

use super::{RepositoryError, fixtures, read_or_seed, write_document};
use crate::models::ArchiveEntry;

#[derive(Debug)]
pub struct ArchiveRepository {
    path: PathBuf,
    entries: RwLock<Vec<ArchiveEntry>>,
}

impl ArchiveRepository {
    /// Open the archive at `path`, seeding the sample entries when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, or holds
    /// malformed JSON.
    #[instrument(skip_all)]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();
        let entries = read_or_seed(&path, fixtures::archive_entries).await?;
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list(&self) -> Vec<ArchiveEntry> {
        self.entries.read().await.clone()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown entry.
    pub async fn get(&self, id: &ArchiveEntryId) -> Result<ArchiveEntry, RepositoryError> {
        self.entries
            .read()
            .await
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    /// Add an entry, assigning the next id for its kind (`AP004`, ...).
    ///
    /// # Errors
    ///
    /// Returns a storage error if the document cannot be written.
    #[instrument(skip(self, entry), fields(kind = %entry.kind()))]
    pub async fn insert(&self, mut entry: ArchiveEntry) -> Result<ArchiveEntry, RepositoryError> {
        let mut entries = self.entries.write().await;
        entry.id = next_id(&entries, entry.kind());

        let mut next = entries.clone();
        next.push(entry.clone());
        write_document(&self.path, &next).await?;
        *entries = next;
        Ok(entry)
    }

    /// Remove an entry, returning it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown entry, or a
    /// storage error.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &ArchiveEntryId) -> Result<ArchiveEntry, RepositoryError> {
        let mut entries = self.entries.write().await;
        let index = entries
            .iter()
            .position(|e| &e.id == id)
            .ok_or(RepositoryError::NotFound)?;

        let mut next = entries.clone();
        let removed = next.remove(index);
        write_document(&self.path, &next).await?;
        *entries = next;
        Ok(removed)
    }
}

const fn id_prefix(kind: ArchiveKind) -> &'static str {
    match kind {
        ArchiveKind::Product => "AP",
        ArchiveKind::Order => "AO",
        ArchiveKind::Invoice => "AI",
        ArchiveKind::Supplier => "AS",
        ArchiveKind::License => "AL",
    }
}

fn next_id(entries: &[ArchiveEntry], kind: ArchiveKind) -> ArchiveEntryId {
    let prefix = id_prefix(kind);
    let highest = entries
        .iter()
        .filter_map(|e| e.id.as_str().strip_prefix(prefix))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    ArchiveEntryId::new(format!("{prefix}{:03}", highest + 1))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn open_temp() -> (tempfile::TempDir, ArchiveRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = ArchiveRepository::open(dir.path().join("archive.json"))
            .await
            .unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn test_open_seeds_missing_document() {
        let (dir, repo) = open_temp().await;
        assert_eq!(repo.list().await.len(), fixtures::archive_entries().len());
        assert!(dir.path().join("archive.json").exists());
    }

    #[tokio::test]
    async fn test_insert_assigns_next_id_per_kind() {
        let (_dir, repo) = open_temp().await;
        let template = repo.get(&ArchiveEntryId::new("AP002")).await.unwrap();
        let inserted = repo.insert(template.clone()).await.unwrap();
        assert_eq!(inserted.id.as_str(), "AP004");

        let license = repo.get(&ArchiveEntryId::new("AL001")).await.unwrap();
        assert_eq!(repo.insert(license).await.unwrap().id.as_str(), "AL006");
    }

    #[tokio::test]
    async fn test_changes_persist_across_reopen() {
        let (dir, repo) = open_temp().await;
        let template = repo.get(&ArchiveEntryId::new("AP002")).await.unwrap();
        let inserted = repo.insert(template).await.unwrap();
        repo.remove(&ArchiveEntryId::new("AS001")).await.unwrap();

        let reopened = ArchiveRepository::open(dir.path().join("archive.json"))
            .await
            .unwrap();
        assert!(reopened.get(&inserted.id).await.is_ok());
        assert!(matches!(
            reopened.get(&ArchiveEntryId::new("AS001")).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_remove() {
        let (_dir, repo) = open_temp().await;
        let removed = repo.remove(&ArchiveEntryId::new("AS001")).await.unwrap();
        assert_eq!(removed.display_name(), "Global Tech Imports");
        assert!(matches!(
            repo.remove(&ArchiveEntryId::new("AS001")).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
