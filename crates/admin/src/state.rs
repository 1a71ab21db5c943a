//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;

use crate::config::AppConfig;
use crate::db::{
    ArchiveRepository, BillRepository, OrderRepository, ProductStore, RepositoryError,
    ReturnRepository, fixtures,
};
use crate::services::{AuthError, IdentityProvider};

/// Errors building the application state at startup.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to open document store: {0}")]
    Store(#[from] RepositoryError),

    #[error("failed to set up identity provider: {0}")]
    Identity(#[from] AuthError),
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    products: Arc<ProductStore>,
    orders: OrderRepository,
    bills: BillRepository,
    returns: ReturnRepository,
    archive: Arc<ArchiveRepository>,
    identity: IdentityProvider,
}

impl AppState {
    /// Open the product and archive documents under the configured data
    /// directory, seed the in-memory repositories and pick the identity
    /// provider.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if a document cannot be opened or the HTTP
    /// client for Firebase cannot be built.
    pub async fn load(config: AppConfig) -> Result<Self, StateError> {
        let products = ProductStore::open(config.products_path()).await?;
        let archive = ArchiveRepository::open(config.archive_path()).await?;
        let identity = IdentityProvider::from_config(&config)?;
        Ok(Self::new(config, products, archive, identity))
    }

    /// Assemble state from opened stores; the other repositories start from
    /// the seed data.
    #[must_use]
    pub fn new(
        config: AppConfig,
        products: ProductStore,
        archive: ArchiveRepository,
        identity: IdentityProvider,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products: Arc::new(products),
                orders: OrderRepository::new(fixtures::purchase_orders()),
                bills: BillRepository::new(fixtures::bills()),
                returns: ReturnRepository::new(fixtures::damage_returns()),
                archive: Arc::new(archive),
                identity,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn products(&self) -> &Arc<ProductStore> {
        &self.inner.products
    }

    #[must_use]
    pub fn orders(&self) -> &OrderRepository {
        &self.inner.orders
    }

    #[must_use]
    pub fn bills(&self) -> &BillRepository {
        &self.inner.bills
    }

    #[must_use]
    pub fn returns(&self) -> &ReturnRepository {
        &self.inner.returns
    }

    #[must_use]
    pub fn archive(&self) -> &Arc<ArchiveRepository> {
        &self.inner.archive
    }

    #[must_use]
    pub fn identity(&self) -> &IdentityProvider {
        &self.inner.identity
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("identity", &self.inner.identity)
            .finish_non_exhaustive()
    }
}
