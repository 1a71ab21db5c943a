//! Purchase orders held in memory.

use tokio::sync::RwLock;

use stockinvent_core::OrderId;

use super::RepositoryError;
use crate::models::PurchaseOrder;

#[derive(Debug)]
pub struct OrderRepository {
    orders: RwLock<Vec<PurchaseOrder>>,
}

impl OrderRepository {
    #[must_use]
    pub fn new(orders: Vec<PurchaseOrder>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }

    pub async fn list(&self) -> Vec<PurchaseOrder> {
        self.orders.read().await.clone()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown order number.
    pub async fn get(&self, id: &OrderId) -> Result<PurchaseOrder, RepositoryError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| &o.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}
