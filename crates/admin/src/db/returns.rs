//! Damage and return claims held in memory, newest first.

use tokio::sync::RwLock;
use tracing::instrument;

use stockinvent_core::{ReturnId, ReturnStatus};

use super::RepositoryError;
use crate::models::{DamageReturn, NewReturn};

#[derive(Debug)]
pub struct ReturnRepository {
    returns: RwLock<Vec<DamageReturn>>,
}

impl ReturnRepository {
    #[must_use]
    pub fn new(returns: Vec<DamageReturn>) -> Self {
        Self {
            returns: RwLock::new(returns),
        }
    }

    pub async fn list(&self) -> Vec<DamageReturn> {
        self.returns.read().await.clone()
    }

    /// File a new claim. It gets the next id after the highest in use, starts
    /// out pending and is listed first.
    #[instrument(skip(self, claim), fields(invoice = %claim.invoice_no))]
    pub async fn create(&self, claim: NewReturn) -> DamageReturn {
        let mut returns = self.returns.write().await;
        let id = returns
            .iter()
            .map(|r| r.id)
            .max()
            .map_or(ReturnId::new(1), |highest| highest.next());
        let record = claim.into_return(id);
        returns.insert(0, record.clone());
        tracing::info!(id = %record.id, "Filed return");
        record
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown claim.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: ReturnId,
        status: ReturnStatus,
    ) -> Result<DamageReturn, RepositoryError> {
        let mut returns = self.returns.write().await;
        let record = returns
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RepositoryError::NotFound)?;
        record.status = status;
        Ok(record.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::fixtures;
    use crate::models::ReturnForm;

    fn claim() -> NewReturn {
        ReturnForm {
            invoice_no: "INV-2023-060".to_string(),
            order_date: "2023-11-01".to_string(),
            delivery_date: "2023-11-03".to_string(),
            issue: "Other".to_string(),
            product: "Bookshelf".to_string(),
            quantity: "1".to_string(),
            return_date: "2023-11-06".to_string(),
            description: String::new(),
            refund_amount: "179.99".to_string(),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_prepends_with_next_id() {
        let repo = ReturnRepository::new(fixtures::damage_returns());
        let created = repo.create(claim()).await;
        assert_eq!(created.id, ReturnId::new(6));
        assert_eq!(created.status, ReturnStatus::Pending);

        let list = repo.list().await;
        assert_eq!(list.len(), 6);
        assert_eq!(list.first().unwrap().id, ReturnId::new(6));
    }

    #[tokio::test]
    async fn test_create_on_empty_starts_at_one() {
        let repo = ReturnRepository::new(Vec::new());
        assert_eq!(repo.create(claim()).await.id, ReturnId::new(1));
    }

    #[tokio::test]
    async fn test_update_status() {
        let repo = ReturnRepository::new(fixtures::damage_returns());
        let updated = repo
            .update_status(ReturnId::new(1), ReturnStatus::Processed)
            .await
            .unwrap();
        assert_eq!(updated.status, ReturnStatus::Processed);
        assert!(
            repo.update_status(ReturnId::new(42), ReturnStatus::Rejected)
                .await
                .is_err()
        );
    }
}
