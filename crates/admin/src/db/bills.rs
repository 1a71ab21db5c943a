//! Retailer bills held in memory.

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::instrument;

use stockinvent_core::{BillId, BillStatus};

use super::RepositoryError;
use crate::models::Bill;

#[derive(Debug)]
pub struct BillRepository {
    bills: RwLock<Vec<Bill>>,
}

impl BillRepository {
    #[must_use]
    pub fn new(bills: Vec<Bill>) -> Self {
        Self {
            bills: RwLock::new(bills),
        }
    }

    pub async fn list(&self) -> Vec<Bill> {
        self.bills.read().await.clone()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown bill.
    pub async fn get(&self, id: &BillId) -> Result<Bill, RepositoryError> {
        self.bills
            .read()
            .await
            .iter()
            .find(|b| &b.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    /// Set the payment status; see [`Bill::set_status`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown bill.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: &BillId,
        status: BillStatus,
        today: NaiveDate,
    ) -> Result<Bill, RepositoryError> {
        let mut bills = self.bills.write().await;
        let bill = bills
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or(RepositoryError::NotFound)?;
        bill.set_status(status, today);
        tracing::info!(bill = %bill.bill_number, status = %status, "Updated bill status");
        Ok(bill.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::fixtures;

    #[tokio::test]
    async fn test_update_status_marks_paid() {
        let repo = BillRepository::new(fixtures::bills());
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bill = repo
            .update_status(&BillId::new("B002"), BillStatus::Paid, today)
            .await
            .unwrap();
        assert_eq!(bill.payment_date, Some(today));
        assert_eq!(
            repo.get(&BillId::new("B002")).await.unwrap().status,
            BillStatus::Paid
        );
    }

    #[tokio::test]
    async fn test_update_unknown_bill() {
        let repo = BillRepository::new(fixtures::bills());
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(matches!(
            repo.update_status(&BillId::new("B999"), BillStatus::Paid, today).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
