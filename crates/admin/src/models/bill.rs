//! Bills issued to retailers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockinvent_core::{BillId, BillStatus, Money, RetailerId};

/// An invoice billed to a retailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    /// Invoice number printed on the document, e.g. `INV-2023-001`.
    pub bill_number: String,
    pub retailer: Retailer,
    pub items: Vec<BillItem>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
    pub status: BillStatus,
    pub payment_date: Option<NaiveDate>,
    pub notes: String,
}

impl Bill {
    /// Change the payment status.
    ///
    /// Marking a bill paid stamps `payment_date` with `today`; any other
    /// transition leaves the payment date as it was.
    pub fn set_status(&mut self, status: BillStatus, today: NaiveDate) {
        if status == BillStatus::Paid {
            self.payment_date = Some(today);
        }
        self.status = status;
    }

    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }

    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// The retailer a bill is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retailer {
    pub id: RetailerId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// A billed product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillItem {
    /// Catalogue code, e.g. `PRD-001`.
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total: Money,
}
