//! Purchase orders placed with suppliers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockinvent_core::{Money, OrderId, OrderStatus};

/// A purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Order number, e.g. `PO-2023-001`.
    pub id: OrderId,
    pub supplier: String,
    pub order_date: NaiveDate,
    pub total: Money,
    pub status: OrderStatus,
    pub expected_delivery: Option<NaiveDate>,
    pub actual_delivery: Option<NaiveDate>,
    pub items: Vec<OrderItem>,
    /// Tracking history, oldest first.
    pub shipment: Vec<ShipmentEvent>,
    pub warehouse: String,
    pub notes: String,
}

impl PurchaseOrder {
    /// Sum of quantity times unit price over every line.
    #[must_use]
    pub fn items_total(&self) -> Money {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Most recent tracking event.
    #[must_use]
    pub fn latest_event(&self) -> Option<&ShipmentEvent> {
        self.shipment.iter().max_by_key(|event| event.date)
    }
}

/// A line on a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub price: Money,
    pub unit_of_measure: String,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// One step in an order's shipment tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentEvent {
    pub date: NaiveDate,
    pub status: String,
    pub details: String,
}
