//! Purchase order list.

use serde::Deserialize;

use stockinvent_core::{Money, OrderStatus};

use super::{
    DateRange, Sort, SortDirection, SortKey, date_or_max, matches_search, non_blank, sort_stable,
};
use crate::models::PurchaseOrder;

/// Query string of `/orders` and its CSV export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortKey {
    Id,
    Supplier,
    OrderDate,
    ExpectedDelivery,
    Total,
    Status,
}

impl OrderSortKey {
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Supplier,
        Self::OrderDate,
        Self::ExpectedDelivery,
        Self::Total,
        Self::Status,
    ];
}

impl SortKey for OrderSortKey {
    fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Supplier => "supplier",
            Self::OrderDate => "order_date",
            Self::ExpectedDelivery => "expected_delivery",
            Self::Total => "total",
            Self::Status => "status",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFilter {
    pub search: String,
    /// `None` is "all".
    pub status: Option<OrderStatus>,
    pub dates: DateRange,
    pub sort: Sort<OrderSortKey>,
}

impl OrderFilter {
    pub const DEFAULT_SORT: Sort<OrderSortKey> =
        Sort::new(OrderSortKey::OrderDate, SortDirection::Descending);

    #[must_use]
    pub fn from_query(query: &OrdersQuery) -> Self {
        Self {
            search: query.q.as_deref().unwrap_or_default().trim().to_string(),
            status: non_blank(query.status.as_deref()).and_then(|s| s.parse().ok()),
            dates: DateRange::parse(query.start.as_deref(), query.end.as_deref()),
            sort: Sort::parse(query.sort.as_deref(), query.dir.as_deref())
                .unwrap_or(Self::DEFAULT_SORT),
        }
    }

    /// Query value of the status select.
    #[must_use]
    pub fn status_value(&self) -> &'static str {
        self.status.as_ref().map_or("all", OrderStatus::as_str)
    }

    #[must_use]
    pub fn matches(&self, order: &PurchaseOrder) -> bool {
        matches_search(
            &self.search,
            &[
                order.id.as_str(),
                order.supplier.as_str(),
                order.warehouse.as_str(),
            ],
        ) && self.status.is_none_or(|status| order.status == status)
            && self.dates.contains(order.order_date)
    }

    #[must_use]
    pub fn apply(&self, orders: Vec<PurchaseOrder>) -> Vec<PurchaseOrder> {
        let mut rows: Vec<PurchaseOrder> = orders.into_iter().filter(|o| self.matches(o)).collect();
        sort_stable(&mut rows, self.sort.direction, |a, b| match self.sort.key {
            OrderSortKey::Id => a.id.as_str().cmp(b.id.as_str()),
            OrderSortKey::Supplier => a.supplier.cmp(&b.supplier),
            OrderSortKey::OrderDate => a.order_date.cmp(&b.order_date),
            OrderSortKey::ExpectedDelivery => {
                date_or_max(a.expected_delivery).cmp(&date_or_max(b.expected_delivery))
            }
            OrderSortKey::Total => a.total.cmp(&b.total),
            OrderSortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        });
        rows
    }
}

/// Summary cards, always over the full order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderStats {
    pub total: usize,
    pub delivered: usize,
    pub in_transit: usize,
    pub processing: usize,
    pub pending_approval: usize,
    pub value: Money,
}

impl OrderStats {
    #[must_use]
    pub fn of(orders: &[PurchaseOrder]) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
        Self {
            total: orders.len(),
            delivered: count(OrderStatus::Delivered),
            in_transit: count(OrderStatus::InTransit),
            processing: count(OrderStatus::Processing),
            pending_approval: count(OrderStatus::PendingApproval),
            value: orders.iter().map(|o| o.total).sum(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::fixtures;

    fn filter(status: &str, sort: &str, dir: &str) -> OrderFilter {
        OrderFilter::from_query(&OrdersQuery {
            status: Some(status.to_string()),
            sort: Some(sort.to_string()),
            dir: Some(dir.to_string()),
            ..OrdersQuery::default()
        })
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let rows = OrderFilter::from_query(&OrdersQuery::default()).apply(fixtures::purchase_orders());
        assert_eq!(rows.len(), fixtures::purchase_orders().len());
        assert!(rows.windows(2).all(|w| w[0].order_date >= w[1].order_date));
    }

    #[test]
    fn test_status_all_and_unknown_mean_no_filter() {
        assert_eq!(filter("all", "", "").status, None);
        assert_eq!(filter("bogus", "", "").status, None);
        assert_eq!(filter("delivered", "", "").status_value(), "delivered");
    }

    #[test]
    fn test_status_filter() {
        let rows = filter("delivered", "", "").apply(fixtures::purchase_orders());
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|o| o.status == OrderStatus::Delivered));
    }

    #[test]
    fn test_missing_expected_delivery_sorts_last() {
        let mut orders = fixtures::purchase_orders();
        orders.first_mut().unwrap().expected_delivery = None;
        let missing = orders.first().unwrap().id.clone();
        let rows = filter("all", "expected_delivery", "asc").apply(orders);
        assert_eq!(rows.last().unwrap().id, missing);
    }

    #[test]
    fn test_date_range_on_order_date() {
        let orders = fixtures::purchase_orders();
        let pivot = orders.first().unwrap().order_date;
        let query = OrdersQuery {
            start: Some(pivot.to_string()),
            end: Some(pivot.to_string()),
            ..OrdersQuery::default()
        };
        let rows = OrderFilter::from_query(&query).apply(orders);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|o| o.order_date == pivot));

        let none = OrdersQuery {
            start: Some("2099-01-01".to_string()),
            ..OrdersQuery::default()
        };
        assert!(OrderFilter::from_query(&none).apply(fixtures::purchase_orders()).is_empty());
    }

    #[test]
    fn test_search_by_warehouse() {
        let orders = fixtures::purchase_orders();
        let warehouse = orders.first().unwrap().warehouse.to_lowercase();
        let query = OrdersQuery {
            q: Some(warehouse.clone()),
            ..OrdersQuery::default()
        };
        let rows = OrderFilter::from_query(&query).apply(orders);
        assert!(rows.iter().all(|o| o.warehouse.to_lowercase().contains(&warehouse)
            || o.supplier.to_lowercase().contains(&warehouse)
            || o.id.as_str().to_lowercase().contains(&warehouse)));
        assert!(!rows.is_empty());
    }

    #[test]
    fn test_stats_count_every_status() {
        let orders = fixtures::purchase_orders();
        let stats = OrderStats::of(&orders);
        assert_eq!(stats.total, orders.len());
        let cancelled = orders.iter().filter(|o| o.status == OrderStatus::Cancelled).count();
        assert_eq!(
            stats.delivered + stats.in_transit + stats.processing + stats.pending_approval + cancelled,
            stats.total
        );
    }
}
