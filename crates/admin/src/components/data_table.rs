//! Data table component types.
//!
//! Describes the columns of a list page so the templates can render
//! sortable headers, filter selects and the export link without knowing
//! the query string layout.

use crate::listing::archive::ArchiveSortKey;
use crate::listing::bills::BillSortKey;
use crate::listing::inventory::InventorySortKey;
use crate::listing::orders::OrderSortKey;
use crate::listing::{Sort, SortDirection, SortKey, query_string};

/// Column definition for a data table.
#[derive(Debug, Clone, Copy)]
pub struct TableColumn<K> {
    /// Sort key, `None` for columns that cannot be sorted.
    pub key: Option<K>,
    /// Display label for the column header.
    pub label: &'static str,
}

impl<K> TableColumn<K> {
    /// Create a new sortable column.
    #[must_use]
    pub const fn sortable(key: K, label: &'static str) -> Self {
        Self {
            key: Some(key),
            label,
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub const fn new(label: &'static str) -> Self {
        Self { key: None, label }
    }
}

/// A rendered column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortHeader {
    pub label: &'static str,
    /// Link that applies the next sort, for sortable columns.
    pub href: Option<String>,
    /// Arrow for the active column.
    pub indicator: &'static str,
}

/// Option for select filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Option value.
    pub value: String,
    /// Display label.
    pub label: String,
    pub selected: bool,
}

impl FilterOption {
    /// Create a new filter option, selected when `value == current`.
    #[must_use]
    pub fn new(value: &str, label: &str, current: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: value == current,
        }
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone)]
pub struct DataTableConfig<K> {
    /// Page path the table lives on, e.g. `/inventory`.
    pub path: &'static str,
    /// Column definitions.
    pub columns: Vec<TableColumn<K>>,
    /// Search placeholder text.
    pub search_placeholder: &'static str,
    /// Title for empty state.
    pub empty_title: &'static str,
    /// Description for empty state.
    pub empty_description: &'static str,
}

impl<K: SortKey> DataTableConfig<K> {
    /// Create a new data table configuration.
    #[must_use]
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            columns: Vec::new(),
            search_placeholder: "Search...",
            empty_title: "No items found",
            empty_description: "Try adjusting your search or filters",
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn<K>) -> Self {
        self.columns.push(column);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub const fn search_placeholder(mut self, placeholder: &'static str) -> Self {
        self.search_placeholder = placeholder;
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub const fn empty_state(mut self, title: &'static str, description: &'static str) -> Self {
        self.empty_title = title;
        self.empty_description = description;
        self
    }

    /// Column headers for the current sort. `filters` are the active
    /// filter query pairs, carried into every sort link.
    #[must_use]
    pub fn headers(&self, sort: Option<Sort<K>>, filters: &[(&str, &str)]) -> Vec<SortHeader> {
        self.columns
            .iter()
            .map(|column| match column.key {
                Some(key) => {
                    let next = sort.map_or(Sort::new(key, SortDirection::Ascending), |s| {
                        s.toggled(key)
                    });
                    let mut pairs = filters.to_vec();
                    pairs.push(("sort", next.key.as_str()));
                    pairs.push(("dir", next.direction.as_str()));
                    SortHeader {
                        label: column.label,
                        href: Some(format!("{}{}", self.path, query_string(&pairs))),
                        indicator: sort.map_or("", |s| s.indicator(key)),
                    }
                }
                None => SortHeader {
                    label: column.label,
                    href: None,
                    indicator: "",
                },
            })
            .collect()
    }

    /// CSV download of the current view.
    #[must_use]
    pub fn export_href(&self, sort: Option<Sort<K>>, filters: &[(&str, &str)]) -> String {
        let mut pairs = filters.to_vec();
        if let Some(sort) = sort {
            pairs.push(("sort", sort.key.as_str()));
            pairs.push(("dir", sort.direction.as_str()));
        }
        format!("{}/export.csv{}", self.path, query_string(&pairs))
    }
}

/// Build the inventory table configuration.
#[must_use]
pub fn inventory_table() -> DataTableConfig<InventorySortKey> {
    DataTableConfig::new("/inventory")
        .column(TableColumn::sortable(InventorySortKey::ProductId, "Product ID"))
        .column(TableColumn::sortable(InventorySortKey::Name, "Product Name"))
        .column(TableColumn::sortable(InventorySortKey::Category, "Category"))
        .column(TableColumn::sortable(InventorySortKey::Quantity, "Quantity"))
        .column(TableColumn::sortable(InventorySortKey::Price, "Price"))
        .column(TableColumn::sortable(InventorySortKey::Supplier, "Supplier"))
        .column(TableColumn::new("Actions"))
        .search_placeholder("Search by name, supplier or product ID...")
        .empty_state("No products found", "Try adjusting your search or filters")
}

/// Build the purchase orders table configuration.
#[must_use]
pub fn orders_table() -> DataTableConfig<OrderSortKey> {
    DataTableConfig::new("/orders")
        .column(TableColumn::sortable(OrderSortKey::Id, "Order ID"))
        .column(TableColumn::sortable(OrderSortKey::Supplier, "Supplier"))
        .column(TableColumn::sortable(OrderSortKey::OrderDate, "Order Date"))
        .column(TableColumn::sortable(OrderSortKey::Total, "Total"))
        .column(TableColumn::sortable(OrderSortKey::Status, "Status"))
        .column(TableColumn::sortable(
            OrderSortKey::ExpectedDelivery,
            "Expected Delivery",
        ))
        .column(TableColumn::new("Actions"))
        .search_placeholder("Search by order ID, supplier or warehouse...")
        .empty_state("No orders found", "Try adjusting your search or filters")
}

/// Build the billing table configuration.
#[must_use]
pub fn bills_table() -> DataTableConfig<BillSortKey> {
    DataTableConfig::new("/billing")
        .column(TableColumn::sortable(BillSortKey::BillNumber, "Bill #"))
        .column(TableColumn::sortable(BillSortKey::Retailer, "Retailer"))
        .column(TableColumn::sortable(BillSortKey::IssueDate, "Issue Date"))
        .column(TableColumn::sortable(BillSortKey::DueDate, "Due Date"))
        .column(TableColumn::sortable(BillSortKey::Total, "Amount"))
        .column(TableColumn::sortable(BillSortKey::Status, "Status"))
        .column(TableColumn::new("Actions"))
        .search_placeholder("Search by bill number or retailer...")
        .empty_state("No bills found", "Try adjusting your search or filters")
}

/// Build the archive table configuration.
#[must_use]
pub fn archive_table() -> DataTableConfig<ArchiveSortKey> {
    DataTableConfig::new("/archives")
        .column(TableColumn::sortable(ArchiveSortKey::Name, "Name"))
        .column(TableColumn::sortable(ArchiveSortKey::Kind, "Type"))
        .column(TableColumn::new("Details"))
        .column(TableColumn::sortable(ArchiveSortKey::ArchiveDate, "Archive Date"))
        .column(TableColumn::sortable(ArchiveSortKey::Reason, "Reason"))
        .column(TableColumn::sortable(ArchiveSortKey::ArchivedBy, "Archived By"))
        .column(TableColumn::new("Actions"))
        .search_placeholder("Search archived records...")
        .empty_state("No archived records found", "Try adjusting your search or filters")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_toggle_active_column() {
        let table = inventory_table();
        let sort = Sort::new(InventorySortKey::Name, SortDirection::Ascending);
        let headers = table.headers(Some(sort), &[("q", "desk")]);

        let name = &headers[1];
        assert_eq!(name.indicator, "↑");
        assert_eq!(
            name.href.as_deref(),
            Some("/inventory?q=desk&sort=name&dir=desc")
        );

        let price = &headers[4];
        assert_eq!(price.indicator, "");
        assert_eq!(
            price.href.as_deref(),
            Some("/inventory?q=desk&sort=price&dir=asc")
        );

        let actions = headers.last().unwrap();
        assert!(actions.href.is_none());
    }

    #[test]
    fn test_unsorted_table_starts_ascending() {
        let headers = bills_table().headers(None, &[]);
        assert_eq!(
            headers[0].href.as_deref(),
            Some("/billing?sort=bill_number&dir=asc")
        );
        assert!(headers.iter().all(|h| h.indicator.is_empty()));
    }

    #[test]
    fn test_export_href_keeps_filters_and_sort() {
        let sort = Sort::new(OrderSortKey::Total, SortDirection::Descending);
        assert_eq!(
            orders_table().export_href(Some(sort), &[("status", "delivered"), ("q", "")]),
            "/orders/export.csv?status=delivered&sort=total&dir=desc"
        );
        assert_eq!(bills_table().export_href(None, &[]), "/billing/export.csv");
    }

    #[test]
    fn test_filter_option_selection() {
        assert!(FilterOption::new("paid", "Paid", "paid").selected);
        assert!(!FilterOption::new("paid", "Paid", "all").selected);
    }
}
