//! Inventory list: search, category, price range and column sort.

use serde::Deserialize;

use stockinvent_core::Money;

use super::{Sort, SortDirection, SortKey, matches_search, non_blank, sort_stable};
use crate::models::{LOW_STOCK_THRESHOLD, Product};

/// Query string of `/inventory` and its CSV export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventorySortKey {
    ProductId,
    Name,
    Category,
    Quantity,
    Price,
    Supplier,
}

impl InventorySortKey {
    pub const ALL: [Self; 6] = [
        Self::ProductId,
        Self::Name,
        Self::Category,
        Self::Quantity,
        Self::Price,
        Self::Supplier,
    ];
}

impl SortKey for InventorySortKey {
    fn as_str(self) -> &'static str {
        match self {
            Self::ProductId => "product_id",
            Self::Name => "name",
            Self::Category => "category",
            Self::Quantity => "quantity",
            Self::Price => "price",
            Self::Supplier => "supplier",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw)
    }
}

/// Whole-dollar price bounds of a catalogue, used as the slider range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceBounds {
    pub min: Money,
    pub max: Money,
}

impl PriceBounds {
    /// Floor of the cheapest price to ceiling of the dearest. An empty
    /// catalogue yields `0..0`.
    #[must_use]
    pub fn of(products: &[Product]) -> Self {
        let min = products.iter().map(|p| p.price).min();
        let max = products.iter().map(|p| p.price).max();
        match (min, max) {
            (Some(min), Some(max)) => Self {
                min: min.floor(),
                max: max.ceil(),
            },
            _ => Self::default(),
        }
    }
}

/// Resolved inventory filter with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryFilter {
    pub search: String,
    /// Empty means every category.
    pub category: String,
    pub price_min: Money,
    pub price_max: Money,
    pub sort: Sort<InventorySortKey>,
}

impl InventoryFilter {
    pub const DEFAULT_SORT: Sort<InventorySortKey> =
        Sort::new(InventorySortKey::Name, SortDirection::Ascending);

    /// Missing or unparseable prices fall back to `bounds`; a minimum above
    /// the maximum is pulled down to the maximum.
    #[must_use]
    pub fn from_query(query: &InventoryQuery, bounds: PriceBounds) -> Self {
        let price = |raw: Option<&String>, fallback: Money| {
            non_blank(raw.map(String::as_str))
                .and_then(|v| Money::parse(v).ok())
                .unwrap_or(fallback)
        };
        let price_max = price(query.max_price.as_ref(), bounds.max);
        let price_min = price(query.min_price.as_ref(), bounds.min).min(price_max);

        let category = non_blank(query.category.as_deref())
            .filter(|c| !c.eq_ignore_ascii_case("all"))
            .unwrap_or_default()
            .to_string();

        Self {
            search: query.q.as_deref().unwrap_or_default().trim().to_string(),
            category,
            price_min,
            price_max,
            sort: Sort::parse(query.sort.as_deref(), query.dir.as_deref())
                .unwrap_or(Self::DEFAULT_SORT),
        }
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        matches_search(
            &self.search,
            &[
                product.name.as_str(),
                product.supplier.as_str(),
                product.product_id.as_str(),
            ],
        ) && (self.category.is_empty() || product.category == self.category)
            && product.price >= self.price_min
            && product.price <= self.price_max
    }

    /// Filter then sort.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let mut rows: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        sort_stable(&mut rows, self.sort.direction, |a, b| match self.sort.key {
            InventorySortKey::ProductId => a.product_id.cmp(&b.product_id),
            InventorySortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            InventorySortKey::Category => a.category.cmp(&b.category),
            InventorySortKey::Quantity => a.quantity.cmp(&b.quantity),
            InventorySortKey::Price => a.price.cmp(&b.price),
            InventorySortKey::Supplier => a.supplier.cmp(&b.supplier),
        });
        rows
    }
}

/// Summary cards above the inventory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryStats {
    pub product_count: usize,
    pub total_units: u64,
    pub inventory_value: Money,
    pub low_stock: usize,
}

impl InventoryStats {
    #[must_use]
    pub fn of(products: &[Product]) -> Self {
        Self {
            product_count: products.len(),
            total_units: products.iter().map(|p| u64::from(p.quantity)).sum(),
            inventory_value: products.iter().map(Product::stock_value).sum(),
            low_stock: products
                .iter()
                .filter(|p| p.quantity < LOW_STOCK_THRESHOLD)
                .count(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::db::fixtures;

    fn catalogue() -> Vec<Product> {
        fixtures::products(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    fn query(pairs: &[(&str, &str)]) -> InventoryQuery {
        let mut query = InventoryQuery::default();
        for (key, value) in pairs {
            let value = Some((*value).to_string());
            match *key {
                "q" => query.q = value,
                "category" => query.category = value,
                "min_price" => query.min_price = value,
                "max_price" => query.max_price = value,
                "sort" => query.sort = value,
                "dir" => query.dir = value,
                _ => unreachable!(),
            }
        }
        query
    }

    #[test]
    fn test_price_bounds_round_outwards() {
        let products = catalogue();
        let bounds = PriceBounds::of(&products);
        let cheapest = products.iter().map(|p| p.price).min().unwrap();
        let dearest = products.iter().map(|p| p.price).max().unwrap();
        assert!(bounds.min <= cheapest);
        assert!(bounds.max >= dearest);
        assert_eq!(bounds.min, bounds.min.floor());
        assert_eq!(bounds.max, bounds.max.ceil());
        assert_eq!(PriceBounds::of(&[]), PriceBounds::default());
    }

    #[test]
    fn test_default_filter_keeps_everything_sorted_by_name() {
        let products = catalogue();
        let filter = InventoryFilter::from_query(&InventoryQuery::default(), PriceBounds::of(&products));
        let rows = filter.apply(products.clone());
        assert_eq!(rows.len(), products.len());
        let names: Vec<String> = rows.iter().map(|p| p.name.to_lowercase()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_min_above_max_is_clamped() {
        let filter = InventoryFilter::from_query(
            &query(&[("min_price", "500"), ("max_price", "100")]),
            PriceBounds::default(),
        );
        assert_eq!(filter.price_min, filter.price_max);
        assert_eq!(filter.price_max, Money::parse("100").unwrap());
    }

    #[test]
    fn test_category_all_is_no_filter() {
        let products = catalogue();
        let bounds = PriceBounds::of(&products);
        let all = InventoryFilter::from_query(&query(&[("category", "All")]), bounds);
        assert!(all.category.is_empty());

        let electronics = InventoryFilter::from_query(&query(&[("category", "Electronics")]), bounds);
        let rows = electronics.apply(products);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|p| p.category == "Electronics"));
    }

    #[test]
    fn test_search_covers_name_supplier_and_code() {
        let products = catalogue();
        let bounds = PriceBounds::of(&products);
        let by_code = InventoryFilter::from_query(&query(&[("q", "prd-001")]), bounds);
        assert_eq!(by_code.apply(products.clone()).len(), 1);

        let supplier = products.first().unwrap().supplier.to_uppercase();
        let by_supplier = InventoryFilter::from_query(&query(&[("q", &supplier)]), bounds);
        assert!(!by_supplier.apply(products).is_empty());
    }

    #[test]
    fn test_sort_by_price_descending() {
        let products = catalogue();
        let filter = InventoryFilter::from_query(
            &query(&[("sort", "price"), ("dir", "desc")]),
            PriceBounds::of(&products),
        );
        let rows = filter.apply(products);
        assert!(rows.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn test_price_range_excludes_outside_products() {
        let products = catalogue();
        let filter = InventoryFilter::from_query(
            &query(&[("min_price", "50"), ("max_price", "200")]),
            PriceBounds::of(&products),
        );
        let lo = Money::parse("50").unwrap();
        let hi = Money::parse("200").unwrap();
        assert!(filter.apply(products).iter().all(|p| p.price >= lo && p.price <= hi));
    }

    #[test]
    fn test_stats_over_filtered_rows() {
        let products = catalogue();
        let stats = InventoryStats::of(&products);
        assert_eq!(stats.product_count, products.len());
        assert_eq!(
            stats.total_units,
            products.iter().map(|p| u64::from(p.quantity)).sum::<u64>()
        );
        assert_eq!(
            stats.low_stock,
            products.iter().filter(|p| p.quantity < 10).count()
        );
        assert_eq!(InventoryStats::of(&[]), InventoryStats::default());
    }
}
