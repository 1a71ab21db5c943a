//! Dashboard figures derived from the local data.
//!
//! Everything here is a pure function of repository snapshots, recomputed
//! per request.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use stockinvent_core::{BillStatus, Money, NotificationLevel, OrderStatus, ProductId, ReturnStatus};

use crate::models::{ArchiveEntry, Bill, DamageReturn, Product, PurchaseOrder};

/// Number of rows in the activity feed and the top products chart.
const FEED_LENGTH: usize = 5;

/// Category used for billed items no longer in the catalogue.
const OTHER_CATEGORY: &str = "Other";

/// Repository snapshots the dashboard is computed from.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub products: &'a [Product],
    pub orders: &'a [PurchaseOrder],
    pub bills: &'a [Bill],
    pub returns: &'a [DamageReturn],
    pub archive: &'a [ArchiveEntry],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_units: u64,
    pub inventory_value: Money,
    pub low_stock: usize,
    pub pending_orders: usize,
    /// Paid bills only.
    pub total_revenue: Money,
}

/// One line or bar series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<f64>,
}

/// Chart.js-shaped data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub labels: Vec<String>,
    pub datasets: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub sales_vs_demand: Chart,
    pub revenue_by_category: Chart,
    pub top_products: Chart,
    pub order_status: Chart,
}

impl DashboardCharts {
    /// JSON safe to embed in a `<script>` element.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub action_link: String,
    pub action_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAlert {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub current: u32,
    pub threshold: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub date: NaiveDate,
    pub message: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub link: String,
}

#[must_use]
pub fn stats(data: Snapshot<'_>) -> DashboardStats {
    DashboardStats {
        total_products: data.products.len(),
        total_units: data.products.iter().map(|p| u64::from(p.quantity)).sum(),
        inventory_value: data.products.iter().map(Product::stock_value).sum(),
        low_stock: data.products.iter().filter(|p| p.is_low_stock()).count(),
        pending_orders: data
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::PendingApproval)
            .count(),
        total_revenue: data.bills.iter().filter(|b| b.is_paid()).map(|b| b.total).sum(),
    }
}

#[must_use]
pub fn charts(data: Snapshot<'_>) -> DashboardCharts {
    DashboardCharts {
        sales_vs_demand: sales_vs_demand(data.products, data.bills),
        revenue_by_category: revenue_by_category(data.products, data.bills),
        top_products: top_products(data.bills),
        order_status: order_status(data.orders),
    }
}

/// Month key of a date, `YYYY-M` without zero padding.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{}", date.year(), date.month())
}

/// Units billed per month against units asked for. Demand adds backorders:
/// units billed beyond what is currently in stock.
#[must_use]
pub fn sales_vs_demand(products: &[Product], bills: &[Bill]) -> Chart {
    let stock: HashMap<&str, u32> = products
        .iter()
        .map(|p| (p.product_id.as_str(), p.quantity))
        .collect();

    // (year, month) keeps chronological order.
    let mut months: BTreeMap<(i32, u32), (u64, u64)> = BTreeMap::new();
    for bill in bills {
        let entry = months
            .entry((bill.issue_date.year(), bill.issue_date.month()))
            .or_default();
        for item in &bill.items {
            let on_hand = stock.get(item.product_id.as_str()).copied().unwrap_or(0);
            let backorders = item.quantity.saturating_sub(on_hand);
            entry.0 += u64::from(item.quantity);
            entry.1 += u64::from(item.quantity) + u64::from(backorders);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let series = |pick: fn(&(u64, u64)) -> u64| months.values().map(|v| pick(v) as f64).collect();
    Chart {
        labels: months.keys().map(|(y, m)| format!("{y}-{m}")).collect(),
        datasets: vec![
            Series {
                label: "Sales".to_string(),
                data: series(|v| v.0),
            },
            Series {
                label: "Demand".to_string(),
                data: series(|v| v.1),
            },
        ],
    }
}

/// Billed revenue grouped by the category of each line's product.
#[must_use]
pub fn revenue_by_category(products: &[Product], bills: &[Bill]) -> Chart {
    let revenue = category_revenue(products, bills);
    Chart {
        labels: revenue.keys().map(|c| (*c).to_string()).collect(),
        datasets: vec![Series {
            label: "Revenue".to_string(),
            data: revenue.values().map(Money::to_f64).collect(),
        }],
    }
}

fn category_revenue<'a>(products: &'a [Product], bills: &[Bill]) -> BTreeMap<&'a str, Money> {
    let categories: HashMap<&str, &str> = products
        .iter()
        .map(|p| (p.product_id.as_str(), p.category.as_str()))
        .collect();

    let mut revenue: BTreeMap<&str, Money> = BTreeMap::new();
    for item in bills.iter().flat_map(|b| &b.items) {
        let category = categories
            .get(item.product_id.as_str())
            .copied()
            .unwrap_or(OTHER_CATEGORY);
        let slot = revenue.entry(category).or_default();
        *slot = *slot + item.total;
    }
    revenue
}

/// Best sellers by units billed, with the revenue they brought in.
#[must_use]
pub fn top_products(bills: &[Bill]) -> Chart {
    let mut totals: BTreeMap<&str, (u32, Money)> = BTreeMap::new();
    for item in bills.iter().flat_map(|b| &b.items) {
        let entry = totals.entry(item.name.as_str()).or_default();
        entry.0 += item.quantity;
        entry.1 = entry.1 + item.total;
    }

    let mut ranked: Vec<(&str, (u32, Money))> = totals.into_iter().collect();
    // Stable: ties stay alphabetical.
    ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0));
    ranked.truncate(FEED_LENGTH);

    Chart {
        labels: ranked.iter().map(|(name, _)| (*name).to_string()).collect(),
        datasets: vec![
            Series {
                label: "Units Sold".to_string(),
                data: ranked.iter().map(|(_, (units, _))| f64::from(*units)).collect(),
            },
            Series {
                label: "Revenue ($)".to_string(),
                data: ranked.iter().map(|(_, (_, revenue))| revenue.to_f64()).collect(),
            },
        ],
    }
}

#[must_use]
pub fn order_status(orders: &[PurchaseOrder]) -> Chart {
    #[allow(clippy::cast_precision_loss)]
    let data = OrderStatus::ALL
        .iter()
        .map(|status| orders.iter().filter(|o| o.status == *status).count() as f64)
        .collect();
    Chart {
        labels: OrderStatus::ALL.iter().map(|s| s.label().to_string()).collect(),
        datasets: vec![Series {
            label: "Orders".to_string(),
            data,
        }],
    }
}

/// Products at or below their reorder threshold, emptiest first.
#[must_use]
pub fn stock_alerts(products: &[Product]) -> Vec<StockAlert> {
    let mut alerts: Vec<StockAlert> = products
        .iter()
        .filter(|p| p.is_low_stock())
        .map(|p| StockAlert {
            id: p.id.clone(),
            name: p.name.clone(),
            category: p.category.clone(),
            current: p.quantity,
            threshold: p.low_stock_threshold(),
        })
        .collect();
    alerts.sort_by_key(|a| a.current);
    alerts
}

#[must_use]
pub fn insights(data: Snapshot<'_>) -> Vec<Insight> {
    let mut insights = Vec::new();

    let low = data.products.iter().filter(|p| p.is_low_stock()).count();
    if low > 0 {
        insights.push(Insight {
            title: "Low stock alert".to_string(),
            description: format!(
                "{low} products are below reorder levels and need immediate attention."
            ),
            action_link: "/inventory".to_string(),
            action_text: "View inventory".to_string(),
        });
    }

    let revenue = category_revenue(data.products, data.bills);
    let total: Money = revenue.values().sum();
    if let Some((category, amount)) = revenue.iter().max_by_key(|(_, amount)| **amount)
        && total.is_positive()
        && let Some(share) = amount.percent_of(total)
    {
        insights.push(Insight {
            title: "Popular categories".to_string(),
            description: format!("{category} category accounts for {share}% of your billed revenue."),
            action_link: format!("/inventory?category={}", encode(category)),
            action_text: "View categories".to_string(),
        });
    }

    let overdue: Vec<&Bill> = data
        .bills
        .iter()
        .filter(|b| b.status == BillStatus::Overdue)
        .collect();
    if !overdue.is_empty() {
        let amount: Money = overdue.iter().map(|b| b.total).sum();
        insights.push(Insight {
            title: "Overdue invoices".to_string(),
            description: format!("{} invoices totalling {amount} are past due.", overdue.len()),
            action_link: "/billing?status=overdue".to_string(),
            action_text: "Review billing".to_string(),
        });
    }

    let pending_returns = data
        .returns
        .iter()
        .filter(|r| r.status == ReturnStatus::Pending)
        .count();
    if pending_returns > 0 {
        insights.push(Insight {
            title: "Returns awaiting review".to_string(),
            description: format!("{pending_returns} damage and return claims are still pending."),
            action_link: "/damage-returns?status=Pending".to_string(),
            action_text: "Process returns".to_string(),
        });
    }

    insights
}

/// Latest dated events across orders, bills, returns and the archive.
#[must_use]
pub fn recent_activity(data: Snapshot<'_>) -> Vec<Activity> {
    let mut feed: Vec<Activity> = Vec::new();

    for order in data.orders {
        if let Some(event) = order.latest_event() {
            feed.push(Activity {
                date: event.date,
                message: format!("{}: {}", order.id, event.status),
                link: format!("/orders/{}", order.id),
            });
        }
    }
    for bill in data.bills {
        if let Some(paid) = bill.payment_date {
            feed.push(Activity {
                date: paid,
                message: format!("Payment received for {}", bill.bill_number),
                link: format!("/billing/{}", bill.id),
            });
        }
    }
    for claim in data.returns {
        feed.push(Activity {
            date: claim.return_date,
            message: format!("Return filed for {} ({})", claim.invoice_no, claim.product),
            link: "/damage-returns".to_string(),
        });
    }
    for entry in data.archive {
        feed.push(Activity {
            date: entry.archive_date,
            message: format!("{} archived: {}", entry.display_name(), entry.reason),
            link: format!("/archives/{}", entry.id),
        });
    }

    feed.sort_by(|a, b| b.date.cmp(&a.date));
    feed.truncate(FEED_LENGTH);
    feed
}

/// Notification panel entries, warnings first.
#[must_use]
pub fn notifications(data: Snapshot<'_>) -> Vec<Notification> {
    let mut list = Vec::new();

    for product in data.products {
        if product.is_out_of_stock() {
            list.push(Notification {
                level: NotificationLevel::Warning,
                message: format!("{} is out of stock", product.name),
                link: format!("/products/{}/edit", product.id),
            });
        } else if product.is_low_stock() {
            list.push(Notification {
                level: NotificationLevel::Warning,
                message: format!("Low stock alert: {} is below threshold", product.name),
                link: format!("/products/{}/edit", product.id),
            });
        }
    }
    for bill in data.bills.iter().filter(|b| b.status == BillStatus::Overdue) {
        list.push(Notification {
            level: NotificationLevel::Warning,
            message: format!("Invoice {} for {} is overdue", bill.bill_number, bill.retailer.name),
            link: format!("/billing/{}", bill.id),
        });
    }
    for order in data
        .orders
        .iter()
        .filter(|o| o.status == OrderStatus::PendingApproval)
    {
        list.push(Notification {
            level: NotificationLevel::Info,
            message: format!("Order {} from {} awaits approval", order.id, order.supplier),
            link: format!("/orders/{}", order.id),
        });
    }
    for bill in data.bills.iter().filter(|b| b.is_paid()) {
        list.push(Notification {
            level: NotificationLevel::Success,
            message: format!("Payment received for {}", bill.bill_number),
            link: format!("/billing/{}", bill.id),
        });
    }

    list
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
