//! Purchase order route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use stockinvent_core::{OrderId, OrderStatus};

use crate::{
    components::{FilterOption, SortHeader, data_table},
    error::AppError,
    filters,
    listing::orders::{OrderFilter, OrderStats, OrdersQuery},
    middleware::RequireAuth,
    models::{OrderItem, PurchaseOrder, ShipmentEvent},
    services::export,
    state::AppState,
};

use super::{csv_attachment, shell::Shell};

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index))
        .route("/orders/export.csv", get(export_csv))
        .route("/orders/{id}", get(show))
        .route("/orders/{id}/print", get(print))
}

/// Order row view for templates.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: String,
    pub supplier: String,
    pub warehouse: String,
    pub order_date: String,
    pub expected_delivery: String,
    pub total: String,
    pub status: &'static str,
    pub status_class: &'static str,
}

impl From<&PurchaseOrder> for OrderRowView {
    fn from(order: &PurchaseOrder) -> Self {
        Self {
            id: order.id.to_string(),
            supplier: order.supplier.clone(),
            warehouse: order.warehouse.clone(),
            order_date: order.order_date.to_string(),
            expected_delivery: order
                .expected_delivery
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            total: order.total.to_string(),
            status: order.status.label(),
            status_class: order.status.badge_class(),
        }
    }
}

/// Summary cards.
#[derive(Debug, Clone)]
pub struct OrderStatsView {
    pub total: usize,
    pub delivered: usize,
    pub in_transit: usize,
    pub processing: usize,
    pub pending_approval: usize,
    pub value: String,
}

impl From<OrderStats> for OrderStatsView {
    fn from(stats: OrderStats) -> Self {
        Self {
            total: stats.total,
            delivered: stats.delivered,
            in_transit: stats.in_transit,
            processing: stats.processing,
            pending_approval: stats.pending_approval,
            value: stats.value.to_string(),
        }
    }
}

/// Orders list page template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub shell: Shell,
    pub orders: Vec<OrderRowView>,
    pub stats: OrderStatsView,
    pub headers: Vec<SortHeader>,
    pub statuses: Vec<FilterOption>,
    pub search: String,
    pub start: String,
    pub end: String,
    pub search_placeholder: &'static str,
    pub empty_title: &'static str,
    pub empty_description: &'static str,
    pub export_href: String,
}

/// Orders list handler.
///
/// GET /orders
#[instrument(skip_all)]
async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<OrdersQuery>,
) -> impl IntoResponse {
    let all = state.orders().list().await;
    let stats = OrderStats::of(&all);
    let filter = OrderFilter::from_query(&query);
    let rows = filter.apply(all);

    let table = data_table::orders_table();
    let start = filter.dates.start.map(|d| d.to_string()).unwrap_or_default();
    let end = filter.dates.end.map(|d| d.to_string()).unwrap_or_default();
    let status = filter.status_value();
    let active = [
        ("q", filter.search.as_str()),
        ("status", if status == "all" { "" } else { status }),
        ("start", start.as_str()),
        ("end", end.as_str()),
    ];

    let mut statuses = vec![FilterOption::new("all", "All Statuses", status)];
    statuses.extend(
        OrderStatus::ALL
            .iter()
            .map(|s| FilterOption::new(s.as_str(), s.label(), status)),
    );

    let template = OrdersIndexTemplate {
        shell: Shell::load(&state, &session, &user, "/orders").await,
        orders: rows.iter().map(OrderRowView::from).collect(),
        stats: OrderStatsView::from(stats),
        headers: table.headers(Some(filter.sort), &active),
        statuses,
        search: filter.search.clone(),
        search_placeholder: table.search_placeholder,
        empty_title: table.empty_title,
        empty_description: table.empty_description,
        export_href: table.export_href(Some(filter.sort), &active),
        start,
        end,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// CSV of the filtered orders.
///
/// GET /orders/export.csv
#[instrument(skip_all)]
async fn export_csv(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Response, AppError> {
    let rows = OrderFilter::from_query(&query).apply(state.orders().list().await);
    tracing::info!(rows = rows.len(), "Exporting orders");
    csv_attachment("purchase-orders", export::orders(&rows))
}

/// Detail page tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderTab {
    #[default]
    Details,
    Tracking,
    Products,
}

impl OrderTab {
    pub const ALL: [Self; 3] = [Self::Details, Self::Tracking, Self::Products];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::Tracking => "tracking",
            Self::Products => "products",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Details => "Order Details",
            Self::Tracking => "Shipment Tracking",
            Self::Products => "Products",
        }
    }
}

/// Query parameters for the detail page.
#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    pub tab: Option<String>,
}

/// Tab link.
#[derive(Debug, Clone)]
pub struct TabView {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Order line view.
#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub name: String,
    pub quantity: u32,
    pub unit_of_measure: String,
    pub price: String,
    pub line_total: String,
    pub specifications: Vec<(String, String)>,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            unit_of_measure: item.unit_of_measure.clone(),
            price: item.price.to_string(),
            line_total: item.line_total().to_string(),
            specifications: item
                .specifications
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Tracking event view.
#[derive(Debug, Clone)]
pub struct ShipmentView {
    pub date: String,
    pub status: String,
    pub details: String,
}

impl From<&ShipmentEvent> for ShipmentView {
    fn from(event: &ShipmentEvent) -> Self {
        Self {
            date: event.date.to_string(),
            status: event.status.clone(),
            details: event.details.clone(),
        }
    }
}

/// Full order view for the detail and print pages.
#[derive(Debug, Clone)]
pub struct OrderDetailView {
    pub row: OrderRowView,
    pub actual_delivery: String,
    pub notes: String,
    pub items: Vec<OrderItemView>,
    pub items_total: String,
    pub unit_count: u32,
    pub shipment: Vec<ShipmentView>,
}

impl From<&PurchaseOrder> for OrderDetailView {
    fn from(order: &PurchaseOrder) -> Self {
        Self {
            row: OrderRowView::from(order),
            actual_delivery: order
                .actual_delivery
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            notes: order.notes.clone(),
            items: order.items.iter().map(OrderItemView::from).collect(),
            items_total: order.items_total().to_string(),
            unit_count: order.unit_count(),
            shipment: order.shipment.iter().map(ShipmentView::from).collect(),
        }
    }
}

/// Order detail page template.
#[derive(Template)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub shell: Shell,
    pub order: OrderDetailView,
    pub tab: &'static str,
    pub tabs: Vec<TabView>,
}

/// Printable purchase order.
#[derive(Template, WebTemplate)]
#[template(path = "orders/print.html")]
pub struct OrderPrintTemplate {
    pub organization_name: String,
    pub gst_number: String,
    pub order: OrderDetailView,
}

/// Order detail handler.
///
/// GET /orders/{id}
#[instrument(skip_all, fields(id = %id))]
async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<Html<String>, AppError> {
    let order = state.orders().get(&OrderId::new(id)).await?;
    let tab = query
        .tab
        .as_deref()
        .and_then(|raw| OrderTab::ALL.into_iter().find(|t| t.as_str() == raw))
        .unwrap_or_default();

    let tabs = OrderTab::ALL
        .into_iter()
        .map(|t| TabView {
            label: t.label(),
            href: format!("/orders/{}?tab={}", order.id, t.as_str()),
            active: t == tab,
        })
        .collect();

    let template = OrderShowTemplate {
        shell: Shell::load(&state, &session, &user, "/orders").await,
        order: OrderDetailView::from(&order),
        tab: tab.as_str(),
        tabs,
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Printable purchase order handler.
///
/// GET /orders/{id}/print
#[instrument(skip_all, fields(id = %id))]
async fn print(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<OrderPrintTemplate, AppError> {
    let order = state.orders().get(&OrderId::new(id)).await?;
    let organization = &state.config().organization;
    Ok(OrderPrintTemplate {
        organization_name: organization.name.clone(),
        gst_number: organization.gst_number.clone(),
        order: OrderDetailView::from(&order),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::fixtures;

    #[test]
    fn test_detail_view_formats_missing_delivery() {
        let mut order = fixtures::purchase_orders().remove(0);
        order.actual_delivery = None;
        let view = OrderDetailView::from(&order);
        assert_eq!(view.actual_delivery, "-");
        assert_eq!(view.items.len(), order.items.len());
        assert_eq!(view.row.status, order.status.label());
    }

    #[test]
    fn test_tab_names() {
        assert_eq!(OrderTab::default(), OrderTab::Details);
        assert_eq!(
            OrderTab::ALL.map(OrderTab::as_str),
            ["details", "tracking", "products"]
        );
    }
}
