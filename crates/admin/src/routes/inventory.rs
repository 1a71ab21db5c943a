//! Inventory list route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    components::{FilterOption, SortHeader, data_table},
    error::AppError,
    filters,
    listing::inventory::{InventoryFilter, InventoryQuery, InventoryStats, PriceBounds},
    middleware::RequireAuth,
    models::{CATEGORIES, Product},
    services::{archiver::POLICY_NOTICE, export},
    state::AppState,
};

use super::{csv_attachment, shell::Shell};

/// Build the inventory router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(index))
        .route("/inventory/export.csv", get(export_csv))
}

/// Inventory row view for templates.
#[derive(Debug, Clone)]
pub struct InventoryItemView {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: String,
    pub supplier: String,
    pub is_low_stock: bool,
    pub is_active: bool,
}

impl From<&Product> for InventoryItemView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            product_id: product.product_id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            quantity: product.quantity,
            price: product.price.to_string(),
            supplier: product.supplier.clone(),
            is_low_stock: product.is_low_stock(),
            is_active: product.is_active,
        }
    }
}

/// Summary cards, preformatted.
#[derive(Debug, Clone)]
pub struct InventoryStatsView {
    pub product_count: usize,
    pub total_units: u64,
    pub inventory_value: String,
    pub low_stock: usize,
}

impl From<InventoryStats> for InventoryStatsView {
    fn from(stats: InventoryStats) -> Self {
        Self {
            product_count: stats.product_count,
            total_units: stats.total_units,
            inventory_value: stats.inventory_value.to_string(),
            low_stock: stats.low_stock,
        }
    }
}

/// Inventory index page template.
#[derive(Template)]
#[template(path = "inventory/index.html")]
pub struct InventoryIndexTemplate {
    pub shell: Shell,
    pub items: Vec<InventoryItemView>,
    pub stats: InventoryStatsView,
    pub headers: Vec<SortHeader>,
    pub categories: Vec<FilterOption>,
    pub search: String,
    pub search_placeholder: &'static str,
    pub empty_title: &'static str,
    pub empty_description: &'static str,
    pub price_floor: String,
    pub price_ceiling: String,
    pub price_min: String,
    pub price_max: String,
    pub export_href: String,
    pub policy_notice: &'static str,
}

/// Inventory page handler.
///
/// GET /inventory
#[instrument(skip_all)]
async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<InventoryQuery>,
) -> impl IntoResponse {
    let products = state.products().list().await;
    let bounds = PriceBounds::of(&products);
    let filter = InventoryFilter::from_query(&query, bounds);
    let rows = filter.apply(products);

    let table = data_table::inventory_table();
    let price_min = filter.price_min.to_input_string();
    let price_max = filter.price_max.to_input_string();
    let active = [
        ("q", filter.search.as_str()),
        ("category", filter.category.as_str()),
        ("min_price", query.min_price.as_deref().unwrap_or_default()),
        ("max_price", query.max_price.as_deref().unwrap_or_default()),
    ];

    let mut categories = vec![FilterOption::new("", "All", &filter.category)];
    categories.extend(
        CATEGORIES
            .iter()
            .map(|c| FilterOption::new(c, c, &filter.category)),
    );

    let template = InventoryIndexTemplate {
        shell: Shell::load(&state, &session, &user, "/inventory").await,
        stats: InventoryStatsView::from(InventoryStats::of(&rows)),
        items: rows.iter().map(InventoryItemView::from).collect(),
        headers: table.headers(Some(filter.sort), &active),
        categories,
        search: filter.search.clone(),
        search_placeholder: table.search_placeholder,
        empty_title: table.empty_title,
        empty_description: table.empty_description,
        price_floor: bounds.min.to_input_string(),
        price_ceiling: bounds.max.to_input_string(),
        price_min,
        price_max,
        export_href: table.export_href(Some(filter.sort), &active),
        policy_notice: POLICY_NOTICE,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// CSV of the filtered inventory.
///
/// GET /inventory/export.csv
#[instrument(skip_all)]
async fn export_csv(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Result<Response, AppError> {
    let products = state.products().list().await;
    let filter = InventoryFilter::from_query(&query, PriceBounds::of(&products));
    let rows = filter.apply(products);
    tracing::info!(rows = rows.len(), "Exporting inventory");
    csv_attachment("inventory", export::inventory(&rows))
}
