//! Billing (retailer invoices) route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use stockinvent_core::{BillId, BillStatus};

use crate::{
    components::{FilterOption, SortHeader, data_table},
    error::AppError,
    filters,
    listing::bills::{BillFilter, BillStats, BillsQuery},
    middleware::RequireAuth,
    models::{Bill, BillItem},
    services::export,
    state::AppState,
};

use super::{csv_attachment, shell::Shell, today};

/// Build the billing router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/billing", get(index))
        .route("/billing/export.csv", get(export_csv))
        .route("/billing/{id}", get(show))
        .route("/billing/{id}/print", get(print))
        .route("/billing/{id}/status", post(update_status))
}

/// Bill row view for templates.
#[derive(Debug, Clone)]
pub struct BillRowView {
    pub id: String,
    pub bill_number: String,
    pub retailer: String,
    pub issue_date: String,
    pub due_date: String,
    pub total: String,
    pub status: &'static str,
    pub status_value: &'static str,
    pub status_class: &'static str,
}

impl From<&Bill> for BillRowView {
    fn from(bill: &Bill) -> Self {
        Self {
            id: bill.id.to_string(),
            bill_number: bill.bill_number.clone(),
            retailer: bill.retailer.name.clone(),
            issue_date: bill.issue_date.to_string(),
            due_date: bill.due_date.to_string(),
            total: bill.total.to_string(),
            status: bill.status.label(),
            status_value: bill.status.as_str(),
            status_class: bill.status.badge_class(),
        }
    }
}

/// Summary cards.
#[derive(Debug, Clone)]
pub struct BillStatsView {
    pub count: usize,
    pub total_billed: String,
    pub total_paid: String,
    pub outstanding: String,
    pub overdue: usize,
}

impl From<BillStats> for BillStatsView {
    fn from(stats: BillStats) -> Self {
        Self {
            count: stats.count,
            total_billed: stats.total_billed.to_string(),
            total_paid: stats.total_paid.to_string(),
            outstanding: stats.outstanding.to_string(),
            overdue: stats.overdue,
        }
    }
}

/// Billing list page template.
#[derive(Template)]
#[template(path = "billing/index.html")]
pub struct BillingIndexTemplate {
    pub shell: Shell,
    pub bills: Vec<BillRowView>,
    pub stats: BillStatsView,
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

/// Billing list handler.
///
/// GET /billing
#[instrument(skip_all)]
async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<BillsQuery>,
) -> impl IntoResponse {
    let all = state.bills().list().await;
    let stats = BillStats::of(&all);
    let filter = BillFilter::from_query(&query);
    let rows = filter.apply(all);

    let table = data_table::bills_table();
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
        BillStatus::ALL
            .iter()
            .map(|s| FilterOption::new(s.as_str(), s.label(), status)),
    );

    let template = BillingIndexTemplate {
        shell: Shell::load(&state, &session, &user, "/billing").await,
        bills: rows.iter().map(BillRowView::from).collect(),
        stats: BillStatsView::from(stats),
        headers: table.headers(filter.sort, &active),
        statuses,
        search: filter.search.clone(),
        search_placeholder: table.search_placeholder,
        empty_title: table.empty_title,
        empty_description: table.empty_description,
        export_href: table.export_href(filter.sort, &active),
        start,
        end,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// CSV of the filtered bills.
///
/// GET /billing/export.csv
#[instrument(skip_all)]
async fn export_csv(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<BillsQuery>,
) -> Result<Response, AppError> {
    let rows = BillFilter::from_query(&query).apply(state.bills().list().await);
    tracing::info!(rows = rows.len(), "Exporting bills");
    csv_attachment("billing", export::bills(&rows))
}

/// Invoice line view.
#[derive(Debug, Clone)]
pub struct BillItemView {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub total: String,
}

impl From<&BillItem> for BillItemView {
    fn from(item: &BillItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            total: item.total.to_string(),
        }
    }
}

/// Full invoice view for the detail and print pages.
#[derive(Debug, Clone)]
pub struct BillDetailView {
    pub row: BillRowView,
    pub retailer_address: String,
    pub retailer_phone: String,
    pub retailer_email: String,
    pub items: Vec<BillItemView>,
    pub subtotal: String,
    pub tax: String,
    pub discount: String,
    pub has_discount: bool,
    pub payment_date: Option<String>,
    pub notes: String,
}

impl From<&Bill> for BillDetailView {
    fn from(bill: &Bill) -> Self {
        Self {
            row: BillRowView::from(bill),
            retailer_address: bill.retailer.address.clone(),
            retailer_phone: bill.retailer.phone.clone(),
            retailer_email: bill.retailer.email.clone(),
            items: bill.items.iter().map(BillItemView::from).collect(),
            subtotal: bill.subtotal.to_string(),
            tax: bill.tax.to_string(),
            discount: bill.discount.to_string(),
            has_discount: bill.discount.is_positive(),
            payment_date: bill.payment_date.map(|d| d.to_string()),
            notes: bill.notes.clone(),
        }
    }
}

/// Invoice detail page template.
#[derive(Template)]
#[template(path = "billing/show.html")]
pub struct BillShowTemplate {
    pub shell: Shell,
    pub bill: BillDetailView,
    pub statuses: Vec<FilterOption>,
}

/// Printable invoice.
#[derive(Template, WebTemplate)]
#[template(path = "billing/print.html")]
pub struct BillPrintTemplate {
    pub organization_name: String,
    pub gst_number: String,
    pub bill: BillDetailView,
}

/// Invoice detail handler.
///
/// GET /billing/{id}
#[instrument(skip_all, fields(id = %id))]
async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let bill = state.bills().get(&BillId::new(id)).await?;
    let current = bill.status.as_str();

    let template = BillShowTemplate {
        shell: Shell::load(&state, &session, &user, "/billing").await,
        statuses: BillStatus::ALL
            .iter()
            .map(|s| FilterOption::new(s.as_str(), s.label(), current))
            .collect(),
        bill: BillDetailView::from(&bill),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Printable invoice handler.
///
/// GET /billing/{id}/print
#[instrument(skip_all, fields(id = %id))]
async fn print(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<BillPrintTemplate, AppError> {
    let bill = state.bills().get(&BillId::new(id)).await?;
    let organization = &state.config().organization;
    Ok(BillPrintTemplate {
        organization_name: organization.name.clone(),
        gst_number: organization.gst_number.clone(),
        bill: BillDetailView::from(&bill),
    })
}

/// Form input for a status change.
#[derive(Debug, Deserialize)]
pub struct BillStatusForm {
    pub status: String,
    /// Page to return to, the list or the detail page.
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Only local billing pages are valid return targets.
fn return_target(raw: Option<&str>, id: &BillId) -> String {
    match raw {
        Some(path) if path.starts_with("/billing") && !path.starts_with("//") => path.to_string(),
        _ => format!("/billing/{id}"),
    }
}

/// Update bill status handler.
///
/// POST /billing/{id}/status
#[instrument(skip_all, fields(id = %id, status = %form.status))]
async fn update_status(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BillStatusForm>,
) -> Result<Redirect, AppError> {
    let status: BillStatus = form.status.parse().map_err(AppError::BadRequest)?;
    let id = BillId::new(id);
    let bill = state.bills().update_status(&id, status, today()).await?;
    tracing::info!(bill = %bill.bill_number, status = %bill.status, "Bill status updated");
    Ok(Redirect::to(&return_target(form.return_to.as_deref(), &id)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_return_target_stays_on_billing_pages() {
        let id = BillId::new("B001");
        assert_eq!(return_target(Some("/billing?status=overdue"), &id), "/billing?status=overdue");
        assert_eq!(return_target(Some("https://evil.example"), &id), "/billing/B001");
        assert_eq!(return_target(Some("//evil.example"), &id), "/billing/B001");
        assert_eq!(return_target(None, &id), "/billing/B001");
    }
}
