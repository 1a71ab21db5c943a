//! Archive route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use stockinvent_core::{ArchiveEntryId, ArchiveKind};

use crate::{
    components::{FilterOption, SortHeader, data_table},
    error::AppError,
    filters,
    listing::archive::{ArchiveFilter, ArchivePeriod, ArchiveQuery, RETENTION_POLICY},
    middleware::RequireAuth,
    models::{ArchiveEntry, ArchivedRecord},
    services::{archiver, export},
    state::AppState,
};

use super::{csv_attachment, shell::Shell, today};

/// Build the archive router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/archives", get(index))
        .route("/archives/export.csv", get(export_csv))
        .route("/archives/{id}", get(show))
        .route("/archives/{id}/restore", post(restore))
        .route("/archives/{id}/delete", post(delete))
}

/// Archive row view for templates.
#[derive(Debug, Clone)]
pub struct ArchiveRowView {
    pub id: String,
    pub name: String,
    pub kind: &'static str,
    pub kind_class: &'static str,
    pub summary: String,
    pub archive_date: String,
    pub reason: String,
    pub archived_by: String,
    /// Restoring puts the product back into the catalogue.
    pub is_product: bool,
}

impl From<&ArchiveEntry> for ArchiveRowView {
    fn from(entry: &ArchiveEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.display_name().to_string(),
            kind: entry.kind().label(),
            kind_class: entry.kind().badge_class(),
            summary: entry.record.summary(),
            archive_date: entry.archive_date.to_string(),
            reason: entry.reason.clone(),
            archived_by: entry.archived_by.clone(),
            is_product: entry.kind() == ArchiveKind::Product,
        }
    }
}

/// Retention policy line.
#[derive(Debug, Clone)]
pub struct RetentionView {
    pub label: &'static str,
    pub period: &'static str,
}

/// Archive list page template.
#[derive(Template)]
#[template(path = "archives/index.html")]
pub struct ArchiveIndexTemplate {
    pub shell: Shell,
    pub entries: Vec<ArchiveRowView>,
    pub total: usize,
    pub headers: Vec<SortHeader>,
    pub kinds: Vec<FilterOption>,
    pub periods: Vec<FilterOption>,
    pub search: String,
    pub start: String,
    pub end: String,
    pub search_placeholder: &'static str,
    pub empty_title: &'static str,
    pub empty_description: &'static str,
    pub export_href: String,
    pub retention: Vec<RetentionView>,
}

/// Archive list handler.
///
/// GET /archives
#[instrument(skip_all)]
async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ArchiveQuery>,
) -> impl IntoResponse {
    let all = state.archive().list().await;
    let total = all.len();
    let filter = ArchiveFilter::from_query(&query, today());
    let rows = filter.apply(all);

    let table = data_table::archive_table();
    let start = filter.dates.start.map(|d| d.to_string()).unwrap_or_default();
    let end = filter.dates.end.map(|d| d.to_string()).unwrap_or_default();
    let kind = filter.kind_value();
    let period = filter.period.as_str();
    let active = [
        ("q", filter.search.as_str()),
        ("kind", if kind == "all" { "" } else { kind }),
        ("start", start.as_str()),
        ("end", end.as_str()),
        ("period", if period == "all" { "" } else { period }),
    ];

    let mut kinds = vec![FilterOption::new("all", "All Types", kind)];
    kinds.extend(
        ArchiveKind::ALL
            .iter()
            .map(|k| FilterOption::new(k.as_str(), k.label(), kind)),
    );
    let periods = ArchivePeriod::ALL
        .iter()
        .map(|p| FilterOption::new(p.as_str(), p.label(), period))
        .collect();

    let template = ArchiveIndexTemplate {
        shell: Shell::load(&state, &session, &user, "/archives").await,
        entries: rows.iter().map(ArchiveRowView::from).collect(),
        total,
        headers: table.headers(Some(filter.sort), &active),
        kinds,
        periods,
        search: filter.search.clone(),
        search_placeholder: table.search_placeholder,
        empty_title: table.empty_title,
        empty_description: table.empty_description,
        export_href: table.export_href(Some(filter.sort), &active),
        retention: RETENTION_POLICY
            .iter()
            .map(|&(label, period)| RetentionView { label, period })
            .collect(),
        start,
        end,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// CSV of the filtered archive.
///
/// GET /archives/export.csv
#[instrument(skip_all)]
async fn export_csv(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ArchiveQuery>,
) -> Result<Response, AppError> {
    let rows = ArchiveFilter::from_query(&query, today()).apply(state.archive().list().await);
    tracing::info!(rows = rows.len(), "Exporting archive");
    csv_attachment("archives", export::archive(&rows))
}

/// Labelled fields of the archived record.
fn record_fields(record: &ArchivedRecord) -> Vec<(&'static str, String)> {
    match record {
        ArchivedRecord::Product(p) => vec![
            ("Product ID", p.product_id.clone()),
            ("Name", p.name.clone()),
            ("Category", p.category.clone()),
            ("Last Quantity", p.last_quantity.to_string()),
            ("Price", p.price.to_string()),
            ("Supplier", p.supplier.clone()),
            (
                "Status",
                if p.discontinued { "Discontinued" } else { "Active" }.to_string(),
            ),
        ],
        ArchivedRecord::Order(o) => vec![
            ("Order Number", o.order_number.clone()),
            ("Warehouse", o.warehouse.clone()),
            ("Order Date", o.order_date.to_string()),
            ("Total", o.total.to_string()),
            ("Status", o.status.label().to_string()),
        ],
        ArchivedRecord::Invoice(i) => vec![
            ("Invoice Number", i.invoice_number.clone()),
            ("Retailer", i.retailer.clone()),
            ("Issue Date", i.issue_date.to_string()),
            ("Total", i.total.to_string()),
            ("Status", i.status.label().to_string()),
        ],
        ArchivedRecord::Supplier(s) => vec![
            ("Name", s.name.clone()),
            ("Contact", s.contact.clone()),
            ("Email", s.email.clone()),
            ("Phone", s.phone.clone()),
            ("Status", s.status.clone()),
        ],
        ArchivedRecord::License(l) => vec![
            ("License ID", l.license_id.clone()),
            ("Name", l.name.clone()),
            ("Category", l.category.clone()),
            ("Purchase Date", l.purchase_date.to_string()),
            ("Expiry Date", l.expiry_label()),
            ("Seats", l.seats.to_string()),
            ("Cost", l.cost.to_string()),
            ("Vendor", l.vendor.clone()),
        ],
    }
}

/// Archive entry detail template.
#[derive(Template)]
#[template(path = "archives/show.html")]
pub struct ArchiveShowTemplate {
    pub shell: Shell,
    pub entry: ArchiveRowView,
    pub fields: Vec<(&'static str, String)>,
}

/// Archive entry detail handler.
///
/// GET /archives/{id}
#[instrument(skip_all, fields(id = %id))]
async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let entry = state.archive().get(&ArchiveEntryId::new(id)).await?;
    let template = ArchiveShowTemplate {
        shell: Shell::load(&state, &session, &user, "/archives").await,
        fields: record_fields(&entry.record),
        entry: ArchiveRowView::from(&entry),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Restore an entry; products go back into the catalogue.
///
/// POST /archives/{id}/restore
#[instrument(skip_all, fields(id = %id))]
async fn restore(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let restored = archiver::restore(
        state.products(),
        state.archive(),
        &ArchiveEntryId::new(id),
        chrono::Utc::now(),
    )
    .await?;

    Ok(match restored.product {
        Some(product) => Redirect::to(&format!("/products/{}/edit", product.id)),
        None => Redirect::to("/archives"),
    })
}

/// Permanently delete an entry.
///
/// POST /archives/{id}/delete
#[instrument(skip_all, fields(id = %id))]
async fn delete(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    archiver::delete(state.archive(), &ArchiveEntryId::new(id)).await?;
    Ok(Redirect::to("/archives"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::fixtures;

    #[test]
    fn test_row_view_marks_product_entries() {
        let entries = fixtures::archive_entries();
        for entry in &entries {
            let row = ArchiveRowView::from(entry);
            assert_eq!(row.is_product, entry.kind() == ArchiveKind::Product);
            assert_eq!(row.name, entry.display_name());
        }
    }

    #[test]
    fn test_license_fields_show_expiry() {
        let entries = fixtures::archive_entries();
        let license = entries
            .iter()
            .find(|e| e.kind() == ArchiveKind::License)
            .unwrap();
        let fields = record_fields(&license.record);
        assert!(fields.iter().any(|(label, _)| *label == "Expiry Date"));
        assert_eq!(fields[0].0, "License ID");
    }
}
