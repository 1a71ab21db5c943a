//! Damage and returns route handlers.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use stockinvent_core::{ReturnId, ReturnIssue, ReturnStatus};

use crate::{
    components::FilterOption,
    error::AppError,
    filters,
    listing::returns::{ReturnFilter, ReturnStats, ReturnsQuery},
    middleware::RequireAuth,
    models::{CurrentUser, DamageReturn, FormErrors, ReturnForm},
    services::export,
    state::AppState,
};

use super::{csv_attachment, shell::Shell};

/// Build the damage/returns router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/damage-returns", get(index).post(create))
        .route("/damage-returns/export.csv", get(export_csv))
        .route("/damage-returns/{id}/status", post(update_status))
}

/// Claim row view for templates.
#[derive(Debug, Clone)]
pub struct ReturnRowView {
    pub id: i32,
    pub invoice_no: String,
    pub order_date: String,
    pub delivery_date: String,
    pub issue: &'static str,
    pub product: String,
    pub quantity: u32,
    pub return_date: String,
    pub description: String,
    pub status: &'static str,
    pub status_class: &'static str,
    pub refund_amount: String,
}

impl From<&DamageReturn> for ReturnRowView {
    fn from(claim: &DamageReturn) -> Self {
        Self {
            id: claim.id.as_i32(),
            invoice_no: claim.invoice_no.clone(),
            order_date: claim.order_date.to_string(),
            delivery_date: claim.delivery_date.to_string(),
            issue: claim.issue.label(),
            product: claim.product.clone(),
            quantity: claim.quantity,
            return_date: claim.return_date.to_string(),
            description: claim.description.clone(),
            status: claim.status.as_str(),
            status_class: claim.status.badge_class(),
            refund_amount: claim.refund_amount.to_string(),
        }
    }
}

/// Summary cards.
#[derive(Debug, Clone)]
pub struct ReturnStatsView {
    pub total: usize,
    pub pending: usize,
    pub processed: usize,
    pub rejected: usize,
    pub pending_refunds: String,
}

impl From<ReturnStats> for ReturnStatsView {
    fn from(stats: ReturnStats) -> Self {
        Self {
            total: stats.total,
            pending: stats.pending,
            processed: stats.processed,
            rejected: stats.rejected,
            pending_refunds: stats.pending_refunds.to_string(),
        }
    }
}

/// Damage & returns page template. The "New Return" form lives on the
/// same page and opens itself when it has errors.
#[derive(Template)]
#[template(path = "damage_returns.html")]
pub struct ReturnsIndexTemplate {
    pub shell: Shell,
    pub claims: Vec<ReturnRowView>,
    pub stats: ReturnStatsView,
    pub statuses: Vec<FilterOption>,
    pub search: String,
    pub export_href: String,
    pub form: ReturnForm,
    pub issues: Vec<FilterOption>,
    pub errors: FormErrors,
}

async fn render_index(
    state: &AppState,
    session: &Session,
    user: &CurrentUser,
    query: &ReturnsQuery,
    form: ReturnForm,
    errors: FormErrors,
    status: StatusCode,
) -> Response {
    let all = state.returns().list().await;
    let stats = ReturnStats::of(&all);
    let filter = ReturnFilter::from_query(query);
    let rows = filter.apply(all);

    let current = filter.status_value();
    let mut statuses = vec![FilterOption::new("", "All Statuses", current)];
    statuses.extend(
        ReturnStatus::ALL
            .iter()
            .map(|s| FilterOption::new(s.as_str(), s.as_str(), current)),
    );

    let mut issues = vec![FilterOption::new("", "Select issue", &form.issue)];
    issues.extend(
        ReturnIssue::ALL
            .iter()
            .map(|i| FilterOption::new(i.label(), i.label(), &form.issue)),
    );

    let export_href = format!(
        "/damage-returns/export.csv{}",
        crate::listing::query_string(&[("q", filter.search.as_str()), ("status", current)])
    );

    let template = ReturnsIndexTemplate {
        shell: Shell::load(state, session, user, "/damage-returns").await,
        claims: rows.iter().map(ReturnRowView::from).collect(),
        stats: ReturnStatsView::from(stats),
        statuses,
        search: filter.search.clone(),
        export_href,
        form,
        issues,
        errors,
    };

    let html = Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }));
    (status, html).into_response()
}

/// Damage & returns list handler.
///
/// GET /damage-returns
#[instrument(skip_all)]
async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ReturnsQuery>,
) -> Response {
    render_index(
        &state,
        &session,
        &user,
        &query,
        ReturnForm::default(),
        FormErrors::new(),
        StatusCode::OK,
    )
    .await
}

/// File a new claim.
///
/// POST /damage-returns
#[instrument(skip_all, fields(invoice = %form.invoice_no))]
async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ReturnForm>,
) -> Response {
    match form.validate() {
        Ok(claim) => {
            let record = state.returns().create(claim).await;
            tracing::info!(id = %record.id, "Return filed");
            Redirect::to("/damage-returns").into_response()
        }
        Err(errors) => {
            render_index(
                &state,
                &session,
                &user,
                &ReturnsQuery::default(),
                form,
                errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
    }
}

/// CSV of the filtered claims.
///
/// GET /damage-returns/export.csv
#[instrument(skip_all)]
async fn export_csv(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ReturnsQuery>,
) -> Result<Response, AppError> {
    let rows = ReturnFilter::from_query(&query).apply(state.returns().list().await);
    tracing::info!(rows = rows.len(), "Exporting returns");
    csv_attachment("damage-returns", export::returns(&rows))
}

/// Form input for a status change.
#[derive(Debug, Deserialize)]
pub struct ReturnStatusForm {
    pub status: String,
}

/// Update claim status handler.
///
/// POST /damage-returns/{id}/status
#[instrument(skip_all, fields(id = id, status = %form.status))]
async fn update_status(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ReturnStatusForm>,
) -> Result<Redirect, AppError> {
    let status: ReturnStatus = form.status.parse().map_err(AppError::BadRequest)?;
    let claim = state
        .returns()
        .update_status(ReturnId::new(id), status)
        .await?;
    tracing::info!(id = %claim.id, status = %claim.status, "Return status updated");
    Ok(Redirect::to("/damage-returns"))
}
