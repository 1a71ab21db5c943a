//! Dashboard route handlers.

use askama::Template;
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    filters,
    middleware::{OptionalAuth, RequireAuth},
    services::dashboard::{self, Activity, DashboardStats, Insight, StockAlert},
    state::AppState,
};

use super::shell::{Records, Shell};

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/dashboard", get(dashboard))
}

/// Headline metrics, preformatted.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub total_products: String,
    pub total_units: String,
    pub inventory_value: String,
    pub low_stock: String,
    pub pending_orders: String,
    pub total_revenue: String,
}

impl From<DashboardStats> for DashboardMetrics {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_products: stats.total_products.to_string(),
            total_units: stats.total_units.to_string(),
            inventory_value: stats.inventory_value.to_string(),
            low_stock: stats.low_stock.to_string(),
            pending_orders: stats.pending_orders.to_string(),
            total_revenue: stats.total_revenue.to_string(),
        }
    }
}

/// Low stock row.
#[derive(Debug, Clone)]
pub struct StockAlertView {
    pub edit_href: String,
    pub name: String,
    pub category: String,
    pub current: u32,
    pub threshold: u32,
    pub is_out: bool,
}

impl From<StockAlert> for StockAlertView {
    fn from(alert: StockAlert) -> Self {
        Self {
            edit_href: format!("/products/{}/edit", alert.id),
            name: alert.name,
            category: alert.category,
            current: alert.current,
            threshold: alert.threshold,
            is_out: alert.current == 0,
        }
    }
}

/// Activity item for dashboard.
#[derive(Debug, Clone)]
pub struct ActivityView {
    pub date: String,
    pub message: String,
    pub link: String,
}

impl From<Activity> for ActivityView {
    fn from(activity: Activity) -> Self {
        Self {
            date: activity.date.to_string(),
            message: activity.message,
            link: activity.link,
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub shell: Shell,
    pub organization_name: String,
    pub gst_number: String,
    pub metrics: DashboardMetrics,
    /// Chart data for the client-side charts, safe to embed in a script tag.
    pub charts_json: String,
    pub insights: Vec<Insight>,
    pub stock_alerts: Vec<StockAlertView>,
    pub recent_activity: Vec<ActivityView>,
}

/// Send signed-in users to the dashboard, everyone else to the login page.
///
/// GET /
async fn index(OptionalAuth(user): OptionalAuth) -> Redirect {
    if user.is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

/// Dashboard page handler.
///
/// GET /dashboard
#[instrument(skip_all)]
async fn dashboard(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let records = Records::load(&state).await;
    let snapshot = records.snapshot();

    let charts_json = dashboard::charts(snapshot)
        .to_script_json()
        .unwrap_or_else(|e| {
            tracing::error!("Failed to serialize dashboard charts: {e}");
            "{}".to_string()
        });

    let organization = &state.config().organization;
    let template = DashboardTemplate {
        shell: Shell::with_records(&state, &session, &user, "/dashboard", &records).await,
        organization_name: organization.name.clone(),
        gst_number: organization.gst_number.clone(),
        metrics: DashboardMetrics::from(dashboard::stats(snapshot)),
        charts_json,
        insights: dashboard::insights(snapshot),
        stock_alerts: dashboard::stock_alerts(&records.products)
            .into_iter()
            .map(StockAlertView::from)
            .collect(),
        recent_activity: dashboard::recent_activity(snapshot)
            .into_iter()
            .map(ActivityView::from)
            .collect(),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}
