//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            Redirect to dashboard or login
//!
//! # Auth
//! GET  /login                       Login page (email | phone, Google)
//! POST /login/password              Email/password sign-in
//! POST /login/phone/send            Send OTP
//! POST /login/phone/resend          Resend OTP
//! POST /login/phone/verify          Verify OTP
//! GET  /auth/google                 Start Google sign-in
//! GET  /auth/google/callback        Finish Google sign-in
//! POST /auth/logout                 Sign out
//!
//! # Pages
//! GET  /dashboard
//! GET  /inventory                   ?q&category&min_price&max_price&sort&dir
//! GET  /inventory/export.csv
//! GET  /products/new                POST /products
//! GET  /products/{id}/edit          POST /products/{id}
//! POST /products/{id}/delete
//! GET  /orders                      ?q&status&start&end&sort&dir
//! GET  /orders/export.csv
//! GET  /orders/{id}                 ?tab=details|tracking|products
//! GET  /orders/{id}/print
//! GET  /billing                     ?q&status&start&end&sort&dir
//! GET  /billing/export.csv
//! GET  /billing/{id}
//! GET  /billing/{id}/print
//! POST /billing/{id}/status
//! GET  /damage-returns              ?q&status
//! GET  /damage-returns/export.csv
//! POST /damage-returns
//! POST /damage-returns/{id}/status
//! GET  /archives                    ?q&kind&start&end&period&sort&dir
//! GET  /archives/export.csv
//! GET  /archives/{id}
//! POST /archives/{id}/restore
//! POST /archives/{id}/delete
//!
//! # JSON API
//! GET  /api/products                ?q&category
//! POST /api/products
//! GET|PUT|DELETE /api/products/{id}
//! POST /api/preferences/sidebar
//! ```

pub mod api;
pub mod archive;
pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod returns;
pub mod shell;

use axum::{
    Router,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{error::AppError, services::export, state::AppState};

/// Build every page and API route.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(inventory::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(billing::router())
        .merge(returns::router())
        .merge(archive::router())
        .merge(api::router())
}

/// CSV download named `{prefix}-{today}.csv`.
pub(crate) fn csv_attachment(
    prefix: &str,
    body: Result<Vec<u8>, export::ExportError>,
) -> Result<Response, AppError> {
    let body = body?;
    let filename = export::filename(prefix, today());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}

/// Today's date in server local time.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
