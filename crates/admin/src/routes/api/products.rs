//! Product JSON API.
//!
//! Every response is wrapped in [`ApiResult`], failures included, so clients
//! can branch on `success` without looking at the status code.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use stockinvent_core::ProductId;

use crate::{
    db::RepositoryError,
    middleware::RequireAuth,
    models::{FormErrors, NewProduct, Product, ProductPatch},
    state::AppState,
};

/// Build the product API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        .route(
            "/api/products/{id}",
            get(show).put(update).delete(destroy),
        )
}

/// Response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Field-level validation messages.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<&'static str, String>,
}

impl<T: Serialize> ApiResult<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            errors: BTreeMap::new(),
        }
    }
}

/// Error half of the envelope, paired with its status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    errors: BTreeMap<&'static str, String>,
}

impl ApiError {
    fn invalid(errors: &FormErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "Validation failed".to_string(),
            errors: errors
                .iter()
                .map(|(field, message)| (field, message.to_string()))
                .collect(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        let (status, message) = match &error {
            RepositoryError::NotFound => (StatusCode::NOT_FOUND, "Product not found".to_string()),
            RepositoryError::Conflict(detail) => (StatusCode::CONFLICT, detail.clone()),
            RepositoryError::Io(_) | RepositoryError::Json(_) => {
                let event_id = sentry::capture_error(&error);
                tracing::error!(error = %error, sentry_event_id = %event_id, "Product API storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        Self {
            status,
            message,
            errors: BTreeMap::new(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected product API payload");
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
            errors: BTreeMap::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResult::<()> {
            success: false,
            data: None,
            error: Some(self.message),
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}

type ApiResponse<T> = Result<Json<ApiResult<T>>, ApiError>;

/// Search parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub category: String,
}

/// GET /api/products
#[instrument(skip_all, fields(q = %query.q, category = %query.category))]
async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResponse<Vec<Product>> {
    let products = state.products().search(&query.q, &query.category).await;
    Ok(Json(ApiResult::ok(products)))
}

/// POST /api/products
#[instrument(skip_all, fields(product_id = tracing::field::Empty))]
async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResult<Product>>), ApiError> {
    let Json(input) = payload?;
    tracing::Span::current().record("product_id", input.product_id.as_str());
    input.validate().map_err(|e| ApiError::invalid(&e))?;
    let product = state.products().create(input, chrono::Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(ApiResult::ok(product))))
}

/// GET /api/products/{id}
#[instrument(skip_all, fields(id = %id))]
async fn show(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<Product> {
    let product = state.products().get(&ProductId::new(id)).await?;
    Ok(Json(ApiResult::ok(product)))
}

/// PUT /api/products/{id}
#[instrument(skip_all, fields(id = %id))]
async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResponse<Product> {
    let Json(patch) = payload?;
    patch.validate().map_err(|e| ApiError::invalid(&e))?;
    let product = state
        .products()
        .update(&ProductId::new(id), patch, chrono::Utc::now())
        .await?;
    Ok(Json(ApiResult::ok(product)))
}

/// DELETE /api/products/{id}
#[instrument(skip_all, fields(id = %id))]
async fn destroy(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<Product> {
    let removed = state.products().delete(&ProductId::new(id)).await?;
    tracing::info!(id = %removed.id, "Deleted product via API");
    Ok(Json(ApiResult::ok(removed)))
}
