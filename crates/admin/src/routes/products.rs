//! Add, edit and delete product pages.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use stockinvent_core::ProductId;

use crate::{
    components::FilterOption,
    db::RepositoryError,
    error::AppError,
    filters,
    middleware::RequireAuth,
    models::{CATEGORIES, CurrentUser, FormErrors, ProductForm, ProductPatch},
    state::AppState,
};

use super::shell::Shell;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", post(create))
        .route("/products/new", get(new))
        .route("/products/{id}", post(update))
        .route("/products/{id}/edit", get(edit))
        .route("/products/{id}/delete", post(delete))
}

/// Form values as the inputs show them.
#[derive(Debug, Clone)]
pub struct ProductFormView {
    pub product_id: String,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub price: String,
    pub supplier: String,
    pub location: String,
    pub reorder_level: String,
    pub purchase_date: String,
    pub description: String,
    pub is_active: bool,
}

impl From<&ProductForm> for ProductFormView {
    fn from(form: &ProductForm) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            product_id: form.product_id.clone(),
            sku: text(&form.sku),
            name: form.name.clone(),
            category: form.category.clone(),
            quantity: form.quantity.clone(),
            price: form.price.clone(),
            supplier: form.supplier.clone(),
            location: text(&form.location),
            reorder_level: text(&form.reorder_level),
            purchase_date: text(&form.purchase_date),
            description: form.description.clone(),
            is_active: form.is_checked(),
        }
    }
}

/// Add/edit product page template.
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub shell: Shell,
    pub title: &'static str,
    pub action: String,
    /// Delete form target, edit page only.
    pub delete_action: Option<String>,
    pub form: ProductFormView,
    pub categories: Vec<FilterOption>,
    pub errors: FormErrors,
}

/// Where the form posts to.
enum Target {
    Create,
    Update(ProductId),
}

impl Target {
    const fn title(&self) -> &'static str {
        match self {
            Self::Create => "Add Product",
            Self::Update(_) => "Edit Product",
        }
    }

    fn action(&self) -> String {
        match self {
            Self::Create => "/products".to_string(),
            Self::Update(id) => format!("/products/{id}"),
        }
    }

    fn delete_action(&self) -> Option<String> {
        match self {
            Self::Create => None,
            Self::Update(id) => Some(format!("/products/{id}/delete")),
        }
    }
}

async fn render_form(
    state: &AppState,
    session: &Session,
    user: &CurrentUser,
    target: &Target,
    form: &ProductForm,
    errors: FormErrors,
    status: StatusCode,
) -> Response {
    let mut categories = vec![FilterOption::new("", "Select category", &form.category)];
    categories.extend(
        CATEGORIES
            .iter()
            .map(|c| FilterOption::new(c, c, &form.category)),
    );

    let template = ProductFormTemplate {
        shell: Shell::load(state, session, user, "/inventory").await,
        title: target.title(),
        action: target.action(),
        delete_action: target.delete_action(),
        form: ProductFormView::from(form),
        categories,
        errors,
    };

    let html = Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }));
    (status, html).into_response()
}

/// Product code clashes are shown against the field.
fn conflict_errors(detail: String) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.add("product_id", detail);
    errors
}

/// Blank add product form.
///
/// GET /products/new
#[instrument(skip_all)]
async fn new(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    render_form(
        &state,
        &session,
        &user,
        &Target::Create,
        &ProductForm::blank(),
        FormErrors::new(),
        StatusCode::OK,
    )
    .await
}

/// Create product handler.
///
/// POST /products
#[instrument(skip_all, fields(product_id = %form.product_id))]
async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            return Ok(render_form(
                &state,
                &session,
                &user,
                &Target::Create,
                &form,
                errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await);
        }
    };

    match state.products().create(input, chrono::Utc::now()).await {
        Ok(product) => {
            tracing::info!(id = %product.id, "Product created");
            Ok(Redirect::to("/inventory").into_response())
        }
        Err(RepositoryError::Conflict(detail)) => Ok(render_form(
            &state,
            &session,
            &user,
            &Target::Create,
            &form,
            conflict_errors(detail),
            StatusCode::CONFLICT,
        )
        .await),
        Err(e) => Err(e.into()),
    }
}

/// Edit product form handler.
///
/// GET /products/{id}/edit
#[instrument(skip_all, fields(id = %id))]
async fn edit(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = ProductId::new(id);
    let product = state.products().get(&id).await?;
    Ok(render_form(
        &state,
        &session,
        &user,
        &Target::Update(id),
        &ProductForm::from_product(&product),
        FormErrors::new(),
        StatusCode::OK,
    )
    .await)
}

/// Update product handler.
///
/// POST /products/{id}
#[instrument(skip_all, fields(id = %id))]
async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let id = ProductId::new(id);
    let target = Target::Update(id.clone());

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            return Ok(render_form(
                &state,
                &session,
                &user,
                &target,
                &form,
                errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await);
        }
    };

    match state
        .products()
        .update(&id, ProductPatch::from(input), chrono::Utc::now())
        .await
    {
        Ok(product) => {
            tracing::info!(id = %product.id, "Product updated");
            Ok(Redirect::to("/inventory").into_response())
        }
        Err(RepositoryError::Conflict(detail)) => Ok(render_form(
            &state,
            &session,
            &user,
            &target,
            &form,
            conflict_errors(detail),
            StatusCode::CONFLICT,
        )
        .await),
        Err(e) => Err(e.into()),
    }
}

/// Delete product handler.
///
/// POST /products/{id}/delete
#[instrument(skip_all, fields(id = %id))]
async fn delete(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let product = state.products().delete(&ProductId::new(id)).await?;
    tracing::info!(id = %product.id, name = %product.name, "Product deleted");
    Ok(Redirect::to("/inventory"))
}
