//! Authentication route handlers.
//!
//! Email/password and phone OTP post back to the login page; Google uses a
//! redirect round trip through Firebase. Failures re-render the login page
//! with the mapped user message.

use askama::Template;
use axum::{
    Form, Router,
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use rand::{Rng, distr::Alphanumeric};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use stockinvent_core::{Email, OtpCode, PhoneNumber};

use crate::{
    error::{AppError, clear_sentry_user, set_sentry_user},
    filters,
    middleware::{OptionalAuth, clear_current_user, set_current_user},
    models::{CurrentUser, PhoneVerification, session_keys},
    services::{AuthError, AuthStep, auth::TEST_PHONE_NUMBERS},
    state::AppState,
};

/// Length of the Google sign-in CSRF token.
const CSRF_TOKEN_LENGTH: usize = 32;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page))
        .route("/login/password", post(password_login))
        .route("/login/phone/send", post(send_otp))
        .route("/login/phone/resend", post(resend_otp))
        .route("/login/phone/verify", post(verify_otp))
        .route("/auth/google", get(google_start))
        .route("/auth/google/callback", get(google_callback))
        .route("/auth/logout", post(logout))
}

/// Which form the login page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginTab {
    Email,
    Phone,
}

impl LoginTab {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// Test credentials listed on the login page in mock mode.
#[derive(Debug, Clone)]
pub struct TestNumberView {
    pub phone: &'static str,
    pub otp: &'static str,
}

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub tab: &'static str,
    pub error: Option<String>,
    pub email: String,
    pub phone_number: String,
    /// Number the pending OTP was sent to, when waiting for the code.
    pub otp_sent_to: Option<String>,
    pub recaptcha_site_key: Option<String>,
    pub is_mock: bool,
    pub test_numbers: Vec<TestNumberView>,
}

/// Values carried into a re-rendered login page.
#[derive(Debug, Default)]
struct LoginContext {
    error: Option<String>,
    email: String,
    phone_number: String,
}

async fn render_login(
    state: &AppState,
    session: &Session,
    tab: LoginTab,
    context: LoginContext,
    status: StatusCode,
) -> Response {
    let pending = session
        .get::<PhoneVerification>(session_keys::PHONE_VERIFICATION)
        .await
        .ok()
        .flatten();

    let identity = state.identity();
    let template = LoginTemplate {
        tab: if pending.is_some() {
            LoginTab::Phone.as_str()
        } else {
            tab.as_str()
        },
        error: context.error,
        email: context.email,
        phone_number: context.phone_number,
        otp_sent_to: pending.map(|p| p.phone_number.display()),
        recaptcha_site_key: identity.recaptcha_site_key().map(String::from),
        is_mock: identity.is_mock(),
        test_numbers: if identity.is_mock() {
            TEST_PHONE_NUMBERS
                .iter()
                .map(|&(phone, otp, _)| TestNumberView { phone, otp })
                .collect()
        } else {
            Vec::new()
        },
    };

    let html = Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }));
    (status, html).into_response()
}

/// Status for a failed sign-in attempt.
const fn failure_status(error: &AuthError) -> StatusCode {
    if error.is_user_error() {
        StatusCode::UNAUTHORIZED
    } else {
        StatusCode::BAD_GATEWAY
    }
}

/// Store the user and head for the dashboard.
async fn complete_sign_in(session: &Session, user: &CurrentUser) -> Result<Response, AppError> {
    session
        .remove::<PhoneVerification>(session_keys::PHONE_VERIFICATION)
        .await?;
    set_current_user(session, user).await?;
    set_sentry_user(user.uid.as_str(), user.email.as_ref().map(Email::as_str));
    tracing::info!(uid = %user.uid, provider = %user.provider, "User signed in");
    Ok(Redirect::to("/dashboard").into_response())
}

/// Query parameters for the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub tab: Option<String>,
}

/// Render the login page.
///
/// GET /login
async fn login_page(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LoginQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let tab = match query.tab.as_deref() {
        Some("phone") => LoginTab::Phone,
        _ => LoginTab::Email,
    };
    render_login(&state, &session, tab, LoginContext::default(), StatusCode::OK).await
}

/// Form input for email/password sign-in.
#[derive(Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Email/password sign-in.
///
/// POST /login/password
#[instrument(skip_all)]
async fn password_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PasswordForm>,
) -> Result<Response, AppError> {
    let password = SecretString::from(form.password);
    let result = match Email::parse(&form.email) {
        Ok(email) => {
            state
                .identity()
                .sign_in_with_password(&email, &password)
                .await
        }
        Err(e) => Err(AuthError::from(e)),
    };

    match result {
        Ok(user) => complete_sign_in(&session, &user).await,
        Err(e) => {
            tracing::warn!(error = %e, "Email sign-in failed");
            let context = LoginContext {
                error: Some(e.user_message(AuthStep::Password)),
                email: form.email.trim().to_string(),
                ..LoginContext::default()
            };
            Ok(render_login(&state, &session, LoginTab::Email, context, failure_status(&e)).await)
        }
    }
}

/// Form input for sending an OTP.
#[derive(Debug, Deserialize)]
pub struct SendOtpForm {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default, rename = "g-recaptcha-response")]
    pub recaptcha_token: Option<String>,
}

/// Ask the provider to text a code and remember the verification session.
async fn request_code(
    state: &AppState,
    session: &Session,
    phone: PhoneNumber,
    recaptcha_token: Option<&str>,
) -> Result<(), AuthError> {
    let token = recaptcha_token.filter(|t| !t.is_empty());
    let session_info = state.identity().send_otp(&phone, token).await?;
    let pending = PhoneVerification {
        phone_number: phone,
        session_info,
        sent_at: chrono::Utc::now(),
    };
    session
        .insert(session_keys::PHONE_VERIFICATION, &pending)
        .await
        .map_err(|e| AuthError::InvalidResponse(format!("session store failed: {e}")))?;
    tracing::info!(phone = %pending.phone_number, "OTP sent");
    Ok(())
}

/// Send an OTP to the posted number.
///
/// POST /login/phone/send
#[instrument(skip_all)]
async fn send_otp(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SendOtpForm>,
) -> Result<Response, AppError> {
    session
        .remove::<PhoneVerification>(session_keys::PHONE_VERIFICATION)
        .await?;

    let result = match PhoneNumber::parse(&form.phone_number) {
        Ok(phone) => request_code(&state, &session, phone, form.recaptcha_token.as_deref()).await,
        Err(e) => Err(AuthError::from(e)),
    };

    match result {
        Ok(()) => Ok(Redirect::to("/login?tab=phone").into_response()),
        Err(e) => {
            tracing::warn!(error = %e, "Sending OTP failed");
            let context = LoginContext {
                error: Some(e.user_message(AuthStep::SendOtp)),
                phone_number: PhoneNumber::sanitize(&form.phone_number),
                ..LoginContext::default()
            };
            Ok(render_login(&state, &session, LoginTab::Phone, context, failure_status(&e)).await)
        }
    }
}

/// Form input for resending an OTP.
#[derive(Debug, Default, Deserialize)]
pub struct ResendOtpForm {
    #[serde(default, rename = "g-recaptcha-response")]
    pub recaptcha_token: Option<String>,
}

/// Send a fresh code to the number of the pending verification.
///
/// POST /login/phone/resend
#[instrument(skip_all)]
async fn resend_otp(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ResendOtpForm>,
) -> Result<Response, AppError> {
    let pending = session
        .get::<PhoneVerification>(session_keys::PHONE_VERIFICATION)
        .await?;

    let result = match pending {
        Some(pending) => {
            request_code(
                &state,
                &session,
                pending.phone_number,
                form.recaptcha_token.as_deref(),
            )
            .await
        }
        None => Err(AuthError::MissingConfirmation),
    };

    match result {
        Ok(()) => Ok(Redirect::to("/login?tab=phone").into_response()),
        Err(e) => {
            tracing::warn!(error = %e, "Resending OTP failed");
            let context = LoginContext {
                error: Some(e.user_message(AuthStep::SendOtp)),
                ..LoginContext::default()
            };
            Ok(render_login(&state, &session, LoginTab::Phone, context, failure_status(&e)).await)
        }
    }
}

/// Form input for verifying an OTP.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpForm {
    #[serde(default)]
    pub otp: String,
}

/// Check the code against the pending verification.
///
/// POST /login/phone/verify
#[instrument(skip_all)]
async fn verify_otp(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<VerifyOtpForm>,
) -> Result<Response, AppError> {
    let pending = session
        .get::<PhoneVerification>(session_keys::PHONE_VERIFICATION)
        .await?;

    let result = match (pending, OtpCode::parse(&form.otp)) {
        (None, _) => Err(AuthError::MissingConfirmation),
        (Some(_), Err(e)) => Err(AuthError::from(e)),
        (Some(pending), Ok(code)) => {
            state
                .identity()
                .verify_otp(&pending.session_info, &code)
                .await
        }
    };

    match result {
        Ok(user) => complete_sign_in(&session, &user).await,
        Err(e) => {
            tracing::warn!(error = %e, "OTP verification failed");
            let context = LoginContext {
                error: Some(e.user_message(AuthStep::VerifyOtp)),
                ..LoginContext::default()
            };
            Ok(render_login(&state, &session, LoginTab::Phone, context, failure_status(&e)).await)
        }
    }
}

fn csrf_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CSRF_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Start Google sign-in.
///
/// GET /auth/google
#[instrument(skip_all)]
async fn google_start(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let csrf = csrf_token();
    let continue_uri = state
        .config()
        .url_for(&format!("/auth/google/callback?csrf={csrf}"));

    match state.identity().start_google(&continue_uri).await {
        Ok(redirect) => {
            session.insert(session_keys::OAUTH_STATE, &csrf).await?;
            match &redirect.session_id {
                Some(id) => session.insert(session_keys::OAUTH_SESSION_ID, id).await?,
                None => {
                    session
                        .remove::<String>(session_keys::OAUTH_SESSION_ID)
                        .await?;
                }
            }
            Ok(Redirect::to(&redirect.auth_uri).into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to start Google sign-in");
            let context = LoginContext {
                error: Some(e.user_message(AuthStep::Google)),
                ..LoginContext::default()
            };
            Ok(render_login(&state, &session, LoginTab::Email, context, failure_status(&e)).await)
        }
    }
}

/// Query parameters we read on the Google callback. The rest of the query
/// string belongs to the provider and is passed through untouched.
#[derive(Debug, Default, Deserialize)]
pub struct GoogleCallbackQuery {
    pub csrf: Option<String>,
}

/// Finish Google sign-in.
///
/// GET /auth/google/callback
#[instrument(skip_all)]
async fn google_callback(
    State(state): State<AppState>,
    session: Session,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<GoogleCallbackQuery>,
) -> Result<Response, AppError> {
    let expected = session.remove::<String>(session_keys::OAUTH_STATE).await?;
    let session_id = session
        .remove::<String>(session_keys::OAUTH_SESSION_ID)
        .await?;

    let result = match (expected, query.csrf) {
        (Some(expected), Some(actual)) if expected == actual => {
            let request_uri = state.config().url_for(&uri.to_string());
            state
                .identity()
                .finish_google(&request_uri, session_id.as_deref())
                .await
        }
        _ => Err(AuthError::StateMismatch),
    };

    match result {
        Ok(user) => complete_sign_in(&session, &user).await,
        Err(e) => {
            tracing::warn!(error = %e, "Google sign-in failed");
            let context = LoginContext {
                error: Some(e.user_message(AuthStep::Google)),
                ..LoginContext::default()
            };
            Ok(render_login(&state, &session, LoginTab::Email, context, failure_status(&e)).await)
        }
    }
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_user(&session).await {
        tracing::warn!(error = %e, "Failed to clear session on logout");
    }
    clear_sentry_user();

    Redirect::to("/login")
}
