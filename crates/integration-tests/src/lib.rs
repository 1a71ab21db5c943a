//! Integration tests for StockInvent.
//!
//! Each test starts the back office in-process on an ephemeral port with
//! offline sign-in and a throwaway data directory, then drives it over HTTP
//! with a cookie-aware client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stockinvent-integration-tests
//! ```

use std::net::SocketAddr;

use reqwest::{Client, redirect};
use tempfile::TempDir;

use stockinvent_admin::config::AppConfig;
use stockinvent_admin::state::AppState;

/// A running server plus a client that keeps its session cookie.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub state: AppState,
    _data_dir: TempDir,
}

impl TestContext {
    /// Start a server with the seeded sample data.
    ///
    /// # Panics
    ///
    /// Panics if the server can't be started.
    #[allow(clippy::unwrap_used)]
    pub async fn new() -> Self {
        let data_dir = tempfile::tempdir().unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();

        let mut config = AppConfig::local(data_dir.path());
        config.base_url = format!("http://{addr}");
        let base_url = config.base_url.clone();

        let state = AppState::load(config).await.unwrap();
        let app = stockinvent_admin::app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            client,
            base_url,
            state,
            _data_dir: data_dir,
        }
    }

    /// Start a server and sign in with the offline email provider.
    ///
    /// # Panics
    ///
    /// Panics if sign-in doesn't redirect to the dashboard.
    #[allow(clippy::unwrap_used)]
    pub async fn signed_in() -> Self {
        let ctx = Self::new().await;
        let resp = ctx
            .client
            .post(ctx.url("/login/password"))
            .form(&[("email", "manager@example.com"), ("password", "secret")])
            .send()
            .await
            .unwrap();
        assert_eq!(location(&resp), Some("/dashboard"));
        ctx
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(resp: &reqwest::Response) -> Option<&str> {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
