//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOCKINVENT_BASE_URL` - Public URL of the back office (used for OAuth callbacks)
//!
//! ## Optional
//! - `STOCKINVENT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOCKINVENT_PORT` - Listen port (default: 3001)
//! - `STOCKINVENT_DATA_DIR` - Directory holding `products.json` (default: ./data)
//! - `STOCKINVENT_ORG_NAME` - Organization shown on the dashboard
//! - `STOCKINVENT_GST_NUMBER` - GST registration shown on the dashboard and invoices
//! - `STOCKINVENT_LOG_JSON` - Emit JSON logs instead of text when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`
//!
//! ## Optional (Firebase - all four or none; without them sign-in is mocked)
//! - `FIREBASE_API_KEY` - Web API key of the Firebase project
//! - `FIREBASE_AUTH_DOMAIN` - e.g. `my-project.firebaseapp.com`
//! - `FIREBASE_PROJECT_ID` - Firebase project id
//! - `RECAPTCHA_SITE_KEY` - reCAPTCHA key used by the phone sign-in widget
//!
//! ## Optional (TLS)
//! - `STOCKINVENT_TLS_CERT` - PEM-encoded certificate chain
//! - `STOCKINVENT_TLS_KEY` - PEM-encoded private key

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_ORG_NAME: &str = "TechInventory Solutions";
const DEFAULT_GST_NUMBER: &str = "29AAACT2727Q1ZP";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, without a trailing slash
    pub base_url: String,
    /// Directory of the product document store
    pub data_dir: PathBuf,
    /// Organization details for the dashboard header
    pub organization: OrganizationConfig,
    /// Firebase Authentication settings (mock sign-in when absent)
    pub firebase: Option<FirebaseConfig>,
    /// Emit JSON logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

/// Organization shown in the dashboard header and on printed invoices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationConfig {
    pub name: String,
    pub gst_number: String,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_ORG_NAME.to_string(),
            gst_number: DEFAULT_GST_NUMBER.to_string(),
        }
    }
}

/// Firebase project configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct FirebaseConfig {
    /// Web API key sent as `?key=` to the Identity Toolkit
    pub api_key: SecretString,
    pub auth_domain: String,
    pub project_id: String,
    /// Public reCAPTCHA site key rendered into the login page
    pub recaptcha_site_key: String,
}

impl std::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("api_key", &"[REDACTED]")
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("recaptcha_site_key", &self.recaptcha_site_key)
            .finish()
    }
}

impl FirebaseConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let api_key = get_optional_env("FIREBASE_API_KEY");
        let auth_domain = get_optional_env("FIREBASE_AUTH_DOMAIN");
        let project_id = get_optional_env("FIREBASE_PROJECT_ID");
        let recaptcha_site_key = get_optional_env("RECAPTCHA_SITE_KEY");

        match (api_key, auth_domain, project_id, recaptcha_site_key) {
            (Some(key), Some(auth_domain), Some(project_id), Some(recaptcha_site_key)) => {
                validate_secret_strength(&key, "FIREBASE_API_KEY")?;
                Ok(Some(Self {
                    api_key: SecretString::from(key),
                    auth_domain,
                    project_id,
                    recaptcha_site_key,
                }))
            }
            (None, None, None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "FIREBASE_*".to_string(),
                "FIREBASE_API_KEY, FIREBASE_AUTH_DOMAIN, FIREBASE_PROJECT_ID and RECAPTCHA_SITE_KEY must be set together"
                    .to_string(),
            )),
        }
    }
}

/// TLS configuration for HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

impl TlsConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let cert_pem = get_optional_env("STOCKINVENT_TLS_CERT");
        let key_pem = get_optional_env("STOCKINVENT_TLS_KEY");

        match (cert_pem, key_pem) {
            (Some(cert), Some(key)) => Ok(Some(Self {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "STOCKINVENT_TLS_*".to_string(),
                "Both STOCKINVENT_TLS_CERT and STOCKINVENT_TLS_KEY must be set together"
                    .to_string(),
            )),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the Firebase key fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOCKINVENT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOCKINVENT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOCKINVENT_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOCKINVENT_PORT".to_string(), e.to_string())
            })?;
        let base_url = parse_base_url(&get_required_env("STOCKINVENT_BASE_URL")?)?;
        let data_dir = PathBuf::from(get_env_or_default("STOCKINVENT_DATA_DIR", "./data"));

        let organization = OrganizationConfig {
            name: get_env_or_default("STOCKINVENT_ORG_NAME", DEFAULT_ORG_NAME),
            gst_number: get_env_or_default("STOCKINVENT_GST_NUMBER", DEFAULT_GST_NUMBER),
        };

        let firebase = FirebaseConfig::from_env()?;
        let log_json = get_optional_env("STOCKINVENT_LOG_JSON").is_some();
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let tls = TlsConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            organization,
            firebase,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            tls,
        })
    }

    /// A local configuration with mock sign-in and every optional feature off.
    ///
    /// Used by the CLI and by tests that build the router in-process.
    #[must_use]
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            data_dir: data_dir.into(),
            organization: OrganizationConfig::default(),
            firebase: None,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
            tls: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must be marked `Secure`.
    #[must_use]
    pub fn uses_https(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Location of the product document.
    #[must_use]
    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join("products.json")
    }

    /// Location of the archive document.
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join("archive.json")
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Check the base URL is absolute http(s) and strip any trailing slash.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("STOCKINVENT_BASE_URL".to_string(), e.to_string())
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "STOCKINVENT_BASE_URL".to_string(),
            format!("unsupported scheme {}", parsed.scheme()),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_bounds() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-firebase-key", "FIREBASE_API_KEY");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("AIzaAAAAAAAAAAAAAAAAAAAAAAAA", "FIREBASE_API_KEY");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("AIzaSyD3k9Qx7LmN2pR8tV5wB1cF6hJ0gK4", "FIREBASE_API_KEY");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_base_url_trims_slash() {
        assert_eq!(
            parse_base_url("https://stock.example.org/").unwrap(),
            "https://stock.example.org"
        );
        assert!(parse_base_url("ftp://stock.example.org").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_local_config() {
        let config = AppConfig::local("/tmp/stock");
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
        assert!(!config.uses_https());
        assert!(config.firebase.is_none());
        assert_eq!(config.products_path(), PathBuf::from("/tmp/stock/products.json"));
        assert_eq!(config.archive_path(), PathBuf::from("/tmp/stock/archive.json"));
        assert_eq!(
            config.url_for("/auth/google/callback"),
            "http://localhost:3001/auth/google/callback"
        );
        assert_eq!(config.organization.gst_number, "29AAACT2727Q1ZP");
    }

    #[test]
    fn test_firebase_config_debug_redacts_key() {
        let config = FirebaseConfig {
            api_key: SecretString::from("AIzaSyD3k9Qx7LmN2pR8tV5wB1cF6hJ0gK4"),
            auth_domain: "stock-1.firebaseapp.com".to_string(),
            project_id: "stock-1".to_string(),
            recaptcha_site_key: "site-key".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("stock-1.firebaseapp.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("AIzaSyD3k9Qx7LmN2pR8tV5wB1cF6hJ0gK4"));
    }
}
