use boxd_core::webhook::SigningSecret;

use crate::auth::verifier::AuthConfig;

/// Default base URL of the external movie-metadata provider.
const DEFAULT_CATALOG_BASE_URL: &str = "https://jumboboxd.soylemez.net";

/// Server configuration loaded from environment variables.
///
/// Required values are validated once at process start and the result
/// is threaded through handlers via `AppState`; nothing reads the
/// environment after startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bearer-token verification (public key, authorized parties).
    pub auth: AuthConfig,
    /// Webhook signing secret. Absence is tolerated at startup; the
    /// webhook endpoint answers 500 until it is configured.
    pub webhook_secret: Option<SigningSecret>,
    /// Base URL of the external movie-metadata provider.
    pub catalog_base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default                          |
    /// |---------------------------|----------|----------------------------------|
    /// | `HOST`                    | no       | `0.0.0.0`                        |
    /// | `PORT`                    | no       | `3000`                           |
    /// | `CORS_ORIGINS`            | no       | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`    | no       | `30`                             |
    /// | `JWT_PUBLIC_KEY`          | **yes**  | --                               |
    /// | `JWT_AUTHORIZED_PARTIES`  | no       | empty (check skipped)            |
    /// | `WEBHOOK_SIGNING_SECRET`  | no       | -- (webhook endpoint 500s)       |
    /// | `CATALOG_BASE_URL`        | no       | `https://jumboboxd.soylemez.net` |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or any present value is
    /// malformed. Misconfiguration should fail at boot, not at request
    /// time.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let auth = AuthConfig::from_env();

        let webhook_secret = std::env::var("WEBHOOK_SIGNING_SECRET").ok().map(|raw| {
            SigningSecret::parse(&raw)
                .expect("WEBHOOK_SIGNING_SECRET must be a base64 whsec_ secret")
        });

        let catalog_base_url = std::env::var("CATALOG_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_CATALOG_BASE_URL.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            auth,
            webhook_secret,
            catalog_base_url,
        }
    }
}
