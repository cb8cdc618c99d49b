use std::env;

/// AppConfig
///
/// Immutable runtime configuration, loaded once in `main` and shared through `AppState`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and cookie flags.
    pub env: Env,
    // Postgres connection string. `None` selects the in-memory record store (local only).
    pub db_url: Option<String>,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Optional JSON file replacing the built-in access policy.
    pub access_policy_path: Option<String>,
    // Directory served under `/assets`.
    pub assets_dir: String,
}

/// Env
///
/// Runtime context: local development or production.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Safe values for test scaffolding: local env, memory store, no policy override.
    fn default() -> Self {
        Self {
            env: Env::Local,
            db_url: None,
            bind_addr: "127.0.0.1:3000".to_string(),
            access_policy_path: None,
            assets_dir: "public/assets".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in production when `DATABASE_URL` is missing. The back-office must never
    /// come up against a throwaway in-memory store outside local development.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let db_url = match env {
            Env::Production => Some(
                env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod"),
            ),
            Env::Local => env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
        };

        Self {
            env,
            db_url,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            access_policy_path: env::var("ACCESS_POLICY_PATH").ok(),
            assets_dir: env::var("ASSETS_DIR").unwrap_or_else(|_| "public/assets".to_string()),
        }
    }

    /// Whether session cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.env == Env::Production
    }
}
