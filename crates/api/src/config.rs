use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. `DATABASE_URL` is read separately by `main`.
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
    /// Connection pool size (default: `20`).
    pub db_max_connections: u32,
    /// Upper bound on waiting for a row lock inside a transaction (default: `5000`).
    pub lock_timeout_ms: u64,
    /// Base URL of the flight data provider. `None` disables flight sync.
    pub flight_api_url: Option<String>,
    /// Seconds between flight sync passes (default: `1800`).
    pub flight_sync_interval_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                    |
    /// |-----------------------------|----------------------------|
    /// | `HOST`                      | `0.0.0.0`                  |
    /// | `PORT`                      | `3000`                     |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                       |
    /// | `DB_MAX_CONNECTIONS`        | `20`                       |
    /// | `LOCK_TIMEOUT_MS`           | `5000`                     |
    /// | `FLIGHT_API_URL`            | unset (sync disabled)      |
    /// | `FLIGHT_SYNC_INTERVAL_SECS` | `1800`                     |
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

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| pickup_db::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let lock_timeout_ms: u64 = std::env::var("LOCK_TIMEOUT_MS")
            .unwrap_or_else(|_| pickup_scheduler::DEFAULT_LOCK_TIMEOUT_MS.to_string())
            .parse()
            .expect("LOCK_TIMEOUT_MS must be a valid u64");

        let flight_api_url = std::env::var("FLIGHT_API_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let flight_sync_interval_secs: u64 = std::env::var("FLIGHT_SYNC_INTERVAL_SECS")
            .unwrap_or_else(|_| "1800".into())
            .parse()
            .expect("FLIGHT_SYNC_INTERVAL_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            lock_timeout_ms,
            flight_api_url,
            flight_sync_interval_secs,
            jwt,
        }
    }
}
