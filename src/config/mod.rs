use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

// bcrypt accepts work factors in this range
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Longest session lifetime accepted from SESSION_EXPIRY_HOURS (one year)
pub const MAX_SESSION_EXPIRY_HOURS: u64 = 24 * 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub locale: Locale,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Language used for user-facing error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    En,
    Fr,
}

impl Locale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Some(Locale::En),
            "fr" | "fr-fr" | "fr-ca" => Some(Locale::Fr),
            _ => None,
        }
    }
}

/// What the admin gate does when no admin key is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminGatePolicy {
    /// Unconfigured key means no gate.
    Open,
    /// Unconfigured key means every admin request is rejected.
    Closed,
}

impl AdminGatePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" | "fail-open" => Some(AdminGatePolicy::Open),
            "closed" | "fail-closed" => Some(AdminGatePolicy::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub require_https: bool,
    pub admin_maint_key: Option<String>,
    pub admin_gate_policy: AdminGatePolicy,
    pub session_secret: String,
    pub session_expiry_hours: u64,
    pub bcrypt_cost: u32,
}

impl SecurityConfig {
    /// Session lifetime in hours, kept within 1..=MAX_SESSION_EXPIRY_HOURS
    pub fn session_lifetime_hours(&self) -> u64 {
        self.session_expiry_hours.clamp(1, MAX_SESSION_EXPIRY_HOURS)
    }

    /// Session lifetime in seconds, for the cookie Max-Age
    pub fn session_lifetime_secs(&self) -> u64 {
        self.session_lifetime_hours() * 3600
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub sign_in_route: String,
    pub sign_out_redirect: String,
    pub home_route: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("APP_LOCALE") {
            self.locale = Locale::parse(&v).unwrap_or(self.locale);
        }
        if let Some(port) = env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("SECURITY_REQUIRE_HTTPS") {
            self.security.require_https = v.parse().unwrap_or(self.security.require_https);
        }
        if let Ok(v) = env::var("ADMIN_MAINT_KEY") {
            // An empty key counts as unconfigured
            self.security.admin_maint_key = Some(v).filter(|k| !k.is_empty());
        }
        if let Ok(v) = env::var("ADMIN_GATE_POLICY") {
            self.security.admin_gate_policy =
                AdminGatePolicy::parse(&v).unwrap_or(self.security.admin_gate_policy);
        }
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.security.session_secret = v;
        }
        if let Ok(v) = env::var("SESSION_EXPIRY_HOURS") {
            self.security.session_expiry_hours = v.parse().unwrap_or(self.security.session_expiry_hours);
        }
        if let Ok(v) = env::var("BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }

        // Auth route overrides
        if let Ok(v) = env::var("AUTH_SIGN_IN_ROUTE") {
            self.auth.sign_in_route = v;
        }
        if let Ok(v) = env::var("AUTH_SIGN_OUT_REDIRECT") {
            self.auth.sign_out_redirect = v;
        }

        self
    }

    /// Checks the settings a binary cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        if self.security.session_secret.is_empty() {
            return Err(ConfigError::Missing("SESSION_SECRET"));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                reason: format!(
                    "must be between {} and {}",
                    MIN_BCRYPT_COST, MAX_BCRYPT_COST
                ),
            });
        }
        if !(1..=MAX_SESSION_EXPIRY_HOURS).contains(&self.security.session_expiry_hours) {
            return Err(ConfigError::Invalid {
                key: "SESSION_EXPIRY_HOURS",
                reason: format!("must be between 1 and {}", MAX_SESSION_EXPIRY_HOURS),
            });
        }
        for (key, route) in [
            ("AUTH_SIGN_IN_ROUTE", &self.auth.sign_in_route),
            ("AUTH_SIGN_OUT_REDIRECT", &self.auth.sign_out_redirect),
        ] {
            if !route.starts_with('/') || route.chars().any(char::is_control) {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "must be a path starting with '/'".to_string(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn development() -> Self {
        Self {
            environment: Environment::Development,
            locale: Locale::En,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                require_https: false,
                admin_maint_key: None,
                admin_gate_policy: AdminGatePolicy::Open,
                session_secret: "development-session-secret".to_string(),
                session_expiry_hours: 24 * 7, // 1 week
                bcrypt_cost: 10,
            },
            auth: AuthConfig::default(),
        }
    }

    pub(crate) fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            locale: Locale::En,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                require_https: true,
                admin_maint_key: None,
                admin_gate_policy: AdminGatePolicy::Closed,
                session_secret: String::new(),
                session_expiry_hours: 24,
                bcrypt_cost: 10,
            },
            auth: AuthConfig::default(),
        }
    }

    pub(crate) fn production() -> Self {
        Self {
            environment: Environment::Production,
            locale: Locale::En,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                require_https: true,
                admin_maint_key: None,
                admin_gate_policy: AdminGatePolicy::Closed,
                session_secret: String::new(),
                session_expiry_hours: 24,
                bcrypt_cost: 12,
            },
            auth: AuthConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            sign_in_route: "/login".to_string(),
            sign_out_redirect: "/login".to_string(),
            home_route: "/calendar".to_string(),
        }
    }
}

// Global singleton config for the binaries - the server hands a clone to AppState
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
