use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared secret the authentication provider signs sessions with.
    #[serde(skip_serializing)]
    pub auth_secret: String,
    pub auth_url: Option<String>,
    pub session_cookie_name: String,
    pub cors_origins: Vec<String>,
    pub enable_audit_logging: bool,
    pub jwt_expiry_hours: u64,
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
        // Server
        if let Some(port) = parse_env("SMARTSTORE_API_PORT").or_else(|| parse_env("PORT")) {
            self.server.port = port;
        }
        if let Some(v) = parse_env("API_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v;
        }

        // Database
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Some(v) = parse_env("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v;
        }
        if let Some(v) = parse_env("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v;
        }

        // Security
        if let Ok(v) = env::var("AUTH_SECRET") {
            self.security.auth_secret = v;
        }
        if let Ok(v) = env::var("AUTH_URL") {
            self.security.auth_url = Some(v);
        }
        if let Ok(v) = env::var("SESSION_COOKIE_NAME") {
            self.security.session_cookie_name = v;
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(v) = parse_env("SECURITY_ENABLE_AUDIT_LOGGING") {
            self.security.enable_audit_logging = v;
        }
        if let Some(v) = parse_env("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                auth_secret: String::new(),
                auth_url: Some("http://localhost:3000".to_string()),
                session_cookie_name: "next-auth.session-token".to_string(),
                cors_origins: vec!["http://localhost:3000".to_string()],
                enable_audit_logging: true,
                jwt_expiry_hours: 24 * 7, // 1 week
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                auth_secret: String::new(),
                auth_url: None,
                session_cookie_name: "__Secure-next-auth.session-token".to_string(),
                cors_origins: vec!["https://staging.smartstore.example".to_string()],
                enable_audit_logging: true,
                jwt_expiry_hours: 24,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: false,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                auth_secret: String::new(),
                auth_url: None,
                session_cookie_name: "__Secure-next-auth.session-token".to_string(),
                cors_origins: vec!["https://app.smartstore.example".to_string()],
                enable_audit_logging: true,
                jwt_expiry_hours: 8,
            },
        }
    }

    /// Configuration used by unit and router tests. Never reads the environment.
    pub fn for_tests(auth_secret: &str) -> Self {
        let mut config = Self::development();
        config.security.auth_secret = auth_secret.to_string();
        config.security.session_cookie_name = "smartstore.session".to_string();
        config
    }
}

// Unparseable values keep the environment default
fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
