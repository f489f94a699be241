use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Cost range the bcrypt crate accepts.
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Longest token lifetime accepted from configuration (one year).
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string. `None` selects the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match get("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let jwt_secret = get("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Self::new(environment, jwt_secret).with_overrides(get)
    }

    /// Preset defaults for an environment.
    pub fn new(environment: Environment, jwt_secret: impl Into<String>) -> Self {
        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };
        config.security.jwt_secret = jwt_secret.into();
        config
    }

    fn with_overrides<F>(mut self, get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get("HOST") {
            self.server.host = v;
        }
        if let Some(v) = get("PORT") {
            self.server.port = parse("PORT", v)?;
        }

        if let Some(v) = get("DATABASE_URL").filter(|s| !s.trim().is_empty()) {
            self.database.url = Some(v);
        }
        if let Some(v) = get("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse("DATABASE_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = get("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse("DATABASE_CONNECTION_TIMEOUT", v)?;
        }

        if let Some(v) = get("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = parse("API_MAX_REQUEST_SIZE_BYTES", v)?;
        }

        if let Some(v) = get("SECURITY_JWT_EXPIRY_HOURS") {
            let hours: u64 = parse("SECURITY_JWT_EXPIRY_HOURS", v.clone())?;
            if hours == 0 || hours > MAX_JWT_EXPIRY_HOURS {
                return Err(ConfigError::Invalid {
                    key: "SECURITY_JWT_EXPIRY_HOURS",
                    value: v,
                });
            }
            self.security.jwt_expiry_hours = hours;
        }
        if let Some(v) = get("SECURITY_BCRYPT_COST") {
            let cost: u32 = parse("SECURITY_BCRYPT_COST", v.clone())?;
            if !BCRYPT_COST_RANGE.contains(&cost) {
                return Err(ConfigError::Invalid {
                    key: "SECURITY_BCRYPT_COST",
                    value: v,
                });
            }
            self.security.bcrypt_cost = cost;
        }
        if let Some(v) = get("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(self)
    }

    /// Staging and production refuse to run without a real database.
    pub fn requires_database(&self) -> bool {
        !matches!(self.environment, Environment::Development)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 72,
                bcrypt_cost: 10,
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 72,
                bcrypt_cost: 10,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 72,
                bcrypt_cost: 10,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_jwt_secret_is_fatal() {
        let err = AppConfig::from_source(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));

        let err = AppConfig::from_source(lookup(&[("JWT_SECRET", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn development_is_the_default_environment() {
        let config = AppConfig::from_source(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.security.jwt_secret, "s3cret");
        assert_eq!(config.security.jwt_expiry_hours, 72);
        assert_eq!(config.server.port, 8080);
        assert!(config.database.url.is_none());
        assert!(!config.requires_database());
    }

    #[test]
    fn env_overrides_apply() {
        let config = AppConfig::from_source(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("APP_ENV", "production"),
            ("PORT", "9000"),
            ("DATABASE_URL", "postgres://localhost/planvibe"),
            ("SECURITY_CORS_ORIGINS", "https://a.example, https://b.example"),
        ]))
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert!(config.requires_database());
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/planvibe"));
        assert_eq!(
            config.security.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn bcrypt_cost_outside_supported_range_is_rejected() {
        for cost in ["3", "32", "99"] {
            let err = AppConfig::from_source(lookup(&[
                ("JWT_SECRET", "s3cret"),
                ("SECURITY_BCRYPT_COST", cost),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: "SECURITY_BCRYPT_COST", .. }));
        }

        let config = AppConfig::from_source(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("SECURITY_BCRYPT_COST", "12"),
        ]))
        .unwrap();
        assert_eq!(config.security.bcrypt_cost, 12);
    }

    #[test]
    fn unusable_token_lifetimes_are_rejected() {
        for hours in ["0", "100000000000"] {
            let err = AppConfig::from_source(lookup(&[
                ("JWT_SECRET", "s3cret"),
                ("SECURITY_JWT_EXPIRY_HOURS", hours),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: "SECURITY_JWT_EXPIRY_HOURS", .. }));
        }
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = AppConfig::from_source(lookup(&[("JWT_SECRET", "s3cret"), ("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }
}
