use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_rate_limit: u64,
    pub request_timeout_seconds: u64,
    pub max_request_body_size: usize,
}

/// Tuning knobs for the ingredient search engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Limit used when the caller omits one or sends a non-positive value
    pub default_limit: usize,
    /// Ceiling applied to caller-supplied limits
    pub max_limit: usize,
    /// Exact hit count below which a term is expanded with typo patterns
    pub scarcity_threshold: usize,
    /// Row cap for each wildcard pattern lookup
    pub pattern_cap: usize,
    /// Corpus lookups in flight at once for one search call
    pub lookup_concurrency: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 50,
            scarcity_threshold: 5,
            pattern_cap: 20,
            lookup_concurrency: 8,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: &str) -> Result<T> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {name} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/recipes.db".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Settings {
            database: DatabaseConfig {
                url: database_url,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", "25")?,
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", "5")?,
                connection_timeout_seconds: env_or("DATABASE_CONNECTION_TIMEOUT", "30")?,
                idle_timeout_seconds: env_or("DATABASE_IDLE_TIMEOUT", "600")?,
            },
            server: ServerConfig {
                host,
                port: env_or("PORT", "3000")?,
                api_rate_limit: env_or("API_RATE_LIMIT", "100")?,
                request_timeout_seconds: env_or("REQUEST_TIMEOUT", "10")?,
                max_request_body_size: env_or("MAX_REQUEST_BODY_SIZE", "1048576")?,
            },
            search: SearchConfig {
                default_limit: env_or("SEARCH_DEFAULT_LIMIT", "10")?,
                max_limit: env_or("SEARCH_MAX_LIMIT", "50")?,
                scarcity_threshold: env_or("SEARCH_SCARCITY_THRESHOLD", "5")?,
                pattern_cap: env_or("SEARCH_PATTERN_CAP", "20")?,
                lookup_concurrency: env_or("SEARCH_LOOKUP_CONCURRENCY", "8")?,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        self.search.validate()
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 || self.max_limit == 0 {
            return Err(Error::Config("Search limits must be non-zero".to_string()));
        }

        if self.default_limit > self.max_limit {
            return Err(Error::Config(format!(
                "Default search limit {} exceeds maximum {}",
                self.default_limit, self.max_limit
            )));
        }

        if self.pattern_cap == 0 {
            return Err(Error::Config("Pattern cap must be non-zero".to_string()));
        }

        if self.lookup_concurrency == 0 {
            return Err(Error::Config(
                "Lookup concurrency must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 5,
                min_connections: 2,
                connection_timeout_seconds: 30,
                idle_timeout_seconds: 600,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                api_rate_limit: 100,
                request_timeout_seconds: 10,
                max_request_body_size: 1048576,
            },
            search: SearchConfig::default(),
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = test_settings();
        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_search_config_validation() {
        let mut settings = test_settings();

        settings.search.default_limit = 60;
        assert!(settings.validate().is_err());

        settings.search = SearchConfig {
            lookup_concurrency: 0,
            ..SearchConfig::default()
        };
        assert!(settings.validate().is_err());

        settings.search = SearchConfig {
            pattern_cap: 0,
            ..SearchConfig::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_search_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.max_limit, 50);
        assert_eq!(config.scarcity_threshold, 5);
        assert_eq!(config.pattern_cap, 20);
    }
}
