use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::credential::ports::TokenSettings;

/// Database URL that selects the in-process credential store.
pub const IN_MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_ttl_seconds() -> i64 {
    72 * 60 * 60
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// A missing signing secret or a non-positive token lifetime is an error:
    /// the service must not start without them.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }
        if self.jwt.ttl_seconds <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.ttl_seconds must be positive, got {}",
                self.jwt.ttl_seconds
            )));
        }
        if self.database.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "database.timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.url == IN_MEMORY_DATABASE_URL
    }

    /// Deadline applied to every storage call.
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl TokenSettings for JwtConfig {
    fn signing_secret(&self) -> &str {
        &self.secret
    }

    fn token_ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }
}

// The secret stays out of Debug output.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, ttl_seconds: i64) -> Config {
        Config {
            database: DatabaseConfig {
                url: IN_MEMORY_DATABASE_URL.to_string(),
                max_connections: default_max_connections(),
                timeout_ms: default_timeout_ms(),
            },
            server: ServerConfig { http_port: 8080 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                ttl_seconds,
            },
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(config("a-signing-secret", 3600).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_secret() {
        assert!(config("", 3600).validate().is_err());
        assert!(config("   ", 3600).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_ttl() {
        assert!(config("a-signing-secret", 0).validate().is_err());
        assert!(config("a-signing-secret", -5).validate().is_err());
    }

    #[test]
    fn test_jwt_config_is_token_settings() {
        let jwt = config("a-signing-secret", 3600).jwt;
        assert_eq!(jwt.signing_secret(), "a-signing-secret");
        assert_eq!(jwt.token_ttl_seconds(), 3600);
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", config("a-signing-secret", 3600));
        assert!(!rendered.contains("a-signing-secret"));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let configuration = ConfigBuilder::builder()
            .set_override("database.url", "memory")
            .unwrap()
            .set_override("server.http_port", 9000)
            .unwrap()
            .set_override("jwt.secret", "a-signing-secret")
            .unwrap()
            .build()
            .unwrap();

        let config: Config = configuration.try_deserialize().unwrap();
        assert!(config.database.is_in_memory());
        assert_eq!(config.database.storage_timeout(), Duration::from_millis(5_000));
        assert_eq!(config.jwt.ttl_seconds, 72 * 60 * 60);
        assert_eq!(config.server.http_port, 9000);
    }
}
