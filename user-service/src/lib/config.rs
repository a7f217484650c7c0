use std::env;
use std::fmt;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Shortest accepted HS256 signing secret, in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Postgres connection string; in-memory storage is used when absent
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_seconds")]
    pub expiration_seconds: i64,
}

fn default_expiration_seconds() -> i64 {
    3600
}

impl JwtConfig {
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.expiration_seconds)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_seconds", &self.expiration_seconds)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, DATABASE__URL)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                MIN_SECRET_LENGTH
            )));
        }
        if self.jwt.expiration_seconds <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiration_seconds: i64) -> Config {
        Config {
            database: DatabaseConfig::default(),
            server: ServerConfig { http_port: 5000 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_seconds,
            },
        }
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(config("too-short", 3600).validate().is_err());
        assert!(config(&"s".repeat(MIN_SECRET_LENGTH), 3600).validate().is_ok());
    }

    #[test]
    fn test_non_positive_expiration_rejected() {
        assert!(config(&"s".repeat(MIN_SECRET_LENGTH), 0).validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = config("a-very-secret-signing-key-of-32-bytes", 3600);
        let debug = format!("{:?}", config);

        assert!(!debug.contains("a-very-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_token_ttl() {
        assert_eq!(
            config(&"s".repeat(MIN_SECRET_LENGTH), 3600).jwt.token_ttl(),
            chrono::Duration::seconds(3600)
        );
    }
}
