//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Declaration engine settings.
    #[serde(default)]
    pub declaration: DeclarationSettings,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Settings consumed by the declaration pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct DeclarationSettings {
    /// Rate (percent) assumed for adjustment documents whose subtotal is not positive.
    #[serde(default = "default_adjustment_rate")]
    pub default_adjustment_rate: Decimal,
    /// Maximum number of identifiers per record-store query.
    #[serde(default = "default_fetch_batch_size")]
    pub fetch_batch_size: usize,
}

fn default_adjustment_rate() -> Decimal {
    Decimal::from(20)
}

fn default_fetch_batch_size() -> usize {
    200
}

impl Default for DeclarationSettings {
    fn default() -> Self {
        Self {
            default_adjustment_rate: default_adjustment_rate(),
            fetch_batch_size: default_fetch_batch_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "declara=info,sea_orm=warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `DECLARA__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("DECLARA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_declaration_settings_defaults() {
        let settings = DeclarationSettings::default();
        assert_eq!(settings.default_adjustment_rate, dec!(20));
        assert_eq!(settings.fetch_batch_size, 200);
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("test")),
                ("DECLARA__DATABASE__URL", Some("postgres://localhost/declara_test")),
                ("DECLARA__DECLARATION__FETCH_BATCH_SIZE", Some("150")),
                ("DECLARA__LOGGING__JSON", Some("true")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/declara_test");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.declaration.fetch_batch_size, 150);
                assert_eq!(config.declaration.default_adjustment_rate, dec!(20));
                assert!(config.logging.json);
            },
        );
    }

    #[test]
    fn test_load_requires_database_url() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("test")),
                ("DECLARA__DATABASE__URL", None::<&str>),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
