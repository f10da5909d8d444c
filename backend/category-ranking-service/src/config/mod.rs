/// Configuration management for Category Ranking Service
///
/// Loads configuration from environment variables.
use crate::error::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_SPECIAL_CATEGORIES: [&str; 2] = ["Organizations", "Personalities"];
pub const DEFAULT_LOW_ENGAGEMENT_THRESHOLD: u64 = 10;
pub const DEFAULT_ENGAGEMENT_WINDOW_DAYS: i64 = 30;
pub const MAX_ENGAGEMENT_WINDOW_DAYS: i64 = 36_500;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub ranking: RankingConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub http_port: u16,
    /// Emit JSON logs instead of human readable ones
    pub json_logs: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Ranking policy knobs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankingConfig {
    /// Trailing window for post activity, in days
    pub engagement_window_days: i64,
    /// Special categories scoring below this sink to the bottom
    pub low_engagement_threshold: u64,
    pub special_category_names: Vec<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            engagement_window_days: DEFAULT_ENGAGEMENT_WINDOW_DAYS,
            low_engagement_threshold: DEFAULT_LOW_ENGAGEMENT_THRESHOLD,
            special_category_names: DEFAULT_SPECIAL_CATEGORIES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl RankingConfig {
    fn from_env() -> ServiceResult<Self> {
        let defaults = Self::default();

        let engagement_window_days = parse_var("ENGAGEMENT_WINDOW_DAYS")?
            .unwrap_or(defaults.engagement_window_days);
        let low_engagement_threshold = parse_var("LOW_ENGAGEMENT_THRESHOLD")?
            .unwrap_or(defaults.low_engagement_threshold);
        let special_category_names = match env::var("SPECIAL_CATEGORY_NAMES") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => defaults.special_category_names,
        };

        Ok(Self {
            engagement_window_days,
            low_engagement_threshold,
            special_category_names,
        })
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> ServiceResult<Self> {
        dotenvy::dotenv().ok();

        let app = AppConfig {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: parse_var("PORT")?.unwrap_or(8015),
            json_logs: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").map_err(|_| {
                ServiceError::Config("DATABASE_URL environment variable not set".to_string())
            })?,
            max_connections: parse_var("DB_MAX_CONNECTIONS")?.unwrap_or(20),
            min_connections: parse_var("DB_MIN_CONNECTIONS")?.unwrap_or(2),
            acquire_timeout_secs: parse_var("DB_ACQUIRE_TIMEOUT_SECS")?.unwrap_or(10),
        };

        let config = Config {
            app,
            database,
            ranking: RankingConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if !(1..=MAX_ENGAGEMENT_WINDOW_DAYS).contains(&self.ranking.engagement_window_days) {
            return Err(ServiceError::Config(format!(
                "ENGAGEMENT_WINDOW_DAYS must be between 1 and {}, got {}",
                MAX_ENGAGEMENT_WINDOW_DAYS, self.ranking.engagement_window_days
            )));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ServiceError::Config(format!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                self.database.min_connections, self.database.max_connections
            )));
        }
        Ok(())
    }
}

/// Parse an optional environment variable, failing on malformed values
/// instead of silently falling back.
fn parse_var<T: std::str::FromStr>(key: &str) -> ServiceResult<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ServiceError::Config(format!("{} has an invalid value: {:?}", key, raw))),
        Err(_) => Ok(None),
    }
}
