pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod repository;
pub mod services;

pub use config::Config;
pub use error::{DataSourceError, ServiceError, ServiceResult};
pub use repository::{ActivityDataSource, PgActivityRepository};
pub use services::{CategoryRanker, EngagementAggregator, RankingPipeline, RankingPolicy};
