mod postgres;

use crate::error::DataSourceError;
use crate::models::{Category, PostActivityRecord};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use postgres::PgActivityRepository;

/// Read-only access to categories, groups and post activity.
/// Timeouts and retries are the implementation's concern.
#[async_trait::async_trait]
pub trait ActivityDataSource: Send + Sync {
    /// All categories, unfiltered
    async fn list_categories(&self) -> Result<Vec<Category>, DataSourceError>;

    /// Number of approved groups under a category
    async fn count_approved_groups(&self, category_id: Uuid) -> Result<u64, DataSourceError>;

    /// Posts in any group of the category created at or after `since`
    async fn list_recent_post_activity(
        &self,
        category_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<PostActivityRecord>, DataSourceError>;

    /// Readiness probe; sources without a connection are always ready
    async fn ping(&self) -> Result<(), DataSourceError> {
        Ok(())
    }
}
