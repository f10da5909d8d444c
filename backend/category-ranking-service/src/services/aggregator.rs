use crate::error::{ServiceError, ServiceResult};
use crate::models::{AggregatedCategory, Category, PostActivityRecord};
use crate::repository::ActivityDataSource;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::debug;

/// Engagement Aggregator - 單一分類的互動分數
///
/// Combines a category's approved group count with its recent post activity.
pub struct EngagementAggregator {
    source: Arc<dyn ActivityDataSource>,
    window_days: i64,
}

impl EngagementAggregator {
    pub fn new(source: Arc<dyn ActivityDataSource>, window_days: i64) -> Self {
        Self {
            source,
            window_days,
        }
    }

    /// Start of the activity window ending at `now`.
    fn window_start(&self, now: DateTime<Utc>) -> ServiceResult<DateTime<Utc>> {
        Duration::try_days(self.window_days)
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| {
                ServiceError::Config(format!(
                    "engagement window of {} days is out of range",
                    self.window_days
                ))
            })
    }

    /// Aggregate one category as of `now`. Both queries run concurrently and
    /// either failing fails the category.
    pub async fn aggregate(
        &self,
        category: Category,
        now: DateTime<Utc>,
    ) -> ServiceResult<AggregatedCategory> {
        let since = self.window_start(now)?;
        let category_id = category.id;

        let (group_count, activity) = tokio::try_join!(
            self.source.count_approved_groups(category_id),
            self.source.list_recent_post_activity(category_id, since),
        )
        .map_err(|e| ServiceError::for_category(category_id, e))?;

        let engagement_score = engagement_score(&activity, since);

        debug!(
            %category_id,
            name = %category.name,
            group_count,
            posts = activity.len(),
            engagement_score,
            "Category aggregated"
        );

        Ok(AggregatedCategory::new(
            category,
            group_count,
            engagement_score,
        ))
    }
}

/// Sum of per-post engagement over records created at or after `since`.
pub fn engagement_score(records: &[PostActivityRecord], since: DateTime<Utc>) -> u64 {
    records
        .iter()
        .filter(|record| record.created_at >= since)
        .fold(0u64, |total, record| total.saturating_add(record.engagement()))
}
