use super::{CategoryRanker, EngagementAggregator, RankingPolicy};
use crate::config::RankingConfig;
use crate::error::{DataSourceError, ServiceResult};
use crate::metrics;
use crate::models::{AggregatedCategory, Category};
use crate::repository::ActivityDataSource;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Ranking Pipeline - 並行聚合後排序
///
/// Aggregates every category concurrently, waits for all of them, then
/// ranks. Any single failure fails the whole computation.
pub struct RankingPipeline {
    source: Arc<dyn ActivityDataSource>,
    aggregator: EngagementAggregator,
    ranker: CategoryRanker,
}

impl RankingPipeline {
    pub fn new(source: Arc<dyn ActivityDataSource>, config: &RankingConfig) -> Self {
        Self {
            aggregator: EngagementAggregator::new(source.clone(), config.engagement_window_days),
            ranker: CategoryRanker::new(RankingPolicy::from(config)),
            source,
        }
    }

    /// Readiness of the underlying data source
    pub async fn check_ready(&self) -> Result<(), DataSourceError> {
        self.source.ping().await
    }

    pub async fn compute_ranking(
        &self,
        categories: Vec<Category>,
    ) -> ServiceResult<Vec<AggregatedCategory>> {
        self.compute_ranking_at(categories, Utc::now()).await
    }

    /// Rank `categories` using `now` as the end of the activity window.
    pub async fn compute_ranking_at(
        &self,
        categories: Vec<Category>,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<AggregatedCategory>> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let total = categories.len();
        let timer = metrics::start_ranking_timer();

        // try_join_all yields results in input order, not completion order
        let aggregated = match try_join_all(
            categories
                .into_iter()
                .map(|category| self.aggregator.aggregate(category, now)),
        )
        .await
        {
            Ok(aggregated) => aggregated,
            Err(e) => {
                timer.stop_and_discard();
                metrics::record_failure();
                warn!(error = %e, categories = total, "Category ranking aborted");
                return Err(e);
            }
        };

        let ranked = self.ranker.rank(aggregated);
        let demoted = ranked
            .iter()
            .filter(|c| self.ranker.policy().is_demoted(c))
            .count();

        timer.observe_duration();
        metrics::record_success(ranked.len());
        info!(categories = ranked.len(), demoted, "Category ranking computed");

        Ok(ranked)
    }

    /// Dashboard read path: every category from the data source, ranked.
    pub async fn rank_all_categories(&self) -> ServiceResult<Vec<AggregatedCategory>> {
        self.rank_all_categories_at(Utc::now()).await
    }

    pub async fn rank_all_categories_at(
        &self,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<AggregatedCategory>> {
        let categories = self.source.list_categories().await.map_err(|e| {
            metrics::record_failure();
            warn!(error = %e, "Failed to list categories");
            e
        })?;

        self.compute_ranking_at(categories, now).await
    }
}
