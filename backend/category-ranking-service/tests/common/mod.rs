#![allow(dead_code)]

use category_ranking_service::models::{Category, PostActivityRecord};
use category_ranking_service::{ActivityDataSource, DataSourceError};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn category(name: &str) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: format!("{} discussions", name),
        icon: "vote".to_string(),
        color_class: "bg-primary".to_string(),
    }
}

pub fn post(likes: u64, comments: u64, created_at: DateTime<Utc>) -> PostActivityRecord {
    PostActivityRecord {
        like_count: likes,
        comment_count: comments,
        created_at,
    }
}

/// In-memory data source that honours `since` like the Postgres one and
/// counts every query it receives.
#[derive(Default)]
pub struct InMemoryActivityRepository {
    categories: Vec<Category>,
    groups: HashMap<Uuid, u64>,
    posts: HashMap<Uuid, Vec<PostActivityRecord>>,
    failing_activity: HashSet<Uuid>,
    activity_delays: HashMap<Uuid, Duration>,
    fail_listing: bool,
    unreachable: bool,
    queries: AtomicUsize,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(
        mut self,
        category: Category,
        groups: u64,
        posts: Vec<PostActivityRecord>,
    ) -> Self {
        self.groups.insert(category.id, groups);
        self.posts.insert(category.id, posts);
        self.categories.push(category);
        self
    }

    pub fn failing_activity_for(mut self, category_id: Uuid) -> Self {
        self.failing_activity.insert(category_id);
        self
    }

    /// Hold the category's activity query for `delay` before answering
    pub fn with_activity_delay(mut self, category_id: Uuid, delay: Duration) -> Self {
        self.activity_delays.insert(category_id, delay);
        self
    }

    /// Fail readiness checks
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ActivityDataSource for InMemoryActivityRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, DataSourceError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(DataSourceError::Unavailable("categories table locked".to_string()));
        }
        Ok(self.categories.clone())
    }

    async fn count_approved_groups(&self, category_id: Uuid) -> Result<u64, DataSourceError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.groups.get(&category_id).copied().unwrap_or(0))
    }

    async fn list_recent_post_activity(
        &self,
        category_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<PostActivityRecord>, DataSourceError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        match self.activity_delays.get(&category_id) {
            Some(delay) => tokio::time::sleep(*delay).await,
            // Suspend so sibling aggregations interleave
            None => tokio::task::yield_now().await,
        }

        if self.failing_activity.contains(&category_id) {
            return Err(DataSourceError::Unavailable(format!(
                "activity query rejected for {}",
                category_id
            )));
        }

        Ok(self
            .posts
            .get(&category_id)
            .map(|posts| {
                posts
                    .iter()
                    .filter(|p| p.created_at >= since)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), DataSourceError> {
        if self.unreachable {
            return Err(DataSourceError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}
