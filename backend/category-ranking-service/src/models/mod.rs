use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dashboard category as stored upstream. Presentation fields are passed
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color_class: String,
}

/// A category with its recent engagement attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedCategory {
    #[serde(flatten)]
    pub category: Category,
    pub group_count: u64,
    pub engagement_score: u64,
}

impl AggregatedCategory {
    pub fn new(category: Category, group_count: u64, engagement_score: u64) -> Self {
        Self {
            category,
            group_count,
            engagement_score,
        }
    }

    pub fn id(&self) -> Uuid {
        self.category.id
    }

    pub fn name(&self) -> &str {
        &self.category.name
    }
}

/// One post's contribution to its category's engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostActivityRecord {
    pub like_count: u64,
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
}

impl PostActivityRecord {
    /// Likes plus comments, plus one for the post itself.
    pub fn engagement(&self) -> u64 {
        self.like_count
            .saturating_add(self.comment_count)
            .saturating_add(1)
    }
}
