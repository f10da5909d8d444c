use super::ActivityDataSource;
use crate::error::DataSourceError;
use crate::models::{Category, PostActivityRecord};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL-backed activity data source
#[derive(Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct PostActivityRow {
    like_count: i64,
    comment_count: i64,
    created_at: DateTime<Utc>,
}

impl From<PostActivityRow> for PostActivityRecord {
    fn from(row: PostActivityRow) -> Self {
        PostActivityRecord {
            like_count: non_negative(row.like_count),
            comment_count: non_negative(row.comment_count),
            created_at: row.created_at,
        }
    }
}

fn non_negative(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

impl PgActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ActivityDataSource for PgActivityRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, DataSourceError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id,
                   name,
                   COALESCE(description, '') AS description,
                   COALESCE(icon, '') AS icon,
                   COALESCE(color_class, '') AS color_class
            FROM categories
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn count_approved_groups(&self, category_id: Uuid) -> Result<u64, DataSourceError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM groups
            WHERE category_id = $1 AND is_approved = true
            "#,
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(non_negative(count))
    }

    async fn list_recent_post_activity(
        &self,
        category_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<PostActivityRecord>, DataSourceError> {
        let rows = sqlx::query_as::<_, PostActivityRow>(
            r#"
            SELECT COALESCE(p.like_count, 0)::BIGINT AS like_count,
                   COALESCE(p.comment_count, 0)::BIGINT AS comment_count,
                   p.created_at
            FROM posts p
            JOIN groups g ON g.id = p.group_id
            WHERE g.category_id = $1 AND p.created_at >= $2
            "#,
        )
        .bind(category_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        debug!(%category_id, posts = rows.len(), "Fetched recent post activity");

        Ok(rows.into_iter().map(PostActivityRecord::from).collect())
    }

    async fn ping(&self) -> Result<(), DataSourceError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
