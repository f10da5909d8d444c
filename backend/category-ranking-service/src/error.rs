/// Error types for category-ranking-service
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;
use uuid::Uuid;

/// Failure reported by an activity data source.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ServiceError {
    /// A data source query failed. `category_id` is `None` when the failing
    /// query was not scoped to one category (e.g. listing categories).
    #[error("{}", describe_data_source_failure(.category_id, .source))]
    DataSource {
        category_id: Option<Uuid>,
        #[source]
        source: DataSourceError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_data_source_failure(category_id: &Option<Uuid>, source: &DataSourceError) -> String {
    match category_id {
        Some(id) => format!("Aggregation failed for category {}: {}", id, source),
        None => format!("Category listing failed: {}", source),
    }
}

impl ServiceError {
    pub fn for_category(category_id: Uuid, source: DataSourceError) -> Self {
        ServiceError::DataSource {
            category_id: Some(category_id),
            source,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ServiceError::DataSource { .. } => "DATA_SOURCE_UNAVAILABLE",
            ServiceError::Config(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<DataSourceError> for ServiceError {
    fn from(source: DataSourceError) -> Self {
        ServiceError::DataSource {
            category_id: None,
            source,
        }
    }
}

/// Convert ServiceError to HTTP responses for dashboard clients
impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::DataSource { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        }))
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
