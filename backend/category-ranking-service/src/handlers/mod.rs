/// HTTP handlers for the dashboard
use crate::error::ServiceResult;
use crate::metrics::metrics_handler;
use crate::models::AggregatedCategory;
use crate::services::RankingPipeline;
use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct RankedCategoriesResponse {
    pub categories: Vec<AggregatedCategory>,
    pub generated_at: DateTime<Utc>,
}

/// GET /api/v1/categories/ranked
pub async fn ranked_categories(
    pipeline: web::Data<RankingPipeline>,
) -> ServiceResult<HttpResponse> {
    let generated_at = Utc::now();
    let categories = pipeline.rank_all_categories_at(generated_at).await?;

    Ok(HttpResponse::Ok().json(RankedCategoriesResponse {
        categories,
        generated_at,
    }))
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub async fn readiness(pipeline: web::Data<RankingPipeline>) -> impl Responder {
    match pipeline.check_ready().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ready" })),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unavailable",
                "error": e.to_string(),
            }))
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/health/ready", web::get().to(readiness))
        .route("/metrics", web::get().to(metrics_handler))
        .service(
            web::scope("/api/v1")
                .route("/categories/ranked", web::get().to(ranked_categories)),
        );
}
