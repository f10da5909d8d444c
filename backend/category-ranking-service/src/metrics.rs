//! Prometheus metrics for category ranking
//!
//! Tracks ranking latency, outcomes and the size of the last ranked list

use actix_web::{HttpResponse, Responder};
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Encoder, Histogram,
    HistogramTimer, IntCounterVec, IntGauge, TextEncoder,
};

lazy_static::lazy_static! {
    /// End-to-end ranking latency (fan-out, join and sort)
    static ref RANKING_DURATION: Histogram = register_histogram!(
        "category_ranking_duration_seconds",
        "Time to aggregate and rank all categories",
        vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    ).expect("Prometheus metrics registration should succeed at startup");

    /// Ranking runs by outcome (success/failure)
    static ref RANKING_RUNS: IntCounterVec = register_int_counter_vec!(
        "category_ranking_runs_total",
        "Ranking computations by outcome",
        &["outcome"]
    ).expect("Prometheus metrics registration should succeed at startup");

    static ref RANKED_CATEGORIES: IntGauge = register_int_gauge!(
        "category_ranking_last_size",
        "Number of categories in the last successful ranking"
    ).expect("Prometheus metrics registration should succeed at startup");
}

pub(crate) fn start_ranking_timer() -> HistogramTimer {
    RANKING_DURATION.start_timer()
}

pub(crate) fn record_success(ranked: usize) {
    RANKING_RUNS.with_label_values(&["success"]).inc();
    RANKED_CATEGORIES.set(ranked as i64);
}

pub(crate) fn record_failure() {
    RANKING_RUNS.with_label_values(&["failure"]).inc();
}

/// Handler that serialises Prometheus metrics in text format.
pub async fn metrics_handler() -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => HttpResponse::Ok()
            .content_type(encoder.format_type())
            .body(buffer),
        Err(err) => HttpResponse::InternalServerError().body(err.to_string()),
    }
}
