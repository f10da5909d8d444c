use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use category_ranking_service::{
    handlers, ActivityDataSource, Config, PgActivityRepository, RankingPipeline,
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load config
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,category_ranking_service=debug".into());
    if config.app.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    info!(
        env = %config.app.env,
        http_port = config.app.http_port,
        window_days = config.ranking.engagement_window_days,
        threshold = config.ranking.low_engagement_threshold,
        special = ?config.ranking.special_category_names,
        "Starting category-ranking-service"
    );

    // Prepared statement caching disabled for PgBouncer transaction mode
    let connect_options = PgConnectOptions::from_str(&config.database.url)
        .context("Failed to parse DATABASE_URL")?
        .statement_cache_capacity(0);

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;

    let repository = PgActivityRepository::new(pg_pool);
    repository
        .ping()
        .await
        .context("Failed to verify database connection")?;
    info!("Database pool created and verified");

    let source: Arc<dyn ActivityDataSource> = Arc::new(repository);
    let pipeline = web::Data::new(RankingPipeline::new(source, &config.ranking));

    let bind_addr = (config.app.host.clone(), config.app.http_port);
    info!("HTTP server listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(pipeline.clone())
            .configure(handlers::configure_routes)
    })
    .bind(bind_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    info!("category-ranking-service stopped");
    Ok(())
}
