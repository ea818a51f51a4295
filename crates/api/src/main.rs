use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use riskpulse_core::domain::overview::SnapshotPayload;
use riskpulse_core::error::is_no_data;
use riskpulse_core::sanitize::Sanitize;
use riskpulse_core::service::OverviewService;
use riskpulse_core::storage::tables::PgTableSource;

const DEFAULT_SENTIMENT_TAIL: usize = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = riskpulse_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();
    let pool: Option<PgPool> = match settings.require_database_url() {
        Ok(db_url) => match sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await
        {
            Ok(pool) => match riskpulse_core::storage::migrate(&pool).await {
                Ok(()) => Some(pool),
                Err(e) => {
                    sentry_anyhow::capture_anyhow(&e);
                    tracing::error!(error = %e, "db migrations failed; starting API in degraded mode");
                    None
                }
            },
            Err(e) => {
                let err = anyhow::Error::new(e);
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "db connect failed; starting API in degraded mode");
                None
            }
        },
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "DATABASE_URL missing; starting API in degraded mode");
            None
        }
    };

    let service = pool.map(|pool| {
        Arc::new(OverviewService::from_settings(
            Arc::new(PgTableSource::new(pool)),
            &settings,
        ))
    });
    let state = AppState { service };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/overview", get(get_overview))
        .route("/api/sentiment", get(get_sentiment))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, cache_ttl_secs = settings.overview_cache_ttl.as_secs(), "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    service: Option<Arc<OverviewService>>,
}

/// Missing tables mean the loaders have not run yet; anything else is a server fault.
fn error_status(err: anyhow::Error) -> StatusCode {
    if is_no_data(&err) {
        tracing::warn!(error = %err, "overview requested before data was loaded");
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    sentry_anyhow::capture_anyhow(&err);
    tracing::error!(error = %err, "request failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[derive(Debug, Default, Deserialize)]
struct OverviewQuery {
    #[serde(default)]
    refresh: bool,
}

async fn get_overview(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
) -> Result<Json<SnapshotPayload>, StatusCode> {
    let Some(service) = &state.service else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let payload = service
        .build_overview_snapshot(query.refresh)
        .await
        .map_err(error_status)?;

    Ok(Json(payload.as_ref().clone()))
}

#[derive(Debug, Default, Deserialize)]
struct SentimentQuery {
    tail: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SentimentRow {
    date: NaiveDate,
    score: Option<f64>,
}

#[derive(Debug, Serialize)]
struct GroupScore {
    group: String,
    score: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ApiSentiment {
    rows: Vec<SentimentRow>,
    groups: Vec<GroupScore>,
}

async fn get_sentiment(
    State(state): State<AppState>,
    Query(query): Query<SentimentQuery>,
) -> Result<Json<ApiSentiment>, StatusCode> {
    let Some(service) = &state.service else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let output = service
        .generate_sentiment_series()
        .await
        .map_err(error_status)?;

    let tail = query.tail.unwrap_or(DEFAULT_SENTIMENT_TAIL);
    let rows = output
        .series
        .tail(tail)
        .map(|(date, score)| SentimentRow {
            date,
            score: Some(score).sanitize(),
        })
        .collect();
    let groups = output
        .groups
        .columns()
        .iter()
        .map(|c| GroupScore {
            group: c.name.clone(),
            score: c.values.last().copied().sanitize(),
        })
        .collect();

    Ok(Json(ApiSentiment { rows, groups }))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &riskpulse_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
