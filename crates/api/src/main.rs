use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use mindvest_core::domain::portfolio::{AllocationRequest, PortfolioResponse};
use mindvest_core::domain::quiz::{QuizQuestionView, QuizSubmission, RiskProfile};
use mindvest_core::investment::AllocationBook;
use mindvest_core::learning::bank::QuizBank;
use mindvest_core::learning::topics::{self, Topic};
use mindvest_core::storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = mindvest_core::config::Settings::from_env()?;
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
            Ok(pool) => match storage::migrate(&pool).await {
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

    let state = AppState {
        bank: Arc::new(QuizBank::builtin()),
        book: Arc::new(AllocationBook::builtin()),
        pool,
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/learning/quiz/questions", get(quiz_questions))
        .route("/api/learning/quiz/submit", post(submit_quiz))
        .route("/api/learning/risk-profile/:user_id", get(get_risk_profile))
        .route("/api/learning/topics", get(learning_topics))
        .route("/api/investment/portfolio/allocate", post(allocate_portfolio))
        .route(
            "/api/investment/allocation-templates",
            get(allocation_templates),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Local frontends open the HTML straight from disk; allow any origin.
        .layer(CorsLayer::permissive());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

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
    bank: Arc<QuizBank>,
    book: Arc<AllocationBook>,
    pool: Option<PgPool>,
}

async fn quiz_questions(State(state): State<AppState>) -> Json<Vec<QuizQuestionView>> {
    Json(state.bank.questions())
}

async fn submit_quiz(
    State(state): State<AppState>,
    Json(submission): Json<QuizSubmission>,
) -> Json<RiskProfile> {
    let profile = state.bank.score_submission(&submission, Utc::now());

    // Persistence is best-effort; a storage failure never blocks the response.
    if let Some(pool) = &state.pool {
        if let Err(e) = storage::risk_profiles::record(pool, &profile).await {
            sentry_anyhow::capture_anyhow(&e);
            tracing::warn!(error = %e, user_id = profile.user_id, "failed to record risk profile");
        }
    }

    Json(profile)
}

#[derive(Debug, Serialize)]
struct ApiRiskProfile {
    profile_id: Uuid,
    profile: RiskProfile,
}

async fn get_risk_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiRiskProfile>, StatusCode> {
    let Some(pool) = &state.pool else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let (profile_id, profile) = storage::risk_profiles::fetch_latest_for_user(pool, user_id)
        .await
        .map_err(|e| {
            sentry_anyhow::capture_anyhow(&e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(ApiRiskProfile {
        profile_id,
        profile,
    }))
}

async fn learning_topics() -> Json<Vec<Topic>> {
    Json(topics::catalogue())
}

async fn allocate_portfolio(
    State(state): State<AppState>,
    Json(request): Json<AllocationRequest>,
) -> Json<PortfolioResponse> {
    Json(state.book.generate_portfolio(&request))
}

async fn allocation_templates(State(state): State<AppState>) -> Json<AllocationBook> {
    Json((*state.book).clone())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &mindvest_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
