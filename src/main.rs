use anyhow::Context;
use sqlx::PgPool;
use std::{sync::Arc, time::Duration};

mod auth;
mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod routes;
mod services;

use auth::rate_limit::RateLimitState;
use config::Config;
use services::quiz_bank::QuestionBank;
use services::quiz_sessions::QuizSessionStore;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub quiz_bank: Arc<QuestionBank>,
    pub quiz_sessions: QuizSessionStore,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    pub fn new(db: PgPool, config: Arc<Config>, quiz_bank: Arc<QuestionBank>) -> Self {
        let ttl = Duration::from_secs(config.quiz_session_ttl_secs);
        Self {
            db,
            config,
            quiz_bank,
            quiz_sessions: QuizSessionStore::new(ttl),
            rate_limiter: RateLimitState::new(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindhaven_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);

    let quiz_bank = QuestionBank::load(config.quiz_bank_path.as_deref())
        .context("Failed to load quiz question bank")?;
    tracing::info!(
        version = %quiz_bank.version,
        questions = quiz_bank.len(),
        max_score = quiz_bank.max_score(),
        "Quiz bank loaded"
    );

    // Database
    let db = db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let state = AppState::new(db, config.clone(), Arc::new(quiz_bank));

    // Purges idle quiz sessions and stale rate limit windows every 5 min
    spawn_maintenance_worker(state.clone());

    let app = routes::build_router(state)?;

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn spawn_maintenance_worker(state: AppState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;

            let sessions = state.quiz_sessions.purge_expired().await;
            let windows = state.rate_limiter.cleanup().await;
            if sessions > 0 || windows > 0 {
                tracing::info!(
                    expired_sessions = sessions,
                    expired_rate_limits = windows,
                    "Maintenance sweep"
                );
            }
        }
    });
}
