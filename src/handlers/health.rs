use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mindhaven-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Reports the database and the quiz bank the process loaded at startup.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .is_ok();

    let quiz_bank = json!({
        "version": state.quiz_bank.version,
        "questions": state.quiz_bank.len(),
        "max_score": state.quiz_bank.max_score(),
    });

    let (status, label) = if db_ok {
        (StatusCode::OK, "ready")
    } else {
        tracing::warn!("Readiness check failed: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        status,
        Json(json!({
            "status": label,
            "checks": {
                "database": if db_ok { "ok" } else { "failed" },
                "quiz_bank": quiz_bank,
            },
        })),
    )
}
