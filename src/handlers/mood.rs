use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::db::mood_records::{fetch_mood_records, upsert_mood_record};
use crate::dto::{MoodRequest, MoodStatsResponse, RangeQuery};
use crate::error::AppResult;
use crate::models::mood_record::MoodRecord;
use crate::services::mood_stats::{
    average_mood, best_day, mood_distribution, mood_distribution_dense, mood_trends, TrendPoint,
};
use crate::AppState;

pub async fn upsert_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<MoodRequest>,
) -> AppResult<Json<MoodRecord>> {
    body.validate()?;

    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    let record = upsert_mood_record(&state.db, auth_user.id, date, &body.to_entry()).await?;

    Ok(Json(record))
}

pub async fn list_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<MoodRecord>>> {
    let since = query.since(Utc::now().date_naive());
    let records = fetch_mood_records(&state.db, auth_user.id, since).await?;
    Ok(Json(records))
}

pub async fn mood_trend(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<TrendPoint>>> {
    let since = query.since(Utc::now().date_naive());
    let records = fetch_mood_records(&state.db, auth_user.id, since).await?;
    Ok(Json(mood_trends(&records)))
}

/// Summary over the full history, plus this week's journal activity.
pub async fn mood_stats(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<MoodStatsResponse>> {
    let records = fetch_mood_records(&state.db, auth_user.id, None).await?;

    let week_ago = Utc::now() - chrono::Duration::days(7);
    let journal_entries_this_week = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM journal_entries WHERE user_id = $1 AND created_at >= $2",
    )
    .bind(auth_user.id)
    .bind(week_ago)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(MoodStatsResponse {
        check_ins: records.len(),
        average_mood: average_mood(&records),
        best_day: best_day(&records).map(|r| r.date),
        distribution: mood_distribution(&records),
        categories: mood_distribution_dense(&records),
        journal_entries_this_week,
    }))
}
