use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{CreateJournalRequest, DeleteResponse, JournalEntryResponse, JournalListQuery};
use crate::error::{AppError, AppResult};
use crate::models::journal::{JournalEntry, TagCount};
use crate::AppState;

const TOP_TAGS: i64 = 10;

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateJournalRequest>,
) -> AppResult<Json<JournalEntryResponse>> {
    body.validate()?;
    let entry = body.normalize().map_err(AppError::Validation)?;

    let saved = sqlx::query_as::<_, JournalEntry>(
        r#"
        INSERT INTO journal_entries (id, user_id, title, content, mood, tags)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(&entry.title)
    .bind(&entry.content)
    .bind(&entry.mood)
    .bind(&entry.tags)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(saved.into()))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<JournalListQuery>,
) -> AppResult<Json<Vec<JournalEntryResponse>>> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);

    let entries = sqlx::query_as::<_, JournalEntry>(
        r#"
        SELECT * FROM journal_entries
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(auth_user.id)
    .bind(limit)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<JournalEntryResponse>> {
    let entry = sqlx::query_as::<_, JournalEntry>(
        "SELECT * FROM journal_entries WHERE id = $1 AND user_id = $2",
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Journal entry not found".into()))?;

    Ok(Json(entry.into()))
}

/// Idempotent: deleting a missing entry still succeeds.
pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    Ok(Json(DeleteResponse {
        deleted: true,
        id: entry_id,
    }))
}

pub async fn tag_counts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<TagCount>>> {
    let tags = sqlx::query_as::<_, TagCount>(
        r#"
        SELECT tag AS name, COUNT(*) AS count
        FROM journal_entries, unnest(tags) AS tag
        WHERE user_id = $1
        GROUP BY tag
        ORDER BY count DESC, name ASC
        LIMIT $2
        "#,
    )
    .bind(auth_user.id)
    .bind(TOP_TAGS)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(tags))
}
