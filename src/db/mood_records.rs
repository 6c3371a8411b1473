//! Storage for daily mood records.
//!
//! The `(user_id, entry_date)` unique constraint is what keeps one record
//! per user per day; writes go through `ON CONFLICT ... DO UPDATE`.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::mood_record::{MoodEntry, MoodRecord};

/// Records for `user_id`, oldest first, optionally starting at `since`.
pub async fn fetch_mood_records(
    db: &PgPool,
    user_id: Uuid,
    since: Option<NaiveDate>,
) -> Result<Vec<MoodRecord>, sqlx::Error> {
    sqlx::query_as::<_, MoodRecord>(
        r#"
        SELECT * FROM mood_entries
        WHERE user_id = $1 AND ($2::date IS NULL OR entry_date >= $2)
        ORDER BY entry_date ASC
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(db)
    .await
}

pub async fn upsert_mood_record(
    db: &PgPool,
    user_id: Uuid,
    date: NaiveDate,
    entry: &MoodEntry,
) -> Result<MoodRecord, sqlx::Error> {
    let record = sqlx::query_as::<_, MoodRecord>(
        r#"
        INSERT INTO mood_entries (id, user_id, entry_date, mood, energy, sleep, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id, entry_date) DO UPDATE SET
            mood = EXCLUDED.mood,
            energy = EXCLUDED.energy,
            sleep = EXCLUDED.sleep,
            notes = EXCLUDED.notes,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(date)
    .bind(entry.mood)
    .bind(entry.energy)
    .bind(entry.sleep)
    .bind(&entry.notes)
    .fetch_one(db)
    .await?;

    tracing::debug!(user_id = %user_id, date = %date, mood = entry.mood, "Mood record saved");
    Ok(record)
}
