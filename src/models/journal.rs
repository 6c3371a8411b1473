use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Moods a journal entry can be tagged with.
pub const JOURNAL_MOODS: [&str; 8] = [
    "😌 Calm",
    "😊 Happy",
    "😐 Neutral",
    "😓 Stressed",
    "😔 Sad",
    "😠 Angry",
    "😴 Tired",
    "🤔 Reflective",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow, PartialEq, Eq)]
pub struct TagCount {
    pub name: String,
    pub count: i64,
}
