use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const SCORE_MIN: i16 = 1;
pub const SCORE_MAX: i16 = 4;
pub const NOTES_MAX_CHARS: usize = 500;

/// One user's check-in for one calendar day. Unique on (user_id, date).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "entry_date")]
    pub date: NaiveDate,
    pub mood: i16,
    pub energy: i16,
    pub sleep: i16,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written by an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEntry {
    pub mood: i16,
    pub energy: i16,
    pub sleep: i16,
    pub notes: String,
}
