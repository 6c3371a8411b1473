use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::services::tags::initials;

pub const DEFAULT_POST_MOOD: &str = "😐 Neutral";
pub const DEFAULT_AUTHOR: &str = "Anonymous";

pub const COMMUNITY_MOODS: [&str; 8] = [
    "😊 Happy",
    "😌 Calm",
    "😓 Anxious",
    "😔 Sad",
    "😠 Angry",
    "🤔 Reflective",
    "😴 Tired",
    "😐 Neutral",
];

/// A post joined with its like/comment counters for the requesting user.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub comments: i64,
    pub user_liked: bool,
}

#[derive(Debug, Serialize)]
pub struct CommunityPost {
    pub id: Uuid,
    pub author: String,
    pub author_initials: String,
    pub content: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub comments: i64,
    pub user_liked: bool,
    pub is_own: bool,
}

impl CommunityPost {
    pub fn from_row(row: PostRow, viewer: Uuid) -> Self {
        Self {
            id: row.id,
            author_initials: initials(&row.author_name),
            author: row.author_name,
            content: row.content,
            mood: row.mood,
            tags: row.tags,
            created_at: row.created_at,
            likes: row.likes,
            comments: row.comments,
            user_liked: row.user_liked,
            is_own: row.user_id == viewer,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PostComment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: String,
    pub author_initials: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_own: bool,
}

impl PostComment {
    pub fn from_row(row: CommentRow, viewer: Uuid) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            author_initials: initials(&row.author_name),
            author: row.author_name,
            content: row.content,
            created_at: row.created_at,
            is_own: row.user_id == viewer,
        }
    }
}
