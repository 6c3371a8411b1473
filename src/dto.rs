//! # MindHaven — Request/Response DTOs
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Field-level validation is expressed via `validator` derive macros,
//!   cross-field rules live in the `impl` blocks at the bottom

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::community::{COMMUNITY_MOODS, DEFAULT_AUTHOR, DEFAULT_POST_MOOD};
use crate::models::journal::{JournalEntry, JOURNAL_MOODS};
use crate::models::mood_record::{MoodEntry, MoodRecord, NOTES_MAX_CHARS};
use crate::models::profile::{Profile, ProfileUpdate};
use crate::services::mood_stats::DistributionSlice;
use crate::services::quiz_bank::{Question, QuestionBank};
use crate::services::quiz_engine::QuizSession;
use crate::services::scoring::QuizOutcome;
use crate::services::tags::{initials, normalize_tags};

// ============================================================================
// Common
// ============================================================================

/// Standard delete confirmation
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: Uuid,
}

/// `?range=` shared by the mood history endpoints
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// "7d", "14d", "30d", "90d" or "all". Default: "30d"
    pub range: Option<String>,
}

impl RangeQuery {
    /// Number of days to look back, `None` for the full history
    pub fn range_days(&self) -> Option<i64> {
        match self.range.as_deref() {
            Some("7d") => Some(7),
            Some("14d") => Some(14),
            Some("30d") | None => Some(30),
            Some("90d") => Some(90),
            Some("all") => None,
            _ => Some(30),
        }
    }

    /// First date included when counting back from `today`
    pub fn since(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.range_days()
            .map(|days| today - chrono::Duration::days(days - 1))
    }
}

// ============================================================================
// Quiz
// ============================================================================

/// GET /api/quiz/questions
#[derive(Debug, Serialize)]
pub struct QuestionBankResponse {
    pub version: String,
    pub max_score: u32,
    pub questions: Vec<Question>,
}

impl From<&QuestionBank> for QuestionBankResponse {
    fn from(bank: &QuestionBank) -> Self {
        Self {
            version: bank.version.clone(),
            max_score: bank.max_score(),
            questions: bank.questions.clone(),
        }
    }
}

/// POST /api/quiz/evaluate: one option index per question, in bank order
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub selections: Vec<usize>,
}

/// POST /api/quiz/sessions/{id}/answer
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub option_index: usize,
}

/// Snapshot of an in-progress quiz for rendering
#[derive(Debug, Serialize)]
pub struct QuizSessionView {
    pub session_id: Uuid,
    /// Zero-based position of the current question
    pub position: usize,
    pub total_questions: usize,
    pub answered: usize,
    pub is_complete: bool,
    pub question: Question,
    /// Option picked earlier for the current question, if the user went back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_index: Option<usize>,
}

impl QuizSessionView {
    pub fn new(session_id: Uuid, session: &QuizSession) -> Self {
        Self {
            session_id,
            position: session.position(),
            total_questions: session.total(),
            answered: session.answered_count(),
            is_complete: session.is_complete(),
            question: session.current_question().clone(),
            selected_index: session
                .answer_at(session.position())
                .map(|a| a.option_index),
        }
    }
}

/// Response to answering a question. `done` mirrors whether the quiz ended.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<QuizSessionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<QuizOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_record: Option<MoodRecord>,
}

// ============================================================================
// Mood
// ============================================================================

/// POST /api/mood
#[derive(Debug, Deserialize, Validate)]
pub struct MoodRequest {
    /// Date for this record. Default: today (UTC).
    pub date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 4, message = "Mood must be 1-4"))]
    pub mood: i16,

    #[validate(range(min = 1, max = 4, message = "Energy must be 1-4"))]
    pub energy: i16,

    #[validate(range(min = 1, max = 4, message = "Sleep must be 1-4"))]
    pub sleep: i16,

    #[validate(length(max = 500, message = "Notes must be under 500 characters"))]
    pub notes: Option<String>,
}

impl MoodRequest {
    pub fn to_entry(&self) -> MoodEntry {
        MoodEntry {
            mood: self.mood,
            energy: self.energy,
            sleep: self.sleep,
            notes: self
                .notes
                .as_deref()
                .unwrap_or_default()
                .chars()
                .take(NOTES_MAX_CHARS)
                .collect(),
        }
    }
}

/// GET /api/mood/stats
#[derive(Debug, Serialize)]
pub struct MoodStatsResponse {
    pub check_ins: usize,
    pub average_mood: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_day: Option<NaiveDate>,
    /// Only categories that occur, in order of first appearance
    pub distribution: Vec<DistributionSlice>,
    /// Every category in legend order, zero counts included
    pub categories: Vec<DistributionSlice>,
    pub journal_entries_this_week: i64,
}

// ============================================================================
// Journal
// ============================================================================

/// POST /api/journal
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJournalRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,

    /// One of the journal moods, or empty
    pub mood: Option<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "At most 20 tags"))]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct JournalListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct JournalEntryResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub date: chrono::DateTime<chrono::Utc>,
}

impl From<JournalEntry> for JournalEntryResponse {
    fn from(e: JournalEntry) -> Self {
        Self {
            id: e.id,
            title: e.title,
            content: e.content,
            mood: e.mood,
            tags: e.tags,
            date: e.created_at,
        }
    }
}

// ============================================================================
// Resources
// ============================================================================

/// GET /api/resources
#[derive(Debug, Deserialize)]
pub struct ResourceQuery {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub q: Option<String>,
}

// ============================================================================
// Community
// ============================================================================

/// POST /api/community/posts
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(max = 2000, message = "Post must be under 2000 characters"))]
    pub content: String,

    pub mood: Option<String>,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 tags"))]
    pub tags: Vec<String>,

    #[validate(length(max = 50, message = "Name must be under 50 characters"))]
    pub author_name: Option<String>,
}

/// POST /api/community/posts/{id}/comments
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(max = 1000, message = "Comment must be under 1000 characters"))]
    pub content: String,

    #[validate(length(max = 50, message = "Name must be under 50 characters"))]
    pub author_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub tag: Option<String>,
    pub limit: Option<i64>,
}

impl PostListQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 100)
    }
}

/// POST /api/community/posts/{id}/like
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes: i64,
}

// ============================================================================
// Profile
// ============================================================================

/// PUT /api/profile. Replaces all three fields; blank clears one.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 50, message = "Display name must be under 50 characters"))]
    pub display_name: Option<String>,

    #[validate(length(max = 500, message = "Bio must be under 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 2048, message = "Avatar URL is too long"))]
    pub avatar_url: Option<String>,
}

/// GET /api/profile. Users who never saved a profile get empty fields.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub initials: String,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ProfileResponse {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            id: user_id,
            display_name: None,
            bio: None,
            avatar_url: None,
            initials: initials(DEFAULT_AUTHOR),
            updated_at: None,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            initials: initials(p.display_name.as_deref().unwrap_or(DEFAULT_AUTHOR)),
            display_name: p.display_name,
            bio: p.bio,
            avatar_url: p.avatar_url,
            updated_at: Some(p.updated_at),
        }
    }
}

// ============================================================================
// Validation helpers
// ============================================================================

/// Validated, normalized journal entry fields
#[derive(Debug, PartialEq, Eq)]
pub struct NewJournalEntry {
    pub title: String,
    pub content: String,
    pub mood: String,
    pub tags: Vec<String>,
}

impl CreateJournalRequest {
    pub fn normalize(self) -> Result<NewJournalEntry, String> {
        let title = self.title.trim().to_string();
        let content = self.content.trim().to_string();
        if title.is_empty() || content.is_empty() {
            return Err("Title and content are required".into());
        }

        let mood = self.mood.map(|m| m.trim().to_string()).unwrap_or_default();
        if !mood.is_empty() && !JOURNAL_MOODS.contains(&mood.as_str()) {
            return Err(format!("Unknown journal mood '{}'", mood));
        }

        Ok(NewJournalEntry {
            title,
            content,
            mood,
            tags: normalize_tags(&self.tags, false),
        })
    }
}

/// Validated, normalized community post fields
#[derive(Debug, PartialEq, Eq)]
pub struct NewPost {
    /// Name given with the post, if any. Resolved against the profile later.
    pub author_name: Option<String>,
    pub content: String,
    pub mood: String,
    pub tags: Vec<String>,
}

impl CreatePostRequest {
    pub fn normalize(self) -> Result<NewPost, String> {
        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err("Please write something before posting".into());
        }

        let mood = self
            .mood
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_POST_MOOD.to_string());
        if !COMMUNITY_MOODS.contains(&mood.as_str()) {
            return Err(format!("Unknown mood '{}'", mood));
        }

        Ok(NewPost {
            author_name: explicit_author(self.author_name),
            content,
            mood,
            tags: normalize_tags(&self.tags, true),
        })
    }
}

impl CreateCommentRequest {
    /// Returns (explicit author_name, content)
    pub fn normalize(self) -> Result<(Option<String>, String), String> {
        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err("Comment cannot be empty".into());
        }
        Ok((explicit_author(self.author_name), content))
    }
}

fn explicit_author(name: Option<String>) -> Option<String> {
    non_blank(name)
}

/// Name shown on a post or comment: the one typed in, else the profile's
/// display name, else "Anonymous".
pub fn resolve_author(explicit: Option<String>, profile_name: Option<String>) -> String {
    explicit
        .or_else(|| non_blank(profile_name))
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl UpdateProfileRequest {
    pub fn normalize(self) -> Result<ProfileUpdate, String> {
        let avatar_url = non_blank(self.avatar_url);
        if let Some(url) = &avatar_url {
            let http = url.starts_with("https://") || url.starts_with("http://");
            if !http || !validator::validate_url(url.as_str()) {
                return Err("Avatar URL must be an http(s) link".into());
            }
        }

        Ok(ProfileUpdate {
            display_name: non_blank(self.display_name),
            bio: non_blank(self.bio),
            avatar_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str, mood: Option<&str>, tags: &[&str]) -> CreatePostRequest {
        CreatePostRequest {
            content: content.into(),
            mood: mood.map(String::from),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            author_name: None,
        }
    }

    #[test]
    fn range_parsing() {
        let q = |r: Option<&str>| RangeQuery { range: r.map(String::from) };
        assert_eq!(q(None).range_days(), Some(30));
        assert_eq!(q(Some("7d")).range_days(), Some(7));
        assert_eq!(q(Some("all")).range_days(), None);
        assert_eq!(q(Some("bogus")).range_days(), Some(30));

        let today = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        assert_eq!(
            q(Some("7d")).since(today),
            NaiveDate::from_ymd_opt(2025, 4, 1)
        );
    }

    #[test]
    fn mood_request_validates_ranges() {
        let ok = MoodRequest { date: None, mood: 4, energy: 1, sleep: 3, notes: None };
        assert!(ok.validate().is_ok());

        let bad = MoodRequest { date: None, mood: 5, energy: 0, sleep: 3, notes: None };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("mood"));
        assert!(fields.contains_key("energy"));
        assert!(!fields.contains_key("sleep"));
    }

    #[test]
    fn mood_request_without_notes_stores_empty_string() {
        let req = MoodRequest { date: None, mood: 2, energy: 2, sleep: 2, notes: None };
        assert_eq!(req.to_entry().notes, "");
    }

    #[test]
    fn post_defaults_mood_and_author() {
        let p = post("  Small wins today!  ", None, &["Meditation", " progress "]).normalize().unwrap();
        assert_eq!(p.content, "Small wins today!");
        assert_eq!(p.mood, DEFAULT_POST_MOOD);
        assert_eq!(p.author_name, None);
        assert_eq!(resolve_author(p.author_name, None), "Anonymous");
        assert_eq!(p.tags, vec!["meditation".to_string(), "progress".to_string()]);
    }

    #[test]
    fn author_prefers_typed_name_then_profile() {
        assert_eq!(
            resolve_author(Some("Sam".into()), Some("Samira K".into())),
            "Sam"
        );
        assert_eq!(resolve_author(None, Some("Samira K".into())), "Samira K");
        assert_eq!(resolve_author(None, Some("   ".into())), "Anonymous");

        let req = CreateCommentRequest {
            content: " thanks ".into(),
            author_name: Some("  ".into()),
        };
        assert_eq!(req.normalize().unwrap(), (None, "thanks".to_string()));
    }

    #[test]
    fn profile_update_trims_and_clears_blank_fields() {
        let req = UpdateProfileRequest {
            display_name: Some("  Riya  ".into()),
            bio: Some("".into()),
            avatar_url: Some(" https://example.com/avatar.jpg ".into()),
        };
        assert!(req.validate().is_ok());
        let update = req.normalize().unwrap();
        assert_eq!(update.display_name.as_deref(), Some("Riya"));
        assert_eq!(update.bio, None);
        assert_eq!(update.avatar_url.as_deref(), Some("https://example.com/avatar.jpg"));
    }

    #[test]
    fn profile_avatar_must_be_http_link() {
        let req = |url: &str| UpdateProfileRequest {
            display_name: None,
            bio: None,
            avatar_url: Some(url.into()),
        };
        assert!(req("javascript:alert(1)").normalize().is_err());
        assert!(req("not a url").normalize().is_err());
        assert!(req("http://cdn.example.org/me.png").normalize().is_ok());

        let long_name = UpdateProfileRequest {
            display_name: Some("x".repeat(51)),
            bio: None,
            avatar_url: None,
        };
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn profile_response_initials() {
        assert_eq!(ProfileResponse::empty(Uuid::nil()).initials, "A");
    }

    #[test]
    fn blank_post_is_rejected() {
        assert!(post("   ", None, &[]).normalize().is_err());
    }

    #[test]
    fn post_mood_must_be_known() {
        assert!(post("hi", Some("😓 Anxious"), &[]).normalize().is_ok());
        assert!(post("hi", Some("🤖 Robotic"), &[]).normalize().is_err());
    }

    #[test]
    fn journal_entry_keeps_tag_case_and_checks_mood() {
        let req = CreateJournalRequest {
            title: "Finding peace".into(),
            content: "Sat outside for a while.".into(),
            mood: Some("😌 Calm".into()),
            tags: vec!["Nature".into(), "".into(), "calm".into()],
        };
        let entry = req.normalize().unwrap();
        assert_eq!(entry.tags, vec!["Nature".to_string(), "calm".to_string()]);
        assert_eq!(entry.mood, "😌 Calm");

        let bad = CreateJournalRequest {
            title: "t".into(),
            content: "c".into(),
            mood: Some("😊 Accomplished".into()),
            tags: vec![],
        };
        assert!(bad.normalize().is_err());
    }

    #[test]
    fn journal_entry_requires_non_blank_text() {
        let req = CreateJournalRequest {
            title: "   ".into(),
            content: "something".into(),
            mood: None,
            tags: vec![],
        };
        assert!(req.normalize().is_err());
    }

    #[test]
    fn post_list_limit_is_clamped() {
        assert_eq!(PostListQuery { tag: None, limit: None }.limit(), 50);
        assert_eq!(PostListQuery { tag: None, limit: Some(500) }.limit(), 100);
        assert_eq!(PostListQuery { tag: None, limit: Some(0) }.limit(), 1);
    }
}
