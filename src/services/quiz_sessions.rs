use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::services::quiz_bank::QuestionBank;
use crate::services::quiz_engine::QuizSession;

/// In-progress quizzes, in memory (single-instance deployments).
/// Each user has at most one open session.
#[derive(Clone)]
pub struct QuizSessionStore {
    entries: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    ttl: Duration,
}

struct SessionEntry {
    user_id: Uuid,
    session: QuizSession,
    touched: Instant,
}

impl QuizSessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Open a fresh session for `user_id`, discarding any other one they had.
    pub async fn start(&self, user_id: Uuid, bank: Arc<QuestionBank>) -> Uuid {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, e| e.user_id != user_id);

        let id = Uuid::new_v4();
        entries.insert(
            id,
            SessionEntry {
                user_id,
                session: QuizSession::new(bank),
                touched: Instant::now(),
            },
        );
        id
    }

    /// Run `f` against the session if it exists and belongs to `user_id`.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        user_id: Uuid,
        f: impl FnOnce(&mut QuizSession) -> R,
    ) -> Option<R> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(&id).filter(|e| e.user_id == user_id)?;
        entry.touched = Instant::now();
        Some(f(&mut entry.session))
    }

    pub async fn remove(&self, id: Uuid, user_id: Uuid) -> bool {
        let mut entries = self.entries.lock().await;
        match entries.get(&id) {
            Some(e) if e.user_id == user_id => {
                entries.remove(&id);
                true
            }
            _ => false,
        }
    }

    /// Drop sessions idle longer than the TTL. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, e| now.duration_since(e.touched) < self.ttl);
        before - entries.len()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
