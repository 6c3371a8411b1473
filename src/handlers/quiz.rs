use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::db::mood_records::upsert_mood_record;
use crate::dto::{
    AnswerRequest, AnswerResponse, DeleteResponse, EvaluateRequest, QuestionBankResponse,
    QuizSessionView,
};
use crate::error::{AppError, AppResult};
use crate::services::quiz_engine::{Advance, Answer, QuizError, QuizSession};
use crate::services::scoring::{derive_mood_entry, QuizOutcome};
use crate::AppState;

fn session_not_found() -> AppError {
    AppError::NotFound("Quiz session not found".into())
}

pub async fn get_questions(State(state): State<AppState>) -> Json<QuestionBankResponse> {
    Json(QuestionBankResponse::from(state.quiz_bank.as_ref()))
}

/// Score a full set of selections without saving anything (guest mode).
pub async fn evaluate(
    State(state): State<AppState>,
    Json(body): Json<EvaluateRequest>,
) -> AppResult<Json<QuizOutcome>> {
    let bank = state.quiz_bank.clone();
    if body.selections.len() != bank.len() {
        return Err(AppError::Validation(format!(
            "Expected {} selections, got {}",
            bank.len(),
            body.selections.len()
        )));
    }

    let mut session = QuizSession::new(bank.clone());
    for &index in &body.selections {
        session.answer_current(index)?;
    }
    let answers = session.completed_answers()?;

    Ok(Json(QuizOutcome::evaluate(&bank, &answers)))
}

pub async fn start_session(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<QuizSessionView>> {
    let id = state
        .quiz_sessions
        .start(auth_user.id, state.quiz_bank.clone())
        .await;

    tracing::debug!(user_id = %auth_user.id, session_id = %id, "Quiz session started");

    state
        .quiz_sessions
        .with_session(id, auth_user.id, |s| QuizSessionView::new(id, s))
        .await
        .map(Json)
        .ok_or_else(session_not_found)
}

pub async fn get_session(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<QuizSessionView>> {
    state
        .quiz_sessions
        .with_session(session_id, auth_user.id, |s| QuizSessionView::new(session_id, s))
        .await
        .map(Json)
        .ok_or_else(session_not_found)
}

pub async fn abandon_session(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = state.quiz_sessions.remove(session_id, auth_user.id).await;
    Ok(Json(DeleteResponse {
        deleted,
        id: session_id,
    }))
}

pub async fn go_back(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<QuizSessionView>> {
    let view = state
        .quiz_sessions
        .with_session(session_id, auth_user.id, |s| {
            s.go_to_previous()?;
            Ok::<_, QuizError>(QuizSessionView::new(session_id, s))
        })
        .await
        .ok_or_else(session_not_found)??;

    Ok(Json(view))
}

enum Step {
    Next(QuizSessionView),
    Done(Vec<Answer>),
}

pub async fn answer(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<AnswerRequest>,
) -> AppResult<Json<AnswerResponse>> {
    let step = state
        .quiz_sessions
        .with_session(session_id, auth_user.id, |s| {
            let step = match s.answer_current(body.option_index)? {
                Advance::Next => Step::Next(QuizSessionView::new(session_id, s)),
                Advance::Done => Step::Done(s.completed_answers()?),
            };
            Ok::<_, QuizError>(step)
        })
        .await
        .ok_or_else(session_not_found)??;

    match step {
        Step::Next(view) => Ok(Json(AnswerResponse {
            done: false,
            session: Some(view),
            result: None,
            mood_record: None,
        })),
        Step::Done(answers) => finish(&state, &auth_user, session_id, answers).await.map(Json),
    }
}

/// Retry persisting a finished quiz whose first save failed.
pub async fn save_session(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<AnswerResponse>> {
    let answers = state
        .quiz_sessions
        .with_session(session_id, auth_user.id, |s| s.completed_answers())
        .await
        .ok_or_else(session_not_found)??;

    finish(&state, &auth_user, session_id, answers).await.map(Json)
}

/// Score the quiz and fold it into today's mood record. The session is only
/// dropped once the write succeeds, so a failed save can be retried.
async fn finish(
    state: &AppState,
    auth_user: &AuthUser,
    session_id: Uuid,
    answers: Vec<Answer>,
) -> AppResult<AnswerResponse> {
    let bank = &state.quiz_bank;
    let outcome = QuizOutcome::evaluate(bank, &answers);
    let entry = derive_mood_entry(bank, &answers);
    let today = Utc::now().date_naive();

    let record = upsert_mood_record(&state.db, auth_user.id, today, &entry)
        .await
        .map_err(|e| {
            tracing::error!(
                user_id = %auth_user.id,
                session_id = %session_id,
                error = %e,
                "Failed to save quiz result"
            );
            AppError::Database(e)
        })?;

    state.quiz_sessions.remove(session_id, auth_user.id).await;

    tracing::info!(
        user_id = %auth_user.id,
        score = outcome.score,
        band = outcome.band.title,
        "Daily check completed"
    );

    Ok(AnswerResponse {
        done: true,
        session: None,
        result: Some(outcome),
        mood_record: Some(record),
    })
}
