//! Axum route handlers for the task API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tasks::models::{
    AnswerFeedback, AnswerScoringRequest, CoverLetterRequest, InterviewQuestion,
    QuestionSetRequest,
};
use crate::tasks::{FallbackReason, TaskOutcome};

// ────────────────────────────────────────────────────────────────────────────
// Response envelope
// ────────────────────────────────────────────────────────────────────────────

/// Body returned by every task endpoint, whether the model delivered or not.
#[derive(Debug, Serialize)]
pub struct TaskResponse<T> {
    pub result: T,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    pub notice: Option<&'static str>,
}

impl<T> From<TaskOutcome<T>> for TaskResponse<T> {
    fn from(outcome: TaskOutcome<T>) -> Self {
        TaskResponse {
            fallback: outcome.is_fallback(),
            fallback_reason: outcome.reason(),
            notice: outcome.notice(),
            result: outcome.into_value(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letters
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<TaskResponse<String>>, AppError> {
    let outcome = state.orchestrator.generate_cover_letter(&request).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/interviews/questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(request): Json<QuestionSetRequest>,
) -> Result<Json<TaskResponse<Vec<InterviewQuestion>>>, AppError> {
    let outcome = state.orchestrator.generate_question_set(&request).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/interviews/feedback
pub async fn handle_score_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerScoringRequest>,
) -> Result<Json<TaskResponse<AnswerFeedback>>, AppError> {
    let outcome = state.orchestrator.score_answer(&request).await?;
    Ok(Json(outcome.into()))
}
