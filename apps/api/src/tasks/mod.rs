//! AI task orchestration: cover letters, interview question sets, answer scoring.
//!
//! Flow per call: validate → build prompt → complete → extract → check shape.
//! Completion and extraction failures never reach the caller; they become the
//! task's fallback value plus one user-facing notice.
//! All model calls go through `llm_client::CompletionClient`.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::extract::{extract_json, JsonShape};
use crate::llm_client::CompletionClient;

pub mod defaults;
pub mod handlers;
pub mod models;
pub mod prompts;

use defaults::{
    default_feedback, default_questions, ANSWER_SCORING_NOTICE, COVER_LETTER_FALLBACK,
    COVER_LETTER_NOTICE, QUESTION_SET_NOTICE,
};
use models::{
    feedback_from_value, questions_from_value, AnswerFeedback, AnswerScoringRequest,
    CoverLetterRequest, InterviewQuestion, QuestionSetRequest,
};

/// Favor coherence.
pub const COVER_LETTER_TEMPERATURE: f32 = 0.7;
/// Favor variety between runs.
pub const QUESTION_SET_TEMPERATURE: f32 = 0.9;
pub const ANSWER_SCORING_TEMPERATURE: f32 = 0.7;

/// Raised before any network call when a request is unusable.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Why a task fell back to its default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The completion call failed (network, auth, upstream).
    Completion,
    /// The model replied, but nothing usable could be parsed out of it.
    Extraction,
}

/// Result of one task invocation that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome<T> {
    Success(T),
    Fallback {
        value: T,
        reason: FallbackReason,
        notice: &'static str,
    },
}

impl<T> TaskOutcome<T> {
    pub fn reason(&self) -> Option<FallbackReason> {
        match self {
            TaskOutcome::Success(_) => None,
            TaskOutcome::Fallback { reason, .. } => Some(*reason),
        }
    }

    pub fn into_value(self) -> T {
        match self {
            TaskOutcome::Success(value) | TaskOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self {
            TaskOutcome::Success(_) => None,
            TaskOutcome::Fallback { notice, .. } => Some(*notice),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TaskOutcome::Fallback { .. })
    }
}

/// Per-task wiring: how to call the model and what to do when it goes wrong.
struct TaskSpec<T> {
    name: &'static str,
    system: String,
    temperature: f32,
    notice: &'static str,
    fallback: fn() -> T,
}

/// Runs the three AI tasks against a completion backend.
///
/// Holds no per-call state; share one instance behind an `Arc`.
#[derive(Clone)]
pub struct Orchestrator {
    llm: Arc<dyn CompletionClient>,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    /// Drafts a cover letter. The fallback is an empty string.
    pub async fn generate_cover_letter(
        &self,
        request: &CoverLetterRequest,
    ) -> Result<TaskOutcome<String>, TaskError> {
        request.validate()?;

        let task = TaskSpec {
            name: "cover_letter",
            system: prompts::COVER_LETTER_SYSTEM.to_string(),
            temperature: COVER_LETTER_TEMPERATURE,
            notice: COVER_LETTER_NOTICE,
            fallback: || COVER_LETTER_FALLBACK.to_string(),
        };
        let prompt = prompts::build_cover_letter_prompt(request);

        Ok(self
            .run(task, &prompt, |raw| {
                let text = raw.trim();
                (!text.is_empty()).then(|| text.to_string())
            })
            .await)
    }

    /// Generates interview questions (5 requested, at least 1 accepted).
    /// The fallback is the fixed set of 5 generic questions.
    pub async fn generate_question_set(
        &self,
        request: &QuestionSetRequest,
    ) -> Result<TaskOutcome<Vec<InterviewQuestion>>, TaskError> {
        request.validate()?;

        let task = TaskSpec {
            name: "question_set",
            system: prompts::question_set_system(),
            temperature: QUESTION_SET_TEMPERATURE,
            notice: QUESTION_SET_NOTICE,
            fallback: default_questions,
        };
        let prompt = prompts::build_question_set_prompt(request);

        Ok(self
            .run(task, &prompt, |raw| {
                extract_json(raw, JsonShape::Array)
                    .into_value()
                    .and_then(questions_from_value)
            })
            .await)
    }

    /// Scores a free-text answer. The fallback is generic feedback rated 70.
    pub async fn score_answer(
        &self,
        request: &AnswerScoringRequest,
    ) -> Result<TaskOutcome<AnswerFeedback>, TaskError> {
        request.validate()?;

        let task = TaskSpec {
            name: "answer_scoring",
            system: prompts::answer_scoring_system(),
            temperature: ANSWER_SCORING_TEMPERATURE,
            notice: ANSWER_SCORING_NOTICE,
            fallback: default_feedback,
        };
        let prompt = prompts::build_answer_scoring_prompt(request);

        Ok(self
            .run(task, &prompt, |raw| {
                extract_json(raw, JsonShape::Object)
                    .into_value()
                    .and_then(feedback_from_value)
            })
            .await)
    }

    /// One completion call, then `parse`. Any failure yields the task fallback.
    async fn run<T>(
        &self,
        task: TaskSpec<T>,
        prompt: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> TaskOutcome<T> {
        let completion = match self.llm.complete(&task.system, prompt, task.temperature).await {
            Ok(completion) => completion,
            Err(e) => {
                warn!("{} completion failed, using fallback: {e}", task.name);
                return fallback(task, FallbackReason::Completion);
            }
        };

        match parse(&completion.text) {
            Some(value) => {
                info!("{} completed", task.name);
                TaskOutcome::Success(value)
            }
            None => {
                warn!(
                    "{} response unusable, using fallback: {:?}",
                    task.name,
                    completion.text.chars().take(120).collect::<String>()
                );
                fallback(task, FallbackReason::Extraction)
            }
        }
    }
}

fn fallback<T>(task: TaskSpec<T>, reason: FallbackReason) -> TaskOutcome<T> {
    TaskOutcome::Fallback {
        value: (task.fallback)(),
        reason,
        notice: task.notice,
    }
}
