pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::tasks::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Cover letters
        .route(
            "/api/v1/cover-letters",
            post(handlers::handle_generate_cover_letter),
        )
        // Interview practice
        .route(
            "/api/v1/interviews/questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/v1/interviews/feedback",
            post(handlers::handle_score_answer),
        )
        .with_state(state)
}
