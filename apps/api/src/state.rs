use std::sync::Arc;

use crate::tasks::Orchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless across calls, so one instance serves every request.
    pub orchestrator: Arc<Orchestrator>,
}
