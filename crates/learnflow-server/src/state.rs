//! Shared state handed to every handler.

use learnflow_config::Environment;
use learnflow_core::ChatOrchestrator;

/// State shared across requests.
pub struct AppState {
    /// Request orchestrator owning every collaborator.
    pub orchestrator: ChatOrchestrator,
    /// Deployment environment reported by the health endpoint.
    pub environment: Environment,
}
