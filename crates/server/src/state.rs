//! Application state
//!
//! Shared across all handlers. The orchestrator and session manager are the
//! only process-wide services; contexts themselves live in the session map.

use std::sync::Arc;

use assistant_agent::ResponseOrchestrator;
use assistant_config::Settings;

use crate::session::SessionManager;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub settings: Arc<Settings>,
    /// Turn pipeline shared by every session
    pub orchestrator: Arc<ResponseOrchestrator>,
    /// Session store
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(settings: Settings, orchestrator: Arc<ResponseOrchestrator>) -> Self {
        let sessions = Arc::new(SessionManager::new(
            settings.language.default_language.clone(),
        ));
        Self {
            settings: Arc::new(settings),
            orchestrator,
            sessions,
        }
    }
}
