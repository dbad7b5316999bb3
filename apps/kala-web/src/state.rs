//! Shared application state.

use std::sync::Arc;

use kala_db::Database;

use crate::auth::SessionManager;
use crate::config::WebConfig;

/// Handed to every handler by axum. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: Arc<SessionManager>,
    pub config: Arc<WebConfig>,
}

impl AppState {
    pub fn new(db: Database, config: WebConfig) -> Self {
        let sessions = SessionManager::new(config.secret_key.clone(), config.session_lifetime_secs);
        AppState {
            db,
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        }
    }
}
