use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::{Error, Result};

pub const APP_NAME: &str = "studywithai_api";
pub const USER_ID: &str = "api_user";

/// A conversation-scoped state container keyed by identifier. Lives only in
/// process memory for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub app_name: String,
    pub user_id: String,
    pub state: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            app_name: APP_NAME.to_string(),
            user_id: USER_ID.to_string(),
            state: HashMap::new(),
            created_at: Utc::now(),
        }
    }
}

/// In-memory session registry shared across requests. Owned by application
/// state and injected into the runner rather than living as a process global.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the session for `session_id`, creating it with empty state if
    /// absent. Lookup and insert happen under one lock, so concurrent calls
    /// for the same id observe a single session.
    pub fn get_or_create(&self, session_id: &str) -> Result<Session> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| Error::internal(format!("Session registry lock poisoned: {e}")))?;

        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!("Creating session: {}", session_id);
                Session::new(session_id)
            })
            .clone();

        Ok(session)
    }

    pub fn get(&self, session_id: &str) -> Result<Option<Session>> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|e| Error::internal(format!("Session registry lock poisoned: {e}")))?;
        Ok(sessions.get(session_id).cloned())
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
