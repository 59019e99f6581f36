use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{
    api::{ApiClient, RequestFailure},
    dto::auth::{LoginRequest, LoginResponse},
    error::{AppError, AppResult},
};

/// A signed-in operator. Lives in memory only; the backend issues no token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub username: String,
    pub started_at: DateTime<Utc>,
}

pub struct SessionManager {
    api: ApiClient,
    current: RwLock<Option<Session>>,
}

impl SessionManager {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            current: RwLock::new(None),
        }
    }

    /// Check credentials with the backend and start a session on success.
    ///
    /// A previous session, if any, is replaced.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Please enter both username and password".into(),
            ));
        }

        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let reply: LoginResponse = match self.api.post_for("auth/login", &payload).await {
            Ok(reply) => reply,
            Err(RequestFailure::Status(status)) => {
                tracing::info!(username, status = %status, "login rejected");
                return Err(AppError::Unauthorized);
            }
            Err(RequestFailure::Transport(err)) if err.is_decode() => {
                tracing::warn!(username, error = %err, "unreadable login reply");
                return Err(AppError::Load("Unexpected response from the server".into()));
            }
            Err(err) => {
                tracing::warn!(username, error = %err, "login request failed");
                return Err(AppError::Load("Unable to reach the server".into()));
            }
        };
        if !reply.success {
            tracing::info!(username, message = %reply.message, "login rejected");
            return Err(AppError::Unauthorized);
        }

        let session = Session {
            id: Uuid::new_v4(),
            username: username.to_string(),
            started_at: Utc::now(),
        };
        *self.current.write() = Some(session.clone());
        tracing::info!(username, session_id = %session.id, "session started");
        Ok(session)
    }

    /// End the current session. Returns it so callers can report who left.
    pub fn logout(&self) -> Option<Session> {
        let ended = self.current.write().take();
        if let Some(session) = &ended {
            tracing::info!(username = %session.username, session_id = %session.id, "session ended");
        }
        ended
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// Fails with `Unauthorized` unless someone is signed in.
    pub fn require(&self) -> AppResult<Session> {
        self.current().ok_or(AppError::Unauthorized)
    }
}
