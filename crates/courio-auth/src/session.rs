//! Session manager: issues, validates, renews and revokes sessions.
//!
//! Validation is a sliding window. A session that is used during the
//! last part of its life is pushed out to a full lifetime again, an
//! expired one is deleted on sight.

use chrono::{DateTime, Utc};
use courio_core::error::CourioResult;
use courio_core::models::session::{Session, SessionWithUser};
use courio_core::repository::SessionRepository;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::token;

pub struct SessionManager<S: SessionRepository> {
    session_repo: S,
    config: AuthConfig,
}

impl<S: SessionRepository> SessionManager<S> {
    pub fn new(session_repo: S, config: AuthConfig) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Expiry assigned to a session created or renewed at `now`.
    pub fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.config.session_lifetime()
    }

    /// Store a new session for `user_id` under the digest of `token`.
    pub async fn create_session(&self, token: &str, user_id: Uuid) -> CourioResult<Session> {
        let session = Session {
            id: token::hash_session_token(token),
            user_id,
            expires_at: self.expiry_from(Utc::now()),
        };
        self.session_repo.create(session).await
    }

    /// Resolve a raw token to its session and user.
    ///
    /// Returns `None` for unknown and expired tokens; expired sessions
    /// are deleted as a side effect.
    pub async fn validate_session_token(
        &self,
        token: &str,
    ) -> CourioResult<Option<SessionWithUser>> {
        let session_id = token::hash_session_token(token);
        let Some(mut found) = self.session_repo.find_with_user(&session_id).await? else {
            debug!("Unknown session token presented");
            return Ok(None);
        };

        let now = Utc::now();
        if found.session.is_expired_at(now) {
            self.session_repo.delete(&found.session.id).await?;
            info!(
                session = %found.session.log_id(),
                user_id = %found.user.id,
                "Expired session removed"
            );
            return Ok(None);
        }

        if now >= found.session.expires_at - self.config.renewal_threshold() {
            let expires_at = self.expiry_from(now);
            self.session_repo
                .update_expiry(&found.session.id, expires_at)
                .await?;
            found.session.expires_at = expires_at;
            debug!(session = %found.session.log_id(), "Session renewed");
        }

        Ok(Some(found))
    }

    /// Delete a single session. Missing sessions are ignored.
    pub async fn invalidate_session(&self, session_id: &str) -> CourioResult<()> {
        self.session_repo.delete(session_id).await
    }

    /// Delete every session belonging to `user_id`.
    pub async fn invalidate_user_sessions(&self, user_id: Uuid) -> CourioResult<()> {
        self.session_repo.delete_by_user(user_id).await
    }

    /// Sessions currently stored for `user_id`, newest expiry first.
    pub async fn list_user_sessions(&self, user_id: Uuid) -> CourioResult<Vec<Session>> {
        self.session_repo.list_by_user(user_id).await
    }

    /// Bulk-remove expired sessions, returning how many went away.
    pub async fn purge_expired(&self) -> CourioResult<u64> {
        self.session_repo.delete_expired().await
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
