//! Session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::SessionUser;

/// A stored session.
///
/// `id` is the hex SHA-256 digest of the session token, never the token
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Short prefix of the id, safe for log lines.
    pub fn log_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// A session joined with its owning user, as returned by a single
/// store lookup.
///
/// This is also the request-scoped "current user" value: it is produced
/// once per request by token validation and passed explicitly to
/// whatever needs it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionWithUser {
    pub session: Session,
    pub user: SessionUser,
}
