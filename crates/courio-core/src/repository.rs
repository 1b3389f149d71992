//! Credential store traits.
//!
//! All operations are async and return [`CourioResult`]. Lookups that
//! may legitimately find nothing return `Option`, so "no such user" and
//! "no such session" are never reported as errors. Only connectivity,
//! constraint and decoding failures surface as `Err`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::CourioResult;
use crate::models::{
    session::{Session, SessionWithUser},
    user::{CreateUser, User},
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its generated id.
    ///
    /// Fails with `AlreadyExists` when the email is taken.
    fn create(&self, input: CreateUser) -> impl Future<Output = CourioResult<User>> + Send;
    /// Insert a user and its first session as one unit of work.
    ///
    /// `session_id` is the hashed token. Either both rows exist
    /// afterwards or neither does.
    fn create_with_session(
        &self,
        input: CreateUser,
        session_id: String,
        expires_at: DateTime<Utc>,
    ) -> impl Future<Output = CourioResult<(User, Session)>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CourioResult<Option<User>>> + Send;
    fn find_by_email(&self, email: &str)
    -> impl Future<Output = CourioResult<Option<User>>> + Send;
    /// Delete a user together with all of its sessions, atomically.
    fn delete(&self, id: Uuid) -> impl Future<Output = CourioResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

pub trait SessionRepository: Send + Sync {
    /// Insert a session. Fails with `NotFound` if the user does not exist.
    fn create(&self, session: Session) -> impl Future<Output = CourioResult<Session>> + Send;
    fn get_by_id(&self, id: &str) -> impl Future<Output = CourioResult<Option<Session>>> + Send;
    /// Look up a session and its user in a single query.
    fn find_with_user(
        &self,
        id: &str,
    ) -> impl Future<Output = CourioResult<Option<SessionWithUser>>> + Send;
    fn list_by_user(&self, user_id: Uuid)
    -> impl Future<Output = CourioResult<Vec<Session>>> + Send;
    fn update_expiry(
        &self,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> impl Future<Output = CourioResult<()>> + Send;
    /// Delete a single session. Deleting a missing id is not an error.
    fn delete(&self, id: &str) -> impl Future<Output = CourioResult<()>> + Send;
    /// Delete every session belonging to a user.
    fn delete_by_user(&self, user_id: Uuid) -> impl Future<Output = CourioResult<()>> + Send;
    /// Remove all expired sessions, returning how many were removed.
    fn delete_expired(&self) -> impl Future<Output = CourioResult<u64>> + Send;
}
