//! SurrealDB implementation of [`SessionRepository`].
//!
//! Session records are keyed by the token digest and link to their
//! owner through a `record<user>` field, so the session+user lookup is a
//! single statement that follows the link. A link to a user that is
//! gone reads as no session.

use chrono::{DateTime, Utc};
use courio_core::error::CourioResult;
use courio_core::models::session::{Session, SessionWithUser};
use courio_core::models::user::{Role, SessionUser};
use courio_core::repository::SessionRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::DbError;

const SESSION_FIELDS: &str =
    "meta::id(id) AS record_id, meta::id(owner) AS owner_id, expires_at";

#[derive(Debug, SurrealValue)]
struct SessionRow {
    record_id: String,
    owner_id: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct SessionUserRow {
    record_id: String,
    owner_id: String,
    expires_at: DateTime<Utc>,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    role: Option<String>,
}

#[derive(Debug, SurrealValue)]
struct IdRow {
    #[allow(dead_code)]
    record_id: String,
}

fn parse_owner(raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Decode(format!("invalid owner UUID: {e}")))
}

impl SessionRow {
    fn try_into_session(self) -> Result<Session, DbError> {
        Ok(Session {
            user_id: parse_owner(&self.owner_id)?,
            id: self.record_id,
            expires_at: self.expires_at,
        })
    }
}

impl SessionUserRow {
    /// `None` when the owner link points at a user that no longer exists.
    fn try_into_session_with_user(self) -> Result<Option<SessionWithUser>, DbError> {
        let user_id = parse_owner(&self.owner_id)?;
        let (Some(name), Some(email), Some(role)) = (self.name, self.email, self.role) else {
            return Ok(None);
        };
        let role = role.parse::<Role>().map_err(DbError::Decode)?;
        Ok(Some(SessionWithUser {
            session: Session {
                id: self.record_id,
                user_id,
                expires_at: self.expires_at,
            },
            user: SessionUser {
                id: user_id,
                name,
                email,
                phone: self.phone,
                role,
            },
        }))
    }
}

/// SurrealDB implementation of the Session repository.
#[derive(Clone)]
pub struct SurrealSessionRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSessionRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn user_exists(&self, user_id: Uuid) -> Result<bool, DbError> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id FROM type::record('user', $user_id)")
            .bind(("user_id", user_id.to_string()))
            .await?;
        let rows: Vec<IdRow> = result.take(0)?;
        Ok(!rows.is_empty())
    }
}

impl<C: Connection> SessionRepository for SurrealSessionRepository<C> {
    async fn create(&self, session: Session) -> CourioResult<Session> {
        if !self.user_exists(session.user_id).await? {
            return Err(DbError::NotFound {
                entity: "user".into(),
                id: session.user_id.to_string(),
            }
            .into());
        }

        self.db
            .query(
                "CREATE type::record('session', $id) SET \
                 owner = type::record('user', $user_id), \
                 expires_at = $expires_at",
            )
            .bind(("id", session.id.clone()))
            .bind(("user_id", session.user_id.to_string()))
            .bind(("expires_at", session.expires_at))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::from_statement("session", e))?;

        info!(
            session = %session.log_id(),
            user_id = %session.user_id,
            "Session created"
        );
        Ok(session)
    }

    async fn get_by_id(&self, id: &str) -> CourioResult<Option<Session>> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {SESSION_FIELDS} FROM type::record('session', $id)"
            ))
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SessionRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .next()
            .map(SessionRow::try_into_session)
            .transpose()?)
    }

    async fn find_with_user(&self, id: &str) -> CourioResult<Option<SessionWithUser>> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {SESSION_FIELDS}, \
                 owner.name AS name, \
                 owner.email AS email, \
                 owner.phone AS phone, \
                 owner.role AS role \
                 FROM type::record('session', $id)"
            ))
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SessionUserRow> = result.take(0).map_err(DbError::from)?;
        let Some(row) = rows.into_iter().next() else {
            debug!("Session lookup found nothing");
            return Ok(None);
        };

        let owner_id = row.owner_id.clone();
        let found = row.try_into_session_with_user()?;
        if found.is_none() {
            warn!(owner_id = %owner_id, "Session owner is missing; reporting no session");
        }

        debug!(found = found.is_some(), "Session lookup completed");
        Ok(found)
    }

    async fn list_by_user(&self, user_id: Uuid) -> CourioResult<Vec<Session>> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {SESSION_FIELDS} FROM session \
                 WHERE owner = type::record('user', $user_id) \
                 ORDER BY expires_at DESC"
            ))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SessionRow> = result.take(0).map_err(DbError::from)?;
        let sessions = rows
            .into_iter()
            .map(SessionRow::try_into_session)
            .collect::<Result<Vec<_>, DbError>>()?;
        Ok(sessions)
    }

    async fn update_expiry(&self, id: &str, expires_at: DateTime<Utc>) -> CourioResult<()> {
        self.db
            .query("UPDATE type::record('session', $id) SET expires_at = $expires_at")
            .bind(("id", id.to_string()))
            .bind(("expires_at", expires_at))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::from_statement("session", e))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> CourioResult<()> {
        self.db
            .query("DELETE type::record('session', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::from_statement("session", e))?;

        Ok(())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> CourioResult<()> {
        self.db
            .query("DELETE session WHERE owner = type::record('user', $user_id)")
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::from_statement("session", e))?;

        info!(user_id = %user_id, "All sessions deleted for user");
        Ok(())
    }

    async fn delete_expired(&self) -> CourioResult<u64> {
        let mut result = self
            .db
            .query("DELETE session WHERE expires_at <= time::now() RETURN BEFORE")
            .await
            .map_err(DbError::from)?;

        let removed: Vec<surrealdb_types::Value> = result.take(0).map_err(DbError::from)?;
        let total = removed.len() as u64;
        if total > 0 {
            info!(removed = total, "Expired sessions purged");
        }
        Ok(total)
    }
}
