//! SurrealDB implementation of [`UserRepository`].
//!
//! Password hashing happens in the auth layer; this repository only
//! ever sees the finished PHC string.

use chrono::{DateTime, Utc};
use courio_core::error::CourioResult;
use courio_core::models::session::Session;
use courio_core::models::user::{CreateUser, Role, User};
use courio_core::repository::UserRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    name: String,
    email: String,
    password_hash: String,
    phone: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    name: String,
    email: String,
    password_hash: String,
    phone: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_role(s: &str) -> Result<Role, DbError> {
    s.parse::<Role>().map_err(DbError::Decode)
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        Ok(User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            phone: self.phone,
            role: parse_role(&self.role)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        UserRow {
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            phone: self.phone,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_user(id)
    }
}

const CREATE_USER: &str = "\
CREATE type::record('user', $id) SET \
    name = $name, \
    email = $email, \
    password_hash = $password_hash, \
    phone = $phone, \
    role = $role";

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<User>, DbError> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", id.to_string()))
            .await?;

        let rows: Vec<UserRow> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(|row| row.into_user(id))
            .transpose()
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> CourioResult<User> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(CREATE_USER)
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("password_hash", input.password_hash))
            .bind(("phone", input.phone))
            .bind(("role", input.role.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("user", e))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        info!(user_id = %id, "User created");
        Ok(row.into_user(id)?)
    }

    async fn create_with_session(
        &self,
        input: CreateUser,
        session_id: String,
        expires_at: DateTime<Utc>,
    ) -> CourioResult<(User, Session)> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let query = format!(
            "BEGIN TRANSACTION; \
             {CREATE_USER}; \
             CREATE type::record('session', $session_id) SET \
                 owner = type::record('user', $id), \
                 expires_at = $expires_at; \
             COMMIT TRANSACTION;"
        );

        self.db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("password_hash", input.password_hash))
            .bind(("phone", input.phone))
            .bind(("role", input.role.as_str().to_string()))
            .bind(("session_id", session_id.clone()))
            .bind(("expires_at", expires_at))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::from_statement("user", e))?;

        let user = self.fetch(id).await?.ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        info!(user_id = %id, "User created with initial session");
        Ok((
            user,
            Session {
                id: session_id,
                user_id: id,
                expires_at,
            },
        ))
    }

    async fn get_by_id(&self, id: Uuid) -> CourioResult<Option<User>> {
        Ok(self.fetch(id).await?)
    }

    async fn find_by_email(&self, email: &str) -> CourioResult<Option<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let user = rows
            .into_iter()
            .next()
            .map(UserRowWithId::try_into_user)
            .transpose()?;

        debug!(found = user.is_some(), "User lookup by email completed");
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> CourioResult<()> {
        self.db
            .query(
                "BEGIN TRANSACTION; \
                 DELETE session WHERE owner = type::record('user', $id); \
                 DELETE type::record('user', $id); \
                 COMMIT TRANSACTION;",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::from_statement("user", e))?;

        info!(user_id = %id, "User and sessions deleted");
        Ok(())
    }
}
