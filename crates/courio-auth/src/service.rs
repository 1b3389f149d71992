//! Authentication service: signup, login, logout and account deletion.

use chrono::{DateTime, Utc};
use courio_core::error::{CourioError, CourioResult};
use courio_core::models::session::SessionWithUser;
use courio_core::models::user::{CreateUser, Role};
use courio_core::repository::{SessionRepository, UserRepository};
use tracing::{debug, info};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::session::SessionManager;
use crate::token;

/// Input for the signup flow.
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Input for the login flow.
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Raw opaque token (hand to the client, never stored).
    pub token: String,
    /// When the backing session expires; the cookie should match.
    pub expires_at: DateTime<Utc>,
}

/// Authentication service.
///
/// Generic over repository implementations so that the auth layer
/// has no dependency on the database crate.
pub struct AuthService<U: UserRepository, S: SessionRepository> {
    user_repo: U,
    sessions: SessionManager<S>,
    config: AuthConfig,
    /// Verified against on the unknown-email path so that both login
    /// failures cost one password hash.
    dummy_hash: String,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    pub fn new(user_repo: U, session_repo: S, config: AuthConfig) -> Result<Self, AuthError> {
        config.validate()?;
        let dummy_hash = password::hash_password(&token::generate_session_token(), &config)?;
        Ok(Self {
            user_repo,
            sessions: SessionManager::new(session_repo, config.clone()),
            config,
            dummy_hash,
        })
    }

    /// The session manager, for per-request token validation.
    pub fn sessions(&self) -> &SessionManager<S> {
        &self.sessions
    }

    /// Register a new client account and open its first session.
    ///
    /// Returns `None` when the email is already registered.
    pub async fn signup(&self, input: SignupInput) -> CourioResult<Option<IssuedToken>> {
        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            debug!("Signup rejected: email already registered");
            return Ok(None);
        }

        let password_hash = password::hash_password(&input.password, &self.config)?;
        let raw_token = token::generate_session_token();
        let expires_at = self.sessions.expiry_from(Utc::now());

        let created = self
            .user_repo
            .create_with_session(
                CreateUser {
                    name: input.name,
                    email: input.email,
                    password_hash,
                    phone: input.phone,
                    role: Role::Client,
                },
                token::hash_session_token(&raw_token),
                expires_at,
            )
            .await;

        let (user, session) = match created {
            Ok(pair) => pair,
            Err(CourioError::AlreadyExists { .. }) => {
                debug!("Signup lost a race on a duplicate email");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        info!(user_id = %user.id, session = %session.log_id(), "User signed up");
        Ok(Some(IssuedToken {
            token: raw_token,
            expires_at: session.expires_at,
        }))
    }

    /// Authenticate with email and password and open a new session.
    ///
    /// Unknown email and wrong password both return `None`.
    pub async fn login(&self, input: LoginInput) -> CourioResult<Option<IssuedToken>> {
        let pepper = self.config.pepper.as_deref();

        let Some(user) = self.user_repo.find_by_email(&input.email).await? else {
            password::verify_password(&input.password, &self.dummy_hash, pepper)?;
            debug!("Login rejected: unknown email");
            return Ok(None);
        };

        if !password::verify_password(&input.password, &user.password_hash, pepper)? {
            debug!(user_id = %user.id, "Login rejected: wrong password");
            return Ok(None);
        }

        let raw_token = token::generate_session_token();
        let session = self.sessions.create_session(&raw_token, user.id).await?;

        info!(user_id = %user.id, session = %session.log_id(), "User logged in");
        Ok(Some(IssuedToken {
            token: raw_token,
            expires_at: session.expires_at,
        }))
    }

    /// End every session of the authenticated user.
    pub async fn logout(&self, current: &SessionWithUser) -> CourioResult<()> {
        self.sessions
            .invalidate_user_sessions(current.user.id)
            .await?;
        info!(user_id = %current.user.id, "User logged out");
        Ok(())
    }

    /// Delete the authenticated user together with all of its sessions.
    pub async fn delete_account(&self, current: &SessionWithUser) -> CourioResult<()> {
        self.user_repo.delete(current.user.id).await?;
        info!(user_id = %current.user.id, "Account deleted");
        Ok(())
    }
}
