//! Authentication configuration.

use chrono::Duration;

use crate::error::AuthError;

/// Default name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "auth-session";

/// Longest accepted session lifetime or renewal threshold (10 years).
pub const MAX_SESSION_SECS: u64 = 315_360_000;

fn bounded_secs(secs: u64) -> Duration {
    let secs = i64::try_from(secs.min(MAX_SESSION_SECS)).unwrap_or(i64::MAX);
    Duration::try_seconds(secs).unwrap_or(Duration::MAX)
}

/// Configuration for the session manager and authentication facade.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session lifetime in seconds (default: 2_592_000 = 30 days).
    pub session_lifetime_secs: u64,
    /// Remaining lifetime below which a validated session is renewed
    /// (default: 1_296_000 = 15 days).
    pub renewal_threshold_secs: u64,
    /// Argon2id memory cost in KiB (default: 19456).
    pub argon2_memory_kib: u32,
    /// Argon2id iteration count (default: 2).
    pub argon2_iterations: u32,
    /// Argon2id parallelism (default: 1).
    pub argon2_parallelism: u32,
    /// Optional pepper prepended to passwords before hashing and
    /// verification.
    pub pepper: Option<String>,
    /// Cookie name used by the transport layer.
    pub cookie_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_lifetime_secs: 2_592_000,
            renewal_threshold_secs: 1_296_000,
            argon2_memory_kib: 19_456,
            argon2_iterations: 2,
            argon2_parallelism: 1,
            pepper: None,
            cookie_name: SESSION_COOKIE_NAME.into(),
        }
    }
}

impl AuthConfig {
    /// Session lifetime, capped at [`MAX_SESSION_SECS`].
    pub fn session_lifetime(&self) -> Duration {
        bounded_secs(self.session_lifetime_secs)
    }

    /// Renewal threshold, capped at [`MAX_SESSION_SECS`].
    pub fn renewal_threshold(&self) -> Duration {
        bounded_secs(self.renewal_threshold_secs)
    }

    /// Reject configurations that would make sessions or hashing
    /// misbehave.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.session_lifetime_secs == 0 {
            return Err(AuthError::InvalidConfig(
                "session lifetime must be positive".into(),
            ));
        }
        if self.session_lifetime_secs > MAX_SESSION_SECS {
            return Err(AuthError::InvalidConfig(format!(
                "session lifetime exceeds {MAX_SESSION_SECS} seconds"
            )));
        }
        if self.renewal_threshold_secs >= self.session_lifetime_secs {
            return Err(AuthError::InvalidConfig(
                "renewal threshold must be shorter than the session lifetime".into(),
            ));
        }
        if self.cookie_name.is_empty() {
            return Err(AuthError::InvalidConfig("cookie name is empty".into()));
        }
        argon2::Params::new(
            self.argon2_memory_kib,
            self.argon2_iterations,
            self.argon2_parallelism,
            None,
        )
        .map_err(|e| AuthError::InvalidConfig(format!("argon2 parameters: {e}")))?;
        Ok(())
    }
}
