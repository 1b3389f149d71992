//! Environment-driven configuration for the server binary.

use std::env;

use courio_auth::AuthConfig;
use courio_db::DbConfig;

/// Default interval between expired-session sweeps.
pub const DEFAULT_PURGE_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub purge_interval_secs: u64,
}

impl ServerConfig {
    /// Read `COURIO_*` variables from the process environment, falling
    /// back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_defaults = DbConfig::default();
        let auth_defaults = AuthConfig::default();

        let text = |key: &str, default: String| lookup(key).unwrap_or(default);
        let number = |key: &str, default: u64| {
            lookup(key)
                .map(|v| v.parse::<u64>().unwrap_or(default))
                .unwrap_or(default)
        };
        let small = |key: &str, default: u32| {
            lookup(key)
                .map(|v| v.parse::<u32>().unwrap_or(default))
                .unwrap_or(default)
        };

        Self {
            db: DbConfig {
                url: text("COURIO_DB_URL", db_defaults.url),
                namespace: text("COURIO_DB_NAMESPACE", db_defaults.namespace),
                database: text("COURIO_DB_DATABASE", db_defaults.database),
                username: text("COURIO_DB_USERNAME", db_defaults.username),
                password: text("COURIO_DB_PASSWORD", db_defaults.password),
            },
            auth: AuthConfig {
                session_lifetime_secs: number(
                    "COURIO_SESSION_LIFETIME_SECS",
                    auth_defaults.session_lifetime_secs,
                ),
                renewal_threshold_secs: number(
                    "COURIO_SESSION_RENEWAL_SECS",
                    auth_defaults.renewal_threshold_secs,
                ),
                argon2_memory_kib: small(
                    "COURIO_ARGON2_MEMORY_KIB",
                    auth_defaults.argon2_memory_kib,
                ),
                argon2_iterations: small(
                    "COURIO_ARGON2_ITERATIONS",
                    auth_defaults.argon2_iterations,
                ),
                argon2_parallelism: small(
                    "COURIO_ARGON2_PARALLELISM",
                    auth_defaults.argon2_parallelism,
                ),
                pepper: lookup("COURIO_PASSWORD_PEPPER").filter(|p| !p.is_empty()),
                cookie_name: text("COURIO_COOKIE_NAME", auth_defaults.cookie_name),
            },
            purge_interval_secs: number(
                "COURIO_PURGE_INTERVAL_SECS",
                DEFAULT_PURGE_INTERVAL_SECS,
            )
            .max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.db.url, "127.0.0.1:8000");
        assert_eq!(config.db.namespace, "courio");
        assert_eq!(config.auth.session_lifetime_secs, 2_592_000);
        assert_eq!(config.auth.cookie_name, "auth-session");
        assert!(config.auth.pepper.is_none());
        assert_eq!(config.purge_interval_secs, DEFAULT_PURGE_INTERVAL_SECS);
    }

    #[test]
    fn variables_override_defaults() {
        let config = from_pairs(&[
            ("COURIO_DB_URL", "db.internal:8000"),
            ("COURIO_PASSWORD_PEPPER", "pep"),
            ("COURIO_PURGE_INTERVAL_SECS", "60"),
            ("COURIO_ARGON2_ITERATIONS", "3"),
        ]);
        assert_eq!(config.db.url, "db.internal:8000");
        assert_eq!(config.auth.pepper.as_deref(), Some("pep"));
        assert_eq!(config.purge_interval_secs, 60);
        assert_eq!(config.auth.argon2_iterations, 3);
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let config = from_pairs(&[
            ("COURIO_PURGE_INTERVAL_SECS", "soon"),
            ("COURIO_SESSION_LIFETIME_SECS", "-1"),
        ]);
        assert_eq!(config.purge_interval_secs, DEFAULT_PURGE_INTERVAL_SECS);
        assert_eq!(config.auth.session_lifetime_secs, 2_592_000);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = from_pairs(&[("COURIO_PURGE_INTERVAL_SECS", "0")]);
        assert_eq!(config.purge_interval_secs, 1);
    }

    #[test]
    fn oversized_session_lifetime_fails_validation() {
        let config = from_pairs(&[("COURIO_SESSION_LIFETIME_SECS", "18446744073709551615")]);
        assert_eq!(config.auth.session_lifetime_secs, u64::MAX);
        assert!(config.auth.validate().is_err());
    }
}
