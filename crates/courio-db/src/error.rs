//! Database-specific error types and conversions.

use courio_core::error::CourioError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed row: {0}")]
    Decode(String),

    #[error("Unique constraint violated on {entity}")]
    Conflict { entity: String },

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl DbError {
    /// Classify an error from `Response::check`.
    ///
    /// SurrealDB reports unique index violations as "Database index
    /// `...` already contains ...".
    pub(crate) fn from_statement(entity: &str, err: surrealdb::Error) -> Self {
        let message = err.to_string();
        if message.contains("already contains") {
            DbError::Conflict {
                entity: entity.to_string(),
            }
        } else {
            DbError::Query(message)
        }
    }
}

impl From<DbError> for CourioError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CourioError::NotFound { entity, id },
            DbError::Conflict { entity } => CourioError::AlreadyExists { entity },
            other => CourioError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_already_exists() {
        let err: CourioError = DbError::Conflict {
            entity: "user".into(),
        }
        .into();
        assert!(matches!(err, CourioError::AlreadyExists { entity } if entity == "user"));
    }

    #[test]
    fn not_found_keeps_identity() {
        let err: CourioError = DbError::NotFound {
            entity: "user".into(),
            id: "42".into(),
        }
        .into();
        assert!(matches!(err, CourioError::NotFound { id, .. } if id == "42"));
    }

    #[test]
    fn other_errors_become_database_errors() {
        let err: CourioError = DbError::Decode("bad uuid".into()).into();
        match err {
            CourioError::Database(msg) => assert!(msg.contains("bad uuid")),
            other => panic!("expected Database, got {other:?}"),
        }
    }
}
