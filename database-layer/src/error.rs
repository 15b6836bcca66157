use thiserror::Error;
use uuid::Uuid;

use crate::constraint::ConstraintDef;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("{message}")]
    ConstraintViolation {
        constraint: String,
        message: String,
    },

    #[error("Record {id} not found in {table}")]
    NotFound { table: &'static str, id: Uuid },

    #[error("Sequence '{0}' is not registered")]
    SequenceNotFound(String),

    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl DatabaseError {
    pub fn constraint_violation(constraint: &ConstraintDef) -> Self {
        Self::ConstraintViolation {
            constraint: constraint.name.to_string(),
            message: constraint.message.to_string(),
        }
    }

    /// Translate a PostgreSQL error into a constraint violation when it names a known constraint
    pub fn from_sqlx(error: sqlx::Error, known: &[&ConstraintDef]) -> Self {
        let name = error
            .as_database_error()
            .and_then(|db_err| db_err.constraint())
            .map(str::to_string);

        match name.and_then(|name| known.iter().find(|def| def.name == name)) {
            Some(def) => Self::constraint_violation(def),
            None => Self::SqlxError(error),
        }
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    static CODE_UNIQUE: ConstraintDef =
        ConstraintDef::new("code_unique", "hic_medical_facility", "Medical facility code must be unique!");

    #[test]
    fn constraint_violation_displays_registered_message() {
        let err = DatabaseError::constraint_violation(&CODE_UNIQUE);
        assert_eq!(err.to_string(), "Medical facility code must be unique!");
    }

    #[test]
    fn non_database_sqlx_errors_pass_through() {
        let err = DatabaseError::from_sqlx(sqlx::Error::RowNotFound, &[&CODE_UNIQUE]);
        assert!(matches!(err, DatabaseError::SqlxError(sqlx::Error::RowNotFound)));
    }
}
