use database_layer::DatabaseError;
use error_common::{codes, log_rejection, ErrorContext, ValidationError};
use thiserror::Error;
use uuid::Uuid;

use crate::constraints;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{model} record {id} not found")]
    NotFound { model: &'static str, id: Uuid },

    #[error("Storage error: {0}")]
    Storage(DatabaseError),
}

impl CatalogError {
    /// Translate a PostgreSQL error, mapping known constraint names to rejections
    pub fn from_sqlx(error: sqlx::Error) -> Self {
        DatabaseError::from_sqlx(error, constraints::ALL).into()
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.as_validation().is_some()
    }

    /// Attach the id of the record the rejection refers to
    pub(crate) fn with_record(self, id: Uuid) -> Self {
        match self {
            Self::Validation(mut err) => {
                err.context = std::mem::take(&mut err.context).with_record_id(id);
                Self::Validation(err)
            }
            other => other,
        }
    }

    pub(crate) fn log(&self, operation: &str) {
        match self {
            Self::Validation(err) => log_rejection(operation, err),
            other => tracing::error!(operation, error = %other, "Catalog operation failed"),
        }
    }
}

impl From<DatabaseError> for CatalogError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::ConstraintViolation { constraint, message } => {
                let code = constraints::rejection_code(&constraint);
                let table = constraints::find(&constraint).map_or("-", |def| def.table);
                Self::Validation(
                    ValidationError::new(code, message).with_context(
                        ErrorContext::for_model(table).add_context("constraint", constraint),
                    ),
                )
            }
            DatabaseError::NotFound { table, id } => Self::NotFound { model: table, id },
            other => Self::Storage(other),
        }
    }
}

/// Build a rejection for `model`
pub(crate) fn reject(code: &str, model: &str, message: impl Into<String>) -> CatalogError {
    CatalogError::Validation(ValidationError::new(code, message).with_context(ErrorContext::for_model(model)))
}

/// Rejection for a record that clashes with another one
pub(crate) fn reject_conflict(
    code: &str,
    model: &str,
    message: impl Into<String>,
    conflicting: impl Into<String>,
) -> CatalogError {
    CatalogError::Validation(
        ValidationError::new(code, message)
            .with_conflicting(conflicting)
            .with_context(ErrorContext::for_model(model)),
    )
}

pub(crate) fn require_text(model: &str, field: &str, value: &str, label: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(
            ValidationError::new(codes::validation::REQUIRED_FIELD, format!("{label} is required!"))
                .with_context(ErrorContext::for_model(model).with_field(field)),
        ));
    }
    Ok(())
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violation_becomes_validation() {
        let err: CatalogError = DatabaseError::constraint_violation(&constraints::BENEFIT_CODE_UNIQ).into();
        let rejection = err.as_validation().unwrap();
        assert_eq!(rejection.message, "Benefit code must be unique!");
        assert_eq!(rejection.code, codes::validation::DUPLICATE_CODE);
        assert_eq!(rejection.context.model.as_deref(), Some("hic_benefit_code"));
    }

    #[test]
    fn not_found_keeps_table() {
        let id = Uuid::new_v4();
        let err: CatalogError = DatabaseError::NotFound { table: "hic_category", id }.into();
        assert!(matches!(err, CatalogError::NotFound { model: "hic_category", .. }));
    }

    #[test]
    fn other_sqlx_errors_are_storage_errors() {
        let err = CatalogError::from_sqlx(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, CatalogError::Storage(_)));
    }
}
