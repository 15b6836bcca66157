// Error reporting utilities
// Rejections are expected outcomes, so they are logged at warn, never error

use crate::types::ValidationError;

/// Log a rejection with structured fields before it is returned to the caller
pub fn log_rejection(operation: &str, error: &ValidationError) {
    tracing::warn!(
        operation = operation,
        error_code = %error.code,
        model = error.context.model.as_deref().unwrap_or("-"),
        field = error.context.field.as_deref().unwrap_or("-"),
        conflicting = error.conflicting.as_deref().unwrap_or("-"),
        "Write rejected: {}",
        error.message
    );
}
