use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::ErrorContext;

/// The single user-facing rejection raised on the write path
///
/// `conflicting` holds the display code of another record when the rejection
/// is caused by a clash with it (duplicate code, overlapping period).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicting: Option<String>,
    #[serde(default)]
    pub context: ErrorContext,
}

impl ValidationError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            conflicting: None,
            context: ErrorContext::default(),
        }
    }

    pub fn with_conflicting(mut self, conflicting: impl Into<String>) -> Self {
        self.conflicting = Some(conflicting.into());
        self
    }

    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = context;
        self
    }
}

/// Result type alias for validation steps
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
