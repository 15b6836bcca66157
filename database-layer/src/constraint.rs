// Named storage constraints
use serde::Serialize;

/// A constraint as declared in the schema, with its user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstraintDef {
    pub name: &'static str,
    pub table: &'static str,
    pub message: &'static str,
}

impl ConstraintDef {
    pub const fn new(name: &'static str, table: &'static str, message: &'static str) -> Self {
        Self {
            name,
            table,
            message,
        }
    }
}

/// The value a row contributes to a unique constraint
///
/// Rows whose key is NULL (`key == None`) never conflict, matching SQL `UNIQUE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKey {
    pub constraint: &'static ConstraintDef,
    pub key: Option<String>,
}

impl UniqueKey {
    pub fn new(constraint: &'static ConstraintDef, key: impl Into<String>) -> Self {
        Self {
            constraint,
            key: Some(key.into()),
        }
    }

    pub fn nullable(constraint: &'static ConstraintDef, key: Option<&str>) -> Self {
        Self {
            constraint,
            key: key.map(str::to_string),
        }
    }

    /// Composite key over several columns; NULL if any column is NULL
    pub fn composite(constraint: &'static ConstraintDef, parts: &[Option<&str>]) -> Self {
        let key = parts
            .iter()
            .copied()
            .collect::<Option<Vec<&str>>>()
            .map(|parts| parts.join("\u{1f}"));
        Self { constraint, key }
    }

    pub fn conflicts_with(&self, other: &UniqueKey) -> bool {
        self.constraint.name == other.constraint.name
            && self.key.is_some()
            && self.key == other.key
    }
}

/// Outcome of a `CHECK (...)` constraint for one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckConstraint {
    pub constraint: &'static ConstraintDef,
    pub holds: bool,
}

impl CheckConstraint {
    pub fn new(constraint: &'static ConstraintDef, holds: bool) -> Self {
        Self { constraint, holds }
    }
}
