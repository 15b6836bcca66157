//! Catalog records
//!
//! Every record is a plain value with a nil id until the store assigns one.
//! The storage constraints each table enforces are declared on the record
//! through [`database_layer::Row`].

pub mod benefit_code;
pub mod category;
pub mod department;
pub mod hospital_bed;
pub mod medical_facility;
pub mod medical_staff;
pub mod payment_rate;
pub mod reference_level;

pub use benefit_code::*;
pub use category::*;
pub use department::*;
pub use hospital_bed::*;
pub use medical_facility::*;
pub use medical_staff::*;
pub use payment_rate::*;
pub use reference_level::*;

/// A record identified by a short code and a name
pub trait CodedRecord {
    fn code(&self) -> &str;

    fn name(&self) -> &str;

    /// Label shown in pickers, `"[code] name"` unless overridden
    fn display_name(&self) -> String {
        format!("[{}] {}", self.code(), self.name())
    }

    /// Case-insensitive substring match on code or name
    fn matches_search(&self, term: &str) -> bool {
        contains_ignore_case(self.code(), term) || contains_ignore_case(self.name(), term)
    }
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub(crate) fn optional_contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|value| contains_ignore_case(value, needle))
}
