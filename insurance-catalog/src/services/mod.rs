//! Per-entity catalog services
//!
//! Each service owns the write path of one table: it validates the record,
//! hands it to the repository, and logs the outcome. Rejections are logged at
//! `warn` before they are returned.

mod benefit_code;
mod catalog;
mod category;
mod context;
mod department;
mod hospital_bed;
mod medical_facility;
mod medical_staff;
mod payment_rate;
mod reference_level;

pub use benefit_code::*;
pub use catalog::*;
pub use category::*;
pub use context::*;
pub use department::*;
pub use hospital_bed::*;
pub use medical_facility::*;
pub use medical_staff::*;
pub use payment_rate::*;
pub use reference_level::*;

use crate::models::CodedRecord;

/// Records matching `term`, at most `limit`; an empty term matches everything
pub(crate) fn search_records<T: CodedRecord>(records: Vec<T>, term: &str, limit: usize) -> Vec<T> {
    let term = term.trim();
    records
        .into_iter()
        .filter(|record| term.is_empty() || record.matches_search(term))
        .take(limit)
        .collect()
}
