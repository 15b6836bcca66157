use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed validity period; `end == None` means open-ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityPeriod {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl ValidityPeriod {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn bounded(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(start, Some(end))
    }

    pub fn open(start: NaiveDate) -> Self {
        Self::new(start, None)
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Last covered day, with an open end standing for the latest representable date
    fn last_day(&self) -> NaiveDate {
        self.end.unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.last_day()
    }

    /// Whether the two periods share at least one day
    ///
    /// Checked as four cases: this start inside `other`, this end inside
    /// `other`, this period containing `other`, `other` containing this period.
    pub fn overlaps(&self, other: &ValidityPeriod) -> bool {
        let (start, end) = (self.start, self.last_day());
        let (other_start, other_end) = (other.start, other.last_day());

        let start_inside = other_start <= start && start <= other_end;
        let end_inside = other_start <= end && end <= other_end;
        let contains_other = start <= other_start && other_end <= end;
        let inside_other = other_start <= start && end <= other_end;

        start_inside || end_inside || contains_other || inside_other
    }
}

/// First record whose period overlaps `candidate`
pub fn find_overlap<'a, T>(
    candidate: &ValidityPeriod,
    records: impl IntoIterator<Item = &'a T>,
    period_of: impl Fn(&T) -> ValidityPeriod,
) -> Option<&'a T>
where
    T: 'a,
{
    records
        .into_iter()
        .find(|record| candidate.overlaps(&period_of(record)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn adjacent_periods_do_not_overlap() {
        let first = ValidityPeriod::bounded(day(2024, 1, 1), day(2024, 6, 30));
        let second = ValidityPeriod::bounded(day(2024, 7, 1), day(2024, 12, 31));
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn shared_boundary_day_overlaps() {
        let first = ValidityPeriod::bounded(day(2024, 1, 1), day(2024, 6, 30));
        let second = ValidityPeriod::bounded(day(2024, 6, 30), day(2024, 12, 31));
        assert!(first.overlaps(&second));
    }

    #[test]
    fn partial_overlap_is_detected() {
        let first = ValidityPeriod::bounded(day(2024, 1, 1), day(2024, 6, 30));
        let second = ValidityPeriod::bounded(day(2024, 6, 1), day(2024, 12, 31));
        assert!(first.overlaps(&second));
    }

    #[test]
    fn open_ended_periods() {
        let open = ValidityPeriod::open(day(2024, 6, 1));
        assert!(open.overlaps(&ValidityPeriod::open(day(2030, 1, 1))));
        assert!(open.overlaps(&ValidityPeriod::bounded(day(2020, 1, 1), day(2024, 6, 1))));
        assert!(open.overlaps(&ValidityPeriod::bounded(day(2025, 1, 1), day(2025, 2, 1))));
        assert!(!open.overlaps(&ValidityPeriod::bounded(day(2020, 1, 1), day(2024, 5, 31))));
        assert!(open.contains(day(2999, 12, 31)));
    }

    #[test]
    fn find_overlap_returns_first_conflict() {
        let periods = [
            ValidityPeriod::bounded(day(2023, 1, 1), day(2023, 12, 31)),
            ValidityPeriod::bounded(day(2024, 1, 1), day(2024, 3, 31)),
            ValidityPeriod::open(day(2024, 3, 1)),
        ];
        let candidate = ValidityPeriod::bounded(day(2024, 2, 1), day(2024, 4, 1));
        let found = find_overlap(&candidate, &periods, |period| *period);
        assert_eq!(found, Some(&periods[1]));
    }

    fn period_strategy() -> impl Strategy<Value = ValidityPeriod> {
        (0i64..2000, proptest::option::of(0i64..400)).prop_map(|(offset, length)| {
            let start = day(2020, 1, 1) + chrono::Duration::days(offset);
            ValidityPeriod::new(start, length.map(|len| start + chrono::Duration::days(len)))
        })
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in period_strategy(), b in period_strategy()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn overlap_matches_interval_intersection(a in period_strategy(), b in period_strategy()) {
            let a_end = a.end.unwrap_or(NaiveDate::MAX);
            let b_end = b.end.unwrap_or(NaiveDate::MAX);
            prop_assert_eq!(a.overlaps(&b), a.start <= b_end && b.start <= a_end);
        }

        #[test]
        fn overlap_means_a_shared_day(a in period_strategy(), b in period_strategy()) {
            let shared = a.start.max(b.start);
            prop_assert_eq!(a.overlaps(&b), a.contains(shared) && b.contains(shared));
        }
    }
}
