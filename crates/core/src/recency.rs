//! Ordering of dated records ("which entry is the latest?").
//!
//! Several records can share one calendar date, so recency is decided by the
//! `(date, created_at)` pair: the later calendar date wins, and on the same date the
//! later creation timestamp wins. Every "latest record" lookup in the workspace goes
//! through [`recency_cmp`].

use core::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

/// A record with a business date and a creation timestamp.
pub trait Dated {
    /// Calendar date the record refers to (no time component).
    fn date(&self) -> NaiveDate;

    /// When the record was entered.
    fn created_at(&self) -> DateTime<Utc>;
}

/// Newest-first comparator over `(date, created_at)`.
///
/// `Ordering::Less` means `a` is more recent than `b`, so sorting with this comparator
/// puts the latest record first.
pub fn recency_cmp<T: Dated + ?Sized>(a: &T, b: &T) -> Ordering {
    b.date()
        .cmp(&a.date())
        .then_with(|| b.created_at().cmp(&a.created_at()))
}

/// The record with the greatest `(date, created_at)` pair, or `None` when empty.
///
/// Exact ties keep the first record encountered.
pub fn latest<'a, T, I>(records: I) -> Option<&'a T>
where
    T: Dated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records.into_iter().min_by(|a, b| recency_cmp(*a, *b))
}

/// Stable in-place sort, latest record first.
pub fn sort_newest_first<T: Dated>(records: &mut [T]) {
    records.sort_by(|a, b| recency_cmp(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Rec {
        tag: u32,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    }

    impl Dated for Rec {
        fn date(&self) -> NaiveDate {
            self.date
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
    }

    fn rec(tag: u32, day: u32, secs: i64) -> Rec {
        Rec {
            tag,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            created_at: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
        }
    }

    #[test]
    fn later_date_beats_later_creation() {
        // Back-dated entry created after the newer-dated one.
        let records = vec![rec(1, 5, 0), rec(2, 3, 100)];
        assert_eq!(latest(&records).unwrap().tag, 1);
    }

    #[test]
    fn same_date_breaks_tie_on_created_at() {
        let records = vec![rec(1, 5, 10), rec(2, 5, 20), rec(3, 5, 15)];
        assert_eq!(latest(&records).unwrap().tag, 2);
    }

    #[test]
    fn empty_input_has_no_latest() {
        let records: Vec<Rec> = vec![];
        assert!(latest(&records).is_none());
    }

    #[test]
    fn sort_puts_latest_first() {
        let mut records = vec![rec(1, 1, 0), rec(2, 9, 0), rec(3, 9, 5), rec(4, 4, 0)];
        sort_newest_first(&mut records);
        let tags: Vec<u32> = records.iter().map(|r| r.tag).collect();
        assert_eq!(tags, vec![3, 2, 4, 1]);
    }

    proptest! {
        /// The latest record carries the maximum (date, created_at) pair.
        #[test]
        fn latest_has_maximum_pair(
            raw in prop::collection::vec((1u32..28, 0i64..10_000), 1..40)
        ) {
            let records: Vec<Rec> = raw
                .iter()
                .enumerate()
                .map(|(i, (day, secs))| rec(i as u32, *day, *secs))
                .collect();

            let best = latest(&records).unwrap();
            let max_pair = records.iter().map(|r| (r.date, r.created_at)).max().unwrap();
            prop_assert_eq!((best.date, best.created_at), max_pair);
        }
    }
}
