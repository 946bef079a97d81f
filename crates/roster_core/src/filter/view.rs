//! Displayed subset of the active snapshot.
//!
//! # Responsibility
//! - Recompute the displayed records from a snapshot and a predicate.
//! - Optionally reorder the displayed records by interview start time.
//!
//! # Invariants
//! - `apply` output preserves snapshot insertion order.
//! - The view keeps no memory of which predicate produced it.

use crate::filter::predicate::RecordPredicate;
use crate::model::catalog::Catalog;
use crate::model::record::Record;

/// Records matching `predicate`, in snapshot order.
pub fn filter_records(snapshot: &Catalog, predicate: &RecordPredicate) -> Vec<Record> {
    snapshot
        .list()
        .iter()
        .filter(|record| predicate.test(record))
        .cloned()
        .collect()
}

/// Currently displayed records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterView {
    displayed: Vec<Record>,
}

impl FilterView {
    /// Starts with every record of `snapshot` displayed.
    pub fn new(snapshot: &Catalog) -> Self {
        Self {
            displayed: snapshot.list().to_vec(),
        }
    }

    /// Replaces the displayed records with the matches of `predicate`.
    pub fn apply(&mut self, snapshot: &Catalog, predicate: &RecordPredicate) -> &[Record] {
        self.displayed = filter_records(snapshot, predicate);
        &self.displayed
    }

    /// Stable-sorts displayed records: scheduled first by start time, then
    /// unscheduled in their existing order.
    pub fn order_by_start_time(&mut self) -> &[Record] {
        self.displayed
            .sort_by_key(|record| (record.start_time().is_none(), record.start_time()));
        &self.displayed
    }

    pub fn displayed(&self) -> &[Record] {
        &self.displayed
    }

    /// Zero-based lookup into the displayed records.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.displayed.get(index)
    }

    pub fn len(&self) -> usize {
        self.displayed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displayed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_records, FilterView};
    use crate::filter::predicate::RecordPredicate;
    use crate::model::catalog::Catalog;
    use crate::model::fields::{Address, Email, JobPosition, Name, Phone, StartTime, Tag, Team};
    use crate::model::record::{Record, RecordDraft};
    use std::collections::BTreeSet;

    fn record(name: &str, tag: &str) -> Record {
        Record::new(RecordDraft {
            name: Name::parse(name).unwrap(),
            phone: Phone::parse("87654321").unwrap(),
            email: Email::parse(format!("{}@example.com", name.to_lowercase())).unwrap(),
            address: Address::parse("10th street").unwrap(),
            job_position: JobPosition::parse("Engineer").unwrap(),
            team: Team::parse("Core").unwrap(),
            tags: BTreeSet::from([Tag::parse(tag).unwrap()]),
        })
    }

    fn catalog() -> Catalog {
        Catalog::from_records([
            record("Alice", "friends"),
            record("Benson", "colleagues"),
            record("Carl", "friends"),
            record("Daniel", "friends"),
        ])
        .unwrap()
    }

    #[test]
    fn apply_keeps_insertion_order_and_is_deterministic() {
        let snapshot = catalog();
        let predicate = RecordPredicate::tags_contain(["friends"]);
        let mut view = FilterView::new(&snapshot);

        let first: Vec<String> = view
            .apply(&snapshot, &predicate)
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(first, vec!["Alice", "Carl", "Daniel"]);
        assert_eq!(view.displayed(), filter_records(&snapshot, &predicate).as_slice());
        assert_eq!(snapshot.len(), 4);
    }

    #[test]
    fn order_by_start_time_puts_unscheduled_last() {
        let late = StartTime::parse("2025-05-02 09:00").unwrap();
        let early = StartTime::parse("2025-05-01 14:30").unwrap();
        let snapshot = Catalog::from_records([
            record("Alice", "a"),
            record("Benson", "b").with_schedule(Some(late), None),
            record("Carl", "c"),
            record("Daniel", "d").with_schedule(Some(early), None),
        ])
        .unwrap();
        let mut view = FilterView::new(&snapshot);

        let names: Vec<String> = view
            .order_by_start_time()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["Daniel", "Benson", "Alice", "Carl"]);
        assert_eq!(view.get(0).map(|r| r.name().as_str()), Some("Daniel"));
    }
}
