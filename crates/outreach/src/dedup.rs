//! Cross-class student deduplication.

use std::collections::HashSet;

use crate::models::StudentRecord;

/// Collapse repeated `(student_code, class_code)` entries, keeping the first
/// occurrence and the original order. A student enrolled in two classes
/// stays listed once per class.
pub fn dedupe(records: Vec<StudentRecord>) -> Vec<StudentRecord> {
    let first: Vec<bool> = {
        let mut seen = HashSet::with_capacity(records.len());
        records.iter().map(|r| seen.insert(r.dedup_key())).collect()
    };
    records
        .into_iter()
        .zip(first)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}
