//! Rule-based class filtering.
//!
//! Grade and date matching are plain substring checks: grade `一年级` also
//! matches `十一年级`. Kept for compatibility with how class names are
//! written upstream; tighten only with a concrete naming convention in hand.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{ClassRecord, FilterCriteria, TargetClass};

/// Reduce discovered classes to targets.
///
/// Predicates run in order and short-circuit: course keyword, then grade,
/// then start date. The first class to pass with a given code wins; later
/// duplicates are dropped.
pub fn filter_classes(
    classes: &[ClassRecord],
    criteria: &FilterCriteria,
    course_keyword: &str,
) -> Vec<TargetClass> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for class in classes {
        if seen.contains(class.class_code.as_str()) {
            continue;
        }
        if !class.class_name.contains(course_keyword) {
            debug!(class = %class.class_name, "Skipping class without course keyword");
            continue;
        }
        let Some(grade) = matched_grade(&class.class_name, criteria) else {
            debug!(class = %class.class_name, "Skipping class, no grade match");
            continue;
        };
        let Some(date) = matched_date(&class.start_date, criteria) else {
            debug!(class = %class.class_name, start = %class.start_date, "Skipping class, no date match");
            continue;
        };

        debug!(
            class = %class.class_name,
            class_code = %class.class_code,
            grade,
            date,
            "Class matched"
        );
        seen.insert(class.class_code.as_str());
        targets.push(TargetClass {
            class_code: class.class_code.clone(),
            class_name: class.class_name.clone(),
        });
    }

    targets
}

fn matched_grade<'a>(class_name: &str, criteria: &'a FilterCriteria) -> Option<&'a str> {
    criteria
        .grades()
        .iter()
        .find(|grade| class_name.contains(grade.as_str()))
        .map(String::as_str)
}

/// A date criterion matches when it equals the start date or occurs inside
/// it (`2025-09-06` matches `2025-09-06 08:00:00`).
fn matched_date<'a>(start_date: &str, criteria: &'a FilterCriteria) -> Option<&'a str> {
    criteria
        .dates()
        .iter()
        .find(|date| start_date == date.as_str() || start_date.contains(date.as_str()))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(code: &str, name: &str, start: &str) -> ClassRecord {
        ClassRecord {
            class_code: code.to_string(),
            class_name: name.to_string(),
            start_date: start.to_string(),
        }
    }

    fn criteria(grades: &[&str], dates: &[&str]) -> FilterCriteria {
        FilterCriteria::new(grades, dates).unwrap()
    }

    #[test]
    fn duplicate_entries_yield_one_class() {
        let classes = vec![
            class("A", "暑假一年级", "2025-09-06"),
            class("A", "暑假一年级", "2025-09-06"),
        ];
        let targets = filter_classes(&classes, &criteria(&["一年级"], &["2025-09-06"]), "暑假");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].class_code, "A");
    }

    #[test]
    fn keyword_is_required() {
        let classes = vec![class("A", "秋季一年级", "2025-09-06")];
        let targets = filter_classes(&classes, &criteria(&["一年级"], &["2025-09-06"]), "暑假");
        assert!(targets.is_empty());
    }

    #[test]
    fn grade_and_date_must_both_match() {
        let classes = vec![
            class("A", "暑假一年级数学", "2025-09-06"),
            class("B", "暑假二年级数学", "2025-09-06"),
            class("C", "暑假一年级语文", "2025-09-07"),
            class("D", "暑假三年级英语", "2025-09-06 08:30:00"),
        ];
        let targets = filter_classes(
            &classes,
            &criteria(&["一年级", "三年级"], &["周六"]),
            "暑假",
        );
        let codes: Vec<_> = targets.iter().map(|t| t.class_code.as_str()).collect();
        assert_eq!(codes, ["A", "D"]);
    }

    #[test]
    fn compact_criteria_match_normalized_start() {
        let record = ClassRecord::from(class_gateway::ClassEntry {
            class_code: "A".to_string(),
            class_name: "暑假一年级".to_string(),
            class_start_date: "20250906".to_string(),
        });
        let targets = filter_classes(&[record], &criteria(&["一年级"], &["20250906"]), "暑假");
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn grade_substring_ambiguity_is_preserved() {
        let classes = vec![class("X", "暑假十一年级", "2025-09-06")];
        let targets = filter_classes(&classes, &criteria(&["一年级"], &["2025-09-06"]), "暑假");
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn output_never_repeats_a_code() {
        let classes = vec![
            class("A", "暑假一年级", "2025-09-06"),
            class("B", "暑假一年级", "2025-09-06"),
            class("A", "暑假一年级提高", "2025-09-06"),
            class("B", "暑假二年级", "2025-09-07"),
        ];
        let targets = filter_classes(
            &classes,
            &criteria(&["一年级", "二年级"], &["周六", "周日"]),
            "暑假",
        );
        let codes: Vec<_> = targets.iter().map(|t| t.class_code.as_str()).collect();
        assert_eq!(codes, ["A", "B"]);
        assert_eq!(targets[0].class_name, "暑假一年级");
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let targets = filter_classes(&[], &criteria(&["一年级"], &["周六"]), "暑假");
        assert!(targets.is_empty());
    }
}
