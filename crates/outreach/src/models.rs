//! Pipeline data model.

use class_gateway::{ClassEntry, SendStudent};
use serde::{Deserialize, Serialize};

use crate::dates::{expand_date_entries, normalize_date, resolve_date};
use crate::error::ValidationError;

/// A class found during discovery. `start_date` is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub class_code: String,
    pub class_name: String,
    pub start_date: String,
}

impl From<ClassEntry> for ClassRecord {
    fn from(entry: ClassEntry) -> Self {
        Self {
            start_date: normalize_date(entry.class_start_date.trim()),
            class_code: entry.class_code,
            class_name: entry.class_name,
        }
    }
}

/// A class that passed every filter predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetClass {
    pub class_code: String,
    pub class_name: String,
}

/// Grade and date selection for one discovery run.
///
/// Both lists are non-empty, free of duplicates and keep caller order.
/// Dates are already weekend-resolved and normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    grades: Vec<String>,
    dates: Vec<String>,
}

impl FilterCriteria {
    /// Validate and normalize raw caller input.
    ///
    /// Date entries may be JSON arrays of dates, weekend tokens (`周六`),
    /// `YYYYMMDD` or `YYYY-MM-DD`.
    pub fn new<G, D>(grades: &[G], dates: &[D]) -> Result<Self, ValidationError>
    where
        G: AsRef<str>,
        D: AsRef<str>,
    {
        let grades = unique_non_empty(grades.iter().map(|g| g.as_ref().trim().to_string()));
        if grades.is_empty() {
            return Err(ValidationError::EmptyGrades);
        }

        let dates = unique_non_empty(
            expand_date_entries(dates)
                .iter()
                .map(|d| resolve_date(d)),
        );
        if dates.is_empty() {
            return Err(ValidationError::EmptyDates);
        }

        Ok(Self { grades, dates })
    }

    pub fn grades(&self) -> &[String] {
        &self.grades
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }
}

fn unique_non_empty(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// One student from a class roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub student_code: String,
    pub student_name: String,
    pub class_code: String,
    pub class_name: String,
    #[serde(default)]
    pub connection_status: i64,
}

impl StudentRecord {
    /// Key under which repeated roster entries collapse.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.student_code, &self.class_code)
    }
}

impl From<&StudentRecord> for SendStudent {
    fn from(student: &StudentRecord) -> Self {
        SendStudent {
            student_code: student.student_code.clone(),
            student_name: student.student_name.clone(),
            class_code: student.class_code.clone(),
            class_name: student.class_name.clone(),
        }
    }
}

/// A validated broadcast: non-empty text, non-empty ordered recipients.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    message: String,
    targets: Vec<StudentRecord>,
}

impl DispatchRequest {
    pub fn new(message: impl Into<String>, targets: Vec<StudentRecord>) -> Result<Self, ValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        if targets.is_empty() {
            return Err(ValidationError::EmptyTargets);
        }
        Ok(Self { message, targets })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn targets(&self) -> &[StudentRecord] {
        &self.targets
    }
}

/// Diagnostics of one discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    pub total_classes_found: usize,
    pub filtered_classes_count: usize,
    pub filtered_classes: Vec<String>,
    pub selected_grade: Vec<String>,
    pub selected_time: Vec<String>,
}

/// Result of a discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidates {
    pub classes: Vec<TargetClass>,
    pub students: Vec<StudentRecord>,
    pub report: DiscoveryReport,
    /// Set when no class matched the criteria.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_require_grades_and_dates() {
        let none: [&str; 0] = [];
        assert_eq!(
            FilterCriteria::new(&none, &["周六"]),
            Err(ValidationError::EmptyGrades)
        );
        assert_eq!(
            FilterCriteria::new(&["一年级"], &none),
            Err(ValidationError::EmptyDates)
        );
        assert_eq!(
            FilterCriteria::new(&["  "], &["周六"]),
            Err(ValidationError::EmptyGrades)
        );
    }

    #[test]
    fn criteria_normalize_and_dedup_dates() {
        let criteria =
            FilterCriteria::new(&["一年级", "一年级"], &["周六", "20250906", r#"["周日"]"#])
                .unwrap();
        assert_eq!(criteria.grades(), ["一年级"]);
        assert_eq!(criteria.dates(), ["2025-09-06", "2025-09-07"]);
    }

    #[test]
    fn class_record_normalizes_start_date() {
        let record = ClassRecord::from(ClassEntry {
            class_code: "A".to_string(),
            class_name: "暑假一年级".to_string(),
            class_start_date: "20250906".to_string(),
        });
        assert_eq!(record.start_date, "2025-09-06");
    }

    #[test]
    fn dispatch_request_validates_input() {
        let student = StudentRecord {
            student_code: "S1".to_string(),
            student_name: "张三".to_string(),
            class_code: "A".to_string(),
            class_name: "暑假一年级".to_string(),
            connection_status: 0,
        };
        assert_eq!(
            DispatchRequest::new("", vec![student.clone()]).unwrap_err(),
            ValidationError::EmptyMessage
        );
        assert_eq!(
            DispatchRequest::new("hi", Vec::new()).unwrap_err(),
            ValidationError::EmptyTargets
        );
        assert!(DispatchRequest::new("hi", vec![student]).is_ok());
    }
}
