//! Types for the class listing endpoint.

use serde::Deserialize;

use super::lenient::string_or_number;

/// Envelope returned by the class listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassListResponse {
    #[serde(default)]
    pub data: Option<ClassListData>,
}

/// Payload of a class listing page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassListData {
    #[serde(default)]
    pub class_list: Option<Vec<ClassEntry>>,
}

/// A class as returned by the backend. Unknown fields are ignored; `null`
/// or numeric values are read as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    /// Opaque class identifier.
    #[serde(default, deserialize_with = "string_or_number")]
    pub class_code: String,
    /// Display name, e.g. "暑假一年级数学".
    #[serde(default, deserialize_with = "string_or_number")]
    pub class_name: String,
    /// Start date, either `YYYY-MM-DD` or `YYYYMMDD`, possibly with a time part.
    #[serde(default, deserialize_with = "string_or_number")]
    pub class_start_date: String,
}
