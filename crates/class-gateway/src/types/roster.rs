//! Types for the student roster endpoint.

use serde::Deserialize;

use super::lenient::{opt_integer, opt_string_or_number};

/// Envelope returned by the roster endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<RosterData>,
}

/// Payload of a roster response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterData {
    #[serde(default)]
    pub student_list: Option<Vec<RosterEntry>>,
}

/// A single student on a class roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub student_code: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub student_name: Option<String>,
    /// Contact relationship flag; `1` means already connected. Numeric
    /// strings are accepted, anything unreadable is `None`.
    #[serde(default, deserialize_with = "opt_integer")]
    pub friend: Option<i64>,
}
