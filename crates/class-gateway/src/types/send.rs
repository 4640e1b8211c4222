//! Types for sending a broadcast message.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::string_or_number;

/// JSON body of a send request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub app_id: String,
    pub app_version: String,
    pub access_token: String,
    pub wx_user_id: String,
    pub class_req: ClassRequest,
    /// The message text.
    pub content: String,
    /// Teacher descriptor, passed through as-is. `null` when not configured.
    pub teacher: Value,
    pub student_list: Vec<SendStudent>,
}

/// Class context attached to a send request.
///
/// Keys missing from stored configuration take the values of
/// [`ClassRequest::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub school_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub class_code: String,
    #[serde(deserialize_with = "string_or_number")]
    pub class_group_code: String,
    #[serde(deserialize_with = "string_or_number")]
    pub class_type: String,
    /// Any additional keys the backend expects, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ClassRequest {
    fn default() -> Self {
        Self {
            school_id: "3".to_string(),
            class_code: String::new(),
            class_group_code: String::new(),
            class_type: "1".to_string(),
            extra: Map::new(),
        }
    }
}

/// A recipient of a broadcast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendStudent {
    pub student_code: String,
    pub student_name: String,
    pub class_code: String,
    pub class_name: String,
}

/// Response to a send request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl SendResponse {
    /// Whether the backend acknowledged the send.
    pub fn is_success(&self) -> bool {
        self.status == Some(crate::SUCCESS_STATUS)
    }
}
