//! Broadcast dispatch.

use class_gateway::{ClassRequest, GatewayClient, ParamMap, SendRequest, SendStudent};
use database::ParamScope;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::{ConfigDecodeError, OutreachError, Result};
use crate::merge::{merge_params, param_map, SEND_PROTECTED};
use crate::models::DispatchRequest;
use crate::store::ConfigResolver;

/// Send-parameter key holding the last successfully sent message.
pub const CONTENT_KEY: &str = "content";

/// Typed view of a teacher's send parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SendProfile {
    pub app_id: String,
    pub app_version: String,
    pub wx_user_id: String,
    pub teacher: Value,
    pub class_req: ClassRequest,
}

impl SendProfile {
    /// Build the profile from stored parameters.
    ///
    /// Structured fields that cannot be decoded fall back to `null` /
    /// [`ClassRequest::default`] with a warning instead of failing.
    pub fn from_params(app_id: &str, params: &ParamMap) -> Self {
        let defaults = param_map([("appId", app_id), ("appVersion", ""), ("wxUserId", "")]);
        let mut scalars = merge_params(&defaults, params, SEND_PROTECTED);

        let teacher = decode_teacher(params.get("teacher").map(String::as_str)).unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to null teacher");
            Value::Null
        });
        let class_req = decode_class_req(params.get("classReq").map(String::as_str))
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default classReq");
                ClassRequest::default()
            });

        Self {
            app_id: scalars.remove("appId").unwrap_or_default(),
            app_version: scalars.remove("appVersion").unwrap_or_default(),
            wx_user_id: scalars.remove("wxUserId").unwrap_or_default(),
            teacher,
            class_req,
        }
    }

    /// Assemble the outbound payload.
    pub fn request(&self, token: &str, dispatch: &DispatchRequest) -> SendRequest {
        SendRequest {
            app_id: self.app_id.clone(),
            app_version: self.app_version.clone(),
            access_token: token.to_string(),
            wx_user_id: self.wx_user_id.clone(),
            class_req: self.class_req.clone(),
            content: dispatch.message().to_string(),
            teacher: self.teacher.clone(),
            student_list: dispatch.targets().iter().map(SendStudent::from).collect(),
        }
    }
}

/// Decode the `teacher` parameter. Absent, empty, `None` and `null` mean no teacher.
pub fn decode_teacher(raw: Option<&str>) -> std::result::Result<Value, ConfigDecodeError> {
    match raw.map(str::trim) {
        None | Some("") | Some("None") | Some("null") => Ok(Value::Null),
        Some(text) => decode_structured("teacher", text),
    }
}

/// Decode the `classReq` parameter. Absent or empty means the default.
pub fn decode_class_req(raw: Option<&str>) -> std::result::Result<ClassRequest, ConfigDecodeError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(ClassRequest::default()),
        Some(text) => decode_structured("classReq", text),
    }
}

/// Parse JSON, falling back to the legacy single-quoted literal form
/// (`{'schoolId': '3', 'x': None}`).
fn decode_structured<T: DeserializeOwned>(
    key: &'static str,
    text: &str,
) -> std::result::Result<T, ConfigDecodeError> {
    serde_json::from_str(text)
        .or_else(|_| serde_json::from_str(&legacy_to_json(text)))
        .map_err(|source| ConfigDecodeError { key, source })
}

/// Rewrite single quotes as double quotes and `None`/`True`/`False` outside
/// strings as their JSON spellings.
fn legacy_to_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut word = String::new();

    let flush = |word: &mut String, out: &mut String| {
        match word.as_str() {
            "None" => out.push_str("null"),
            "True" => out.push_str("true"),
            "False" => out.push_str("false"),
            _ => out.push_str(word),
        }
        word.clear();
    };

    for c in text.chars() {
        if in_string {
            match c {
                '\'' | '"' => {
                    out.push('"');
                    in_string = false;
                }
                _ => out.push(c),
            }
        } else if c.is_alphanumeric() || c == '_' {
            word.push(c);
        } else {
            flush(&mut word, &mut out);
            if c == '\'' || c == '"' {
                out.push('"');
                in_string = true;
            } else {
                out.push(c);
            }
        }
    }
    flush(&mut word, &mut out);
    out
}

/// Sends a broadcast and records the text as the teacher's new default.
pub struct MessageDispatcher<'a> {
    client: &'a GatewayClient,
    store: &'a dyn ConfigResolver,
}

impl<'a> MessageDispatcher<'a> {
    pub fn new(client: &'a GatewayClient, store: &'a dyn ConfigResolver) -> Self {
        Self { client, store }
    }

    /// Send `request` on behalf of `teacher_id`. Returns the number of recipients.
    ///
    /// Only an acknowledged send updates the stored default message.
    pub async fn send(
        &self,
        teacher_id: &str,
        request: &DispatchRequest,
        token: &str,
    ) -> Result<usize> {
        let params = self.store.get(teacher_id, ParamScope::Send).await?;
        let profile = SendProfile::from_params(&self.client.config().app_id, &params);
        let body = profile.request(token, request);
        let headers = merge_params(&self.client.config().backend_headers(), &params, SEND_PROTECTED);

        info!(
            teacher = %teacher_id,
            recipients = body.student_list.len(),
            "Dispatching broadcast"
        );

        let response = self
            .client
            .send_message(&body, &headers)
            .await
            .map_err(OutreachError::Upstream)?;

        if !response.is_success() {
            let status = response.status.unwrap_or_default();
            let message = response.msg.unwrap_or_else(|| "send failed".to_string());
            warn!(teacher = %teacher_id, status, message = %message, "Broadcast rejected");
            return Err(OutreachError::Dispatch { status, message });
        }

        if let Err(e) = self
            .store
            .put(teacher_id, ParamScope::Send, CONTENT_KEY, request.message())
            .await
        {
            error!(teacher = %teacher_id, error = %e, "Broadcast sent but default message not saved");
        }

        info!(teacher = %teacher_id, recipients = body.student_list.len(), "Broadcast sent");
        Ok(body.student_list.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentRecord;

    #[test]
    fn teacher_decodes_json_and_legacy_literals() {
        assert_eq!(decode_teacher(None).unwrap(), Value::Null);
        assert_eq!(decode_teacher(Some("None")).unwrap(), Value::Null);

        let json = decode_teacher(Some(r#"{"name": "王老师", "id": 7}"#)).unwrap();
        assert_eq!(json["name"], "王老师");

        let legacy = decode_teacher(Some("{'name': '王老师', 'active': True, 'dept': None}")).unwrap();
        assert_eq!(legacy["name"], "王老师");
        assert_eq!(legacy["active"], true);
        assert_eq!(legacy["dept"], Value::Null);

        assert!(decode_teacher(Some("{'name': 'O'Neil'}")).is_err());
    }

    #[test]
    fn class_req_decodes_legacy_form() {
        let req = decode_class_req(Some(
            "{'schoolId': '3', 'classCode': 'A1', 'classGroupCode': '', 'classType': '1'}",
        ))
        .unwrap();
        assert_eq!(req.class_code, "A1");
        assert_eq!(req.school_id, "3");
    }

    #[test]
    fn malformed_structured_fields_fall_back() {
        let params = param_map([
            ("teacher", "{broken"),
            ("classReq", "[1, 2"),
            ("wxUserId", "wx-9"),
        ]);
        let profile = SendProfile::from_params("app", &params);
        assert_eq!(profile.teacher, Value::Null);
        assert_eq!(profile.class_req, ClassRequest::default());
        assert_eq!(profile.wx_user_id, "wx-9");
    }

    #[test]
    fn protected_send_keys_are_not_overridden() {
        let params = param_map([
            ("appId", "custom-app"),
            ("accessToken", "stale"),
            ("content", "old text"),
        ]);
        let profile = SendProfile::from_params("app", &params);
        assert_eq!(profile.app_id, "custom-app");

        let dispatch = DispatchRequest::new(
            "new text",
            vec![StudentRecord {
                student_code: "S1".to_string(),
                student_name: "张三".to_string(),
                class_code: "A".to_string(),
                class_name: "暑假一年级".to_string(),
                connection_status: 0,
            }],
        )
        .unwrap();
        let body = profile.request("fresh", &dispatch);
        assert_eq!(body.access_token, "fresh");
        assert_eq!(body.content, "new text");
        assert_eq!(body.student_list.len(), 1);
    }
}
