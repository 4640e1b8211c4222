//! Protected-key parameter merge.
//!
//! Every upstream request starts from a table of pipeline defaults. Teacher
//! configuration may override any key the table already has, except the
//! protected ones, whose values the pipeline computes itself.

use class_gateway::ParamMap;
use tracing::warn;

/// Keys the class listing computes itself.
pub const DISCOVERY_PROTECTED: &[&str] = &["Host", "accessToken", "pageNo"];

/// Keys a roster request computes itself.
pub const ROSTER_PROTECTED: &[&str] = &["Host", "accessToken", "classCode"];

/// Keys a send request computes itself. `teacher` and `classReq` are
/// structured and decoded separately.
pub const SEND_PROTECTED: &[&str] = &[
    "Host",
    "accessToken",
    "content",
    "studentList",
    "teacher",
    "classReq",
];

/// Apply `overrides` onto `defaults`, skipping protected keys and keys the
/// defaults do not define.
///
/// Protected keys are re-checked after the merge and restored if they drifted.
pub fn merge_params(defaults: &ParamMap, overrides: &ParamMap, protected: &[&str]) -> ParamMap {
    let mut merged = defaults.clone();

    for (key, value) in overrides {
        if protected.contains(&key.as_str()) {
            continue;
        }
        if let Some(slot) = merged.get_mut(key) {
            slot.clone_from(value);
        }
    }

    for key in protected {
        if let Some(expected) = defaults.get(*key) {
            enforce_pinned(&mut merged, key, expected);
        }
    }

    merged
}

/// Make sure `params[key] == expected`, overwriting it if not.
///
/// Returns `true` when the value had to be restored.
pub fn enforce_pinned(params: &mut ParamMap, key: &str, expected: &str) -> bool {
    match params.get(key) {
        Some(actual) if actual == expected => false,
        actual => {
            warn!(
                key,
                expected,
                actual = ?actual,
                "Protected parameter overwritten, restoring"
            );
            params.insert(key.to_string(), expected.to_string());
            true
        }
    }
}

/// Build a [`ParamMap`] from string pairs.
pub fn param_map<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> ParamMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_known_keys_only() {
        let defaults = param_map([("userId", ""), ("schoolId", "3")]);
        let overrides = param_map([("userId", "u1"), ("unknown", "x")]);

        let merged = merge_params(&defaults, &overrides, &[]);
        assert_eq!(merged["userId"], "u1");
        assert_eq!(merged["schoolId"], "3");
        assert!(!merged.contains_key("unknown"));
    }

    #[test]
    fn protected_keys_keep_pipeline_value() {
        let defaults = param_map([("classCode", "A"), ("accessToken", "tok"), ("chatId", "")]);
        let overrides = param_map([("classCode", "Z"), ("accessToken", "stale"), ("chatId", "c")]);

        let merged = merge_params(&defaults, &overrides, ROSTER_PROTECTED);
        assert_eq!(merged["classCode"], "A");
        assert_eq!(merged["accessToken"], "tok");
        assert_eq!(merged["chatId"], "c");
    }

    #[test]
    fn merge_with_empty_overrides_is_identity() {
        let defaults = param_map([("pageNo", "1"), ("pageSize", "5")]);
        let merged = merge_params(&defaults, &ParamMap::new(), DISCOVERY_PROTECTED);
        assert_eq!(merged, defaults);
    }

    #[test]
    fn enforce_pinned_restores_drifted_value() {
        let mut params = param_map([("classCode", "B")]);
        assert!(enforce_pinned(&mut params, "classCode", "A"));
        assert_eq!(params["classCode"], "A");
        assert!(!enforce_pinned(&mut params, "classCode", "A"));
    }

    #[test]
    fn enforce_pinned_inserts_missing_key() {
        let mut params = ParamMap::new();
        assert!(enforce_pinned(&mut params, "classCode", "A"));
        assert_eq!(params["classCode"], "A");
    }
}
