//! Date criteria normalization.

/// Weekend tokens a caller may select instead of a concrete date.
pub const WEEKEND_DATES: &[(&str, &str)] = &[("周六", "2025-09-06"), ("周日", "2025-09-07")];

/// Rewrite an 8-digit `YYYYMMDD` string as `YYYY-MM-DD`. Anything else is
/// returned unchanged, so the function is idempotent.
pub fn normalize_date(date: &str) -> String {
    if date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &date[0..4], &date[4..6], &date[6..8])
    } else {
        date.to_string()
    }
}

/// Map a weekend token to its calendar date; other input passes through.
pub fn resolve_weekend(token: &str) -> &str {
    WEEKEND_DATES
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, date)| *date)
        .unwrap_or(token)
}

/// Resolve and normalize one caller-supplied date entry.
pub fn resolve_date(raw: &str) -> String {
    normalize_date(resolve_weekend(raw.trim()))
}

/// Expand raw date entries. An entry holding a JSON array of strings
/// contributes each element; any other entry is taken verbatim.
pub fn expand_date_entries<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut out = Vec::new();
    for entry in raw {
        let entry = entry.as_ref();
        match serde_json::from_str::<Vec<String>>(entry) {
            Ok(items) => out.extend(items),
            Err(_) => out.push(entry.to_string()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_compact_dates() {
        assert_eq!(normalize_date("20250906"), "2025-09-06");
    }

    #[test]
    fn normalization_is_idempotent() {
        assert_eq!(normalize_date("2025-09-06"), "2025-09-06");
        assert_eq!(normalize_date(&normalize_date("20250906")), "2025-09-06");
    }

    #[test]
    fn leaves_other_shapes_alone() {
        assert_eq!(normalize_date("2025906"), "2025906");
        assert_eq!(normalize_date("2025090a"), "2025090a");
        assert_eq!(normalize_date("周三"), "周三");
    }

    #[test]
    fn weekend_tokens_resolve() {
        assert_eq!(resolve_date("周六"), "2025-09-06");
        assert_eq!(resolve_date("周日"), "2025-09-07");
        assert_eq!(resolve_date(" 20251011 "), "2025-10-11");
    }

    #[test]
    fn json_array_entries_are_flattened() {
        let raw = vec![
            r#"["周六","20250913"]"#.to_string(),
            "2025-09-20".to_string(),
            "[not json".to_string(),
        ];
        assert_eq!(
            expand_date_entries(&raw),
            vec!["周六", "20250913", "2025-09-20", "[not json"]
        );
    }
}
