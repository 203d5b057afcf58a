//! Typed reads out of untyped JSON values.
//!
//! Every helper takes an `Option<&Value>` so a missing key and an explicit
//! `null` are handled the same way, and none of them can fail: a value of
//! the wrong shape simply yields the fallback.

use serde_json::Value;

/// The string itself when it has a non-whitespace character, else `fallback`.
///
/// The trim is only used for the check; the returned string is untouched.
pub fn string(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => fallback.to_string(),
    }
}

/// Like [`string`] but `None` instead of a fallback
pub fn opt_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// A finite number from a JSON number or a numeric string, else `fallback`
pub fn number(value: Option<&Value>, fallback: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    parsed.filter(|n| n.is_finite()).unwrap_or(fallback)
}

/// A non-negative whole count (bedrooms, parking spaces, ...)
///
/// Fractions truncate toward zero and negatives clamp to zero.
pub fn count(value: Option<&Value>) -> u32 {
    let n = number(value, 0.0);
    if n <= 0.0 {
        0
    } else {
        n.trunc().min(u32::MAX as f64) as u32
    }
}

/// JavaScript-style truthiness, used for loosely typed flags
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Ordered, non-empty strings out of an array, a JSON-array-in-a-string, or
/// a comma separated string.
///
/// The API has sent list fields in all three shapes over time.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .flat_map(|item| match item {
                Value::String(s) => split_list(s),
                // only strings survive `string(item, "")`
                _ => Vec::new(),
            })
            .collect(),
        Some(Value::String(s)) => split_list(s),
        _ => Vec::new(),
    }
}

/// Structured parse first, delimiter split second
fn split_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') {
        if let Some(items) = parse_json_list(trimmed) {
            return items;
        }
    }

    split_commas(trimmed)
}

/// Elements of a JSON array that are non-blank strings; `None` if `raw` is
/// not a JSON array at all
pub fn parse_json_list(raw: &str) -> Option<Vec<String>> {
    let items: Vec<Value> = serde_json::from_str(raw).ok()?;
    Some(
        items
            .iter()
            .filter_map(|item| opt_string(Some(item)))
            .collect(),
    )
}

/// Comma separated segments, trimmed, empties dropped
pub fn split_commas(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_keeps_untrimmed_value() {
        assert_eq!(string(Some(&json!("  Villa ")), "x"), "  Villa ");
        assert_eq!(string(Some(&json!("   ")), "x"), "x");
        assert_eq!(string(Some(&json!(42)), "x"), "x");
        assert_eq!(string(None, "x"), "x");
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(number(Some(&json!(12.5)), 0.0), 12.5);
        assert_eq!(number(Some(&json!("2500")), 0.0), 2500.0);
        assert_eq!(number(Some(&json!(" 3.25 ")), 0.0), 3.25);
        assert_eq!(number(Some(&json!("abc")), 7.0), 7.0);
        assert_eq!(number(Some(&json!("inf")), 7.0), 7.0);
        assert_eq!(number(Some(&json!("")), 7.0), 7.0);
        assert_eq!(number(Some(&json!(true)), 7.0), 7.0);
        assert_eq!(number(Some(&Value::Null), 7.0), 7.0);
    }

    #[test]
    fn test_count_truncates_and_clamps() {
        assert_eq!(count(Some(&json!("3"))), 3);
        assert_eq!(count(Some(&json!(2.9))), 2);
        assert_eq!(count(Some(&json!(-4))), 0);
        assert_eq!(count(None), 0);
    }

    #[test]
    fn test_truthy_matches_js_rules() {
        assert!(!truthy(None));
        assert!(!truthy(Some(&json!(0))));
        assert!(!truthy(Some(&json!(""))));
        assert!(truthy(Some(&json!(1))));
        assert!(truthy(Some(&json!("false"))));
        assert!(truthy(Some(&json!([]))));
    }

    #[test]
    fn test_string_list_comma_and_json_forms_agree() {
        let expected = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(string_list(Some(&json!("a, b, c"))), expected);
        assert_eq!(string_list(Some(&json!(r#"["a","b","c"]"#))), expected);
    }

    #[test]
    fn test_string_list_empty_inputs() {
        assert!(string_list(Some(&json!(""))).is_empty());
        assert!(string_list(Some(&json!([]))).is_empty());
        assert!(string_list(None).is_empty());
        assert!(string_list(Some(&json!(5))).is_empty());
    }

    #[test]
    fn test_string_list_array_elements_are_expanded() {
        let raw = json!(["Pool, Gym", r#"["Garden"]"#, 3, null, "  "]);
        assert_eq!(string_list(Some(&raw)), vec!["Pool", "Gym", "Garden"]);
    }

    #[test]
    fn test_malformed_json_list_falls_back_to_commas() {
        assert_eq!(
            string_list(Some(&json!("[broken, list"))),
            vec!["[broken", "list"]
        );
    }

    #[test]
    fn test_json_list_drops_blank_and_non_string_items() {
        assert_eq!(
            parse_json_list(r#"["a", "", 1, " b"]"#),
            Some(vec!["a".to_string(), " b".to_string()])
        );
        assert_eq!(parse_json_list("{}"), None);
        assert_eq!(split_commas(" x ,, y "), vec!["x", "y"]);
    }
}
