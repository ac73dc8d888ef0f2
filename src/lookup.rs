//! Helpers for reading loosely-structured guide data. Input documents are
//! untyped JSON with lots of optional, nested keys; every read goes through
//! these functions so that a missing key quietly becomes a default instead of
//! an error.
//!
//! Truthiness follows the conventions of the data files: `null`, `false`, `0`,
//! `""`, `[]` and `{}` are all treated as "not set" by [`truthy`] and
//! [`first_truthy`].

use serde_json::Value;

/// Walks `path` through nested objects. Returns `None` if any step is missing,
/// is not an object, or if the final value is `null`.
pub fn get<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |v, key| v.as_object()?.get(*key))
        .filter(|v| !v.is_null())
}

/// Reports whether a value counts as set.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Returns the first candidate that is present and [`truthy`].
pub fn first_truthy<'a, I>(candidates: I) -> Option<&'a Value>
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    candidates.into_iter().flatten().find(|v| truthy(v))
}

/// Converts a value into display text. Strings are returned verbatim and
/// numbers keep their natural form (`200`, `3.5`).
pub fn text(value: &Value) -> String {
    match value {
        Value::Null => String::from("None"),
        Value::Bool(true) => String::from("True"),
        Value::Bool(false) => String::from("False"),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Looks up `path` and converts it with [`text`], or returns `default`.
pub fn text_or(value: &Value, path: &[&str], default: &str) -> String {
    match get(value, path) {
        Some(v) => text(v),
        None => default.to_owned(),
    }
}

/// Looks up `path` and converts it with [`format_content`]. Missing values
/// become the empty string.
pub fn content_at(value: &Value, path: &[&str]) -> String {
    get(value, path).map(format_content).unwrap_or_default()
}

/// Formats free-form content. Lists are flattened onto separate lines and
/// unset values become the empty string.
pub fn format_content(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(format_content)
            .collect::<Vec<_>>()
            .join("\n"),
        v if !truthy(v) => String::new(),
        v => text(v),
    }
}

/// Returns the list stored at `path`, or an empty slice.
pub fn list_at<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    get(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Reads an integer out of a number (floats are truncated) or a numeric
/// string.
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(*b as i64),
        _ => None,
    }
}

/// Reads a float out of a number or a numeric string.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Formats an integer with `,` thousands separators.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_nested() {
        let data = json!({"race": {"vitals": {"distance_miles": 200}}});
        assert_eq!(
            Some(&json!(200)),
            get(&data, &["race", "vitals", "distance_miles"])
        );
        assert_eq!(None, get(&data, &["race", "missing", "distance_miles"]));
        assert_eq!(None, get(&data, &["race", "vitals", "distance_miles", "x"]));
    }

    #[test]
    fn test_get_treats_null_as_missing() {
        let data = json!({"elevation": null});
        assert_eq!(None, get(&data, &["elevation"]));
        assert_eq!("~", text_or(&data, &["elevation"], "~"));
    }

    #[test]
    fn test_first_truthy_skips_empty_values() {
        let data = json!({"a": "", "b": 0, "c": "found"});
        let found = first_truthy([
            get(&data, &["missing"]),
            get(&data, &["a"]),
            get(&data, &["b"]),
            get(&data, &["c"]),
        ]);
        assert_eq!(Some(&json!("found")), found);
    }

    #[test]
    fn test_text() {
        assert_eq!("200", text(&json!(200)));
        assert_eq!("3.5", text(&json!(3.5)));
        assert_eq!("True", text(&json!(true)));
        assert_eq!("plain", text(&json!("plain")));
    }

    #[test]
    fn test_format_content() {
        assert_eq!("a\nb", format_content(&json!(["a", "b"])));
        assert_eq!("", format_content(&json!(null)));
        assert_eq!("", format_content(&json!(0)));
        assert_eq!("<strong>x</strong>", format_content(&json!("<strong>x</strong>")));
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Some(3000), as_int(&json!(3000)));
        assert_eq!(Some(2999), as_int(&json!(2999.9)));
        assert_eq!(Some(3000), as_int(&json!(" 3000 ")));
        assert_eq!(None, as_int(&json!("high")));
    }

    #[test]
    fn test_thousands() {
        assert_eq!("0", thousands(0));
        assert_eq!("999", thousands(999));
        assert_eq!("1,000", thousands(1000));
        assert_eq!("11,000", thousands(11000));
        assert_eq!("1,234,567", thousands(1_234_567));
        assert_eq!("-4,500", thousands(-4500));
    }
}
