//! Pure value formatters shared by every renderer.

use chrono::{DateTime, Local, NaiveDateTime};
use serde_json::Value;

/// Shown wherever a scalar field is absent.
pub const PLACEHOLDER: &str = "—";

pub const TRUNCATION_MARKER: &str = "… (truncated)";

const DISPLAY_TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Text or the placeholder when missing/empty.
pub fn or_placeholder(s: Option<&str>) -> &str {
    match s {
        Some(v) if !v.is_empty() => v,
        _ => PLACEHOLDER,
    }
}

pub fn format_timestamp(ts: Option<&str>) -> String {
    let raw = match ts {
        Some(t) if !t.trim().is_empty() => t.trim(),
        _ => return PLACEHOLDER.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY_TS_FORMAT).to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format(DISPLAY_TS_FORMAT).to_string();
        }
    }
    raw.to_string()
}

/// Shortest round-trippable form: `12`, `12.5`, `0.25`.
pub fn format_number(n: f64) -> String {
    format!("{n}")
}

pub fn format_duration(secs: Option<f64>) -> String {
    match secs {
        Some(s) => format!("{}s", format_number(s)),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_cost(cost: Option<f64>) -> String {
    match cost {
        Some(c) => format!("{c:.4}"),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Keeps the first `budget` lines, appending the truncation marker when
/// anything was dropped.
pub fn truncate_lines(text: &str, budget: usize) -> String {
    let mut lines = text.lines();
    let kept: Vec<&str> = lines.by_ref().take(budget).collect();
    if lines.next().is_none() {
        return text.to_string();
    }
    let mut out = kept.join("\n");
    out.push('\n');
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Character cap on top of the line budget; never splits a UTF-8 sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}\n{}", &text[..idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

pub fn encode_query_component(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn timestamps() {
        assert_eq!(format_timestamp(None), PLACEHOLDER);
        assert_eq!(format_timestamp(Some("")), PLACEHOLDER);
        assert_eq!(
            format_timestamp(Some("2026-02-21T00:37:20.185158")),
            "2026-02-21 00:37:20"
        );
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
    }

    #[test]
    fn numbers_and_costs() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_duration(Some(12.0)), "12s");
        assert_eq!(format_duration(Some(3.25)), "3.25s");
        assert_eq!(format_duration(None), PLACEHOLDER);
        assert_eq!(format_cost(Some(0.1)), "0.1000");
        assert_eq!(format_cost(Some(0.123456)), "0.1235");
        assert_eq!(format_cost(None), PLACEHOLDER);
    }

    #[test]
    fn line_truncation() {
        assert_eq!(truncate_lines("a\nb", 2), "a\nb");
        assert_eq!(truncate_lines("a\nb\nc", 2), format!("a\nb\n{TRUNCATION_MARKER}"));
        assert_eq!(truncate_lines("", 2), "");
    }

    #[test]
    fn char_truncation_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), format!("hé\n{TRUNCATION_MARKER}"));
        assert_eq!(truncate_chars("hi", 2), "hi");
    }

    #[test]
    fn pretty_json_indents() {
        assert_eq!(pretty_json(&json!({"a": 1})), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn query_encoding() {
        assert_eq!(encode_query_component("a b/c&d"), "a+b%2Fc%26d");
    }
}
