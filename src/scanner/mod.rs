//! Payload scanner for incoming write requests.
//!
//! Walks a decoded JSON body depth-first and flags the first leaf whose
//! URL-unescaped text contains an HTML-tag-shaped substring. This is a
//! rejection heuristic, not a sanitizer.
//!
//! Object keys are visited in `serde_json::Map` order (sorted), so the
//! reported offending path is deterministic for a given body.

pub mod unescape;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

pub use unescape::{lenient_unescape, query_unescape, DecodeError};

lazy_static! {
    /// `<...>` with quoted attribute content allowed to contain `>`.
    static ref TAG_PATTERN: Regex =
        Regex::new(r#"<("[^"]*"|'[^']*'|[^'">])*>"#).expect("tag pattern must compile");
}

/// Max characters of a matched value kept in a verdict.
const MATCH_PREVIEW_CHARS: usize = 120;

/// Outcome of scanning a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Clean,
    Malicious {
        /// JSON pointer of the offending value, e.g. `/tags/1/note`.
        path: String,
        /// Decoded text that matched, truncated.
        matched: String,
    },
}

impl Verdict {
    pub fn is_malicious(&self) -> bool {
        matches!(self, Verdict::Malicious { .. })
    }
}

/// Returns true if already-decoded text looks like markup.
pub fn looks_like_markup(text: &str) -> bool {
    TAG_PATTERN.is_match(text)
}

/// Decodes a request body into the mapping the scanner inspects.
///
/// An empty body, or one that is not a JSON object, yields an empty map. The
/// failure is logged and left for the handler to reject.
pub fn parse_body(bytes: &[u8]) -> Map<String, Value> {
    if bytes.is_empty() {
        return Map::new();
    }
    match serde_json::from_slice::<Map<String, Value>>(bytes) {
        Ok(map) => map,
        Err(e) => {
            warn!(error = %e, "request body is not a JSON object, scanning as empty");
            Map::new()
        }
    }
}

/// Scans a decoded request body.
pub fn scan_payload(body: &Map<String, Value>) -> Verdict {
    let verdict = scan_object(body, "");
    if let Verdict::Malicious { path, .. } = &verdict {
        info!(path = %path, "XSS attack, malicious script in payload");
    }
    verdict
}

/// Scans any JSON value, rooted at the empty pointer.
pub fn scan_value(value: &Value) -> Verdict {
    match value {
        Value::Object(map) => scan_payload(map),
        other => walk(other, ""),
    }
}

fn scan_object(map: &Map<String, Value>, pointer: &str) -> Verdict {
    for (key, value) in map {
        let child = format!("{}/{}", pointer, escape_pointer_token(key));
        debug!(key = %sanitize_for_logging(key), "visiting key");
        let verdict = walk(value, &child);
        if verdict.is_malicious() {
            // Siblings after the first hit are not inspected
            return verdict;
        }
    }
    Verdict::Clean
}

fn walk(value: &Value, pointer: &str) -> Verdict {
    match value {
        Value::Object(map) => scan_object(map, pointer),
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                let verdict = walk(item, &format!("{}/{}", pointer, idx));
                if verdict.is_malicious() {
                    return verdict;
                }
            }
            Verdict::Clean
        }
        scalar => inspect_scalar(scalar, pointer),
    }
}

fn inspect_scalar(value: &Value, pointer: &str) -> Verdict {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let decoded = match query_unescape(&raw) {
        Ok(decoded) => decoded,
        Err(e) => {
            // Stray '%' is kept literally; valid escapes around it still decode
            warn!(path = %pointer, error = %e, "value contains malformed URL escapes, decoding leniently");
            lenient_unescape(&raw)
        }
    };
    debug!(path = %pointer, value = %sanitize_for_logging(&decoded), "decoded value");

    // Markup can also survive only in the raw form, e.g. `<a%22>`
    let hit = if looks_like_markup(&decoded) {
        Some(decoded)
    } else if decoded != raw && looks_like_markup(&raw) {
        Some(raw)
    } else {
        None
    };

    match hit {
        Some(text) => Verdict::Malicious {
            path: pointer.to_string(),
            matched: text.chars().take(MATCH_PREVIEW_CHARS).collect(),
        },
        None => Verdict::Clean,
    }
}

/// RFC 6901 escaping of a single pointer segment.
fn escape_pointer_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Sanitizes user input for logging purposes.
///
/// Removes control characters (except whitespace), limits length to 200
/// characters and escapes quotes and backslashes.
pub fn sanitize_for_logging(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .take(200)
        .collect::<String>()
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\'', "\\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scan(v: Value) -> Verdict {
        scan_value(&v)
    }

    #[test]
    fn test_script_tag_flagged() {
        let verdict = scan(json!({"comment": "<script>alert(1)</script>"}));
        assert_eq!(
            verdict,
            Verdict::Malicious {
                path: "/comment".into(),
                matched: "<script>alert(1)</script>".into()
            }
        );
    }

    #[test]
    fn test_plain_text_clean() {
        assert_eq!(scan(json!({"comment": "hello world"})), Verdict::Clean);
        assert_eq!(scan(json!({})), Verdict::Clean);
    }

    #[test]
    fn test_object_inside_array_flagged() {
        let verdict = scan(json!({"tags": ["ok", {"note": "<img src=x onerror=alert(1)>"}]}));
        match verdict {
            Verdict::Malicious { path, .. } => assert_eq!(path, "/tags/1/note"),
            Verdict::Clean => panic!("expected nested object in array to be flagged"),
        }
    }

    #[test]
    fn test_percent_encoded_flagged() {
        assert!(scan(json!({"q": "%3Cscript%3E"})).is_malicious());
        assert!(scan(json!({"q": "%3Cb+onclick%3D'x'%3E"})).is_malicious());
    }

    #[test]
    fn test_double_encoded_decoded_once() {
        assert_eq!(scan(json!({"q": "%253Cscript%253E"})), Verdict::Clean);
    }

    #[test]
    fn test_deep_clean_object() {
        let mut v = json!({"leaf": "just text", "n": 3, "ok": true});
        for i in 0..100 {
            let mut m = Map::new();
            m.insert(format!("level{}", i), v);
            m.insert("sibling".into(), json!(["a", 1, null, {"x": "y"}]));
            v = Value::Object(m);
        }
        assert_eq!(scan(v), Verdict::Clean);
    }

    // The array branch used to evaluate nested results without propagating them.
    #[test]
    fn test_array_results_propagate_at_any_depth() {
        assert!(scan(json!({"a": [[[{"b": "<x>"}]]]})).is_malicious());
        assert!(scan(json!({"a": {"b": [1, 2, {"c": [{"d": "<svg onload=x>"}]}]}})).is_malicious());
        assert!(scan(json!({"a": ["clean", "<i>"]})).is_malicious());
    }

    #[test]
    fn test_null_and_non_string_scalars_clean() {
        // null stringifies as "null", not as a tag-shaped placeholder
        assert_eq!(scan(json!({"a": null})), Verdict::Clean);
        assert_eq!(scan(json!({"n": 42, "f": 1.5, "b": false})), Verdict::Clean);
    }

    #[test]
    fn test_undecodable_value_does_not_abort() {
        assert_eq!(scan(json!({"note": "100% sure"})), Verdict::Clean);
        // A bad escape in one field must not hide markup in another
        let verdict = scan(json!({"a": "100%", "b": "<b>"}));
        assert_eq!(verdict, Verdict::Malicious { path: "/b".into(), matched: "<b>".into() });
        assert!(scan(json!({"a": "<b>%zz"})).is_malicious());
    }

    #[test]
    fn test_stray_percent_does_not_hide_encoded_markup() {
        let verdict = scan(json!({"q": "%3Cscript%3Ealert(1)%3C/script%3E%"}));
        assert_eq!(
            verdict,
            Verdict::Malicious { path: "/q".into(), matched: "<script>alert(1)</script>%".into() }
        );
        assert!(scan(json!({"q": "%%3Cscript%3E"})).is_malicious());
        assert!(scan(json!({"q": "%zz%3Cimg+src=x+onerror=alert(1)%3E"})).is_malicious());
    }

    #[test]
    fn test_non_utf8_escape_does_not_hide_markup() {
        assert!(scan(json!({"q": "%FF%3Cscript%3Ealert(1)%3C/script%3E"})).is_malicious());
        assert!(scan(json!({"q": "%FF%FE%3Cb%3E"})).is_malicious());
        assert_eq!(scan(json!({"q": "%FF%FE"})), Verdict::Clean);
    }

    #[test]
    fn test_markup_only_in_raw_form_flagged() {
        // Decodes to `<a">`, which no longer looks like a tag
        let verdict = scan(json!({"a": "<a%22>"}));
        assert_eq!(verdict, Verdict::Malicious { path: "/a".into(), matched: "<a%22>".into() });
    }

    #[test]
    fn test_first_match_in_key_order() {
        let verdict = scan(json!({"z": "<i>", "a": "<b>"}));
        match verdict {
            Verdict::Malicious { path, .. } => assert_eq!(path, "/a"),
            Verdict::Clean => panic!("expected malicious"),
        }
    }

    #[test]
    fn test_quoted_attribute_content() {
        assert!(looks_like_markup(r#"<a title="x > y">"#));
        assert!(looks_like_markup("<a href='javascript:1'>"));
        // Known false positive of a tag-shaped heuristic
        assert!(looks_like_markup("2 < 3 and 5 > 4"));
        assert!(!looks_like_markup("a < b"));
        assert!(!looks_like_markup("no tags here"));
    }

    #[test]
    fn test_pointer_escaping() {
        let verdict = scan(json!({"a/b": {"c~d": "<p>"}}));
        match verdict {
            Verdict::Malicious { path, .. } => assert_eq!(path, "/a~1b/c~0d"),
            Verdict::Clean => panic!("expected malicious"),
        }
    }

    #[test]
    fn test_parse_body_fallbacks() {
        assert!(parse_body(b"").is_empty());
        assert!(parse_body(b"not json").is_empty());
        assert!(parse_body(b"[1, 2]").is_empty());
        let map = parse_body(br#"{"name": "Alice"}"#);
        assert_eq!(map.get("name"), Some(&json!("Alice")));
    }

    #[test]
    fn test_sanitize_for_logging() {
        assert_eq!(sanitize_for_logging("normal text"), "normal text");
        assert_eq!(sanitize_for_logging("text\nwith\nnewlines"), "text\nwith\nnewlines");

        let sanitized = sanitize_for_logging("text\x00with\x01control\x02chars");
        assert!(!sanitized.contains('\x00'));
        assert!(!sanitized.contains('\x01'));
        assert!(!sanitized.contains('\x02'));

        let long_text = "a".repeat(300);
        assert_eq!(sanitize_for_logging(&long_text).len(), 200);
    }
}
