//! Query-style URL unescaping for scanned values.

use std::borrow::Cow;

/// Error returned when a value cannot be percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid URL escape {sequence:?} at byte {offset}")]
    InvalidEscape { offset: usize, sequence: String },
}

/// Decodes `+` as space and `%XX` as a byte, like a form-encoded query value.
///
/// Every `%` must be followed by two hex digits. Decoded bytes that are not
/// valid UTF-8 become U+FFFD, so well-formed escapes always decode.
pub fn query_unescape(input: &str) -> Result<String, DecodeError> {
    let bytes = input.as_bytes();
    if let Some(offset) = next_invalid_escape(bytes, 0) {
        let end = (offset + 3).min(bytes.len());
        return Err(DecodeError::InvalidEscape {
            offset,
            sequence: String::from_utf8_lossy(&bytes[offset..end]).into_owned(),
        });
    }
    Ok(decode_form(input))
}

/// Like [`query_unescape`], but a `%` that does not start a valid escape is
/// kept as a literal `%` while every valid `%XX` around it is still decoded.
pub fn lenient_unescape(input: &str) -> String {
    decode_form(&escape_stray_percents(input))
}

fn decode_form(input: &str) -> String {
    // '+' first, so an escaped "%2B" still decodes to a literal plus
    let spaced = input.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

/// Rewrites every malformed `%` as `%25` so the result is well-formed.
fn escape_stray_percents(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let Some(first) = next_invalid_escape(bytes, 0) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + 4);
    let mut copied = 0;
    let mut at = Some(first);
    while let Some(offset) = at {
        out.push_str(&input[copied..offset]);
        out.push_str("%25");
        copied = offset + 1;
        at = next_invalid_escape(bytes, copied);
    }
    out.push_str(&input[copied..]);
    Cow::Owned(out)
}

/// Byte offset of the first `%` at or after `from` that is not followed by two hex digits.
fn next_invalid_escape(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return Some(i);
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    None
}
