//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use regex::Regex;
use std::sync::OnceLock;

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

    let re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"));

    re.replace_all(text.trim(), " ").to_string()
}

/// Decode bytes as strict UTF-8, returning `None` on any malformed sequence
pub fn decode_utf8(bytes: &[u8]) -> Option<String> {
    let (cow, had_errors) = UTF_8.decode_without_bom_handling(strip_utf8_bom(bytes));

    if had_errors {
        return None;
    }

    Some(cow.into_owned())
}

/// Decode bytes, preferring UTF-8 and falling back to a lossy single-byte decode
///
/// The fallback never fails: every byte maps to some character in
/// Windows-1252, which is the WHATWG superset of Latin-1.
pub fn decode_lossy(bytes: &[u8]) -> String {
    if let Some(text) = decode_utf8(bytes) {
        return text;
    }

    let (cow, _encoding, _had_errors) = WINDOWS_1252.decode(bytes);
    cow.into_owned()
}

/// Decode bytes using the charset declared in a `Content-Type` header value
///
/// Unknown or missing labels fall through to [`decode_lossy`].
pub fn decode_with_charset(bytes: &[u8], content_type: &str) -> String {
    let declared = content_type
        .split(';')
        .find_map(|part| {
            let part = part.trim();
            part.get(..8)
                .filter(|key| key.eq_ignore_ascii_case("charset="))
                .map(|_| &part[8..])
        })
        .and_then(|label| Encoding::for_label(label.trim_matches('"').as_bytes()));

    match declared {
        Some(encoding) if encoding != UTF_8 => {
            let (cow, _encoding, _had_errors) = encoding.decode(bytes);
            cow.into_owned()
        }
        _ => decode_lossy(bytes),
    }
}

fn strip_utf8_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes)
}

/// Format byte size as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return String::from("0 B");
    }

    let base: f64 = 1024.0;
    let exponent = (bytes as f64).log(base).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);

    let value = bytes as f64 / base.powi(exponent as i32);

    format!("{value:.2} {}", UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  hello   world  "), "hello world");
        assert_eq!(normalize_whitespace("hello\n\nworld"), "hello world");
        assert_eq!(normalize_whitespace("\t\n "), "");
    }

    #[test]
    fn test_decode_utf8_strict() {
        assert_eq!(decode_utf8("Café".as_bytes()).as_deref(), Some("Café"));
        assert!(decode_utf8(&[0x43, 0x61, 0x66, 0xE9]).is_none());
    }

    #[test]
    fn test_decode_utf8_strips_bom() {
        let bytes = [0xEF, 0xBB, 0xBF, b'h', b'i'];
        assert_eq!(decode_utf8(&bytes).as_deref(), Some("hi"));
    }

    #[test]
    fn test_decode_lossy_latin1_fallback() {
        // "Café" in Latin-1
        let bytes = [0x43, 0x61, 0x66, 0xE9];
        assert_eq!(decode_lossy(&bytes), "Café");
    }

    #[test]
    fn test_decode_with_declared_charset() {
        let bytes = [0x43, 0x61, 0x66, 0xE9];
        assert_eq!(
            decode_with_charset(&bytes, "text/html; charset=ISO-8859-1"),
            "Café"
        );
        assert_eq!(
            decode_with_charset("Café".as_bytes(), "text/html; charset=utf-8"),
            "Café"
        );
        assert_eq!(decode_with_charset("plain".as_bytes(), "text/html"), "plain");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1_048_576), "1.00 MB");
    }
}
