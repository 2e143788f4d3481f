//! String escaping and character classification shared by the lexer, the
//! writer, and the printer.

use std::fmt::Write as _;

pub fn is_identifier_start_char(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

pub fn is_identifier_char(c: u8) -> bool {
    is_identifier_start_char(c) || c.is_ascii_digit()
}

/// Escape a string payload for emission inside quotes.
///
/// Printable ASCII passes through except for backslash and both quote
/// characters, which are always escaped so the result is valid inside
/// either quote kind. Control characters and non-ASCII bytes become
/// three-digit decimal escapes: a following digit can never extend `\010`
/// into a different escape. In interpolated-string mode the backtick and
/// both braces are escaped as well.
pub fn escape(s: &[u8], for_interp_string: bool) -> String {
    let mut r = String::with_capacity(s.len() + s.len() / 8);

    for &b in s {
        match b {
            0x07 => r.push_str("\\a"),
            0x08 => r.push_str("\\b"),
            0x0c => r.push_str("\\f"),
            b'\n' => r.push_str("\\n"),
            b'\r' => r.push_str("\\r"),
            b'\t' => r.push_str("\\t"),
            0x0b => r.push_str("\\v"),
            b'\\' => r.push_str("\\\\"),
            b'\'' => r.push_str("\\'"),
            b'"' => r.push_str("\\\""),
            b'`' if for_interp_string => r.push_str("\\`"),
            b'{' if for_interp_string => r.push_str("\\{"),
            b'}' if for_interp_string => r.push_str("\\}"),
            0x20..=0x7e => r.push(b as char),
            _ => {
                let _ = write!(r, "\\{b:03}");
            }
        }
    }

    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(escape(b"hello world", false), "hello world");
    }

    #[test]
    fn test_quotes_and_backslash() {
        assert_eq!(escape(b"it's", false), "it\\'s");
        assert_eq!(escape(br#"say "hi""#, false), "say \\\"hi\\\"");
        assert_eq!(escape(br"a\b", false), "a\\\\b");
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(escape(b"a\nb", false), "a\\nb");
        assert_eq!(escape(b"\x07\x0b", false), "\\a\\v");
        assert_eq!(escape(&[0x01], false), "\\001");
        assert_eq!(escape(&[0xff], false), "\\255");
    }

    #[test]
    fn test_interp_mode_escapes_delimiters() {
        assert_eq!(escape(b"a{b}c`d", true), "a\\{b\\}c\\`d");
        assert_eq!(escape(b"a{b}c`d", false), "a{b}c`d");
    }

    #[test]
    fn test_identifier_chars() {
        assert!(is_identifier_start_char(b'_'));
        assert!(is_identifier_start_char(b'Z'));
        assert!(!is_identifier_start_char(b'7'));
        assert!(is_identifier_char(b'7'));
        assert!(!is_identifier_char(b'.'));
    }
}
