// Percent-encoding for bound parameter values
//
// Values start from web-platform component encoding and then get a fixed set
// of reserved characters back, depending on where in the URL they land.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// What `encodeURIComponent` escapes: everything but
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Query-string values keep `@ : $ ,` literal.
const QUERY_VALUE: &AsciiSet = &COMPONENT.remove(b'@').remove(b':').remove(b'$').remove(b',');

/// Path segments keep everything a query value keeps, plus `& = + /`.
const PATH_SEGMENT: &AsciiSet = &QUERY_VALUE.remove(b'&').remove(b'=').remove(b'+').remove(b'/');

/// How a slot's value gets encoded before substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotEncoding {
    PathSegment,
    QueryValue,
}

impl SlotEncoding {
    pub fn encode(self, value: &str) -> String {
        match self {
            SlotEncoding::PathSegment => encode_path_segment(value),
            SlotEncoding::QueryValue => encode_query_value(value, true),
        }
    }
}

/// Percent-encode like `encodeURIComponent`, over the UTF-8 bytes of `value`
/// with uppercase hex.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Encode a query-string value. Spaces render as `%20` when
/// `pct_encode_spaces` is set, `+` otherwise.
pub fn encode_query_value(value: &str, pct_encode_spaces: bool) -> String {
    let encoded = utf8_percent_encode(value, QUERY_VALUE).to_string();
    if pct_encode_spaces {
        encoded
    } else {
        // Every `%` in the output starts an escape, so this only hits spaces
        encoded.replace("%20", "+")
    }
}

/// Encode a path segment value. Spaces are always `%20`.
pub fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_matches_web_platform() {
        assert_eq!(encode_uri_component("a b&c/d"), "a%20b%26c%2Fd");
        assert_eq!(encode_uri_component("!*'()~-_."), "!*'()~-_.");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
        assert_eq!(encode_uri_component("100%"), "100%25");
    }

    #[test]
    fn test_query_value_keeps_exceptions() {
        assert_eq!(encode_query_value("a@b:c$d,e", true), "a@b:c$d,e");
        assert_eq!(encode_query_value("&=+/", true), "%26%3D%2B%2F");
    }

    #[test]
    fn test_query_value_space_flag() {
        assert_eq!(encode_query_value("a b", true), "a%20b");
        assert_eq!(encode_query_value("a b", false), "a+b");
    }

    #[test]
    fn test_literal_escape_in_input_is_not_unescaped() {
        // "%40" in the raw value becomes "%2540", which must stay intact
        assert_eq!(encode_query_value("%40", true), "%2540");
        assert_eq!(encode_query_value("%20", false), "%2520");
    }

    #[test]
    fn test_path_segment_keeps_more() {
        assert_eq!(encode_path_segment("a b&c=d+e/f"), "a%20b&c=d+e/f");
        assert_eq!(encode_path_segment("x?y#z"), "x%3Fy%23z");
        assert_eq!(encode_path_segment("user@host:1"), "user@host:1");
    }

    #[test]
    fn test_segment_keeps_everything_query_keeps() {
        for ch in ["@", ":", "$", ","] {
            assert_eq!(encode_query_value(ch, true), ch);
            assert_eq!(encode_path_segment(ch), ch);
        }
        for ch in ["&", "=", "+", "/"] {
            assert_ne!(encode_query_value(ch, true), ch);
            assert_eq!(encode_path_segment(ch), ch);
        }
    }

    #[test]
    fn test_plus_form_only_replaces_spaces() {
        assert_eq!(encode_query_value("a b+c", false), "a+b%2Bc");
        assert_eq!(encode_query_value("%20 x", false), "%2520+x");
    }

    #[test]
    fn test_slot_encoding_dispatch() {
        assert_eq!(SlotEncoding::QueryValue.encode("a/b c"), "a%2Fb%20c");
        assert_eq!(SlotEncoding::PathSegment.encode("a/b c"), "a/b%20c");
    }
}
