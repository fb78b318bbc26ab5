//! Shared tokenizer for space-delimited server fields.

use arrayvec::ArrayString;

use crate::ProtocolError;

/// Whitespace as the server uses it: space, CR, LF, tab.
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\r' | b'\n' | b'\t')
}

/// Bytes that may appear in a numeric token. Sign characters count so that
/// placeholder ratings like `----` and ranges like `0-9999` scan as one
/// token.
pub fn is_number_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || byte == b'+' || byte == b'-'
}

/// Parses a decimal token the way `atoi` would: optional sign, then digits
/// until the first non-digit. Anything unparsable is 0.
pub fn parse_decimal(token: &str) -> i32 {
    let bytes = token.as_bytes();
    let (negative, rest) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    let mut value: i32 = 0;
    for &b in rest {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add(i32::from(b - b'0'));
    }
    if negative { -value } else { value }
}

/// Copies the next field out of `input` at `*pos`, up to the capacity of
/// the destination or the next space, whichever comes first.
///
/// The scan then advances past the rest of the token and the following
/// space regardless of whether anything was dropped — oversize fields are
/// silently capped, never rejected.
///
/// # Errors
/// Returns [`ProtocolError::TruncatedFrame`] when the input ends before the
/// delimiter, because the field may continue in the next delivery.
pub fn copy_field<const CAP: usize>(
    input: &[u8],
    pos: &mut usize,
) -> Result<ArrayString<CAP>, ProtocolError> {
    let mut field = ArrayString::new();
    while *pos < input.len() && input[*pos] != b' ' && field.len() < CAP {
        field.push(input[*pos] as char);
        *pos += 1;
    }
    while *pos < input.len() && input[*pos] != b' ' {
        *pos += 1;
    }
    if *pos >= input.len() {
        return Err(ProtocolError::TruncatedFrame);
    }
    *pos += 1;
    Ok(field)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_field_reads_token_and_skips_delimiter() {
        let mut pos = 0;
        let field: ArrayString<8> = copy_field(b"hello world", &mut pos).expect("field");
        assert_eq!(field.as_str(), "hello");
        assert_eq!(pos, 6);
    }

    #[test]
    fn test_copy_field_caps_oversize_token_and_still_advances() {
        let mut pos = 0;
        let field: ArrayString<3> = copy_field(b"abcdefgh next", &mut pos).expect("field");
        assert_eq!(field.as_str(), "abc");
        // Past the whole token and its delimiter, not just the copied part.
        assert_eq!(pos, 9);
    }

    #[test]
    fn test_copy_field_without_delimiter_is_truncated() {
        let mut pos = 0;
        let result: Result<ArrayString<8>, _> = copy_field(b"dangling", &mut pos);
        assert_eq!(result, Err(ProtocolError::TruncatedFrame));
    }

    #[test]
    fn test_parse_decimal_plain_and_signed() {
        assert_eq!(parse_decimal("1234"), 1234);
        assert_eq!(parse_decimal("-15"), -15);
        assert_eq!(parse_decimal("+7"), 7);
    }

    #[test]
    fn test_parse_decimal_placeholder_rating_is_zero() {
        // Guests show up with "----" in the rating column.
        assert_eq!(parse_decimal("----"), 0);
        assert_eq!(parse_decimal(""), 0);
    }

    #[test]
    fn test_parse_decimal_stops_at_first_non_digit() {
        assert_eq!(parse_decimal("0-9999"), 0);
        assert_eq!(parse_decimal("12ab"), 12);
    }
}
