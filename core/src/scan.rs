//! Lenient numeric scanning for command-line values
//!
//! Mirrors C `atoi`/`%d` behaviour: leading whitespace is skipped, an optional
//! sign is accepted, and digits are consumed until the first non-digit.

/// Scan a leading signed integer, returning it together with the unconsumed rest.
///
/// Returns `None` when no digit follows the optional sign. Values that do not
/// fit in an `i32` saturate.
pub fn leading_int(input: &str) -> Option<(i32, &str)> {
    let trimmed = input.trim_start();
    let (negative, body) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in body[..digits].bytes() {
        value = (value * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        value = -value;
    }
    let value = value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;

    Some((value, &body[digits..]))
}

/// `atoi`: leading integer or 0.
pub fn atoi(input: &str) -> i32 {
    leading_int(input).map_or(0, |(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_int_plain() {
        assert_eq!(leading_int("640x400"), Some((640, "x400")));
        assert_eq!(leading_int("  42"), Some((42, "")));
    }

    #[test]
    fn test_leading_int_signs() {
        assert_eq!(leading_int("-7abc"), Some((-7, "abc")));
        assert_eq!(leading_int("+3"), Some((3, "")));
        assert_eq!(leading_int("-"), None);
    }

    #[test]
    fn test_leading_int_rejects_non_digits() {
        assert_eq!(leading_int("x400"), None);
        assert_eq!(leading_int(""), None);
    }

    #[test]
    fn test_leading_int_saturates() {
        assert_eq!(leading_int("99999999999"), Some((i32::MAX, "")));
        assert_eq!(leading_int("-99999999999"), Some((i32::MIN, "")));
    }

    #[test]
    fn test_atoi_defaults_to_zero() {
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi("16001"), 16001);
    }
}
