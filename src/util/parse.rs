use crate::error::{fmt::Error as E, Error};

/// Parses an `i64` from a non-empty sequence of ASCII digits.
///
/// The caller is responsible for having already checked that every byte is
/// an ASCII digit.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub(crate) fn i64(bytes: &[u8]) -> Result<i64, Error> {
    if bytes.is_empty() {
        return Err(Error::from(E::NoDigitsFound));
    }
    let mut n: i64 = 0;
    for &byte in bytes {
        debug_assert!(byte.is_ascii_digit());
        let digit = i64::from(byte - b'0');
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(digit))
            .ok_or(E::TooBig)?;
    }
    Ok(n)
}

/// Parses up to 9 ASCII digits as the fractional part of a second, scaling
/// the result to nanoseconds. `"5"` is `500_000_000`.
///
/// The caller is responsible for limiting the input to at most 9 digits.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub(crate) fn fraction(bytes: &[u8]) -> Result<i32, Error> {
    debug_assert!(bytes.len() <= 9);
    let mut n = i32::try_from(i64(bytes)?).map_err(|_| E::TooBig)?;
    for _ in bytes.len()..9 {
        n *= 10;
    }
    Ok(n)
}

/// Splits off the longest prefix (at most `max` bytes long) of `input`
/// matching `predicate`.
///
/// `predicate` must only match ASCII bytes so that both halves are valid
/// string slices.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub(crate) fn split_while(
    input: &str,
    max: usize,
    predicate: impl Fn(u8) -> bool,
) -> (&str, &str) {
    let len = input
        .bytes()
        .take(max)
        .take_while(|&byte| byte.is_ascii() && predicate(byte))
        .count();
    input.split_at(len)
}

/// Returns the first character of `input`, for use in error messages.
pub(crate) fn first(input: &str) -> Option<char> {
    input.chars().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(i64(b"0").unwrap(), 0);
        assert_eq!(i64(b"007").unwrap(), 7);
        assert_eq!(i64(b"9223372036854775807").unwrap(), i64::MAX);
        assert!(i64(b"9223372036854775808").is_err());
        assert!(i64(b"").is_err());
    }

    #[test]
    fn fractions() {
        assert_eq!(fraction(b"5").unwrap(), 500_000_000);
        assert_eq!(fraction(b"000000001").unwrap(), 1);
        assert_eq!(fraction(b"123456789").unwrap(), 123_456_789);
    }

    #[test]
    fn splitting() {
        assert_eq!(split_while("2024-07", 9, |b| b.is_ascii_digit()), ("2024", "-07"));
        assert_eq!(split_while("20240730", 4, |b| b.is_ascii_digit()), ("2024", "0730"));
        assert_eq!(split_while("Juli", 9, |b| b.is_ascii_alphabetic()), ("Juli", ""));
        assert_eq!(split_while("日本", 9, |b| b.is_ascii_alphabetic()), ("", "日本"));
    }
}
