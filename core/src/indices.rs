//! Index-set codec: comma separated integers, as used by `order` and `marked`.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Display;

pub const DELIMITER: char = ',';

/// Parses a delimited list, silently skipping tokens that are not integers.
///
/// Each token is read like `parseInt(token, 10)`: an optional sign followed by
/// leading digits, anything after the digits is ignored. Tokens without
/// leading digits are dropped. Values beyond the `i64` range saturate to
/// `i64::MIN`/`i64::MAX`.
pub fn parse_indices(text: &str) -> Vec<i64> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(DELIMITER).filter_map(parse_leading_int).collect()
}

/// Joins `indices` with the delimiter, keeping their order.
pub fn format_indices<T: Display>(indices: &[T]) -> String {
    use core::fmt::Write;

    let mut out = String::new();
    for (i, index) in indices.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        // writing into a String cannot fail
        let _ = write!(out, "{}", index);
    }
    out
}

fn parse_leading_int(token: &str) -> Option<i64> {
    let token = token.trim();
    let (negative, sign_len) = match token.as_bytes().first()? {
        b'-' => (true, 1),
        b'+' => (false, 1),
        _ => (false, 0),
    };
    let digits: Vec<i64> = token[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|digit| i64::from(digit - b'0'))
        .collect();
    if digits.is_empty() {
        return None;
    }

    // saturate instead of overflowing so huge values still fail range checks
    Some(digits.into_iter().fold(0i64, |acc, digit| {
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(digit)
        } else {
            acc.saturating_add(digit)
        }
    }))
}
