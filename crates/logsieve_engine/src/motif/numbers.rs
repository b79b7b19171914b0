//! Numeric motifs: number, float, hexnumber, duration.

use serde_json::Value;

use super::{MotifMatch, digit_run};

/// One or more decimal digits. Captures as a JSON number when the value
/// fits an `i64`, otherwise as a string.
pub(crate) fn number(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let len = digit_run(input.as_bytes(), at);
    if len == 0 {
        return None;
    }
    let span = &input[at..at + len];
    Some(MotifMatch {
        consumed: len,
        value: capture.then(|| match span.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String(span.to_string()),
        }),
    })
}

/// A non-scientific floating point number: optional sign, digits, decimal
/// point, digits.
pub(crate) fn float(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    let mut i = at;
    if i < bytes.len() && bytes[i] == b'-' {
        i += 1;
    }
    let int_len = digit_run(bytes, i);
    if int_len == 0 {
        return None;
    }
    i += int_len;
    if i >= bytes.len() || bytes[i] != b'.' {
        return None;
    }
    i += 1;
    let frac_len = digit_run(bytes, i);
    if frac_len == 0 {
        return None;
    }
    i += frac_len;

    let span = &input[at..i];
    Some(MotifMatch {
        consumed: i - at,
        value: capture.then(|| {
            span.parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map_or_else(|| Value::String(span.to_string()), Value::Number)
        }),
    })
}

/// A `0x`-prefixed hexadecimal number. Captures the full span as a string.
pub(crate) fn hexnumber(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    if at + 2 > bytes.len() || bytes[at] != b'0' || bytes[at + 1] != b'x' {
        return None;
    }
    let mut i = at + 2;
    while i < bytes.len() && bytes[i].is_ascii_hexdigit() {
        i += 1;
    }
    if i == at + 2 {
        return None;
    }
    Some(MotifMatch::span(input, at, i - at, capture))
}

/// A duration of the form `h:mm:ss`, with an unbounded hour field.
pub(crate) fn duration(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    let hours = digit_run(bytes, at);
    if hours == 0 {
        return None;
    }
    let mut i = at + hours;
    for _ in 0..2 {
        if i >= bytes.len() || bytes[i] != b':' {
            return None;
        }
        i += 1;
        if digit_run(bytes, i) != 2 {
            return None;
        }
        i += 2;
    }
    Some(MotifMatch::span(input, at, i - at, capture))
}
