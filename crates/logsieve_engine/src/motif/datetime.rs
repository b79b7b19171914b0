//! Date and time motifs. All capture the matched span verbatim; the engine
//! does not normalize timestamps.

use super::{MotifMatch, digit_run};

static MONTHS: &[&[u8; 3]] = &[
    b"Jan", b"Feb", b"Mar", b"Apr", b"May", b"Jun", b"Jul", b"Aug", b"Sep", b"Oct", b"Nov",
    b"Dec",
];

fn two_digits_max(bytes: &[u8], at: usize, max: u32) -> Option<usize> {
    if digit_run(bytes, at) < 2 {
        return None;
    }
    let value = (u32::from(bytes[at] - b'0') * 10) + u32::from(bytes[at + 1] - b'0');
    (value <= max).then_some(2)
}

/// `hh:mm:ss` with bounded fields, starting at `at`. Returns consumed bytes.
fn clock(bytes: &[u8], at: usize, max_hour: u32) -> Option<usize> {
    let mut i = at;
    i += two_digits_max(bytes, i, max_hour)?;
    for _ in 0..2 {
        if bytes.get(i) != Some(&b':') {
            return None;
        }
        i += 1;
        i += two_digits_max(bytes, i, 59)?;
    }
    Some(i - at)
}

/// An RFC 3164 timestamp: `Mmm dd hh:mm:ss`, where a single-digit day may
/// be space-padded (`Oct  5 01:00:00`).
pub(crate) fn date_rfc3164(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    if at + 3 > bytes.len() {
        return None;
    }
    let month: &[u8] = &bytes[at..at + 3];
    if !MONTHS.iter().any(|m| &m[..] == month) {
        return None;
    }
    let mut i = at + 3;
    if bytes.get(i) != Some(&b' ') {
        return None;
    }
    i += 1;

    // Day: " 5", "5" or "15".
    if bytes.get(i) == Some(&b' ') {
        i += 1;
        if digit_run(bytes, i) != 1 {
            return None;
        }
        i += 1;
    } else {
        let len = digit_run(bytes, i);
        if len == 0 || len > 2 {
            return None;
        }
        i += len;
    }

    if bytes.get(i) != Some(&b' ') {
        return None;
    }
    i += 1;
    i += clock(bytes, i, 23)?;
    Some(MotifMatch::span(input, at, i - at, capture))
}

/// An RFC 5424 timestamp: RFC 3339 date-time with optional fractional
/// seconds and either `Z` or a numeric offset.
pub(crate) fn date_rfc5424(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    let date_len = iso_date_len(bytes, at)?;
    let mut i = at + date_len;
    if bytes.get(i) != Some(&b'T') {
        return None;
    }
    i += 1;
    i += clock(bytes, i, 23)?;

    if bytes.get(i) == Some(&b'.') {
        let frac = digit_run(bytes, i + 1);
        if frac == 0 {
            return None;
        }
        i += 1 + frac;
    }

    match bytes.get(i) {
        Some(&b'Z') => i += 1,
        Some(&b'+' | &b'-') => {
            i += 1;
            i += two_digits_max(bytes, i, 23)?;
            if bytes.get(i) != Some(&b':') {
                return None;
            }
            i += 1;
            i += two_digits_max(bytes, i, 59)?;
        }
        _ => return None,
    }
    Some(MotifMatch::span(input, at, i - at, capture))
}

fn iso_date_len(bytes: &[u8], at: usize) -> Option<usize> {
    if digit_run(bytes, at) < 4 {
        return None;
    }
    let mut i = at + 4;
    for _ in 0..2 {
        if bytes.get(i) != Some(&b'-') {
            return None;
        }
        i += 1;
        if digit_run(bytes, i) < 2 {
            return None;
        }
        i += 2;
    }
    Some(i - at)
}

/// An ISO date: `YYYY-MM-DD`.
pub(crate) fn date_iso(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let len = iso_date_len(input.as_bytes(), at)?;
    Some(MotifMatch::span(input, at, len, capture))
}

/// A 24-hour clock time: `hh:mm:ss` with hours 00-23.
pub(crate) fn time_24hr(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let len = clock(input.as_bytes(), at, 23)?;
    Some(MotifMatch::span(input, at, len, capture))
}

/// A 12-hour clock time: `hh:mm:ss` with hours 01-12, optionally followed
/// by an AM/PM marker.
pub(crate) fn time_12hr(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    let len = clock(bytes, at, 12)?;
    if bytes[at] == b'0' && bytes[at + 1] == b'0' {
        return None;
    }
    let mut i = at + len;
    if bytes.get(i) == Some(&b' ') {
        let marker = bytes.get(i + 1..i + 3);
        if let Some(m) = marker {
            if m.eq_ignore_ascii_case(b"AM") || m.eq_ignore_ascii_case(b"PM") {
                i += 3;
            }
        }
    }
    Some(MotifMatch::span(input, at, i - at, capture))
}
