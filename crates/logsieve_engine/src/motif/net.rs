//! Network address motifs: ipv4, ipv6, mac48.

use super::{MotifMatch, digit_run};

/// A dotted-quad IPv4 address. Each octet is one to three digits with a
/// value of at most 255.
pub(crate) fn ipv4(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    let mut i = at;
    for octet in 0..4 {
        if octet > 0 {
            if i >= bytes.len() || bytes[i] != b'.' {
                return None;
            }
            i += 1;
        }
        let len = digit_run(bytes, i);
        if len == 0 || len > 3 {
            return None;
        }
        let value: u32 = input[i..i + len].parse().ok()?;
        if value > 255 {
            return None;
        }
        i += len;
    }
    Some(MotifMatch::span(input, at, i - at, capture))
}

/// An IPv6 address: up to eight 16-bit hex groups separated by colons, with
/// at most one `::` elision.
pub(crate) fn ipv6(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    let mut i = at;
    while i < bytes.len() && (bytes[i].is_ascii_hexdigit() || bytes[i] == b':') {
        i += 1;
    }
    if i == at {
        return None;
    }
    let span = &input[at..i];
    if !span.contains(':') {
        return None;
    }

    let elisions = span.matches("::").count();
    if elisions > 1 || span.contains(":::") {
        return None;
    }
    // A single leading or trailing colon is only valid as part of "::".
    if (span.starts_with(':') && !span.starts_with("::"))
        || (span.ends_with(':') && !span.ends_with("::"))
    {
        return None;
    }

    let groups: Vec<&str> = span.split(':').filter(|g| !g.is_empty()).collect();
    let max_groups = if elisions == 1 { 7 } else { 8 };
    if groups.len() > max_groups || (elisions == 0 && groups.len() != 8) {
        return None;
    }
    if groups.iter().any(|g| g.len() > 4) {
        return None;
    }

    Some(MotifMatch::span(input, at, i - at, capture))
}

/// A 48-bit MAC address: six two-digit hex groups joined by a consistent
/// `:` or `-` separator.
pub(crate) fn mac48(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    let sep = *bytes.get(at + 2)?;
    if sep != b':' && sep != b'-' {
        return None;
    }
    let mut i = at;
    for group in 0..6 {
        if group > 0 {
            if i >= bytes.len() || bytes[i] != sep {
                return None;
            }
            i += 1;
        }
        if i + 2 > bytes.len()
            || !bytes[i].is_ascii_hexdigit()
            || !bytes[i + 1].is_ascii_hexdigit()
        {
            return None;
        }
        i += 2;
    }
    Some(MotifMatch::span(input, at, i - at, capture))
}
