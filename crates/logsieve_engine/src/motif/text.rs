//! Text motifs: literal, word, alpha, whitespace, rest, quoted strings, and
//! the goal-directed char-to / char-sep / string-to family.

use super::MotifMatch;

/// Matches `text` exactly at the current offset.
pub(crate) fn literal(text: &str, input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    if input[at..].starts_with(text) {
        Some(MotifMatch::span(input, at, text.len(), capture))
    } else {
        None
    }
}

/// One or more characters up to the next space or end of input.
pub(crate) fn word(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    let mut i = at;
    while i < bytes.len() && bytes[i] != b' ' {
        i += 1;
    }
    if i == at {
        return None;
    }
    Some(MotifMatch::span(input, at, i - at, capture))
}

/// One or more ASCII letters.
pub(crate) fn alpha(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    let mut i = at;
    while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        i += 1;
    }
    if i == at {
        return None;
    }
    Some(MotifMatch::span(input, at, i - at, capture))
}

/// One or more spaces or tabs.
pub(crate) fn whitespace(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    let mut i = at;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    if i == at {
        return None;
    }
    Some(MotifMatch::span(input, at, i - at, capture))
}

/// Everything up to end of input. Always matches, even when empty.
pub(crate) fn rest(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    Some(MotifMatch::span(input, at, input.len() - at, capture))
}

/// At least one character up to (not including) `goal`. Fails if `goal`
/// does not occur.
pub(crate) fn char_to(goal: char, input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let idx = input[at..].find(goal)?;
    if idx == 0 {
        return None;
    }
    Some(MotifMatch::span(input, at, idx, capture))
}

/// Zero or more characters up to `goal` or end of input.
pub(crate) fn char_sep(goal: char, input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let idx = input[at..].find(goal).unwrap_or(input.len() - at);
    Some(MotifMatch::span(input, at, idx, capture))
}

/// At least one character up to (not including) the `goal` string. Fails if
/// `goal` does not occur.
pub(crate) fn string_to(goal: &str, input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let idx = input[at..].find(goal)?;
    if idx == 0 {
        return None;
    }
    Some(MotifMatch::span(input, at, idx, capture))
}

/// A double-quoted string. `\"` and `\\` escapes keep the scanner from
/// terminating early; the captured value is the content between the quotes
/// with escapes left intact.
pub(crate) fn quoted_string(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    let bytes = input.as_bytes();
    if at >= bytes.len() || bytes[at] != b'"' {
        return None;
    }
    let mut i = at + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => i += 2,
            b'"' => {
                let consumed = i + 1 - at;
                return Some(MotifMatch {
                    consumed,
                    value: capture.then(|| {
                        serde_json::Value::String(input[at + 1..i].to_string())
                    }),
                });
            }
            _ => i += 1,
        }
    }
    None
}

/// An optionally quoted string: quoted-string semantics when the input
/// starts with a quote, word semantics otherwise. The captured value never
/// includes the quotes.
pub(crate) fn op_quoted_string(input: &str, at: usize, capture: bool) -> Option<MotifMatch> {
    if input.as_bytes().get(at) == Some(&b'"') {
        quoted_string(input, at, capture)
    } else {
        word(input, at, capture)
    }
}
