//! The motif registry: the closed catalog of primitive matchers.
//!
//! Each motif has a name, an intrinsic priority (0 = most specific, 255 =
//! catch-all), an optional constructor that turns rulebase parameters into a
//! [`MotifData`] payload, and a match function. The registry table drives
//! name lookup; dispatch is by the [`MotifId`] tag.
//!
//! All scanners stop at ASCII bytes or consume the remainder of the input,
//! so byte offsets handed between motifs and the matcher always fall on
//! UTF-8 character boundaries.

pub(crate) mod datetime;
pub(crate) mod net;
pub(crate) mod numbers;
pub(crate) mod text;

use serde_json::Value;

use logsieve_foundation::{Error, Result};

use crate::context::Context;
use crate::graph::{ComponentId, NodeId};

/// Identifies a motif in the registry, plus the custom-type sentinel.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MotifId {
    /// Exact text.
    Literal,
    /// Repeated subgraph with a separator subgraph.
    Repeat,
    /// RFC 3164 timestamp (`Oct 11 22:14:15`).
    DateRfc3164,
    /// RFC 5424 timestamp (`2015-10-11T22:14:15.003Z`).
    DateRfc5424,
    /// Decimal integer.
    Number,
    /// Decimal floating point number.
    Float,
    /// `0x`-prefixed hexadecimal number.
    HexNumber,
    /// Run of spaces and tabs.
    Whitespace,
    /// Dotted-quad IPv4 address.
    Ipv4,
    /// IPv6 address.
    Ipv6,
    /// Characters up to the next space.
    Word,
    /// Run of ASCII letters.
    Alpha,
    /// Everything up to end of input.
    Rest,
    /// Optionally quoted string.
    OpQuotedString,
    /// Double-quoted string.
    QuotedString,
    /// ISO date (`2015-10-11`).
    DateIso,
    /// 24-hour clock time.
    Time24hr,
    /// 12-hour clock time with optional AM/PM.
    Time12hr,
    /// `h:mm:ss` duration.
    Duration,
    /// 48-bit MAC address.
    Mac48,
    /// Characters up to (not including) a goal character; at least one.
    CharTo,
    /// Characters up to a goal character or end of input; may be empty.
    CharSep,
    /// Characters up to (not including) a goal string; at least one.
    StringTo,
    /// Invocation of a named component (`@name`). Not in the registry
    /// table; resolved by the builder.
    Custom,
}

/// One row of the registry table.
struct MotifInfo {
    name: &'static str,
    id: MotifId,
    prio: u8,
}

/// Registry table. Priorities follow the rule of thumb: multi-character
/// literals and address parsers low (specific), character-class matchers
/// higher, `rest` reserved for last resort.
static MOTIF_TABLE: &[MotifInfo] = &[
    MotifInfo { name: "literal", id: MotifId::Literal, prio: 4 },
    MotifInfo { name: "repeat", id: MotifId::Repeat, prio: 4 },
    MotifInfo { name: "date-rfc3164", id: MotifId::DateRfc3164, prio: 8 },
    MotifInfo { name: "date-rfc5424", id: MotifId::DateRfc5424, prio: 8 },
    MotifInfo { name: "number", id: MotifId::Number, prio: 16 },
    MotifInfo { name: "float", id: MotifId::Float, prio: 16 },
    MotifInfo { name: "hexnumber", id: MotifId::HexNumber, prio: 16 },
    MotifInfo { name: "whitespace", id: MotifId::Whitespace, prio: 4 },
    MotifInfo { name: "ipv4", id: MotifId::Ipv4, prio: 4 },
    MotifInfo { name: "ipv6", id: MotifId::Ipv6, prio: 4 },
    MotifInfo { name: "word", id: MotifId::Word, prio: 32 },
    MotifInfo { name: "alpha", id: MotifId::Alpha, prio: 32 },
    MotifInfo { name: "rest", id: MotifId::Rest, prio: 255 },
    MotifInfo { name: "op-quoted-string", id: MotifId::OpQuotedString, prio: 64 },
    MotifInfo { name: "quoted-string", id: MotifId::QuotedString, prio: 64 },
    MotifInfo { name: "date-iso", id: MotifId::DateIso, prio: 8 },
    MotifInfo { name: "time-24hr", id: MotifId::Time24hr, prio: 8 },
    MotifInfo { name: "time-12hr", id: MotifId::Time12hr, prio: 8 },
    MotifInfo { name: "duration", id: MotifId::Duration, prio: 16 },
    MotifInfo { name: "mac48", id: MotifId::Mac48, prio: 16 },
    MotifInfo { name: "char-to", id: MotifId::CharTo, prio: 32 },
    MotifInfo { name: "char-sep", id: MotifId::CharSep, prio: 32 },
    MotifInfo { name: "string-to", id: MotifId::StringTo, prio: 32 },
];

/// Intrinsic priority assigned to custom-type invocations: hopefully
/// relatively specific, between addresses and character classes.
pub const CUSTOM_TYPE_PRIO: u8 = 16;

impl MotifId {
    /// Resolves a registry name to a motif id.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        MOTIF_TABLE
            .iter()
            .find(|info| info.name == name)
            .map(|info| info.id)
    }

    /// Returns the registry name of this motif.
    #[must_use]
    pub fn name(self) -> &'static str {
        if self == MotifId::Custom {
            return "USER-DEFINED";
        }
        MOTIF_TABLE
            .iter()
            .find(|info| info.id == self)
            .map_or("USER-DEFINED", |info| info.name)
    }

    /// Returns the intrinsic priority of this motif.
    #[must_use]
    pub fn intrinsic_priority(self) -> u8 {
        if self == MotifId::Custom {
            return CUSTOM_TYPE_PRIO;
        }
        MOTIF_TABLE
            .iter()
            .find(|info| info.id == self)
            .map_or(CUSTOM_TYPE_PRIO, |info| info.prio)
    }
}

/// Motif-specific payload, produced at build time.
#[derive(Debug)]
pub enum MotifData {
    /// Text of a literal edge. Grows during literal path compaction.
    Literal(String),
    /// Element and separator subgraphs of a repeat edge.
    Repeat {
        /// Matches one element per iteration.
        parser: NodeId,
        /// Matches the separator between iterations.
        while_cond: NodeId,
    },
    /// Goal character of a char-to edge.
    CharTo(char),
    /// Goal character of a char-sep edge.
    CharSep(char),
    /// Goal string of a string-to edge.
    StringTo(String),
    /// Component invoked by a custom-type edge.
    Custom(ComponentId),
    /// Motifs that take no parameters.
    Stateless,
}

/// A successful motif match: how much was consumed and, if requested, the
/// extracted value.
#[derive(Debug)]
pub struct MotifMatch {
    /// Number of input bytes consumed.
    pub consumed: usize,
    /// Captured value; only produced when the caller asked for it.
    pub value: Option<Value>,
}

impl MotifMatch {
    /// A match of `consumed` bytes capturing the matched span when wanted.
    pub(crate) fn span(input: &str, at: usize, consumed: usize, capture: bool) -> Self {
        Self {
            consumed,
            value: capture.then(|| Value::String(input[at..at + consumed].to_string())),
        }
    }
}

/// Runs a motif constructor on the reduced parameter object (everything the
/// rulebase provided except `type`, `name` and `priority`).
///
/// `repeat` builds its two subgraphs through the builder, which is why the
/// context is mutable here.
///
/// # Errors
/// Returns a BadConfig-class error when required parameters are missing or
/// malformed.
pub(crate) fn construct(
    ctx: &mut Context,
    id: MotifId,
    params: &mut serde_json::Map<String, Value>,
) -> Result<MotifData> {
    match id {
        MotifId::Literal => {
            let text = params
                .get("text")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::bad_motif_config("literal", "missing 'text' parameter"))?;
            Ok(MotifData::Literal(text.to_string()))
        }
        MotifId::CharTo => Ok(MotifData::CharTo(goal_char(params, "char-to")?)),
        MotifId::CharSep => Ok(MotifData::CharSep(goal_char(params, "char-sep")?)),
        MotifId::StringTo => {
            let goal = params
                .get("extradata")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    Error::bad_motif_config("string-to", "missing or empty 'extradata' parameter")
                })?;
            Ok(MotifData::StringTo(goal.to_string()))
        }
        MotifId::Repeat => {
            let parser_cnf = params
                .remove("parser")
                .ok_or_else(|| Error::bad_motif_config("repeat", "missing 'parser' parameter"))?;
            let while_cnf = params
                .remove("while")
                .ok_or_else(|| Error::bad_motif_config("repeat", "missing 'while' parameter"))?;
            let parser = build_subgraph(ctx, parser_cnf)?;
            let while_cond = build_subgraph(ctx, while_cnf)?;
            Ok(MotifData::Repeat { parser, while_cond })
        }
        MotifId::Custom => Err(Error::internal(
            "custom-type edges are resolved by the builder, not constructed",
        )),
        _ => Ok(MotifData::Stateless),
    }
}

/// Builds an anonymous subgraph for a repeat parameter and marks its
/// frontier terminal so partial matches can accept inside it.
fn build_subgraph(ctx: &mut Context, cnf: Value) -> Result<NodeId> {
    let root = ctx.new_node();
    let mut cursor = root;
    ctx.add_parser(&mut cursor, cnf)?;
    ctx.node_mut(cursor).terminal = true;
    Ok(root)
}

fn goal_char(params: &serde_json::Map<String, Value>, motif: &'static str) -> Result<char> {
    let text = params
        .get("extradata")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::bad_motif_config(motif, "missing 'extradata' parameter"))?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::bad_motif_config(
            motif,
            "'extradata' must be exactly one character",
        )),
    }
}

/// Dispatches a motif match attempt.
///
/// `Custom` and `Repeat` edges recurse through the graph and are handled by
/// the matcher itself; this function only runs self-contained scanners.
pub(crate) fn run_motif(
    id: MotifId,
    data: &MotifData,
    input: &str,
    at: usize,
    capture: bool,
) -> Option<MotifMatch> {
    match (id, data) {
        (MotifId::Literal, MotifData::Literal(text)) => text::literal(text, input, at, capture),
        (MotifId::CharTo, MotifData::CharTo(goal)) => text::char_to(*goal, input, at, capture),
        (MotifId::CharSep, MotifData::CharSep(goal)) => text::char_sep(*goal, input, at, capture),
        (MotifId::StringTo, MotifData::StringTo(goal)) => {
            text::string_to(goal, input, at, capture)
        }
        (MotifId::Word, _) => text::word(input, at, capture),
        (MotifId::Alpha, _) => text::alpha(input, at, capture),
        (MotifId::Whitespace, _) => text::whitespace(input, at, capture),
        (MotifId::Rest, _) => text::rest(input, at, capture),
        (MotifId::QuotedString, _) => text::quoted_string(input, at, capture),
        (MotifId::OpQuotedString, _) => text::op_quoted_string(input, at, capture),
        (MotifId::Number, _) => numbers::number(input, at, capture),
        (MotifId::Float, _) => numbers::float(input, at, capture),
        (MotifId::HexNumber, _) => numbers::hexnumber(input, at, capture),
        (MotifId::Duration, _) => numbers::duration(input, at, capture),
        (MotifId::Ipv4, _) => net::ipv4(input, at, capture),
        (MotifId::Ipv6, _) => net::ipv6(input, at, capture),
        (MotifId::Mac48, _) => net::mac48(input, at, capture),
        (MotifId::DateRfc3164, _) => datetime::date_rfc3164(input, at, capture),
        (MotifId::DateRfc5424, _) => datetime::date_rfc5424(input, at, capture),
        (MotifId::DateIso, _) => datetime::date_iso(input, at, capture),
        (MotifId::Time24hr, _) => datetime::time_24hr(input, at, capture),
        (MotifId::Time12hr, _) => datetime::time_12hr(input, at, capture),
        // Graph-recursing motifs never reach this dispatcher.
        _ => None,
    }
}

/// Counts consecutive ASCII digits starting at `at`.
pub(crate) fn digit_run(bytes: &[u8], at: usize) -> usize {
    let mut i = at;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i - at
}
