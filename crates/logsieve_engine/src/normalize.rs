//! The matcher: recursive descent over the PDAG with backtracking.
//!
//! Edges are tried in stored (priority) order; the first path that reaches
//! an accepting node wins. This is priority-ordered backtracking, not
//! longest-match: a lower-priority rule that would consume more input never
//! displaces an earlier success. The deepest offset reached by any attempt
//! is tracked for diagnostics only.

use serde_json::Value;

use logsieve_foundation::{EVENT_TAGS_KEY, Record, add_unparsed, store_capture};

use crate::context::Context;
use crate::graph::{NodeId, ParserInstance};
use crate::motif::{self, MotifData};

/// Whether a normalization produced a structured event or fell through.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    /// Some rule matched; the record carries the extracted fields.
    Structured,
    /// No rule matched; the record carries `originalmsg` and
    /// `unparsed-data`.
    Unparsed,
}

/// The result of normalizing one input line. A record is produced either
/// way; `outcome` distinguishes the two shapes.
#[derive(Debug)]
pub struct Normalized {
    /// The output record.
    pub record: Record,
    /// Structured or unparsed.
    pub outcome: Outcome,
}

impl Normalized {
    /// Returns true if some rule matched.
    #[must_use]
    pub fn is_structured(&self) -> bool {
        self.outcome == Outcome::Structured
    }
}

impl Context {
    /// Normalizes one input line against the compiled rulebase.
    #[must_use]
    pub fn normalize(&self, input: &str) -> Normalized {
        let mut record = Record::new();
        let mut deepest = 0;

        let matched = self.match_at(self.root(), input, 0, false, &mut deepest, &mut record);

        match matched {
            Some((end_node, _)) => {
                if let Some(tags) = &self.node(end_node).tags {
                    record.insert(
                        EVENT_TAGS_KEY.to_string(),
                        Value::Array(tags.iter().cloned().map(Value::String).collect()),
                    );
                    if let Some(annotator) = self.annotator() {
                        annotator.annotate(&mut record, tags);
                    }
                }
                Normalized {
                    record,
                    outcome: Outcome::Structured,
                }
            }
            None => {
                tracing::debug!(target: "logsieve", deepest, "no rule matched");
                add_unparsed(&mut record, input, deepest);
                Normalized {
                    record,
                    outcome: Outcome::Unparsed,
                }
            }
        }
    }

    /// Recursive matching step. Returns the accepting node and the offset
    /// where acceptance happened, or `None` with `deepest` updated to the
    /// furthest offset any edge attempt reached.
    pub(crate) fn match_at(
        &self,
        node: NodeId,
        input: &str,
        offset: usize,
        allow_partial: bool,
        deepest: &mut usize,
        record: &mut Record,
    ) -> Option<(NodeId, usize)> {
        for prs in &self.node(node).parsers {
            if self.diag.wants_debug() {
                self.diag.debug(&format!(
                    "{offset}: trying '{}' parser for field '{}'",
                    prs.motif.name(),
                    prs.name.as_deref().unwrap_or("-"),
                ));
            }
            let Some((consumed, value)) = self.try_edge(prs, input, offset, deepest) else {
                continue;
            };
            let next_offset = offset + consumed;
            if next_offset > *deepest {
                *deepest = next_offset;
            }

            if let Some(accepted) =
                self.match_at(prs.node, input, next_offset, allow_partial, deepest, record)
            {
                if let Some(value) = value {
                    store_capture(record, prs.name.as_deref(), value);
                }
                return Some(accepted);
            }
            // Backtrack: the captured value is dropped with `value`.
        }

        if self.node(node).terminal && (offset == input.len() || allow_partial) {
            return Some((node, offset));
        }
        None
    }

    /// Runs one edge at `offset`. Self-contained motifs dispatch into the
    /// registry; custom types and repeats recurse through the graph.
    fn try_edge(
        &self,
        prs: &ParserInstance,
        input: &str,
        offset: usize,
        deepest: &mut usize,
    ) -> Option<(usize, Option<Value>)> {
        let capture = prs.name.is_some();
        match &prs.data {
            MotifData::Custom(component) => {
                let root = self.component_root(*component);
                let mut sub_record = Record::new();
                let (_, end) =
                    self.match_at(root, input, offset, true, deepest, &mut sub_record)?;
                let value = capture.then(|| Value::Object(sub_record));
                Some((end - offset, value))
            }
            MotifData::Repeat { parser, while_cond } => {
                self.match_repeat(*parser, *while_cond, input, offset, deepest, capture)
            }
            data => {
                let m = motif::run_motif(prs.motif, data, input, offset, capture)?;
                Some((m.consumed, m.value))
            }
        }
    }

    /// Matches a repeat edge: the `parser` subgraph once per iteration,
    /// the `while` subgraph between iterations. At least one iteration
    /// must succeed; iteration records are collected into an array.
    fn match_repeat(
        &self,
        parser: NodeId,
        while_cond: NodeId,
        input: &str,
        offset: usize,
        deepest: &mut usize,
        capture: bool,
    ) -> Option<(usize, Option<Value>)> {
        let mut items = Vec::new();
        let mut cursor = offset;

        loop {
            let iteration_start = cursor;
            let mut item = Record::new();
            let (_, end) = self.match_at(parser, input, cursor, true, deepest, &mut item)?;
            items.push(Value::Object(item));
            cursor = end;

            let mut separator_scrap = Record::new();
            match self.match_at(while_cond, input, cursor, true, deepest, &mut separator_scrap)
            {
                Some((_, sep_end)) => {
                    cursor = sep_end;
                    // Guard against zero-width iterations.
                    if cursor == iteration_start {
                        break;
                    }
                }
                None => break,
            }
        }

        Some((cursor - offset, capture.then(|| Value::Array(items))))
    }
}
