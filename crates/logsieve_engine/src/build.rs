//! The builder: turns parser configurations into PDAG structure.
//!
//! A configuration is either a single object, an array (sequence
//! composition), or an object of type `alternative` whose `parser` array
//! lists branches that converge on one shared successor. Identical edges
//! (same motif, same configuration) are merged so rules share prefixes.

use serde_json::{Map, Value};

use logsieve_foundation::{Error, Result};

use crate::context::Context;
use crate::graph::{NodeId, ParserInstance};
use crate::motif::{self, MotifData, MotifId};

/// User priority assigned when the rulebase author did not specify one.
/// High enough that any explicit priority wins.
pub const DFLT_USER_PRIO: u32 = 30_000;

/// Packs a user priority and an intrinsic motif priority into a combined
/// priority. The user priority occupies the upper bits, so it dominates;
/// intrinsic priorities break ties among equally prioritized edges.
#[must_use]
pub fn combined_priority(user: u32, intrinsic: u8) -> u32 {
    (user << 8) | u32::from(intrinsic)
}

impl Context {
    /// Adds a parser configuration at `*at`, advancing `*at` to the
    /// frontier node reached after the configuration.
    ///
    /// # Errors
    /// Any BadConfig-class error aborts the add; the error is also reported
    /// through the context's error handler.
    pub fn add_parser(&mut self, at: &mut NodeId, cnf: Value) -> Result<()> {
        match cnf {
            Value::Object(obj) => {
                if obj.get("type").and_then(Value::as_str) == Some("alternative") {
                    self.add_alternative(at, obj)
                } else {
                    let mut next = None;
                    self.add_parser_instance(obj, *at, &mut next)?;
                    if let Some(n) = next {
                        *at = n;
                    }
                    Ok(())
                }
            }
            Value::Array(seq) => {
                for cnf in seq {
                    self.add_parser(at, cnf)?;
                }
                Ok(())
            }
            other => {
                let err = Error::missing_type().with_config(other.to_string());
                self.diag.error(0, &err.to_string());
                Err(err)
            }
        }
    }

    /// Adds a complete rule starting at the main root: the configuration,
    /// terminal marking of the reached frontier, and the rule's tags.
    ///
    /// # Errors
    /// Propagates builder errors; the PDAG keeps any structure added before
    /// the failure, matching loader policies that skip bad rules.
    pub fn add_rule(&mut self, cnf: Value, tags: Option<Vec<String>>) -> Result<()> {
        let mut cursor = self.root();
        self.add_parser(&mut cursor, cnf)?;
        self.mark_terminal(cursor, tags);
        Ok(())
    }

    /// Marks `node` as accepting and merges the rule's tags into it.
    pub fn mark_terminal(&mut self, node: NodeId, tags: Option<Vec<String>>) {
        let n = self.node_mut(node);
        n.terminal = true;
        if let Some(tags) = tags {
            n.union_tags(tags);
        }
    }

    /// Adds an `alternative` configuration: every branch departs from `*at`
    /// and converges on a single shared successor, which becomes the new
    /// frontier.
    fn add_alternative(&mut self, at: &mut NodeId, mut obj: Map<String, Value>) -> Result<()> {
        let branches = match obj.remove("parser") {
            Some(Value::Array(branches)) if !branches.is_empty() => branches,
            _ => {
                let err = Error::bad_alternative("alternative type needs an array of parsers")
                    .with_config(Value::Object(obj).to_string());
                self.diag.error(0, &err.to_string());
                return Err(err);
            }
        };

        let mut shared = None;
        for branch in branches {
            self.add_alternative_branch(branch, *at, &mut shared)?;
        }
        match shared {
            Some(n) => {
                *at = n;
                Ok(())
            }
            None => Err(Error::internal("alternative produced no successor")),
        }
    }

    /// Adds one branch of an alternative from `at`. A sequence branch runs
    /// its prefix with private successors; only its last element converges
    /// on the shared slot.
    fn add_alternative_branch(
        &mut self,
        branch: Value,
        at: NodeId,
        shared: &mut Option<NodeId>,
    ) -> Result<()> {
        match branch {
            Value::Array(mut seq) => {
                let Some(last) = seq.pop() else {
                    let err = Error::bad_alternative("empty branch in alternative");
                    self.diag.error(0, &err.to_string());
                    return Err(err);
                };
                let mut cursor = at;
                for cnf in seq {
                    self.add_parser(&mut cursor, cnf)?;
                }
                self.add_alternative_branch(last, cursor, shared)
            }
            Value::Object(mut obj) => {
                if obj.get("type").and_then(Value::as_str) == Some("alternative") {
                    // A nested alternative's branches converge on the same
                    // shared successor as ours.
                    match obj.remove("parser") {
                        Some(Value::Array(branches)) if !branches.is_empty() => {
                            for nested in branches {
                                self.add_alternative_branch(nested, at, shared)?;
                            }
                            Ok(())
                        }
                        _ => {
                            let err = Error::bad_alternative(
                                "alternative type needs an array of parsers",
                            );
                            self.diag.error(0, &err.to_string());
                            Err(err)
                        }
                    }
                } else {
                    self.add_parser_instance(obj, at, shared)
                }
            }
            other => {
                let err = Error::missing_type().with_config(other.to_string());
                self.diag.error(0, &err.to_string());
                Err(err)
            }
        }
    }

    /// Adds a single parser instance as an edge of `node`, merging with an
    /// existing identical edge when possible. `next` is the shared
    /// successor slot: empty on first use, reused by later alternatives.
    fn add_parser_instance(
        &mut self,
        cnf: Map<String, Value>,
        node: NodeId,
        next: &mut Option<NodeId>,
    ) -> Result<()> {
        let parser = self.new_parser(cnf)?;

        // Identical edge already present: reuse it to walk the path.
        let existing = self
            .node(node)
            .parsers
            .iter()
            .find_map(|p| (p.motif == parser.motif && p.conf == parser.conf).then_some(p.node));
        if let Some(successor) = existing {
            tracing::debug!(target: "logsieve", %node, "merging identical edge");
            *next = Some(successor);
            return Ok(());
        }

        let successor = match *next {
            Some(n) => n,
            None => {
                let n = self.new_node();
                *next = Some(n);
                n
            }
        };
        self.node_mut(node).parsers.push(ParserInstance {
            node: successor,
            ..parser
        });
        Ok(())
    }

    /// Builds a [`ParserInstance`] from a configuration object: resolves
    /// the type (a registry motif or an `@component` reference), extracts
    /// the capture name and priority, and hands the remaining parameters to
    /// the motif constructor. The successor is filled in by the caller.
    fn new_parser(&mut self, mut cnf: Map<String, Value>) -> Result<ParserInstance> {
        let fingerprint = Value::Object(cnf.clone());

        let Some(type_name) = cnf.get("type").and_then(Value::as_str).map(str::to_string)
        else {
            let err = Error::missing_type().with_config(fingerprint.to_string());
            self.diag.error(0, &err.to_string());
            return Err(err);
        };

        let (motif_id, component) = if type_name.starts_with('@') {
            match self.component(&type_name) {
                Some(id) => (MotifId::Custom, Some(id)),
                None => {
                    let err = Error::unknown_component(&type_name);
                    self.diag.error(0, &err.to_string());
                    return Err(err);
                }
            }
        } else {
            match MotifId::from_name(&type_name) {
                Some(id) => (id, None),
                None => {
                    let err = Error::unknown_motif(&type_name);
                    self.diag.error(0, &err.to_string());
                    return Err(err);
                }
            }
        };

        let name = match cnf.get("name").and_then(Value::as_str) {
            None | Some("-") => None,
            Some(n) => Some(n.to_string()),
        };
        let user_prio = cnf
            .get("priority")
            .and_then(Value::as_u64)
            .map_or(DFLT_USER_PRIO, |p| p as u32);

        cnf.remove("type");
        cnf.remove("priority");
        cnf.remove("name");

        let data = match component {
            Some(id) => MotifData::Custom(id),
            None => motif::construct(self, motif_id, &mut cnf).map_err(|err| {
                self.diag.error(0, &err.to_string());
                err
            })?,
        };

        Ok(ParserInstance {
            motif: motif_id,
            name,
            prio: combined_priority(user_prio, motif_id.intrinsic_priority()),
            conf: fingerprint,
            data,
            // Placeholder; add_parser_instance assigns the real successor.
            node: NodeId(u32::MAX),
        })
    }
}
