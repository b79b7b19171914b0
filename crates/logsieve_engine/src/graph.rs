//! The parse DAG: nodes, edges, and named components.
//!
//! Nodes are arena-allocated inside the [`Context`](crate::Context) and
//! addressed by [`NodeId`]. A node may be reached by several predecessors
//! (shared successors created by alternatives), which is why edges store an
//! id rather than owning their successor. Dropping the context releases the
//! whole graph at once.

use std::fmt;

use serde_json::Value;

use crate::motif::{MotifData, MotifId};

/// Identifier of a node in the context's arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the raw index of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Identifier of a named component within a context.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ComponentId(pub(crate) u32);

impl ComponentId {
    /// Returns the raw index of this component.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A reusable named subgraph, invoked by `@name` references.
#[derive(Debug)]
pub struct Component {
    /// Component name, including the leading `@`.
    pub name: String,
    /// Root node of the component's subgraph.
    pub root: NodeId,
}

/// One configured attempt at consuming input: an edge of the parse DAG.
#[derive(Debug)]
pub struct ParserInstance {
    /// Which motif this edge runs.
    pub motif: MotifId,
    /// Capture name; `None` means the motif's value is discarded.
    pub name: Option<String>,
    /// Combined priority: `(user_priority << 8) | intrinsic`. Smaller is
    /// tried first.
    pub prio: u32,
    /// The original configuration object, kept as the merge fingerprint.
    pub conf: Value,
    /// Motif-specific payload produced by the constructor (or the component
    /// handle for custom-type edges).
    pub data: MotifData,
    /// Successor node reached when this edge matches.
    pub node: NodeId,
}

/// A state of the compiled automaton.
#[derive(Debug, Default)]
pub struct PdagNode {
    /// Outgoing edges, in priority order after optimization.
    pub parsers: Vec<ParserInstance>,
    /// Accepting state: matches if input is exhausted or the caller allows
    /// a partial match.
    pub terminal: bool,
    /// Tags attached to events accepted at this node.
    pub tags: Option<Vec<String>>,
}

impl PdagNode {
    /// Returns true if this node has no outgoing edges.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Merges `tags` into this node's tag set, keeping existing entries.
    ///
    /// Rulebase semantics treat tag assignment as additive, so two rules
    /// terminating at the same node contribute the union of their tags.
    pub fn union_tags(&mut self, tags: Vec<String>) {
        let existing = self.tags.get_or_insert_with(Vec::new);
        for tag in tags {
            if !existing.contains(&tag) {
                existing.push(tag);
            }
        }
    }
}
