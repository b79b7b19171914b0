//! The optimizer: freezes a fully loaded PDAG for matching.
//!
//! Two rewrites run over every reachable node, components first, then the
//! main root:
//!
//! 1. Edges are stable-sorted by ascending combined priority, so the
//!    matcher can simply try them in stored order.
//! 2. Chains of single-successor literal edges are compacted into one
//!    literal. Compaction is conservative: it never crosses an edge that
//!    captures a value, nor a node that is terminal or tagged, so match
//!    outcomes are unchanged.

use std::collections::HashSet;

use crate::context::Context;
use crate::graph::NodeId;
use crate::motif::{MotifData, MotifId};

impl Context {
    /// Optimizes the whole PDAG, including all named components.
    pub fn optimize(&mut self) {
        let mut visited = HashSet::new();
        let roots: Vec<NodeId> = self
            .components()
            .map(|(_, c)| c.root)
            .chain(std::iter::once(self.root()))
            .collect();
        for root in roots {
            tracing::debug!(target: "logsieve", %root, "optimizing component");
            self.optimize_node(root, &mut visited);
        }
    }

    fn optimize_node(&mut self, id: NodeId, visited: &mut HashSet<NodeId>) {
        if !visited.insert(id) {
            return;
        }

        self.node_mut(id)
            .parsers
            .sort_by_key(|p| p.prio);

        // Repeat subgraphs hang off edge payloads, not successors; walk
        // them too so their own edges get sorted and compacted.
        let mut subgraphs = Vec::new();
        for edge in 0..self.node(id).parsers.len() {
            self.compact_literal_chain(id, edge);
            let prs = &self.node(id).parsers[edge];
            if let MotifData::Repeat { parser, while_cond } = prs.data {
                subgraphs.push(parser);
                subgraphs.push(while_cond);
            }
            subgraphs.push(prs.node);
        }
        for sub in subgraphs {
            self.optimize_node(sub, visited);
        }
    }

    /// While `edge` is a non-capturing literal whose successor is a plain
    /// single-edge node leading through another non-capturing literal,
    /// folds the two literals into one and adopts the grand-successor.
    fn compact_literal_chain(&mut self, node: NodeId, edge: usize) {
        loop {
            let prs = &self.node(node).parsers[edge];
            if prs.motif != MotifId::Literal || prs.name.is_some() {
                return;
            }
            let successor = prs.node;
            let succ_node = self.node(successor);
            if succ_node.terminal || succ_node.tags.is_some() || succ_node.parsers.len() != 1 {
                return;
            }
            let child = &succ_node.parsers[0];
            if child.motif != MotifId::Literal || child.name.is_some() {
                return;
            }
            let MotifData::Literal(child_text) = &child.data else {
                return;
            };
            let (child_text, grand_successor) = (child_text.clone(), child.node);

            tracing::debug!(
                target: "logsieve",
                %node, %successor, "literal path compaction"
            );
            let prs = &mut self.node_mut(node).parsers[edge];
            if let MotifData::Literal(text) = &mut prs.data {
                text.push_str(&child_text);
            }
            prs.node = grand_successor;
            // The intermediate node stays in the arena; other parents may
            // still route through it, otherwise it is simply orphaned.
        }
    }
}
