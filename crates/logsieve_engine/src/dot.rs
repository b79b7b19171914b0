//! DOT graph output.
//!
//! Produces a GraphViz control file for a PDAG: one DOT node per graph
//! node, one labeled DOT node per edge between its endpoints, bold styling
//! for accepting nodes, and dotted sub-edges from repeat edges into their
//! `parser` and `while` subgraphs. Mostly useful to understand complex
//! rulebases.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::context::Context;
use crate::graph::NodeId;
use crate::motif::MotifData;

impl Context {
    /// Renders the subgraph rooted at `root` as a DOT digraph.
    #[must_use]
    pub fn dot(&self, root: NodeId) -> String {
        let mut out = String::from("digraph pdag {\n");
        let mut visited = HashSet::new();
        self.dot_rec(root, &mut out, &mut visited);
        out.push_str("}\n");
        out
    }

    fn dot_rec(&self, id: NodeId, out: &mut String, visited: &mut HashSet<NodeId>) {
        if !visited.insert(id) {
            return;
        }
        let node = self.node(id);
        let style = if node.terminal { " style=\"bold\"" } else { "" };
        let _ = writeln!(out, "{id} [ label=\"\"{style}]");

        for (i, prs) in node.parsers.iter().enumerate() {
            let edge = format!("{id}e{i}");
            let _ = writeln!(out, "{id} -> {edge}");
            let _ = writeln!(out, "{edge} -> {}", prs.node);

            let mut label = prs.motif.name().to_string();
            label.push(':');
            if let MotifData::Literal(text) = &prs.data {
                label.extend(text.chars().filter(|c| *c != '\\' && *c != '"'));
            }
            let _ = writeln!(out, "{edge} [label=\"{label}\" style=\"normal\"]");

            if let MotifData::Repeat { parser, while_cond } = prs.data {
                let _ = writeln!(out, "{edge} -> {parser}[label=\"parser\" style=\"dotted\"]");
                self.dot_rec(parser, out, visited);
                let _ = writeln!(out, "{edge} -> {while_cond}[label=\"while\" style=\"dotted\"]");
                self.dot_rec(while_cond, out, visited);
            }

            self.dot_rec(prs.node, out, visited);
        }
    }
}
