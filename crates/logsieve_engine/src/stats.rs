//! Read-only PDAG statistics.
//!
//! A single visited-guarded traversal per root counts nodes, terminals and
//! edges, measures the longest path, and builds per-motif and
//! edges-per-node histograms. The sectioned report covers every named
//! component and then the main PDAG.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::context::Context;
use crate::graph::NodeId;

/// Statistics of one PDAG component.
#[derive(Debug, Default, Serialize)]
pub struct PdagStats {
    /// Reachable nodes.
    pub nodes: usize,
    /// Reachable accepting nodes.
    pub terminal_nodes: usize,
    /// Total edges.
    pub edges: usize,
    /// Length in nodes of the longest path from the root.
    pub longest_path: usize,
    /// Edge count per motif name.
    pub motif_counts: BTreeMap<&'static str, usize>,
    /// Number of nodes per outgoing-edge count.
    pub edges_per_node: BTreeMap<usize, usize>,
}

/// Statistics of a whole context: every component plus the main PDAG.
#[derive(Debug, Serialize)]
pub struct FullStats {
    /// Per-component statistics, in definition order.
    pub components: Vec<(String, PdagStats)>,
    /// Statistics of the main PDAG.
    pub main: PdagStats,
}

impl Context {
    /// Gathers statistics for the subgraph rooted at `root`.
    #[must_use]
    pub fn stats(&self, root: NodeId) -> PdagStats {
        let mut stats = PdagStats::default();
        let mut visited = HashSet::new();
        stats.longest_path = self.stats_rec(root, &mut stats, &mut visited);
        stats
    }

    /// Gathers statistics for every named component and the main PDAG.
    #[must_use]
    pub fn full_stats(&self) -> FullStats {
        FullStats {
            components: self
                .components()
                .map(|(id, c)| (c.name.clone(), self.stats(self.component_root(id))))
                .collect(),
            main: self.stats(self.root()),
        }
    }

    fn stats_rec(
        &self,
        id: NodeId,
        stats: &mut PdagStats,
        visited: &mut HashSet<NodeId>,
    ) -> usize {
        if !visited.insert(id) {
            return 0;
        }
        let node = self.node(id);
        stats.nodes += 1;
        if node.terminal {
            stats.terminal_nodes += 1;
        }
        stats.edges += node.parsers.len();
        *stats.edges_per_node.entry(node.parsers.len()).or_insert(0) += 1;

        let mut max_path = 0;
        for prs in &node.parsers {
            *stats.motif_counts.entry(prs.motif.name()).or_insert(0) += 1;
            let path = self.stats_rec(prs.node, stats, visited);
            if path > max_path {
                max_path = path;
            }
        }
        max_path + 1
    }
}

impl fmt::Display for PdagStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes.............: {:4}", self.nodes)?;
        writeln!(f, "terminal nodes....: {:4}", self.terminal_nodes)?;
        writeln!(f, "parsers entries...: {:4}", self.edges)?;
        writeln!(f, "longest path......: {:4}", self.longest_path)?;

        writeln!(f, "Parser Type Counts:")?;
        for (name, count) in &self.motif_counts {
            writeln!(f, "\t{name:>20}: {count}")?;
        }

        writeln!(f, "Parsers per Node:")?;
        let max = self.edges_per_node.keys().max().copied().unwrap_or(0);
        writeln!(f, "\tmax:\t{max:4}")?;
        for (edges, count) in &self.edges_per_node {
            writeln!(f, "\t{edges}:\t{count:4}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FullStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User-Defined Types")?;
        writeln!(f, "==================")?;
        writeln!(f, "number types: {}", self.components.len())?;
        for (name, _) in &self.components {
            writeln!(f, "type: {name}")?;
        }
        for (name, stats) in &self.components {
            writeln!(f)?;
            writeln!(f, "type PDAG: {name}")?;
            writeln!(f, "----------")?;
            write!(f, "{stats}")?;
        }
        writeln!(f)?;
        writeln!(f, "Main PDAG")?;
        writeln!(f, "=========")?;
        write!(f, "{}", self.main)
    }
}
