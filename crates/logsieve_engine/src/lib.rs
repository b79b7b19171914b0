//! The Logsieve engine: the parse DAG and everything that runs it.
//!
//! This crate provides:
//! - [`Context`] - Owner of a compiled rulebase (arena, components, handlers)
//! - Builder methods - `add_parser`, `add_rule`, `define_component`
//! - [`Context::optimize`] - Priority sort and literal path compaction
//! - [`Context::normalize`] - Recursive-descent matching with backtracking
//! - [`PdagStats`] / [`Context::dot`] - Read-only introspection

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Node ids are dense u32 indices; usize -> u32 narrowing is intentional.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_errors_doc)]

pub mod build;
pub mod context;
pub mod dot;
pub mod graph;
pub mod motif;
pub mod normalize;
pub mod optimize;
pub mod stats;

// Re-export primary types at crate root for convenience
pub use build::{DFLT_USER_PRIO, combined_priority};
pub use context::{Annotate, Context};
pub use graph::{Component, ComponentId, NodeId, ParserInstance, PdagNode};
pub use motif::{CUSTOM_TYPE_PRIO, MotifData, MotifId, MotifMatch};
pub use normalize::{Normalized, Outcome};
pub use stats::{FullStats, PdagStats};
