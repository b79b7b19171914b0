//! Logsieve - Log normalization through a compiled parse DAG
//!
//! This crate re-exports all layers of the Logsieve system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: logsieve_engine     — Parse DAG, motifs, builder, optimizer,
//!                                matcher, statistics, DOT output
//! Layer 0: logsieve_foundation — Errors, diagnostics, output records
//! ```

pub use logsieve_engine as engine;
pub use logsieve_foundation as foundation;
