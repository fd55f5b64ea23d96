//! Metrics extraction from SAT solver benchmark logs.
//!
//! Benchmark campaigns leave behind one directory per instance, each
//! holding a free-text solver log in one of several incompatible output
//! dialects and one of two directory layouts. This crate locates the log,
//! recovers the benchmark's canonical name, extracts satisfiability
//! result, memory and runtime metrics, and aggregates everything into
//! JSON tables that merge across solvers on the benchmark name.
//!
//! The pieces, bottom up:
//! - [`extract`]: pure per-metric extractors over raw log text.
//! - [`resolve`]: benchmark name recovery for the nested layout.
//! - [`locate`]: log discovery across the flat and nested layouts.
//! - [`scan`]: batch aggregation over a results root.
//! - [`table`]: prefixed-column tables and merge-by-name joins.
//! - [`config`]: TOML description of runs to merge.

pub mod config;
pub mod extract;
pub mod locate;
pub mod resolve;
pub mod scan;
pub mod table;
