//! Cache-parity comparison for Connect-4 search logs.
//!
//! The engine writes one search log per run: records between a
//! `***START***` and a `***FINISH***` marker, one `key: value` pair per
//! line. This crate parses the logs of a cache-enabled ("docache") and a
//! cache-disabled ("nocache") run, merges the two record streams in
//! lock-step, and reports the first point of semantic divergence.

pub mod compare;
pub mod parse;
pub mod record;
pub mod report;
