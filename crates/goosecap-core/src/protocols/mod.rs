//! Application protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets, ranges and registry identifiers (source of truth)
//! - `reader`: safe byte access and protocol conventions
//! - `parser`: domain-level decoding (no direct byte indexing) and the
//!   registered decode function
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O.

pub mod goose;
