//! Database query implementations.

pub mod kv;
pub mod snapshots;
