//! Services module
//!
//! The processing pipeline, one service per stage:
//! - source: file-backed record source (metadata/locator pairing)
//! - parser: entry classification and series-key derivation
//! - grouper: run-length grouping of consecutive same-series episodes

pub mod grouper;
pub mod parser;
pub mod source;

// Re-export commonly used items
pub use grouper::{group_records, RunGrouper};
pub use parser::EntryParser;
pub use source::{FileRecordSource, SourceError};
