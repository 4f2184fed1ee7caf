//! Run-length grouping of series episodes in M3U playlists.
//!
//! IPTV playlists list the episodes of a series as one contiguous
//! block. This crate exploits that layout: each playlist record is
//! classified as a TV episode (or silently rejected - movies, live
//! channels and malformed entries are the common case), and
//! consecutive episodes sharing the same normalized series key are
//! collapsed into [`SeriesRun`]s. Downstream normalization, hashing
//! and persistence can then run once per run instead of once per item.
//!
//! ```no_run
//! use futures::StreamExt;
//! use series_runs::{group_records, EntryParser, FileRecordSource};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let source = FileRecordSource::new("playlist.m3u");
//! let records = source.records().filter_map(|r| async { r.ok() });
//! let runs = group_records(records, EntryParser::new());
//! futures::pin_mut!(runs);
//! while let Some(run) = runs.next().await {
//!     println!("{} {} episodes", run.series_key, run.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod services;

pub use models::{Episode, EpisodeMarker, GroupingStats, RawRecord, SeriesRun};
pub use services::{group_records, EntryParser, FileRecordSource, RunGrouper, SourceError};
