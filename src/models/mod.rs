//! Data model
//!
//! Record, episode and run types flowing through the pipeline:
//! - RawRecord: metadata + locator pair as read from the playlist
//! - Episode: a record classified as a TV episode
//! - SeriesRun: maximal contiguous same-series span of episodes

pub mod playlist;

pub use playlist::{Episode, EpisodeMarker, GroupingStats, RawRecord, SeriesRun};
