use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::collections::BTreeSet;

/// One raw playlist record as delivered by the record source:
/// an #EXTINF metadata line paired with the locator line below it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// Position of this record in the source stream (0-based)
    pub index: usize,
    pub metadata: String,
    pub locator: String,
}

/// A playlist record classified as a TV episode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Display name exactly as it appeared in the playlist
    pub raw_name: String,
    /// Normalized base name used as the grouping identity.
    /// Non-empty: records whose name is nothing but markers and tags
    /// are rejected at parse time.
    pub series_key: String,
    /// group-title attribute, empty when the playlist carries none
    pub group_label: String,
    pub season: u8,
    pub episode_number: u16,
    pub locator: String,
}

impl Episode {
    pub fn marker(&self) -> EpisodeMarker {
        EpisodeMarker {
            season: self.season,
            episode: self.episode_number,
        }
    }
}

/// Season/episode pair marking one end of a run.
/// Positional (first/last member in source order), not a numeric extreme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeMarker {
    pub season: u8,
    pub episode: u16,
}

impl std::fmt::Display for EpisodeMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)
    }
}

/// Maximal contiguous run of episodes sharing the same series key,
/// in source order. Always holds at least one episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRun {
    pub series_key: String,
    pub group_label: String,
    pub episodes: Vec<Episode>,
}

impl SeriesRun {
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Distinct seasons present in this run, ascending
    pub fn season_set(&self) -> BTreeSet<u8> {
        self.episodes.iter().map(|ep| ep.season).collect()
    }

    /// Marker of the first member in source order
    pub fn first(&self) -> Option<EpisodeMarker> {
        self.episodes.first().map(Episode::marker)
    }

    /// Marker of the last member in source order
    pub fn last(&self) -> Option<EpisodeMarker> {
        self.episodes.last().map(Episode::marker)
    }

    /// Stable identifier derived from the series key, for downstream
    /// batch operations (one hash per run instead of one per episode)
    pub fn series_id(&self) -> String {
        let mut hasher = Sha1::new();
        hasher.update(self.series_key.as_bytes());
        format!("series_{:x}", hasher.finalize())
    }
}

/// Counters for one grouping pass
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingStats {
    /// Records classified as episodes
    pub episodes: usize,
    /// Records that did not classify (movies, channels, malformed)
    pub rejected: usize,
    /// Runs emitted, including singletons
    pub runs: usize,
    /// Runs of length 1 (callers may skip batch optimization for these)
    pub singleton_runs: usize,
}
