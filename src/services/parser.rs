use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{Episode, RawRecord};

lazy_static! {
    /// Regex to parse EXTINF attributes (tvg-name="...", group-title="...", etc)
    static ref ATTR_REGEX: Regex = Regex::new(r#"(\w+(?:-\w+)*)="([^"]*)""#).unwrap();

    /// Regex to normalize multiple whitespaces into single space
    static ref MULTI_SPACE_REGEX: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Normalize text: trim and collapse multiple spaces into single space
fn normalize_text(text: &str) -> String {
    let trimmed = text.trim();
    MULTI_SPACE_REGEX.replace_all(trimmed, " ").to_string()
}

/// Classifies raw playlist records as TV episodes.
///
/// A pure function of its input: no caches, no global mutable state.
/// The patterns are compiled once and owned by the parser instance, so
/// a caller injects one parser per pass and nothing is shared across
/// passes.
///
/// Rejection (`None`) is the common case, not a failure: movies, live
/// channels and malformed entries all flow through here and are simply
/// skipped by the grouper downstream.
pub struct EntryParser {
    /// SxxExx season/episode marker (case-insensitive)
    marker: Regex,
    /// Bracketed tags: [1080p], [L], ...
    brackets: Regex,
    /// Parenthesized tags: (2019), (PT-BR), ...
    parens: Regex,
}

impl EntryParser {
    pub fn new() -> Self {
        Self {
            marker: Regex::new(r"(?i)S(\d{1,2})E(\d{1,2})").unwrap(),
            brackets: Regex::new(r"\[[^\]]*\]").unwrap(),
            parens: Regex::new(r"\([^)]*\)").unwrap(),
        }
    }

    /// Classify one record.
    ///
    /// Returns `None` when the metadata line is not an #EXTINF directive,
    /// lacks a tvg-name attribute, the name carries no SxxExx marker,
    /// the locator has no recognized scheme, or stripping markers and
    /// tags leaves an empty series key.
    pub fn parse(&self, record: &RawRecord) -> Option<Episode> {
        let metadata = record.metadata.trim();
        if !metadata.starts_with("#EXTINF:") {
            return None;
        }

        let mut name: Option<String> = None;
        let mut group: Option<String> = None;
        for caps in ATTR_REGEX.captures_iter(metadata) {
            match &caps[1] {
                "tvg-name" => name = Some(caps[2].to_string()),
                "group-title" => group = Some(caps[2].to_string()),
                _ => {}
            }
        }

        let raw_name = normalize_text(&name?);

        let locator = record.locator.trim();
        if !locator.starts_with("http") {
            return None;
        }

        // Only the first marker in the name decides season/episode
        let caps = self.marker.captures(&raw_name)?;
        let season: u8 = caps[1].parse().ok()?;
        let episode_number: u16 = caps[2].parse().ok()?;
        if season == 0 || episode_number == 0 {
            return None;
        }

        let series_key = self.series_key(&raw_name)?;
        let group_label = normalize_text(&group.unwrap_or_default());

        Some(Episode {
            raw_name,
            series_key,
            group_label,
            season,
            episode_number,
            locator: locator.to_string(),
        })
    }

    /// Derive the grouping identity from a display name: drop the
    /// SxxExx markers and all bracketed/parenthesized tags, then
    /// normalize whitespace. Two episodes of the same series with
    /// different quality/language tags collapse to the same key.
    ///
    /// Returns `None` when nothing but noise remains - such a record
    /// cannot be grouped safely.
    fn series_key(&self, name: &str) -> Option<String> {
        let stripped = self.marker.replace_all(name, "");
        let stripped = self.brackets.replace_all(&stripped, "");
        let stripped = self.parens.replace_all(&stripped, "");
        let key = normalize_text(&stripped);
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }
}

impl Default for EntryParser {
    fn default() -> Self {
        Self::new()
    }
}
