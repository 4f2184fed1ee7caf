use std::path::{Path, PathBuf};

use async_stream::try_stream;
use futures::Stream;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::models::RawRecord;

/// Defensive limit for streamed parsing: protects against
/// maliciously long lines
const MAX_LINE_BYTES: usize = 32 * 1024;

/// Errors surfaced by the file-backed record source.
///
/// The grouping core never sees these: I/O and format failures stop at
/// this boundary and the caller decides whether to abort or skip.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read playlist: {0}")]
    Io(#[from] std::io::Error),

    #[error("playlist line exceeds max length of {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("invalid playlist format (missing #EXTM3U header)")]
    MissingHeader,
}

/// Record source backed by an on-disk M3U playlist.
///
/// Pairs each #EXTINF metadata line with the locator line below it and
/// emits the pair as one RawRecord, in file order. Header handling,
/// comments, blank lines and line-size limits all stay here; the
/// parser downstream only ever sees already-split records.
pub struct FileRecordSource {
    path: PathBuf,
    max_line_bytes: usize,
}

impl FileRecordSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_line_bytes: MAX_LINE_BYTES,
        }
    }

    /// Override the per-line size guard
    pub fn with_max_line_bytes(mut self, limit: usize) -> Self {
        self.max_line_bytes = limit;
        self
    }

    /// Stream records in file order.
    ///
    /// The stream ends with `SourceError::MissingHeader` when the file
    /// never declared #EXTM3U, after any records read so far.
    pub fn records(self) -> impl Stream<Item = Result<RawRecord, SourceError>> {
        try_stream! {
            let file = File::open(&self.path).await?;
            let mut reader = BufReader::new(file);
            let mut line = String::new();

            // Metadata line waiting for its locator line
            let mut pending: Option<String> = None;
            let mut index = 0usize;
            let mut found_header = false;

            loop {
                line.clear();
                let bytes_read = reader.read_line(&mut line).await?;
                if bytes_read == 0 {
                    break;
                }

                if line.len() > self.max_line_bytes {
                    Err(SourceError::LineTooLong { limit: self.max_line_bytes })?;
                }

                let trimmed = line.trim();

                if trimmed.is_empty() {
                    continue;
                }

                if trimmed == "#EXTM3U" {
                    found_header = true;
                    continue;
                }

                if trimmed.starts_with("#EXTINF:") {
                    // A metadata line with no locator before the next
                    // one is dropped here
                    pending = Some(trimmed.to_string());
                    continue;
                }

                // Skip other comments without dropping a pending metadata line
                if trimmed.starts_with('#') {
                    continue;
                }

                if let Some(metadata) = pending.take() {
                    yield RawRecord {
                        index,
                        metadata,
                        locator: trimmed.to_string(),
                    };
                    index += 1;
                }
            }

            tracing::debug!("Record source drained: {} records from {}", index, self.path.display());

            if !found_header {
                Err(SourceError::MissingHeader)?;
            }
        }
    }
}
