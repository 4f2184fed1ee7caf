use async_stream::stream;
use futures::{pin_mut, Stream};
use tokio_stream::StreamExt;

use crate::models::{Episode, GroupingStats, RawRecord, SeriesRun};
use crate::services::parser::EntryParser;

/// Run-length grouper over the classified episode stream.
///
/// Holds only the current run: a run closes (and is handed back to the
/// caller) the moment an episode with a different series key arrives.
/// Rejected records never close a run, so movies and channels sitting
/// between two episodes of the same series do not split it. A
/// different series' episode always does.
#[derive(Debug, Default)]
pub struct RunGrouper {
    current: Option<SeriesRun>,
    stats: GroupingStats,
}

impl RunGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next classified episode, in source order.
    /// Returns the run this episode closed, if any.
    pub fn push(&mut self, episode: Episode) -> Option<SeriesRun> {
        self.stats.episodes += 1;

        let same_run = self
            .current
            .as_ref()
            .map(|run| run.series_key == episode.series_key)
            .unwrap_or(false);

        let closed = if same_run { None } else { self.take_current() };

        match self.current.as_mut() {
            Some(run) => run.episodes.push(episode),
            None => {
                self.current = Some(SeriesRun {
                    series_key: episode.series_key.clone(),
                    group_label: episode.group_label.clone(),
                    episodes: vec![episode],
                });
            }
        }

        closed
    }

    /// Feed a record that did not classify as an episode. Counted for
    /// the pass summary; the current run stays open.
    pub fn skip(&mut self) {
        self.stats.rejected += 1;
    }

    /// Close and return the still-open run, if any.
    ///
    /// A caller abandoning the stream early must call this, otherwise
    /// the partially accumulated last run is lost.
    pub fn finish(&mut self) -> Option<SeriesRun> {
        self.take_current()
    }

    /// Counters accumulated so far in this pass
    pub fn stats(&self) -> GroupingStats {
        self.stats
    }

    fn take_current(&mut self) -> Option<SeriesRun> {
        let run = self.current.take()?;
        self.stats.runs += 1;
        if run.len() == 1 {
            self.stats.singleton_runs += 1;
        }
        Some(run)
    }
}

/// Parse and group a stream of raw records into series runs.
///
/// Records are pulled lazily from `records` (any swappable source of
/// RawRecords) and each `SeriesRun` is yielded the moment it closes,
/// so a downstream consumer can start batch work on a finished run
/// before the rest of the playlist has been read. The final open run
/// is flushed at end of stream. Emission order and member order are
/// strictly source order.
pub fn group_records<S>(records: S, parser: EntryParser) -> impl Stream<Item = SeriesRun>
where
    S: Stream<Item = RawRecord>,
{
    stream! {
        let mut grouper = RunGrouper::new();
        pin_mut!(records);

        while let Some(record) = records.next().await {
            match parser.parse(&record) {
                Some(episode) => {
                    if let Some(run) = grouper.push(episode) {
                        tracing::debug!("Run closed: {} ({} episodes)", run.series_key, run.len());
                        yield run;
                    }
                }
                None => grouper.skip(),
            }
        }

        if let Some(run) = grouper.finish() {
            tracing::debug!("Run closed: {} ({} episodes)", run.series_key, run.len());
            yield run;
        }

        let stats = grouper.stats();
        tracing::info!(
            "Grouping complete: {} runs from {} episodes ({} rejected, {} singletons)",
            stats.runs,
            stats.episodes,
            stats.rejected,
            stats.singleton_runs
        );
    }
}
