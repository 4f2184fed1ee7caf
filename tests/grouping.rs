//! End-to-end pipeline tests: playlist file -> record source ->
//! parser -> grouper.

use std::io::Write;

use anyhow::Result;
use futures::StreamExt;
use tempfile::NamedTempFile;

use series_runs::{group_records, EntryParser, FileRecordSource, SeriesRun};

fn write_playlist(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

async fn run_pipeline(path: &std::path::Path) -> Vec<SeriesRun> {
    let records = FileRecordSource::new(path)
        .records()
        .filter_map(|record| async { record.ok() });
    group_records(records, EntryParser::new()).collect().await
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "series_runs=debug".into()),
        )
        .try_init();
}

#[tokio::test]
async fn test_end_to_end_scenario() -> Result<()> {
    init_tracing();

    // Three episodes of the same series with a movie wedged in the
    // middle, then a single episode of another series. Expected: two
    // runs, the first spanning the movie gap.
    let file = write_playlist(
        r#"#EXTM3U
#EXTINF:-1 tvg-name="Show S01E01 [1080p]" group-title="Series | A",Show S01E01
http://cdn.example.com/show/s01e01.mp4
#EXTINF:-1 tvg-name="Show S01E02 (PT-BR)" group-title="Series | A",Show S01E02
http://cdn.example.com/show/s01e02.mp4
#EXTINF:-1 tvg-name="MovieX 4K Dublado" group-title="Filmes",MovieX
http://cdn.example.com/movies/moviex.mp4
#EXTINF:-1 tvg-name="Show S01E03" group-title="Series | A",Show S01E03
http://cdn.example.com/show/s01e03.mp4
#EXTINF:-1 tvg-name="OtherShow S01E01" group-title="Series | B",OtherShow S01E01
http://cdn.example.com/other/s01e01.mp4
"#,
    )?;

    let runs = run_pipeline(file.path()).await;

    assert_eq!(runs.len(), 2);

    assert_eq!(runs[0].series_key, "Show");
    assert_eq!(runs[0].len(), 3);
    assert_eq!(runs[0].group_label, "Series | A");
    assert_eq!(runs[0].first().unwrap().to_string(), "S01E01");
    assert_eq!(runs[0].last().unwrap().to_string(), "S01E03");
    assert_eq!(runs[0].season_set().into_iter().collect::<Vec<_>>(), vec![1]);

    assert_eq!(runs[1].series_key, "OtherShow");
    assert_eq!(runs[1].len(), 1);

    // The rejected movie belongs to no run
    for run in &runs {
        assert!(run.episodes.iter().all(|ep| !ep.raw_name.contains("MovieX")));
    }

    Ok(())
}

#[tokio::test]
async fn test_tag_noise_collapses_to_one_run() -> Result<()> {
    // Same series under different bracket/paren tags must share a key
    let file = write_playlist(
        r#"#EXTM3U
#EXTINF:-1 tvg-name="Dark S01E01 [1080p]",Dark
http://cdn.example.com/dark/1
#EXTINF:-1 tvg-name="Dark S01E02 (Legendado)",Dark
http://cdn.example.com/dark/2
#EXTINF:-1 tvg-name="Dark [4K] S02E01",Dark
http://cdn.example.com/dark/3
"#,
    )?;

    let runs = run_pipeline(file.path()).await;

    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].series_key, "Dark");
    assert_eq!(runs[0].len(), 3);
    assert_eq!(runs[0].season_set().into_iter().collect::<Vec<_>>(), vec![1, 2]);
    Ok(())
}

#[tokio::test]
async fn test_order_preserved_and_runs_maximal() -> Result<()> {
    let file = write_playlist(
        r#"#EXTM3U
#EXTINF:-1 tvg-name="A S01E01",A
http://cdn/a/1
#EXTINF:-1 tvg-name="B S01E01",B
http://cdn/b/1
#EXTINF:-1 tvg-name="B S01E02",B
http://cdn/b/2
#EXTINF:-1 tvg-name="A S01E02",A
http://cdn/a/2
"#,
    )?;

    let runs = run_pipeline(file.path()).await;

    // A run breaks on a different series key even for the same series
    // appearing again later: 3 runs, never merged across the gap
    assert_eq!(runs.len(), 3);
    let keys: Vec<&str> = runs.iter().map(|run| run.series_key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B", "A"]);

    for pair in runs.windows(2) {
        assert_ne!(pair[0].series_key, pair[1].series_key);
    }

    // Concatenated members reproduce the classified input order
    let locators: Vec<&str> = runs
        .iter()
        .flat_map(|run| run.episodes.iter().map(|ep| ep.locator.as_str()))
        .collect();
    assert_eq!(
        locators,
        vec!["http://cdn/a/1", "http://cdn/b/1", "http://cdn/b/2", "http://cdn/a/2"]
    );
    Ok(())
}

#[tokio::test]
async fn test_unclassifiable_only_playlist_yields_no_runs() -> Result<()> {
    let file = write_playlist(
        r#"#EXTM3U
#EXTINF:-1 tvg-name="Globo HD" group-title="Canais",Globo HD
http://cdn/live/globo
#EXTINF:-1 group-title="Filmes",Sem Nome
http://cdn/movies/1
#EXTINF:-1 tvg-name="Dark S01E01",Dark
not-a-url
"#,
    )?;

    let runs = run_pipeline(file.path()).await;
    assert!(runs.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_playlist_yields_no_runs() -> Result<()> {
    let file = write_playlist("#EXTM3U\n")?;
    let runs = run_pipeline(file.path()).await;
    assert!(runs.is_empty());
    Ok(())
}
