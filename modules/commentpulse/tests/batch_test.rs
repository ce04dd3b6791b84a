//! Batch tests: inputs -> BatchRunner::run() -> BatchReport.
//!
//! Covers per-input failure isolation, duplicate handling and the result cache.

use std::sync::Arc;
use std::time::Duration;

use commentpulse::testing::{FixedScorer, MockCommentSource};
use commentpulse::{
    BatchRunner, BatchWarning, IngestOptions, Ingestor, ResultCache, RetryPolicy,
};

const GOOD_A: &str = "Ugfjq0rDz8g";
const GOOD_B: &str = "Lr1OHmBpwjw";
const BROKEN: &str = "5BFIAHBBdao";

fn source() -> MockCommentSource {
    MockCommentSource::new()
        .with_paged_comments(GOOD_A, 2, 10)
        .with_paged_comments(GOOD_B, 1, 5)
        .with_paged_comments(BROKEN, 3, 10)
        .failing_from_page(BROKEN, 1)
}

fn runner(source: Arc<MockCommentSource>, ttl: Duration, cap: usize) -> BatchRunner {
    let ingestor = Ingestor::new(source, Arc::new(FixedScorer::new())).with_options(IngestOptions {
        page_size: 100,
        retry: RetryPolicy::none(),
    });
    BatchRunner::new(ingestor, ResultCache::new(ttl), cap)
}

// ---------------------------------------------------------------------------
// Isolation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unresolvable_input_is_skipped_with_warning() {
    let source = Arc::new(source());
    let report = runner(source, Duration::ZERO, 100)
        .run(&[
            "not a video".to_string(),
            format!("https://youtu.be/{GOOD_B}?si=abc"),
        ])
        .await;

    assert_eq!(report.table.len(), 5);
    assert_eq!(
        report.warnings,
        vec![BatchWarning::Unresolved("not a video".into())]
    );
}

#[tokio::test]
async fn failing_video_does_not_affect_others() {
    let source = Arc::new(source());
    let report = runner(source, Duration::ZERO, 100)
        .run(&[GOOD_A, BROKEN, GOOD_B])
        .await;

    let per_video: Vec<(&str, usize)> = report
        .per_video
        .iter()
        .map(|(id, n)| (id.as_str(), *n))
        .collect();
    assert_eq!(per_video, vec![(GOOD_A, 20), (BROKEN, 10), (GOOD_B, 5)]);
    assert_eq!(report.table.len(), 35);

    assert_eq!(report.warnings.len(), 1);
    match &report.warnings[0] {
        BatchWarning::Fetch(w) => {
            assert_eq!(w.video_id.as_str(), BROKEN);
            assert_eq!(w.pages_fetched, 1);
        }
        other => panic!("expected fetch warning, got {other:?}"),
    }
}

#[tokio::test]
async fn nothing_found_is_an_empty_report_not_an_error() {
    let source = Arc::new(MockCommentSource::new());
    let report = runner(source, Duration::ZERO, 100)
        .run(&["garbage", "https://vimeo.com/1", GOOD_A])
        .await;

    assert!(report.is_empty());
    assert!(report.per_video.is_empty());
    assert_eq!(report.warnings.len(), 3);
}

#[tokio::test]
async fn duplicate_inputs_are_fetched_once() {
    let source = Arc::new(source());
    let report = runner(source.clone(), Duration::ZERO, 100)
        .run(&[
            GOOD_B.to_string(),
            format!("https://www.youtube.com/watch?v={GOOD_B}"),
        ])
        .await;

    assert_eq!(report.table.len(), 5);
    assert_eq!(source.calls_for(GOOD_B), 1);
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_run_within_ttl_hits_the_cache() {
    let source = Arc::new(source());
    let runner = runner(source.clone(), Duration::from_secs(300), 100);

    let first = runner.run(&[GOOD_A]).await;
    let second = runner.run(&[GOOD_A]).await;

    assert_eq!(first.table, second.table);
    assert_eq!(source.calls_for(GOOD_A), 2, "two pages fetched once");
}

#[tokio::test]
async fn zero_ttl_always_refetches() {
    let source = Arc::new(source());
    let runner = runner(source.clone(), Duration::ZERO, 100);

    runner.run(&[GOOD_B]).await;
    runner.run(&[GOOD_B]).await;

    assert_eq!(source.calls_for(GOOD_B), 2);
}

#[tokio::test]
async fn partial_results_are_not_cached() {
    let source = Arc::new(source());
    let runner = runner(source.clone(), Duration::from_secs(300), 100);

    runner.run(&[BROKEN]).await;
    let second = runner.run(&[BROKEN]).await;

    assert_eq!(second.warnings.len(), 1, "failure should be retried, not served from cache");
    assert_eq!(source.calls_for(BROKEN), 4);
}
