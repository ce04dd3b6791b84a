// Batch runner: resolve each input, ingest it (through the cache), and stitch
// the per-video tables together. Inputs are handled one after another and a
// bad input never stops the ones after it.

use std::collections::HashSet;
use std::fmt;

use tracing::{info, warn};

use commentpulse_common::{ResultTable, VideoId};

use crate::cache::ResultCache;
use crate::ingest::{IngestOutcome, IngestWarning, Ingestor};
use crate::resolver::resolve;

#[derive(Debug, Clone, PartialEq)]
pub enum BatchWarning {
    /// The input is neither a video id nor a recognized video URL.
    Unresolved(String),
    /// Retrieval stopped early for one video.
    Fetch(IngestWarning),
}

impl fmt::Display for BatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchWarning::Unresolved(input) => write!(f, "not a recognized video id or URL: {input}"),
            BatchWarning::Fetch(warning) => write!(f, "{warning}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub table: ResultTable,
    /// Row count per video, in input order. Videos with no rows are left out.
    pub per_video: Vec<(VideoId, usize)>,
    pub warnings: Vec<BatchWarning>,
}

impl BatchReport {
    /// Nothing was found for any input. Not an error; callers show a notice.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

pub struct BatchRunner {
    ingestor: Ingestor,
    cache: ResultCache,
    cap: usize,
}

impl BatchRunner {
    pub fn new(ingestor: Ingestor, cache: ResultCache, cap: usize) -> Self {
        Self {
            ingestor,
            cache,
            cap,
        }
    }

    pub async fn run<S: AsRef<str>>(&self, inputs: &[S]) -> BatchReport {
        let mut report = BatchReport::default();
        let mut seen = HashSet::new();

        for input in inputs {
            let input = input.as_ref();
            let Some(video_id) = resolve(input) else {
                warn!(input, "Skipping unrecognized input");
                report.warnings.push(BatchWarning::Unresolved(input.to_string()));
                continue;
            };
            if !seen.insert(video_id.clone()) {
                info!(video_id = %video_id, "Duplicate input, already processed");
                continue;
            }

            let outcome = self.fetch(&video_id).await;
            if let Some(warning) = outcome.warning {
                report.warnings.push(BatchWarning::Fetch(warning));
            }
            if !outcome.table.is_empty() {
                report.per_video.push((video_id, outcome.table.len()));
                report.table.append(outcome.table);
            }
        }

        info!(
            inputs = inputs.len(),
            videos = report.per_video.len(),
            rows = report.table.len(),
            warnings = report.warnings.len(),
            "Batch finished"
        );
        report
    }

    /// Cached result if fresh, otherwise a live fetch. Only complete
    /// results are cached so a failed video is retried next cycle.
    async fn fetch(&self, video_id: &VideoId) -> IngestOutcome {
        if let Some(table) = self.cache.get(video_id, self.cap).await {
            info!(video_id = %video_id, rows = table.len(), "Cache hit");
            return IngestOutcome {
                table,
                warning: None,
            };
        }

        let outcome = self.ingestor.fetch_and_classify(video_id, self.cap).await;
        if outcome.is_complete() {
            self.cache
                .insert(video_id.clone(), self.cap, outcome.table.clone())
                .await;
        }
        outcome
    }
}
