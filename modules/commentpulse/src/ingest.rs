// Ingestion: page through a video's comments up to a cap and label each one.
//
// One linear cycle per video. A failed page ends the cycle for that video
// only; rows already collected are kept and a warning rides along with them.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use commentpulse_common::{CommentRecord, ResultTable, VideoId};

use crate::retry::{with_retry, RetryPolicy};
use crate::scorer::classify;
use crate::traits::{CommentSource, SentimentScorer};

/// Page size the API allows at most.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub page_size: u32,
    pub retry: RetryPolicy,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            retry: RetryPolicy::default(),
        }
    }
}

/// Retrieval for a video stopped early. The rows fetched before the failure
/// are still returned.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestWarning {
    pub video_id: VideoId,
    pub pages_fetched: usize,
    pub message: String,
}

impl fmt::Display for IngestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to fetch comments for {} after {} page(s): {}",
            self.video_id, self.pages_fetched, self.message
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestOutcome {
    pub table: ResultTable,
    pub warning: Option<IngestWarning>,
}

impl IngestOutcome {
    /// True when retrieval ran to the cap or to the last page.
    pub fn is_complete(&self) -> bool {
        self.warning.is_none()
    }
}

pub struct Ingestor {
    source: Arc<dyn CommentSource>,
    scorer: Arc<dyn SentimentScorer>,
    options: IngestOptions,
}

impl Ingestor {
    pub fn new(source: Arc<dyn CommentSource>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self {
            source,
            scorer,
            options: IngestOptions::default(),
        }
    }

    pub fn with_options(mut self, options: IngestOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetch up to `cap` comments for `video_id`, newest first, and label each.
    /// Never returns more than `cap` rows. A cap of zero makes no request.
    pub async fn fetch_and_classify(&self, video_id: &VideoId, cap: usize) -> IngestOutcome {
        info!(video_id = %video_id, cap, "Fetching comments");

        let mut table = ResultTable::new();
        let mut page_token: Option<String> = None;
        let mut pages_fetched = 0;

        while table.len() < cap {
            let token = page_token.as_deref();
            let source = self.source.as_ref();
            let page_size = self.options.page_size;
            let result = with_retry(&self.options.retry, "comment page", move || {
                source.fetch_page(video_id, token, page_size)
            })
            .await;

            let page = match result {
                Ok(page) => page,
                Err(err) => {
                    warn!(
                        video_id = %video_id,
                        pages_fetched,
                        rows = table.len(),
                        error = %err,
                        "Comment retrieval aborted, keeping partial results"
                    );
                    return IngestOutcome {
                        table,
                        warning: Some(IngestWarning {
                            video_id: video_id.clone(),
                            pages_fetched,
                            message: format!("{err:#}"),
                        }),
                    };
                }
            };
            pages_fetched += 1;

            let page_len = page.texts.len();
            let remaining = cap - table.len();
            for text in page.texts.into_iter().take(remaining) {
                let label = classify(self.scorer.as_ref(), &text);
                table.push(CommentRecord {
                    source_id: video_id.clone(),
                    text,
                    label,
                });
            }
            debug!(video_id = %video_id, page = pages_fetched, page_len, rows = table.len(), "Page classified");

            match page.next_page_token {
                // An empty page that still hands out a cursor would loop forever.
                Some(_) if page_len == 0 => {
                    debug!(video_id = %video_id, "Empty page with a cursor, stopping");
                    break;
                }
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        info!(video_id = %video_id, rows = table.len(), pages = pages_fetched, "Comments classified");
        IngestOutcome {
            table,
            warning: None,
        }
    }
}
