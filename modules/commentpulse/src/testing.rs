// Test mocks for the ingestion pipeline.
//
// Two mocks matching the two trait boundaries:
// - MockCommentSource (CommentSource): video id -> scripted pages, with
//   injectable permanent and transient failures
// - FixedScorer (SentimentScorer): text -> scripted compound score

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use commentpulse_common::VideoId;
use youtube_client::YouTubeError;

use crate::traits::{CommentPage, CommentSource, SentimentScorer};

// ---------------------------------------------------------------------------
// MockCommentSource
// ---------------------------------------------------------------------------

/// Scripted comment pages per video. Page `n` is requested with token `"n"`;
/// the last page carries no token. Unknown videos fail like a 404.
pub struct MockCommentSource {
    pages: HashMap<String, Vec<Vec<String>>>,
    /// Page index from which every request for the video fails.
    fail_from_page: HashMap<String, usize>,
    /// Remaining transient failures before the video starts answering.
    transient_failures: Mutex<HashMap<String, u32>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl MockCommentSource {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            fail_from_page: HashMap::new(),
            transient_failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_pages(mut self, video_id: &str, pages: Vec<Vec<String>>) -> Self {
        self.pages.insert(video_id.to_string(), pages);
        self
    }

    /// `page_count` pages of `per_page` comments each, texts `"<video> p<page> c<n>"`.
    pub fn with_paged_comments(self, video_id: &str, page_count: usize, per_page: usize) -> Self {
        let pages = (0..page_count)
            .map(|p| {
                (0..per_page)
                    .map(|c| format!("{video_id} p{p} c{c}"))
                    .collect()
            })
            .collect();
        self.with_pages(video_id, pages)
    }

    /// Requests for page `page_index` and later fail with a non-transient error.
    pub fn failing_from_page(mut self, video_id: &str, page_index: usize) -> Self {
        self.fail_from_page.insert(video_id.to_string(), page_index);
        self
    }

    /// The next `times` requests for the video fail with a network error.
    pub fn with_transient_failures(self, video_id: &str, times: u32) -> Self {
        self.transient_failures
            .lock()
            .unwrap()
            .insert(video_id.to_string(), times);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, video_id: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == video_id)
            .count()
    }
}

impl Default for MockCommentSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentSource for MockCommentSource {
    async fn fetch_page(
        &self,
        video_id: &VideoId,
        page_token: Option<&str>,
        _page_size: u32,
    ) -> Result<CommentPage> {
        let id = video_id.as_str();
        self.calls
            .lock()
            .unwrap()
            .push((id.to_string(), page_token.map(str::to_string)));

        {
            let mut transient = self.transient_failures.lock().unwrap();
            if let Some(left) = transient.get_mut(id) {
                if *left > 0 {
                    *left -= 1;
                    return Err(YouTubeError::Network("connection reset by peer".into()).into());
                }
            }
        }

        let index: usize = match page_token {
            Some(token) => token.parse().map_err(|_| anyhow!("bad page token {token}"))?,
            None => 0,
        };

        if self.fail_from_page.get(id).is_some_and(|&from| index >= from) {
            return Err(YouTubeError::Api {
                status: 400,
                message: format!("processingFailure on page {index}"),
            }
            .into());
        }

        let pages = self.pages.get(id).ok_or_else(|| {
            anyhow::Error::from(YouTubeError::Api {
                status: 404,
                message: format!("videoNotFound: {id}"),
            })
        })?;

        let texts = pages.get(index).cloned().unwrap_or_default();
        let next_page_token = (index + 1 < pages.len()).then(|| (index + 1).to_string());
        Ok(CommentPage {
            texts,
            next_page_token,
        })
    }
}

// ---------------------------------------------------------------------------
// FixedScorer
// ---------------------------------------------------------------------------

/// Returns the scripted compound score for a text, 0.0 for anything else.
pub struct FixedScorer {
    scores: HashMap<String, f64>,
}

impl FixedScorer {
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
        }
    }

    pub fn with_score(mut self, text: &str, compound: f64) -> Self {
        self.scores.insert(text.to_string(), compound);
        self
    }
}

impl Default for FixedScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for FixedScorer {
    fn score(&self, text: &str) -> f64 {
        self.scores.get(text).copied().unwrap_or(0.0)
    }
}
