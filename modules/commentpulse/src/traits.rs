// Trait seams for the ingestion pipeline.
//
// CommentSource hides the video platform behind one paging call.
// SentimentScorer hides the lexicon scorer behind one scoring call.
//
// Tests swap in MockCommentSource and FixedScorer (see `testing`):
// no network, no lexicon, deterministic labels.

use anyhow::Result;
use async_trait::async_trait;

use commentpulse_common::VideoId;
use youtube_client::YouTubeClient;

/// One page of comment texts plus the cursor for the next page, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentPage {
    pub texts: Vec<String>,
    pub next_page_token: Option<String>,
}

// ---------------------------------------------------------------------------
// CommentSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch one page of top-level comments for a video, newest first.
    async fn fetch_page(
        &self,
        video_id: &VideoId,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<CommentPage>;
}

#[async_trait]
impl CommentSource for YouTubeClient {
    async fn fetch_page(
        &self,
        video_id: &VideoId,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<CommentPage> {
        let page = self
            .list_comment_threads(video_id.as_str(), page_token, page_size)
            .await?;
        Ok(CommentPage {
            texts: page.top_level_texts(),
            next_page_token: page.next_page_token,
        })
    }
}

// ---------------------------------------------------------------------------
// SentimentScorer
// ---------------------------------------------------------------------------

/// Anything that maps text to a compound polarity score in [-1, 1].
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}
