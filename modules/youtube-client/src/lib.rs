pub mod error;
pub mod types;

pub use error::{Result, YouTubeError};
pub use types::{
    Comment, CommentSnippet, CommentThread, CommentThreadListResponse, CommentThreadSnippet,
    PageInfo,
};

use std::time::Duration;

use types::{CommentThreadsQuery, ErrorEnvelope};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Largest `maxResults` accepted by `commentThreads.list`.
pub const MAX_PAGE_SIZE: u32 = 100;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different API root (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch one page of top-level comment threads for a video, newest first.
    /// Pass the previous page's `next_page_token` to continue the listing.
    pub async fn list_comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<CommentThreadListResponse> {
        let query = CommentThreadsQuery {
            part: "snippet",
            video_id,
            max_results: max_results.clamp(1, MAX_PAGE_SIZE),
            text_format: "plainText",
            order: "time",
            page_token,
            key: &self.api_key,
        };

        tracing::debug!(video_id, page_token, max_results = query.max_results, "Listing comment threads");

        let url = format!("{}/commentThreads", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&query)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = resp.text().await?;
        let page: CommentThreadListResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            video_id,
            items = page.items.len(),
            has_next = page.next_page_token.is_some(),
            "Fetched comment thread page"
        );

        Ok(page)
    }
}

/// Pull `error.message` out of a Google error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string())
}
