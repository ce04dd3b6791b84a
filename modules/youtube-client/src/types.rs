use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters for `commentThreads.list`.
#[derive(Debug, Clone, Serialize)]
pub struct CommentThreadsQuery<'a> {
    pub part: &'a str,
    #[serde(rename = "videoId")]
    pub video_id: &'a str,
    #[serde(rename = "maxResults")]
    pub max_results: u32,
    #[serde(rename = "textFormat")]
    pub text_format: &'a str,
    pub order: &'a str,
    #[serde(rename = "pageToken", skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
    pub key: &'a str,
}

/// One page of `commentThreads.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
}

impl CommentThreadListResponse {
    /// Display text of every top-level comment on this page, in API order.
    pub fn top_level_texts(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|thread| thread.snippet.top_level_comment.snippet.text_display.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "totalResults")]
    pub total_results: Option<u32>,
    #[serde(rename = "resultsPerPage")]
    pub results_per_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub id: String,
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThreadSnippet {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: Comment,
    #[serde(rename = "totalReplyCount")]
    pub total_reply_count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: String,
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentSnippet {
    #[serde(rename = "textDisplay", default)]
    pub text_display: String,
    #[serde(rename = "textOriginal")]
    pub text_original: Option<String>,
    #[serde(rename = "authorDisplayName")]
    pub author_display_name: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<u64>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Google API error envelope: `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
