use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of a canonical YouTube video identifier.
pub const VIDEO_ID_LEN: usize = 11;

/// Compound scores at or above this are Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this are Negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

// --- Identifiers ---

/// A canonical 11-character video identifier (`[A-Za-z0-9_-]{11}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Accept `s` only if it is already canonical. No URL parsing happens here.
    pub fn parse(s: &str) -> Option<Self> {
        is_canonical_video_id(s).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// True for exactly 11 ASCII letters, digits, `-` or `_`.
pub fn is_canonical_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

// --- Sentiment ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    /// Threshold rule over a compound polarity score. Both bounds are inclusive.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full output of a lexicon scorer. `compound` is normalized to [-1, 1];
/// `pos`, `neu` and `neg` are proportions of the text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PolarityScores {
    pub compound: f64,
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
}

// --- Result table ---

/// One classified comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub source_id: VideoId,
    pub text: String,
    pub label: SentimentLabel,
}

/// Classified comments in retrieval order (newest first within each video).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    records: Vec<CommentRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: CommentRecord) {
        self.records.push(record);
    }

    /// Append every row of `other`, keeping both orders.
    pub fn append(&mut self, other: ResultTable) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CommentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommentRecord> {
        self.records.iter()
    }
}

impl From<Vec<CommentRecord>> for ResultTable {
    fn from(records: Vec<CommentRecord>) -> Self {
        Self { records }
    }
}

impl IntoIterator for ResultTable {
    type Item = CommentRecord;
    type IntoIter = std::vec::IntoIter<CommentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a CommentRecord;
    type IntoIter = std::slice::Iter<'a, CommentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
