// Aggregates the report layer computes over a result table: label counts,
// per-video counts, distinct comments, and word frequencies.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use commentpulse_common::{ResultTable, SentimentLabel, VideoId};

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

const MIN_WORD_CHARS: usize = 3;

const STOPWORDS: &[&str] = &[
    "about", "after", "again", "all", "also", "and", "any", "are", "because", "been", "before",
    "being", "but", "can", "could", "did", "does", "doing", "for", "from", "had", "has", "have",
    "having", "her", "here", "hers", "him", "his", "how", "into", "its", "just", "more", "most",
    "not", "now", "off", "once", "only", "other", "our", "ours", "out", "over", "own", "same",
    "she", "should", "some", "such", "than", "that", "the", "their", "theirs", "them", "then",
    "there", "these", "they", "this", "those", "through", "too", "under", "until", "very", "was",
    "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
    "would", "you", "your", "yours",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl LabelCounts {
    pub fn from_table(table: &ResultTable) -> Self {
        let mut counts = Self::default();
        for record in table {
            match record.label {
                SentimentLabel::Positive => counts.positive += 1,
                SentimentLabel::Negative => counts.negative += 1,
                SentimentLabel::Neutral => counts.neutral += 1,
            }
        }
        counts
    }

    pub fn get(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Share of `label` in percent; 0.0 for an empty table.
    pub fn percent(&self, label: SentimentLabel) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(label) as f64 * 100.0 / total as f64,
        }
    }
}

/// Rows per video, ordered by each video's first row.
pub fn per_video_counts(table: &ResultTable) -> Vec<(VideoId, usize)> {
    let mut order: Vec<(VideoId, usize)> = Vec::new();
    let mut index: HashMap<&VideoId, usize> = HashMap::new();
    for record in table {
        match index.get(&record.source_id) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(&record.source_id, order.len());
                order.push((record.source_id.clone(), 1));
            }
        }
    }
    order
}

/// Number of distinct comment texts.
pub fn unique_texts(table: &ResultTable) -> usize {
    table
        .iter()
        .map(|r| r.text.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// The `n` most frequent words across all comments, lowercased, stopwords and
/// short or purely numeric tokens dropped. Ties are broken alphabetically.
pub fn top_words(table: &ResultTable, n: usize) -> Vec<(String, usize)> {
    let mut freq: HashMap<String, usize> = HashMap::new();
    for record in table {
        for m in WORD_RE.find_iter(&record.text) {
            let word = m.as_str().to_lowercase();
            if word.chars().count() < MIN_WORD_CHARS
                || word.chars().all(|c| c.is_ascii_digit())
                || STOPWORDS.contains(&word.as_str())
            {
                continue;
            }
            *freq.entry(word).or_insert(0) += 1;
        }
    }

    let mut words: Vec<(String, usize)> = freq.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(n);
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use commentpulse_common::CommentRecord;

    fn row(id: &str, text: &str, label: SentimentLabel) -> CommentRecord {
        CommentRecord {
            source_id: VideoId::parse(id).unwrap(),
            text: text.into(),
            label,
        }
    }

    fn sample() -> ResultTable {
        ResultTable::from(vec![
            row("Ugfjq0rDz8g", "Great song, great voice", SentimentLabel::Positive),
            row("Ugfjq0rDz8g", "boring", SentimentLabel::Negative),
            row("Lr1OHmBpwjw", "Great song", SentimentLabel::Positive),
            row("Ugfjq0rDz8g", "boring", SentimentLabel::Negative),
            row("Lr1OHmBpwjw", "the 2024 version is on the radio", SentimentLabel::Neutral),
        ])
    }

    #[test]
    fn label_counts_and_percentages() {
        let counts = LabelCounts::from_table(&sample());
        assert_eq!(counts.positive, 2);
        assert_eq!(counts.negative, 2);
        assert_eq!(counts.neutral, 1);
        assert_eq!(counts.total(), 5);
        assert!((counts.percent(SentimentLabel::Neutral) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn empty_table_percent_is_zero() {
        let counts = LabelCounts::from_table(&ResultTable::new());
        assert_eq!(counts.percent(SentimentLabel::Positive), 0.0);
    }

    #[test]
    fn per_video_in_first_seen_order() {
        let counts = per_video_counts(&sample());
        let flat: Vec<(&str, usize)> = counts.iter().map(|(id, n)| (id.as_str(), *n)).collect();
        assert_eq!(flat, vec![("Ugfjq0rDz8g", 3), ("Lr1OHmBpwjw", 2)]);
    }

    #[test]
    fn distinct_texts() {
        assert_eq!(unique_texts(&sample()), 4);
    }

    #[test]
    fn word_frequencies() {
        let words = top_words(&sample(), 3);
        assert_eq!(
            words,
            vec![
                ("great".to_string(), 3),
                ("boring".to_string(), 2),
                ("song".to_string(), 2),
            ]
        );
    }

    #[test]
    fn stopwords_numbers_and_short_words_are_dropped() {
        let words: Vec<String> = top_words(&sample(), 100).into_iter().map(|(w, _)| w).collect();
        for dropped in ["the", "is", "on", "2024"] {
            assert!(!words.contains(&dropped.to_string()), "{dropped} should be dropped");
        }
        assert!(words.contains(&"radio".to_string()));
    }
}
