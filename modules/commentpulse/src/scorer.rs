// Sentiment scoring: VADER behind the SentimentScorer seam, plus the
// threshold rule that turns a compound score into a label.

use commentpulse_common::{PolarityScores, SentimentLabel};
use vader_sentiment::SentimentIntensityAnalyzer;

use crate::traits::SentimentScorer;

/// Lexicon scorer backed by the `vader_sentiment` crate.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Full VADER output for `text`.
    ///
    /// Compound is zero when no word carries sentiment. The crate otherwise
    /// lets `!` and `?` emphasis drag such text below zero.
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        let (pos, neg) = (get("pos"), get("neg"));
        let compound = if pos == 0.0 && neg == 0.0 {
            0.0
        } else {
            get("compound")
        };
        PolarityScores {
            compound,
            pos,
            neu: get("neu"),
            neg,
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }
}

/// Label a single text.
pub fn classify(scorer: &dyn SentimentScorer, text: &str) -> SentimentLabel {
    SentimentLabel::from_compound(scorer.score(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearly_positive_text() {
        let scorer = VaderScorer::new();
        assert_eq!(
            classify(&scorer, "I love this video, it is great!"),
            SentimentLabel::Positive
        );
    }

    #[test]
    fn clearly_negative_text() {
        let scorer = VaderScorer::new();
        assert_eq!(
            classify(&scorer, "This is terrible and I hate it."),
            SentimentLabel::Negative
        );
    }

    #[test]
    fn empty_text_is_neutral() {
        let scorer = VaderScorer::new();
        assert_eq!(classify(&scorer, ""), SentimentLabel::Neutral);
    }

    #[test]
    fn punctuation_alone_does_not_make_text_negative() {
        let scorer = VaderScorer::new();
        for text in [
            "first!",
            "The video is twelve minutes long!",
            "The video is twelve minutes long",
            "Who is the singer??",
            "watching from Jakarta!!",
            "!!!",
        ] {
            let scores = scorer.polarity_scores(text);
            assert_eq!(scores.compound, 0.0, "{text}: {scores:?}");
            assert_eq!(scores.pos, 0.0, "{text}: {scores:?}");
            assert_eq!(scores.neg, 0.0, "{text}: {scores:?}");
            assert_eq!(classify(&scorer, text), SentimentLabel::Neutral, "{text}");
        }
    }

    #[test]
    fn emphasis_still_applies_to_sentiment_words() {
        let scorer = VaderScorer::new();
        let plain = scorer.polarity_scores("this is great");
        let loud = scorer.polarity_scores("this is great!!!");
        assert!(plain.compound > 0.0);
        assert!(loud.compound > plain.compound, "{plain:?} vs {loud:?}");
    }

    #[test]
    fn matches_reference_lexicon_scores() {
        let scorer = VaderScorer::new();
        let scores = scorer.polarity_scores("VADER is smart, handsome, and funny.");
        assert!((scores.compound - 0.8316).abs() < 1e-3, "{scores:?}");
        assert_eq!(scores.neg, 0.0);
    }

    #[test]
    fn compound_stays_in_range() {
        let scorer = VaderScorer::new();
        for text in [
            "GOOD GOOD GOOD!!! best ever :)",
            "worst, awful, horrible, disgusting!!!",
            "the video is twelve minutes long",
        ] {
            let scores = scorer.polarity_scores(text);
            assert!((-1.0..=1.0).contains(&scores.compound), "{text}: {scores:?}");
        }
    }
}
