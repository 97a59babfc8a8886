use vader_sentiment::SentimentIntensityAnalyzer;

/// Three-way polarity bucket. The ±0.05 boundaries are what the reporting
/// surfaces quote as percentages, so they are fixed here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Neutral,
    Negative,
}

impl Polarity {
    pub fn classify(compound: f64) -> Self {
        if compound > 0.05 {
            Polarity::Positive
        } else if compound < -0.05 {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

/// Lexicon-based compound polarity scoring over free journal text.
///
/// The analyzer is loaded once and shared; scoring is read-only.
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound polarity in [-1, 1]. Empty or whitespace-only text scores 0.
    pub fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }

    pub fn classify(&self, text: &str) -> Polarity {
        Polarity::classify(self.score(text))
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries_are_exact() {
        assert_eq!(Polarity::classify(0.2), Polarity::Positive);
        assert_eq!(Polarity::classify(0.0), Polarity::Neutral);
        assert_eq!(Polarity::classify(-0.2), Polarity::Negative);
        // The boundary values themselves are neutral.
        assert_eq!(Polarity::classify(0.05), Polarity::Neutral);
        assert_eq!(Polarity::classify(-0.05), Polarity::Neutral);
    }

    #[test]
    fn empty_text_scores_zero() {
        let scorer = SentimentScorer::new();
        assert_eq!(scorer.score(""), 0.0);
        assert_eq!(scorer.score("   \n"), 0.0);
        assert_eq!(scorer.classify(""), Polarity::Neutral);
    }

    #[test]
    fn scores_stay_bounded() {
        let scorer = SentimentScorer::new();
        for text in [
            "I love this, today was absolutely wonderful!",
            "everything is terrible and I hate it",
            "went to the store",
        ] {
            let s = scorer.score(text);
            assert!((-1.0..=1.0).contains(&s), "{text} scored {s}");
        }
    }

    #[test]
    fn valence_points_the_right_way() {
        let scorer = SentimentScorer::new();
        assert_eq!(
            scorer.classify("I love this, today was absolutely wonderful!"),
            Polarity::Positive
        );
        assert_eq!(
            scorer.classify("everything is terrible and I hate it"),
            Polarity::Negative
        );
    }
}
