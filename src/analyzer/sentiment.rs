use crate::analyzer::lexicon::Lexicon;
use crate::model::{AnalysisError, SentimentBias, SentimentSignal};

/// Normalization constant for the compound score, as in VADER.
const ALPHA: f64 = 15.0;
/// A negated word keeps part of its strength with the opposite sign.
const NEGATION_SCALAR: f64 = -0.74;

/// Lexicon-based headline scorer.
pub struct SentimentAnalyzer {
    lexicon: Lexicon,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::new())
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Compound polarity of one headline in [-1, 1]; 0.0 when nothing scores.
    pub fn compound(&self, text: &str) -> f64 {
        let mut total = 0.0;
        let mut negate = false;
        let mut multiplier = 1.0;

        for token in tokenize(text) {
            if self.lexicon.is_negation(&token) {
                negate = true;
                continue;
            }
            if let Some(m) = self.lexicon.intensifier(&token) {
                multiplier = m;
                continue;
            }
            if let Some(mut valence) = self.lexicon.valence(&token) {
                if negate {
                    valence *= NEGATION_SCALAR;
                    negate = false;
                }
                total += valence * multiplier;
                multiplier = 1.0;
            }
        }

        normalize(total)
    }

    /// Mean compound score across headlines, reduced to `Up` or `Down`.
    pub fn aggregate<S: AsRef<str>>(&self, headlines: &[S]) -> Result<SentimentSignal, AnalysisError> {
        let scores: Vec<f64> = headlines.iter().map(|h| self.compound(h.as_ref())).collect();
        bias_from_scores(&scores)
    }
}

/// `Up` only for a strictly positive mean; a zero mean is `Down`.
pub fn bias_from_scores(scores: &[f64]) -> Result<SentimentSignal, AnalysisError> {
    if scores.is_empty() {
        return Err(AnalysisError::InvalidInput("headline list is empty"));
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let label = if mean > 0.0 {
        SentimentBias::Up
    } else {
        SentimentBias::Down
    };
    Ok(SentimentSignal {
        label,
        mean_compound: mean,
    })
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'').to_lowercase())
        .filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_headlines_are_up() {
        let analyzer = SentimentAnalyzer::new();
        let signal = analyzer
            .aggregate(&["Company beats expectations", "Record profits announced"])
            .unwrap();
        assert_eq!(signal.label, SentimentBias::Up);
        assert!(signal.mean_compound > 0.0);
    }

    #[test]
    fn negative_headlines_are_down() {
        let analyzer = SentimentAnalyzer::new();
        let signal = analyzer
            .aggregate(&["Shares plunge after profit warning", "Regulators open fraud probe"])
            .unwrap();
        assert_eq!(signal.label, SentimentBias::Down);
        assert!(signal.mean_compound < 0.0);
    }

    #[test]
    fn balanced_headlines_are_down() {
        let analyzer = SentimentAnalyzer::new();
        let signal = analyzer.aggregate(&["Stock surges", "Stock plunges"]).unwrap();
        assert_eq!(signal.mean_compound, 0.0);
        assert_eq!(signal.label, SentimentBias::Down);
    }

    #[test]
    fn zero_mean_is_down() {
        assert_eq!(bias_from_scores(&[0.0]).unwrap().label, SentimentBias::Down);
        assert_eq!(bias_from_scores(&[0.4, -0.4]).unwrap().label, SentimentBias::Down);
        assert_eq!(bias_from_scores(&[0.4, -0.3]).unwrap().label, SentimentBias::Up);
    }

    #[test]
    fn neutral_headline_scores_zero() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.compound("Company schedules annual meeting"), 0.0);
        assert_eq!(
            analyzer.aggregate(&["Company schedules annual meeting"]).unwrap().label,
            SentimentBias::Down
        );
    }

    #[test]
    fn empty_list_is_invalid_input() {
        let analyzer = SentimentAnalyzer::new();
        let empty: [&str; 0] = [];
        assert_eq!(
            analyzer.aggregate(&empty),
            Err(AnalysisError::InvalidInput("headline list is empty"))
        );
    }

    #[test]
    fn negation_flips_polarity() {
        let analyzer = SentimentAnalyzer::new();
        assert!(analyzer.compound("Earnings growth") > 0.0);
        assert!(analyzer.compound("No earnings growth") < 0.0);
    }

    #[test]
    fn intensifier_strengthens_score() {
        let analyzer = SentimentAnalyzer::new();
        let plain = analyzer.compound("Outlook is strong");
        let boosted = analyzer.compound("Outlook is very strong");
        assert!(boosted > plain);
    }

    #[test]
    fn compound_stays_in_range() {
        let analyzer = SentimentAnalyzer::new();
        let gushing = "great best excellent record profit surge soar rally win success ".repeat(20);
        let grim = "fraud crash bankruptcy crisis worst failure scandal ".repeat(20);
        let up = analyzer.compound(&gushing);
        let down = analyzer.compound(&grim);
        assert!(up > 0.99 && up <= 1.0);
        assert!(down < -0.99 && down >= -1.0);
    }

    #[test]
    fn punctuation_and_case_are_ignored() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.compound("RECORD profits!"), analyzer.compound("record profits"));
    }
}
