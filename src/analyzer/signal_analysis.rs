use crate::analyzer::lexicon::Lexicon;
use crate::analyzer::sentiment::SentimentAnalyzer;
use crate::analyzer::technical::{TechnicalAnalyzer, TechnicalStrategy};
use crate::model::{
    AnalysisError, FetchError, PriceSeries, RatingLabel, SentimentSignal, TechnicalSignal,
};
use crate::normalizer::normalize_rating;

/// Trait defining the per-symbol signal derivations.
pub trait Analyzer: Send + Sync {
    fn rating(&self, raw: Option<&str>) -> RatingLabel;
    /// Technical label for fetched prices; a failed fetch yields the `Error` sentinel.
    fn technical(&self, fetched: Result<PriceSeries, FetchError>) -> TechnicalSignal;
    /// Fails with `InvalidInput` on an empty headline list.
    fn sentiment(&self, headlines: &[String]) -> Result<SentimentSignal, AnalysisError>;
}

/// Implementation of the signal analyzer.
pub struct AnalyzerImpl {
    technical: TechnicalAnalyzer,
    sentiment: SentimentAnalyzer,
}

impl AnalyzerImpl {
    pub fn new(strategy: TechnicalStrategy) -> Self {
        Self::with_lexicon(strategy, Lexicon::new())
    }

    pub fn with_lexicon(strategy: TechnicalStrategy, lexicon: Lexicon) -> Self {
        Self {
            technical: TechnicalAnalyzer::new(strategy),
            sentiment: SentimentAnalyzer::with_lexicon(lexicon),
        }
    }

    pub fn strategy(&self) -> TechnicalStrategy {
        self.technical.strategy()
    }
}

impl Default for AnalyzerImpl {
    fn default() -> Self {
        Self::new(TechnicalStrategy::default())
    }
}

impl Analyzer for AnalyzerImpl {
    fn rating(&self, raw: Option<&str>) -> RatingLabel {
        normalize_rating(raw)
    }

    fn technical(&self, fetched: Result<PriceSeries, FetchError>) -> TechnicalSignal {
        self.technical.evaluate_fetched(fetched)
    }

    fn sentiment(&self, headlines: &[String]) -> Result<SentimentSignal, AnalysisError> {
        self.sentiment.aggregate(headlines)
    }
}
