use crate::analyzer::Analyzer;
use crate::config::ReportConfig;
use crate::fetcher::{NewsSource, PriceSource, RatingSource};
use crate::model::{AnalysisError, RatingLabel, SymbolReport};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds one `SymbolReport` per watchlist symbol from the collaborators' data.
pub struct ReportAssembler {
    config: ReportConfig,
    analyzer: Arc<dyn Analyzer>,
    news: Arc<dyn NewsSource>,
    prices: Arc<dyn PriceSource>,
    ratings: Arc<dyn RatingSource>,
}

impl ReportAssembler {
    pub fn new(
        config: ReportConfig,
        analyzer: Arc<dyn Analyzer>,
        news: Arc<dyn NewsSource>,
        prices: Arc<dyn PriceSource>,
        ratings: Arc<dyn RatingSource>,
    ) -> Self {
        Self {
            config,
            analyzer,
            news,
            prices,
            ratings,
        }
    }

    /// Reports in watchlist order. Fetch failures degrade a single symbol's
    /// report; only an analyzer contract violation fails the run.
    pub async fn assemble(&self) -> Result<Vec<SymbolReport>, AnalysisError> {
        info!("Symbols to process: {}", self.config.watchlist.len());
        let tasks: Vec<_> = self
            .config
            .watchlist
            .iter()
            .map(|symbol| self.process_symbol(symbol))
            .collect();
        join_all(tasks).await.into_iter().collect()
    }

    /// Rating, then technical bias, then headlines and sentiment.
    async fn process_symbol(&self, symbol: &str) -> Result<SymbolReport, AnalysisError> {
        info!("Processing symbol: {}", symbol);
        let include = self.config.include;

        let rating = if include.rating {
            Some(match self.ratings.raw_rating(symbol).await {
                Ok(raw) => self.analyzer.rating(raw.as_deref()),
                Err(e) => {
                    warn!("Rating fetch failed for {}: {}", symbol, e);
                    RatingLabel::AnalysisError
                }
            })
        } else {
            None
        };

        let technical = if include.technical {
            let fetched = self
                .prices
                .price_history(symbol, self.config.price_range())
                .await;
            let signal = self.analyzer.technical(fetched);
            info!("{} technical bias: {}", symbol, signal.label);
            Some(signal)
        } else {
            None
        };

        let headlines = if self.config.headline_limit > 0 {
            match self.news.headlines(symbol, self.config.headline_limit).await {
                Ok(mut h) => {
                    h.truncate(self.config.headline_limit);
                    h
                }
                Err(e) => {
                    warn!("News fetch failed for {}: {}", symbol, e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let sentiment = if include.sentiment && !headlines.is_empty() {
            let signal = self.analyzer.sentiment(&headlines)?;
            info!(
                "{} sentiment: {} (mean {:.3})",
                symbol, signal.label, signal.mean_compound
            );
            Some(signal)
        } else {
            if include.sentiment {
                info!("No headlines for {}, skipping sentiment", symbol);
            }
            None
        };

        Ok(SymbolReport {
            symbol: symbol.to_string(),
            rating,
            technical,
            sentiment,
            headlines,
        })
    }
}
