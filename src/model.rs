// Core structs: PricePoint, PriceSeries, labels, SymbolReport
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub close: f64,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<u64>,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, open: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            close,
            high: None,
            low: None,
            volume: None,
        }
    }
}

/// Session prices for one symbol, ascending by timestamp with no duplicate timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Sorts the points by timestamp and keeps the first point seen for each timestamp.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        points.dedup_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingLabel {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    NoAnalysisAvailable,
    /// The rating source failed for this symbol.
    AnalysisError,
    /// Upstream vocabulary we have no mapping for, rendered as-is.
    Unrecognized(String),
}

impl RatingLabel {
    pub fn as_str(&self) -> &str {
        match self {
            RatingLabel::StrongBuy => "Strong Buy",
            RatingLabel::Buy => "Buy",
            RatingLabel::Hold => "Hold",
            RatingLabel::Sell => "Sell",
            RatingLabel::StrongSell => "Strong Sell",
            RatingLabel::NoAnalysisAvailable => "No Analysis Available",
            RatingLabel::AnalysisError => "Analysis Error",
            RatingLabel::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RatingLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TechnicalBias {
    Bullish,
    Bearish,
    Neutral,
    #[serde(rename = "No Data")]
    NoData,
    Error,
}

impl TechnicalBias {
    pub fn as_str(&self) -> &'static str {
        match self {
            TechnicalBias::Bullish => "Bullish",
            TechnicalBias::Bearish => "Bearish",
            TechnicalBias::Neutral => "Neutral",
            TechnicalBias::NoData => "No Data",
            TechnicalBias::Error => "Error",
        }
    }
}

impl fmt::Display for TechnicalBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentBias {
    Up,
    Down,
}

impl fmt::Display for SentimentBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentBias::Up => f.write_str("Up"),
            SentimentBias::Down => f.write_str("Down"),
        }
    }
}

/// Numbers behind a technical label, shaped by the strategy that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum TechnicalValues {
    EmaCrossover {
        close: f64,
        ema_short: f64,
        ema_long: f64,
        short_span: usize,
        long_span: usize,
    },
    OpenClose {
        open: f64,
        reference_close: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TechnicalSignal {
    pub label: TechnicalBias,
    /// `None` for the `No Data` and `Error` sentinels.
    pub values: Option<TechnicalValues>,
}

impl TechnicalSignal {
    pub fn no_data() -> Self {
        Self {
            label: TechnicalBias::NoData,
            values: None,
        }
    }

    pub fn error() -> Self {
        Self {
            label: TechnicalBias::Error,
            values: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentSignal {
    pub label: SentimentBias,
    pub mean_compound: f64,
}

/// Everything the report shows for one watchlist symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolReport {
    pub symbol: String,
    pub rating: Option<RatingLabel>,
    pub technical: Option<TechnicalSignal>,
    pub sentiment: Option<SentimentSignal>,
    pub headlines: Vec<String>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("response missing {0}")]
    Missing(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("cannot build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error("cannot write report: {0}")]
    Output(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn series_is_sorted_and_deduplicated() {
        let series = PriceSeries::new(vec![
            PricePoint::new(day(3), 3.0, 3.0),
            PricePoint::new(day(1), 1.0, 1.0),
            PricePoint::new(day(3), 9.0, 9.0),
            PricePoint::new(day(2), 2.0, 2.0),
        ]);

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.latest().map(|p| p.timestamp), Some(day(3)));
    }

    #[test]
    fn labels_serialize_as_display_text() {
        let report = SymbolReport {
            symbol: "AAPL".into(),
            rating: Some(RatingLabel::StrongBuy),
            technical: Some(TechnicalSignal::no_data()),
            sentiment: Some(SentimentSignal {
                label: SentimentBias::Down,
                mean_compound: 0.0,
            }),
            headlines: vec![],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rating"], "Strong Buy");
        assert_eq!(json["technical"]["label"], "No Data");
        assert!(json["technical"]["values"].is_null());
        assert_eq!(json["sentiment"]["label"], "Down");
    }

    #[test]
    fn technical_values_carry_strategy_tag() {
        let values = TechnicalValues::OpenClose {
            open: 150.0,
            reference_close: 148.0,
        };
        let json = serde_json::to_value(values).unwrap();
        assert_eq!(json["strategy"], "open_close");
        assert_eq!(json["open"], 150.0);
    }
}
