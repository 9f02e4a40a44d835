use crate::model::{FetchError, PriceSeries, TechnicalBias, TechnicalSignal, TechnicalValues};
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_SHORT_SPAN: usize = 50;
pub const DEFAULT_LONG_SPAN: usize = 200;

/// How the technical label is derived from a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TechnicalStrategy {
    /// Latest close against a short and a long EMA.
    EmaCrossover {
        #[serde(default = "default_short_span")]
        short_span: usize,
        #[serde(default = "default_long_span")]
        long_span: usize,
    },
    /// Latest open against the reference close.
    OpenClose,
}

fn default_short_span() -> usize {
    DEFAULT_SHORT_SPAN
}

fn default_long_span() -> usize {
    DEFAULT_LONG_SPAN
}

impl Default for TechnicalStrategy {
    fn default() -> Self {
        TechnicalStrategy::EmaCrossover {
            short_span: DEFAULT_SHORT_SPAN,
            long_span: DEFAULT_LONG_SPAN,
        }
    }
}

impl TechnicalStrategy {
    /// Yahoo chart range that gives the strategy enough sessions to work with.
    pub fn default_range(&self) -> &'static str {
        match self {
            TechnicalStrategy::EmaCrossover { .. } => "1y",
            TechnicalStrategy::OpenClose => "5d",
        }
    }
}

/// Exponential moving average with weight `2 / (span + 1)`, seeded with the first close.
///
/// Written as `prev + α·(close − prev)`, which equals `α·close + (1−α)·prev`
/// and keeps a constant series exactly constant.
pub fn ema(closes: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span.max(1) as f64 + 1.0);
    let mut out = Vec::with_capacity(closes.len());
    let mut prev = match closes.first() {
        Some(&first) => first,
        None => return out,
    };
    out.push(prev);
    for &close in &closes[1..] {
        prev += alpha * (close - prev);
        out.push(prev);
    }
    out
}

pub struct TechnicalAnalyzer {
    strategy: TechnicalStrategy,
}

impl TechnicalAnalyzer {
    pub fn new(strategy: TechnicalStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> TechnicalStrategy {
        self.strategy
    }

    pub fn evaluate(&self, series: &PriceSeries) -> TechnicalSignal {
        match self.strategy {
            TechnicalStrategy::EmaCrossover {
                short_span,
                long_span,
            } => ema_crossover(series, short_span, long_span),
            TechnicalStrategy::OpenClose => open_close(series),
        }
    }

    /// Same as [`evaluate`](Self::evaluate), but a failed fetch becomes the `Error` sentinel.
    pub fn evaluate_fetched(&self, fetched: Result<PriceSeries, FetchError>) -> TechnicalSignal {
        match fetched {
            Ok(series) => self.evaluate(&series),
            Err(e) => {
                warn!("Price history unavailable: {}", e);
                TechnicalSignal::error()
            }
        }
    }
}

pub fn ema_crossover(series: &PriceSeries, short_span: usize, long_span: usize) -> TechnicalSignal {
    let closes = series.closes();
    let short = ema(&closes, short_span);
    let long = ema(&closes, long_span);
    let (Some(&close), Some(&ema_short), Some(&ema_long)) = (closes.last(), short.last(), long.last())
    else {
        return TechnicalSignal::no_data();
    };

    let label = if close > ema_short && ema_short > ema_long {
        TechnicalBias::Bullish
    } else if close < ema_short && ema_short < ema_long {
        TechnicalBias::Bearish
    } else {
        TechnicalBias::Neutral
    };

    TechnicalSignal {
        label,
        values: Some(TechnicalValues::EmaCrossover {
            close,
            ema_short,
            ema_long,
            short_span,
            long_span,
        }),
    }
}

/// Compares the latest open with the previous session's close.
///
/// A single-session series is compared with its own close. Daily downloads
/// that only return today's row therefore measure the intraday move rather
/// than a day-over-day change.
pub fn open_close(series: &PriceSeries) -> TechnicalSignal {
    let points = series.points();
    let Some(today) = points.last() else {
        return TechnicalSignal::no_data();
    };
    let reference_close = match points.len() {
        1 => today.close,
        n => points[n - 2].close,
    };

    let open = today.open;
    let label = if open > reference_close {
        TechnicalBias::Bullish
    } else if open < reference_close {
        TechnicalBias::Bearish
    } else {
        TechnicalBias::Neutral
    };

    TechnicalSignal {
        label,
        values: Some(TechnicalValues::OpenClose {
            open,
            reference_close,
        }),
    }
}
