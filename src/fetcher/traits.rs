use crate::model::{FetchError, PriceSeries};

#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    /// Up to `limit` headline titles, most recent first.
    async fn headlines(&self, symbol: &str, limit: usize) -> Result<Vec<String>, FetchError>;
}

#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    /// Daily sessions covering `range` (e.g. `"1y"`, `"5d"`).
    async fn price_history(&self, symbol: &str, range: &str) -> Result<PriceSeries, FetchError>;
}

#[async_trait::async_trait]
pub trait RatingSource: Send + Sync {
    /// Raw analyst recommendation token, `None` when the source has none.
    async fn raw_rating(&self, symbol: &str) -> Result<Option<String>, FetchError>;
}
