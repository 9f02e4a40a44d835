use crate::fetcher::{client_builder, get_checked, PriceSource, RatingSource};
use crate::model::{FetchError, PricePoint, PriceSeries};
use crate::utils::timestamp_to_datetime;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URLS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const FINANCE_REFERER: &str = "https://finance.yahoo.com/";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryData,
}

#[derive(Debug, Deserialize)]
struct SummaryData {
    #[serde(default)]
    result: Option<Vec<SummaryResult>>,
    #[serde(default)]
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    #[serde(rename = "financialData", default)]
    financial_data: Option<FinancialData>,
}

#[derive(Debug, Deserialize)]
struct FinancialData {
    #[serde(rename = "recommendationKey", default)]
    recommendation_key: Option<String>,
}

/// Daily price history and analyst ratings from Yahoo Finance.
///
/// quoteSummary needs a session cookie plus a crumb tied to it. The cookie
/// lives in the client's jar; the crumb is fetched once and reused until
/// Yahoo rejects it.
pub struct YahooFetcher {
    client: Client,
    crumb: Mutex<Option<String>>,
}

impl YahooFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(FINANCE_REFERER));
        let client = client_builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            crumb: Mutex::new(None),
        })
    }

    /// Cached crumb, or a fresh cookie/crumb handshake. The lock keeps
    /// concurrent symbols from racing each other into the handshake.
    async fn crumb(&self) -> Result<String, FetchError> {
        let mut cached = self.crumb.lock().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }
        let crumb = self.fetch_crumb().await?;
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    async fn fetch_crumb(&self) -> Result<String, FetchError> {
        // fc.yahoo.com answers 404 but still sets the session cookie.
        self.client.get(COOKIE_URL).send().await?;

        for endpoint in CRUMB_URLS {
            match get_checked(&self.client, endpoint).await {
                Ok(response) => {
                    let body = response.text().await?;
                    if let Some(crumb) = parse_crumb(&body) {
                        info!("Obtained Yahoo crumb");
                        return Ok(crumb);
                    }
                    warn!("Unusable crumb response from {}", endpoint);
                }
                Err(e) => warn!("Crumb request failed: {}", e),
            }
        }
        Err(FetchError::Missing("crumb"))
    }
}

/// A crumb is a short token; HTML pages and rate-limit notices are rejected.
fn parse_crumb(body: &str) -> Option<String> {
    let crumb = body.trim();
    if crumb.is_empty()
        || crumb.len() >= 100
        || crumb.contains(char::is_whitespace)
        || crumb.contains('<')
    {
        return None;
    }
    Some(crumb.to_string())
}

fn summary_url(symbol: &str, crumb: &str) -> Result<Url, FetchError> {
    Url::parse_with_params(
        &format!("{}/{}", SUMMARY_URL, symbol),
        &[("modules", "financialData"), ("crumb", crumb)],
    )
    .map_err(|e| FetchError::Decode(e.to_string()))
}

/// Builds the series from a chart payload. Sessions without open or close are skipped.
fn parse_chart(body: &str) -> Result<PriceSeries, FetchError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    if let Some(err) = response.chart.error {
        return Err(FetchError::Decode(format!("{}: {}", err.code, err.description)));
    }
    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::default());
    };
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(PriceSeries::default());
    };

    let mut skipped = 0;
    let mut points = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let (Some(timestamp), Some(open), Some(close)) =
            (timestamp_to_datetime(ts), value_at(&quote.open, i), value_at(&quote.close, i))
        else {
            skipped += 1;
            continue;
        };
        points.push(PricePoint {
            timestamp,
            open,
            close,
            high: value_at(&quote.high, i),
            low: value_at(&quote.low, i),
            volume: quote.volume.get(i).copied().flatten(),
        });
    }
    if skipped > 0 {
        warn!("Skipped {} incomplete sessions", skipped);
    }
    Ok(PriceSeries::new(points))
}

fn value_at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}

fn parse_recommendation(body: &str) -> Result<Option<String>, FetchError> {
    let response: SummaryResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    if let Some(err) = response.quote_summary.error {
        return Err(FetchError::Decode(format!("{}: {}", err.code, err.description)));
    }
    Ok(response
        .quote_summary
        .result
        .and_then(|r| r.into_iter().next())
        .and_then(|r| r.financial_data)
        .and_then(|f| f.recommendation_key))
}

#[async_trait::async_trait]
impl PriceSource for YahooFetcher {
    async fn price_history(&self, symbol: &str, range: &str) -> Result<PriceSeries, FetchError> {
        let url = format!("{}/{}?range={}&interval=1d", CHART_URL, symbol, range);
        let body = get_checked(&self.client, &url).await?.text().await?;
        let series = parse_chart(&body)?;
        info!("Fetched {} sessions for {} ({})", series.len(), symbol, range);
        Ok(series)
    }
}

#[async_trait::async_trait]
impl RatingSource for YahooFetcher {
    async fn raw_rating(&self, symbol: &str) -> Result<Option<String>, FetchError> {
        let crumb = self.crumb().await?;
        let url = summary_url(symbol, &crumb)?;
        let response = match get_checked(&self.client, url.as_str()).await {
            Ok(response) => response,
            Err(e @ FetchError::Status { status: 401, .. }) => {
                // Stale crumb; the next request repeats the handshake.
                self.crumb.lock().await.take();
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        parse_recommendation(&response.text().await?)
    }
}
