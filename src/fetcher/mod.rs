pub mod news_api;
pub mod traits;
pub mod yahoo;

pub use news_api::NewsApiFetcher;
pub use traits::{NewsSource, PriceSource, RatingSource};
pub use yahoo::YahooFetcher;

use crate::model::FetchError;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) MarketDigest/0.1";

fn client_builder() -> ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(10))
}

fn build_client() -> Result<Client, FetchError> {
    Ok(client_builder().build()?)
}

/// Sends a GET and turns non-success statuses into `FetchError::Status`.
async fn get_checked(client: &Client, url: &str) -> Result<Response, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: redact(url),
        });
    }
    Ok(response)
}

/// Drops the query string so API keys never reach the logs.
fn redact(url: &str) -> String {
    url.split('?').next().unwrap_or(url).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_strips_query() {
        assert_eq!(
            redact("https://newsapi.org/v2/everything?q=AAPL&apiKey=secret"),
            "https://newsapi.org/v2/everything"
        );
        assert_eq!(redact("https://example.com/x"), "https://example.com/x");
    }
}
