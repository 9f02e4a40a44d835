use crate::fetcher::{build_client, get_checked, NewsSource};
use crate::model::FetchError;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    title: Option<String>,
}

pub struct NewsApiFetcher {
    client: Client,
    api_key: String,
}

impl NewsApiFetcher {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client()?,
            api_key,
        })
    }

    fn build_url(&self, symbol: &str) -> String {
        format!("{}?q={}&apiKey={}", NEWS_API_URL, symbol, self.api_key)
    }
}

/// Titles of the first `limit` articles, skipping untitled ones.
fn extract_titles(body: &str, limit: usize) -> Result<Vec<String>, FetchError> {
    let response: NewsApiResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(response
        .articles
        .into_iter()
        .take(limit)
        .filter_map(|a| a.title)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

#[async_trait::async_trait]
impl NewsSource for NewsApiFetcher {
    async fn headlines(&self, symbol: &str, limit: usize) -> Result<Vec<String>, FetchError> {
        let url = self.build_url(symbol);
        let body = get_checked(&self.client, &url).await?.text().await?;
        let titles = extract_titles(&body, limit)?;
        info!("Fetched {} headlines for {}", titles.len(), symbol);
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "status": "ok",
        "totalResults": 4,
        "articles": [
            {"title": "Apple unveils new chip", "url": "https://a"},
            {"title": null},
            {"title": "  Record quarter for services  "},
            {"title": "Fourth story"}
        ]
    }"#;

    #[test]
    fn takes_titles_of_first_articles() {
        let titles = extract_titles(BODY, 3).unwrap();
        assert_eq!(titles, vec!["Apple unveils new chip", "Record quarter for services"]);
    }

    #[test]
    fn missing_articles_is_empty() {
        assert!(extract_titles(r#"{"status":"ok"}"#, 3).unwrap().is_empty());
    }

    #[test]
    fn garbage_is_decode_error() {
        assert!(matches!(extract_titles("<html>", 3), Err(FetchError::Decode(_))));
    }

    #[test]
    fn url_carries_symbol_and_key() {
        let fetcher = NewsApiFetcher::new("k123".into()).unwrap();
        assert_eq!(
            fetcher.build_url("NVDA"),
            "https://newsapi.org/v2/everything?q=NVDA&apiKey=k123"
        );
    }
}
