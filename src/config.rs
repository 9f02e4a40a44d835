use crate::analyzer::TechnicalStrategy;
use crate::model::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Sender account; also the login user.
    #[serde(default)]
    pub from: String,
    /// Recipient; defaults to `from`.
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            from: String::new(),
            to: None,
            password: String::new(),
            subject: default_subject(),
        }
    }
}

impl EmailConfig {
    pub fn recipient(&self) -> &str {
        self.to.as_deref().unwrap_or(&self.from)
    }
}

/// Which analyzers contribute to each symbol's report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IncludeConfig {
    #[serde(default = "enabled")]
    pub rating: bool,
    #[serde(default = "enabled")]
    pub technical: bool,
    #[serde(default = "enabled")]
    pub sentiment: bool,
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self {
            rating: true,
            technical: true,
            sentiment: true,
        }
    }
}

/// Settings the report assembler needs for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    pub watchlist: Vec<String>,
    #[serde(default = "default_headline_limit")]
    pub headline_limit: usize,
    #[serde(default)]
    pub technical_strategy: TechnicalStrategy,
    /// Yahoo chart range; defaults per strategy.
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub include: IncludeConfig,
}

impl ReportConfig {
    pub fn price_range(&self) -> &str {
        self.price_range
            .as_deref()
            .unwrap_or_else(|| self.technical_strategy.default_range())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    pub report: ReportConfig,
    #[serde(default)]
    pub news_api_key: String,
    #[serde(default)]
    pub email: EmailConfig,
    /// Write the rendered HTML here as well as mailing it.
    #[serde(default)]
    pub output_html: Option<String>,
    /// Run once when absent, otherwise repeat on this interval.
    #[serde(default)]
    pub run_interval_seconds: Option<u64>,
    /// Extra headline words and their valence (−4..4); these override the built-in list.
    #[serde(default)]
    pub sentiment_words: HashMap<String, f64>,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_subject() -> String {
    "Daily Market Summary".to_string()
}

fn default_headline_limit() -> usize {
    3
}

fn enabled() -> bool {
    true
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: AppConfig = serde_json::from_str(&content)?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

impl AppConfig {
    /// Secrets from `NEWS_API_KEY`, `EMAIL` and `PASSWORD` win over the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(key) = present("NEWS_API_KEY") {
            self.news_api_key = key;
        }
        if let Some(email) = present("EMAIL") {
            self.email.from = email;
        }
        if let Some(password) = present("PASSWORD") {
            self.email.password = password;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let report = &self.report;
        if report.watchlist.is_empty() {
            return Err(ConfigError::Invalid("watchlist is empty".into()));
        }
        if report.watchlist.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid("watchlist contains a blank symbol".into()));
        }
        if let TechnicalStrategy::EmaCrossover {
            short_span,
            long_span,
        } = report.technical_strategy
        {
            if short_span == 0 || long_span == 0 {
                return Err(ConfigError::Invalid("EMA spans must be positive".into()));
            }
        }
        if report.include.sentiment && report.headline_limit == 0 {
            return Err(ConfigError::Invalid(
                "headline_limit must be positive when sentiment is enabled".into(),
            ));
        }
        if self.run_interval_seconds == Some(0) {
            return Err(ConfigError::Invalid("run_interval_seconds must be positive".into()));
        }
        for (word, valence) in &self.sentiment_words {
            if word.trim().is_empty() || !(-4.0..=4.0).contains(valence) {
                return Err(ConfigError::Invalid(format!(
                    "sentiment word {:?} needs a valence in -4..4",
                    word
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(json: &str) -> AppConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse(r#"{"watchlist": ["AAPL", "NVDA"]}"#);

        assert_eq!(config.report.watchlist, vec!["AAPL", "NVDA"]);
        assert_eq!(config.report.headline_limit, 3);
        assert_eq!(config.report.technical_strategy, TechnicalStrategy::default());
        assert_eq!(config.report.price_range(), "1y");
        assert_eq!(config.report.include, IncludeConfig::default());
        assert_eq!(config.email.smtp_host, "smtp.gmail.com");
        assert_eq!(config.email.smtp_port, 587);
        assert_eq!(config.email.subject, "Daily Market Summary");
        assert!(config.run_interval_seconds.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn full_config_parses() {
        let config = parse(
            r#"{
                "watchlist": ["TSLA"],
                "headline_limit": 5,
                "technical_strategy": {"kind": "open_close"},
                "include": {"rating": false},
                "news_api_key": "file-key",
                "email": {"from": "me@example.com", "to": "desk@example.com", "password": "pw"},
                "output_html": "report.html",
                "run_interval_seconds": 86400
            }"#,
        );

        assert_eq!(config.report.technical_strategy, TechnicalStrategy::OpenClose);
        assert_eq!(config.report.price_range(), "5d");
        assert!(!config.report.include.rating);
        assert!(config.report.include.technical);
        assert_eq!(config.email.recipient(), "desk@example.com");
        assert_eq!(config.output_html.as_deref(), Some("report.html"));
        assert_eq!(config.run_interval_seconds, Some(86400));
        assert!(config.sentiment_words.is_empty());
    }

    #[test]
    fn sentiment_words_parse() {
        let config = parse(r#"{"watchlist": ["AAPL"], "sentiment_words": {"moonshot": 2.5, "rugpull": -3.0}}"#);
        assert_eq!(config.sentiment_words.get("moonshot"), Some(&2.5));
        assert_eq!(config.sentiment_words.get("rugpull"), Some(&-3.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_price_range_wins() {
        let config = parse(r#"{"watchlist": ["AAPL"], "price_range": "2y"}"#);
        assert_eq!(config.report.price_range(), "2y");
    }

    #[test]
    fn env_overrides_secrets() {
        let mut config = parse(r#"{"watchlist": ["AAPL"], "news_api_key": "file-key"}"#);
        let env: HashMap<&str, &str> = [("NEWS_API_KEY", "env-key"), ("EMAIL", "me@example.com"), ("PASSWORD", "")]
            .into_iter()
            .collect();

        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.news_api_key, "env-key");
        assert_eq!(config.email.from, "me@example.com");
        assert_eq!(config.email.recipient(), "me@example.com");
        assert_eq!(config.email.password, "");
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            r#"{"watchlist": []}"#,
            r#"{"watchlist": ["AAPL", " "]}"#,
            r#"{"watchlist": ["AAPL"], "technical_strategy": {"kind": "ema_crossover", "short_span": 0}}"#,
            r#"{"watchlist": ["AAPL"], "headline_limit": 0}"#,
            r#"{"watchlist": ["AAPL"], "run_interval_seconds": 0}"#,
            r#"{"watchlist": ["AAPL"], "sentiment_words": {"moonshot": 9.0}}"#,
            r#"{"watchlist": ["AAPL"], "sentiment_words": {" ": 1.0}}"#,
        ];
        for json in cases {
            assert!(
                matches!(parse(json).validate(), Err(ConfigError::Invalid(_))),
                "{}",
                json
            );
        }
    }

    #[test]
    fn zero_headlines_allowed_without_sentiment() {
        let config = parse(
            r#"{"watchlist": ["AAPL"], "headline_limit": 0, "include": {"sentiment": false}}"#,
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_config("does/not/exist.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
