use market_digest::analyzer::lexicon::Lexicon;
use market_digest::analyzer::AnalyzerImpl;
use market_digest::config::{load_config, AppConfig};
use market_digest::fetcher::{NewsApiFetcher, YahooFetcher};
use market_digest::model::AppError;
use market_digest::notifier::EmailNotifier;
use market_digest::report::{render_html, ReportAssembler};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let assembler = match build_assembler(&config) {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to initialize fetchers: {}", e);
            return;
        }
    };

    let notifier = if config.email.from.is_empty() {
        warn!("No sender configured, mail delivery disabled");
        None
    } else {
        match EmailNotifier::new(config.email.clone()) {
            Ok(n) => Some(n),
            Err(e) => {
                error!("Failed to initialize mailer: {}", e);
                return;
            }
        }
    };

    loop {
        info!("Starting report run...");
        if let Err(e) = run_once(&config, &assembler, notifier.as_ref()).await {
            error!("Report run failed: {}", e);
        }

        let Some(secs) = config.run_interval_seconds else {
            break;
        };
        info!("Waiting {}s for the next run...", secs);
        sleep(Duration::from_secs(secs)).await;
    }
}

fn build_assembler(config: &AppConfig) -> Result<ReportAssembler, AppError> {
    let yahoo = Arc::new(YahooFetcher::new()?);
    let news = Arc::new(NewsApiFetcher::new(config.news_api_key.clone())?);
    if config.news_api_key.is_empty() {
        warn!("NEWS_API_KEY is not set, headline requests will be rejected");
    }
    if !config.sentiment_words.is_empty() {
        info!("Adding {} custom sentiment words", config.sentiment_words.len());
    }
    let lexicon = Lexicon::with_words(&config.sentiment_words);
    let analyzer = Arc::new(AnalyzerImpl::with_lexicon(
        config.report.technical_strategy,
        lexicon,
    ));
    Ok(ReportAssembler::new(
        config.report.clone(),
        analyzer,
        news,
        yahoo.clone(),
        yahoo,
    ))
}

async fn run_once(
    config: &AppConfig,
    assembler: &ReportAssembler,
    notifier: Option<&EmailNotifier>,
) -> Result<(), AppError> {
    let reports = assembler.assemble().await?;
    let html = render_html(&config.email.subject, &reports, &config.report.include);

    if let Some(path) = &config.output_html {
        if let Some(folder) = Path::new(path).parent() {
            fs::create_dir_all(folder)?;
        }
        fs::write(path, &html)?;
        info!("Saved report HTML: {}", path);
    }

    if let Some(notifier) = notifier {
        notifier.send_report(&config.email.subject, html).await?;
    }

    info!("Report run finished for {} symbols", reports.len());
    Ok(())
}
