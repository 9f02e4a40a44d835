// HTML body for the daily summary mail.
use crate::config::IncludeConfig;
use crate::model::{SymbolReport, TechnicalSignal, TechnicalValues};
use crate::report::palette::{LabelColor, GRAY};
use crate::utils::escape_html;
use std::fmt::Write;

const STYLE: &str = r#"
        body {
            font-family: Arial, sans-serif;
            background-color: #141414;
        }
        .Card {
            background-color: #141414;
            margin: 32px;
            padding: 15px;
            color: white;
            text-align: center;
            border-radius: 10px;
            box-shadow: 0 0 15px 5px rgba(255, 255, 255, 0.7);
        }
        .Title {
            color: white;
        }
        .SubtitleNews {
            color: #0080ff;
        }
"#;

fn badge(label: &str, color: &str) -> String {
    format!(r#"<span style="color: {}">{}</span>"#, color, escape_html(label))
}

fn technical_detail(signal: &TechnicalSignal) -> String {
    match signal.values {
        Some(TechnicalValues::EmaCrossover {
            close,
            ema_short,
            ema_long,
            short_span,
            long_span,
        }) => format!(
            " (Close {:.2} | EMA{} {:.2} | EMA{} {:.2})",
            close, short_span, ema_short, long_span, ema_long
        ),
        Some(TechnicalValues::OpenClose {
            open,
            reference_close,
        }) => format!(" (Open {:.2} | Prev Close {:.2})", open, reference_close),
        None => String::new(),
    }
}

fn render_symbol(out: &mut String, report: &SymbolReport, include: &IncludeConfig) {
    let symbol = escape_html(&report.symbol);
    match &report.rating {
        Some(rating) => {
            let _ = write!(
                out,
                "\n<h3>{} - Analyst Rating: {}</h3>",
                symbol,
                badge(rating.as_str(), rating.color())
            );
        }
        None => {
            let _ = write!(out, "\n<h3>{}</h3>", symbol);
        }
    }

    if let Some(technical) = &report.technical {
        let _ = write!(
            out,
            "\n<p class=\"Technical\">Technical Bias: {}{}</p>",
            badge(technical.label.as_str(), technical.label.color()),
            technical_detail(technical)
        );
    }

    match &report.sentiment {
        Some(sentiment) => {
            let _ = write!(
                out,
                "\n<p class=\"Sentiment\">News Sentiment: {} ({:+.3})</p>",
                badge(&sentiment.label.to_string(), sentiment.label.color()),
                sentiment.mean_compound
            );
        }
        None if include.sentiment => {
            let _ = write!(
                out,
                "\n<p class=\"Sentiment\">News Sentiment: {}</p>",
                badge("No Data", GRAY)
            );
        }
        None => {}
    }

    out.push_str("\n<ul>");
    for headline in &report.headlines {
        let _ = write!(out, "<li>{}</li>", escape_html(headline));
    }
    out.push_str("</ul>\n");
}

/// Renders the full HTML document, one section per report in the given order.
///
/// Sentiment gets a `No Data` row when it was enabled but had no headlines to score.
pub fn render_html(title: &str, reports: &[SymbolReport], include: &IncludeConfig) -> String {
    let mut sections = String::new();
    for report in reports {
        render_symbol(&mut sections, report, include);
    }

    format!(
        r#"<html>
<head>
    <style>{style}</style>
</head>
<body>
    <div class="Card">
        <h1 class="Title">{title}</h1>
        <h2 class="SubtitleNews">Watchlist News:</h2>
        {sections}
    </div>
</body>
</html>
"#,
        style = STYLE,
        title = escape_html(title),
        sections = sections
    )
}
