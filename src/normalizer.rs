use crate::model::RatingLabel;

/// Maps an analyst recommendation token to its display label.
///
/// Tokens are matched exactly. Anything unknown is passed through so new
/// upstream vocabulary still shows up in the report.
pub fn normalize_rating(raw: Option<&str>) -> RatingLabel {
    let Some(token) = raw else {
        return RatingLabel::NoAnalysisAvailable;
    };

    match token {
        "strong_buy" | "strongBuy" => RatingLabel::StrongBuy,
        "buy" => RatingLabel::Buy,
        "hold" => RatingLabel::Hold,
        "sell" => RatingLabel::Sell,
        "strongSell" | "strong_sell" => RatingLabel::StrongSell,
        "none" => RatingLabel::NoAnalysisAvailable,
        other => RatingLabel::Unrecognized(other.to_string()),
    }
}
