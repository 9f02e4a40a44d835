use crate::model::{RatingLabel, SentimentBias, TechnicalBias};

pub const BRIGHT_GREEN: &str = "#00FF00";
pub const LIGHT_GREEN: &str = "#90EE90";
pub const YELLOW: &str = "#FFFF00";
pub const LIGHT_RED: &str = "#FFB6C1";
pub const BRIGHT_RED: &str = "#FF0000";
pub const GRAY: &str = "#808080";

/// Display color of a label in the rendered report.
pub trait LabelColor {
    fn color(&self) -> &'static str;
}

impl LabelColor for RatingLabel {
    fn color(&self) -> &'static str {
        match self {
            RatingLabel::StrongBuy => BRIGHT_GREEN,
            RatingLabel::Buy => LIGHT_GREEN,
            RatingLabel::Hold => YELLOW,
            RatingLabel::Sell => LIGHT_RED,
            RatingLabel::StrongSell => BRIGHT_RED,
            RatingLabel::NoAnalysisAvailable
            | RatingLabel::AnalysisError
            | RatingLabel::Unrecognized(_) => GRAY,
        }
    }
}

impl LabelColor for TechnicalBias {
    fn color(&self) -> &'static str {
        match self {
            TechnicalBias::Bullish => BRIGHT_GREEN,
            TechnicalBias::Bearish => BRIGHT_RED,
            TechnicalBias::Neutral => YELLOW,
            TechnicalBias::NoData | TechnicalBias::Error => GRAY,
        }
    }
}

impl LabelColor for SentimentBias {
    fn color(&self) -> &'static str {
        match self {
            SentimentBias::Up => BRIGHT_GREEN,
            SentimentBias::Down => BRIGHT_RED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_palette() {
        assert_eq!(RatingLabel::StrongBuy.color(), "#00FF00");
        assert_eq!(RatingLabel::Buy.color(), "#90EE90");
        assert_eq!(RatingLabel::Hold.color(), "#FFFF00");
        assert_eq!(RatingLabel::Sell.color(), "#FFB6C1");
        assert_eq!(RatingLabel::StrongSell.color(), "#FF0000");
        assert_eq!(RatingLabel::AnalysisError.color(), GRAY);
        assert_eq!(RatingLabel::Unrecognized("outperform".into()).color(), GRAY);
    }

    #[test]
    fn sentinels_are_gray() {
        assert_eq!(TechnicalBias::NoData.color(), GRAY);
        assert_eq!(TechnicalBias::Error.color(), GRAY);
        assert_eq!(TechnicalBias::Neutral.color(), YELLOW);
    }
}
