// Analyzer module: aggregates submodules for the rating, technical and sentiment signals.

pub mod lexicon;
pub mod sentiment;
pub mod signal_analysis;
pub mod technical;

// Re-export the main Analyzer implementation for ease of use.
pub use signal_analysis::{Analyzer, AnalyzerImpl};
pub use technical::TechnicalStrategy;
