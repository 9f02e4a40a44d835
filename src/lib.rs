//! Daily market summary: analyst ratings, technical bias and headline
//! sentiment per watchlist symbol, rendered to HTML and mailed.

pub mod analyzer;
pub mod config;
pub mod fetcher;
pub mod model;
pub mod normalizer;
pub mod notifier;
pub mod report;
pub mod utils;
