//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::catalog;
use crate::core::feed::{Category, Impact, NewsItem, PredictionEvent, PredictionMarket, Sentiment};
use crate::core::state::App;

/// A yes/no market with complementary prices.
pub fn market(id: &str, yes: f64) -> PredictionMarket {
    PredictionMarket {
        id: id.to_string(),
        title: format!("Market {id}"),
        yes_price: yes,
        no_price: 1.0 - yes,
        expiry: None,
        link: format!("https://markets.test/{id}"),
    }
}

/// A story with one event holding two markets.
pub fn news_item(
    id: &str,
    category: Category,
    headline: &str,
    summary: &str,
    source: &str,
) -> NewsItem {
    NewsItem {
        id: id.to_string(),
        headline: headline.to_string(),
        summary: summary.to_string(),
        source: source.to_string(),
        time: "1 hour ago".to_string(),
        thumbnail: format!("https://images.test/{id}.jpg"),
        category,
        sentiment: Sentiment::Neutral,
        impact: Impact::Medium,
        events: vec![PredictionEvent {
            id: format!("event-{id}"),
            title: format!("Event for {id}"),
            logo: format!("https://images.test/logo-{id}.jpg"),
            markets: vec![market(&format!("{id}-a"), 0.3), market(&format!("{id}-b"), 0.6)],
            total_volume: "$1,000".to_string(),
        }],
    }
}

/// The built-in catalog.
pub fn sample_items() -> Vec<NewsItem> {
    catalog::builtin().to_vec()
}

/// An App over the built-in catalog with default settings.
pub fn test_app() -> App {
    App::new(sample_items())
}

/// All cell symbols of a rendered buffer, row after row.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
