//! Badge colours for sentiment and impact, as lookup tables.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::core::feed::{Impact, Sentiment};

const SENTIMENT_COLORS: [(Sentiment, Color); 3] = [
    (Sentiment::Bullish, Color::Green),
    (Sentiment::Bearish, Color::Red),
    (Sentiment::Neutral, Color::Gray),
];

const IMPACT_COLORS: [(Impact, Color); 3] = [
    (Impact::High, Color::LightRed),
    (Impact::Medium, Color::Yellow),
    (Impact::Low, Color::Blue),
];

fn lookup<K: PartialEq + Copy>(table: &[(K, Color)], key: K) -> Color {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, color)| *color)
        .unwrap_or(Color::Gray)
}

pub fn sentiment_color(sentiment: Sentiment) -> Color {
    lookup(&SENTIMENT_COLORS, sentiment)
}

pub fn impact_color(impact: Impact) -> Color {
    lookup(&IMPACT_COLORS, impact)
}

fn badge(label: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {label} "),
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn sentiment_badge(sentiment: Sentiment) -> Span<'static> {
    badge(sentiment.label(), sentiment_color(sentiment))
}

pub fn impact_badge(impact: Impact) -> Span<'static> {
    badge(impact.label(), impact_color(impact))
}
