//! # Feed Model
//!
//! The records a story feed is made of. A `NewsItem` carries the story
//! itself plus the prediction events linked to it; each event groups one
//! or more yes/no markets.
//!
//! ```text
//! NewsItem
//! ├── headline, summary, source, time, thumbnail
//! ├── category: Category        // never Category::All
//! ├── sentiment / impact        // badge values
//! └── events: Vec<PredictionEvent>
//!               └── markets: Vec<PredictionMarket>
//! ```
//!
//! Items are immutable once loaded. Anything coming from outside the
//! binary (a feed file) goes through `sanitize()` first.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

/// Tolerance for `yes_price + no_price == 1`.
pub const PRICE_SUM_TOLERANCE: f64 = 0.02;

// ============================================================================
// Category
// ============================================================================

/// The fixed, ordered set of feed partitions. `All` is the unfiltered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    All,
    Technology,
    Business,
    Politics,
    Sports,
    Entertainment,
    Science,
    Health,
}

impl Category {
    /// Tab order, left to right.
    pub const ORDERED: [Category; 8] = [
        Category::All,
        Category::Technology,
        Category::Business,
        Category::Politics,
        Category::Sports,
        Category::Entertainment,
        Category::Science,
        Category::Health,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Technology => "Technology",
            Category::Business => "Business",
            Category::Politics => "Politics",
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::Science => "Science",
            Category::Health => "Health",
        }
    }

    /// Position in `ORDERED`.
    pub fn position(&self) -> usize {
        Self::ORDERED
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ORDERED
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

// ============================================================================
// Badges
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "Bullish",
            Sentiment::Bearish => "Bearish",
            Sentiment::Neutral => "Neutral",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "Bullish" => Some(Sentiment::Bullish),
            "Bearish" => Some(Sentiment::Bearish),
            "Neutral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn label(&self) -> &'static str {
        match self {
            Impact::High => "High Impact",
            Impact::Medium => "Medium Impact",
            Impact::Low => "Low Impact",
        }
    }

    /// Accepts both the short form ("High") and the badge label ("High Impact").
    fn parse(s: &str) -> Option<Self> {
        match s.trim_end_matches(" Impact") {
            "High" => Some(Impact::High),
            "Medium" => Some(Impact::Medium),
            "Low" => Some(Impact::Low),
            _ => None,
        }
    }
}

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionMarket {
    pub id: String,
    pub title: String,
    pub yes_price: f64,
    pub no_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    pub link: String,
}

impl PredictionMarket {
    /// Yes price in whole cents, as shown on the buttons.
    pub fn yes_cents(&self) -> u32 {
        to_cents(self.yes_price)
    }

    pub fn no_cents(&self) -> u32 {
        to_cents(self.no_price)
    }

    /// Both prices are probabilities and sum to roughly one.
    pub fn prices_are_complementary(&self) -> bool {
        (0.0..=1.0).contains(&self.yes_price)
            && (0.0..=1.0).contains(&self.no_price)
            && (self.yes_price + self.no_price - 1.0).abs() <= PRICE_SUM_TOLERANCE
    }
}

fn to_cents(price: f64) -> u32 {
    (price.clamp(0.0, 1.0) * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionEvent {
    pub id: String,
    pub title: String,
    pub logo: String,
    pub markets: Vec<PredictionMarket>,
    pub total_volume: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub headline: String,
    pub summary: String,
    pub source: String,
    pub time: String,
    pub thumbnail: String,
    pub category: Category,
    pub sentiment: Sentiment,
    pub impact: Impact,
    pub events: Vec<PredictionEvent>,
}

impl NewsItem {
    /// Total number of markets across all linked events.
    pub fn total_markets(&self) -> usize {
        self.events.iter().map(|e| e.markets.len()).sum()
    }

    /// Label for the markets button, e.g. "Show Markets (4)".
    pub fn market_count_text(&self) -> String {
        format!("Show Markets ({})", self.total_markets())
    }

    pub fn matches_category(&self, category: Category) -> bool {
        category == Category::All || self.category == category
    }

    /// Case-insensitive substring match on headline, summary or source.
    /// An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        [&self.headline, &self.summary, &self.source]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Loosely-typed record as it arrives from a feed file. Every field is
/// optional so a missing one is reported by name. Records are decoded one
/// at a time (see `decode`), so a wrong-typed field costs only its record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNewsItem {
    pub id: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub source: Option<String>,
    pub time: Option<String>,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub sentiment: Option<String>,
    pub impact: Option<String>,
    pub events: Option<Vec<PredictionEvent>>,
}

/// Why a raw record was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    UnknownCategory(String),
    UnknownSentiment(String),
    UnknownImpact(String),
    /// The record isn't shaped like a story at all (wrong JSON types).
    Malformed(String),
    /// A market's prices aren't probabilities summing to one.
    BadPrices(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(name) => write!(f, "missing field `{name}`"),
            ValidationError::UnknownCategory(v) => write!(f, "unknown category `{v}`"),
            ValidationError::UnknownSentiment(v) => write!(f, "unknown sentiment `{v}`"),
            ValidationError::UnknownImpact(v) => write!(f, "unknown impact `{v}`"),
            ValidationError::Malformed(e) => write!(f, "malformed record: {e}"),
            ValidationError::BadPrices(id) => write!(f, "market `{id}` has invalid prices"),
        }
    }
}

impl std::error::Error for ValidationError {}

fn required(value: Option<String>, name: &'static str) -> Result<String, ValidationError> {
    value.ok_or(ValidationError::MissingField(name))
}

/// Turn a raw record into a `NewsItem`, or say which field is wrong.
pub fn validate(raw: RawNewsItem) -> Result<NewsItem, ValidationError> {
    let category_raw = required(raw.category, "category")?;
    let category = category_raw
        .parse::<Category>()
        .ok()
        .filter(|c| *c != Category::All)
        .ok_or(ValidationError::UnknownCategory(category_raw))?;

    let sentiment_raw = required(raw.sentiment, "sentiment")?;
    let sentiment =
        Sentiment::parse(&sentiment_raw).ok_or(ValidationError::UnknownSentiment(sentiment_raw))?;

    let impact_raw = required(raw.impact, "impact")?;
    let impact = Impact::parse(&impact_raw).ok_or(ValidationError::UnknownImpact(impact_raw))?;

    let events = raw.events.ok_or(ValidationError::MissingField("events"))?;
    if let Some(market) = events
        .iter()
        .flat_map(|e| &e.markets)
        .find(|m| !m.prices_are_complementary())
    {
        return Err(ValidationError::BadPrices(market.id.clone()));
    }

    Ok(NewsItem {
        id: required(raw.id, "id")?,
        headline: required(raw.headline, "headline")?,
        summary: required(raw.summary, "summary")?,
        source: required(raw.source, "source")?,
        time: required(raw.time, "time")?,
        thumbnail: required(raw.thumbnail, "thumbnail")?,
        category,
        sentiment,
        impact,
        events,
    })
}

/// Decode one JSON record and validate it.
pub fn decode(record: serde_json::Value) -> Result<NewsItem, ValidationError> {
    let raw: RawNewsItem =
        serde_json::from_value(record).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    validate(raw)
}

/// Keep only the records that decode and validate. Rejections are logged.
pub fn sanitize(records: Vec<serde_json::Value>) -> Vec<NewsItem> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match decode(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Dropping feed record #{}: {}", i, e);
                None
            }
        })
        .collect()
}
