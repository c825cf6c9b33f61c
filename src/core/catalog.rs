//! # Story Catalog
//!
//! Where the feed's stories come from. By default that is the built-in
//! sample set compiled into the binary; a JSON feed file (an array of
//! `NewsItem`-shaped records) can replace it. Feed files go through
//! `feed::sanitize()` so a malformed record costs one story, not the run.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use log::{info, warn};

use crate::core::feed::{
    sanitize, Category, Impact, NewsItem, PredictionEvent, PredictionMarket, Sentiment,
};

#[derive(Debug)]
pub enum FeedError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Io(e) => write!(f, "feed I/O error: {e}"),
            FeedError::Parse(e) => write!(f, "feed parse error: {e}"),
        }
    }
}

impl std::error::Error for FeedError {}

/// Read and validate a feed file.
pub fn load_feed(path: &Path) -> Result<Vec<NewsItem>, FeedError> {
    let contents = fs::read_to_string(path).map_err(FeedError::Io)?;
    let records: Vec<serde_json::Value> =
        serde_json::from_str(&contents).map_err(FeedError::Parse)?;
    let total = records.len();
    let items = sanitize(records);
    info!(
        "Loaded {} of {} stories from {}",
        items.len(),
        total,
        path.display()
    );
    Ok(items)
}

/// The stories for this session: the feed file if given and readable,
/// the built-in set otherwise.
pub fn load(feed_file: Option<&Path>) -> Vec<NewsItem> {
    if let Some(path) = feed_file {
        match load_feed(path) {
            Ok(items) => return items,
            Err(e) => warn!(
                "Could not load feed {}: {}. Using built-in stories",
                path.display(),
                e
            ),
        }
    }
    builtin().to_vec()
}

/// The compiled-in sample stories.
pub fn builtin() -> &'static [NewsItem] {
    &BUILTIN
}

static BUILTIN: LazyLock<Vec<NewsItem>> = LazyLock::new(|| {
    vec![
        story(
            "1",
            Category::Technology,
            "Google Announces Solution to Major Quantum Computing Challenge with Willow Chip",
            "Google's new Willow processor solves a computation in under 5 minutes that would take a classical computer longer than the age of the universe, marking a breakthrough in quantum error correction.",
            "Reuters",
            "2 hours ago",
            "photo-1635070041078-e363dbe005cb",
            Sentiment::Bullish,
            Impact::High,
            vec![
                event(
                    "event_1",
                    "Next US Presidential Election Winner?",
                    "photo-1581833971358-2c8b550f87b3",
                    "$12,23,23,2",
                    vec![
                        market("market_1", "Biden wins", 0.28),
                        market("market_2", "Trump wins", 0.67),
                    ],
                ),
                event(
                    "event_2",
                    "What will Trump say in September?",
                    "photo-1551524164-6cf2ac5313c4",
                    "$8,45,67,1",
                    vec![
                        market("market_3", "Mentions Bitcoin", 0.42),
                        market("market_4", "Criticizes crypto", 0.78),
                    ],
                ),
            ],
        ),
        story(
            "2",
            Category::Technology,
            "TSMC Chairman Reveals Shared Focus with Elon Musk on Humanoid Robots",
            "Taiwan Semiconductor chairman C.C. Wei disclosed that the \"richest guy in the world\" shares his vision for developing multifunctional robots over automobiles, with Taiwan positioned as a key player in AI and robotics.",
            "DIGITIMES",
            "4 hours ago",
            "photo-1593941707882-a5bac6861d75",
            Sentiment::Bullish,
            Impact::High,
            vec![event(
                "event_3",
                "Federal Reserve Policy Changes",
                "photo-1611974789855-9c2a0a7236a3",
                "$15,67,89,3",
                vec![
                    market("market_5", "Rate cut 0.5%", 0.63),
                    market("market_6", "Inflation < 2%", 0.45),
                ],
            )],
        ),
        story(
            "3",
            Category::Technology,
            "Autonomous AI Agents and Profitability to Dominate 2025 Agenda",
            "Business executives predict that autonomous AI agents capable of performing tasks without direct human involvement will revolutionize industries, with 2025 being \"the year of profitability for AI.\"",
            "Economic Times",
            "6 hours ago",
            "photo-1677442136019-21780ecad995",
            Sentiment::Bullish,
            Impact::High,
            vec![event(
                "event_4",
                "AI Development Timeline",
                "photo-1677442136019-21780ecad995",
                "$9,34,56,7",
                vec![
                    market("market_7", "AGI by 2030", 0.28),
                    market("market_8", "AI regulation", 0.67),
                ],
            )],
        ),
        story(
            "4",
            Category::Business,
            "AI-Driven Profits Push Wall Street Toward New Records",
            "U.S. stocks continue their upward trajectory as tech companies report strong AI-driven results, with Salesforce and Marvell Technology leading gains on autonomous AI agent capabilities.",
            "AP Business",
            "8 hours ago",
            "photo-1611974789855-9c2a0a7236a3",
            Sentiment::Bullish,
            Impact::High,
            vec![event(
                "event_5",
                "Climate Policy Implementation",
                "photo-1611273426858-450d8e3c9fce",
                "$11,45,78,9",
                vec![
                    market("market_9", "CO2 peaks 2025", 0.52),
                    market("market_10", "Global carbon tax", 0.34),
                ],
            )],
        ),
        story(
            "5",
            Category::Science,
            "Apple Intelligence Marks Watershed Moment in Consumer AI Adoption",
            "Apple's integration of OpenAI-powered generative AI across its product ecosystem creates a refined gateway into day-to-day AI for millions of non-tech users, potentially accelerating mainstream adoption.",
            "Forbes",
            "12 hours ago",
            "photo-1446776877081-d282a0f896e2",
            Sentiment::Bullish,
            Impact::Medium,
            vec![event(
                "event_6",
                "Space Exploration Milestones",
                "photo-1446776877081-d282a0f896e2",
                "$7,89,12,4",
                vec![
                    market("market_11", "Mars landing 2030", 0.41),
                    market("market_12", "SpaceX IPO", 0.23),
                ],
            )],
        ),
        story(
            "6",
            Category::Technology,
            "Tesla's Optimus Humanoid Robot Breaks New Ground in Robotics",
            "Tesla demonstrates the latest iteration of its humanoid robot Optimus, showing impressive progress toward bipedal robots that could assist with tasks in homes and industry, despite controversy over automation levels.",
            "TechCrunch",
            "1 day ago",
            "photo-1593941707882-a5bac6861d75",
            Sentiment::Bullish,
            Impact::Medium,
            vec![event(
                "event_7",
                "Streaming Industry Evolution",
                "photo-1574375927938-d5a98e8ffe85",
                "$13,56,78,2",
                vec![
                    market("market_13", "2B+ subscribers", 0.71),
                    market("market_14", "TV obsolete 2030", 0.38),
                ],
            )],
        ),
        story(
            "7",
            Category::Entertainment,
            "AI Robot Artist Ai-Da Sells Painting for $1 Million at Sotheby's",
            "The humanoid robot Ai-Da becomes the first AI artist to sell artwork at auction, with her painting \"AI God\" fetching $1,084,000 at Sotheby's London, far exceeding the $120,000-$180,000 estimate.",
            "Art News",
            "3 hours ago",
            "photo-1541961017774-22349e4a1262",
            Sentiment::Bullish,
            Impact::High,
            vec![event(
                "event_8",
                "Electric Vehicle Innovation",
                "photo-1593941707882-a5bac6861d75",
                "$16,78,90,5",
                vec![
                    market("market_15", "Tesla $500+", 0.55),
                    market("market_16", "Solid-state batteries", 0.72),
                ],
            )],
        ),
        story(
            "8",
            Category::Politics,
            "EU AI Act Raises Concerns Over Innovation Restrictions",
            "The European Union's new AI Act, which categorizes AI applications by risk level and bans certain uses, faces criticism from tech companies who argue it may stifle innovation and give competitors an advantage.",
            "Financial Times",
            "5 hours ago",
            "photo-1551288049-bebda4e38f71",
            Sentiment::Bearish,
            Impact::Medium,
            vec![event(
                "event_9",
                "Olympic Games 2024",
                "photo-1461896836934-ffe607ba8211",
                "$14,23,45,6",
                vec![
                    market("market_17", "USA most gold", 0.68),
                    market("market_18", "10+ world records", 0.43),
                ],
            )],
        ),
        story(
            "9",
            Category::Business,
            "AI Job Displacement Concerns Mount as Automation Accelerates",
            "Recent studies show that while AI adoption increases productivity, concerns grow over potential job displacement in sectors like customer service, data entry, and content creation as autonomous agents become more capable.",
            "The Guardian",
            "7 hours ago",
            "photo-1551288049-bebda4e38f71",
            Sentiment::Bearish,
            Impact::High,
            vec![event(
                "event_10",
                "Quantum Computing Breakthrough",
                "photo-1635070041078-e363dbe005cb",
                "$10,34,56,8",
                vec![
                    market("market_19", "Break RSA 2030", 0.31),
                    market("market_20", "Commercial viable", 0.58),
                ],
            )],
        ),
        story(
            "10",
            Category::Technology,
            "New Zealand Leads AI Adoption with 67% of Organizations Using AI",
            "The AI Forum of New Zealand reports that two-thirds of organizations have adopted AI, with most experiencing increased efficiency and positive financial outcomes, positioning the country as a leader in AI implementation.",
            "NZ Herald",
            "9 hours ago",
            "photo-1677442136019-21780ecad995",
            Sentiment::Bullish,
            Impact::High,
            vec![event(
                "event_11",
                "Global Health Initiative",
                "photo-1584515933487-779824d29309",
                "$18,90,12,7",
                vec![
                    market("market_21", "80%+ vaccinated", 0.76),
                    market("market_22", "Malaria eradicated", 0.29),
                ],
            )],
        ),
        story(
            "11",
            Category::Politics,
            "AI Copyright Disputes Intensify as Artists Challenge Training Data Usage",
            "Writers, artists, and musicians are increasingly challenging AI companies over the use of their work in training datasets, with several high-profile lawsuits potentially reshaping how AI systems are developed and trained.",
            "The Verge",
            "11 hours ago",
            "photo-1551288049-bebda4e38f71",
            Sentiment::Bearish,
            Impact::Medium,
            vec![event(
                "event_12",
                "Renewable Energy Transition",
                "photo-1466611653911-95081537e5b7",
                "$12,67,89,4",
                vec![
                    market("market_23", "70% renewable", 0.64),
                    market("market_24", "Coal phased out", 0.47),
                ],
            )],
        ),
        story(
            "12",
            Category::Business,
            "Nvidia Overtakes Apple as World's Most Valuable Company",
            "Nvidia's market capitalization peaks at $3.43 trillion, surpassing Apple as the world's largest company, driven by unprecedented demand for AI chips and a 800% growth since ChatGPT's launch.",
            "Bloomberg",
            "13 hours ago",
            "photo-1611974789855-9c2a0a7236a3",
            Sentiment::Bullish,
            Impact::High,
            vec![event(
                "event_13",
                "Virtual Reality Cinema",
                "photo-1592478411213-6153e4ebc696",
                "$15,78,90,3",
                vec![
                    market("market_25", "VR mainstream", 0.39),
                    market("market_26", "VR tickets $50+", 0.52),
                ],
            )],
        ),
    ]
});

// ── Builders ────────────────────────────────────────────────────────────────

const IMAGE_HOST: &str = "https://images.unsplash.com";

fn image_url(photo: &str, size: &str) -> String {
    format!("{IMAGE_HOST}/{photo}?{size}&fit=crop&q=80")
}

#[allow(clippy::too_many_arguments)]
fn story(
    id: &str,
    category: Category,
    headline: &str,
    summary: &str,
    source: &str,
    time: &str,
    photo: &str,
    sentiment: Sentiment,
    impact: Impact,
    events: Vec<PredictionEvent>,
) -> NewsItem {
    NewsItem {
        id: id.to_string(),
        headline: headline.to_string(),
        summary: summary.to_string(),
        source: source.to_string(),
        time: time.to_string(),
        thumbnail: image_url(photo, "w=800&h=600"),
        category,
        sentiment,
        impact,
        events,
    }
}

fn event(
    id: &str,
    title: &str,
    photo: &str,
    total_volume: &str,
    markets: Vec<PredictionMarket>,
) -> PredictionEvent {
    PredictionEvent {
        id: id.to_string(),
        title: title.to_string(),
        logo: image_url(photo, "w=100&h=100"),
        markets,
        total_volume: total_volume.to_string(),
    }
}

/// Sample markets are quoted by their yes price; no is the complement.
fn market(id: &str, title: &str, yes_price: f64) -> PredictionMarket {
    PredictionMarket {
        id: id.to_string(),
        title: title.to_string(),
        yes_price,
        no_price: ((1.0 - yes_price) * 100.0).round() / 100.0,
        expiry: None,
        link: "#".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_ids_are_unique() {
        let ids: HashSet<_> = builtin().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), builtin().len());
    }

    #[test]
    fn test_builtin_never_uses_all_as_category() {
        assert!(builtin().iter().all(|i| i.category != Category::All));
    }

    #[test]
    fn test_builtin_prices_are_complementary() {
        for item in builtin() {
            for event in &item.events {
                for m in &event.markets {
                    assert!(m.prices_are_complementary(), "{} is off", m.id);
                }
            }
        }
    }

    #[test]
    fn test_load_without_feed_uses_builtin() {
        assert_eq!(load(None).len(), builtin().len());
    }

    #[test]
    fn test_load_missing_feed_falls_back() {
        let path = Path::new("/nonexistent/oddsfeed/feed.json");
        assert_eq!(load(Some(path)).len(), builtin().len());
    }

    #[test]
    fn test_mistyped_record_costs_only_itself() {
        let path = std::env::temp_dir().join(format!(
            "oddsfeed-catalog-mixed-{}.json",
            uuid::Uuid::new_v4()
        ));
        let feed = r##"[
            {"id": "1", "headline": "Good story", "summary": "s", "source": "AP",
             "time": "now", "thumbnail": "t", "category": "Science",
             "sentiment": "Neutral", "impact": "Medium Impact",
             "events": [{"id": "e1", "title": "E", "logo": "", "totalVolume": "$5",
                         "markets": [{"id": "m1", "title": "M", "yesPrice": 0.4,
                                      "noPrice": 0.6, "link": "#"}]}]},
            {"id": 7, "headline": "Bad id type", "summary": "s", "source": "AP",
             "time": "now", "thumbnail": "t", "category": "Science",
             "sentiment": "Neutral", "impact": "Medium Impact", "events": []}
        ]"##;
        fs::write(&path, feed).unwrap();

        let items = load_feed(&path).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].headline, "Good story");
        assert_eq!(load(Some(&path)).len(), 1);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_feed_rejects_non_array() {
        let path = std::env::temp_dir().join("oddsfeed-catalog-not-array.json");
        fs::write(&path, r#"{"id": "1"}"#).unwrap();
        assert!(matches!(load_feed(&path), Err(FeedError::Parse(_))));
        let _ = fs::remove_file(path);
    }
}
