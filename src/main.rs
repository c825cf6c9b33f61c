use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use log::warn;
use oddsfeed::core::catalog;
use oddsfeed::core::config::{self, CliOverrides};
use oddsfeed::core::feed::Category;
use oddsfeed::core::navigation::BoundaryPolicy;
use oddsfeed::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "oddsfeed", about = "Swipeable news feed with prediction-market odds")]
struct Args {
    /// What happens past the first or last story and category
    #[arg(short, long, value_enum)]
    boundary: Option<BoundaryPolicy>,

    /// JSON feed file to read instead of the built-in stories
    #[arg(short, long)]
    feed: Option<PathBuf>,

    /// Category to open on (e.g. "Technology")
    #[arg(short, long)]
    category: Option<Category>,

    /// Start with this search query applied
    #[arg(short, long)]
    query: Option<String>,

    /// Log level written to oddsfeed.log
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to oddsfeed.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("oddsfeed.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Ignoring config file: {}", e);
        config::OddsfeedConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            boundary: args.boundary,
            feed: args.feed,
            category: args.category,
            query: args.query,
        },
    );

    log::info!(
        "oddsfeed starting up (boundary {}, category {})",
        resolved.boundary.label(),
        resolved.start_category
    );

    let items = catalog::load(resolved.feed_file.as_deref());
    tui::run(resolved, items)
}
