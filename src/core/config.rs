//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.oddsfeed/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::core::feed::Category;
use crate::core::gesture::{
    DEFAULT_DEBOUNCE, DEFAULT_OFFSET_THRESHOLD_PX, DEFAULT_VELOCITY_THRESHOLD_PX_S,
    SwipeThresholds,
};
use crate::core::navigation::BoundaryPolicy;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OddsfeedConfig {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub gestures: GestureConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationConfig {
    pub boundary: Option<BoundaryPolicy>,
    pub start_category: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GestureConfig {
    pub offset_threshold_px: Option<f64>,
    pub velocity_threshold_px_s: Option<f64>,
    pub debounce_ms: Option<u64>,
    pub swipe_reset_ms: Option<u64>,
    pub cell_width_px: Option<f64>,
    pub cell_height_px: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FeedConfig {
    pub file: Option<String>,
    pub refresh_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShareConfig {
    pub command: Option<Vec<String>>,
    pub url_base: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SWIPE_RESET_MS: u64 = 300;
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 1000;
pub const DEFAULT_CELL_WIDTH_PX: f64 = 8.0;
pub const DEFAULT_CELL_HEIGHT_PX: f64 = 16.0;
pub const DEFAULT_STORE_FILE: &str = "store.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub boundary: BoundaryPolicy,
    pub thresholds: SwipeThresholds,
    pub debounce: Duration,
    pub swipe_reset: Duration,
    pub refresh_delay: Duration,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    pub feed_file: Option<PathBuf>,
    pub store_path: PathBuf,
    pub share_command: Option<Vec<String>>,
    pub share_url_base: Option<String>,
    pub start_category: Category,
    pub start_query: String,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub boundary: Option<BoundaryPolicy>,
    pub feed: Option<PathBuf>,
    pub category: Option<Category>,
    pub query: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.oddsfeed`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".oddsfeed"))
}

/// Returns the path to `~/.oddsfeed/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.oddsfeed/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `OddsfeedConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<OddsfeedConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(OddsfeedConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(OddsfeedConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: OddsfeedConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# oddsfeed configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [navigation]
# boundary = "clamp"                 # "clamp" or "wrap" (items and categories)
# start_category = "All"

# [gestures]
# offset_threshold_px = 50
# velocity_threshold_px_s = 500
# debounce_ms = 300
# swipe_reset_ms = 300
# cell_width_px = 8                  # Pixel size of one terminal cell
# cell_height_px = 16

# [feed]
# file = "feed.json"                 # JSON array of stories; relative to ~/.oddsfeed/
# refresh_delay_ms = 1000

# [share]
# command = ["termux-share", "-a", "send"]   # Or set ODDSFEED_SHARE_COMMAND
# url_base = "https://example.com/story"      # Shared link is <url_base>/<id>

# [storage]
# path = "store.json"                # Bookmark store; relative to ~/.oddsfeed/
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &OddsfeedConfig, cli: &CliOverrides) -> ResolvedConfig {
    let base = config_dir().unwrap_or_else(|| PathBuf::from("."));

    // Boundary: CLI → env → config → default
    let boundary = cli
        .boundary
        .or_else(|| env_parsed("ODDSFEED_BOUNDARY", parse_boundary))
        .or(config.navigation.boundary)
        .unwrap_or_default();

    // Feed file: CLI → env → config
    let feed_file = cli
        .feed
        .clone()
        .or_else(|| std::env::var("ODDSFEED_FEED").ok().map(PathBuf::from))
        .or_else(|| config.feed.file.as_ref().map(|f| base.join(f)));

    // Store path: env → config → default
    let store_path = std::env::var("ODDSFEED_STORE")
        .ok()
        .map(PathBuf::from)
        .or_else(|| config.storage.path.as_ref().map(|p| base.join(p)))
        .unwrap_or_else(|| base.join(DEFAULT_STORE_FILE));

    // Share command: env (whitespace-split) → config
    let share_command = std::env::var("ODDSFEED_SHARE_COMMAND")
        .ok()
        .map(|s| s.split_whitespace().map(String::from).collect::<Vec<_>>())
        .or_else(|| config.share.command.clone())
        .filter(|argv| !argv.is_empty());

    // Start category: CLI → config → All
    let start_category = cli
        .category
        .or_else(|| {
            config
                .navigation
                .start_category
                .as_deref()
                .and_then(|name| match Category::from_str(name) {
                    Ok(c) => Some(c),
                    Err(e) => {
                        warn!("Ignoring start_category: {}", e);
                        None
                    }
                })
        })
        .unwrap_or_default();

    let gestures = &config.gestures;
    ResolvedConfig {
        boundary,
        thresholds: SwipeThresholds {
            offset_px: gestures
                .offset_threshold_px
                .unwrap_or(DEFAULT_OFFSET_THRESHOLD_PX),
            velocity_px_s: gestures
                .velocity_threshold_px_s
                .unwrap_or(DEFAULT_VELOCITY_THRESHOLD_PX_S),
        },
        debounce: gestures
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE),
        swipe_reset: Duration::from_millis(gestures.swipe_reset_ms.unwrap_or(DEFAULT_SWIPE_RESET_MS)),
        refresh_delay: Duration::from_millis(
            config.feed.refresh_delay_ms.unwrap_or(DEFAULT_REFRESH_DELAY_MS),
        ),
        cell_width_px: gestures.cell_width_px.unwrap_or(DEFAULT_CELL_WIDTH_PX),
        cell_height_px: gestures.cell_height_px.unwrap_or(DEFAULT_CELL_HEIGHT_PX),
        feed_file,
        store_path,
        share_command,
        share_url_base: std::env::var("ODDSFEED_SHARE_URL_BASE")
            .ok()
            .or_else(|| config.share.url_base.clone()),
        start_category,
        start_query: cli.query.clone().unwrap_or_default(),
    }
}

fn parse_boundary(s: &str) -> Option<BoundaryPolicy> {
    match s.trim().to_ascii_lowercase().as_str() {
        "clamp" => Some(BoundaryPolicy::Clamp),
        "wrap" => Some(BoundaryPolicy::Wrap),
        other => {
            warn!("Unknown boundary policy '{}', ignoring", other);
            None
        }
    }
}

fn env_parsed<T>(name: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    std::env::var(name).ok().and_then(|v| parse(&v))
}
