//! Types shared between the core library and the terminal shell.
//!
//! Configuration is persisted by the desktop bridge, so everything here is
//! `serde` and tolerant of missing fields.

pub mod formatting;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Application Config
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted client configuration.
///
/// Mutated only through `ClientContext::update_app_config`; every update is
/// written back through the platform bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the game install (the folder holding `_retail_`, `_classic_`, ...)
    pub wow_directory: Option<String>,
    /// Render numbers with `,` as the decimal separator
    pub european_number_format: bool,
    /// Last saved main window geometry
    pub window: Option<WindowGeometry>,
    pub stats: StatsSettings,
}

/// Main window position and size in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub maximized: bool,
}

/// Where the competitive stats feed lives and how long a fetch is reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSettings {
    pub base_url: String,
    pub cache_ttl_secs: u64,
}

pub const DEFAULT_STATS_BASE_URL: &str = "https://images.wowarenalogs.com";

/// 24 minutes. The feed sits behind a CDN with a longer cache of its own.
pub const DEFAULT_STATS_CACHE_TTL_SECS: u64 = 60 * 24;

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STATS_BASE_URL.to_string(),
            cache_ttl_secs: DEFAULT_STATS_CACHE_TTL_SECS,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Competitive Stats Feed
// ─────────────────────────────────────────────────────────────────────────────

/// Version of the `comp-stats` JSON layout this client understands.
pub const STATS_SCHEMA_VERSION: u32 = 3;

/// Win/lose counters for one spec or comp. Either side may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecWinLose {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lose: Option<u64>,
}

/// Counters for one bracket, keyed by spec id or `_`-joined comp of spec ids.
pub type BracketStats = HashMap<String, SpecWinLose>;

/// The whole feed: bracket name (`"2v2"`, `"3v3"`, `"Rated Solo Shuffle"`, ...) to its counters.
pub type StatsData = HashMap<String, BracketStats>;

/// URL of the versioned stats document under `base_url`.
///
/// ```
/// use walogs_types::comp_stats_url;
/// assert_eq!(
///     comp_stats_url("https://cdn.example.com/"),
///     format!("https://cdn.example.com/data/comp-stats.v{}.json", walogs_types::STATS_SCHEMA_VERSION),
/// );
/// ```
pub fn comp_stats_url(base_url: &str) -> String {
    format!(
        "{}/data/comp-stats.v{}.json",
        base_url.trim_end_matches('/'),
        STATS_SCHEMA_VERSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_fills_missing_fields_from_defaults() {
        let config: AppConfig = toml::from_str(r#"wow_directory = "/games/wow""#).unwrap();
        assert_eq!(config.wow_directory.as_deref(), Some("/games/wow"));
        assert_eq!(config.window, None);
        assert_eq!(config.stats, StatsSettings::default());
        assert!(!config.european_number_format);
    }

    #[test]
    fn config_toml_round_trip_keeps_window() {
        let config = AppConfig {
            wow_directory: None,
            window: Some(WindowGeometry { x: 10, y: -20, width: 1280, height: 720, maximized: false }),
            ..Default::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn stats_feed_accepts_partial_counters() {
        let json = r#"{"3v3": {"250_65_62": {"win": 12}, "0": {"lose": 3}, "64": {}}}"#;
        let data: StatsData = serde_json::from_str(json).unwrap();
        let bracket = &data["3v3"];
        assert_eq!(bracket["250_65_62"], SpecWinLose { win: Some(12), lose: None });
        assert_eq!(bracket["0"].lose, Some(3));
        assert_eq!(bracket["64"], SpecWinLose::default());
    }
}
