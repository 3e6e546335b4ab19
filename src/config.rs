use crate::components::hours::models::Preset;
use crate::components::hours::presets::PresetCatalog;
use crate::error::{config_error, env_error, ScheduleResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Default Redis connection
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Room used when `ROOM_ID` is not set
pub const DEFAULT_ROOM_ID: &str = "default";

/// Calendar grid granularity used when `SLOT_INTERVAL_MINUTES` is not set
pub const DEFAULT_SLOT_INTERVAL: u32 = 15;

/// Location of site-specific presets
pub const PRESETS_FILE: &str = "config/presets.toml";

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL for persisted schedules
    pub redis_url: String,
    /// Room whose hours are edited and evaluated
    pub room_id: String,
    /// IANA timezone the hours are expressed in
    pub timezone: String,
    /// Slot length for generated calendar grids
    pub slot_interval_minutes: u32,
    /// Presets loaded from the presets file
    pub custom_presets: Vec<Preset>,
}

#[derive(Debug, Default, Deserialize)]
struct PresetsFile {
    #[serde(default)]
    presets: Vec<Preset>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> ScheduleResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());
        let room_id = env::var("ROOM_ID").unwrap_or_else(|_| DEFAULT_ROOM_ID.to_string());
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));

        let slot_interval_minutes = match env::var("SLOT_INTERVAL_MINUTES") {
            Ok(raw) => parse_interval(&raw)?,
            Err(_) => DEFAULT_SLOT_INTERVAL,
        };

        let custom_presets = load_presets(Path::new(PRESETS_FILE))?;

        let config = Config {
            redis_url,
            room_id,
            timezone,
            slot_interval_minutes,
            custom_presets,
        };

        // Fail early on an unknown zone
        config.tz()?;

        Ok(config)
    }

    /// Resolve the configured timezone
    pub fn tz(&self) -> ScheduleResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }

    /// Built-in presets merged with the configured ones
    pub fn preset_catalog(&self) -> PresetCatalog {
        PresetCatalog::new(self.custom_presets.clone())
    }
}

fn parse_interval(raw: &str) -> ScheduleResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(env_error("SLOT_INTERVAL_MINUTES")),
    }
}

/// Read presets from a TOML file; a missing file means no custom presets
pub fn load_presets(path: &Path) -> ScheduleResult<Vec<Preset>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    parse_presets(&content)
}

fn parse_presets(content: &str) -> ScheduleResult<Vec<Preset>> {
    let file: PresetsFile = toml::from_str(content)?;
    Ok(file.presets)
}
