// --- File: crates/slotbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Backend API Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String, // e.g. SLOTBOOK__API__BASE_URL
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token issued by the backend, if one is already known.
    #[serde(default)]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

// --- Google Calendar Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    pub key_path: Option<String>, // Service account JSON
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

// --- Working Hours ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AvailabilityConfig {
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,
    #[serde(default = "default_day_end_hour")]
    pub day_end_hour: u32,
    #[serde(default = "default_slot_duration_minutes")]
    pub slot_duration_minutes: i64,
    /// IANA zone name the working hours are expressed in.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

fn default_day_start_hour() -> u32 {
    8
}

fn default_day_end_hour() -> u32 {
    17
}

fn default_slot_duration_minutes() -> i64 {
    60
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            day_start_hour: default_day_start_hour(),
            day_end_hour: default_day_end_hour(),
            slot_duration_minutes: default_slot_duration_minutes(),
            time_zone: default_time_zone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    // --- Runtime Flags ---
    #[serde(default)]
    pub use_gcal: bool,

    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub availability: AvailabilityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
