//! User settings for notion-expenses
//!
//! Manages API endpoint settings, the Notion property names to read, display
//! preferences and cache lifetime.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Largest page size the Notion query endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Names of the Notion properties that make up one expense row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyNames {
    /// Title column, shown as the expense name
    #[serde(default = "default_name_property")]
    pub name: String,
    #[serde(default = "default_date_property")]
    pub date: String,
    #[serde(default = "default_category_property")]
    pub category: String,
    #[serde(default = "default_amount_property")]
    pub amount: String,
    /// Free-text column
    #[serde(default = "default_description_property")]
    pub description: String,
}

fn default_name_property() -> String {
    "Name".to_string()
}

fn default_date_property() -> String {
    "Date".to_string()
}

fn default_category_property() -> String {
    "Category".to_string()
}

fn default_amount_property() -> String {
    "Amount".to_string()
}

fn default_description_property() -> String {
    "Comment".to_string()
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            name: default_name_property(),
            date: default_date_property(),
            category: default_category_property(),
            amount: default_amount_property(),
            description: default_description_property(),
        }
    }
}

/// User settings for notion-expenses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the Notion REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Value sent in the `Notion-Version` header
    #[serde(default = "default_notion_version")]
    pub notion_version: String,

    /// Records requested per query page (1..=100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How long a fetched snapshot is reused, in seconds (0 disables caching)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Offset from UTC, in minutes, used to turn timestamps into calendar dates
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Rows shown in the recent expenses panel
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Categories preselected in the monthly trend panel
    #[serde(default = "default_trend_categories")]
    pub trend_categories: usize,

    /// Notion property names
    #[serde(default)]
    pub properties: PropertyNames,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "https://api.notion.com/v1".to_string()
}

fn default_notion_version() -> String {
    "2022-06-28".to_string()
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_utc_offset_minutes() -> i32 {
    330 // +05:30
}

fn default_recent_limit() -> usize {
    10
}

fn default_trend_categories() -> usize {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            notion_version: default_notion_version(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            currency_symbol: default_currency(),
            utc_offset_minutes: default_utc_offset_minutes(),
            recent_limit: default_recent_limit(),
            trend_categories: default_trend_categories(),
            properties: PropertyNames::default(),
        }
    }
}

impl Settings {
    /// Page size clamped to what the API accepts
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Whether fetched snapshots should be cached at all
    pub fn cache_enabled(&self) -> bool {
        self.cache_ttl_secs > 0
    }

    /// Load settings from disk, or use default settings if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - `init` decides when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            ExpenseError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
