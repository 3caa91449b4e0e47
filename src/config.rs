// File: ./src/config.rs
// Handles user-preference loading, saving, and defaults.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::context::AppContext;
use crate::interval::Interval;

fn default_show_upcoming() -> bool {
    true
}

fn default_refresh_interval() -> u32 {
    5
}

/// User preferences for the menubar surface: which lists are shown, how the
/// upcoming section is scoped, and how often to refresh.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Lists shown in the main view, by uid. Empty means nothing selected.
    #[serde(default)]
    pub selected_lists: Vec<String>,

    #[serde(default)]
    pub upcoming_interval: Interval,

    /// Optional list filter for the upcoming section. `None` follows all
    /// lists; an explicit empty set hides the section's content entirely.
    #[serde(default)]
    pub upcoming_lists: Option<Vec<String>>,

    #[serde(default = "default_show_upcoming")]
    pub show_upcoming: bool,

    #[serde(default = "default_refresh_interval")]
    pub auto_refresh_interval_mins: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selected_lists: Vec::new(),
            upcoming_interval: Interval::default(),
            upcoming_lists: None,
            // Match the serde defaults
            show_upcoming: true,
            auto_refresh_interval_mins: 5,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers (onboarding) can behave
        // accordingly.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default(ctx: &dyn AppContext) -> Self {
        Self::load(ctx).unwrap_or_default()
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&path, toml_str).map_err(|e| {
            anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e)
        })?;
        Ok(())
    }
}
