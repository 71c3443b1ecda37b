//! # Configuration Management Module
//!
//! This module handles all configuration aspects of questline, providing a
//! centralized configuration system with defaults and persistence.
//!
//! ## Configuration Structure
//!
//! The configuration is organized into logical sections:
//!
//! - [`TrackerConfig`] - Data persistence settings (user/quest store path)
//! - [`EngineConfig`] - Quest generation settings (model identity, templates, points range)
//! - [`LoggingConfig`] - Logging settings
//!
//! ## Configuration File Format
//!
//! Questline uses TOML format for human-readable configuration:
//!
//! ```toml
//! [tracker]
//! data_file = "data/users.json"
//!
//! [engine]
//! model_name = "sim-model-v1"
//! temperature = 0.3
//! points_range = [5, 15]
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Template lists may be customized; when either list is empty the engine
//! falls back to its built-in programmatic templates, so a sparse config file
//! still produces usable output.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Data persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Path to the JSON document holding the user -> quest-list mapping.
    pub data_file: String,
}

/// Quest generation settings.
///
/// `model_name` is mixed into the deterministic seed together with the goal;
/// changing it changes every generated sequence. `temperature` is carried as
/// part of the engine's configured identity but does not feed the seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub model_name: String,
    pub temperature: f32,
    /// Name templates; `{goal_short}` is replaced with a title-cased short
    /// form of the goal. Empty list falls back to built-in templates.
    #[serde(default)]
    pub name_templates: Vec<String>,
    /// Description templates; `{goal}` is replaced with the raw goal text.
    /// Empty list falls back to a built-in supportive sentence.
    #[serde(default)]
    pub description_templates: Vec<String>,
    /// Inclusive `[low, high]` range for generated point values.
    #[serde(default = "default_points_range")]
    pub points_range: [u32; 2],
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_points_range() -> [u32; 2] {
    [5, 15]
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_file: "data/users.json".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_name: "sim-model-v1".to_string(),
            temperature: 0.3,
            name_templates: vec![
                "{goal_short} - Quick Win".to_string(),
                "{goal_short} - Mini Habit".to_string(),
                "{goal_short} - Boost".to_string(),
                "{goal_short} - Momentum".to_string(),
                "{goal_short} - Push Forward".to_string(),
                "{goal_short} - Step Forward".to_string(),
                "{goal_short} - Micro Task".to_string(),
            ],
            description_templates: vec![
                "Do a short action to help with the goal: {goal}. Keep it manageable.".to_string(),
                "Perform a small step toward: {goal}. Make it achievable today.".to_string(),
                "Take a tiny action to progress with: {goal}. Keep it consistent.".to_string(),
                "Small activity to support {goal}. Stay focused and repeatable.".to_string(),
                "Quick task to advance {goal}. Keep it light and achievable.".to_string(),
            ],
            points_range: default_points_range(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            engine: EngineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file.
    pub fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tracker.data_file, "data/users.json");
        assert_eq!(config.engine.model_name, "sim-model-v1");
        assert_eq!(config.engine.points_range, [5, 15]);
        assert_eq!(config.engine.name_templates.len(), 7);
        assert_eq!(config.engine.description_templates.len(), 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_templates_carry_placeholders() {
        let config = EngineConfig::default();
        assert!(config
            .name_templates
            .iter()
            .all(|t| t.contains("{goal_short}")));
        assert!(config
            .description_templates
            .iter()
            .all(|t| t.contains("{goal}")));
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.engine.model_name, config.engine.model_name);
        assert_eq!(parsed.engine.points_range, config.engine.points_range);
        assert_eq!(parsed.tracker.data_file, config.tracker.data_file);
    }

    #[test]
    fn test_sparse_config_parses_with_defaults() {
        let toml_src = r#"
            [tracker]
            data_file = "alt/users.json"

            [engine]
            model_name = "sim-model-v2"
            temperature = 0.7

            [logging]
            level = "debug"
        "#;
        let config: Config = toml::from_str(toml_src).unwrap();
        assert_eq!(config.tracker.data_file, "alt/users.json");
        assert_eq!(config.engine.model_name, "sim-model-v2");
        // Omitted lists stay empty; the engine handles the fallback
        assert!(config.engine.name_templates.is_empty());
        assert_eq!(config.engine.points_range, [5, 15]);
    }

    #[test]
    fn test_empty_config_parses_with_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.tracker.data_file, "data/users.json");
        assert_eq!(config.logging.level, "info");
    }
}
