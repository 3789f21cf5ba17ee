//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Sangam configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default path for the completed profile
    pub output: Option<PathBuf>,

    /// Default output format ("json" or "yaml")
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/sangam/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(output) = std::env::var("SANGAM_OUTPUT") {
            config.output = Some(PathBuf::from(output));
        }
        if let Ok(format) = std::env::var("SANGAM_FORMAT") {
            config.format = Some(format);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sangam")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.output.is_some() {
            self.output = other.output;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
    }

    /// Resolved output format, defaulting to JSON
    pub fn format(&self) -> String {
        self.format.clone().unwrap_or_else(|| "json".to_string())
    }
}
