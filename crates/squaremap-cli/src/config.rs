//! YAML configuration for the squaremap CLI.
//!
//! Settings are layered: built-in defaults, then the first config file
//! found, then command line flags.

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use squaremap_core::Size;
use squaremap_layout::{LayoutConfig, SortOrder, TileMethod};
use std::fs;
use std::path::{Path, PathBuf};

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Engine settings
    pub layout: LayoutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 600.0,
            layout: LayoutConfig::default(),
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub padding: Option<f64>,
    pub ratio: Option<f64>,
    pub tile: Option<TileMethod>,
    pub order: Option<SortOrder>,
}

impl AppConfig {
    /// Get XDG-compliant config paths to search
    /// Order: $`XDG_CONFIG_HOME/squaremap/config.yaml`, ~/.config/squaremap/config.yaml
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("squaremap/config.yaml"));
        }

        if let Ok(home) = std::env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/squaremap/config.yaml"));
        }

        paths
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the first existing file
    /// from [`config_paths`](Self::config_paths) is used, falling back to
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::ConfigNotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        for path in Self::config_paths() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        log::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: &Path) -> Result<Self, CliError> {
        let contents = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loading config from {}", path.display());
        Self::parse_yaml(&contents)
    }

    /// Parse YAML; missing keys take their defaults.
    pub fn parse_yaml(contents: &str) -> Result<Self, CliError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    /// Serialize as YAML.
    pub fn to_yaml(&self) -> Result<String, CliError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Generate default configuration as YAML string
    pub fn default_yaml() -> String {
        r"# squaremap configuration file
# Location: ~/.config/squaremap/config.yaml

# Canvas size in output units
width: 960
height: 600

layout:
  # Inset applied to every tile
  padding: 0
  # Target aspect ratio for squarify rows (>= 1; 1.618 matches d3)
  ratio: 1
  # squarify | slice | dice | slice-dice | binary
  tile: squarify
  # height-then-value | value | input
  order: height-then-value
"
        .to_string()
    }

    /// Apply command line overrides.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(padding) = overrides.padding {
            self.layout.padding = padding;
        }
        if let Some(ratio) = overrides.ratio {
            self.layout.ratio = ratio;
        }
        if let Some(tile) = overrides.tile {
            self.layout.tile = tile;
        }
        if let Some(order) = overrides.order {
            self.layout.order = order;
        }
    }

    /// Canvas size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
