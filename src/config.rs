//! Popup appearance and timing configuration
//!
//! Every field has a default, so an empty or partial TOML file is valid.

use crate::errors::{NotifierError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default display time before the popup dismisses itself
pub const DEFAULT_DURATION_MS: u64 = 800;

/// Application configuration loaded from file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Display time in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Popup appearance
    #[serde(default)]
    pub style: PopupStyle,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            style: PopupStyle::default(),
        }
    }
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

/// Window geometry, colors and text layout of the popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupStyle {
    /// Window width in logical points
    #[serde(default = "default_width")]
    pub width: f32,

    /// Window height in logical points
    #[serde(default = "default_height")]
    pub height: f32,

    /// Background color (#rrggbb or a basic color name)
    #[serde(default = "default_background")]
    pub background: String,

    /// Text color (#rrggbb or a basic color name)
    #[serde(default = "default_foreground")]
    pub foreground: String,

    /// Message font size in logical points
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Width at which the message wraps
    #[serde(default = "default_wrap_width")]
    pub wrap_width: f32,

    /// Vertical padding around the label
    #[serde(default = "default_padding")]
    pub padding: f32,

    /// Keep the popup above all other windows
    #[serde(default = "default_true")]
    pub always_on_top: bool,

    /// Allow the user to resize the popup
    #[serde(default)]
    pub resizable: bool,
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
            foreground: default_foreground(),
            font_size: default_font_size(),
            wrap_width: default_wrap_width(),
            padding: default_padding(),
            always_on_top: true,
            resizable: false,
        }
    }
}

fn default_width() -> f32 {
    350.0
}

fn default_height() -> f32 {
    100.0
}

fn default_background() -> String {
    "black".to_string()
}

fn default_foreground() -> String {
    "white".to_string()
}

fn default_font_size() -> f32 {
    20.0
}

fn default_wrap_width() -> f32 {
    320.0
}

fn default_padding() -> f32 {
    10.0
}

fn default_true() -> bool {
    true
}

/// An sRGB color without alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb` or a basic color name (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let named = match s.to_ascii_lowercase().as_str() {
            "black" => Some(Self(0, 0, 0)),
            "white" => Some(Self(255, 255, 255)),
            "red" => Some(Self(255, 0, 0)),
            "green" => Some(Self(0, 128, 0)),
            "blue" => Some(Self(0, 0, 255)),
            "yellow" => Some(Self(255, 255, 0)),
            "gray" | "grey" => Some(Self(128, 128, 128)),
            _ => None,
        };
        if let Some(rgb) = named {
            return Ok(rgb);
        }

        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| NotifierError::InvalidColor(s.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| NotifierError::InvalidColor(s.to_string()))
        };
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl PopupStyle {
    /// Resolved (background, foreground) colors
    pub fn colors(&self) -> Result<(Rgb, Rgb)> {
        Ok((Rgb::parse(&self.background)?, Rgb::parse(&self.foreground)?))
    }

    /// Horizontal margin that leaves exactly `wrap_width` for the label
    pub fn side_margin(&self) -> f32 {
        ((self.width - self.wrap_width) / 2.0).max(0.0)
    }
}

impl NotifierConfig {
    /// Configured display time
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Load configuration from default path (~/.config/blink/config.toml)
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Get the default configuration path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new().map_or_else(
            || PathBuf::from("~/.config/blink/config.toml"),
            |dirs| dirs.config_dir().join("blink").join("config.toml"),
        )
    }

    /// Load configuration from a specific path, falling back to defaults
    pub fn load_from_path(path: PathBuf) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_strict(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a path the user asked for explicitly
    ///
    /// Unlike [`Self::load_from_path`], a missing or malformed file is an error.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| NotifierError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| NotifierError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.style.colors()?;
        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Generate example configuration file content
    pub fn example() -> String {
        r##"# Blink Configuration
# Place this file at ~/.config/blink/config.toml

# How long the popup stays on screen, in milliseconds
duration_ms = 800

[style]
# Window size in logical points
width = 350.0
height = 100.0

# Colors: "#rrggbb" or black, white, red, green, blue, yellow, gray
background = "black"
foreground = "white"

# Message text
font_size = 20.0
wrap_width = 320.0
padding = 10.0

always_on_top = true
resizable = false
"##
        .to_string()
    }
}
