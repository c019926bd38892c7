use std::path::{Path, PathBuf};

use image::Rgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::font::FontChain;
use crate::render::IconStyle;

/// Errors raised while loading or validating the icon configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid color '{0}' (expected #rrggbb, #rgb, white or black)")]
    InvalidColor(String),
    #[error("no icon sizes configured")]
    NoSizes,
    #[error("icon size must be positive")]
    ZeroSize,
}

/// Icon generation settings stored as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Square icon sizes in pixels, generated in this order.
    #[serde(default = "default_sizes")]
    pub sizes: Vec<u32>,
    /// Text drawn in the middle of the icon.
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_foreground")]
    pub foreground: String,
    /// Font files tried in order before the built-in bitmap font.
    #[serde(default = "default_fonts")]
    pub fonts: Vec<PathBuf>,
}

fn default_sizes() -> Vec<u32> {
    vec![16, 48, 128]
}

fn default_label() -> String {
    "M".into()
}

fn default_background() -> String {
    "#1976d2".into()
}

fn default_foreground() -> String {
    "#ffffff".into()
}

fn default_fonts() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
        PathBuf::from("/System/Library/Fonts/Helvetica.ttc"),
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            label: default_label(),
            background: default_background(),
            foreground: default_foreground(),
            fonts: default_fonts(),
        }
    }
}

impl AppConfig {
    /// Config file path: ~/.config/mdicons/config.toml
    pub fn path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mdicons");
        config_dir.join("config.toml")
    }

    /// Load config from the default location, or return defaults.
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("{}", e),
            }
        }
        Self::default()
    }

    /// Load config from an explicit file. Unlike [`AppConfig::load`], failures are returned.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Config loaded from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::NoSizes);
        }
        if self.sizes.contains(&0) {
            return Err(ConfigError::ZeroSize);
        }
        self.style()?;
        Ok(())
    }

    /// Colors and label for the renderer.
    pub fn style(&self) -> Result<IconStyle, ConfigError> {
        Ok(IconStyle {
            background: parse_color(&self.background)?,
            foreground: parse_color(&self.foreground)?,
            label: self.label.clone(),
        })
    }

    pub fn font_chain(&self) -> FontChain {
        FontChain::new(self.fonts.clone())
    }
}

/// Parse `#rrggbb`, `#rgb`, `white` or `black` into an RGB color.
pub fn parse_color(value: &str) -> Result<Rgb<u8>, ConfigError> {
    let invalid = || ConfigError::InvalidColor(value.to_string());
    let trimmed = value.trim();

    match trimmed.to_ascii_lowercase().as_str() {
        "white" => return Ok(Rgb([0xFF, 0xFF, 0xFF])),
        "black" => return Ok(Rgb([0x00, 0x00, 0x00])),
        _ => {}
    }

    let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
        }
        3 => {
            // #abc expands to #aabbcc
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 1], 16)
                    .map(|v| v * 0x11)
                    .map_err(|_| invalid())
            };
            Ok(Rgb([channel(0)?, channel(1)?, channel(2)?]))
        }
        _ => Err(invalid()),
    }
}
