//! Configuration file management
//!
//! Loads TOML configuration files and provides render settings.
//! Default config path: ~/.config/glyphcell/config.toml
//!
//! ```toml
//! [font]
//! chain = ["~/.fonts/DejaVuSansMono.ttf", "Noto Sans CJK JP"]
//! pixel_height = 40
//! engine = "freetype"
//!
//! [cell]
//! width = 48
//! height = 40
//! baseline = 34
//!
//! [colors]
//! foreground = "ffffff"
//! background = "000000"
//! ```

use crate::constants::{
    DEFAULT_BACKGROUND, DEFAULT_CELL_BASELINE, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH,
    DEFAULT_FOREGROUND, DEFAULT_PIXEL_HEIGHT, MAX_PIXEL_HEIGHT, MIN_PIXEL_HEIGHT,
};
use crate::render::CellGeometry;
use crate::utils::parse_hex_color_argb;
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font settings
    pub font: FontConfig,
    /// Output cell settings
    pub cell: CellConfig,
    /// Default colors
    pub colors: ColorConfig,
}

/// Rasterizer backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// FreeType (system library)
    #[default]
    FreeType,
    /// fontdue (pure Rust)
    Fontdue,
}

impl EngineKind {
    /// Convert from command-line string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "freetype" | "ft" => Some(Self::FreeType),
            "fontdue" => Some(Self::Fontdue),
            _ => None,
        }
    }
}

/// Font settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Fallback chain in priority order: file paths (`~` allowed) or family names.
    /// Empty = discover monospace, CJK and symbol fonts via fontconfig
    pub chain: Vec<String>,
    /// Font pixel height
    pub pixel_height: u32,
    /// Rasterizer backend: "freetype" | "fontdue"
    pub engine: EngineKind,
}

/// Output cell settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellConfig {
    /// Requested cell width (pixels); narrow glyphs use half of it
    pub width: usize,
    /// Cell height (pixels)
    pub height: usize,
    /// Baseline row from the top
    pub baseline: i32,
}

/// Default colors (RRGGBB or AARRGGBB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub foreground: String,
    pub background: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            chain: Vec::new(),
            pixel_height: DEFAULT_PIXEL_HEIGHT,
            engine: EngineKind::default(),
        }
    }
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CELL_WIDTH,
            height: DEFAULT_CELL_HEIGHT,
            baseline: DEFAULT_CELL_BASELINE,
        }
    }
}

impl CellConfig {
    /// Geometry for the render pipeline
    pub fn geometry(&self) -> CellGeometry {
        CellGeometry::new(self.width, self.height, self.baseline)
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            foreground: "ffffff".to_string(),
            background: "000000".to_string(),
        }
    }
}

impl ColorConfig {
    /// Foreground as ARGB (white on invalid input)
    pub fn foreground_argb(&self) -> u32 {
        parse_color_or(&self.foreground, DEFAULT_FOREGROUND)
    }

    /// Background as ARGB (black on invalid input)
    pub fn background_argb(&self) -> u32 {
        parse_color_or(&self.background, DEFAULT_BACKGROUND)
    }
}

fn parse_color_or(hex: &str, fallback: u32) -> u32 {
    parse_hex_color_argb(hex).unwrap_or_else(|| {
        warn!("Invalid color \"{}\", using {:08X}", hex, fallback);
        fallback
    })
}

impl Config {
    /// System-wide config path
    const SYSTEM_CONFIG_PATH: &'static str = "/etc/glyphcell/config.toml";

    /// Environment variable overriding the config path
    const CONFIG_ENV: &'static str = "GLYPHCELL_CONFIG";

    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. GLYPHCELL_CONFIG environment variable
        if let Ok(path) = std::env::var(Self::CONFIG_ENV) {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
        }

        // 2. User config: ~/.config/glyphcell/config.toml
        if let Some(config_path) = default_config_path() {
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // 3. System config: /etc/glyphcell/config.toml
        let system_config = Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration with priority:
    /// 1. GLYPHCELL_CONFIG environment variable
    /// 2. ~/.config/glyphcell/config.toml (user config)
    /// 3. /etc/glyphcell/config.toml (system config)
    /// 4. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse and sanitize TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.sanitize();
        Ok(config)
    }

    /// Clamp out-of-range values back to something renderable
    fn sanitize(&mut self) {
        let px = self.font.pixel_height;
        let clamped = px.clamp(MIN_PIXEL_HEIGHT, MAX_PIXEL_HEIGHT);
        if clamped != px {
            warn!("font.pixel_height {} out of range, using {}", px, clamped);
            self.font.pixel_height = clamped;
        }

        if self.cell.width == 0 || self.cell.height == 0 {
            warn!(
                "cell size {}x{} invalid, using defaults",
                self.cell.width, self.cell.height
            );
            self.cell = CellConfig::default();
        }
    }
}

/// Get default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("glyphcell").join("config.toml"))
}
