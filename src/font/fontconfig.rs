//! fontconfig integration
//!
//! Turns font chain entries into file paths. An entry may be a file path
//! (`~` expanded) or a family name looked up through fontconfig.

use crate::error::FontLoadError;
use fontconfig::Fontconfig;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Font search result
#[derive(Debug, Clone)]
pub struct FontMatch {
    /// Font file path
    pub path: PathBuf,
    /// Font name
    pub family: String,
}

/// Search fonts using fontconfig
pub struct FontFinder {
    fc: Fontconfig,
}

impl FontFinder {
    /// Initialize FontFinder; None if fontconfig is unavailable
    pub fn new() -> Option<Self> {
        let fc = Fontconfig::new()?;
        info!("fontconfig initialized");
        Some(Self { fc })
    }

    /// Search by font name
    /// Verifies that the returned font actually matches the requested family name
    /// (fontconfig always returns the "closest" match, even if completely unrelated)
    pub fn find_font(&self, family: &str) -> Option<FontMatch> {
        let font = self.fc.find(family, None)?;
        if family_matches(family, &font.name) {
            return Some(FontMatch {
                path: font.path,
                family: font.name,
            });
        }
        warn!(
            "fontconfig: rejected false match for \"{}\": got \"{}\"",
            family, font.name
        );
        None
    }

    /// First available family from a candidate list
    fn find_first(&self, candidates: &[&str]) -> Option<FontMatch> {
        candidates.iter().find_map(|name| self.find_font(name))
    }

    /// Search for monospace font
    pub fn find_monospace(&self) -> Option<FontMatch> {
        self.find_first(&[
            "DejaVu Sans Mono",
            "Liberation Mono",
            "Noto Sans Mono",
            "Source Code Pro",
            "Inconsolata",
            "monospace",
        ])
    }

    /// Search for CJK font
    pub fn find_cjk(&self) -> Option<FontMatch> {
        self.find_first(&[
            "Noto Sans CJK JP",
            "Noto Sans CJK",
            "Source Han Sans",
            "WenQuanYi Zen Hei",
            "IPAGothic",
            "VL Gothic",
        ])
    }

    /// Search for a wide-coverage symbol font
    pub fn find_symbols(&self) -> Option<FontMatch> {
        self.find_first(&["Symbols Nerd Font Mono", "Noto Sans Symbols2", "DejaVu Sans"])
    }
}

/// Loose family comparison: either name contains the other, ignoring ASCII case
fn family_matches(requested: &str, got: &str) -> bool {
    let req = requested.to_ascii_lowercase();
    let got = got.to_ascii_lowercase();
    got.contains(&req) || req.contains(&got)
}

/// Expand a leading `~` to the home directory
pub fn expand_path(path: &str, user_home: Option<&Path>) -> PathBuf {
    if !path.starts_with('~') {
        return PathBuf::from(path);
    }

    // Get home directory: prefer provided value, fallback to dirs
    let home = user_home.map(Path::to_path_buf).or_else(dirs::home_dir);

    match home {
        Some(home) if path == "~" => home,
        Some(home) => home.join(path[1..].trim_start_matches('/')),
        None => PathBuf::from(path),
    }
}

/// Resolve a font specifier: an existing file path is used directly,
/// anything else is treated as a family name and searched via fontconfig.
pub fn resolve_font_path(
    specifier: &str,
    finder: Option<&FontFinder>,
) -> Result<PathBuf, FontLoadError> {
    let path = expand_path(specifier, None);
    if path.is_file() {
        return Ok(path);
    }

    if let Some(font_match) = finder.and_then(|f| f.find_font(specifier)) {
        info!(
            "Font resolved by name: \"{}\" → {} ({})",
            specifier,
            font_match.family,
            font_match.path.display()
        );
        return Ok(font_match.path);
    }

    Err(FontLoadError::NotFound(specifier.to_string()))
}

/// Resolve every configured entry; unresolvable entries are logged and skipped
pub fn resolve_font_chain(specifiers: &[String]) -> Vec<PathBuf> {
    // Only start fontconfig if some entry is not a plain file
    let needs_lookup = specifiers.iter().any(|s| !expand_path(s, None).is_file());
    let finder = if needs_lookup { FontFinder::new() } else { None };

    specifiers
        .iter()
        .filter_map(|spec| match resolve_font_path(spec, finder.as_ref()) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping font: {}", e);
                None
            }
        })
        .collect()
}

/// System fallback chain when no fonts are configured: monospace, CJK, symbols
pub fn system_font_chain() -> Vec<PathBuf> {
    let Some(finder) = FontFinder::new() else {
        warn!("fontconfig unavailable; no system fonts");
        return Vec::new();
    };

    let mut chain: Vec<PathBuf> = Vec::new();
    for found in [finder.find_monospace(), finder.find_cjk(), finder.find_symbols()]
        .into_iter()
        .flatten()
    {
        if !chain.contains(&found.path) {
            info!("System font: {} ({})", found.family, found.path.display());
            chain.push(found.path);
        }
    }
    chain
}
