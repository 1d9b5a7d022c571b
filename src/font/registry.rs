//! Font fallback chain
//!
//! Holds the loaded faces of one rendering session in load order and
//! resolves a code point to the first face that maps it.
//!
//! The registry is read-only after `init`. Whether it may be shared across
//! threads follows from the engine's face type: see `FreeTypeEngine` and
//! `FontdueEngine`.

use crate::font::codepoint::CodePoint;
use crate::font::engine::FontEngine;
use log::{debug, info, trace, warn};
use std::path::{Path, PathBuf};

/// One entry of the fallback chain
pub struct LoadedFont<F> {
    /// Engine face
    pub face: F,
    /// File the face was loaded from
    pub path: PathBuf,
    /// Position in the chain (0 = primary)
    pub index: usize,
}

/// Ordered font fallback chain at a single pixel height
pub struct FontRegistry<E: FontEngine> {
    // Field order matters: faces are dropped before the engine that owns them
    fonts: Vec<LoadedFont<E::Face>>,
    engine: E,
    pixel_height: u32,
}

impl<E: FontEngine> FontRegistry<E> {
    /// Load `paths` in order at `pixel_height`.
    ///
    /// A font that fails to load is logged and left out; the rest of the chain
    /// still loads. An empty chain is valid and resolves nothing.
    pub fn init<P: AsRef<Path>>(engine: E, paths: &[P], pixel_height: u32) -> Self {
        let mut fonts = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            match engine.load_font(path, pixel_height) {
                Ok(face) => {
                    let family = engine
                        .family_name(&face)
                        .unwrap_or_else(|| "unknown".to_string());
                    info!(
                        "{} font loaded: {} ({}, {}px)",
                        engine.name(),
                        family,
                        path.display(),
                        pixel_height
                    );
                    fonts.push(LoadedFont {
                        face,
                        path: path.to_path_buf(),
                        index: fonts.len(),
                    });
                }
                Err(e) => warn!("Failed to load font (continuing): {}", e),
            }
        }

        if fonts.is_empty() {
            warn!("Font chain is empty; no character can be rendered");
        }

        Self {
            fonts,
            engine,
            pixel_height,
        }
    }

    /// First font in load order whose character map covers `cp`
    pub fn resolve(&self, cp: CodePoint) -> Option<&LoadedFont<E::Face>> {
        let found = self
            .fonts
            .iter()
            .find(|font| self.engine.has_glyph(&font.face, cp));
        match found {
            Some(font) => trace!("U+{:04X} resolved to font #{}", cp, font.index),
            None => debug!("No font covers U+{:04X}", cp),
        }
        found
    }

    /// Rasterizer engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Pixel height every face was loaded at
    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// Number of loaded fonts
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Loaded fonts in chain order
    pub fn fonts(&self) -> impl Iterator<Item = &LoadedFont<E::Face>> {
        self.fonts.iter()
    }

    /// Release all faces, then the engine
    pub fn teardown(self) {
        let Self { fonts, engine, .. } = self;
        let count = fonts.len();
        for font in fonts {
            debug!("Releasing font {}", font.path.display());
            drop(font);
        }
        drop(engine);
        info!("Font chain released ({} fonts)", count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FontLoadError;
    use crate::font::engine::CoverageBitmap;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Face named by its path, covering a fixed character set
    struct TestFace {
        name: String,
        chars: Vec<char>,
        drops: Rc<RefCell<Vec<String>>>,
    }

    impl Drop for TestFace {
        fn drop(&mut self) {
            self.drops.borrow_mut().push(self.name.clone());
        }
    }

    struct TestEngine {
        drops: Rc<RefCell<Vec<String>>>,
    }

    impl Drop for TestEngine {
        fn drop(&mut self) {
            self.drops.borrow_mut().push("engine".to_string());
        }
    }

    impl FontEngine for TestEngine {
        type Face = TestFace;

        fn name(&self) -> &'static str {
            "test"
        }

        fn load_font(&self, path: &Path, _pixel_height: u32) -> Result<TestFace, FontLoadError> {
            let name = path.to_string_lossy().to_string();
            let chars = match name.as_str() {
                "latin" => vec!['A', 'B', 'é'],
                "cjk" => vec!['A', '日', '本'],
                "symbols" => vec!['★'],
                _ => return Err(FontLoadError::NotFound(name)),
            };
            Ok(TestFace {
                name,
                chars,
                drops: self.drops.clone(),
            })
        }

        fn has_glyph(&self, face: &TestFace, cp: CodePoint) -> bool {
            char::from_u32(cp).is_some_and(|c| face.chars.contains(&c))
        }

        fn rasterize(&self, _face: &TestFace, _cp: CodePoint) -> Option<CoverageBitmap> {
            Some(CoverageBitmap::empty(0))
        }
    }

    fn registry(paths: &[&str]) -> (FontRegistry<TestEngine>, Rc<RefCell<Vec<String>>>) {
        let drops = Rc::new(RefCell::new(Vec::new()));
        let engine = TestEngine {
            drops: drops.clone(),
        };
        (FontRegistry::init(engine, paths, 16), drops)
    }

    #[test]
    fn test_resolve_first_covering_font() {
        let (reg, _) = registry(&["latin", "cjk", "symbols"]);
        assert_eq!(reg.resolve('B' as u32).map(|f| f.index), Some(0));
        assert_eq!(reg.resolve('日' as u32).map(|f| f.index), Some(1));
        assert_eq!(reg.resolve('★' as u32).map(|f| f.index), Some(2));
        assert!(reg.resolve('Ω' as u32).is_none());
    }

    #[test]
    fn test_chain_order_decides_overlap() {
        let (reg, _) = registry(&["latin", "cjk"]);
        let winner = reg.resolve('A' as u32).map(|f| f.path.clone());
        assert_eq!(winner, Some(PathBuf::from("latin")));

        let (reg, _) = registry(&["cjk", "latin"]);
        let winner = reg.resolve('A' as u32).map(|f| f.path.clone());
        assert_eq!(winner, Some(PathBuf::from("cjk")));
    }

    #[test]
    fn test_failed_font_is_skipped() {
        let (reg, _) = registry(&["missing", "cjk", "broken", "symbols"]);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.pixel_height(), 16);
        let indices: Vec<usize> = reg.fonts().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(reg.resolve('★' as u32).map(|f| f.index), Some(1));
    }

    #[test]
    fn test_empty_chain_resolves_nothing() {
        let (reg, _) = registry(&[]);
        assert!(reg.is_empty());
        assert!(reg.resolve('A' as u32).is_none());
    }

    #[test]
    fn test_teardown_releases_faces_before_engine() {
        let (reg, drops) = registry(&["latin", "cjk"]);
        reg.teardown();
        assert_eq!(*drops.borrow(), vec!["latin", "cjk", "engine"]);
    }

    #[test]
    fn test_drop_releases_faces_before_engine() {
        let (reg, drops) = registry(&["symbols"]);
        drop(reg);
        assert_eq!(*drops.borrow(), vec!["symbols", "engine"]);
    }
}
