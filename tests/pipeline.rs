//! End-to-end pipeline tests against an in-memory rasterizer

use glyphcell::font::codepoint::CodePoint;
use glyphcell::{
    render_cell, render_cell_into, render_line, CellGeometry, CellRenderer, CoverageBitmap,
    FontEngine, FontLoadError, FontRegistry, RenderError,
};
use std::path::Path;

const WHITE: u32 = 0xFFFF_FFFF;
const BLACK: u32 = 0xFF00_0000;

/// Glyph table entry: (char, width, height, baseline)
type GlyphSpec = (char, usize, usize, i32);

struct SyntheticFace {
    glyphs: Vec<GlyphSpec>,
    /// Mapped in the cmap but without a renderable outline
    broken: Vec<char>,
}

/// Faces are selected by file name; glyphs are horizontal 0..=255 ramps
struct SyntheticEngine;

impl FontEngine for SyntheticEngine {
    type Face = SyntheticFace;

    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn load_font(&self, path: &Path, _pixel_height: u32) -> Result<SyntheticFace, FontLoadError> {
        let name = path.to_string_lossy();
        let face = match name.as_ref() {
            "latin" => SyntheticFace {
                glyphs: vec![('A', 11, 12, 12), ('g', 9, 12, 8), (' ', 0, 0, 0), ('W', 40, 10, 12)],
                broken: vec!['X'],
            },
            "cjk" => SyntheticFace {
                glyphs: vec![('A', 14, 12, 12), ('日', 30, 16, 14)],
                broken: vec![],
            },
            _ => return Err(FontLoadError::NotFound(name.to_string())),
        };
        Ok(face)
    }

    fn has_glyph(&self, face: &SyntheticFace, cp: CodePoint) -> bool {
        let Some(ch) = char::from_u32(cp) else {
            return false;
        };
        face.glyphs.iter().any(|g| g.0 == ch) || face.broken.contains(&ch)
    }

    fn rasterize(&self, face: &SyntheticFace, cp: CodePoint) -> Option<CoverageBitmap> {
        let ch = char::from_u32(cp)?;
        let &(_, width, height, baseline) = face.glyphs.iter().find(|g| g.0 == ch)?;
        let data = (0..height)
            .flat_map(|_| (0..width).map(move |x| (x * 255 / width.saturating_sub(1).max(1)) as u8))
            .collect();
        Some(CoverageBitmap {
            data,
            width,
            height,
            baseline,
        })
    }
}

fn registry(paths: &[&str]) -> FontRegistry<SyntheticEngine> {
    FontRegistry::init(SyntheticEngine, paths, 16)
}

fn channels(p: u32) -> (u8, u8, u8, u8) {
    let [a, r, g, b] = p.to_be_bytes();
    (a, r, g, b)
}

#[test]
fn test_render_ascii_a() {
    let reg = registry(&["latin", "cjk"]);
    let geometry = CellGeometry::new(16, 20, 16);
    let cell = render_cell(&reg, "A", WHITE, BLACK, &geometry).unwrap();

    assert_eq!((cell.width, cell.height), (16, 20));
    assert_eq!(cell.pixels.len(), 16 * 20);

    // 11x12 glyph, baseline 12: rows 4..16, columns 2..13
    for y in 0..20 {
        for x in 0..16 {
            let p = cell.pixel(x, y);
            let (a, r, g, b) = channels(p);
            assert_eq!(a, 0xFF);
            assert!(r == g && g == b, "gray expected at ({}, {})", x, y);
            let inside = (4..16).contains(&y) && (2..13).contains(&x);
            if !inside {
                assert_eq!(p, BLACK, "background expected at ({}, {})", x, y);
            }
        }
    }

    // Coverage ramp: left edge background, right edge foreground, increasing between
    let row = cell.row(8);
    assert_eq!(row[2], BLACK);
    assert_eq!(row[12], WHITE);
    for x in 3..13 {
        assert!(channels(row[x]).1 >= channels(row[x - 1]).1);
    }
}

#[test]
fn test_descender_sits_on_baseline() {
    let reg = registry(&["latin"]);
    let geometry = CellGeometry::new(24, 20, 16);
    let cell = render_cell(&reg, "g", WHITE, BLACK, &geometry).unwrap();
    // 3 * 9 < 2 * 24: half width
    assert_eq!(cell.width, 12);
    // Baseline 8 below the top: glyph starts at row 8, ends at row 19
    assert!(cell.row(7).iter().all(|&p| p == BLACK));
    assert_eq!(cell.row(8)[9], WHITE);
    assert_eq!(cell.row(19)[9], WHITE);
    assert_eq!(cell.row(19)[10], BLACK);
}

#[test]
fn test_fallback_font_renders_wide_glyph() {
    let reg = registry(&["latin", "cjk"]);
    let geometry = CellGeometry::new(32, 20, 16);
    let cell = render_cell(&reg, "日本", WHITE, BLACK, &geometry).unwrap();
    assert_eq!(cell.width, 32);
    // y_off = 2, x_off = 1
    assert_eq!(cell.row(2)[1], BLACK);
    assert_eq!(cell.row(2)[30], WHITE);
    assert!(cell.row(1).iter().all(|&p| p == BLACK));
    assert!(cell.row(18).iter().all(|&p| p == BLACK));
}

#[test]
fn test_chain_order_changes_winner() {
    let geometry = CellGeometry::new(16, 20, 16);

    let cell = render_cell(&registry(&["latin", "cjk"]), "A", WHITE, BLACK, &geometry).unwrap();
    // 11 wide: centered at column 2
    assert_eq!(cell.row(4)[12], WHITE);
    assert_eq!(cell.row(4)[13], BLACK);

    let cell = render_cell(&registry(&["cjk", "latin"]), "A", WHITE, BLACK, &geometry).unwrap();
    // 14 wide: centered at column 1
    assert_eq!(cell.row(4)[14], WHITE);
    assert_ne!(cell.row(4)[13], BLACK);
}

#[test]
fn test_unresolvable_codepoint() {
    let reg = registry(&["latin", "cjk"]);
    let geometry = CellGeometry::new(16, 20, 16);
    let err = render_cell(&reg, "Ω", WHITE, BLACK, &geometry).unwrap_err();
    assert_eq!(err, RenderError::GlyphNotFound('Ω' as u32));

    let mut dst = vec![0u32; 16 * 20];
    let err = render_cell_into(&reg, "Ω", WHITE, BLACK, &geometry, &mut dst).unwrap_err();
    assert_eq!(err, RenderError::GlyphNotFound('Ω' as u32));
    assert!(dst.iter().all(|&p| p == 0));
}

#[test]
fn test_mapped_glyph_without_outline() {
    let reg = registry(&["latin", "cjk"]);
    let geometry = CellGeometry::new(16, 20, 16);
    let err = render_cell(&reg, "X", WHITE, BLACK, &geometry).unwrap_err();
    assert_eq!(err, RenderError::GlyphNotFound('X' as u32));
}

#[test]
fn test_empty_chain() {
    let reg = registry(&["missing"]);
    assert!(reg.is_empty());
    let geometry = CellGeometry::new(16, 20, 16);
    assert!(matches!(
        render_cell(&reg, "A", WHITE, BLACK, &geometry),
        Err(RenderError::GlyphNotFound(_))
    ));
}

#[test]
fn test_space_collapses_to_background() {
    let reg = registry(&["latin"]);
    let geometry = CellGeometry::new(48, 40, 34);
    let cell = render_cell(&reg, " ", WHITE, BLACK, &geometry).unwrap();
    assert_eq!((cell.width, cell.height), (24, 40));
    assert!(cell.pixels.iter().all(|&p| p == BLACK));
}

#[test]
fn test_wide_glyph_cropped() {
    let reg = registry(&["latin"]);
    let geometry = CellGeometry::new(32, 20, 16);
    let cell = render_cell(&reg, "W", WHITE, BLACK, &geometry).unwrap();
    assert_eq!(cell.width, 32);
    // 40 wide: 4 columns cropped on each side, so neither ramp end survives
    let row = cell.row(4);
    assert_ne!(row[0], BLACK);
    assert_ne!(row[31], WHITE);
}

#[test]
fn test_render_into_caller_buffer() {
    let reg = registry(&["latin"]);
    let geometry = CellGeometry::new(24, 20, 16);
    let mut dst = vec![0u32; 24 * 20];
    let width = render_cell_into(&reg, "g", WHITE, BLACK, &geometry, &mut dst).unwrap();
    assert_eq!(width, 12);

    let owned = render_cell(&reg, "g", WHITE, BLACK, &geometry).unwrap();
    assert_eq!(&dst[..12 * 20], owned.pixels.as_slice());
    assert!(dst[12 * 20..].iter().all(|&p| p == 0));

    let mut short = vec![0u32; 24 * 20 - 1];
    assert!(matches!(
        render_cell_into(&reg, "g", WHITE, BLACK, &geometry, &mut short),
        Err(RenderError::BufferTooSmall { .. })
    ));
}

#[test]
fn test_render_into_oversized_geometry() {
    let reg = registry(&["latin"]);
    let geometry = CellGeometry::new(usize::MAX, 2, 16);
    let mut dst = vec![0u32; 16];
    assert_eq!(
        render_cell_into(&reg, "A", WHITE, BLACK, &geometry, &mut dst),
        Err(RenderError::Allocation {
            width: usize::MAX,
            height: 2
        })
    );
    assert!(matches!(
        render_cell(&reg, "A", WHITE, BLACK, &geometry),
        Err(RenderError::Allocation { .. })
    ));
    assert!(dst.iter().all(|&p| p == 0));
}

#[test]
fn test_renderer_session() {
    let reg = registry(&["latin", "cjk"]);
    let renderer = CellRenderer::new(&reg);
    assert_eq!(renderer.registry().len(), 2);
    let geometry = CellGeometry::new(32, 20, 16);

    let cell = renderer.render_cell("日", WHITE, BLACK, &geometry).unwrap();
    assert_eq!(cell, render_cell(&reg, "日", WHITE, BLACK, &geometry).unwrap());
    assert_eq!(
        renderer.render_codepoint('日' as u32, WHITE, BLACK, &geometry),
        Ok(cell)
    );

    let mut dst = vec![0u32; 32 * 20];
    assert_eq!(
        renderer.render_cell_into("A", WHITE, BLACK, &geometry, &mut dst),
        Ok(16)
    );
    assert_eq!(
        renderer.render_cell("Ω", WHITE, BLACK, &geometry),
        Err(RenderError::GlyphNotFound('Ω' as u32))
    );

    let line = renderer.render_line("A日", WHITE, BLACK, &geometry).unwrap();
    assert_eq!(line.advances, vec![16, 32]);

    // Copy, regardless of the engine type
    let copy = renderer;
    assert!(copy.render_cell("A", WHITE, BLACK, &geometry).is_ok());
    assert!(renderer.render_cell("A", WHITE, BLACK, &geometry).is_ok());
}

#[test]
fn test_invalid_geometry() {
    let reg = registry(&["latin"]);
    let geometry = CellGeometry::new(16, 0, 16);
    assert!(matches!(
        render_cell(&reg, "A", WHITE, BLACK, &geometry),
        Err(RenderError::InvalidGeometry { .. })
    ));
}

#[test]
fn test_render_is_deterministic() {
    let reg = registry(&["latin", "cjk"]);
    let geometry = CellGeometry::new(32, 20, 16);
    let a = render_cell(&reg, "日", 0xFF33_6699, 0xFF10_2030, &geometry).unwrap();
    let b = render_cell(&reg, "日", 0xFF33_6699, 0xFF10_2030, &geometry).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_render_line_advances() {
    let reg = registry(&["latin", "cjk"]);
    let geometry = CellGeometry::new(32, 20, 16);
    let line = render_line(&reg, "A日Ω ", WHITE, BLACK, &geometry).unwrap();
    // 'A' collapses, '日' keeps full width, 'Ω' gets a half-width placeholder
    assert_eq!(line.advances, vec![16, 32, 16, 16]);
    assert_eq!(line.width, 80);
    assert_eq!(line.height, 20);
    assert_eq!(line.pixels.len(), 80 * 20);

    // Placeholder box outline at column 48 + 1, row 1
    assert_eq!(line.pixels[80 + 49], WHITE);
    assert_eq!(line.pixels[49], BLACK);
}

#[test]
fn test_concurrent_renders_share_registry() {
    let reg = registry(&["latin", "cjk"]);
    let geometry = CellGeometry::new(32, 20, 16);
    let expected = render_cell(&reg, "日", WHITE, BLACK, &geometry).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| render_cell(&reg, "日", WHITE, BLACK, &geometry).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
