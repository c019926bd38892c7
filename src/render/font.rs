use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use thiserror::Error;
use tracing::{debug, warn};

use super::bitmap::BitmapFont;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a usable font: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },
}

/// Ordered font files to try before falling back to the bitmap font.
#[derive(Debug, Clone, Default)]
pub struct FontChain {
    candidates: Vec<PathBuf>,
}

impl FontChain {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Load the first usable candidate at `px` pixels per em. Never fails:
    /// when every candidate is missing or broken the bitmap font is used.
    pub fn select(&self, px: u32) -> Typeface {
        for path in &self.candidates {
            match Typeface::load(path, px) {
                Ok(face) => {
                    debug!("Using font {} at {}px", path.display(), px);
                    return face;
                }
                Err(e) => debug!("Skipping font: {}", e),
            }
        }
        if !self.candidates.is_empty() {
            warn!("No font candidate could be loaded, using built-in bitmap font");
        }
        Typeface::Bitmap(BitmapFont::for_pixel_size(px))
    }
}

/// Tight box around the pixels a text covers, relative to the pen origin
/// (top-left of the line, at the ascender).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBox {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// Rasterized text: one coverage byte per pixel of its ink box.
#[derive(Debug, Clone)]
pub struct TextMask {
    pub ink: InkBox,
    coverage: Vec<u8>,
}

impl TextMask {
    fn blank(ink: InkBox) -> Self {
        Self {
            ink,
            coverage: vec![0; (ink.width * ink.height) as usize],
        }
    }

    /// Coverage at `(x, y)` within the ink box, 0 (empty) to 255 (solid).
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.ink.width || y >= self.ink.height {
            return 0;
        }
        self.coverage[(y * self.ink.width + x) as usize]
    }

    /// Merge `value` into the pixel at pen-relative coordinates.
    fn cover(&mut self, x: i32, y: i32, value: u8) {
        let rx = x - self.ink.left;
        let ry = y - self.ink.top;
        if rx < 0 || ry < 0 || rx as u32 >= self.ink.width || ry as u32 >= self.ink.height {
            return;
        }
        let idx = (ry as u32 * self.ink.width + rx as u32) as usize;
        self.coverage[idx] = self.coverage[idx].max(value);
    }
}

/// The resolved font for one icon.
pub enum Typeface {
    Outline { font: FontVec, scale: PxScale },
    Bitmap(BitmapFont),
}

impl Typeface {
    /// Load a font file (or the first face of a collection) at `px` pixels per em.
    pub fn load(path: &Path, px: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec_and_index(data, 0).map_err(|source| FontError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;

        // PxScale measures ascent-to-descent; convert so that one em spans `px`.
        let px = px as f32;
        let scale = match font.units_per_em() {
            Some(units_per_em) => PxScale::from(px * font.height_unscaled() / units_per_em),
            None => PxScale::from(px),
        };
        Ok(Typeface::Outline { font, scale })
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, Typeface::Bitmap(_))
    }

    /// Ink box of `text`, or `None` when nothing would be drawn.
    pub fn measure(&self, text: &str) -> Option<InkBox> {
        match self {
            Typeface::Outline { font, scale } => {
                let mut bounds: Option<(f32, f32, f32, f32)> = None;
                for glyph in layout(font, *scale, text) {
                    let Some(outlined) = font.outline_glyph(glyph) else {
                        continue;
                    };
                    let b = outlined.px_bounds();
                    bounds = Some(match bounds {
                        None => (b.min.x, b.min.y, b.max.x, b.max.y),
                        Some((x0, y0, x1, y1)) => {
                            (x0.min(b.min.x), y0.min(b.min.y), x1.max(b.max.x), y1.max(b.max.y))
                        }
                    });
                }
                let (x0, y0, x1, y1) = bounds?;
                let (left, top) = (x0.floor() as i32, y0.floor() as i32);
                let (right, bottom) = (x1.ceil() as i32, y1.ceil() as i32);
                if right <= left || bottom <= top {
                    return None;
                }
                Some(InkBox {
                    left,
                    top,
                    width: (right - left) as u32,
                    height: (bottom - top) as u32,
                })
            }
            Typeface::Bitmap(bitmap) => {
                let mut bounds: Option<(u32, u32, u32, u32)> = None;
                bitmap.for_each_pixel(text, |x, y| {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    });
                });
                let (x0, y0, x1, y1) = bounds?;
                Some(InkBox {
                    left: x0 as i32,
                    top: y0 as i32,
                    width: x1 - x0 + 1,
                    height: y1 - y0 + 1,
                })
            }
        }
    }

    /// Render `text` into a coverage mask sized to its ink box.
    pub fn rasterize(&self, text: &str) -> Option<TextMask> {
        let mut mask = TextMask::blank(self.measure(text)?);
        match self {
            Typeface::Outline { font, scale } => {
                for glyph in layout(font, *scale, text) {
                    let Some(outlined) = font.outline_glyph(glyph) else {
                        continue;
                    };
                    let b = outlined.px_bounds();
                    let (ox, oy) = (b.min.x as i32, b.min.y as i32);
                    outlined.draw(|x, y, c| {
                        let value = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
                        mask.cover(ox + x as i32, oy + y as i32, value);
                    });
                }
            }
            Typeface::Bitmap(bitmap) => {
                bitmap.for_each_pixel(text, |x, y| mask.cover(x as i32, y as i32, 255));
            }
        }
        Some(mask)
    }
}

/// Position glyphs along one line with kerning, pen starting at the ascender.
fn layout(font: &FontVec, scale: PxScale, text: &str) -> Vec<Glyph> {
    let scaled = font.as_scaled(scale);
    let mut caret = point(0.0, scaled.ascent());
    let mut previous = None;
    let mut glyphs = Vec::new();

    for ch in text.chars() {
        if ch.is_control() {
            continue;
        }
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret.x += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scale, caret));
        caret.x += scaled.h_advance(id);
        previous = Some(id);
    }
    glyphs
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEJAVU_BOLD: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

    #[test]
    fn test_empty_chain_uses_bitmap() {
        let face = FontChain::default().select(24);
        assert!(face.is_bitmap());
    }

    #[test]
    fn test_missing_candidates_fall_through_to_bitmap() {
        let chain = FontChain::new(vec![
            PathBuf::from("/nonexistent/fonts/Preferred-Bold.ttf"),
            PathBuf::from("/nonexistent/fonts/Alternate.ttc"),
        ]);
        let face = chain.select(24);
        assert!(face.is_bitmap());
        assert!(face.measure("M").is_some());
    }

    #[test]
    fn test_garbage_file_is_rejected() {
        let dir = std::env::temp_dir().join(format!("mdicons-font-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let result = Typeface::load(&path, 24);
        let chain_face = FontChain::new(vec![path.clone()]).select(24);
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(result, Err(FontError::Invalid { .. })));
        assert!(chain_face.is_bitmap());
    }

    #[test]
    fn test_bitmap_measure_is_tight() {
        let face = Typeface::Bitmap(BitmapFont { scale: 3 });
        let ink = face.measure("M").unwrap();
        assert_eq!(ink, InkBox { left: 0, top: 0, width: 15, height: 21 });

        // 'I' has blank outer columns, so its ink starts one column in
        let ink = face.measure("I").unwrap();
        assert_eq!(ink.left, 3);
        assert_eq!(ink.width, 9);
    }

    #[test]
    fn test_no_ink_for_blank_text() {
        let face = Typeface::Bitmap(BitmapFont { scale: 1 });
        assert!(face.measure("").is_none());
        assert!(face.measure(" ").is_none());
        assert!(face.rasterize("#").is_none());
    }

    #[test]
    fn test_bitmap_mask_is_solid() {
        let face = Typeface::Bitmap(BitmapFont { scale: 2 });
        let mask = face.rasterize("M").unwrap();
        assert_eq!(mask.coverage(0, 0), 255);
        assert_eq!(mask.coverage(9, 13), 255);
        // notch at the top centre of the M
        assert_eq!(mask.coverage(4, 0), 0);
        // outside the ink box
        assert_eq!(mask.coverage(10, 0), 0);
    }

    #[test]
    fn test_outline_font_when_available() {
        let path = Path::new(DEJAVU_BOLD);
        if !path.exists() {
            eprintln!("skipping: {} not installed", DEJAVU_BOLD);
            return;
        }
        let face = FontChain::new(vec![path.to_path_buf()]).select(64);
        assert!(!face.is_bitmap());

        let ink = face.measure("M").unwrap();
        // A bold capital at 64px/em is well over half an em tall
        assert!(ink.height > 32 && ink.height <= 64);
        assert!(ink.width > 32 && ink.width <= 64);
        // The ink starts below the ascender line
        assert!(ink.top > 0);

        let mask = face.rasterize("M").unwrap();
        let solid = (0..ink.height)
            .flat_map(|y| (0..ink.width).map(move |x| (x, y)))
            .filter(|&(x, y)| mask.coverage(x, y) == 255)
            .count();
        assert!(solid > 0);
    }
}
