//! Built-in 5×7 bitmap font, the last resort when no font file can be loaded.

/// Width of a glyph cell in font pixels.
pub const GLYPH_WIDTH: u32 = 5;
/// Height of a glyph cell in font pixels.
pub const GLYPH_HEIGHT: u32 = 7;
/// Blank columns between adjacent cells.
const SPACING: u32 = 1;

/// One row per line, top to bottom. Bit 4 is the leftmost column.
type GlyphRows = [u8; GLYPH_HEIGHT as usize];

#[rustfmt::skip]
const LETTERS: [GlyphRows; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
];

#[rustfmt::skip]
const DIGITS: [GlyphRows; 10] = [
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // 0
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // 2
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // 3
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 4
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // 5
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 6
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 7
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 8
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 9
];

/// Rows for `ch`. Lowercase letters use the uppercase shapes.
fn glyph_rows(ch: char) -> Option<&'static GlyphRows> {
    let ch = ch.to_ascii_uppercase();
    match ch {
        'A'..='Z' => LETTERS.get((ch as u8 - b'A') as usize),
        '0'..='9' => DIGITS.get((ch as u8 - b'0') as usize),
        _ => None,
    }
}

/// The bitmap font magnified by a whole-number factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    pub scale: u32,
}

impl BitmapFont {
    /// Pick the largest magnification whose cell height does not exceed `px`
    /// (never below 1).
    pub fn for_pixel_size(px: u32) -> Self {
        Self {
            scale: (px / GLYPH_HEIGHT).max(1),
        }
    }

    /// Horizontal distance between the origins of successive cells.
    pub fn advance(&self) -> u32 {
        (GLYPH_WIDTH + SPACING) * self.scale
    }

    /// Call `plot(x, y)` for every lit pixel of `text`, origin at the top-left
    /// of the first cell.
    ///
    /// Characters without a glyph still advance the cursor but draw nothing,
    /// so a space keeps its width.
    pub fn for_each_pixel(&self, text: &str, mut plot: impl FnMut(u32, u32)) {
        let mut cursor = 0;
        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }
            if let Some(rows) = glyph_rows(ch) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..GLYPH_WIDTH {
                        if bits & (0x10 >> col) == 0 {
                            continue;
                        }
                        let x0 = cursor + col * self.scale;
                        let y0 = row as u32 * self.scale;
                        for dy in 0..self.scale {
                            for dx in 0..self.scale {
                                plot(x0 + dx, y0 + dy);
                            }
                        }
                    }
                }
            }
            cursor += self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(font: BitmapFont, text: &str) -> Vec<(u32, u32)> {
        let mut pixels = Vec::new();
        font.for_each_pixel(text, |x, y| pixels.push((x, y)));
        pixels
    }

    #[test]
    fn test_scale_from_pixel_size() {
        assert_eq!(BitmapFont::for_pixel_size(0).scale, 1);
        assert_eq!(BitmapFont::for_pixel_size(8).scale, 1);
        assert_eq!(BitmapFont::for_pixel_size(24).scale, 3);
        assert_eq!(BitmapFont::for_pixel_size(64).scale, 9);
    }

    #[test]
    fn test_m_fills_its_cell() {
        let pixels = lit_pixels(BitmapFont { scale: 1 }, "M");
        let max_x = pixels.iter().map(|p| p.0).max().unwrap();
        let max_y = pixels.iter().map(|p| p.1).max().unwrap();
        assert_eq!(max_x, GLYPH_WIDTH - 1);
        assert_eq!(max_y, GLYPH_HEIGHT - 1);
        // Both verticals of the M run the full height
        assert!(pixels.contains(&(0, 0)));
        assert!(pixels.contains(&(4, 6)));
        // The notch between the peaks is empty
        assert!(!pixels.contains(&(2, 0)));
    }

    #[test]
    fn test_scale_magnifies_each_pixel() {
        let small = lit_pixels(BitmapFont { scale: 1 }, "I");
        let big = lit_pixels(BitmapFont { scale: 3 }, "I");
        assert_eq!(big.len(), small.len() * 9);
    }

    #[test]
    fn test_lowercase_uses_uppercase_shape() {
        let font = BitmapFont { scale: 2 };
        assert_eq!(lit_pixels(font, "m"), lit_pixels(font, "M"));
    }

    #[test]
    fn test_unknown_glyph_advances_without_drawing() {
        let font = BitmapFont { scale: 1 };
        assert!(glyph_rows('#').is_none());
        assert!(lit_pixels(font, "#").is_empty());

        // 'I' after an unknown character starts one advance to the right
        let pixels = lit_pixels(font, "#I");
        let min_x = pixels.iter().map(|p| p.0).min().unwrap();
        assert_eq!(min_x, font.advance() + 1);
    }
}
