pub mod bitmap;
pub mod font;
pub mod stroke;

use image::{Rgb, RgbImage};
use tracing::debug;

use font::{FontChain, Typeface};
use stroke::{draw_segment, Segment};

/// Colors and text of an icon.
#[derive(Debug, Clone, PartialEq)]
pub struct IconStyle {
    pub background: Rgb<u8>,
    pub foreground: Rgb<u8>,
    pub label: String,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            background: Rgb([0x19, 0x76, 0xD2]),
            foreground: Rgb([0xFF, 0xFF, 0xFF]),
            label: "M".into(),
        }
    }
}

/// Where the label ink landed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// Render one square icon: background, centered label, download arrow.
///
/// Font size is half the icon size. Output depends only on `size`, `style`
/// and which font files exist on the host.
pub fn render_icon(size: u32, style: &IconStyle, fonts: &FontChain) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(size, size, style.background);
    if size == 0 {
        return canvas;
    }

    let typeface = fonts.select((size / 2).max(1));
    let placement = draw_label(&mut canvas, &typeface, &style.label, style.foreground);
    debug!(
        "{}px label placed at {:?} (bitmap font: {})",
        size,
        placement,
        typeface.is_bitmap()
    );

    Arrow::for_size(size).draw(&mut canvas, style.foreground);
    canvas
}

/// Draw `text` so its ink box sits in the middle of the canvas.
///
/// Returns `None` if the text has no visible ink under `typeface`.
pub fn draw_label(
    canvas: &mut RgbImage,
    typeface: &Typeface,
    text: &str,
    color: Rgb<u8>,
) -> Option<Placement> {
    let mask = typeface.rasterize(text)?;
    let ink = mask.ink;
    let left = (canvas.width() as i32 - ink.width as i32).div_euclid(2);
    let top = (canvas.height() as i32 - ink.height as i32).div_euclid(2);

    for my in 0..ink.height {
        for mx in 0..ink.width {
            let coverage = mask.coverage(mx, my);
            if coverage == 0 {
                continue;
            }
            let (x, y) = (left + mx as i32, top + my as i32);
            if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
                continue;
            }
            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            *pixel = blend(*pixel, color, coverage);
        }
    }

    Some(Placement {
        left,
        top,
        width: ink.width,
        height: ink.height,
    })
}

/// Mix `fg` over `bg` by `coverage` out of 255.
fn blend(bg: Rgb<u8>, fg: Rgb<u8>, coverage: u8) -> Rgb<u8> {
    let a = coverage as u32;
    let mix = |b: u8, f: u8| ((b as u32 * (255 - a) + f as u32 * a + 127) / 255) as u8;
    Rgb([mix(bg[0], fg[0]), mix(bg[1], fg[1]), mix(bg[2], fg[2])])
}

/// Downward arrow: a vertical shaft plus two diagonal strokes forming the head,
/// anchored at three quarters of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub strokes: [Segment; 3],
    pub width: u32,
}

impl Arrow {
    pub fn for_size(size: u32) -> Self {
        let extent = (size / 4) as i32;
        let anchor = (size as f32 * 0.75) as i32;
        let (x, y) = (anchor, anchor);
        let tip = (x, y + extent / 4);

        Self {
            strokes: [
                Segment::new((x, y - extent / 3), tip),
                Segment::new(tip, (x - extent / 4, y)),
                Segment::new(tip, (x + extent / 4, y)),
            ],
            width: (size / 32).max(1),
        }
    }

    /// Smallest box `(min_x, min_y, max_x, max_y)` that can hold every stroked pixel.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        let reach = (self.width / 2) as i32;
        let points = self.strokes.iter().flat_map(|s| [s.from, s.to]);
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (i32::MAX, i32::MAX, i32::MIN, i32::MIN);
        for (x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        (min_x - reach, min_y - reach, max_x + reach, max_y + reach)
    }

    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>) {
        for segment in self.strokes {
            draw_segment(canvas, segment, self.width, color);
        }
    }
}
