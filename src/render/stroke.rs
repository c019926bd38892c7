use image::{Rgb, RgbImage};

/// A straight line between two pixel positions (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: (i32, i32),
    pub to: (i32, i32),
}

impl Segment {
    pub fn new(from: (i32, i32), to: (i32, i32)) -> Self {
        Self { from, to }
    }
}

/// Draw `segment` with the given stroke width. Pixels outside the canvas are dropped.
///
/// Width 1 is a plain Bresenham line. Wider strokes fill the rectangle that
/// extends `width / 2` either side of the segment, with square-cut ends.
pub fn draw_segment(canvas: &mut RgbImage, segment: Segment, width: u32, color: Rgb<u8>) {
    plot_line(canvas, segment, color);
    if width <= 1 {
        return;
    }

    let (ax, ay) = (segment.from.0 as f32, segment.from.1 as f32);
    let (dx, dy) = (
        (segment.to.0 - segment.from.0) as f32,
        (segment.to.1 - segment.from.1) as f32,
    );
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return;
    }
    let len = len_sq.sqrt();
    // Unit normal
    let (nx, ny) = (-dy / len, dx / len);
    let half = width as f32 / 2.0;

    let reach = half.ceil() as i32;
    let min_x = segment.from.0.min(segment.to.0) - reach;
    let max_x = segment.from.0.max(segment.to.0) + reach;
    let min_y = segment.from.1.min(segment.to.1) - reach;
    let max_y = segment.from.1.max(segment.to.1) + reach;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (px, py) = (x as f32 - ax, y as f32 - ay);
            let along = (px * dx + py * dy) / len_sq;
            let across = px * nx + py * ny;
            if (0.0..=1.0).contains(&along) && -half <= across && across < half {
                put(canvas, x, y, color);
            }
        }
    }
}

fn plot_line(canvas: &mut RgbImage, segment: Segment, color: Rgb<u8>) {
    let (mut x, mut y) = segment.from;
    let (x1, y1) = segment.to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(canvas, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn put(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    canvas.put_pixel(x as u32, y as u32, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

    fn lit(canvas: &RgbImage) -> Vec<(u32, u32)> {
        canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == INK)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_thin_vertical_includes_endpoints() {
        let mut canvas = RgbImage::new(8, 8);
        draw_segment(&mut canvas, Segment::new((3, 1), (3, 5)), 1, INK);
        assert_eq!(lit(&canvas), vec![(3, 1), (3, 2), (3, 3), (3, 4), (3, 5)]);
    }

    #[test]
    fn test_thin_diagonal() {
        let mut canvas = RgbImage::new(8, 8);
        draw_segment(&mut canvas, Segment::new((4, 4), (2, 2)), 1, INK);
        let mut pixels = lit(&canvas);
        pixels.sort();
        assert_eq!(pixels, vec![(2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn test_wide_horizontal_has_exact_width() {
        let mut canvas = RgbImage::new(10, 10);
        draw_segment(&mut canvas, Segment::new((2, 5), (7, 5)), 4, INK);
        let pixels = lit(&canvas);

        let rows: Vec<u32> = {
            let mut r: Vec<u32> = pixels.iter().map(|p| p.1).collect();
            r.sort();
            r.dedup();
            r
        };
        assert_eq!(rows, vec![3, 4, 5, 6]);
        assert!(pixels.iter().all(|&(x, _)| (2..=7).contains(&x)));
        assert_eq!(pixels.len(), 4 * 6);
    }

    #[test]
    fn test_clips_to_canvas() {
        let mut canvas = RgbImage::new(4, 4);
        draw_segment(&mut canvas, Segment::new((-3, 1), (10, 1)), 3, INK);
        let pixels = lit(&canvas);
        assert_eq!(pixels.len(), 4 * 3);
    }

    #[test]
    fn test_single_point() {
        let mut canvas = RgbImage::new(4, 4);
        draw_segment(&mut canvas, Segment::new((1, 2), (1, 2)), 3, INK);
        assert_eq!(lit(&canvas), vec![(1, 2)]);
    }
}
