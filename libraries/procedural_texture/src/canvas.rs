use image::{Rgba, RgbaImage};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

pub const fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

impl Point {
    fn distance_to_segment(self, a: Point, b: Point) -> f32 {
        let (abx, aby) = (b.x - a.x, b.y - a.y);
        let (apx, apy) = (self.x - a.x, self.y - a.y);
        let len_sq = abx * abx + aby * aby;
        let t = if len_sq > 0.0 {
            ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let (dx, dy) = (apx - t * abx, apy - t * aby);
        (dx * dx + dy * dy).sqrt()
    }

    fn distance(self, other: Point) -> f32 {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Path {
    Circle { center: Point, radius: f32 },
    Polyline(Vec<Point>),
}

impl Path {
    pub fn line(from: Point, to: Point) -> Self {
        Self::Polyline(vec![from, to])
    }

    pub fn circle(center: Point, radius: f32) -> Self {
        Self::Circle { center, radius }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub color: [u8; 3],
    pub alpha: f32,
    pub width: f32,
}

/// Pixel buffer with 2D-canvas style stroking: every stroked path is rasterized
/// into a coverage mask first and composited once, so a path never blends over itself.
pub struct Canvas {
    image: RgbaImage,
    mask: Vec<bool>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba([0, 0, 0, 0]))
    }

    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, color),
            mask: vec![false; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn stroke(&mut self, path: &Path, stroke: Stroke) {
        let half_width = stroke.width / 2.0;
        self.mask.fill(false);
        match path {
            Path::Circle { center, radius } => {
                let reach = radius + half_width;
                self.cover(
                    point(center.x - reach, center.y - reach),
                    point(center.x + reach, center.y + reach),
                    |p| (p.distance(*center) - radius).abs() <= half_width,
                );
            }
            Path::Polyline(points) => {
                for segment in points.windows(2) {
                    let (a, b) = (segment[0], segment[1]);
                    self.cover(
                        point(a.x.min(b.x) - half_width, a.y.min(b.y) - half_width),
                        point(a.x.max(b.x) + half_width, a.y.max(b.y) + half_width),
                        |p| p.distance_to_segment(a, b) <= half_width,
                    );
                }
            }
        }
        self.composite(stroke);
    }

    /// Fills an axis-aligned rectangle with an opaque color, clipping anything off-canvas.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgba<u8>) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width as i64).min(self.width() as i64);
        let y1 = (y + height as i64).min(self.height() as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn cover(&mut self, min: Point, max: Point, covers: impl Fn(Point) -> bool) {
        let width = self.width();
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height());
        for py in y0..y1 {
            for px in x0..x1 {
                if covers(point(px as f32 + 0.5, py as f32 + 0.5)) {
                    self.mask[(py * width + px) as usize] = true;
                }
            }
        }
    }

    fn composite(&mut self, stroke: Stroke) {
        let width = self.width();
        for (index, _) in self.mask.iter().enumerate().filter(|(_, covered)| **covered) {
            let index = index as u32;
            let pixel = self.image.get_pixel_mut(index % width, index / width);
            *pixel = blend_over(*pixel, stroke.color, stroke.alpha);
        }
    }
}

fn blend_over(dst: Rgba<u8>, src: [u8; 3], src_alpha: f32) -> Rgba<u8> {
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        let value = (src[i] as f32 * src_alpha + dst[i] as f32 * dst_alpha * (1.0 - src_alpha))
            / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_alpha * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE_HALF: Stroke = Stroke {
        color: [255, 255, 255],
        alpha: 0.5,
        width: 2.0,
    };

    #[test]
    fn blending_half_white_over_black() {
        let out = blend_over(Rgba([0, 0, 0, 255]), [255, 255, 255], 0.5);
        assert_eq!(out, Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn self_overlapping_path_blends_once() {
        let mut canvas = Canvas::filled(16, 16, Rgba([0, 0, 0, 255]));
        canvas.stroke(
            &Path::Polyline(vec![point(0.0, 8.0), point(16.0, 8.0), point(0.0, 8.0)]),
            WHITE_HALF,
        );
        let image = canvas.into_image();
        assert_eq!(*image.get_pixel(4, 8), Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn separate_strokes_blend_twice() {
        let mut canvas = Canvas::filled(16, 16, Rgba([0, 0, 0, 255]));
        let line = Path::line(point(0.0, 8.0), point(16.0, 8.0));
        canvas.stroke(&line, WHITE_HALF);
        canvas.stroke(&line, WHITE_HALF);
        let image = canvas.into_image();
        assert_eq!(*image.get_pixel(4, 8), Rgba([192, 192, 192, 255]));
    }

    #[test]
    fn circle_leaves_center_untouched() {
        let mut canvas = Canvas::filled(64, 64, Rgba([0, 0, 0, 255]));
        canvas.stroke(&Path::circle(point(32.0, 32.0), 20.0), WHITE_HALF);
        let image = canvas.into_image();
        assert_eq!(*image.get_pixel(32, 32), Rgba([0, 0, 0, 255]));
        assert_ne!(*image.get_pixel(52, 32), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut canvas = Canvas::new(8, 8);
        canvas.fill_rect(-4, 6, 20, 20, Rgba([255, 255, 255, 255]));
        let image = canvas.into_image();
        assert_eq!(*image.get_pixel(0, 7), Rgba([255, 255, 255, 255]));
        assert_eq!(*image.get_pixel(0, 5), Rgba([0, 0, 0, 0]));
    }
}
