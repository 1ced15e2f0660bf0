use canvas::{point, Canvas, Path, Point, Stroke};
use image::{Rgba, RgbaImage};
use rand::Rng;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub mod canvas;
mod label;

pub use image;
pub use label::synthesize_label;

pub const SURFACE_SIZE: u32 = 512;
pub const LABEL_WIDTH: u32 = 256;
pub const LABEL_HEIGHT: u32 = 128;

const PATTERN_STROKE: Stroke = Stroke {
    color: [255, 255, 255],
    alpha: 0.5,
    width: 2.0,
};

const DOT_COUNT: usize = 100;
const DOT_RADIUS: f32 = 2.0;
const STRIPE_SPACING: usize = 20;
const GRID_SPACING: usize = 30;
const RING_COUNT: usize = 5;
const SWIRL_ANGLE_STEP: f32 = 0.1;
const SWIRL_RADIUS_STEP: f32 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    fn opaque(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Pattern {
    Dots,
    Stripes,
    Circles,
    Grid,
    Swirl,
    /// Stands in for any unrecognized pattern; renders the flat color only.
    #[default]
    Plain,
}

impl Pattern {
    pub const OVERLAYS: [Self; 5] = [
        Self::Dots,
        Self::Stripes,
        Self::Circles,
        Self::Grid,
        Self::Swirl,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dots => "dots",
            Self::Stripes => "stripes",
            Self::Circles => "circles",
            Self::Grid => "grid",
            Self::Swirl => "swirl",
            Self::Plain => "plain",
        }
    }
}

impl FromStr for Pattern {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "dots" => Self::Dots,
            "stripes" => Self::Stripes,
            "circles" => Self::Circles,
            "grid" => Self::Grid,
            "swirl" => Self::Swirl,
            _ => Self::Plain,
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surface and label texture generator. The random source only feeds the `dots`
/// pattern; seed it to get reproducible textures.
pub struct TextureSynthesizer<R> {
    rng: R,
}

impl<R: Rng> TextureSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn surface(&mut self, color: Rgb, pattern: Pattern) -> RgbaImage {
        let mut canvas = Canvas::filled(SURFACE_SIZE, SURFACE_SIZE, color.opaque());
        let size = SURFACE_SIZE as f32;
        let center = point(size / 2.0, size / 2.0);

        match pattern {
            Pattern::Dots => {
                for _ in 0..DOT_COUNT {
                    let dot = point(
                        self.rng.random_range(0.0..size),
                        self.rng.random_range(0.0..size),
                    );
                    canvas.stroke(&Path::circle(dot, DOT_RADIUS), PATTERN_STROKE);
                }
            }
            Pattern::Stripes => {
                for y in (0..SURFACE_SIZE as usize).step_by(STRIPE_SPACING) {
                    let y = y as f32;
                    canvas.stroke(&Path::line(point(0.0, y), point(size, y)), PATTERN_STROKE);
                }
            }
            Pattern::Circles => {
                for i in 0..RING_COUNT {
                    let radius = 30.0 + 20.0 * i as f32;
                    canvas.stroke(&Path::circle(center, radius), PATTERN_STROKE);
                }
            }
            Pattern::Grid => {
                for i in (0..SURFACE_SIZE as usize).step_by(GRID_SPACING) {
                    let i = i as f32;
                    canvas.stroke(&Path::line(point(i, 0.0), point(i, size)), PATTERN_STROKE);
                    canvas.stroke(&Path::line(point(0.0, i), point(size, i)), PATTERN_STROKE);
                }
            }
            Pattern::Swirl => {
                canvas.stroke(&Path::Polyline(swirl(center, size / 2.0)), PATTERN_STROKE);
            }
            Pattern::Plain => {}
        }
        canvas.into_image()
    }

    pub fn label(&self, text: &str) -> RgbaImage {
        synthesize_label(text)
    }
}

fn swirl(center: Point, max_radius: f32) -> Vec<Point> {
    let mut points = Vec::new();
    let mut angle = 0.0f32;
    let mut radius = 0.0f32;
    while radius < max_radius {
        points.push(point(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
        angle += SWIRL_ANGLE_STEP;
        radius += SWIRL_RADIUS_STEP;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EARTH_BLUE: Rgb = Rgb::from_hex(0x4169E1);

    fn synthesizer(seed: u64) -> TextureSynthesizer<ChaCha8Rng> {
        TextureSynthesizer::new(ChaCha8Rng::seed_from_u64(seed))
    }

    fn is_base(image: &RgbaImage, x: u32, y: u32) -> bool {
        *image.get_pixel(x, y) == EARTH_BLUE.opaque()
    }

    #[test]
    fn hex_colors_split_into_channels() {
        assert_eq!(Rgb::from_hex(0xFFD700), Rgb::new(255, 215, 0));
        assert_eq!(Rgb::from_hex(0x1E90FF).to_string(), "#1E90FF");
    }

    #[test]
    fn unknown_pattern_names_fall_back_to_plain() {
        assert_eq!("swirl".parse::<Pattern>(), Ok(Pattern::Swirl));
        assert_eq!("checkerboard".parse::<Pattern>(), Ok(Pattern::Plain));
        assert_eq!("".parse::<Pattern>(), Ok(Pattern::Plain));
    }

    #[test]
    fn every_overlay_produces_a_full_surface() {
        let mut synth = synthesizer(1);
        for pattern in Pattern::OVERLAYS {
            let image = synth.surface(EARTH_BLUE, pattern);
            assert_eq!(image.dimensions(), (SURFACE_SIZE, SURFACE_SIZE));
            assert!(
                image.pixels().any(|p| *p != EARTH_BLUE.opaque()),
                "{pattern} drew nothing"
            );
            assert!(image.pixels().all(|p| p[3] == 255));
        }
    }

    #[test]
    fn plain_surface_is_flat() {
        let image = synthesizer(1).surface(EARTH_BLUE, Pattern::Plain);
        assert_eq!(image.dimensions(), (SURFACE_SIZE, SURFACE_SIZE));
        assert!(image.pixels().all(|p| *p == EARTH_BLUE.opaque()));
    }

    #[test]
    fn stripes_every_twenty_units() {
        let image = synthesizer(1).surface(EARTH_BLUE, Pattern::Stripes);
        assert!(!is_base(&image, 100, 0));
        assert!(is_base(&image, 100, 10));
        assert!(!is_base(&image, 100, 20));
        assert!(!is_base(&image, 100, 500));
    }

    #[test]
    fn grid_every_thirty_units() {
        let image = synthesizer(1).surface(EARTH_BLUE, Pattern::Grid);
        assert!(!is_base(&image, 30, 200));
        assert!(!is_base(&image, 200, 30));
        assert!(is_base(&image, 45, 45));
    }

    #[test]
    fn circles_are_concentric_rings() {
        let image = synthesizer(1).surface(EARTH_BLUE, Pattern::Circles);
        assert!(is_base(&image, 256, 256));
        assert!(!is_base(&image, 256 + 30, 256));
        assert!(is_base(&image, 256 + 40, 256));
        assert!(!is_base(&image, 256 + 110, 256));
        assert!(is_base(&image, 256 + 130, 256));
    }

    #[test]
    fn swirl_starts_at_center_and_stops_at_half_width() {
        let points = swirl(point(256.0, 256.0), 256.0);
        assert_eq!(points.len(), 512);
        assert_eq!(points[0], point(256.0, 256.0));
        let image = synthesizer(1).surface(EARTH_BLUE, Pattern::Swirl);
        assert!(!is_base(&image, 256, 256));
    }

    #[test]
    fn seeded_dots_are_reproducible() {
        let a = synthesizer(7).surface(EARTH_BLUE, Pattern::Dots);
        let b = synthesizer(7).surface(EARTH_BLUE, Pattern::Dots);
        let c = synthesizer(8).surface(EARTH_BLUE, Pattern::Dots);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
