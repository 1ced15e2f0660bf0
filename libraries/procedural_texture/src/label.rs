use crate::canvas::Canvas;
use crate::{LABEL_HEIGHT, LABEL_WIDTH};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

const GLYPH_SIZE: u32 = 8;
const GLYPH_SCALE: u32 = 4;
const ADVANCE: u32 = GLYPH_SIZE * GLYPH_SCALE;
// Bold: every lit glyph cell is smeared this many pixels to the right.
const BOLD_OFFSET: u32 = 1;
const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Renders `text` centered on a transparent 256x128 buffer with a fixed-size bold bitmap font.
///
/// Characters without a glyph advance as blanks; text wider than the buffer is clipped.
pub fn synthesize_label(text: &str) -> RgbaImage {
    let mut canvas = Canvas::new(LABEL_WIDTH, LABEL_HEIGHT);
    let glyph_count = text.chars().count() as i64;
    let text_width = glyph_count * ADVANCE as i64 + BOLD_OFFSET as i64;
    let origin_x = (LABEL_WIDTH as i64 - text_width) / 2;
    let origin_y = (LABEL_HEIGHT as i64 - ADVANCE as i64) / 2;

    for (i, c) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(c) else {
            continue;
        };
        let glyph_x = origin_x + i as i64 * ADVANCE as i64;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if *bits & (1u8 << col) == 0 {
                    continue;
                }
                canvas.fill_rect(
                    glyph_x + (col * GLYPH_SCALE) as i64,
                    origin_y + row as i64 * GLYPH_SCALE as i64,
                    GLYPH_SCALE + BOLD_OFFSET,
                    GLYPH_SCALE,
                    TEXT_COLOR,
                );
            }
        }
    }
    canvas.into_image()
}
