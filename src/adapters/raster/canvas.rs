//! Raster canvas drawing onto an in-memory RGBA buffer.

use std::f32::consts::PI;

use ab_glyph::PxScale;
use image::{Pixel, Rgba, RgbaImage};
use imageproc::drawing::{draw_antialiased_line_segment_mut, draw_text_mut};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use imageproc::pixelops::interpolate;
use rand::{Rng, RngCore};

use super::item::CaptchaImage;
use crate::error::CaptchaError;
use crate::ports::canvas::Canvas;
use crate::ports::font_source::FontHandle;
use crate::random::{below, random_deep_color, random_light_color};

const HOLLOW_LINE_COLOR: Rgba<u8> = Rgba([245, 250, 251, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const MAX_TILT_DEG: f32 = 20.0;

struct GlyphParams<'a> {
    ch: char,
    font: &'a FontHandle,
    size: f32,
    x: i32,
    y: i32,
    rotation_deg: f32,
    color: Rgba<u8>,
}

/// Draws captcha layers into an [`RgbaImage`].
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Create a canvas filled with `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, background) }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x < self.image.width() && y < self.image.height() {
            self.image.get_pixel_mut(x, y).blend(&color);
        }
    }

    /// Render one glyph on a scratch tile, rotate it, and blend it in with
    /// its top-left corner at (`x`, `y`).
    fn draw_glyph(&mut self, glyph: &GlyphParams<'_>) {
        let side = to_u32(glyph.size * 2.0).max(1);
        let margin = side / 4;
        let mut scratch = RgbaImage::from_pixel(side, side, TRANSPARENT);
        let mut buf = [0u8; 4];
        draw_text_mut(
            &mut scratch,
            glyph.color,
            px(margin),
            px(margin),
            PxScale::from(glyph.size),
            glyph.font.font(),
            glyph.ch.encode_utf8(&mut buf),
        );

        let tile = if glyph.rotation_deg.abs() < f32::EPSILON {
            scratch
        } else {
            rotate_about_center(
                &scratch,
                glyph.rotation_deg.to_radians(),
                Interpolation::Bilinear,
                TRANSPARENT,
            )
        };

        let margin = px(margin);
        for (tx, ty, pixel) in tile.enumerate_pixels() {
            if pixel[3] > 0 {
                self.blend_pixel(glyph.x + px(tx) - margin, glyph.y + px(ty) - margin, *pixel);
            }
        }
    }
}

impl Canvas for RasterCanvas {
    type Item = CaptchaImage;

    fn draw_hollow_line(&mut self, rng: &mut dyn RngCore) {
        let (width, height) = self.image.dimensions();
        let first = width / 20;
        let start = below(rng, first);
        let stop = below(rng, first) + first * 19;

        // Steepness in {0.6, 0.8, 1.0, 1.2, 1.4}; multiples of three flip the wave.
        let step = rng.random_range(3..8u32);
        let multiple = if step % 3 == 0 { -to_f32(step) / 5.0 } else { to_f32(step) / 5.0 };

        let amplitude = to_f32(height / 3);
        let thickness = px(height / 20);
        let w = to_f32(width);
        for x in start..stop {
            let mut y = (to_f32(x) * PI * multiple / w).sin() * amplitude;
            if multiple < 0.0 {
                y += to_f32(height / 2);
            }
            let y = to_i32(y);
            for i in 0..=thickness {
                self.blend_pixel(px(x), y + i, HOLLOW_LINE_COLOR);
            }
        }
    }

    fn draw_noise(
        &mut self,
        text: &str,
        fonts: &[FontHandle],
        rng: &mut dyn RngCore,
    ) -> Result<(), CaptchaError> {
        let (width, height) = self.image.dimensions();
        let base = to_f32(height) / (1.0 + to_f32(below(rng, 7)) / 10.0);
        for ch in text.chars() {
            let font = pick_font(fonts, ch, rng)?;
            let size = (base / 2.0 + to_f32(below(rng, 5))).max(1.0);
            let x = px(below(rng, width));
            let y = px(below(rng, height)) - to_i32(size / 2.0);
            let color = random_light_color(rng);
            self.draw_glyph(&GlyphParams { ch, font, size, x, y, rotation_deg: 0.0, color });
        }
        Ok(())
    }

    fn draw_slim_lines(&mut self, count: usize, rng: &mut dyn RngCore) {
        let (width, height) = self.image.dimensions();
        let first = width / 10;
        let end = first * 9;
        let third = height / 3;
        for i in 0..count {
            let x1 = below(rng, first);
            let x2 = below(rng, first) + end;
            // Alternate direction so consecutive lines cross.
            let (y1, y2) = if i % 2 == 0 {
                (below(rng, third) + third * 2, below(rng, third))
            } else {
                (below(rng, third) + third, below(rng, third) + third * 2)
            };
            let color = random_deep_color(rng);
            draw_antialiased_line_segment_mut(
                &mut self.image,
                (px(x1), px(y1)),
                (px(x2), px(y2)),
                color,
                interpolate,
            );
        }
    }

    fn draw_sine_line(&mut self, rng: &mut dyn RngCore) {
        let (width, height) = self.image.dimensions();
        let (w, h) = (to_f32(width), to_f32(height));
        let quarter = h / 4.0;
        let (short, long) = if h > w / 2.0 { (w / 2.0, h) } else { (h, w / 2.0) };
        let thickness = px((height / 30).max(1));

        for _ in 0..rng.random_range(1..=2u32) {
            let amplitude = to_f32(below(rng, height / 2)) / 2.0;
            let offset = rng.random_range(-quarter..=quarter);
            let phase = rng.random_range(-quarter..=quarter);
            let period = rng.random_range(short..=long);
            let stop = to_u32(rng.random_range(w * 0.8..=w));
            let color = random_deep_color(rng);
            if period <= 0.0 {
                continue;
            }
            let omega = 2.0 * PI / period;
            for x in 0..stop {
                let y = to_i32(amplitude * (omega * to_f32(x) + phase).sin() + offset + h / 2.0);
                for t in 0..thickness {
                    self.blend_pixel(px(x), y + t, color);
                }
            }
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        fonts: &[FontHandle],
        rng: &mut dyn RngCore,
    ) -> Result<(), CaptchaError> {
        let (width, height) = self.image.dimensions();
        let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        if count == 0 {
            return Ok(());
        }
        let slot = width / count;
        for (i, ch) in (0u32..).zip(text.chars()) {
            let font = pick_font(fonts, ch, rng)?;
            let size = (height.saturating_mul(rng.random_range(7..14)) / 16).max(1);
            let color = random_deep_color(rng);
            let x = slot * i + slot / size;
            let baseline = px(height / 2 + size / 2) - px(below(rng, height / 16 * 3));
            let rotation_deg = rng.random_range(-MAX_TILT_DEG..=MAX_TILT_DEG);
            self.draw_glyph(&GlyphParams {
                ch,
                font,
                size: to_f32(size),
                x: px(x),
                y: baseline - px(size),
                rotation_deg,
                color,
            });
        }
        Ok(())
    }

    fn finish(self) -> CaptchaImage {
        CaptchaImage::new(self.image)
    }
}

/// Pick a random font and make sure it can draw `ch`.
fn pick_font<'a>(
    fonts: &'a [FontHandle],
    ch: char,
    rng: &mut dyn RngCore,
) -> Result<&'a FontHandle, CaptchaError> {
    if fonts.is_empty() {
        return Err(CaptchaError::Draw("no fonts to draw with".into()));
    }
    let font = &fonts[rng.random_range(0..fonts.len())];
    if font.has_glyph(ch) {
        Ok(font)
    } else {
        Err(CaptchaError::MissingGlyph { ch })
    }
}

#[inline]
fn px(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[inline]
#[allow(clippy::cast_precision_loss)]
fn to_f32(v: u32) -> f32 {
    v as f32
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn to_i32(v: f32) -> i32 {
    v.round() as i32
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u32(v: f32) -> u32 {
    v.round().max(0.0) as u32
}
