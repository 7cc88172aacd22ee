//! Canvas port: the drawing surface a captcha is rendered onto.

use rand::RngCore;

use crate::error::CaptchaError;
use crate::ports::font_source::FontHandle;

/// A 2-D drawing surface that knows how to paint each captcha layer.
///
/// Callers sequence the calls; later calls paint over earlier ones. Every
/// call receives the caller's random source so a seeded run draws the same
/// image twice.
pub trait Canvas {
    /// The finished artifact handed back to the caller.
    type Item;

    /// Paint a thick, light-colored wavy band.
    fn draw_hollow_line(&mut self, rng: &mut dyn RngCore);

    /// Scatter `text` across the surface as background noise.
    ///
    /// # Errors
    ///
    /// Returns an error if a character cannot be drawn with `fonts`.
    fn draw_noise(
        &mut self,
        text: &str,
        fonts: &[FontHandle],
        rng: &mut dyn RngCore,
    ) -> Result<(), CaptchaError>;

    /// Paint `count` thin straight lines.
    fn draw_slim_lines(&mut self, count: usize, rng: &mut dyn RngCore);

    /// Paint small sine-wave lines.
    fn draw_sine_line(&mut self, rng: &mut dyn RngCore);

    /// Paint the question text itself.
    ///
    /// # Errors
    ///
    /// Returns an error if a character cannot be drawn with `fonts`.
    fn draw_text(
        &mut self,
        text: &str,
        fonts: &[FontHandle],
        rng: &mut dyn RngCore,
    ) -> Result<(), CaptchaError>;

    /// Consume the surface and produce the finished item.
    fn finish(self) -> Self::Item;
}
