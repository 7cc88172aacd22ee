//! Recording adapter for the `Canvas` port.

use std::sync::{Arc, Mutex, PoisonError};

use rand::RngCore;

use super::{DrawCall, DrawLog};
use crate::error::CaptchaError;
use crate::ports::canvas::Canvas;
use crate::ports::font_source::FontHandle;

/// Records every call into a shared [`DrawLog`] before delegating to an inner canvas.
pub struct RecordingCanvas<C> {
    inner: C,
    log: Arc<Mutex<DrawLog>>,
}

impl<C: Canvas> RecordingCanvas<C> {
    /// Wrap `inner`, appending its calls to `log`.
    #[must_use]
    pub fn new(inner: C, log: Arc<Mutex<DrawLog>>) -> Self {
        Self { inner, log }
    }

    fn record(&self, call: DrawCall) {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).record(call);
    }
}

fn font_names(fonts: &[FontHandle]) -> Vec<String> {
    fonts.iter().map(|f| f.name().to_string()).collect()
}

impl<C: Canvas> Canvas for RecordingCanvas<C> {
    type Item = C::Item;

    fn draw_hollow_line(&mut self, rng: &mut dyn RngCore) {
        self.record(DrawCall::HollowLine);
        self.inner.draw_hollow_line(rng);
    }

    fn draw_noise(
        &mut self,
        text: &str,
        fonts: &[FontHandle],
        rng: &mut dyn RngCore,
    ) -> Result<(), CaptchaError> {
        self.record(DrawCall::Noise { text: text.to_string(), fonts: font_names(fonts) });
        self.inner.draw_noise(text, fonts, rng)
    }

    fn draw_slim_lines(&mut self, count: usize, rng: &mut dyn RngCore) {
        self.record(DrawCall::SlimLines { count });
        self.inner.draw_slim_lines(count, rng);
    }

    fn draw_sine_line(&mut self, rng: &mut dyn RngCore) {
        self.record(DrawCall::SineLine);
        self.inner.draw_sine_line(rng);
    }

    fn draw_text(
        &mut self,
        text: &str,
        fonts: &[FontHandle],
        rng: &mut dyn RngCore,
    ) -> Result<(), CaptchaError> {
        self.record(DrawCall::Text { text: text.to_string(), fonts: font_names(fonts) });
        self.inner.draw_text(text, fonts, rng)
    }

    fn finish(self) -> C::Item {
        self.inner.finish()
    }
}
