//! Stub canvas that draws nothing.
//!
//! Useful for dry runs and for exercising the drawing sequence without
//! rasterizing, including the failure paths of the fallible steps.

use rand::RngCore;

use crate::error::CaptchaError;
use crate::ports::canvas::Canvas;
use crate::ports::font_source::FontHandle;

/// Which fallible step a [`StubCanvas`] rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailingStep {
    /// `draw_noise`.
    Noise,
    /// `draw_text`.
    Text,
}

/// A canvas whose drawing calls do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubCanvas {
    fail_on: Option<FailingStep>,
}

impl StubCanvas {
    /// A stub on which every call succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A stub whose `draw_noise` fails.
    #[must_use]
    pub fn failing_noise() -> Self {
        Self { fail_on: Some(FailingStep::Noise) }
    }

    /// A stub whose `draw_text` fails.
    #[must_use]
    pub fn failing_text() -> Self {
        Self { fail_on: Some(FailingStep::Text) }
    }

    fn check(self, step: FailingStep) -> Result<(), CaptchaError> {
        if self.fail_on == Some(step) {
            Err(CaptchaError::Draw(format!("stub canvas rejects {step:?}")))
        } else {
            Ok(())
        }
    }
}

impl Canvas for StubCanvas {
    type Item = ();

    fn draw_hollow_line(&mut self, _rng: &mut dyn RngCore) {}

    fn draw_noise(
        &mut self,
        _text: &str,
        _fonts: &[FontHandle],
        _rng: &mut dyn RngCore,
    ) -> Result<(), CaptchaError> {
        self.check(FailingStep::Noise)
    }

    fn draw_slim_lines(&mut self, _count: usize, _rng: &mut dyn RngCore) {}

    fn draw_sine_line(&mut self, _rng: &mut dyn RngCore) {}

    fn draw_text(
        &mut self,
        _text: &str,
        _fonts: &[FontHandle],
        _rng: &mut dyn RngCore,
    ) -> Result<(), CaptchaError> {
        self.check(FailingStep::Text)
    }

    fn finish(self) {}
}
