//! The math captcha driver.
//!
//! [`MathDriver`] owns the rendering settings and the resolved font set. It
//! produces a [`Challenge`] (id, question, answer) and then draws the question
//! onto a [`Canvas`]. Layers are painted in a fixed order: hollow line, noise,
//! slim lines, sine lines, question text. Later layers cover earlier ones.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use image::Rgba;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::adapters::fonts::EmbeddedFonts;
use crate::adapters::raster::{CaptchaImage, RasterCanvas};
use crate::error::CaptchaError;
use crate::operator::Operator;
use crate::options::{LineOptions, LineStyle, MathOptions};
use crate::ports::canvas::Canvas;
use crate::ports::font_source::{font_path, FontHandle, FontSource};
use crate::random::{random_id, random_light_color, random_text, NOISE_DIGITS};

/// Number of thin straight lines drawn when [`LineStyle::Slim`] is set.
pub const SLIM_LINE_COUNT: usize = 3;

/// A generated question with its identifier and expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Opaque identifier used to look the answer up later.
    pub id: String,
    /// Question text, e.g. `"3+4=?"`.
    pub question: String,
    /// Decimal answer, e.g. `"7"`.
    pub answer: String,
}

/// Generates arithmetic questions and renders them as captcha images.
pub struct MathDriver {
    /// Image height in pixels.
    pub height: u32,
    /// Image width in pixels.
    pub width: u32,
    /// Number of noise glyphs; zero skips the noise layer.
    pub noise_count: usize,
    /// Decoration lines to draw.
    pub line_options: LineOptions,
    /// Fixed background; `None` draws a random light color per image.
    pub background: Option<Rgba<u8>>,
    /// Configured font names. Call [`resolve_fonts`](Self::resolve_fonts)
    /// after changing them.
    pub fonts: Vec<String>,
    operators: Vec<Operator>,
    max_num: NonZeroU32,
    embedded: Arc<EmbeddedFonts>,
    font_source: Arc<dyn FontSource>,
    resolved_fonts: Vec<FontHandle>,
}

impl MathDriver {
    /// Build a driver from `options`.
    ///
    /// Font names are looked up in `font_source` as `fonts/<name>`; without a
    /// source the `embedded` set is used. No configured fonts means every
    /// embedded font, and no configured operators means `+`, `-` and `*`.
    ///
    /// # Errors
    ///
    /// Returns the font source's error if a configured font cannot be loaded.
    pub fn new(
        options: MathOptions,
        embedded: Arc<EmbeddedFonts>,
        font_source: Option<Arc<dyn FontSource>>,
    ) -> Result<Self, CaptchaError> {
        let font_source: Arc<dyn FontSource> = match font_source {
            Some(source) => source,
            None => embedded.clone(),
        };
        let resolved_fonts = resolve_font_set(font_source.as_ref(), &options.fonts, &embedded)?;

        let operators = if options.operators.is_empty() {
            debug!("no operators configured, allowing + - *");
            Operator::all()
        } else {
            options.operators
        };

        Ok(Self {
            height: options.height,
            width: options.width,
            noise_count: options.noise_count,
            line_options: options.line_options,
            background: options.background.map(Rgba),
            fonts: options.fonts,
            operators,
            max_num: options.max_num,
            embedded,
            font_source,
            resolved_fonts,
        })
    }

    /// Re-resolve [`fonts`](Self::fonts) through the current font source.
    ///
    /// On error the previously resolved set is kept.
    ///
    /// # Errors
    ///
    /// Returns the font source's error if a configured font cannot be loaded.
    pub fn resolve_fonts(&mut self) -> Result<&mut Self, CaptchaError> {
        self.resolved_fonts = resolve_font_set(self.font_source.as_ref(), &self.fonts, &self.embedded)?;
        Ok(self)
    }

    /// Replace the font source (`None` restores the embedded set).
    ///
    /// Takes effect on the next [`resolve_fonts`](Self::resolve_fonts).
    pub fn set_font_source(&mut self, font_source: Option<Arc<dyn FontSource>>) -> &mut Self {
        self.font_source = match font_source {
            Some(source) => source,
            None => self.embedded.clone(),
        };
        self
    }

    /// Allowed operators. Never empty.
    #[must_use]
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Exclusive upper bound for operands.
    #[must_use]
    pub fn max_num(&self) -> NonZeroU32 {
        self.max_num
    }

    /// Fonts the question text is drawn with. Never empty.
    #[must_use]
    pub fn resolved_fonts(&self) -> &[FontHandle] {
        &self.resolved_fonts
    }

    /// The embedded font set, used for noise and as the fallback.
    #[must_use]
    pub fn default_fonts(&self) -> &[FontHandle] {
        self.embedded.fonts()
    }

    /// Create a random question and its answer.
    ///
    /// Subtraction never goes negative: the minuend is in `1..=max` and the
    /// subtrahend below it. An unrecognized operator produces a subtraction
    /// whose minuend is the sum of two operands, so its answer may be negative.
    pub fn generate_id_question_answer<R: Rng + ?Sized>(&self, rng: &mut R) -> Challenge {
        let id = random_id(rng);
        let max = self.max_num.get();
        let op = &self.operators[rng.random_range(0..self.operators.len())];

        let (question, answer) = match op {
            Operator::Add => {
                let a = rng.random_range(0..max);
                let b = rng.random_range(0..max);
                (format!("{a}{}{b}=?", op.symbol()), (u64::from(a) + u64::from(b)).to_string())
            }
            Operator::Sub => {
                let a = rng.random_range(0..max) + 1;
                let b = rng.random_range(0..a);
                (format!("{a}{}{b}=?", op.symbol()), (a - b).to_string())
            }
            Operator::Mul => {
                let a = rng.random_range(0..max);
                let b = rng.random_range(0..max);
                (format!("{a}{}{b}=?", op.symbol()), (u64::from(a) * u64::from(b)).to_string())
            }
            Operator::Other(_) => {
                let a = i64::from(rng.random_range(0..max)) + i64::from(rng.random_range(0..max));
                let b = i64::from(rng.random_range(0..max));
                (format!("{a}-{b}=?"), (a - b).to_string())
            }
        };

        trace!(%id, %question, "generated question");
        Challenge { id, question, answer }
    }

    /// Draw `question` onto a [`RasterCanvas`].
    ///
    /// # Errors
    ///
    /// Returns an error if the noise or question text cannot be drawn.
    pub fn draw_captcha<R: RngCore>(
        &self,
        question: &str,
        rng: &mut R,
    ) -> Result<CaptchaImage, CaptchaError> {
        self.draw_captcha_on(question, RasterCanvas::new, rng)
    }

    /// Draw `question` onto a canvas built by `create(width, height, background)`.
    ///
    /// A failed step drops the canvas; nothing partially drawn is returned.
    ///
    /// # Errors
    ///
    /// Returns the canvas's error if the noise or question text cannot be drawn.
    pub fn draw_captcha_on<C, F, R>(
        &self,
        question: &str,
        create: F,
        rng: &mut R,
    ) -> Result<C::Item, CaptchaError>
    where
        C: Canvas,
        F: FnOnce(u32, u32, Rgba<u8>) -> C,
        R: RngCore,
    {
        let rng: &mut dyn RngCore = rng;
        let background = match self.background {
            Some(background) => background,
            None => random_light_color(rng),
        };
        let mut canvas = create(self.width, self.height, background);

        if self.line_options.contains(LineStyle::Hollow) {
            trace!("drawing hollow line");
            canvas.draw_hollow_line(rng);
        }

        if self.noise_count > 0 {
            let noise = random_text(rng, self.noise_count, NOISE_DIGITS);
            trace!(%noise, "drawing noise");
            canvas.draw_noise(&noise, self.embedded.fonts(), rng)?;
        }

        if self.line_options.contains(LineStyle::Slim) {
            trace!(count = SLIM_LINE_COUNT, "drawing slim lines");
            canvas.draw_slim_lines(SLIM_LINE_COUNT, rng);
        }

        if self.line_options.contains(LineStyle::Sine) {
            trace!("drawing sine line");
            canvas.draw_sine_line(rng);
        }

        canvas.draw_text(question, &self.resolved_fonts, rng)?;
        Ok(canvas.finish())
    }
}

impl fmt::Debug for MathDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MathDriver")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("noise_count", &self.noise_count)
            .field("line_options", &self.line_options)
            .field("background", &self.background)
            .field("fonts", &self.fonts)
            .field("operators", &self.operators)
            .field("max_num", &self.max_num)
            .field("resolved_fonts", &self.resolved_fonts)
            .finish_non_exhaustive()
    }
}

/// Load every configured name, falling back to the embedded set when none resolve.
fn resolve_font_set(
    source: &dyn FontSource,
    names: &[String],
    embedded: &EmbeddedFonts,
) -> Result<Vec<FontHandle>, CaptchaError> {
    let fonts = names
        .iter()
        .map(|name| source.load_font_by_name(&font_path(name)))
        .collect::<Result<Vec<_>, _>>()?;

    if fonts.is_empty() {
        debug!("no fonts configured, using the embedded set");
        return Ok(embedded.fonts().to_vec());
    }
    debug!(count = fonts.len(), "resolved configured fonts");
    Ok(fonts)
}
