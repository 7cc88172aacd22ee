//! Rendering options: decoration line styles and the driver's settings.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::operator::Operator;

/// A decorative line drawn behind the question text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// A thick, light wavy band.
    Hollow,
    /// Thin straight lines.
    Slim,
    /// Small sine waves.
    Sine,
}

/// The set of decoration lines to draw. Each style toggles independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LineStyle>", into = "Vec<LineStyle>")]
pub struct LineOptions {
    hollow: bool,
    slim: bool,
    sine: bool,
}

impl LineOptions {
    /// No decoration lines.
    pub const NONE: Self = Self { hollow: false, slim: false, sine: false };

    /// Every decoration line.
    pub const ALL: Self = Self { hollow: true, slim: true, sine: true };

    /// Whether `style` is part of the set.
    #[must_use]
    pub const fn contains(self, style: LineStyle) -> bool {
        match style {
            LineStyle::Hollow => self.hollow,
            LineStyle::Slim => self.slim,
            LineStyle::Sine => self.sine,
        }
    }

    /// Return a copy with `style` added.
    #[must_use]
    pub const fn with(mut self, style: LineStyle) -> Self {
        match style {
            LineStyle::Hollow => self.hollow = true,
            LineStyle::Slim => self.slim = true,
            LineStyle::Sine => self.sine = true,
        }
        self
    }

    /// Return a copy with `style` removed.
    #[must_use]
    pub const fn without(mut self, style: LineStyle) -> Self {
        match style {
            LineStyle::Hollow => self.hollow = false,
            LineStyle::Slim => self.slim = false,
            LineStyle::Sine => self.sine = false,
        }
        self
    }

    /// Whether no style is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.hollow || self.slim || self.sine)
    }

    /// The styles in the set, in drawing order.
    pub fn iter(self) -> impl Iterator<Item = LineStyle> {
        [LineStyle::Hollow, LineStyle::Slim, LineStyle::Sine]
            .into_iter()
            .filter(move |&style| self.contains(style))
    }
}

impl FromIterator<LineStyle> for LineOptions {
    fn from_iter<I: IntoIterator<Item = LineStyle>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl From<Vec<LineStyle>> for LineOptions {
    fn from(styles: Vec<LineStyle>) -> Self {
        styles.into_iter().collect()
    }
}

impl From<LineOptions> for Vec<LineStyle> {
    fn from(options: LineOptions) -> Self {
        options.iter().collect()
    }
}

/// Operand bound used when none is configured.
pub const DEFAULT_MAX_NUM: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => NonZeroU32::MIN,
};

/// Settings a [`MathDriver`](crate::MathDriver) is built from.
///
/// Also the `[captcha]` table of the config file; every field is optional there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathOptions {
    /// Image height in pixels.
    pub height: u32,
    /// Image width in pixels.
    pub width: u32,
    /// Number of background noise glyphs. Zero disables noise.
    pub noise_count: usize,
    /// Decoration lines to draw.
    pub line_options: LineOptions,
    /// Fixed RGBA background. `None` picks a random light color per image.
    pub background: Option<[u8; 4]>,
    /// Font names, resolved as `fonts/<name>`. Empty means every embedded font.
    pub fonts: Vec<String>,
    /// Allowed operators. Empty means `+`, `-` and `*`.
    pub operators: Vec<Operator>,
    /// Exclusive upper bound for random operands.
    pub max_num: NonZeroU32,
}

impl Default for MathOptions {
    fn default() -> Self {
        Self {
            height: 60,
            width: 240,
            noise_count: 0,
            line_options: LineOptions::NONE,
            background: None,
            fonts: Vec::new(),
            operators: Vec::new(),
            max_num: DEFAULT_MAX_NUM,
        }
    }
}
