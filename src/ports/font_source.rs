//! Font source port for resolving font names into drawable fonts.

use std::fmt;
use std::sync::Arc;

use ab_glyph::{Font, FontArc};

use crate::error::CaptchaError;

/// Path prefix every font name is resolved under.
pub const FONT_PATH_PREFIX: &str = "fonts/";

/// A loaded font together with the name it was resolved from.
///
/// Cloning is cheap: both the name and the font data are reference counted.
#[derive(Clone)]
pub struct FontHandle {
    name: Arc<str>,
    font: FontArc,
}

impl FontHandle {
    /// Wrap a parsed font under the given resolved name.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, font: FontArc) -> Self {
        Self { name: name.into(), font }
    }

    /// The resolved name (e.g. `"fonts/DejaVuSans.ttf"`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying `ab_glyph` font.
    #[must_use]
    pub fn font(&self) -> &FontArc {
        &self.font
    }

    /// Whether the font maps `ch` to a real glyph rather than `.notdef`.
    #[must_use]
    pub fn has_glyph(&self, ch: char) -> bool {
        self.font.glyph_id(ch).0 != 0
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FontHandle").field(&self.name).finish()
    }
}

impl PartialEq for FontHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for FontHandle {}

/// Supplies fonts by name.
pub trait FontSource: Send + Sync {
    /// Load the font registered under `name` (which carries the `fonts/` prefix).
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::FontNotFound`] if no such font exists, or
    /// [`CaptchaError::InvalidFont`] if it exists but cannot be parsed.
    fn load_font_by_name(&self, name: &str) -> Result<FontHandle, CaptchaError>;
}

/// Build the full lookup name for a configured font name.
#[must_use]
pub fn font_path(name: &str) -> String {
    format!("{FONT_PATH_PREFIX}{name}")
}
