//! Fonts compiled into the binary. The default font source.

use ab_glyph::FontArc;
use tracing::debug;

use crate::error::CaptchaError;
use crate::ports::font_source::{FontHandle, FontSource};

macro_rules! embedded_font {
    ($file:literal) => {
        (
            concat!("fonts/", $file),
            include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/", $file)) as &[u8],
        )
    };
}

/// Every embedded font, keyed by its full `fonts/` name.
const EMBEDDED: &[(&str, &[u8])] = &[
    embedded_font!("DejaVuSans.ttf"),
    embedded_font!("DejaVuSans-Bold.ttf"),
    embedded_font!("DejaVuSerif-Italic.ttf"),
    embedded_font!("DejaVuSansMono-Bold.ttf"),
];

/// The built-in font set.
///
/// Load it once at startup and share it behind an `Arc`; it is never mutated.
#[derive(Debug, Clone)]
pub struct EmbeddedFonts {
    fonts: Vec<FontHandle>,
}

impl EmbeddedFonts {
    /// Parse every embedded font.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::InvalidFont`] if an embedded font fails to parse.
    pub fn load() -> Result<Self, CaptchaError> {
        let fonts = EMBEDDED
            .iter()
            .map(|&(name, data)| {
                FontArc::try_from_slice(data)
                    .map(|font| FontHandle::new(name, font))
                    .map_err(|e| CaptchaError::InvalidFont { name: name.into(), message: e.to_string() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = fonts.len(), "loaded embedded fonts");
        Ok(Self { fonts })
    }

    /// The complete default font set. Never empty.
    #[must_use]
    pub fn fonts(&self) -> &[FontHandle] {
        &self.fonts
    }

    /// Names of every embedded font.
    pub fn names() -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|&(name, _)| name)
    }
}

impl FontSource for EmbeddedFonts {
    fn load_font_by_name(&self, name: &str) -> Result<FontHandle, CaptchaError> {
        self.fonts
            .iter()
            .find(|f| f.name() == name)
            .cloned()
            .ok_or_else(|| CaptchaError::FontNotFound { name: name.to_string() })
    }
}
