//! Font source reading TrueType files from a directory.

use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use tracing::debug;

use crate::error::CaptchaError;
use crate::ports::font_source::{FontHandle, FontSource, FONT_PATH_PREFIX};

/// Loads fonts from files under a root directory.
///
/// `fonts/Foo.ttf` resolves to `<root>/Foo.ttf`.
#[derive(Debug, Clone)]
pub struct DirectoryFonts {
    root: PathBuf,
}

impl DirectoryFonts {
    /// Create a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory fonts are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name.strip_prefix(FONT_PATH_PREFIX).unwrap_or(name))
    }
}

impl FontSource for DirectoryFonts {
    fn load_font_by_name(&self, name: &str) -> Result<FontHandle, CaptchaError> {
        let path = self.path_for(name);
        let data = std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CaptchaError::FontNotFound { name: name.to_string() },
            _ => CaptchaError::Io(e),
        })?;
        let font = FontArc::try_from_vec(data).map_err(|e| CaptchaError::InvalidFont {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "loaded font from directory");
        Ok(FontHandle::new(name, font))
    }
}
