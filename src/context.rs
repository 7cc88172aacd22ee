//! Service context that wires the driver to its font source and canvas.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use mathcap::adapters::fonts::{DirectoryFonts, EmbeddedFonts};
use mathcap::adapters::raster::{CaptchaImage, RasterCanvas};
use mathcap::adapters::recording::{DrawLog, RecordingCanvas};
use mathcap::{CaptchaError, FontSource, MathDriver, MathOptions};
use rand::RngCore;

/// Bundles the configured driver.
pub struct ServiceContext {
    /// Question generator and renderer.
    pub driver: MathDriver,
}

/// Handle to a trace session that must be finished after use.
pub struct TraceSession {
    log: Arc<Mutex<DrawLog>>,
}

impl TraceSession {
    /// Start a session whose log is written to `path`.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self { log: Arc::new(Mutex::new(DrawLog::to_file(path))) }
    }

    /// Finish the session and write the draw log to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let log = Arc::try_unwrap(self.log)
            .map_err(|_| "Trace log still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Trace log lock poisoned: {e}"))?;
        log.finish()
            .map_err(|e| format!("Failed to write trace: {e}"))?
            .ok_or_else(|| "Trace log has no target path".to_string())
    }
}

impl ServiceContext {
    /// Build a driver over the embedded fonts, or over `font_dir` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the fonts cannot be loaded.
    pub fn new(options: MathOptions, font_dir: Option<&Path>) -> Result<Self, CaptchaError> {
        let embedded = Arc::new(EmbeddedFonts::load()?);
        let source = font_dir.map(|dir| Arc::new(DirectoryFonts::new(dir)) as Arc<dyn FontSource>);
        let driver = MathDriver::new(options, embedded, source)?;
        Ok(Self { driver })
    }

    /// Draw `question`, recording the draw calls when a trace session is active.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn render<R: RngCore>(
        &self,
        question: &str,
        trace: Option<&TraceSession>,
        rng: &mut R,
    ) -> Result<CaptchaImage, CaptchaError> {
        match trace {
            Some(session) => {
                let log = Arc::clone(&session.log);
                self.driver.draw_captcha_on(
                    question,
                    move |width, height, background| {
                        RecordingCanvas::new(RasterCanvas::new(width, height, background), log)
                    },
                    rng,
                )
            }
            None => self.driver.draw_captcha(question, rng),
        }
    }
}
