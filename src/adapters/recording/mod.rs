//! Recording adapters that capture canvas calls into a draw log.

pub mod canvas;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use canvas::RecordingCanvas;

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum DrawCall {
    /// `draw_hollow_line`.
    HollowLine,
    /// `draw_noise` with the noise text and the names of the fonts offered.
    Noise {
        /// Noise characters.
        text: String,
        /// Resolved font names.
        fonts: Vec<String>,
    },
    /// `draw_slim_lines`.
    SlimLines {
        /// Number of lines requested.
        count: usize,
    },
    /// `draw_sine_line`.
    SineLine,
    /// `draw_text` with the question and the names of the fonts offered.
    Text {
        /// Question text.
        text: String,
        /// Resolved font names.
        fonts: Vec<String>,
    },
}

/// Accumulates draw calls, possibly across many canvases.
#[derive(Debug, Default)]
pub struct DrawLog {
    path: Option<PathBuf>,
    calls: Vec<DrawCall>,
}

impl DrawLog {
    /// Create an in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that [`finish`](Self::finish) writes to `path`.
    #[must_use]
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()), calls: Vec::new() }
    }

    /// Append a call.
    pub fn record(&mut self, call: DrawCall) {
        self.calls.push(call);
    }

    /// Calls recorded so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Write the log as pretty JSON if it has a target path.
    ///
    /// Returns the path written, or `None` for an in-memory log.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>, std::io::Error> {
        let Some(path) = self.path else {
            return Ok(None);
        };
        let json = serde_json::to_string_pretty(&self.calls).map_err(std::io::Error::other)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, json)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_order() {
        let mut log = DrawLog::new();
        log.record(DrawCall::SineLine);
        log.record(DrawCall::SlimLines { count: 3 });
        assert_eq!(log.calls(), &[DrawCall::SineLine, DrawCall::SlimLines { count: 3 }]);
    }

    #[test]
    fn in_memory_finish_writes_nothing() {
        let log = DrawLog::new();
        assert!(log.finish().unwrap().is_none());
    }

    #[test]
    fn finish_writes_json() {
        let dir = std::env::temp_dir().join("mathcap_draw_log_test");
        let path = dir.join("nested/trace.json");

        let mut log = DrawLog::to_file(&path);
        log.record(DrawCall::HollowLine);
        log.record(DrawCall::Text { text: "1+2=?".into(), fonts: vec!["fonts/A.ttf".into()] });

        let written = log.finish().unwrap().unwrap();
        assert_eq!(written, path);

        let content = std::fs::read_to_string(&path).unwrap();
        let calls: Vec<DrawCall> = serde_json::from_str(&content).unwrap();
        assert_eq!(calls.len(), 2);
        assert!(content.contains("\"call\": \"hollow_line\""));
        assert!(content.contains("1+2=?"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
