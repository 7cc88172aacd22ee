//! File naming and stdout records.

use std::path::{Path, PathBuf};

use mathcap::Challenge;
use serde::Serialize;

/// Default file name for a captcha: `captcha-<id>.png`.
#[must_use]
pub fn auto_filename(id: &str) -> String {
    format!("captcha-{id}.png")
}

/// Resolve the output path: use explicit path or auto-generate from the id.
#[must_use]
pub fn resolve_output_path(explicit: Option<&Path>, id: &str) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(auto_filename(id)),
    }
}

/// Insert `-<index + 1>` before the extension when more than one file is written.
#[must_use]
pub fn numbered_path(base: &Path, index: u32, total: u32) -> PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }
    let stem = base.file_stem().unwrap_or_default().to_string_lossy();
    let suffix = index + 1;
    match base.extension() {
        Some(ext) => base.with_file_name(format!("{stem}-{suffix}.{}", ext.to_string_lossy())),
        None => base.with_file_name(format!("{stem}-{suffix}")),
    }
}

/// What the CLI reports for each captcha.
#[derive(Debug, Serialize)]
pub struct CaptchaRecord {
    /// Captcha identifier.
    pub id: String,
    /// Question text.
    pub question: String,
    /// Expected answer.
    pub answer: String,
    /// Where the PNG was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// The PNG as a data URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_uri: Option<String>,
}

impl CaptchaRecord {
    /// Start a record from a generated challenge.
    #[must_use]
    pub fn new(challenge: Challenge) -> Self {
        Self {
            id: challenge.id,
            question: challenge.question,
            answer: challenge.answer,
            path: None,
            data_uri: None,
        }
    }

    /// Tab-separated `id`, `question`, `answer`.
    #[must_use]
    pub fn tsv(&self) -> String {
        format!("{}\t{}\t{}", self.id, self.question, self.answer)
    }
}
