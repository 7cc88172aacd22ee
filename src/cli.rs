//! CLI argument parsing with clap.

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::Parser;
use mathcap::{CaptchaError, LineOptions, LineStyle, MathOptions, Operator};

use crate::params::parse_color;

/// Arithmetic captcha generator.
///
/// Flags left unset fall back to the config file, then to built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "mathcap", version, about)]
pub struct Cli {
    /// Image width in pixels [default: 240].
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels [default: 60].
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of background noise digits [default: 0].
    #[arg(short, long)]
    pub noise: Option<usize>,

    /// Decoration line style; repeat for several.
    #[arg(short, long = "line", value_enum)]
    pub lines: Vec<LineStyle>,

    /// Background color as #RRGGBB or #RRGGBBAA (random light color if unset).
    #[arg(short, long)]
    pub background: Option<String>,

    /// Font name for the question text; repeat for several.
    #[arg(short, long = "font")]
    pub fonts: Vec<String>,

    /// Directory to load named fonts from instead of the embedded set.
    #[arg(long)]
    pub font_dir: Option<PathBuf>,

    /// Allowed operator (+, -, * or x); repeat for several.
    #[arg(long = "operator", allow_hyphen_values = true)]
    pub operators: Vec<String>,

    /// Exclusive upper bound for operands [default: 10].
    #[arg(short, long)]
    pub max_num: Option<u32>,

    /// Number of captchas to generate.
    #[arg(short, long, default_value = "1")]
    pub count: u32,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the image as a data URI instead of writing a file.
    #[arg(long, conflicts_with = "output")]
    pub data_uri: bool,

    /// Print one JSON object per captcha.
    #[arg(long)]
    pub json: bool,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the draw calls of every captcha to this JSON file.
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Override `options` with every flag that was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the background color or operand bound is invalid.
    pub fn apply_to(&self, options: &mut MathOptions) -> Result<(), CaptchaError> {
        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(noise) = self.noise {
            options.noise_count = noise;
        }
        if !self.lines.is_empty() {
            options.line_options = self.lines.iter().copied().collect::<LineOptions>();
        }
        if let Some(ref background) = self.background {
            options.background = Some(parse_color(background).map_err(CaptchaError::InvalidArgument)?);
        }
        if !self.fonts.is_empty() {
            options.fonts.clone_from(&self.fonts);
        }
        if !self.operators.is_empty() {
            options.operators = self.operators.iter().map(String::as_str).map(Operator::parse).collect();
        }
        if let Some(max_num) = self.max_num {
            options.max_num = NonZeroU32::new(max_num).ok_or_else(|| {
                CaptchaError::InvalidArgument("--max-num must be at least 1".to_string())
            })?;
        }
        Ok(())
    }
}
