//! Configuration file loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CaptchaError;
use crate::options::MathOptions;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default captcha settings (overridden field by field by CLI flags).
    #[serde(default)]
    pub captcha: MathOptions,

    /// Where named fonts are looked up.
    #[serde(default)]
    pub fonts: FontsConfig,
}

/// Font lookup configuration.
#[derive(Debug, Default, Deserialize)]
pub struct FontsConfig {
    /// Directory holding font files. Unset means the embedded fonts.
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CaptchaError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CaptchaError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&contents).map_err(|e| {
            CaptchaError::Config(format!("Failed to parse config {}: {e}", path.display()))
        })
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `MATHCAP_CONFIG` environment variable
/// 3. `~/.config/mathcap/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    if let Ok(p) = std::env::var("MATHCAP_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/mathcap/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/mathcap/config.toml")
    } else {
        PathBuf::from("mathcap.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::Operator;
    use crate::options::{LineOptions, LineStyle};

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.captcha, MathOptions::default());
        assert!(config.fonts.dir.is_none());
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.captcha.width, 240);
        assert_eq!(config.captcha.height, 60);
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("mathcap_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[captcha]
width = 200
height = 50
noise_count = 4
line_options = ["hollow", "sine"]
background = [255, 255, 255, 255]
fonts = ["DejaVuSans.ttf"]
operators = ["+", "x"]
max_num = 20

[fonts]
dir = "/usr/share/captcha"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.captcha.width, 200);
        assert_eq!(config.captcha.height, 50);
        assert_eq!(config.captcha.noise_count, 4);
        assert_eq!(
            config.captcha.line_options,
            LineOptions::NONE.with(LineStyle::Hollow).with(LineStyle::Sine)
        );
        assert_eq!(config.captcha.background, Some([255, 255, 255, 255]));
        assert_eq!(config.captcha.fonts, vec!["DejaVuSans.ttf".to_string()]);
        assert_eq!(config.captcha.operators, vec![Operator::Add, Operator::Mul]);
        assert_eq!(config.captcha.max_num.get(), 20);
        assert_eq!(config.fonts.dir.as_deref(), Some(Path::new("/usr/share/captcha")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let config: Config = toml::from_str("[captcha]\nnoise_count = 2\n").unwrap();
        assert_eq!(config.captcha.noise_count, 2);
        assert_eq!(config.captcha.width, 240);
        assert!(config.captcha.operators.is_empty());
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("mathcap_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(matches!(Config::load(&path), Err(CaptchaError::Config(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some(Path::new("/tmp/my-config.toml")));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
