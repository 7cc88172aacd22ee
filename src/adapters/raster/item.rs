//! The rendered captcha image.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use image::{ImageFormat, RgbaImage};

use crate::error::CaptchaError;

/// A rendered captcha, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaImage {
    image: RgbaImage,
}

impl CaptchaImage {
    /// Wrap an RGBA buffer.
    #[must_use]
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The raw pixel buffer.
    #[must_use]
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    /// Take the raw pixel buffer.
    #[must_use]
    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }

    /// Encode as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, CaptchaError> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| CaptchaError::Encode(format!("PNG encode failed: {e}")))?;
        Ok(buf.into_inner())
    }

    /// Encode as a `data:image/png;base64,...` URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder fails.
    pub fn to_data_uri(&self) -> Result<String, CaptchaError> {
        let png = self.encode_png()?;
        Ok(format!("data:image/png;base64,{}", base64::engine::general_purpose::STANDARD.encode(png)))
    }

    /// Write a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), CaptchaError> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| CaptchaError::Encode(format!("Failed to save {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn sample() -> CaptchaImage {
        CaptchaImage::new(RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn dimensions() {
        let item = sample();
        assert_eq!(item.width(), 4);
        assert_eq!(item.height(), 3);
    }

    #[test]
    fn png_has_magic_bytes() {
        let png = sample().encode_png().unwrap();
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn data_uri_prefix() {
        let uri = sample().to_data_uri().unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn save_writes_png() {
        let path = std::env::temp_dir().join("mathcap_item_save_test.png");
        sample().save(&path).unwrap();
        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[..8], &PNG_MAGIC);
        let _ = std::fs::remove_file(&path);
    }
}
