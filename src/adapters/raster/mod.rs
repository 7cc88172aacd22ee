//! Raster adapter: draws captchas with `image`, `imageproc` and `ab_glyph`.

pub mod canvas;
pub mod item;

pub use canvas::RasterCanvas;
pub use item::CaptchaImage;
