//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the captcha core and an external
//! collaborator. Implementations live in `src/adapters/`.

pub mod canvas;
pub mod font_source;

pub use canvas::Canvas;
pub use font_source::{font_path, FontHandle, FontSource, FONT_PATH_PREFIX};
