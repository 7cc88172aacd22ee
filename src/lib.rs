//! Mathcap - arithmetic captcha generation.
//!
//! A [`MathDriver`] turns [`MathOptions`] into random questions such as
//! `"3+4=?"` and renders them onto a canvas with noise digits and decoration
//! lines. Fonts come from a [`FontSource`] (embedded by default) and the
//! drawing surface is any [`Canvas`]; both are ports with swappable adapters.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mathcap::adapters::fonts::EmbeddedFonts;
//! use mathcap::{MathDriver, MathOptions};
//!
//! # fn main() -> Result<(), mathcap::CaptchaError> {
//! let driver = MathDriver::new(MathOptions::default(), Arc::new(EmbeddedFonts::load()?), None)?;
//! let mut rng = rand::rng();
//! let challenge = driver.generate_id_question_answer(&mut rng);
//! let image = driver.draw_captcha(&challenge.question, &mut rng)?;
//! image.save(std::path::Path::new("captcha.png"))?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod driver;
pub mod error;
pub mod operator;
pub mod options;
pub mod ports;
pub mod random;

pub use driver::{Challenge, MathDriver, SLIM_LINE_COUNT};
pub use error::CaptchaError;
pub use operator::Operator;
pub use options::{LineOptions, LineStyle, MathOptions, DEFAULT_MAX_NUM};
pub use ports::{Canvas, FontHandle, FontSource};
