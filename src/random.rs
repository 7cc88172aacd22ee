//! Random identifiers, strings and colors.
//!
//! Everything here draws from a caller-supplied [`Rng`]; nothing touches a
//! global generator. None of it is suitable for secrets.

use image::Rgba;
use rand::Rng;

/// Length of identifiers produced by [`random_id`].
pub const ID_LEN: usize = 20;

/// Alphabet identifiers are drawn from.
pub const ID_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Digits used for background noise glyphs. There is no `5`.
pub const NOISE_DIGITS: &str = "012346789";

/// Generate an opaque identifier to correlate a question with its answer.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    random_text(rng, ID_LEN, ID_ALPHABET)
}

/// Build a string of `len` characters drawn uniformly from `alphabet`.
///
/// Returns an empty string when `alphabet` is empty.
pub fn random_text<R: Rng + ?Sized>(rng: &mut R, len: usize, alphabet: &str) -> String {
    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    (0..len).map(|_| chars[rng.random_range(0..chars.len())]).collect()
}

/// A pale, opaque color suitable for backgrounds and noise.
pub fn random_light_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba<u8> {
    Rgba([rng.random_range(200..255), rng.random_range(200..255), rng.random_range(200..255), 255])
}

/// A dark, opaque color that stands out against light backgrounds.
pub fn random_deep_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba<u8> {
    Rgba([rng.random_range(0..150), rng.random_range(0..150), rng.random_range(0..150), 255])
}

/// Uniform value in `[0, bound)`, or 0 when `bound` is 0.
pub fn below<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    if bound == 0 {
        0
    } else {
        rng.random_range(0..bound)
    }
}
