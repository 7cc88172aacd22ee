//! Validation and parsing of CLI parameter values.

/// Parse a `#RRGGBB` or `#RRGGBBAA` color (the `#` is optional).
///
/// Six digits get an opaque alpha.
///
/// # Errors
///
/// Returns an error if the value is not 6 or 8 hex digits.
pub fn parse_color(value: &str) -> Result<[u8; 4], String> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Unsupported color '{value}'. Expected #RRGGBB or #RRGGBBAA"));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|e| format!("Bad color '{value}': {e}"))
    };
    let alpha = if hex.len() == 8 { channel(3)? } else { u8::MAX };
    Ok([channel(0)?, channel(1)?, channel(2)?, alpha])
}

/// Validate image dimensions.
///
/// # Errors
///
/// Returns an error if either side is zero.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), String> {
    if width == 0 || height == 0 {
        return Err(format!("Image size must be positive, got {width}x{height}"));
    }
    Ok(())
}

/// Validate the number of captchas to generate.
///
/// # Errors
///
/// Returns an error if the count is zero.
pub fn validate_count(count: u32) -> Result<(), String> {
    if count == 0 {
        return Err("--count must be at least 1".to_string());
    }
    Ok(())
}
