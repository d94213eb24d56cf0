//! Color handling for light requests.
//!
//! Request colors carry a 24-bit RGB payload in the low bits (`0x00RRGGBB`);
//! the top byte is ignored. Brightness is derived from the payload with a
//! fixed-weight integer luma approximation.

/// Mask selecting the 24-bit RGB payload of a request color.
pub const RGB_MASK: u32 = 0x00FF_FFFF;

/// Perceptual brightness of an RGB color, `0..=255`.
///
/// Integer luma approximation `(77*R + 150*G + 29*B) >> 8` with a
/// truncating shift. White (`0x00FFFFFF`) maps to exactly 255.
pub fn rgb_to_brightness(color: u32) -> u32 {
    let color = color & RGB_MASK;
    ((77 * ((color >> 16) & 0xFF)) + (150 * ((color >> 8) & 0xFF)) + (29 * (color & 0xFF))) >> 8
}

/// Whether a color counts as "lit" — any non-zero RGB payload.
pub fn is_lit(color: u32) -> bool {
    color & RGB_MASK != 0
}

/// Parse a color string into the request format `0x00RRGGBB`.
///
/// Accepts:
/// - Hex: `"#FF0000"`, `"FF0000"`, `"#ff0000"`
/// - Named: `"red"`, `"green"`, `"blue"`, `"white"`, `"orange"`, `"yellow"`, `"purple"`, `"cyan"`
pub fn parse_color(s: &str) -> crate::error::Result<u32> {
    let s = s.trim();

    // Named colors
    match s.to_lowercase().as_str() {
        "red" => return Ok(0x00FF_0000),
        "green" => return Ok(0x0000_FF00),
        "blue" => return Ok(0x0000_00FF),
        "white" => return Ok(0x00FF_FFFF),
        "orange" => return Ok(0x00FF_8000),
        "yellow" => return Ok(0x00FF_FF00),
        "purple" => return Ok(0x0080_00FF),
        "cyan" => return Ok(0x0000_FFFF),
        "off" | "black" => return Ok(0x0000_0000),
        _ => {}
    }

    // Hex color
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 {
        return Err(crate::LightdError::Color(format!(
            "Invalid color: {s} (use #RRGGBB or a color name)"
        )));
    }
    u32::from_str_radix(hex, 16)
        .map_err(|_| crate::LightdError::Color(format!("Invalid hex color: {s}")))
}

/// Format a request color value as `#RRGGBB`.
pub fn format_color(val: u32) -> String {
    let r = (val >> 16) & 0xFF;
    let g = (val >> 8) & 0xFF;
    let b = val & 0xFF;
    format!("#{r:02X}{g:02X}{b:02X}")
}
