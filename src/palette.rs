//! Pure color math for the rendered page. No state, no invariants
//! beyond per-channel clamping to `[0, 255]`.

/// Brightens (positive `delta`) or darkens (negative) a `#rrggbb`
/// color, clamping each channel and re-encoding to six hex digits.
/// Malformed input falls back to the input unchanged.
pub fn adjust_brightness(hex: &str, delta: i32) -> String {
    let Some((r, g, b)) = parse_hex(hex) else {
        return hex.to_string();
    };

    let shift = |channel: u8| (i32::from(channel) + delta).clamp(0, 255) as u8;
    format!("#{:02x}{:02x}{:02x}", shift(r), shift(g), shift(b))
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    // Length alone is not enough: slicing a 6-byte value that holds a
    // multi-byte character would panic on a char boundary.
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Rounded percentage clamped to `[0, 100]`, for bar widths and labels.
pub fn display_percent(percent: f64) -> i64 {
    percent.round().clamp(0.0, 100.0) as i64
}
