//! Hex color math.
//!
//! Deterministic pure functions over 24-bit `#rrggbb` strings. Palette
//! derivation composes these with fixed percentages, and previews compare
//! the results byte for byte, so every function here rounds the same way:
//! clamp each channel to `[0, 255]`, then round half away from zero.
//!
//! Malformed input is passed through unchanged rather than rejected.
//!
//! # Example
//!
//! ```rust
//! use tinct::color;
//!
//! assert_eq!(color::lighten("#000000", 20.0), "#333333");
//! assert_eq!(color::darken("#ffffff", 20.0), "#cccccc");
//! assert_eq!(color::to_alpha("#ff0000", 0.5), "rgba(255, 0, 0, 0.5)");
//! ```

use std::fmt;

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Weighted luminance `0.299r + 0.587g + 0.114b`, in channel units.
    pub fn luminance(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    /// True when the luminance is below the channel midpoint.
    pub fn is_dark(self) -> bool {
        self.luminance() < 128.0
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn channels(self) -> [f64; 3] {
        [f64::from(self.r), f64::from(self.g), f64::from(self.b)]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parse a six-digit hex color, with or without a leading `#`.
///
/// Returns `None` for anything else.
pub fn parse(hex: &str) -> Option<Rgb> {
    let raw = hex.trim();
    let digits = raw.strip_prefix('#').unwrap_or(raw);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

fn channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Format channel values as `#rrggbb`, clamping and rounding each one.
pub fn format(r: f64, g: f64, b: f64) -> String {
    Rgb::new(channel(r), channel(g), channel(b)).to_hex()
}

fn map_channels(hex: &str, f: impl Fn(f64, f64) -> f64) -> String {
    let Some(rgb) = parse(hex) else {
        return hex.to_string();
    };
    let lum = rgb.luminance();
    let [r, g, b] = rgb.channels().map(|c| f(c, lum));
    format(r, g, b)
}

/// Move each channel toward 255 by `pct` percent.
pub fn lighten(hex: &str, pct: f64) -> String {
    let t = pct / 100.0;
    map_channels(hex, |c, _| c + (255.0 - c) * t)
}

/// Scale each channel by `1 - pct/100`.
pub fn darken(hex: &str, pct: f64) -> String {
    let t = pct / 100.0;
    map_channels(hex, |c, _| c * (1.0 - t))
}

/// Move each channel toward the color's luminance by `pct` percent.
pub fn desaturate(hex: &str, pct: f64) -> String {
    let t = pct / 100.0;
    map_channels(hex, |c, lum| c + (lum - c) * t)
}

/// Render the color as `rgba(r, g, b, a)` with `alpha` clamped to `[0, 1]`.
pub fn to_alpha(hex: &str, alpha: f64) -> String {
    match parse(hex) {
        Some(rgb) => format!(
            "rgba({}, {}, {}, {})",
            rgb.r,
            rgb.g,
            rgb.b,
            alpha.clamp(0.0, 1.0)
        ),
        None => hex.to_string(),
    }
}

/// Lighten a dark color or darken a light one by `pct` percent.
pub fn shift(hex: &str, pct: f64) -> String {
    match parse(hex) {
        Some(rgb) if rgb.is_dark() => lighten(hex, pct),
        Some(_) => darken(hex, pct),
        None => hex.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_optional_hash_and_any_case() {
        assert_eq!(parse("#FF8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(parse("ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(parse("  #aBcDeF "), Some(Rgb::new(0xab, 0xcd, 0xef)));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("#fff"), None);
        assert_eq!(parse("#gggggg"), None);
        assert_eq!(parse("#1234567"), None);
        assert_eq!(parse("rgb(1, 2, 3)"), None);
    }

    #[test]
    fn format_clamps_and_rounds() {
        assert_eq!(format(-10.0, 300.0, 127.5), "#00ff80");
        assert_eq!(format(0.49, 254.5, 16.0), "#00ff10");
    }

    #[test]
    fn lighten_and_darken() {
        assert_eq!(lighten("#000000", 20.0), "#333333");
        assert_eq!(lighten("#ffffff", 50.0), "#ffffff");
        assert_eq!(darken("#ffffff", 20.0), "#cccccc");
        assert_eq!(darken("#ff0000", 100.0), "#000000");
        assert_eq!(lighten("#282a36", 5.0), "#333540");
    }

    #[test]
    fn desaturate_moves_toward_luminance() {
        // luminance of pure red is 76.245
        assert_eq!(desaturate("#ff0000", 100.0), "#4c4c4c");
        assert_eq!(desaturate("#ff0000", 0.0), "#ff0000");
        assert_eq!(desaturate("#808080", 40.0), "#808080");
    }

    #[test]
    fn to_alpha_preserves_alpha() {
        assert_eq!(to_alpha("#bd93f9", 0.15), "rgba(189, 147, 249, 0.15)");
        assert_eq!(to_alpha("#000000", 1.0), "rgba(0, 0, 0, 1)");
        assert_eq!(to_alpha("#000000", 2.0), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn malformed_input_passes_through() {
        assert_eq!(lighten("tomato", 10.0), "tomato");
        assert_eq!(darken("", 10.0), "");
        assert_eq!(to_alpha("var(--x)", 0.5), "var(--x)");
    }

    #[test]
    fn shift_direction_follows_luminance() {
        assert_eq!(shift("#000000", 10.0), "#1a1a1a");
        assert_eq!(shift("#ffffff", 10.0), "#e6e6e6");
    }
}
