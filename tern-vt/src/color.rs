//! Terminal color values.
//!
//! Covers the four color spaces a VT stream can select: the terminal
//! default, the 256-entry indexed palette, the bright variants of the eight
//! base colors, and 24-bit RGB.

use serde::{Deserialize, Serialize};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// RGB color with alpha, used for image backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RgbaColor {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A color as selected by SGR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// The terminal's configured default fore/background
    Default,
    /// Palette color 0..=255
    Indexed(u8),
    /// Bright variant of base color 0..=7 (SGR 90..97 / 100..107)
    Bright(u8),
    /// Direct 24-bit color
    Rgb(RgbColor),
}

impl Color {
    pub const BLACK: u8 = 0;
    pub const RED: u8 = 1;
    pub const GREEN: u8 = 2;
    pub const YELLOW: u8 = 3;
    pub const BLUE: u8 = 4;
    pub const MAGENTA: u8 = 5;
    pub const CYAN: u8 = 6;
    pub const WHITE: u8 = 7;

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(RgbColor::new(r, g, b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Default
    }
}

/// The dynamically settable colors of OSC 10..14 / 17 / 19 and their resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DynamicColorName {
    DefaultForeground,
    DefaultBackground,
    TextCursor,
    MouseForeground,
    MouseBackground,
    HighlightForeground,
    HighlightBackground,
}

/// Parses the X11-style `rgb:RRRR/GGGG/BBBB` form used by dynamic color
/// sequences. Only the 4-hex-digit-per-channel variant is produced by
/// queries, and only it is accepted here.
pub fn parse_rgb_spec(value: &str) -> Option<RgbColor> {
    let hex = value.strip_prefix("rgb:")?;
    if hex.len() != 14 {
        return None;
    }
    let bytes = hex.as_bytes();
    if bytes[4] != b'/' || bytes[9] != b'/' {
        return None;
    }
    let r = u16::from_str_radix(&hex[0..4], 16).ok()?;
    let g = u16::from_str_radix(&hex[5..9], 16).ok()?;
    let b = u16::from_str_radix(&hex[10..14], 16).ok()?;
    Some(RgbColor::new(
        (r & 0xFF) as u8,
        (g & 0xFF) as u8,
        (b & 0xFF) as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_spec() {
        assert_eq!(
            parse_rgb_spec("rgb:FFFF/0000/8080"),
            Some(RgbColor::new(0xFF, 0x00, 0x80))
        );
        assert_eq!(
            parse_rgb_spec("rgb:1234/5678/9abc"),
            Some(RgbColor::new(0x34, 0x78, 0xBC))
        );
    }

    #[test]
    fn test_parse_rgb_spec_rejects_malformed() {
        assert_eq!(parse_rgb_spec("rgb:FF/00/80"), None);
        assert_eq!(parse_rgb_spec("FFFF/0000/8080"), None);
        assert_eq!(parse_rgb_spec("rgb:FFFF-0000-8080"), None);
        assert_eq!(parse_rgb_spec("rgb:GGGG/0000/0000"), None);
        assert_eq!(parse_rgb_spec("?"), None);
    }

    #[test]
    fn test_parse_rgb_spec_scaled_reply_form() {
        // replies scale 8-bit channels by repetition (0xAB -> 0xABAB);
        // parsing keeps the high byte of each channel
        assert_eq!(
            parse_rgb_spec("rgb:1212/3434/5656"),
            Some(RgbColor::new(0x12, 0x34, 0x56))
        );
    }
}
