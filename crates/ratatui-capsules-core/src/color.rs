//! Hex color helpers shared by the theme layer.
//!
//! Colors arrive from the host as CSS-ish strings (`#RRGGBB`, `#RGB`, with or without the hash).
//! They are never validated: anything that does not parse yields zeroed channels.

use ratatui::style::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    /// Composites this color over an opaque background.
    pub fn over(self, bg: Rgb) -> Rgb {
        let a = self.alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (fg as f64 * a + bg as f64 * (1.0 - a))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            mix(self.rgb.r, bg.r),
            mix(self.rgb.g, bg.g),
            mix(self.rgb.b, bg.b),
        )
    }
}

/// Extracts channels from a 6- or 3-digit hex color.
///
/// Six digits map to `RR GG BB`; every other length takes the short-form path where each digit
/// is expanded (`f` → `ff`).
pub fn parse_hex(color: &str) -> Rgb {
    let hex = color.replace('#', "");
    let value = leading_hex_value(&hex);
    if hex.chars().count() == 6 {
        Rgb::new(
            ((value >> 16) & 255) as u8,
            ((value >> 8) & 255) as u8,
            (value & 255) as u8,
        )
    } else {
        Rgb::new(
            (((value >> 8) & 15) * 17) as u8,
            (((value >> 4) & 15) * 17) as u8,
            ((value & 15) * 17) as u8,
        )
    }
}

/// Formats `color` at `opacity` as a CSS `rgba(...)` string.
///
/// ```
/// use ratatui_capsules_core::color::adjust_opacity;
///
/// assert_eq!(adjust_opacity("#FF0000", 0.5), "rgba(255, 0, 0, 0.5)");
/// ```
pub fn adjust_opacity(color: &str, opacity: f64) -> String {
    let Rgb { r, g, b } = parse_hex(color);
    format!("rgba({r}, {g}, {b}, {opacity})")
}

/// Parses the output of [`adjust_opacity`] back into channels.
pub fn parse_rgba(css: &str) -> Option<Rgba> {
    let inner = css.trim().strip_prefix("rgba(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse::<u8>().ok()?;
    let g = parts.next()?.parse::<u8>().ok()?;
    let b = parts.next()?.parse::<u8>().ok()?;
    let alpha = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgba {
        rgb: Rgb::new(r, g, b),
        alpha,
    })
}

// Mirrors integer parsing of a hex prefix: stops at the first non-hex character.
fn leading_hex_value(hex: &str) -> u64 {
    hex.chars()
        .map_while(|c| c.to_digit(16))
        .take(16)
        .fold(0u64, |acc, d| (acc << 4) | d as u64)
}
