//! RGB and RGBA colour values.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;

/// Error returned when a hex colour string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour `{0}`, expected `#rrggbb`")]
pub struct ParseColorError(pub String);

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha value, clamped to `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba::new(self, alpha)
    }

    /// Linear interpolation towards `other` (`t = 0` is `self`).
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// An RGB colour with a floating point alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub fn new(rgb: Rgb, alpha: f32) -> Self {
        // NaN alpha would poison every blend it touches.
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        Self { rgb, alpha }
    }

    pub const TRANSPARENT: Rgba = Rgba {
        rgb: Rgb::new(0, 0, 0),
        alpha: 0.0,
    };

    /// Composite this colour over an opaque backdrop.
    pub fn over(self, backdrop: Rgb) -> Rgb {
        backdrop.lerp(self.rgb, self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#4a9eff".parse::<Rgb>(), Ok(Rgb::new(74, 158, 255)));
        assert_eq!(" #004477 ".parse::<Rgb>(), Ok(Rgb::new(0, 68, 119)));
        assert!("4a9eff".parse::<Rgb>().is_err());
        assert!("#4a9ef".parse::<Rgb>().is_err());
        assert!("#zz9eff".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let c = Rgb::new(0, 68, 119);
        assert_eq!(c.to_string(), "#004477");
    }

    #[test]
    fn test_alpha_is_clamped() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(c.with_alpha(1.5).alpha, 1.0);
        assert_eq!(c.with_alpha(-0.5).alpha, 0.0);
        assert_eq!(c.with_alpha(f32::NAN).alpha, 0.0);
    }

    #[test]
    fn test_over_backdrop() {
        let white = Rgb::new(255, 255, 255);
        let black = Rgb::new(0, 0, 0);
        assert_eq!(white.with_alpha(0.0).over(black), black);
        assert_eq!(white.with_alpha(1.0).over(black), white);
        assert_eq!(white.with_alpha(0.5).over(black), Rgb::new(128, 128, 128));
    }
}
