//! 8-bit sRGB colors and their D65 Lab equivalents
//!
//! Palettes arrive from people as sRGB (`#e41a1c`, `rgb(228,26,28)`), while
//! every score is defined in D65 Lab. The conversion matrices and thresholds
//! follow D3 v3, which is what the discretized color table was generated
//! with, so converted colors land on the same grid cells as the table.

use std::num::ParseIntError;
use std::str::FromStr;

use super::illuminant::WhitePoint;
use super::lab::Lab;

/// Error type for parsing color strings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal or decimal digit
    #[error("invalid color component: {0}")]
    InvalidComponent(#[from] ParseIntError),
    /// `rgb(...)` did not contain exactly three components
    #[error("expected three components in rgb(...), found {0}")]
    ComponentCount(usize),
}

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

// D3 applies the sRGB linear segment below this encoded value
const GAMMA_THRESHOLD: f64 = 0.00304;

impl Rgb8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to CIE Lab (D65).
    ///
    /// # Example
    ///
    /// ```
    /// use colorgorical_scores::Rgb8;
    ///
    /// let white = Rgb8::new(255, 255, 255).to_lab();
    /// assert!((white.l - 100.0).abs() < 0.01);
    /// ```
    pub fn to_lab(self) -> Lab {
        fn decode(v: u8) -> f64 {
            let v = v as f64 / 255.0;
            if v <= GAMMA_THRESHOLD {
                v / 12.92
            } else {
                ((v + 0.055) / 1.055).powf(2.4)
            }
        }
        fn f(t: f64) -> f64 {
            if t > 0.008856 {
                t.cbrt()
            } else {
                7.787037 * t + 4.0 / 29.0
            }
        }

        let r = decode(self.r);
        let g = decode(self.g);
        let b = decode(self.b);
        let white = WhitePoint::D65;

        let x = (0.4124564 * r + 0.3575761 * g + 0.1804375 * b) / (white.x / 100.0);
        let y = (0.2126729 * r + 0.7151522 * g + 0.0721750 * b) / (white.y / 100.0);
        let z = (0.0193339 * r + 0.1191920 * g + 0.9503041 * b) / (white.z / 100.0);

        let (fx, fy, fz) = (f(x), f(y), f(z));
        Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
    }

    /// Hex representation, `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Lab {
    /// Convert a D65 Lab color to 8-bit sRGB.
    ///
    /// Out-of-gamut channels are clamped to `0..=255`.
    pub fn to_rgb8(self) -> Rgb8 {
        fn finv(t: f64) -> f64 {
            if t > 0.206893034 {
                t * t * t
            } else {
                (t - 4.0 / 29.0) / 7.787037
            }
        }
        fn encode(v: f64) -> u8 {
            let v = if v <= GAMMA_THRESHOLD {
                12.92 * v
            } else {
                1.055 * v.powf(1.0 / 2.4) - 0.055
            };
            (255.0 * v).round().clamp(0.0, 255.0) as u8
        }

        let white = WhitePoint::D65;
        let fy = (self.l + 16.0) / 116.0;
        let x = white.x / 100.0 * finv(fy + self.a / 500.0);
        let y = white.y / 100.0 * finv(fy);
        let z = white.z / 100.0 * finv(fy - self.b / 200.0);

        Rgb8 {
            r: encode(3.2404542 * x - 1.5371385 * y - 0.4985314 * z),
            g: encode(-0.9692660 * x + 1.8760108 * y + 0.0415560 * z),
            b: encode(0.0556434 * x - 0.2040259 * y + 1.0572252 * z),
        }
    }
}

impl FromStr for Rgb8 {
    type Err = ParseColorError;

    /// Parse an sRGB color.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB`, `RGB` and `rgb(r, g, b)` with
    /// decimal components. Parsing is case-insensitive and trims whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use colorgorical_scores::Rgb8;
    ///
    /// let red: Rgb8 = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb8::new(255, 0, 0));
    ///
    /// let teal: Rgb8 = "rgb(27, 158, 119)".parse().unwrap();
    /// assert_eq!(teal, Rgb8::new(27, 158, 119));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let lower = s.to_ascii_lowercase();
        if let Some(inner) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(ParseColorError::ComponentCount(parts.len()));
            }
            return Ok(Self::new(parts[0].parse()?, parts[1].parse()?, parts[2].parse()?));
        }

        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }
        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
