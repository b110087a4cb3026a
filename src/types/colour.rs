//! Colour type, parsing, and luminance-based colour math.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PxfxError, Result};

/// An RGBA colour value.
///
/// Channels are plain 8-bit values; the packed byte layout used in pixel
/// buffers is handled by [`crate::pixel::PixelCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a colour from components in alpha-first order.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 | 4 => {
                let mut nibbles = [0xF; 4];
                for (slot, c) in nibbles.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b, a] = nibbles.map(|n| n << 4 | n);
                Ok(Self::new(r, g, b, a))
            }
            6 | 8 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                let a = if hex.len() == 8 {
                    parse_hex_byte(&hex[6..8])?
                } else {
                    255
                };
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Look up a CSS/SVG colour keyword such as `"red"` or `"rebeccapurple"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name == "transparent" {
            return Some(Self::TRANSPARENT);
        }
        palette::named::from_str(&name).map(|c| Self::rgb(c.red, c.green, c.blue))
    }

    /// Convert to an RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Return this colour with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Luma-weighted grayscale value in `[0, 1]`.
    ///
    /// Uses the `0.30 R + 0.59 G + 0.11 B` approximation. The weighted sum is
    /// taken in integer hundredths so pure white lands on exactly 1.0.
    pub fn grayscale(self) -> f32 {
        let luma = 30 * self.r as u32 + 59 * self.g as u32 + 11 * self.b as u32;
        (luma as f32 / 25_500.0).clamp(0.0, 1.0)
    }

    /// Remap this colour onto the gradient `low -> high` by its grayscale.
    ///
    /// A grayscale of 0 yields `low`, 1 yields `high`. Interpolated channels
    /// are truncated toward zero. Alpha is kept from `self`; the alphas of
    /// `low` and `high` are ignored.
    pub fn duotone(self, low: Colour, high: Colour) -> Colour {
        let t = self.grayscale();
        let mix = |lo: u8, hi: u8| (lo as f32 * (1.0 - t) + hi as f32 * t) as u8;
        Colour::new(mix(low.r, high.r), mix(low.g, high.g), mix(low.b, high.b), self.a)
    }
}

impl FromStr for Colour {
    type Err = PxfxError;

    /// Parse a hex string or a colour keyword.
    fn from_str(s: &str) -> Result<Self> {
        match Self::from_name(s) {
            Some(colour) => Ok(colour),
            None => Self::from_hex(s),
        }
    }
}

impl TryFrom<String> for Colour {
    type Error = PxfxError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn invalid_hex(s: &str) -> PxfxError {
    PxfxError::Parse {
        message: format!("Invalid colour: {}", s),
        help: Some(
            "Use #RGB, #RGBA, #RRGGBB, #RRGGBBAA, or a CSS colour name like \"red\"".to_string(),
        ),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| PxfxError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| PxfxError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
