use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB color in `#rrggbb` form — the unit of part customization.
///
/// Stored as raw sRGB bytes; conversion to linear space happens only at the
/// glTF material boundary (`to_linear` / `from_linear`), since glTF base
/// color factors are linear while the UI and the paint config speak sRGB hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The swatch palette offered by the paint sidebar.
pub const SWATCH_PALETTE: [HexColor; 8] = [
    HexColor::new(0xff, 0xff, 0xff),
    HexColor::new(0x3b, 0x82, 0xf6),
    HexColor::new(0xef, 0x44, 0x44),
    HexColor::new(0x18, 0x18, 0x1b),
    HexColor::new(0x10, 0xb9, 0x81),
    HexColor::new(0xf5, 0x9e, 0x0b),
    HexColor::new(0x71, 0x71, 0x7a),
    HexColor::new(0x3f, 0x3f, 0x46),
];

impl HexColor {
    pub const WHITE: HexColor = HexColor::new(0xff, 0xff, 0xff);
    pub const BLACK: HexColor = HexColor::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear RGBA factor for a glTF material, alpha fixed at 1.0.
    pub fn to_linear(&self) -> [f32; 4] {
        [
            srgb_to_linear(self.r as f32 / 255.0),
            srgb_to_linear(self.g as f32 / 255.0),
            srgb_to_linear(self.b as f32 / 255.0),
            1.0,
        ]
    }

    /// Recover the sRGB hex form of a linear RGBA factor (alpha ignored).
    /// Components are clamped to [0, 1] before conversion.
    pub fn from_linear(rgba: [f32; 4]) -> Self {
        let to_byte = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u8;
        Self {
            r: to_byte(rgba[0]),
            g: to_byte(rgba[1]),
            b: to_byte(rgba[2]),
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Errors from parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {input}")]
    MissingHash { input: String },

    #[error("color must be exactly 6 hex digits: {input}")]
    BadLength { input: String },

    #[error("invalid hex digit in color: {input}")]
    BadDigit { input: String },
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    /// Strict `#rrggbb` parse. The color input control and the config file
    /// both produce this exact form; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').ok_or_else(|| ColorParseError::MissingHash {
            input: s.to_string(),
        })?;
        if digits.len() != 6 {
            return Err(ColorParseError::BadLength {
                input: s.to_string(),
            });
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError::BadDigit {
                input: s.to_string(),
            })
        };
        Ok(Self {
            r: byte(0..2)?,
            g: byte(2..4)?,
            b: byte(4..6)?,
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
