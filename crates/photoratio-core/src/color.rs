//! Fill color used to pad the frame where no source pixels are available.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color: {0:?}")]
pub struct ColorParseError(pub String);

/// A straight-alpha sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (the `#` is optional)
    /// or one of a handful of CSS color names.
    ///
    /// Names are matched before bare hex digits, so a name never reads as hex.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let trimmed = s.trim();

        lookup_named(trimmed)
            .or_else(|| parse_hex(trimmed.strip_prefix('#').unwrap_or(trimmed)))
            .ok_or_else(|| ColorParseError(s.to_string()))
    }

    /// RGB triple with alpha flattened against black.
    ///
    /// A lossy export has no alpha channel; a transparent canvas pixel comes
    /// out black, so a partially transparent fill darkens proportionally.
    pub fn to_rgb(self) -> [u8; 3] {
        if self.a == 255 {
            return [self.r, self.g, self.b];
        }
        let a = self.a as u32;
        let scale = |c: u8| ((c as u32 * a + 127) / 255) as u8;
        [scale(self.r), scale(self.g), scale(self.b)]
    }

    /// `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let digits = hex.as_bytes();

    match digits.len() {
        3 | 4 => {
            let mut c = [255u8; 4];
            for (slot, &d) in c.iter_mut().zip(digits) {
                let n = hex_val(d)?;
                *slot = n << 4 | n;
            }
            Some(Color::rgba(c[0], c[1], c[2], c[3]))
        }
        6 | 8 => {
            let mut c = [255u8; 4];
            for (slot, pair) in c.iter_mut().zip(digits.chunks_exact(2)) {
                *slot = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
            }
            Some(Color::rgba(c[0], c[1], c[2], c[3]))
        }
        _ => None,
    }
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn lookup_named(name: &str) -> Option<Color> {
    let lower = name.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|&(_, c)| c)
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::BLACK),
    ("blue", Color::rgb(0, 0, 255)),
    ("gray", Color::rgb(128, 128, 128)),
    ("green", Color::rgb(0, 128, 0)),
    ("grey", Color::rgb(128, 128, 128)),
    ("red", Color::rgb(255, 0, 0)),
    ("transparent", Color::TRANSPARENT),
    ("white", Color::WHITE),
];
