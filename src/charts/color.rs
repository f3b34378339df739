//! Series Colors
//! RGB colors for bar series, parsed from matplotlib-style codes, names or hex.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Unknown color: {0:?}")]
    Unknown(String),
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// Opaque RGB color of a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SeriesColor {
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const CYAN: Self = Self::rgb(0, 191, 191);
    pub const MAGENTA: Self = Self::rgb(191, 0, 191);
    // matplotlib's 'y' is a dark yellow, not pure (255, 255, 0)
    pub const YELLOW: Self = Self::rgb(191, 191, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Default color for the series at `index` when none was given.
    pub fn from_palette(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Color palette for series without an explicit color
pub const PALETTE: [SeriesColor; 10] = [
    SeriesColor::rgb(231, 76, 60),  // Red
    SeriesColor::rgb(241, 196, 15), // Yellow
    SeriesColor::rgb(52, 152, 219), // Blue
    SeriesColor::rgb(46, 204, 113), // Green
    SeriesColor::rgb(155, 89, 182), // Purple
    SeriesColor::rgb(243, 156, 18), // Orange
    SeriesColor::rgb(26, 188, 156), // Teal
    SeriesColor::rgb(233, 30, 99),  // Pink
    SeriesColor::rgb(121, 85, 72),  // Brown
    SeriesColor::rgb(96, 125, 139), // Blue Grey
];

impl FromStr for SeriesColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::parse_hex(s);
        }
        match s.to_lowercase().as_str() {
            "r" | "red" => Ok(Self::RED),
            "g" | "green" => Ok(Self::GREEN),
            "b" | "blue" => Ok(Self::BLUE),
            "c" | "cyan" => Ok(Self::CYAN),
            "m" | "magenta" => Ok(Self::MAGENTA),
            "y" | "yellow" => Ok(Self::YELLOW),
            "k" | "black" => Ok(Self::BLACK),
            "w" | "white" => Ok(Self::WHITE),
            _ => Err(ColorError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for SeriesColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for SeriesColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SeriesColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_matplotlib_codes_and_names() {
        assert_eq!("r".parse::<SeriesColor>(), Ok(SeriesColor::RED));
        assert_eq!("y".parse::<SeriesColor>(), Ok(SeriesColor::YELLOW));
        assert_eq!(" Yellow ".parse::<SeriesColor>(), Ok(SeriesColor::YELLOW));
    }

    #[test]
    fn parses_hex() {
        assert_eq!(
            "#1f77b4".parse::<SeriesColor>(),
            Ok(SeriesColor::rgb(0x1f, 0x77, 0xb4))
        );
        assert!(matches!(
            "#12345".parse::<SeriesColor>(),
            Err(ColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#zz0000".parse::<SeriesColor>(),
            Err(ColorError::InvalidHex(_))
        ));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "chartreuse".parse::<SeriesColor>(),
            Err(ColorError::Unknown("chartreuse".to_string()))
        );
    }

    #[test]
    fn palette_wraps_around() {
        assert_eq!(SeriesColor::from_palette(0), SeriesColor::from_palette(PALETTE.len()));
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&SeriesColor::RED).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let back: SeriesColor = serde_json::from_str("\"y\"").unwrap();
        assert_eq!(back, SeriesColor::YELLOW);
    }
}
