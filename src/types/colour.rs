//! Fill colours and hex parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StarQrError};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    /// White, used for the canvas.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Default module colour (`#007A78`).
    pub const TEAL: Self = Self::rgb(0x00, 0x7a, 0x78);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        match hex.len() {
            3 => {
                let mut digits = [0u8; 3];
                for (slot, c) in digits.iter_mut().zip(hex.chars()) {
                    let d = parse_hex_digit(c)?;
                    *slot = d << 4 | d;
                }
                Ok(Self::rgb(digits[0], digits[1], digits[2]))
            }
            6 => Ok(Self::rgb(
                parse_hex_byte(hex, 0)?,
                parse_hex_byte(hex, 2)?,
                parse_hex_byte(hex, 4)?,
            )),
            8 => Ok(Self::new(
                parse_hex_byte(hex, 0)?,
                parse_hex_byte(hex, 2)?,
                parse_hex_byte(hex, 4)?,
                parse_hex_byte(hex, 6)?,
            )),
            _ => Err(invalid(s)),
        }
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::TEAL
    }
}

impl FromStr for Colour {
    type Err = StarQrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = StarQrError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
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

fn invalid(s: &str) -> StarQrError {
    StarQrError::Config {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16).map(|d| d as u8).ok_or_else(|| invalid(&c.to_string()))
}

fn parse_hex_byte(hex: &str, start: usize) -> Result<u8> {
    hex.get(start..start + 2)
        .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        .ok_or_else(|| invalid(hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#007a78").unwrap();
        assert_eq!(c, Colour::TEAL);

        let c = Colour::from_hex("#FF0000").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));
    }

    #[test]
    fn test_from_hex_3digit() {
        let c = Colour::from_hex("#ABC").unwrap();
        assert_eq!(c, Colour::rgb(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_from_hex_8digit() {
        let c = Colour::from_hex("#FF000080").unwrap();
        assert_eq!(c, Colour::new(255, 0, 0, 128));
    }

    #[test]
    fn test_from_hex_no_hash() {
        assert_eq!(Colour::from_hex("ffffff").unwrap(), Colour::WHITE);
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("#é12345").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Colour::TEAL.to_string(), "#007A78");
        assert_eq!(Colour::new(255, 0, 0, 128).to_string(), "#FF000080");
    }

    #[test]
    fn test_serde_roundtrip_as_string() {
        let json = serde_json::to_string(&Colour::TEAL).unwrap();
        assert_eq!(json, "\"#007A78\"");
        let parsed: Colour = serde_yaml::from_str("\"#123456\"").unwrap();
        assert_eq!(parsed, Colour::rgb(0x12, 0x34, 0x56));
    }
}
