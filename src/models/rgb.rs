//! RGB color handling with hex parsing and serialization.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Matches the decimal channels of a CSS `rgb(r, g, b)` value.
static CSS_CHANNEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+").unwrap_or_else(|_| unreachable!("static pattern is valid"))
});

/// RGB color value with hex string representation.
///
/// Represents a color using red, green, and blue channels (0-255 each).
/// Serializes as a `#RRGGBB` string, which is the format button colors take in
/// session documents and palette overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#rrggbb", "rrggbb"
    ///
    /// # Examples
    ///
    /// ```
    /// use soundboard::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#9C27B0").unwrap();
    /// assert_eq!(color, RgbColor::new(156, 39, 176));
    ///
    /// let color = RgbColor::from_hex("00bcd4").unwrap();
    /// assert_eq!(color, RgbColor::new(0, 188, 212));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid hex color format '{hex}'. Expected 6 hex digits (RRGGBB)");
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Parses a CSS `rgb(r, g, b)` value, as produced by computed element styles.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly three channels in 0-255 are present.
    pub fn from_css_rgb(value: &str) -> Result<Self> {
        let channels = CSS_CHANNEL
            .find_iter(value)
            .map(|m| m.as_str().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .context(format!("Channel out of range in '{value}'"))?;

        match channels.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => anyhow::bail!("Expected three channels in '{value}'"),
        }
    }

    /// Parses either notation: `#RRGGBB` or `rgb(r, g, b)`.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.to_ascii_lowercase().starts_with("rgb") {
            Self::from_css_rgb(trimmed)
        } else {
            Self::from_hex(trimmed)
        }
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use soundboard::models::RgbColor;
    ///
    /// let color = RgbColor::new(255, 64, 129);
    /// assert_eq!(color.to_hex(), "#FF4081");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value).map_err(|e| e.to_string())
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

impl Default for RgbColor {
    /// Default color is white (#FFFFFF).
    fn default() -> Self {
        Self::new(255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        let color = RgbColor::from_hex("#FF0000").unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 0));

        let color = RgbColor::from_hex("00FF00").unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));

        let color = RgbColor::from_hex("#0000ff").unwrap();
        assert_eq!(color, RgbColor::new(0, 0, 255));

        let color = RgbColor::from_hex("  #FFFFFF  ").unwrap();
        assert_eq!(color, RgbColor::new(255, 255, 255));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("#FFF").is_err());
        assert!(RgbColor::from_hex("#FFFFFFF").is_err());
        assert!(RgbColor::from_hex("GGGGGG").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#").is_err());
        // six bytes, but not six hex digits
        assert!(RgbColor::from_hex("aébcd").is_err());
        assert!(RgbColor::from_hex("+1+2+3").is_err());
        assert!(RgbColor::from_hex("#+0+0+0").is_err());
    }

    #[test]
    fn test_css_rgb() {
        assert_eq!(
            RgbColor::parse("rgb(156, 39, 176)").unwrap(),
            RgbColor::new(156, 39, 176)
        );
        assert!(RgbColor::parse("rgb(300, 0, 0)").is_err());
        assert!(RgbColor::parse("rgb(1, 2)").is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&RgbColor::new(0, 150, 136)).unwrap();
        assert_eq!(json, "\"#009688\"");

        let color: RgbColor = serde_json::from_str("\"#3f51b5\"").unwrap();
        assert_eq!(color, RgbColor::new(63, 81, 181));

        assert!(serde_json::from_str::<RgbColor>("\"purple\"").is_err());
    }
}
