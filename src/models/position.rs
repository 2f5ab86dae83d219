//! Board geometry: pointer coordinates, sizes, and stored button positions.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A raw point in board content coordinates (pixels, scroll already applied).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Replaces non-finite components with zero.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new(finite_or_zero(self.x), finite_or_zero(self.y))
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The board's scrollable content area. Its origin is always `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoardRect {
    /// Board width in pixels
    pub width: f64,
    /// Board height in pixels
    pub height: f64,
}

impl BoardRect {
    /// Creates a new board rectangle.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left corner of a button relative to the board content origin.
///
/// Stored in session documents as CSS pixel strings (`{"left": "42px", "top": "8px"}`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset in pixels
    #[serde(serialize_with = "serialize_px", deserialize_with = "deserialize_px")]
    pub left: f64,
    /// Vertical offset in pixels
    #[serde(serialize_with = "serialize_px", deserialize_with = "deserialize_px")]
    pub top: f64,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// The position as a point.
    #[must_use]
    pub const fn as_point(self) -> Point {
        Point::new(self.left, self.top)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", format_px(self.left), format_px(self.top))
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Formats a pixel value the way element styles report it: `"42px"`, `"42.5px"`.
#[must_use]
pub fn format_px(value: f64) -> String {
    // -0.0 would print as "-0px"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}px")
}

/// Parses a pixel string. An empty string is an unset style and reads as zero.
pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn serialize_px<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_px(*value))
}

fn deserialize_px<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    struct PxVisitor;

    impl Visitor<'_> for PxVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a pixel string like \"42px\" or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            parse_px(v).ok_or_else(|| E::custom(format!("invalid pixel value '{v}'")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }
    }

    deserializer.deserialize_any(PxVisitor)
}
