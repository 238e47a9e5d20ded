//! Sign colors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid hex color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{value}': {reason}")]
pub struct InvalidRgb {
    value: String,
    reason: &'static str,
}

/// A 24-bit color, written in configuration as six hex digits (`"c60c30"`).
///
/// # Examples
///
/// ```
/// use arrival_sign::domain::Rgb;
///
/// let red = Rgb::parse("c60c30").unwrap();
/// assert_eq!(red, Rgb::new(0xc6, 0x0c, 0x30));
/// assert_eq!(red.to_string(), "c60c30");
///
/// assert!(Rgb::parse("#c60c30").is_ok());
/// assert!(Rgb::parse("c60c3").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb([u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse six hex digits, optionally prefixed with `#`.
    pub fn parse(s: &str) -> Result<Self, InvalidRgb> {
        let invalid = |reason| InvalidRgb {
            value: s.to_string(),
            reason,
        };

        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 {
            return Err(invalid("must be exactly 6 hex digits"));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("must contain only hex digits"));
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self([r, g, b])),
            _ => Err(invalid("must contain only hex digits")),
        }
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({self})")
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl TryFrom<String> for Rgb {
    type Error = InvalidRgb;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}
