//! Text color selection from background luminance.
//!
//! Given an event's background color, this module picks black or white text
//! so the label stays legible. Brightness is measured as WCAG relative
//! luminance: channels are linearized with the sRGB transfer function and
//! weighted `0.2126 / 0.7152 / 0.0722`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a hex color cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {0:?}")]
pub struct ColorParseError(pub String);

/// The two text colors the feed emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextColor {
    /// Pure black, `#000000`.
    #[serde(rename = "#000000")]
    Black,
    /// Pure white, `#FFFFFF`.
    #[serde(rename = "#FFFFFF")]
    White,
}

impl TextColor {
    /// Returns the hex representation of this text color.
    pub fn as_hex(&self) -> &'static str {
        match self {
            Self::Black => "#000000",
            Self::White => "#FFFFFF",
        }
    }
}

impl std::fmt::Display for TextColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_hex())
    }
}

/// Computes the WCAG relative luminance of a `#RRGGBB` color.
///
/// The leading `#` is optional and hex digits are case-insensitive.
///
/// # Errors
///
/// Returns [`ColorParseError`] if the input is not exactly six hex digits
/// after the optional `#`.
pub fn relative_luminance(hex: &str) -> Result<f64, ColorParseError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(ColorParseError(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| -> Result<f64, ColorParseError> {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| f64::from(v) / 255.0)
            .map_err(|_| ColorParseError(hex.to_string()))
    };

    let r = linearize(channel(0..2)?);
    let g = linearize(channel(2..4)?);
    let b = linearize(channel(4..6)?);

    Ok(0.2126 * r + 0.7152 * g + 0.0722 * b)
}

/// sRGB transfer function: linear below the 0.03928 knee, gamma 2.4 above.
fn linearize(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Picks the legible text color for the given background.
///
/// Backgrounds with luminance strictly above 0.5 get black text, everything
/// else (including a luminance of exactly 0.5) gets white.
///
/// # Errors
///
/// Returns [`ColorParseError`] if the background is not a valid hex color.
pub fn text_color(background: &str) -> Result<TextColor, ColorParseError> {
    let luminance = relative_luminance(background)?;
    if luminance > 0.5 {
        Ok(TextColor::Black)
    } else {
        Ok(TextColor::White)
    }
}
