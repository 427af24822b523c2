//! Base-4 addressing for quadtree tiles.
//!
//! Streetside panoramas address every tile with a string of base-4 digits:
//! the panorama id (16 digits), the cube face (2 digits) and one digit per
//! zoom level selecting a sub-quadrant. This module provides the encoding
//! and its inverse.

use thiserror::Error;

/// Number of base-4 digits used to encode a panorama id.
pub const PANO_ID_DIGITS: usize = 16;

/// Number of base-4 digits used to encode a cube face id.
pub const FACE_ID_DIGITS: usize = 2;

/// Largest panorama id that fits in [`PANO_ID_DIGITS`] base-4 digits.
pub const MAX_PANO_ID: u64 = (1 << (2 * PANO_ID_DIGITS)) - 1;

/// Errors that can occur when decoding base-4 strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    /// Input string was empty
    #[error("Empty base-4 string")]
    Empty,

    /// Character outside the 0-3 digit range
    #[error("Invalid base-4 digit '{digit}' at position {position}")]
    InvalidDigit { digit: char, position: usize },

    /// Value does not fit in 64 bits
    #[error("Base-4 value '{0}' overflows u64")]
    Overflow(String),
}

/// Encodes `n` in base 4 without padding.
///
/// # Example
///
/// ```
/// use streetlevel::coord::to_base4;
///
/// assert_eq!(to_base4(0), "0");
/// assert_eq!(to_base4(6), "12");
/// ```
pub fn to_base4(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(32);
    while n > 0 {
        digits.push(char::from(b'0' + (n % 4) as u8));
        n /= 4;
    }
    digits.iter().rev().collect()
}

/// Encodes `n` in base 4, left-padded with zeros to `width` digits.
///
/// A zero width with `n == 0` yields the empty string, which is how the
/// subdivision code for zoom level 0 is expressed. Values wider than `width`
/// are returned unpadded.
pub fn to_base4_padded(n: u64, width: usize) -> String {
    if width == 0 && n == 0 {
        return String::new();
    }
    format!("{:0>width$}", to_base4(n), width = width)
}

/// Decodes a base-4 digit string back to an integer.
pub fn from_base4(s: &str) -> Result<u64, CoordError> {
    if s.is_empty() {
        return Err(CoordError::Empty);
    }

    let mut value: u64 = 0;
    for (position, digit) in s.chars().enumerate() {
        let d = match digit {
            '0'..='3' => digit as u64 - '0' as u64,
            _ => return Err(CoordError::InvalidDigit { digit, position }),
        };
        value = value
            .checked_mul(4)
            .and_then(|v| v.checked_add(d))
            .ok_or_else(|| CoordError::Overflow(s.to_string()))?;
    }
    Ok(value)
}
