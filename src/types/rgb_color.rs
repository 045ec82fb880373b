// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with hex and `r:g:b` parsing.
//!
//! Color bulbs and strip lights take colors as a `red:green:blue` string,
//! each channel in 0-255. The status endpoint reports colors in the same
//! form.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use switchbot_lib::types::RgbColor;
///
/// let orange = RgbColor::new(255, 128, 0);
/// assert_eq!(orange.to_parameter(), "255:128:0");
///
/// let red = RgbColor::from_hex("#FF0000").unwrap();
/// assert_eq!(red.red(), 255);
///
/// let parsed: RgbColor = "0:255:10".parse().unwrap();
/// assert_eq!(parsed.green(), 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses an RGB color from a hex string.
    ///
    /// Accepts formats: `#RRGGBB`, `RRGGBB`, `#RGB`, `RGB`
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidFormat` if the hex string is invalid.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(invalid_color(hex));
        }

        match digits.len() {
            3 => {
                let mut channels = [0_u8; 3];
                for (slot, c) in channels.iter_mut().zip(digits.chars()) {
                    *slot = parse_hex_char(c).ok_or_else(|| invalid_color(hex))? * 17;
                }
                Ok(Self::new(channels[0], channels[1], channels[2]))
            }
            6 => {
                let pair = |range: std::ops::Range<usize>| {
                    u8::from_str_radix(&digits[range], 16).map_err(|_| invalid_color(hex))
                };
                Ok(Self::new(pair(0..2)?, pair(2..4)?, pair(4..6)?))
            }
            _ => Err(invalid_color(hex)),
        }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the `r:g:b` form used as a command parameter.
    #[must_use]
    pub fn to_parameter(&self) -> String {
        format!("{}:{}:{}", self.red, self.green, self.blue)
    }

    /// Returns the color as a hex string with the hash prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    /// Parses either the `r:g:b` wire form or a hex string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains(':') {
            return Self::from_hex(s);
        }

        let channels: Vec<&str> = s.split(':').collect();
        let [red, green, blue] = channels.as_slice() else {
            return Err(invalid_color(s));
        };
        let channel = |part: &str| part.trim().parse::<u8>().map_err(|_| invalid_color(s));
        Ok(Self::new(channel(red)?, channel(green)?, channel(blue)?))
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

fn parse_hex_char(c: char) -> Option<u8> {
    c.to_digit(16).and_then(|d| u8::try_from(d).ok())
}

fn invalid_color(input: &str) -> ValueError {
    ValueError::InvalidFormat {
        field: "color",
        message: format!("{input:?} is not a valid color"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_form() {
        assert_eq!(RgbColor::new(1, 2, 3).to_parameter(), "1:2:3");
    }

    #[test]
    fn parse_wire_form() {
        let color: RgbColor = "255:0:128".parse().unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 128));
    }

    #[test]
    fn parse_wire_form_rejects_overflow() {
        assert!("256:0:0".parse::<RgbColor>().is_err());
        assert!("1:2".parse::<RgbColor>().is_err());
    }

    #[test]
    fn parse_hex_forms() {
        assert_eq!(RgbColor::from_hex("#FF5733").unwrap(), RgbColor::new(255, 87, 51));
        assert_eq!(RgbColor::from_hex("00FF00").unwrap(), RgbColor::new(0, 255, 0));
        assert_eq!(RgbColor::from_hex("#F00").unwrap(), RgbColor::new(255, 0, 0));
        assert!(RgbColor::from_hex("#GG0000").is_err());
        assert!(RgbColor::from_hex("#FF00").is_err());
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(RgbColor::new(255, 128, 0).to_string(), "#FF8000");
    }
}
