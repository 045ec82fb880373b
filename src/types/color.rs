// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color temperature type for white light control.

use std::fmt;

use crate::error::ValueError;

/// Color temperature in Kelvin (2700-6500).
///
/// Lower values are warmer (more orange), higher values are cooler (bluer).
///
/// # Examples
///
/// ```
/// use switchbot_lib::types::ColorTemperature;
///
/// let ct = ColorTemperature::new(4000).unwrap();
/// assert_eq!(ct.kelvin(), 4000);
///
/// assert!(ColorTemperature::new(2699).is_err());
/// assert!(ColorTemperature::new(6501).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorTemperature(u16);

impl ColorTemperature {
    /// Warmest supported temperature.
    pub const MIN: u16 = 2700;

    /// Coolest supported temperature.
    pub const MAX: u16 = 6500;

    /// Warm white.
    pub const WARM: Self = Self(2700);

    /// Neutral white.
    pub const NEUTRAL: Self = Self(4000);

    /// Cool daylight.
    pub const COOL: Self = Self(6500);

    /// Creates a new color temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [2700, 6500].
    pub fn new(kelvin: u16) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&kelvin) {
            return Err(ValueError::OutOfRange {
                field: "colorTemperature",
                min: i64::from(Self::MIN),
                max: i64::from(Self::MAX),
                actual: i64::from(kelvin),
            });
        }
        Ok(Self(kelvin))
    }

    /// Returns the temperature in Kelvin.
    #[must_use]
    pub const fn kelvin(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ColorTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

impl TryFrom<u16> for ColorTemperature {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_temperature_boundaries() {
        assert_eq!(ColorTemperature::new(2700).unwrap(), ColorTemperature::WARM);
        assert_eq!(ColorTemperature::new(6500).unwrap(), ColorTemperature::COOL);
        assert!(ColorTemperature::new(2699).is_err());
        assert!(ColorTemperature::new(6501).is_err());
    }

    #[test]
    fn color_temperature_error_message() {
        let err = ColorTemperature::new(7000).unwrap_err();
        assert_eq!(
            err.to_string(),
            "colorTemperature value 7000 is out of range [2700, 6500]"
        );
    }

    #[test]
    fn color_temperature_display() {
        assert_eq!(ColorTemperature::NEUTRAL.to_string(), "4000K");
    }
}
