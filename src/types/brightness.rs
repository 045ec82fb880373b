// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness type for light control.

use std::fmt;

use crate::error::ValueError;

/// Brightness level as a percentage (0-100).
///
/// # Examples
///
/// ```
/// use switchbot_lib::types::Brightness;
///
/// let level = Brightness::new(75).unwrap();
/// assert_eq!(level.value(), 75);
///
/// assert!(Brightness::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u8);

impl Brightness {
    /// Minimum brightness (0%).
    pub const MIN: Self = Self(0);

    /// Maximum brightness (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new brightness value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                field: "brightness",
                min: 0,
                max: 100,
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a brightness value, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Returns the brightness percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Brightness {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
