// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for SwitchBot device commands.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so a typed command can never carry an out-of-range value to the
//! transport.
//!
//! # Types
//!
//! - [`Brightness`] - Light brightness (0-100%)
//! - [`ColorTemperature`] - White color temperature in Kelvin (2700-6500)
//! - [`RgbColor`] - RGB color sent as `r:g:b`
//! - [`Position`] - Open percentage for curtains, shades and blinds (0-100)
//! - [`CurtainMode`] - Curtain motor mode (performance, silent, default)
//! - [`BlindDirection`] - Blind tilt closing direction
//! - [`Humidity`], [`WindSpeed`], [`Volume`], [`SuctionLevel`] and the other
//!   bounded device settings

mod brightness;
mod color;
mod level;
mod position;
mod rgb_color;

pub use brightness::Brightness;
pub use color::ColorTemperature;
pub use level::{
    AcTemperature, Channel, EvaporativeMode, Humidity, SelfCleanMode, SuctionLevel, Volume, WindSpeed,
};
pub use position::{BlindDirection, CurtainMode, Position};
pub use rgb_color::RgbColor;

use crate::error::ValueError;

/// Checks that `value` lies within `[min, max]`.
///
/// # Errors
///
/// Returns `ValueError::OutOfRange` naming `field` otherwise.
pub(crate) fn check_range(
    field: &'static str,
    value: impl Into<i64>,
    min: i64,
    max: i64,
) -> Result<(), ValueError> {
    let actual = value.into();
    if (min..=max).contains(&actual) {
        Ok(())
    } else {
        Err(ValueError::OutOfRange {
            field,
            min,
            max,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_range_bounds() {
        assert!(check_range("level", 0_u8, 0, 3).is_ok());
        assert!(check_range("level", 3_u8, 0, 3).is_ok());
        assert_eq!(
            check_range("level", 4_u8, 0, 3),
            Err(ValueError::OutOfRange {
                field: "level",
                min: 0,
                max: 3,
                actual: 4
            })
        );
    }
}
