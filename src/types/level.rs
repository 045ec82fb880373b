// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded integer settings carried by device commands.

use std::fmt;

use super::check_range;
use crate::error::ValueError;

macro_rules! bounded {
    (
        $(#[$meta:meta])*
        $name:ident($repr:ty) as $field:literal in $min:literal..=$max:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($repr);

        impl $name {
            /// Smallest accepted value.
            pub const MIN: Self = Self($min);

            /// Largest accepted value.
            pub const MAX: Self = Self($max);

            #[doc = concat!("Creates a new value.\n\n# Errors\n\nReturns `ValueError::OutOfRange` outside ", stringify!($min), "-", stringify!($max), ".")]
            pub fn new(value: $repr) -> Result<Self, ValueError> {
                check_range($field, value, $min, $max)?;
                Ok(Self(value))
            }

            /// Returns the raw value.
            #[must_use]
            pub const fn value(self) -> $repr {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<$repr> for $name {
            type Error = ValueError;

            fn try_from(value: $repr) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

bounded! {
    /// Relative humidity target in percent (0-100).
    ///
    /// # Examples
    ///
    /// ```
    /// use switchbot_lib::types::Humidity;
    ///
    /// assert_eq!(Humidity::new(45).unwrap().value(), 45);
    /// assert!(Humidity::new(101).is_err());
    /// ```
    Humidity(u8) as "humidity" in 0..=100
}

bounded! {
    /// Evaporative humidifier mode code (1-8).
    ///
    /// 1-4 are fan levels, 5 humidity, 6 sleep, 7 auto, 8 drying.
    EvaporativeMode(u8) as "mode" in 1..=8
}

bounded! {
    /// Circulator fan wind speed (1-100).
    WindSpeed(u8) as "windSpeed" in 1..=100
}

bounded! {
    /// Robot vacuum suction power (0-3).
    SuctionLevel(u8) as "level" in 0..=3
}

bounded! {
    /// Speaker volume (0-100).
    Volume(u8) as "volume" in 0..=100
}

bounded! {
    /// Floor cleaning robot self-cleaning routine (1-3).
    ///
    /// 1 washes the mop, 2 dries it, 3 stops the routine.
    SelfCleanMode(u8) as "mode" in 1..=3
}

bounded! {
    /// Air conditioner set point in degrees Celsius (16-30).
    AcTemperature(u8) as "temperature" in 16..=30
}

bounded! {
    /// TV channel number (1-999).
    Channel(u16) as "channel" in 1..=999
}
