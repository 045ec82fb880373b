// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Position and motor mode types for curtains, shades and blinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Open percentage for a curtain, roller shade or blind (0-100).
///
/// `0` is fully open and `100` fully closed for curtains; the service
/// interprets the value per device family.
///
/// # Examples
///
/// ```
/// use switchbot_lib::types::Position;
///
/// assert_eq!(Position::new(75).unwrap().value(), 75);
/// assert!(Position::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u8);

impl Position {
    /// Fully open.
    pub const OPEN: Self = Self(0);

    /// Fully closed.
    pub const CLOSED: Self = Self(100);

    /// Creates a new position.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                field: "position",
                min: 0,
                max: 100,
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Curtain motor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CurtainMode {
    /// Full speed (`0`).
    #[serde(rename = "0")]
    Performance,
    /// Quiet, slower movement (`1`).
    #[serde(rename = "1")]
    Silent,
    /// Let the device decide (`ff`).
    #[default]
    #[serde(rename = "ff")]
    Default,
}

impl CurtainMode {
    /// Every accepted wire value.
    pub const ALLOWED: [&'static str; 3] = ["0", "1", "ff"];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Performance => "0",
            Self::Silent => "1",
            Self::Default => "ff",
        }
    }
}

impl FromStr for CurtainMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Performance),
            "1" => Ok(Self::Silent),
            "ff" => Ok(Self::Default),
            other => Err(ValueError::NotAllowed {
                field: "mode",
                allowed: Self::ALLOWED.to_vec(),
                actual: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CurtainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction a blind tilt closes towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlindDirection {
    /// Slats tilt upwards.
    Up,
    /// Slats tilt downwards.
    Down,
}

impl BlindDirection {
    /// Every accepted wire value.
    pub const ALLOWED: [&'static str; 2] = ["up", "down"];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for BlindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_bounds() {
        assert_eq!(Position::new(0).unwrap(), Position::OPEN);
        assert_eq!(Position::new(100).unwrap(), Position::CLOSED);
        assert!(Position::new(101).is_err());
    }

    #[test]
    fn curtain_mode_round_trips_through_str() {
        for mode in [CurtainMode::Performance, CurtainMode::Silent, CurtainMode::Default] {
            assert_eq!(mode.as_str().parse::<CurtainMode>().unwrap(), mode);
        }
    }

    #[test]
    fn curtain_mode_rejects_unknown() {
        let err = "00".parse::<CurtainMode>().unwrap_err();
        assert_eq!(err.to_string(), r#"mode value "00" should be one of: 0, 1, ff"#);
    }

    #[test]
    fn curtain_mode_deserializes_from_wire() {
        let mode: CurtainMode = serde_json::from_str(r#""ff""#).unwrap();
        assert_eq!(mode, CurtainMode::Default);
    }

    #[test]
    fn blind_direction_wire() {
        let dir: BlindDirection = serde_json::from_str(r#""down""#).unwrap();
        assert_eq!(dir, BlindDirection::Down);
        assert_eq!(BlindDirection::Up.to_string(), "up");
    }
}
