// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Humidifier, circulator fan and air purifier commands.

use std::fmt;
use std::sync::OnceLock;

use serde::Deserialize;
use serde_json::json;

use crate::command::{Command, CommandSet, Parameter, Switchable, structured};
use crate::controller::Controller;
use crate::error::{Error, ValueError};
use crate::protocol::Transport;
use crate::response::CommandResponse;
use crate::schema::CommandSchema;
use crate::types::{EvaporativeMode, Humidity, WindSpeed, check_range};

// ========== Humidifier ==========

/// Ultrasonic humidifier mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HumidifierMode {
    /// Device regulates on its own.
    Auto,
    /// Low atomization (`101`).
    Low,
    /// Medium atomization (`102`).
    Medium,
    /// High atomization (`103`).
    High,
    /// Hold a target relative humidity.
    Target(Humidity),
}

impl HumidifierMode {
    /// Mode names accepted in parameter bags.
    pub const ALLOWED: [&'static str; 5] = ["auto", "low", "medium", "high", "target"];

    /// Builds a mode from its bag name and optional humidity.
    ///
    /// # Errors
    ///
    /// - `ValueError::NotAllowed` for an unknown name
    /// - `ValueError::Missing` if `target` comes without a humidity
    /// - `ValueError::OutOfRange` if the humidity exceeds 100
    pub fn from_name(name: &str, humidity: Option<u8>) -> Result<Self, ValueError> {
        let mode = match name {
            "auto" => Self::Auto,
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "target" => {
                let humidity = humidity.ok_or_else(|| ValueError::Missing {
                    field: "humidity",
                    reason: "when mode is target".to_string(),
                })?;
                Self::Target(Humidity::new(humidity)?)
            }
            other => {
                return Err(ValueError::NotAllowed {
                    field: "mode",
                    allowed: Self::ALLOWED.to_vec(),
                    actual: other.to_string(),
                });
            }
        };
        Ok(mode)
    }
}

impl fmt::Display for HumidifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Low => f.write_str("101"),
            Self::Medium => f.write_str("102"),
            Self::High => f.write_str("103"),
            Self::Target(humidity) => write!(f, "{humidity}"),
        }
    }
}

/// Ultrasonic humidifier commands.
///
/// # Examples
///
/// ```
/// use switchbot_lib::command::{Command, HumidifierCommand, HumidifierMode, Parameter};
/// use switchbot_lib::types::Humidity;
///
/// let target = Humidity::new(45).unwrap();
/// let cmd = HumidifierCommand::SetMode(HumidifierMode::Target(target));
/// assert_eq!(cmd.parameter(), Parameter::Text("45".to_string()));
///
/// assert!(Humidity::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidifierCommand {
    /// Power on.
    TurnOn,
    /// Power off.
    TurnOff,
    /// Change mode.
    SetMode(HumidifierMode),
}

/// Parameter bag layout of [`HumidifierCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command")]
pub enum HumidifierParams {
    /// `{"command": "TurnOn"}`
    TurnOn,
    /// `{"command": "TurnOff"}`
    TurnOff,
    /// `{"command": "SetMode", "mode": "auto"|"low"|"medium"|"high"|"target", "humidity"?}`
    SetMode {
        /// Mode name.
        mode: String,
        /// Target humidity, required by `target`.
        humidity: Option<u8>,
    },
}

impl Command for HumidifierCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::SetMode(_) => "setMode",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match self {
            Self::SetMode(mode) => Parameter::Text(mode.to_string()),
            _ => Parameter::default(),
        }
    }
}

impl Switchable for HumidifierCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl CommandSet for HumidifierCommand {
    type Args = HumidifierParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Humidifier")
                .commands(&["TurnOn", "TurnOff", "SetMode"])
                .one_of("mode", &HumidifierMode::ALLOWED)
                .integer("humidity", 0, 100)
                .require_when(&["SetMode"], &["mode"])
                .build()
        })
    }

    fn from_args(args: HumidifierParams) -> Result<Self, ValueError> {
        match args {
            HumidifierParams::TurnOn => Ok(Self::TurnOn),
            HumidifierParams::TurnOff => Ok(Self::TurnOff),
            HumidifierParams::SetMode { mode, humidity } => {
                Ok(Self::SetMode(HumidifierMode::from_name(&mode, humidity)?))
            }
        }
    }
}

impl<T: Transport> Controller<'_, T, HumidifierCommand> {
    /// Changes the humidifier mode.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_mode(&self, mode: HumidifierMode) -> Result<CommandResponse, Error> {
        self.apply(&HumidifierCommand::SetMode(mode)).await
    }
}

// ========== Evaporative humidifier ==========

/// Evaporative humidifier (Humidifier2) commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaporativeHumidifierCommand {
    /// Power on.
    TurnOn,
    /// Power off.
    TurnOff,
    /// Change mode.
    SetMode {
        /// Mode code.
        mode: EvaporativeMode,
        /// Target relative humidity.
        target_humidity: Humidity,
    },
    /// Lock or unlock the front panel.
    SetChildLock(bool),
}

impl EvaporativeHumidifierCommand {
    /// Creates a `setMode` command.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for a mode outside 1-8 or a humidity
    /// above 100.
    pub fn set_mode(mode: u8, target_humidity: u8) -> Result<Self, ValueError> {
        Ok(Self::SetMode {
            mode: EvaporativeMode::new(mode)?,
            target_humidity: Humidity::new(target_humidity)?,
        })
    }
}

/// Parameter bag layout of [`EvaporativeHumidifierCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all_fields = "camelCase")]
pub enum EvaporativeHumidifierParams {
    /// `{"command": "TurnOn"}`
    TurnOn,
    /// `{"command": "TurnOff"}`
    TurnOff,
    /// `{"command": "SetMode", "mode": 1..=8, "targetHumidity": 0..=100}`
    SetMode {
        /// Mode code.
        mode: u8,
        /// Target humidity.
        target_humidity: u8,
    },
    /// `{"command": "SetChildLock", "childLock": true}`
    SetChildLock {
        /// Whether the panel is locked.
        child_lock: bool,
    },
}

impl Command for EvaporativeHumidifierCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::SetMode { .. } => "setMode",
            Self::SetChildLock(_) => "setChildLock",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match *self {
            Self::SetMode {
                mode,
                target_humidity,
            } => structured([
                ("mode", json!(mode.value())),
                ("targetHumidify", json!(target_humidity.value())),
            ]),
            Self::SetChildLock(locked) => Parameter::Flag(locked),
            _ => Parameter::default(),
        }
    }
}

impl Switchable for EvaporativeHumidifierCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl CommandSet for EvaporativeHumidifierCommand {
    type Args = EvaporativeHumidifierParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Evaporative Humidifier")
                .commands(&["TurnOn", "TurnOff", "SetMode", "SetChildLock"])
                .integer("mode", 1, 8)
                .integer("targetHumidity", 0, 100)
                .boolean("childLock")
                .require_when(&["SetMode"], &["mode", "targetHumidity"])
                .require_when(&["SetChildLock"], &["childLock"])
                .build()
        })
    }

    fn from_args(args: EvaporativeHumidifierParams) -> Result<Self, ValueError> {
        match args {
            EvaporativeHumidifierParams::TurnOn => Ok(Self::TurnOn),
            EvaporativeHumidifierParams::TurnOff => Ok(Self::TurnOff),
            EvaporativeHumidifierParams::SetMode {
                mode,
                target_humidity,
            } => Self::set_mode(mode, target_humidity),
            EvaporativeHumidifierParams::SetChildLock { child_lock } => {
                Ok(Self::SetChildLock(child_lock))
            }
        }
    }
}

impl<T: Transport> Controller<'_, T, EvaporativeHumidifierCommand> {
    /// Changes the mode and target humidity.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for out-of-range arguments, or error if the
    /// command fails.
    pub async fn set_mode(&self, mode: u8, target_humidity: u8) -> Result<CommandResponse, Error> {
        let command = EvaporativeHumidifierCommand::set_mode(mode, target_humidity)?;
        self.apply(&command).await
    }

    /// Locks or unlocks the front panel.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_child_lock(&self, locked: bool) -> Result<CommandResponse, Error> {
        self.apply(&EvaporativeHumidifierCommand::SetChildLock(locked))
            .await
    }
}

// ========== Circulator fan ==========

/// Circulator fan night light setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum NightLightMode {
    /// Light off.
    #[serde(rename = "off")]
    Off,
    /// Bright.
    #[serde(rename = "1")]
    Bright,
    /// Dim.
    #[serde(rename = "2")]
    Dim,
}

impl NightLightMode {
    /// Every accepted wire value.
    pub const ALLOWED: [&'static str; 3] = ["off", "1", "2"];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Bright => "1",
            Self::Dim => "2",
        }
    }
}

/// Circulator fan wind mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindMode {
    /// Constant airflow.
    Direct,
    /// Varying airflow.
    Natural,
    /// Quiet, decreasing airflow.
    Sleep,
    /// Gentle airflow.
    Baby,
}

impl WindMode {
    /// Every accepted wire value.
    pub const ALLOWED: [&'static str; 4] = ["direct", "natural", "sleep", "baby"];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Natural => "natural",
            Self::Sleep => "sleep",
            Self::Baby => "baby",
        }
    }
}

/// Circulator fan commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CirculatorFanCommand {
    /// Power on.
    TurnOn,
    /// Power off.
    TurnOff,
    /// Change the night light.
    SetNightLightMode(NightLightMode),
    /// Change the wind mode.
    SetWindMode(WindMode),
    /// Set the wind speed.
    SetWindSpeed(WindSpeed),
}

impl CirculatorFanCommand {
    /// Creates a `setWindSpeed` command.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` outside 1-100.
    pub fn set_wind_speed(speed: u8) -> Result<Self, ValueError> {
        Ok(Self::SetWindSpeed(WindSpeed::new(speed)?))
    }
}

/// Parameter bag layout of [`CirculatorFanCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all_fields = "camelCase")]
pub enum CirculatorFanParams {
    /// `{"command": "TurnOn"}`
    TurnOn,
    /// `{"command": "TurnOff"}`
    TurnOff,
    /// `{"command": "SetNightLightMode", "nightLight": "off"|"1"|"2"}`
    SetNightLightMode {
        /// Night light setting.
        night_light: NightLightMode,
    },
    /// `{"command": "SetWindMode", "windMode": "direct"|"natural"|"sleep"|"baby"}`
    SetWindMode {
        /// Wind mode.
        wind_mode: WindMode,
    },
    /// `{"command": "SetWindSpeed", "windSpeed": 1..=100}`
    SetWindSpeed {
        /// Wind speed.
        wind_speed: u8,
    },
}

impl Command for CirculatorFanCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::SetNightLightMode(_) => "setNightLightMode",
            Self::SetWindMode(_) => "setWindMode",
            Self::SetWindSpeed(_) => "setWindSpeed",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match self {
            Self::SetNightLightMode(mode) => Parameter::Text(mode.as_str().to_string()),
            Self::SetWindMode(mode) => Parameter::Text(mode.as_str().to_string()),
            Self::SetWindSpeed(speed) => Parameter::Text(speed.to_string()),
            _ => Parameter::default(),
        }
    }
}

impl Switchable for CirculatorFanCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl CommandSet for CirculatorFanCommand {
    type Args = CirculatorFanParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Circulator Fan")
                .commands(&[
                    "TurnOn",
                    "TurnOff",
                    "SetNightLightMode",
                    "SetWindMode",
                    "SetWindSpeed",
                ])
                .one_of("nightLight", &NightLightMode::ALLOWED)
                .one_of("windMode", &WindMode::ALLOWED)
                .integer("windSpeed", 1, 100)
                .require_when(&["SetNightLightMode"], &["nightLight"])
                .require_when(&["SetWindMode"], &["windMode"])
                .require_when(&["SetWindSpeed"], &["windSpeed"])
                .build()
        })
    }

    fn from_args(args: CirculatorFanParams) -> Result<Self, ValueError> {
        match args {
            CirculatorFanParams::TurnOn => Ok(Self::TurnOn),
            CirculatorFanParams::TurnOff => Ok(Self::TurnOff),
            CirculatorFanParams::SetNightLightMode { night_light } => {
                Ok(Self::SetNightLightMode(night_light))
            }
            CirculatorFanParams::SetWindMode { wind_mode } => Ok(Self::SetWindMode(wind_mode)),
            CirculatorFanParams::SetWindSpeed { wind_speed } => Self::set_wind_speed(wind_speed),
        }
    }
}

impl<T: Transport> Controller<'_, T, CirculatorFanCommand> {
    /// Changes the night light.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_night_light_mode(&self, mode: NightLightMode) -> Result<CommandResponse, Error> {
        self.apply(&CirculatorFanCommand::SetNightLightMode(mode))
            .await
    }

    /// Changes the wind mode.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_wind_mode(&self, mode: WindMode) -> Result<CommandResponse, Error> {
        self.apply(&CirculatorFanCommand::SetWindMode(mode)).await
    }

    /// Sets the wind speed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` outside 1-100, or error if the command fails.
    pub async fn set_wind_speed(&self, speed: u8) -> Result<CommandResponse, Error> {
        let command = CirculatorFanCommand::set_wind_speed(speed)?;
        self.apply(&command).await
    }
}

// ========== Air purifier ==========

/// Air purifier fan gear used in normal mode, 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FanLevel(u8);

impl FanLevel {
    /// Creates a fan gear.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` outside 1-3.
    pub fn new(level: u8) -> Result<Self, ValueError> {
        check_range("fanGear", level, 1, 3)?;
        Ok(Self(level))
    }

    /// Returns the gear.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Air purifier mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirPurifierMode {
    /// Fixed fan gear (`1`).
    Normal(FanLevel),
    /// Air quality driven (`2`).
    Auto,
    /// Quiet (`3`).
    Sleep,
    /// Pet hair (`4`).
    Pet,
}

impl AirPurifierMode {
    /// Builds a mode from its wire code and optional fan gear.
    ///
    /// A fan gear is required for mode 1 and rejected for the others.
    ///
    /// # Errors
    ///
    /// - `ValueError::OutOfRange` for a code outside 1-4 or a gear outside 1-3
    /// - `ValueError::Missing` if mode 1 comes without a gear
    /// - `ValueError::InvalidFormat` if another mode comes with a gear
    pub fn from_code(mode: u8, fan_gear: Option<u8>) -> Result<Self, ValueError> {
        check_range("mode", mode, 1, 4)?;
        match (mode, fan_gear) {
            (1, Some(gear)) => Ok(Self::Normal(FanLevel::new(gear)?)),
            (1, None) => Err(ValueError::Missing {
                field: "fanGear",
                reason: "when mode is 1".to_string(),
            }),
            (_, Some(_)) => Err(ValueError::InvalidFormat {
                field: "fanGear",
                message: format!("only applies to mode 1, got mode {mode}"),
            }),
            (2, None) => Ok(Self::Auto),
            (3, None) => Ok(Self::Sleep),
            _ => Ok(Self::Pet),
        }
    }

    /// Returns the wire code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Normal(_) => 1,
            Self::Auto => 2,
            Self::Sleep => 3,
            Self::Pet => 4,
        }
    }
}

/// Air purifier commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirPurifierCommand {
    /// Power on.
    TurnOn,
    /// Power off.
    TurnOff,
    /// Change mode.
    SetMode(AirPurifierMode),
    /// Lock or unlock the buttons.
    SetChildLock(bool),
}

/// Parameter bag layout of [`AirPurifierCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all_fields = "camelCase")]
pub enum AirPurifierParams {
    /// `{"command": "TurnOn"}`
    TurnOn,
    /// `{"command": "TurnOff"}`
    TurnOff,
    /// `{"command": "SetMode", "mode": 1..=4, "fanGear"?: 1..=3}`
    SetMode {
        /// Mode code.
        mode: u8,
        /// Fan gear, mode 1 only.
        fan_gear: Option<u8>,
    },
    /// `{"command": "SetChildLock", "childLock": true}`
    SetChildLock {
        /// Whether the buttons are locked.
        child_lock: bool,
    },
}

impl Command for AirPurifierCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::SetMode(_) => "setMode",
            Self::SetChildLock(_) => "setChildLock",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match *self {
            Self::SetMode(AirPurifierMode::Normal(gear)) => structured([
                ("mode", json!(1)),
                ("fanGear", json!(gear.value())),
            ]),
            Self::SetMode(mode) => structured([("mode", json!(mode.code()))]),
            Self::SetChildLock(locked) => Parameter::Number(i64::from(locked)),
            _ => Parameter::default(),
        }
    }
}

impl Switchable for AirPurifierCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl CommandSet for AirPurifierCommand {
    type Args = AirPurifierParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Air Purifier")
                .commands(&["TurnOn", "TurnOff", "SetMode", "SetChildLock"])
                .integer("mode", 1, 4)
                .integer("fanGear", 1, 3)
                .boolean("childLock")
                .require_when(&["SetMode"], &["mode"])
                .require_when(&["SetChildLock"], &["childLock"])
                .build()
        })
    }

    fn from_args(args: AirPurifierParams) -> Result<Self, ValueError> {
        match args {
            AirPurifierParams::TurnOn => Ok(Self::TurnOn),
            AirPurifierParams::TurnOff => Ok(Self::TurnOff),
            AirPurifierParams::SetMode { mode, fan_gear } => {
                Ok(Self::SetMode(AirPurifierMode::from_code(mode, fan_gear)?))
            }
            AirPurifierParams::SetChildLock { child_lock } => Ok(Self::SetChildLock(child_lock)),
        }
    }
}

impl<T: Transport> Controller<'_, T, AirPurifierCommand> {
    /// Changes the purifier mode.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_mode(&self, mode: AirPurifierMode) -> Result<CommandResponse, Error> {
        self.apply(&AirPurifierCommand::SetMode(mode)).await
    }

    /// Locks or unlocks the buttons.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_child_lock(&self, locked: bool) -> Result<CommandResponse, Error> {
        self.apply(&AirPurifierCommand::SetChildLock(locked)).await
    }
}
