// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Robot vacuum commands.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::command::{Command, CommandSet, Parameter, structured};
use crate::controller::Controller;
use crate::error::{Error, ValueError};
use crate::protocol::Transport;
use crate::response::CommandResponse;
use crate::schema::CommandSchema;
use crate::types::{SelfCleanMode, SuctionLevel, Volume, check_range};

/// S1 and K10 robot vacuum commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacuumCommand {
    /// Start cleaning.
    Start,
    /// Stop cleaning.
    Stop,
    /// Return to the charging dock.
    Dock,
    /// Set suction power, 0 (quiet) to 3 (max).
    PowLevel(SuctionLevel),
}

impl VacuumCommand {
    /// Creates a `PowLevel` command.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` above 3.
    pub fn pow_level(level: u8) -> Result<Self, ValueError> {
        Ok(Self::PowLevel(SuctionLevel::new(level)?))
    }
}

/// Parameter bag layout of [`VacuumCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command")]
pub enum VacuumParams {
    /// `{"command": "Start"}`
    Start,
    /// `{"command": "Stop"}`
    Stop,
    /// `{"command": "Dock"}`
    Dock,
    /// `{"command": "PowLevel", "level": 0..=3}`
    PowLevel {
        /// Suction level.
        level: u8,
    },
}

impl Command for VacuumCommand {
    fn name(&self) -> String {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Dock => "dock",
            // Capitalized on the wire.
            Self::PowLevel(_) => "PowLevel",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match self {
            Self::PowLevel(level) => Parameter::Text(level.to_string()),
            _ => Parameter::default(),
        }
    }
}

impl CommandSet for VacuumCommand {
    type Args = VacuumParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Robot Vacuum")
                .commands(&["Start", "Stop", "Dock", "PowLevel"])
                .integer("level", 0, 3)
                .require_when(&["PowLevel"], &["level"])
                .build()
        })
    }

    fn from_args(args: VacuumParams) -> Result<Self, ValueError> {
        match args {
            VacuumParams::Start => Ok(Self::Start),
            VacuumParams::Stop => Ok(Self::Stop),
            VacuumParams::Dock => Ok(Self::Dock),
            VacuumParams::PowLevel { level } => Self::pow_level(level),
        }
    }
}

impl<T: Transport> Controller<'_, T, VacuumCommand> {
    /// Starts cleaning.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn start(&self) -> Result<CommandResponse, Error> {
        self.apply(&VacuumCommand::Start).await
    }

    /// Stops cleaning.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn stop(&self) -> Result<CommandResponse, Error> {
        self.apply(&VacuumCommand::Stop).await
    }

    /// Sends the vacuum back to its dock.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn dock(&self) -> Result<CommandResponse, Error> {
        self.apply(&VacuumCommand::Dock).await
    }

    /// Sets the suction level.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` above 3, or error if the command fails.
    pub async fn pow_level(&self, level: u8) -> Result<CommandResponse, Error> {
        let command = VacuumCommand::pow_level(level)?;
        self.apply(&command).await
    }
}

/// S10 cleaning action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanAction {
    /// Vacuum only.
    Sweep,
    /// Vacuum and mop.
    SweepMop,
    /// Mop only.
    Mop,
}

impl CleanAction {
    /// Every accepted wire value.
    pub const ALLOWED: [&'static str; 3] = ["sweep", "sweep_mop", "mop"];
}

/// Cleaning settings of the S10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanSettings {
    fan_level: u8,
    water_level: u8,
    times: u32,
}

impl CleanSettings {
    /// Creates cleaning settings.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for a fan level outside 1-4, a water
    /// level outside 1-2 or a repeat count outside 1-2639999.
    pub fn new(fan_level: u8, water_level: u8, times: u32) -> Result<Self, ValueError> {
        check_range("fanLevel", fan_level, 1, 4)?;
        check_range("waterLevel", water_level, 1, 2)?;
        check_range("times", times, 1, 2_639_999)?;
        Ok(Self {
            fan_level,
            water_level,
            times,
        })
    }

    fn to_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("fanLevel".to_string(), json!(self.fan_level));
        map.insert("waterLevel".to_string(), json!(self.water_level));
        map.insert("times".to_string(), json!(self.times));
        map
    }
}

/// Robot Vacuum Cleaner S10 commands.
///
/// # Examples
///
/// ```
/// use switchbot_lib::command::{CleanAction, Command, VacuumS10Command};
/// use serde_json::json;
///
/// let cmd = VacuumS10Command::start_clean(CleanAction::SweepMop, 2, 1, 1).unwrap();
/// assert_eq!(
///     serde_json::to_value(cmd.parameter()).unwrap(),
///     json!({"action": "sweep_mop", "param": {"fanLevel": 2, "waterLevel": 1, "times": 1}})
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacuumS10Command {
    /// Start a cleaning run.
    StartClean {
        /// What to do.
        action: CleanAction,
        /// Suction and water settings.
        settings: CleanSettings,
    },
    /// Pause cleaning.
    Pause,
    /// Return to the station.
    Dock,
    /// Refill the humidifier from the station.
    AddWaterForHumi,
    /// Set the voice volume.
    SetVolume(Volume),
    /// Run station self-cleaning.
    SelfClean(SelfCleanMode),
    /// Change settings of the current run.
    ChangeParam(CleanSettings),
}

impl VacuumS10Command {
    /// Creates a `startClean` command.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for out-of-range settings.
    pub fn start_clean(
        action: CleanAction,
        fan_level: u8,
        water_level: u8,
        times: u32,
    ) -> Result<Self, ValueError> {
        Ok(Self::StartClean {
            action,
            settings: CleanSettings::new(fan_level, water_level, times)?,
        })
    }

    /// Creates a `setVolume` command.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` above 100.
    pub fn set_volume(volume: u8) -> Result<Self, ValueError> {
        Ok(Self::SetVolume(Volume::new(volume)?))
    }

    /// Creates a `selfClean` command.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` outside 1-3.
    pub fn self_clean(mode: u8) -> Result<Self, ValueError> {
        Ok(Self::SelfClean(SelfCleanMode::new(mode)?))
    }
}

/// Parameter bag layout of [`VacuumS10Command`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all_fields = "camelCase")]
pub enum VacuumS10Params {
    /// `{"command": "StartClean", "action", "fanLevel", "waterLevel", "times"}`
    StartClean {
        /// Cleaning action.
        action: CleanAction,
        /// Suction.
        fan_level: u8,
        /// Water flow.
        water_level: u8,
        /// Repeat count.
        times: u32,
    },
    /// `{"command": "Pause"}`
    Pause,
    /// `{"command": "Dock"}`
    Dock,
    /// `{"command": "AddWaterForHumi"}`
    AddWaterForHumi,
    /// `{"command": "SetVolume", "volume": 0..=100}`
    SetVolume {
        /// Volume.
        volume: u8,
    },
    /// `{"command": "SelfClean", "mode": 1..=3}`
    SelfClean {
        /// Self-cleaning mode.
        mode: u8,
    },
    /// `{"command": "ChangeParam", "fanLevel", "waterLevel", "times"}`
    ChangeParam {
        /// Suction.
        fan_level: u8,
        /// Water flow.
        water_level: u8,
        /// Repeat count.
        times: u32,
    },
}

impl Command for VacuumS10Command {
    fn name(&self) -> String {
        match self {
            Self::StartClean { .. } => "startClean",
            Self::Pause => "pause",
            Self::Dock => "dock",
            Self::AddWaterForHumi => "addWaterForHumi",
            Self::SetVolume(_) => "setVolume",
            Self::SelfClean(_) => "selfClean",
            Self::ChangeParam(_) => "changeParam",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match *self {
            Self::StartClean { action, settings } => structured([
                ("action", json!(action)),
                ("param", Value::Object(settings.to_map())),
            ]),
            Self::SetVolume(volume) => Parameter::Number(i64::from(volume.value())),
            Self::SelfClean(mode) => Parameter::Number(i64::from(mode.value())),
            Self::ChangeParam(settings) => Parameter::Structured(settings.to_map()),
            _ => Parameter::default(),
        }
    }
}

impl CommandSet for VacuumS10Command {
    type Args = VacuumS10Params;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Robot Vacuum S10")
                .commands(&[
                    "StartClean",
                    "Pause",
                    "Dock",
                    "AddWaterForHumi",
                    "SetVolume",
                    "SelfClean",
                    "ChangeParam",
                ])
                .one_of("action", &CleanAction::ALLOWED)
                .integer("fanLevel", 1, 4)
                .integer("waterLevel", 1, 2)
                .integer("times", 1, 2_639_999)
                .integer("volume", 0, 100)
                .integer("mode", 1, 3)
                .require_when(&["StartClean"], &["action"])
                .require_when(
                    &["StartClean", "ChangeParam"],
                    &["fanLevel", "waterLevel", "times"],
                )
                .require_when(&["SetVolume"], &["volume"])
                .require_when(&["SelfClean"], &["mode"])
                .build()
        })
    }

    fn from_args(args: VacuumS10Params) -> Result<Self, ValueError> {
        match args {
            VacuumS10Params::StartClean {
                action,
                fan_level,
                water_level,
                times,
            } => Self::start_clean(action, fan_level, water_level, times),
            VacuumS10Params::Pause => Ok(Self::Pause),
            VacuumS10Params::Dock => Ok(Self::Dock),
            VacuumS10Params::AddWaterForHumi => Ok(Self::AddWaterForHumi),
            VacuumS10Params::SetVolume { volume } => Self::set_volume(volume),
            VacuumS10Params::SelfClean { mode } => Self::self_clean(mode),
            VacuumS10Params::ChangeParam {
                fan_level,
                water_level,
                times,
            } => Ok(Self::ChangeParam(CleanSettings::new(
                fan_level,
                water_level,
                times,
            )?)),
        }
    }
}

impl<T: Transport> Controller<'_, T, VacuumS10Command> {
    /// Starts a cleaning run.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for out-of-range settings, or error if the
    /// command fails.
    pub async fn start_clean(
        &self,
        action: CleanAction,
        fan_level: u8,
        water_level: u8,
        times: u32,
    ) -> Result<CommandResponse, Error> {
        let command = VacuumS10Command::start_clean(action, fan_level, water_level, times)?;
        self.apply(&command).await
    }

    /// Pauses cleaning.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn pause(&self) -> Result<CommandResponse, Error> {
        self.apply(&VacuumS10Command::Pause).await
    }

    /// Sends the robot back to its station.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn dock(&self) -> Result<CommandResponse, Error> {
        self.apply(&VacuumS10Command::Dock).await
    }

    /// Sets the voice volume.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` above 100, or error if the command fails.
    pub async fn set_volume(&self, volume: u8) -> Result<CommandResponse, Error> {
        let command = VacuumS10Command::set_volume(volume)?;
        self.apply(&command).await
    }

    /// Runs station self-cleaning.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` outside 1-3, or error if the command fails.
    pub async fn self_clean(&self, mode: u8) -> Result<CommandResponse, Error> {
        let command = VacuumS10Command::self_clean(mode)?;
        self.apply(&command).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_validated;

    #[test]
    fn pow_level_boundaries() {
        assert!(VacuumCommand::pow_level(0).is_ok());
        assert!(VacuumCommand::pow_level(3).is_ok());
        assert!(VacuumCommand::pow_level(4).is_err());
        assert_eq!(VacuumCommand::PowLevel(SuctionLevel::MAX).name(), "PowLevel");
        assert_eq!(
            VacuumCommand::pow_level(2).unwrap().parameter(),
            Parameter::Text("2".to_string())
        );
    }

    #[test]
    fn settings_boundaries() {
        assert!(CleanSettings::new(1, 1, 1).is_ok());
        assert!(CleanSettings::new(4, 2, 2_639_999).is_ok());
        assert!(CleanSettings::new(5, 1, 1).is_err());
        assert!(CleanSettings::new(1, 3, 1).is_err());
        assert!(CleanSettings::new(1, 1, 0).is_err());
        assert!(CleanSettings::new(1, 1, 2_640_000).is_err());
    }

    #[test]
    fn shared_conditional_applies_to_both_commands() {
        for command in ["StartClean", "ChangeParam"] {
            let err = parse_validated::<VacuumS10Command>(&json!({
                "command": command,
                "action": "sweep"
            }))
            .unwrap_err();
            let Error::Validation(violations) = err else {
                panic!("expected validation error for {command}");
            };
            assert!(violations.mentions("/fanLevel"));
            assert!(violations.mentions("/waterLevel"));
            assert!(violations.mentions("/times"));
        }
    }

    #[test]
    fn change_param_is_flat() {
        let cmd: VacuumS10Command = parse_validated(&json!({
            "command": "ChangeParam",
            "fanLevel": 3,
            "waterLevel": 2,
            "times": 1
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(cmd.parameter()).unwrap(),
            json!({"fanLevel": 3, "waterLevel": 2, "times": 1})
        );
    }

    #[test]
    fn self_clean_and_volume() {
        assert!(VacuumS10Command::self_clean(0).is_err());
        assert_eq!(
            VacuumS10Command::self_clean(3).unwrap().parameter(),
            Parameter::Number(3)
        );
        assert!(VacuumS10Command::set_volume(101).is_err());
    }
}
