// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Curtain, blind tilt and roller shade commands.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::command::{Command, CommandSet, Parameter, Switchable};
use crate::controller::Controller;
use crate::error::{Error, ValueError};
use crate::protocol::Transport;
use crate::response::CommandResponse;
use crate::schema::CommandSchema;
use crate::types::{BlindDirection, CurtainMode, Position};

/// Curtain and Curtain 3 commands.
///
/// # Examples
///
/// ```
/// use switchbot_lib::command::{Command, CurtainCommand, Parameter};
/// use switchbot_lib::types::CurtainMode;
///
/// let cmd = CurtainCommand::set_position(75, CurtainMode::Default).unwrap();
/// assert_eq!(cmd.parameter(), Parameter::Text("0,ff,75".to_string()));
///
/// assert!(CurtainCommand::set_position(101, CurtainMode::Silent).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurtainCommand {
    /// Open fully.
    TurnOn,
    /// Close fully.
    TurnOff,
    /// Stop moving.
    Pause,
    /// Move to a position.
    SetPosition {
        /// Motor mode.
        mode: CurtainMode,
        /// Target position.
        position: Position,
    },
}

impl CurtainCommand {
    /// Creates a `setPosition` command.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `position` exceeds 100.
    pub fn set_position(position: u8, mode: CurtainMode) -> Result<Self, ValueError> {
        Ok(Self::SetPosition {
            mode,
            position: Position::new(position)?,
        })
    }
}

/// Parameter bag layout of [`CurtainCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command")]
pub enum CurtainParams {
    /// `{"command": "TurnOn"}`
    TurnOn,
    /// `{"command": "TurnOff"}`
    TurnOff,
    /// `{"command": "Pause"}`
    Pause,
    /// `{"command": "SetPosition", "mode": "0"|"1"|"ff", "position": 0..=100}`
    SetPosition {
        /// Motor mode.
        mode: CurtainMode,
        /// Target position.
        position: u8,
    },
}

impl Command for CurtainCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::Pause => "pause",
            Self::SetPosition { .. } => "setPosition",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match self {
            // The leading index is always 0 for the cloud API.
            Self::SetPosition { mode, position } => Parameter::Text(format!("0,{mode},{position}")),
            _ => Parameter::default(),
        }
    }
}

impl Switchable for CurtainCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl CommandSet for CurtainCommand {
    type Args = CurtainParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Curtain")
                .commands(&["TurnOn", "TurnOff", "Pause", "SetPosition"])
                .one_of("mode", &CurtainMode::ALLOWED)
                .integer("position", 0, 100)
                .require_when(&["SetPosition"], &["mode", "position"])
                .build()
        })
    }

    fn from_args(args: CurtainParams) -> Result<Self, ValueError> {
        match args {
            CurtainParams::TurnOn => Ok(Self::TurnOn),
            CurtainParams::TurnOff => Ok(Self::TurnOff),
            CurtainParams::Pause => Ok(Self::Pause),
            CurtainParams::SetPosition { mode, position } => Self::set_position(position, mode),
        }
    }
}

impl<T: Transport> Controller<'_, T, CurtainCommand> {
    /// Moves the curtain to `position` (0 open, 100 closed).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if `position` exceeds 100, or error if the
    /// command fails.
    pub async fn set_position(&self, position: u8, mode: CurtainMode) -> Result<CommandResponse, Error> {
        let command = CurtainCommand::set_position(position, mode)?;
        self.apply(&command).await
    }

    /// Stops the curtain.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn pause(&self) -> Result<CommandResponse, Error> {
        self.apply(&CurtainCommand::Pause).await
    }
}

/// Blind tilt commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlindTiltCommand {
    /// Tilt slats to horizontal.
    FullyOpen,
    /// Close with slats tilted up.
    CloseUp,
    /// Close with slats tilted down.
    CloseDown,
    /// Tilt to a position.
    SetPosition {
        /// Direction the slats close towards.
        direction: BlindDirection,
        /// Even position, 0 to 100.
        position: Position,
    },
}

impl BlindTiltCommand {
    /// Creates a `setPosition` command.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` above 100 and
    /// `ValueError::InvalidFormat` for odd positions.
    pub fn set_position(direction: BlindDirection, position: u8) -> Result<Self, ValueError> {
        let position = Position::new(position)?;
        if !position.value().is_multiple_of(2) {
            return Err(ValueError::InvalidFormat {
                field: "position",
                message: format!("{position} is not a multiple of 2"),
            });
        }
        Ok(Self::SetPosition {
            direction,
            position,
        })
    }
}

/// Parameter bag layout of [`BlindTiltCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command")]
pub enum BlindTiltParams {
    /// `{"command": "FullyOpen"}`
    FullyOpen,
    /// `{"command": "CloseUp"}`
    CloseUp,
    /// `{"command": "CloseDown"}`
    CloseDown,
    /// `{"command": "SetPosition", "direction": "up"|"down", "position": 0..=100}`
    SetPosition {
        /// Closing direction.
        direction: BlindDirection,
        /// Target position.
        position: u8,
    },
}

impl Command for BlindTiltCommand {
    fn name(&self) -> String {
        match self {
            Self::FullyOpen => "fullyOpen",
            Self::CloseUp => "closeUp",
            Self::CloseDown => "closeDown",
            Self::SetPosition { .. } => "setPosition",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match self {
            Self::SetPosition {
                direction,
                position,
            } => Parameter::Text(format!("{direction};{position}")),
            _ => Parameter::default(),
        }
    }
}

impl CommandSet for BlindTiltCommand {
    type Args = BlindTiltParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Blind Tilt")
                .commands(&["FullyOpen", "CloseUp", "CloseDown", "SetPosition"])
                .one_of("direction", &BlindDirection::ALLOWED)
                .integer("position", 0, 100)
                .require_when(&["SetPosition"], &["direction", "position"])
                .build()
        })
    }

    fn from_args(args: BlindTiltParams) -> Result<Self, ValueError> {
        match args {
            BlindTiltParams::FullyOpen => Ok(Self::FullyOpen),
            BlindTiltParams::CloseUp => Ok(Self::CloseUp),
            BlindTiltParams::CloseDown => Ok(Self::CloseDown),
            BlindTiltParams::SetPosition {
                direction,
                position,
            } => Self::set_position(direction, position),
        }
    }
}

impl<T: Transport> Controller<'_, T, BlindTiltCommand> {
    /// Tilts the slats to an even `position`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for an invalid position, or error if the
    /// command fails.
    pub async fn set_position(
        &self,
        direction: BlindDirection,
        position: u8,
    ) -> Result<CommandResponse, Error> {
        let command = BlindTiltCommand::set_position(direction, position)?;
        self.apply(&command).await
    }

    /// Opens the slats fully.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn fully_open(&self) -> Result<CommandResponse, Error> {
        self.apply(&BlindTiltCommand::FullyOpen).await
    }

    /// Closes with the slats tilted up.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn close_up(&self) -> Result<CommandResponse, Error> {
        self.apply(&BlindTiltCommand::CloseUp).await
    }

    /// Closes with the slats tilted down.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn close_down(&self) -> Result<CommandResponse, Error> {
        self.apply(&BlindTiltCommand::CloseDown).await
    }
}

/// Roller shade commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollerShadeCommand {
    /// Move to a position.
    SetPosition(Position),
}

/// Parameter bag layout of [`RollerShadeCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command")]
pub enum RollerShadeParams {
    /// `{"command": "SetPosition", "position": 0..=100}`
    SetPosition {
        /// Target position.
        position: u8,
    },
}

impl Command for RollerShadeCommand {
    fn name(&self) -> String {
        "setPosition".to_string()
    }

    fn parameter(&self) -> Parameter {
        let Self::SetPosition(position) = self;
        Parameter::Number(i64::from(position.value()))
    }
}

impl CommandSet for RollerShadeCommand {
    type Args = RollerShadeParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Roller Shade")
                .commands(&["SetPosition"])
                .integer("position", 0, 100)
                .require_when(&["SetPosition"], &["position"])
                .build()
        })
    }

    fn from_args(args: RollerShadeParams) -> Result<Self, ValueError> {
        let RollerShadeParams::SetPosition { position } = args;
        Ok(Self::SetPosition(Position::new(position)?))
    }
}

impl<T: Transport> Controller<'_, T, RollerShadeCommand> {
    /// Moves the shade to `position`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if `position` exceeds 100, or error if the
    /// command fails.
    pub async fn set_position(&self, position: u8) -> Result<CommandResponse, Error> {
        let command = RollerShadeCommand::SetPosition(Position::new(position)?);
        self.apply(&command).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::command::parse_validated;

    #[test]
    fn curtain_position_boundaries() {
        assert!(CurtainCommand::set_position(0, CurtainMode::Performance).is_ok());
        assert!(CurtainCommand::set_position(100, CurtainMode::Performance).is_ok());
        assert_eq!(
            CurtainCommand::set_position(101, CurtainMode::Performance),
            Err(ValueError::OutOfRange {
                field: "position",
                min: 0,
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn curtain_dispatch_matches_typed() {
        let bag = json!({"command": "SetPosition", "mode": "ff", "position": 75});
        let parsed: CurtainCommand = parse_validated(&bag).unwrap();
        let typed = CurtainCommand::set_position(75, CurtainMode::Default).unwrap();
        assert_eq!(parsed, typed);
        assert_eq!(
            serde_json::to_string(&parsed.to_request()).unwrap(),
            r#"{"commandType":"command","command":"setPosition","parameter":"0,ff,75"}"#
        );
    }

    #[test]
    fn curtain_bad_mode_names_allowed_values() {
        let err = parse_validated::<CurtainCommand>(&json!({
            "command": "SetPosition",
            "mode": "00",
            "position": 75
        }))
        .unwrap_err();
        assert!(
            err.to_string()
                .contains(r#"value "00" should be one of the allowed values: 0, 1, ff"#)
        );
    }

    #[test]
    fn curtain_missing_field_then_supplied() {
        let mut bag = json!({"command": "SetPosition", "position": 30});
        let err = parse_validated::<CurtainCommand>(&bag).unwrap_err();
        assert!(err.to_string().contains("required property mode is missing"));

        bag["mode"] = json!("1");
        let cmd: CurtainCommand = parse_validated(&bag).unwrap();
        assert_eq!(cmd.parameter(), Parameter::Text("0,1,30".to_string()));
    }

    #[test]
    fn blind_tilt_wire_format() {
        let cmd = BlindTiltCommand::set_position(BlindDirection::Up, 60).unwrap();
        assert_eq!(cmd.parameter(), Parameter::Text("up;60".to_string()));
        assert_eq!(BlindTiltCommand::FullyOpen.name(), "fullyOpen");
    }

    #[test]
    fn blind_tilt_odd_position_is_rejected_on_both_paths() {
        assert!(matches!(
            BlindTiltCommand::set_position(BlindDirection::Down, 61),
            Err(ValueError::InvalidFormat { field: "position", .. })
        ));
        let err = parse_validated::<BlindTiltCommand>(&json!({
            "command": "SetPosition",
            "direction": "down",
            "position": 61
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::InvalidFormat { .. })));
    }

    #[test]
    fn roller_shade_sends_a_number() {
        let cmd: RollerShadeCommand =
            parse_validated(&json!({"command": "SetPosition", "position": 40})).unwrap();
        assert_eq!(
            serde_json::to_value(cmd.to_request()).unwrap(),
            json!({"commandType": "command", "command": "setPosition", "parameter": 40})
        );
    }
}
