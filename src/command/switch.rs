// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bot, plug and relay switch commands.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::command::{Command, CommandSet, Parameter, Switchable, Toggleable};
use crate::controller::Controller;
use crate::error::{Error, ValueError};
use crate::protocol::Transport;
use crate::response::CommandResponse;
use crate::schema::CommandSchema;

/// Bot commands.
///
/// # Examples
///
/// ```
/// use switchbot_lib::command::{BotCommand, Command};
///
/// assert_eq!(BotCommand::Press.name(), "press");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "command")]
pub enum BotCommand {
    /// Switch mode: on.
    TurnOn,
    /// Switch mode: off.
    TurnOff,
    /// Press mode: push the button once.
    Press,
}

impl Command for BotCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::Press => "press",
        }
        .to_string()
    }
}

impl Switchable for BotCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl CommandSet for BotCommand {
    type Args = Self;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Bot")
                .commands(&["TurnOn", "TurnOff", "Press"])
                .build()
        })
    }

    fn from_args(args: Self) -> Result<Self, ValueError> {
        Ok(args)
    }
}

impl<T: Transport> Controller<'_, T, BotCommand> {
    /// Presses the bot's arm once.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn press(&self) -> Result<CommandResponse, Error> {
        self.apply(&BotCommand::Press).await
    }
}

/// Plug commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "command")]
pub enum PlugCommand {
    /// Power on.
    TurnOn,
    /// Power off.
    TurnOff,
}

impl Command for PlugCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
        }
        .to_string()
    }
}

impl Switchable for PlugCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl CommandSet for PlugCommand {
    type Args = Self;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Plug")
                .commands(&["TurnOn", "TurnOff"])
                .build()
        })
    }

    fn from_args(args: Self) -> Result<Self, ValueError> {
        Ok(args)
    }
}

/// Plug Mini commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "command")]
pub enum PlugMiniCommand {
    /// Power on.
    TurnOn,
    /// Power off.
    TurnOff,
    /// Invert the power state.
    Toggle,
}

impl Command for PlugMiniCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::Toggle => "toggle",
        }
        .to_string()
    }
}

impl Switchable for PlugMiniCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl Toggleable for PlugMiniCommand {
    const TOGGLE: Self = Self::Toggle;
}

impl CommandSet for PlugMiniCommand {
    type Args = Self;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Plug Mini")
                .commands(&["TurnOn", "TurnOff", "Toggle"])
                .build()
        })
    }

    fn from_args(args: Self) -> Result<Self, ValueError> {
        Ok(args)
    }
}

/// Relay switch operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayMode {
    /// Wall switch toggles the relay (`0`).
    Toggle,
    /// Wall switch follows edges (`1`).
    Edge,
    /// Wall switch detached from the relay (`2`).
    Detached,
    /// Momentary switch (`3`).
    Momentary,
}

impl RelayMode {
    /// Returns the wire code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Toggle => 0,
            Self::Edge => 1,
            Self::Detached => 2,
            Self::Momentary => 3,
        }
    }

    /// Looks up a mode by wire code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for codes above 3.
    pub fn from_code(code: u8) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Toggle),
            1 => Ok(Self::Edge),
            2 => Ok(Self::Detached),
            3 => Ok(Self::Momentary),
            other => Err(ValueError::OutOfRange {
                field: "mode",
                min: 0,
                max: 3,
                actual: i64::from(other),
            }),
        }
    }
}

/// Relay Switch 1 / 1PM commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaySwitchCommand {
    /// Close the relay.
    TurnOn,
    /// Open the relay.
    TurnOff,
    /// Invert the relay.
    Toggle,
    /// Change how the wall switch drives the relay.
    SetMode(RelayMode),
}

/// Parameter bag layout of [`RelaySwitchCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command")]
pub enum RelaySwitchParams {
    /// `{"command": "TurnOn"}`
    TurnOn,
    /// `{"command": "TurnOff"}`
    TurnOff,
    /// `{"command": "Toggle"}`
    Toggle,
    /// `{"command": "SetMode", "mode": 0..=3}`
    SetMode {
        /// Mode code.
        mode: u8,
    },
}

impl Command for RelaySwitchCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::Toggle => "toggle",
            Self::SetMode(_) => "setMode",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match self {
            Self::SetMode(mode) => Parameter::Number(i64::from(mode.code())),
            _ => Parameter::default(),
        }
    }
}

impl Switchable for RelaySwitchCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl Toggleable for RelaySwitchCommand {
    const TOGGLE: Self = Self::Toggle;
}

impl CommandSet for RelaySwitchCommand {
    type Args = RelaySwitchParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Relay Switch")
                .commands(&["TurnOn", "TurnOff", "Toggle", "SetMode"])
                .integer("mode", 0, 3)
                .require_when(&["SetMode"], &["mode"])
                .build()
        })
    }

    fn from_args(args: RelaySwitchParams) -> Result<Self, ValueError> {
        Ok(match args {
            RelaySwitchParams::TurnOn => Self::TurnOn,
            RelaySwitchParams::TurnOff => Self::TurnOff,
            RelaySwitchParams::Toggle => Self::Toggle,
            RelaySwitchParams::SetMode { mode } => Self::SetMode(RelayMode::from_code(mode)?),
        })
    }
}

impl<T: Transport> Controller<'_, T, RelaySwitchCommand> {
    /// Sets the wall switch mode.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_mode(&self, mode: RelayMode) -> Result<CommandResponse, Error> {
        self.apply(&RelaySwitchCommand::SetMode(mode)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::command::parse_validated;

    #[test]
    fn bot_bag_names_are_pascal_case() {
        let cmd: BotCommand = parse_validated(&json!({"command": "Press"})).unwrap();
        assert_eq!(cmd.to_request().command, "press");
    }

    #[test]
    fn plug_rejects_toggle() {
        let err = parse_validated::<PlugCommand>(&json!({"command": "Toggle"})).unwrap_err();
        assert!(matches!(err, Error::UnknownCommand { .. }));
    }

    #[test]
    fn unit_commands_reject_parameters() {
        let err =
            parse_validated::<PlugMiniCommand>(&json!({"command": "Toggle", "level": 1})).unwrap_err();
        let Error::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert!(violations.mentions("/level"));
    }

    #[test]
    fn relay_mode_bounds() {
        assert_eq!(RelayMode::from_code(3).unwrap(), RelayMode::Momentary);
        assert!(RelayMode::from_code(4).is_err());

        let cmd: RelaySwitchCommand =
            parse_validated(&json!({"command": "SetMode", "mode": 2})).unwrap();
        assert_eq!(cmd.parameter(), Parameter::Number(2));

        let err = parse_validated::<RelaySwitchCommand>(&json!({"command": "SetMode", "mode": 4}))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
