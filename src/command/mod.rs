// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SwitchBot command definitions.
//!
//! Every device family has a command enum whose values can only be built
//! with valid arguments. A command renders to the wire envelope
//!
//! ```json
//! {"commandType": "command", "command": "setPosition", "parameter": "0,ff,75"}
//! ```
//!
//! and is sent through a [`Controller`](crate::Controller).
//!
//! # Command families
//!
//! | Family | Type | Example |
//! |--------|------|---------|
//! | Bot | [`BotCommand`] | Press |
//! | Plug, Plug Mini | [`PlugCommand`], [`PlugMiniCommand`] | Toggle |
//! | Relay switch | [`RelaySwitchCommand`] | SetMode |
//! | Curtain | [`CurtainCommand`] | SetPosition |
//! | Blind tilt | [`BlindTiltCommand`] | FullyOpen |
//! | Roller shade | [`RollerShadeCommand`] | SetPosition |
//! | Lights | [`ColorBulbCommand`], [`StripLightCommand`], [`CeilingLightCommand`] | SetColor |
//! | Lock, Keypad | [`LockCommand`], [`KeypadCommand`] | CreateKey |
//! | Humidifiers | [`HumidifierCommand`], [`EvaporativeHumidifierCommand`] | SetMode |
//! | Circulator fan | [`CirculatorFanCommand`] | SetWindSpeed |
//! | Air purifier | [`AirPurifierCommand`] | SetMode |
//! | Robot vacuums | [`VacuumCommand`], [`VacuumS10Command`] | StartClean |
//! | Infrared remotes | [`AirConditionerCommand`], [`TvCommand`], ... | SetAll |
//!
//! # Validated dispatch
//!
//! Families implementing [`CommandSet`] can also be built from a loosely
//! typed parameter bag such as `{"command": "SetPosition", "mode": "ff",
//! "position": 75}`. [`parse_validated`] checks the bag against the family's
//! [`CommandSchema`], then converts it with [`CommandSet::from_args`], which
//! goes through the same constructors as the typed API.
//!
//! # Examples
//!
//! ```
//! use switchbot_lib::command::{Command, CurtainCommand, parse_validated};
//! use switchbot_lib::types::CurtainMode;
//! use serde_json::json;
//!
//! let typed = CurtainCommand::set_position(75, CurtainMode::Default).unwrap();
//! assert_eq!(typed.name(), "setPosition");
//!
//! let bag = json!({"command": "SetPosition", "mode": "ff", "position": 75});
//! let parsed: CurtainCommand = parse_validated(&bag).unwrap();
//! assert_eq!(parsed.to_request(), typed.to_request());
//! ```

mod climate;
mod cover;
mod infrared;
mod light;
mod lock;
mod switch;
mod vacuum;

pub use climate::{
    AirPurifierCommand, AirPurifierMode, AirPurifierParams, CirculatorFanCommand,
    CirculatorFanParams, EvaporativeHumidifierCommand, EvaporativeHumidifierParams, FanLevel,
    HumidifierCommand, HumidifierMode, HumidifierParams, NightLightMode, WindMode,
};
pub use cover::{
    BlindTiltCommand, BlindTiltParams, CurtainCommand, CurtainParams, RollerShadeCommand,
    RollerShadeParams,
};
pub use infrared::{
    AcMode, AirConditionerCommand, AirConditionerParams, FanRemoteCommand, FanRemoteParams,
    FanSpeed, LightRemoteCommand, LightRemoteParams, MediaPlayerCommand, MediaPlayerParams,
    RemoteCommand, RemoteParams, TvCommand, TvParams,
};
pub use light::{
    CeilingLightCommand, CeilingLightParams, ColorBulbCommand, ColorBulbParams,
    StripLightCommand, StripLightParams,
};
pub use lock::{KeyType, KeypadCommand, KeypadParams, LockCommand};
pub use switch::{
    BotCommand, PlugCommand, PlugMiniCommand, RelayMode, RelaySwitchCommand, RelaySwitchParams,
};
pub use vacuum::{
    CleanAction, CleanSettings, VacuumCommand, VacuumParams, VacuumS10Command, VacuumS10Params,
};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, ParseError, ValueError};
use crate::schema::{COMMAND_FIELD, CommandSchema};

/// Kind of command in the wire envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    /// Built-in command.
    #[default]
    Command,
    /// User-defined infrared button.
    Customize,
}

/// The `parameter` field of a command envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parameter {
    /// A string, `"default"` when the command takes no argument.
    Text(String),
    /// An integer.
    Number(i64),
    /// A boolean.
    Flag(bool),
    /// A JSON object.
    Structured(Map<String, Value>),
}

impl Parameter {
    /// Placeholder sent with argument-less commands.
    pub const DEFAULT: &'static str = "default";
}

impl Default for Parameter {
    fn default() -> Self {
        Self::Text(Self::DEFAULT.to_string())
    }
}

impl From<String> for Parameter {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for Parameter {
    fn from(number: i64) -> Self {
        Self::Number(number)
    }
}

impl From<bool> for Parameter {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<Map<String, Value>> for Parameter {
    fn from(map: Map<String, Value>) -> Self {
        Self::Structured(map)
    }
}

/// Body of `POST /devices/{id}/commands`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequest {
    /// `command` or `customize`.
    pub command_type: CommandType,
    /// Wire command name, e.g. `turnOn`.
    pub command: String,
    /// Command argument.
    pub parameter: Parameter,
}

impl CommandRequest {
    /// Encodes the request as JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the serializer error.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// A command that can be sent to a device.
pub trait Command {
    /// Returns the wire command name, e.g. `"setBrightness"`.
    fn name(&self) -> String;

    /// Returns the command argument.
    ///
    /// Defaults to the `"default"` placeholder.
    fn parameter(&self) -> Parameter {
        Parameter::default()
    }

    /// Returns the envelope command type.
    fn command_type(&self) -> CommandType {
        CommandType::Command
    }

    /// Builds the wire envelope.
    fn to_request(&self) -> CommandRequest {
        CommandRequest {
            command_type: self.command_type(),
            command: self.name(),
            parameter: self.parameter(),
        }
    }
}

/// A command family that accepts the `turnOn` / `turnOff` pair.
pub trait Switchable: Command + Sized {
    /// The `turnOn` command.
    const ON: Self;
    /// The `turnOff` command.
    const OFF: Self;
}

/// A switchable family that also accepts `toggle`.
pub trait Toggleable: Switchable {
    /// The `toggle` command.
    const TOGGLE: Self;
}

/// A command family reachable through the validated dispatch path.
pub trait CommandSet: Command + Sized {
    /// Layout of a parameter bag once it passed schema validation.
    type Args: DeserializeOwned;

    /// The family's parameter schema.
    fn schema() -> &'static CommandSchema;

    /// Converts validated arguments through the typed constructors.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` for business rules the schema cannot express,
    /// e.g. fields that must be ordered.
    fn from_args(args: Self::Args) -> Result<Self, ValueError>;
}

/// Parses and validates a parameter bag into a typed command.
///
/// Steps, in order:
///
/// 1. a `command` name outside the family's enumeration is rejected with
///    `Error::UnknownCommand` listing the valid names
/// 2. the bag is checked against the schema, every violation is collected
/// 3. the bag is decoded into [`CommandSet::Args`] and converted with
///    [`CommandSet::from_args`]
///
/// # Errors
///
/// - `Error::UnknownCommand` for an unknown command name
/// - `Error::Validation` with every schema violation
/// - `Error::Value` if a business rule rejects the arguments
pub fn parse_validated<K: CommandSet>(bag: &Value) -> Result<K, Error> {
    let schema = K::schema();

    if let Some(command) = bag.get(COMMAND_FIELD).and_then(Value::as_str)
        && !schema.accepts(command)
    {
        return Err(Error::UnknownCommand {
            command: command.to_string(),
            valid: schema.commands().to_vec(),
        });
    }

    schema.validate(bag)?;

    let args: K::Args = serde_json::from_value(bag.clone()).map_err(ParseError::Json)?;
    Ok(K::from_args(args)?)
}

/// Same as [`parse_validated`], starting from JSON text.
///
/// # Errors
///
/// Returns `Error::Parse` if `json` is not valid JSON, otherwise the errors
/// of [`parse_validated`].
pub fn parse_validated_str<K: CommandSet>(json: &str) -> Result<K, Error> {
    let bag: Value = serde_json::from_str(json).map_err(ParseError::Json)?;
    parse_validated(&bag)
}

/// Builds a structured parameter from key/value pairs.
pub(crate) fn structured<const N: usize>(pairs: [(&str, Value); N]) -> Parameter {
    Parameter::Structured(
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_wire_shape() {
        let request = CommandRequest {
            command_type: CommandType::Command,
            command: "setPosition".to_string(),
            parameter: Parameter::Text("0,ff,75".to_string()),
        };
        assert_eq!(
            String::from_utf8(request.to_bytes().unwrap()).unwrap(),
            r#"{"commandType":"command","command":"setPosition","parameter":"0,ff,75"}"#
        );
    }

    #[test]
    fn parameter_defaults_to_placeholder() {
        assert_eq!(
            serde_json::to_value(Parameter::default()).unwrap(),
            json!("default")
        );
    }

    #[test]
    fn parameter_variants_serialize_untagged() {
        assert_eq!(serde_json::to_value(Parameter::from(3_i64)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(Parameter::from(true)).unwrap(), json!(true));
        assert_eq!(
            serde_json::to_value(structured([("mode", json!(2))])).unwrap(),
            json!({"mode": 2})
        );
    }

    #[test]
    fn request_decodes_back() {
        let body = json!({"commandType": "customize", "command": "Boost", "parameter": "default"});
        let request: CommandRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.command_type, CommandType::Customize);
        assert_eq!(request.command, "Boost");
        assert_eq!(request.parameter, Parameter::default());
    }

    #[test]
    fn unknown_command_lists_valid_names() {
        let err = parse_validated::<CurtainCommand>(&json!({"command": "Fly"})).unwrap_err();
        match err {
            Error::UnknownCommand { command, valid } => {
                assert_eq!(command, "Fly");
                assert_eq!(valid, CurtainCommand::schema().commands());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn schema_violations_come_before_parsing() {
        let err = parse_validated::<CurtainCommand>(&json!({
            "command": "SetPosition",
            "mode": "00",
            "position": 75
        }))
        .unwrap_err();
        let Error::Validation(violations) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(violations.mentions("/mode"));
        assert!(violations.to_string().contains("0, 1, ff"));
    }

    fn bare_commands_never_reach_the_parser<K: CommandSet>() {
        for name in K::schema().commands() {
            match parse_validated::<K>(&json!({"command": name})) {
                Ok(_) | Err(Error::Validation(_)) => {}
                Err(other) => panic!("{} {name}: {other:?}", K::schema().title()),
            }
        }
    }

    #[test]
    fn schemas_agree_with_argument_layouts() {
        bare_commands_never_reach_the_parser::<BotCommand>();
        bare_commands_never_reach_the_parser::<PlugCommand>();
        bare_commands_never_reach_the_parser::<PlugMiniCommand>();
        bare_commands_never_reach_the_parser::<RelaySwitchCommand>();
        bare_commands_never_reach_the_parser::<CurtainCommand>();
        bare_commands_never_reach_the_parser::<BlindTiltCommand>();
        bare_commands_never_reach_the_parser::<RollerShadeCommand>();
        bare_commands_never_reach_the_parser::<ColorBulbCommand>();
        bare_commands_never_reach_the_parser::<StripLightCommand>();
        bare_commands_never_reach_the_parser::<CeilingLightCommand>();
        bare_commands_never_reach_the_parser::<LockCommand>();
        bare_commands_never_reach_the_parser::<KeypadCommand>();
        bare_commands_never_reach_the_parser::<HumidifierCommand>();
        bare_commands_never_reach_the_parser::<EvaporativeHumidifierCommand>();
        bare_commands_never_reach_the_parser::<CirculatorFanCommand>();
        bare_commands_never_reach_the_parser::<AirPurifierCommand>();
        bare_commands_never_reach_the_parser::<VacuumCommand>();
        bare_commands_never_reach_the_parser::<VacuumS10Command>();
        bare_commands_never_reach_the_parser::<AirConditionerCommand>();
        bare_commands_never_reach_the_parser::<TvCommand>();
        bare_commands_never_reach_the_parser::<MediaPlayerCommand>();
        bare_commands_never_reach_the_parser::<FanRemoteCommand>();
        bare_commands_never_reach_the_parser::<LightRemoteCommand>();
        bare_commands_never_reach_the_parser::<RemoteCommand>();
    }

    #[test]
    fn schema_documents_are_stable() {
        let first = ColorBulbCommand::schema().to_bytes().unwrap();
        let second = ColorBulbCommand::schema().to_bytes().unwrap();
        assert_eq!(first, second);

        let doc = ColorBulbCommand::schema().to_document();
        assert_eq!(doc["additionalProperties"], json!(false));
        assert_eq!(doc["properties"]["brightness"]["maximum"], json!(100));
    }

    #[test]
    fn parse_from_text() {
        let cmd: BotCommand = parse_validated_str(r#"{"command":"Press"}"#).unwrap();
        assert_eq!(cmd, BotCommand::Press);
        assert!(matches!(
            parse_validated_str::<BotCommand>("{"),
            Err(Error::Parse(_))
        ));
    }
}
