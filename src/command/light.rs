// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light control commands.
//!
//! Color bulbs, strip lights and ceiling lights share the brightness
//! command; only bulbs and strips take an RGB color and only bulbs and
//! ceiling lights take a white color temperature.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::command::{Command, CommandSet, Parameter, Switchable, Toggleable};
use crate::controller::Controller;
use crate::error::{Error, ValueError};
use crate::protocol::Transport;
use crate::response::CommandResponse;
use crate::schema::CommandSchema;
use crate::types::{Brightness, ColorTemperature, RgbColor};

/// Accepts `r:g:b` or a 6 digit hex color.
const COLOR_PATTERN: &str = r"^(\d{1,3}:\d{1,3}:\d{1,3}|#?[0-9A-Fa-f]{6})$";

fn brightness_parameter(brightness: Brightness) -> Parameter {
    Parameter::Text(brightness.value().to_string())
}

fn color_parameter(color: RgbColor) -> Parameter {
    Parameter::Text(color.to_parameter())
}

fn temperature_parameter(temperature: ColorTemperature) -> Parameter {
    Parameter::Text(temperature.kelvin().to_string())
}

/// Color bulb commands.
///
/// # Examples
///
/// ```
/// use switchbot_lib::command::{ColorBulbCommand, Command, Parameter};
/// use switchbot_lib::types::Brightness;
///
/// let cmd = ColorBulbCommand::SetBrightness(Brightness::new(80).unwrap());
/// assert_eq!(cmd.name(), "setBrightness");
/// assert_eq!(cmd.parameter(), Parameter::Text("80".to_string()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBulbCommand {
    /// Power on.
    TurnOn,
    /// Power off.
    TurnOff,
    /// Invert the power state.
    Toggle,
    /// Set the brightness.
    SetBrightness(Brightness),
    /// Set an RGB color.
    SetColor(RgbColor),
    /// Set a white color temperature.
    SetColorTemperature(ColorTemperature),
}

/// Parameter bag layout of [`ColorBulbCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all_fields = "camelCase")]
pub enum ColorBulbParams {
    /// `{"command": "TurnOn"}`
    TurnOn,
    /// `{"command": "TurnOff"}`
    TurnOff,
    /// `{"command": "Toggle"}`
    Toggle,
    /// `{"command": "SetBrightness", "brightness": 0..=100}`
    SetBrightness {
        /// Brightness percentage.
        brightness: u8,
    },
    /// `{"command": "SetColor", "color": "r:g:b"}`
    SetColor {
        /// `r:g:b` or hex.
        color: String,
    },
    /// `{"command": "SetColorTemperature", "colorTemperature": 2700..=6500}`
    SetColorTemperature {
        /// Kelvin.
        color_temperature: u16,
    },
}

impl Command for ColorBulbCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::Toggle => "toggle",
            Self::SetBrightness(_) => "setBrightness",
            Self::SetColor(_) => "setColor",
            Self::SetColorTemperature(_) => "setColorTemperature",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match *self {
            Self::SetBrightness(brightness) => brightness_parameter(brightness),
            Self::SetColor(color) => color_parameter(color),
            Self::SetColorTemperature(temperature) => temperature_parameter(temperature),
            _ => Parameter::default(),
        }
    }
}

impl Switchable for ColorBulbCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl Toggleable for ColorBulbCommand {
    const TOGGLE: Self = Self::Toggle;
}

impl CommandSet for ColorBulbCommand {
    type Args = ColorBulbParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Color Bulb")
                .commands(&[
                    "TurnOn",
                    "TurnOff",
                    "Toggle",
                    "SetBrightness",
                    "SetColor",
                    "SetColorTemperature",
                ])
                .integer("brightness", 0, 100)
                .pattern("color", COLOR_PATTERN)
                .integer(
                    "colorTemperature",
                    i64::from(ColorTemperature::MIN),
                    i64::from(ColorTemperature::MAX),
                )
                .require_when(&["SetBrightness"], &["brightness"])
                .require_when(&["SetColor"], &["color"])
                .require_when(&["SetColorTemperature"], &["colorTemperature"])
                .build()
        })
    }

    fn from_args(args: ColorBulbParams) -> Result<Self, ValueError> {
        Ok(match args {
            ColorBulbParams::TurnOn => Self::TurnOn,
            ColorBulbParams::TurnOff => Self::TurnOff,
            ColorBulbParams::Toggle => Self::Toggle,
            ColorBulbParams::SetBrightness { brightness } => {
                Self::SetBrightness(Brightness::new(brightness)?)
            }
            ColorBulbParams::SetColor { color } => Self::SetColor(color.parse()?),
            ColorBulbParams::SetColorTemperature { color_temperature } => {
                Self::SetColorTemperature(ColorTemperature::new(color_temperature)?)
            }
        })
    }
}

impl<T: Transport> Controller<'_, T, ColorBulbCommand> {
    /// Sets the brightness percentage.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` above 100, or error if the command fails.
    pub async fn set_brightness(&self, brightness: u8) -> Result<CommandResponse, Error> {
        let command = ColorBulbCommand::SetBrightness(Brightness::new(brightness)?);
        self.apply(&command).await
    }

    /// Sets an RGB color.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_color(&self, color: RgbColor) -> Result<CommandResponse, Error> {
        self.apply(&ColorBulbCommand::SetColor(color)).await
    }

    /// Sets the white color temperature in Kelvin.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` outside 2700-6500, or error if the command
    /// fails.
    pub async fn set_color_temperature(&self, kelvin: u16) -> Result<CommandResponse, Error> {
        let command = ColorBulbCommand::SetColorTemperature(ColorTemperature::new(kelvin)?);
        self.apply(&command).await
    }
}

/// LED strip light commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripLightCommand {
    /// Power on.
    TurnOn,
    /// Power off.
    TurnOff,
    /// Invert the power state.
    Toggle,
    /// Set the brightness.
    SetBrightness(Brightness),
    /// Set an RGB color.
    SetColor(RgbColor),
}

/// Parameter bag layout of [`StripLightCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command")]
pub enum StripLightParams {
    /// `{"command": "TurnOn"}`
    TurnOn,
    /// `{"command": "TurnOff"}`
    TurnOff,
    /// `{"command": "Toggle"}`
    Toggle,
    /// `{"command": "SetBrightness", "brightness": 0..=100}`
    SetBrightness {
        /// Brightness percentage.
        brightness: u8,
    },
    /// `{"command": "SetColor", "color": "r:g:b"}`
    SetColor {
        /// `r:g:b` or hex.
        color: String,
    },
}

impl Command for StripLightCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::Toggle => "toggle",
            Self::SetBrightness(_) => "setBrightness",
            Self::SetColor(_) => "setColor",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match *self {
            Self::SetBrightness(brightness) => brightness_parameter(brightness),
            Self::SetColor(color) => color_parameter(color),
            _ => Parameter::default(),
        }
    }
}

impl Switchable for StripLightCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl Toggleable for StripLightCommand {
    const TOGGLE: Self = Self::Toggle;
}

impl CommandSet for StripLightCommand {
    type Args = StripLightParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Strip Light")
                .commands(&["TurnOn", "TurnOff", "Toggle", "SetBrightness", "SetColor"])
                .integer("brightness", 0, 100)
                .pattern("color", COLOR_PATTERN)
                .require_when(&["SetBrightness"], &["brightness"])
                .require_when(&["SetColor"], &["color"])
                .build()
        })
    }

    fn from_args(args: StripLightParams) -> Result<Self, ValueError> {
        Ok(match args {
            StripLightParams::TurnOn => Self::TurnOn,
            StripLightParams::TurnOff => Self::TurnOff,
            StripLightParams::Toggle => Self::Toggle,
            StripLightParams::SetBrightness { brightness } => {
                Self::SetBrightness(Brightness::new(brightness)?)
            }
            StripLightParams::SetColor { color } => Self::SetColor(color.parse()?),
        })
    }
}

impl<T: Transport> Controller<'_, T, StripLightCommand> {
    /// Sets the brightness percentage.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` above 100, or error if the command fails.
    pub async fn set_brightness(&self, brightness: u8) -> Result<CommandResponse, Error> {
        let command = StripLightCommand::SetBrightness(Brightness::new(brightness)?);
        self.apply(&command).await
    }

    /// Sets an RGB color.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_color(&self, color: RgbColor) -> Result<CommandResponse, Error> {
        self.apply(&StripLightCommand::SetColor(color)).await
    }
}

/// Ceiling light and Ceiling Light Pro commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeilingLightCommand {
    /// Power on.
    TurnOn,
    /// Power off.
    TurnOff,
    /// Invert the power state.
    Toggle,
    /// Set the brightness.
    SetBrightness(Brightness),
    /// Set the white color temperature.
    SetColorTemperature(ColorTemperature),
}

/// Parameter bag layout of [`CeilingLightCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all_fields = "camelCase")]
pub enum CeilingLightParams {
    /// `{"command": "TurnOn"}`
    TurnOn,
    /// `{"command": "TurnOff"}`
    TurnOff,
    /// `{"command": "Toggle"}`
    Toggle,
    /// `{"command": "SetBrightness", "brightness": 0..=100}`
    SetBrightness {
        /// Brightness percentage.
        brightness: u8,
    },
    /// `{"command": "SetColorTemperature", "colorTemperature": 2700..=6500}`
    SetColorTemperature {
        /// Kelvin.
        color_temperature: u16,
    },
}

impl Command for CeilingLightCommand {
    fn name(&self) -> String {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::Toggle => "toggle",
            Self::SetBrightness(_) => "setBrightness",
            Self::SetColorTemperature(_) => "setColorTemperature",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match *self {
            Self::SetBrightness(brightness) => brightness_parameter(brightness),
            Self::SetColorTemperature(temperature) => temperature_parameter(temperature),
            _ => Parameter::default(),
        }
    }
}

impl Switchable for CeilingLightCommand {
    const ON: Self = Self::TurnOn;
    const OFF: Self = Self::TurnOff;
}

impl Toggleable for CeilingLightCommand {
    const TOGGLE: Self = Self::Toggle;
}

impl CommandSet for CeilingLightCommand {
    type Args = CeilingLightParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Ceiling Light")
                .commands(&[
                    "TurnOn",
                    "TurnOff",
                    "Toggle",
                    "SetBrightness",
                    "SetColorTemperature",
                ])
                .integer("brightness", 0, 100)
                .integer(
                    "colorTemperature",
                    i64::from(ColorTemperature::MIN),
                    i64::from(ColorTemperature::MAX),
                )
                .require_when(&["SetBrightness"], &["brightness"])
                .require_when(&["SetColorTemperature"], &["colorTemperature"])
                .build()
        })
    }

    fn from_args(args: CeilingLightParams) -> Result<Self, ValueError> {
        Ok(match args {
            CeilingLightParams::TurnOn => Self::TurnOn,
            CeilingLightParams::TurnOff => Self::TurnOff,
            CeilingLightParams::Toggle => Self::Toggle,
            CeilingLightParams::SetBrightness { brightness } => {
                Self::SetBrightness(Brightness::new(brightness)?)
            }
            CeilingLightParams::SetColorTemperature { color_temperature } => {
                Self::SetColorTemperature(ColorTemperature::new(color_temperature)?)
            }
        })
    }
}

impl<T: Transport> Controller<'_, T, CeilingLightCommand> {
    /// Sets the brightness percentage.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` above 100, or error if the command fails.
    pub async fn set_brightness(&self, brightness: u8) -> Result<CommandResponse, Error> {
        let command = CeilingLightCommand::SetBrightness(Brightness::new(brightness)?);
        self.apply(&command).await
    }

    /// Sets the white color temperature in Kelvin.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` outside 2700-6500, or error if the command
    /// fails.
    pub async fn set_color_temperature(&self, kelvin: u16) -> Result<CommandResponse, Error> {
        let command = CeilingLightCommand::SetColorTemperature(ColorTemperature::new(kelvin)?);
        self.apply(&command).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::command::parse_validated;

    #[test]
    fn brightness_boundaries() {
        for ok in [0, 100] {
            let cmd: ColorBulbCommand =
                parse_validated(&json!({"command": "SetBrightness", "brightness": ok})).unwrap();
            assert_eq!(cmd.parameter(), Parameter::Text(ok.to_string()));
        }
        let err =
            parse_validated::<ColorBulbCommand>(&json!({"command": "SetBrightness", "brightness": 101}))
                .unwrap_err();
        assert!(err.to_string().contains("value 101 should be at most 100"));
    }

    #[test]
    fn color_temperature_boundaries() {
        for (kelvin, ok) in [(2699, false), (2700, true), (6500, true), (6501, false)] {
            assert_eq!(ColorTemperature::new(kelvin).is_ok(), ok, "{kelvin}");
            let bag = json!({"command": "SetColorTemperature", "colorTemperature": kelvin});
            assert_eq!(parse_validated::<CeilingLightCommand>(&bag).is_ok(), ok, "{kelvin}");
        }
    }

    #[test]
    fn color_accepts_both_notations() {
        let rgb: ColorBulbCommand =
            parse_validated(&json!({"command": "SetColor", "color": "255:0:128"})).unwrap();
        let hex: ColorBulbCommand =
            parse_validated(&json!({"command": "SetColor", "color": "#FF0080"})).unwrap();
        assert_eq!(rgb, hex);
        assert_eq!(rgb.parameter(), Parameter::Text("255:0:128".to_string()));
    }

    #[test]
    fn color_channel_overflow_is_a_value_error() {
        let err = parse_validated::<StripLightCommand>(&json!({"command": "SetColor", "color": "256:0:0"}))
            .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::InvalidFormat { field: "color", .. })));
    }

    #[test]
    fn strip_light_has_no_color_temperature() {
        let err = parse_validated::<StripLightCommand>(&json!({
            "command": "SetColorTemperature",
            "colorTemperature": 3000
        }))
        .unwrap_err();
        assert!(matches!(err, Error::UnknownCommand { .. }));
    }
}
