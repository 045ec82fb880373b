// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device command handles.
//!
//! A [`Controller`] binds a device id to one command family. The typed
//! methods (`set_brightness`, `set_position`, ...) live next to each family
//! in [`crate::command`]; both they and [`Controller::dispatch`] end in
//! [`Controller::apply`], so a command reaches the wire the same way
//! whichever path built it.

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::client::Client;
use crate::command::{
    AirConditionerCommand, AirPurifierCommand, BlindTiltCommand, BotCommand, CeilingLightCommand,
    CirculatorFanCommand, ColorBulbCommand, Command, CommandSet, CurtainCommand,
    EvaporativeHumidifierCommand, FanRemoteCommand, HumidifierCommand, KeypadCommand,
    LightRemoteCommand, LockCommand, MediaPlayerCommand, PlugCommand, PlugMiniCommand,
    RelaySwitchCommand, RemoteCommand, RollerShadeCommand, StripLightCommand, Switchable,
    Toggleable, TvCommand, VacuumCommand, VacuumS10Command, parse_validated, parse_validated_str,
};
use crate::error::Error;
use crate::protocol::Transport;
use crate::response::CommandResponse;

/// Command handle for one device of family `K`.
pub struct Controller<'c, T, K> {
    client: &'c Client<T>,
    device_id: String,
    family: PhantomData<fn() -> K>,
}

impl<T, K> fmt::Debug for Controller<'_, T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("device_id", &self.device_id)
            .field("family", &std::any::type_name::<K>())
            .finish_non_exhaustive()
    }
}

impl<'c, T, K> Controller<'c, T, K> {
    pub(crate) fn new(client: &'c Client<T>, device_id: impl Into<String>) -> Self {
        Self {
            client,
            device_id: device_id.into(),
            family: PhantomData,
        }
    }

    /// Returns the id commands are sent to.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

impl<T: Transport, K: Command> Controller<'_, T, K> {
    /// Sends an already validated command.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects it.
    pub async fn apply(&self, command: &K) -> Result<CommandResponse, Error> {
        let request = command.to_request();
        tracing::debug!(
            device_id = %self.device_id,
            command = %request.command,
            "Applying command"
        );
        self.client.send_command(&self.device_id, &request).await
    }
}

impl<T: Transport, K: Switchable> Controller<'_, T, K> {
    /// Turns the device on.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn turn_on(&self) -> Result<CommandResponse, Error> {
        self.apply(&K::ON).await
    }

    /// Turns the device off.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn turn_off(&self) -> Result<CommandResponse, Error> {
        self.apply(&K::OFF).await
    }
}

impl<T: Transport, K: Toggleable> Controller<'_, T, K> {
    /// Toggles the power state.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn toggle(&self) -> Result<CommandResponse, Error> {
        self.apply(&K::TOGGLE).await
    }
}

impl<T: Transport, K: CommandSet> Controller<'_, T, K> {
    /// Validates a parameter bag and sends the resulting command.
    ///
    /// Nothing is sent unless the bag passes validation.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownCommand` if the command name is not in the family
    /// - `Error::Validation` listing every schema violation
    /// - `Error::Value` if a business rule rejects the arguments
    /// - any error of [`apply`](Self::apply)
    pub async fn dispatch(&self, bag: &Value) -> Result<CommandResponse, Error> {
        let command: K = parse_validated(bag)?;
        self.apply(&command).await
    }

    /// Same as [`dispatch`](Self::dispatch), starting from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for malformed JSON, otherwise the errors of
    /// [`dispatch`](Self::dispatch).
    pub async fn dispatch_str(&self, json: &str) -> Result<CommandResponse, Error> {
        let command: K = parse_validated_str(json)?;
        self.apply(&command).await
    }
}

/// Bot handle.
pub type BotController<'c, T> = Controller<'c, T, BotCommand>;
/// Plug handle.
pub type PlugController<'c, T> = Controller<'c, T, PlugCommand>;
/// Plug Mini handle.
pub type PlugMiniController<'c, T> = Controller<'c, T, PlugMiniCommand>;
/// Relay switch handle.
pub type RelaySwitchController<'c, T> = Controller<'c, T, RelaySwitchCommand>;
/// Curtain handle.
pub type CurtainController<'c, T> = Controller<'c, T, CurtainCommand>;
/// Blind tilt handle.
pub type BlindTiltController<'c, T> = Controller<'c, T, BlindTiltCommand>;
/// Roller shade handle.
pub type RollerShadeController<'c, T> = Controller<'c, T, RollerShadeCommand>;
/// Color bulb handle.
pub type ColorBulbController<'c, T> = Controller<'c, T, ColorBulbCommand>;
/// Strip light handle.
pub type StripLightController<'c, T> = Controller<'c, T, StripLightCommand>;
/// Ceiling light handle.
pub type CeilingLightController<'c, T> = Controller<'c, T, CeilingLightCommand>;
/// Smart lock handle.
pub type LockController<'c, T> = Controller<'c, T, LockCommand>;
/// Keypad handle.
pub type KeypadController<'c, T> = Controller<'c, T, KeypadCommand>;
/// Humidifier handle.
pub type HumidifierController<'c, T> = Controller<'c, T, HumidifierCommand>;
/// Evaporative humidifier handle.
pub type EvaporativeHumidifierController<'c, T> = Controller<'c, T, EvaporativeHumidifierCommand>;
/// Circulator fan handle.
pub type CirculatorFanController<'c, T> = Controller<'c, T, CirculatorFanCommand>;
/// Air purifier handle.
pub type AirPurifierController<'c, T> = Controller<'c, T, AirPurifierCommand>;
/// S1 / K10 robot vacuum handle.
pub type VacuumController<'c, T> = Controller<'c, T, VacuumCommand>;
/// S10 robot vacuum handle.
pub type VacuumS10Controller<'c, T> = Controller<'c, T, VacuumS10Command>;
/// Infrared air conditioner handle.
pub type AirConditionerController<'c, T> = Controller<'c, T, AirConditionerCommand>;
/// Infrared TV handle.
pub type TvController<'c, T> = Controller<'c, T, TvCommand>;
/// Infrared DVD / speaker handle.
pub type MediaPlayerController<'c, T> = Controller<'c, T, MediaPlayerCommand>;
/// Infrared fan handle.
pub type FanRemoteController<'c, T> = Controller<'c, T, FanRemoteCommand>;
/// Infrared light handle.
pub type LightRemoteController<'c, T> = Controller<'c, T, LightRemoteCommand>;
/// Generic infrared remote handle.
pub type RemoteController<'c, T> = Controller<'c, T, RemoteCommand>;


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testing::RecordingTransport;
    use crate::Client;
    use crate::error::ValueError;

    #[tokio::test]
    async fn typed_and_dispatch_paths_send_identical_bodies() {
        let client = Client::with_transport(RecordingTransport::default());
        let bot = client.bot("C1");

        bot.turn_on().await.unwrap();
        bot.dispatch(&json!({"command": "TurnOn"})).await.unwrap();

        let bodies = client.transport().bodies();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(
            bodies[0],
            r#"{"commandType":"command","command":"turnOn","parameter":"default"}"#
        );
    }

    #[tokio::test]
    async fn commands_go_to_the_device_path() {
        let client = Client::with_transport(RecordingTransport::default());
        client.plug_mini("6055F92FCFD2").toggle().await.unwrap();
        assert_eq!(client.transport().paths(), ["/devices/6055F92FCFD2/commands"]);
    }

    #[tokio::test]
    async fn invalid_bag_sends_nothing() {
        let client = Client::with_transport(RecordingTransport::default());
        let err = client
            .curtain("C2")
            .dispatch(&json!({"command": "SetPosition", "position": 101}))
            .await
            .unwrap_err();
        let crate::Error::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert!(violations.mentions("/position"));
        assert!(violations.mentions("/mode"));
        assert!(client.transport().requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_typed_value_sends_nothing() {
        let client = Client::with_transport(RecordingTransport::default());
        let err = client
            .color_bulb("B1")
            .set_color_temperature(6501)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Value(ValueError::OutOfRange { max: 6500, .. })
        ));
        assert!(client.transport().requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn dispatch_str_parses_text() {
        let client = Client::with_transport(RecordingTransport::default());
        client
            .curtain("C3")
            .dispatch_str(r#"{"command":"SetPosition","mode":"ff","position":75}"#)
            .await
            .unwrap();
        assert_eq!(
            client.transport().bodies(),
            [r#"{"commandType":"command","command":"setPosition","parameter":"0,ff,75"}"#]
        );
    }
}
