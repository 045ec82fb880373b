// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account-level client.
//!
//! A [`Client`] owns a [`Transport`] and exposes every endpoint of the API:
//! device listing, status, commands, scenes and webhooks. Per-device
//! command handles are borrowed from it with [`Client::curtain`],
//! [`Client::color_bulb`] and friends.

use serde_json::{Value, json};

use crate::command::{CommandRequest, CommandSet};
use crate::controller::{
    AirConditionerController, AirPurifierController, BlindTiltController, BotController,
    CeilingLightController, CirculatorFanController, ColorBulbController, Controller,
    CurtainController, EvaporativeHumidifierController, FanRemoteController,
    HumidifierController, KeypadController, LightRemoteController, LockController,
    MediaPlayerController, PlugController, PlugMiniController, RelaySwitchController,
    RemoteController, RollerShadeController, StripLightController, TvController,
    VacuumController, VacuumS10Controller,
};
use crate::device::{Device, DeviceKind, DeviceList, InfraredRemote, RemoteKind};
use crate::error::{Error, ProtocolError};
use crate::protocol::Transport;
#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};
use crate::response::{
    ApiResponse, CommandResponse, DeviceStatus, Scene, WebhookConfig, WebhookUrls, json_body,
};

/// Client for one SwitchBot account.
///
/// # Examples
///
/// ```no_run
/// use switchbot_lib::Client;
///
/// #[tokio::main]
/// async fn main() -> switchbot_lib::Result<()> {
///     let client = Client::new("token", "secret")?;
///
///     let devices = client.devices().await?.into_body();
///     for device in &devices.device_list {
///         println!("{} ({})", device.info().device_name, device.device_type());
///     }
///
///     client.curtain("C1").set_position(75, Default::default()).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
}

#[cfg(feature = "http")]
impl Client<HttpClient> {
    /// Creates a client for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Result<Self, Error> {
        Self::from_config(HttpConfig::new(token, secret))
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// created.
    pub fn from_config(config: HttpConfig) -> Result<Self, Error> {
        Ok(Self::with_transport(config.into_client()?))
    }
}

impl<T> Client<T> {
    /// Wraps an arbitrary transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn device_path(device_id: &str, endpoint: &str) -> String {
    format!("/devices/{}/{endpoint}", urlencoding::encode(device_id))
}

impl<T: Transport> Client<T> {
    async fn get_with<B>(
        &self,
        path: &str,
        parser: impl FnOnce(Value) -> Result<B, Error>,
    ) -> Result<ApiResponse<B>, Error> {
        let bytes = self.transport.get(path).await?;
        ApiResponse::parse_with(&bytes, parser)
    }

    async fn post_with<B>(
        &self,
        path: &str,
        body: Vec<u8>,
        parser: impl FnOnce(Value) -> Result<B, Error>,
    ) -> Result<ApiResponse<B>, Error> {
        let bytes = self.transport.post(path, body).await?;
        ApiResponse::parse_with(&bytes, parser)
    }

    async fn post_json<B>(
        &self,
        path: &str,
        body: &Value,
        parser: impl FnOnce(Value) -> Result<B, Error>,
    ) -> Result<ApiResponse<B>, Error> {
        let bytes = serde_json::to_vec(body).map_err(ProtocolError::Encode)?;
        self.post_with(path, bytes, parser).await
    }

    // ========== Devices ==========

    /// Lists physical devices and infrared remotes.
    ///
    /// # Errors
    ///
    /// - `Error::Protocol` if the request fails
    /// - `Error::Api` if the service rejects it
    /// - `Error::Decode` if any entry cannot be decoded; the whole list is
    ///   discarded
    pub async fn devices(&self) -> Result<ApiResponse<DeviceList>, Error> {
        let response = self.get_with("/devices", DeviceList::from_body).await?;
        tracing::debug!(
            devices = response.body.device_list.len(),
            remotes = response.body.infrared_remote_list.len(),
            "Listed devices"
        );
        Ok(response)
    }

    /// Fetches the status of a physical device.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the service rejects it or the body
    /// cannot be decoded.
    pub async fn device_status(&self, device_id: &str) -> Result<ApiResponse<DeviceStatus>, Error> {
        self.get_with(&device_path(device_id, "status"), DeviceStatus::from_body)
            .await
    }

    /// Sends a command request to a device or remote.
    ///
    /// Typed handles and [`dispatch`](Self::dispatch) end here.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects it.
    pub async fn send_command(
        &self,
        device_id: &str,
        request: &CommandRequest,
    ) -> Result<CommandResponse, Error> {
        let body = request.to_bytes().map_err(ProtocolError::Encode)?;
        tracing::debug!(device_id, command = %request.command, "Sending command");
        self.post_with(&device_path(device_id, "commands"), body, Ok)
            .await
    }

    /// Validates a parameter bag against the family of a decoded device and
    /// sends it.
    ///
    /// # Errors
    ///
    /// - `Error::UnsupportedDevice` for sensors, hubs, cameras and unknown
    ///   types
    /// - the errors of [`Controller::dispatch`]
    pub async fn dispatch(&self, device: &Device, bag: &Value) -> Result<CommandResponse, Error> {
        let id = device.device_id();
        let Some(kind) = device.kind() else {
            return Err(unsupported(device.device_type()));
        };

        match kind {
            DeviceKind::Bot => self.bot(id).dispatch(bag).await,
            DeviceKind::Plug => self.plug(id).dispatch(bag).await,
            DeviceKind::PlugMini => self.plug_mini(id).dispatch(bag).await,
            DeviceKind::RelaySwitch => self.relay_switch(id).dispatch(bag).await,
            DeviceKind::Curtain => self.curtain(id).dispatch(bag).await,
            DeviceKind::BlindTilt => self.blind_tilt(id).dispatch(bag).await,
            DeviceKind::RollerShade => self.roller_shade(id).dispatch(bag).await,
            DeviceKind::ColorBulb => self.color_bulb(id).dispatch(bag).await,
            DeviceKind::StripLight => self.strip_light(id).dispatch(bag).await,
            DeviceKind::CeilingLight => self.ceiling_light(id).dispatch(bag).await,
            DeviceKind::Lock => self.lock(id).dispatch(bag).await,
            DeviceKind::Keypad => self.keypad(id).dispatch(bag).await,
            DeviceKind::Humidifier => self.humidifier(id).dispatch(bag).await,
            DeviceKind::EvaporativeHumidifier => {
                self.evaporative_humidifier(id).dispatch(bag).await
            }
            DeviceKind::CirculatorFan => self.circulator_fan(id).dispatch(bag).await,
            DeviceKind::AirPurifier => self.air_purifier(id).dispatch(bag).await,
            DeviceKind::RobotVacuum => self.vacuum(id).dispatch(bag).await,
            DeviceKind::RobotVacuumS10 => self.vacuum_s10(id).dispatch(bag).await,
            DeviceKind::Hub
            | DeviceKind::Meter
            | DeviceKind::OutdoorMeter
            | DeviceKind::MotionSensor
            | DeviceKind::ContactSensor
            | DeviceKind::WaterLeakDetector
            | DeviceKind::Camera
            | DeviceKind::Remote => Err(unsupported(device.device_type())),
        }
    }

    /// Validates a parameter bag against the family of an infrared remote
    /// and sends it.
    ///
    /// Appliances without a dedicated family, learned (`DIY`) remotes and
    /// unknown remote types accept the generic remote commands.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Controller::dispatch`].
    pub async fn dispatch_remote(
        &self,
        remote: &InfraredRemote,
        bag: &Value,
    ) -> Result<CommandResponse, Error> {
        let id = remote.device_id();
        match remote.kind() {
            Some(RemoteKind::AirConditioner) => self.air_conditioner(id).dispatch(bag).await,
            Some(RemoteKind::Tv) => self.tv(id).dispatch(bag).await,
            Some(RemoteKind::MediaPlayer) => self.media_player(id).dispatch(bag).await,
            Some(RemoteKind::Fan) => self.fan_remote(id).dispatch(bag).await,
            Some(RemoteKind::Light) => self.light_remote(id).dispatch(bag).await,
            _ => self.remote(id).dispatch(bag).await,
        }
    }

    // ========== Scenes ==========

    /// Lists manual scenes.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects it.
    pub async fn scenes(&self) -> Result<ApiResponse<Vec<Scene>>, Error> {
        self.get_with("/scenes", json_body).await
    }

    /// Executes a manual scene.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects it.
    pub async fn execute_scene(&self, scene_id: &str) -> Result<CommandResponse, Error> {
        let path = format!("/scenes/{}/execute", urlencoding::encode(scene_id));
        tracing::debug!(scene_id, "Executing scene");
        self.post_with(&path, Vec::new(), Ok).await
    }

    // ========== Webhooks ==========

    /// Registers a webhook receiving events of every device.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects it.
    pub async fn setup_webhook(&self, url: &str) -> Result<CommandResponse, Error> {
        let body = json!({"action": "setupWebhook", "url": url, "deviceList": "ALL"});
        self.post_json("/webhook/setupWebhook", &body, Ok).await
    }

    /// Lists the registered webhook URLs.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects it.
    pub async fn query_webhook_urls(&self) -> Result<ApiResponse<WebhookUrls>, Error> {
        let body = json!({"action": "queryUrl"});
        self.post_json("/webhook/queryWebhook", &body, json_body)
            .await
    }

    /// Fetches the configuration of the given webhooks.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects it.
    pub async fn query_webhook_details(
        &self,
        urls: &[&str],
    ) -> Result<ApiResponse<Vec<WebhookConfig>>, Error> {
        let body = json!({"action": "queryDetails", "urls": urls});
        self.post_json("/webhook/queryWebhook", &body, json_body)
            .await
    }

    /// Enables or disables a webhook.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects it.
    pub async fn update_webhook(&self, url: &str, enable: bool) -> Result<CommandResponse, Error> {
        let body = json!({"action": "updateWebhook", "config": {"url": url, "enable": enable}});
        self.post_json("/webhook/updateWebhook", &body, Ok).await
    }

    /// Removes a webhook.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects it.
    pub async fn delete_webhook(&self, url: &str) -> Result<CommandResponse, Error> {
        let body = json!({"action": "deleteWebhook", "url": url});
        self.post_json("/webhook/deleteWebhook", &body, Ok).await
    }
}

fn unsupported(device_type: &str) -> Error {
    Error::UnsupportedDevice {
        device_type: device_type.to_string(),
    }
}

// ========== Controllers ==========

impl<T: Transport> Client<T> {
    /// Returns a handle for any command family.
    pub fn controller<K: CommandSet>(&self, device_id: impl Into<String>) -> Controller<'_, T, K> {
        Controller::new(self, device_id)
    }

    /// Bot handle.
    pub fn bot(&self, device_id: impl Into<String>) -> BotController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Plug handle.
    pub fn plug(&self, device_id: impl Into<String>) -> PlugController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Plug Mini handle.
    pub fn plug_mini(&self, device_id: impl Into<String>) -> PlugMiniController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Relay switch handle.
    pub fn relay_switch(&self, device_id: impl Into<String>) -> RelaySwitchController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Curtain handle.
    pub fn curtain(&self, device_id: impl Into<String>) -> CurtainController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Blind tilt handle.
    pub fn blind_tilt(&self, device_id: impl Into<String>) -> BlindTiltController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Roller shade handle.
    pub fn roller_shade(&self, device_id: impl Into<String>) -> RollerShadeController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Color bulb handle.
    pub fn color_bulb(&self, device_id: impl Into<String>) -> ColorBulbController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Strip light handle.
    pub fn strip_light(&self, device_id: impl Into<String>) -> StripLightController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Ceiling light handle.
    pub fn ceiling_light(&self, device_id: impl Into<String>) -> CeilingLightController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Smart lock handle.
    pub fn lock(&self, device_id: impl Into<String>) -> LockController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Keypad handle.
    pub fn keypad(&self, device_id: impl Into<String>) -> KeypadController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Humidifier handle.
    pub fn humidifier(&self, device_id: impl Into<String>) -> HumidifierController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Evaporative humidifier handle.
    pub fn evaporative_humidifier(
        &self,
        device_id: impl Into<String>,
    ) -> EvaporativeHumidifierController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Circulator fan handle.
    pub fn circulator_fan(&self, device_id: impl Into<String>) -> CirculatorFanController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Air purifier handle.
    pub fn air_purifier(&self, device_id: impl Into<String>) -> AirPurifierController<'_, T> {
        Controller::new(self, device_id)
    }

    /// S1 / K10 robot vacuum handle.
    pub fn vacuum(&self, device_id: impl Into<String>) -> VacuumController<'_, T> {
        Controller::new(self, device_id)
    }

    /// S10 robot vacuum handle.
    pub fn vacuum_s10(&self, device_id: impl Into<String>) -> VacuumS10Controller<'_, T> {
        Controller::new(self, device_id)
    }

    /// Infrared air conditioner handle.
    pub fn air_conditioner(&self, device_id: impl Into<String>) -> AirConditionerController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Infrared TV handle.
    pub fn tv(&self, device_id: impl Into<String>) -> TvController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Infrared DVD / speaker handle.
    pub fn media_player(&self, device_id: impl Into<String>) -> MediaPlayerController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Infrared fan handle.
    pub fn fan_remote(&self, device_id: impl Into<String>) -> FanRemoteController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Infrared light handle.
    pub fn light_remote(&self, device_id: impl Into<String>) -> LightRemoteController<'_, T> {
        Controller::new(self, device_id)
    }

    /// Generic infrared remote handle.
    pub fn remote(&self, device_id: impl Into<String>) -> RemoteController<'_, T> {
        Controller::new(self, device_id)
    }
}
