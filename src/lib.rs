// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SwitchBot` Lib - A typed Rust client for the SwitchBot cloud API (v1.1).
//!
//! This library provides async APIs to list, query and control the devices
//! and infrared remotes of a SwitchBot account.
//!
//! # Supported Features
//!
//! - **Signed transport**: token + secret HMAC signing of every request
//! - **Device listing**: physical devices and infrared remotes decoded into
//!   closed sum types, unknown models preserved
//! - **Status queries**: typed status per device family
//! - **Commands**: typed methods with range checks before any request, and a
//!   schema-validated path for loosely-typed parameter bags
//! - **Scenes and webhooks**
//!
//! # Quick Start
//!
//! ## Typed commands
//!
//! ```no_run
//! use switchbot_lib::Client;
//! use switchbot_lib::types::CurtainMode;
//!
//! #[tokio::main]
//! async fn main() -> switchbot_lib::Result<()> {
//!     let client = Client::new("token", "secret")?;
//!
//!     client.bot("C271111EC0AB").press().await?;
//!     client.curtain("E2F6032048AB").set_position(75, CurtainMode::Default).await?;
//!     client.color_bulb("6055F92FCFD2").set_color_temperature(4000).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Validated dispatch
//!
//! A parameter bag is checked against the family's schema; every violation
//! is reported at once and nothing is sent unless the bag is valid.
//!
//! ```no_run
//! use switchbot_lib::Client;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> switchbot_lib::Result<()> {
//!     let client = Client::new("token", "secret")?;
//!     let devices = client.devices().await?.into_body();
//!
//!     if let Some(curtain) = devices.device("E2F6032048AB") {
//!         let bag = json!({"command": "SetPosition", "mode": "ff", "position": 75});
//!         client.dispatch(curtain, &bag).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Custom configuration
//!
//! ```no_run
//! use std::time::Duration;
//! use switchbot_lib::{Client, HttpConfig};
//!
//! # fn main() -> switchbot_lib::Result<()> {
//! let config = HttpConfig::new("token", "secret")
//!     .with_timeout(Duration::from_secs(5))
//!     .with_verbose(true);
//! let client = Client::from_config(config)?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod command;
mod controller;
pub mod device;
pub mod error;
pub mod protocol;
pub mod response;
pub mod schema;
pub mod types;

pub use client::Client;
pub use command::{Command, CommandRequest, CommandSet, CommandType, Parameter};
pub use controller::{
    AirConditionerController, AirPurifierController, BlindTiltController, BotController,
    CeilingLightController, CirculatorFanController, ColorBulbController, Controller,
    CurtainController, EvaporativeHumidifierController, FanRemoteController,
    HumidifierController, KeypadController, LightRemoteController, LockController,
    MediaPlayerController, PlugController, PlugMiniController, RelaySwitchController,
    RemoteController, RollerShadeController, StripLightController, TvController,
    VacuumController, VacuumS10Controller,
};
pub use device::{Device, DeviceKind, DeviceList, InfraredRemote, RemoteKind};
pub use error::{
    DecodeError, Error, ParseError, ProtocolError, Result, ValidationError, ValueError, Violation,
};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::Transport;
pub use response::{ApiResponse, CommandResponse, DeviceStatus};
pub use schema::CommandSchema;
pub use types::{
    AcTemperature, BlindDirection, Brightness, Channel, ColorTemperature, CurtainMode,
    EvaporativeMode, Humidity, Position, RgbColor, SelfCleanMode, SuctionLevel, Volume, WindSpeed,
};
