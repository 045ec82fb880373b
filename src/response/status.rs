// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device status parsing.
//!
//! The status body carries the same `deviceType` discriminator as the device
//! list, so it is decoded through the same registry. Families without a
//! dedicated layout fall back to [`OtherStatus`], which keeps every field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::device::{DeviceKind, Tagged, decode_one};
use crate::error::Error;
use crate::types::RgbColor;

/// Fields present in every status body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    /// Device identifier.
    pub device_id: String,
    /// Model discriminator.
    pub device_type: String,
    /// Hub the device reports through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_device_id: Option<String>,
}

/// Bot status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotStatus {
    /// Common fields.
    #[serde(flatten)]
    pub info: StatusInfo,
    /// `on` or `off`.
    pub power: Option<String>,
    /// Battery percentage.
    pub battery: Option<u8>,
    /// Firmware version.
    pub version: Option<String>,
    /// `pressMode`, `switchMode` or `customizeMode`.
    pub device_mode: Option<String>,
}

/// Curtain status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurtainStatus {
    /// Common fields.
    #[serde(flatten)]
    pub info: StatusInfo,
    /// Whether the curtain is calibrated.
    pub calibrate: Option<bool>,
    /// Whether the curtain is grouped.
    pub group: Option<bool>,
    /// Whether the curtain is moving.
    pub moving: Option<bool>,
    /// Battery percentage.
    pub battery: Option<u8>,
    /// Firmware version.
    pub version: Option<String>,
    /// Current position, 0 (open) to 100 (closed).
    pub slide_position: Option<u8>,
}

/// Meter, Meter Plus, Meter Pro and outdoor meter status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterStatus {
    /// Common fields.
    #[serde(flatten)]
    pub info: StatusInfo,
    /// Temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Relative humidity percentage.
    pub humidity: Option<u8>,
    /// Battery percentage.
    pub battery: Option<u8>,
    /// Firmware version.
    pub version: Option<String>,
    /// CO2 concentration in ppm (Meter Pro CO2 only).
    #[serde(rename = "CO2")]
    pub co2: Option<u32>,
}

/// Plug status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlugStatus {
    /// Common fields.
    #[serde(flatten)]
    pub info: StatusInfo,
    /// `ON` or `OFF`.
    pub power: Option<String>,
    /// Firmware version.
    pub version: Option<String>,
}

/// Plug Mini status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlugMiniStatus {
    /// Common fields.
    #[serde(flatten)]
    pub info: StatusInfo,
    /// `on` or `off`.
    pub power: Option<String>,
    /// Voltage in volts.
    pub voltage: Option<f64>,
    /// Power draw in watts.
    pub weight: Option<f64>,
    /// Minutes of use today.
    pub electricity_of_day: Option<u32>,
    /// Current in amperes.
    pub electric_current: Option<f64>,
    /// Firmware version.
    pub version: Option<String>,
}

/// Smart lock status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockStatus {
    /// Common fields.
    #[serde(flatten)]
    pub info: StatusInfo,
    /// Battery percentage.
    pub battery: Option<u8>,
    /// Firmware version.
    pub version: Option<String>,
    /// `locked`, `unlocked` or `jammed`.
    pub lock_state: Option<String>,
    /// `opened` or `closed`.
    pub door_state: Option<String>,
    /// Whether the lock is calibrated.
    pub calibrate: Option<bool>,
}

/// Color bulb, strip light and ceiling light status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightStatus {
    /// Common fields.
    #[serde(flatten)]
    pub info: StatusInfo,
    /// `on` or `off`.
    pub power: Option<String>,
    /// Brightness percentage.
    pub brightness: Option<u8>,
    /// Color as `r:g:b`.
    pub color: Option<String>,
    /// Color temperature in Kelvin.
    pub color_temperature: Option<u16>,
    /// Firmware version.
    pub version: Option<String>,
}

impl LightStatus {
    /// Parses the reported color.
    #[must_use]
    pub fn rgb(&self) -> Option<RgbColor> {
        self.color.as_deref().and_then(|c| c.parse().ok())
    }
}

/// Humidifier status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumidifierStatus {
    /// Common fields.
    #[serde(flatten)]
    pub info: StatusInfo,
    /// `on` or `off`.
    pub power: Option<String>,
    /// Relative humidity percentage.
    pub humidity: Option<u8>,
    /// Temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Atomization efficiency percentage.
    pub nebulization_efficiency: Option<u8>,
    /// Whether auto mode is on.
    pub auto: Option<bool>,
    /// Whether the child lock is on.
    pub child_lock: Option<bool>,
    /// Whether sounds are on.
    pub sound: Option<bool>,
    /// Whether the tank is empty.
    pub lack_water: Option<bool>,
}

/// Motion sensor status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionSensorStatus {
    /// Common fields.
    #[serde(flatten)]
    pub info: StatusInfo,
    /// Battery percentage.
    pub battery: Option<u8>,
    /// Firmware version.
    pub version: Option<String>,
    /// Whether motion is detected.
    pub move_detected: Option<bool>,
    /// `bright` or `dim`.
    pub brightness: Option<String>,
}

/// Contact sensor status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSensorStatus {
    /// Common fields.
    #[serde(flatten)]
    pub info: StatusInfo,
    /// Battery percentage.
    pub battery: Option<u8>,
    /// Firmware version.
    pub version: Option<String>,
    /// Whether motion is detected.
    pub move_detected: Option<bool>,
    /// `open`, `close` or `timeOutNotClose`.
    pub open_state: Option<String>,
    /// `bright` or `dim`.
    pub brightness: Option<String>,
}

/// Status of a family without a dedicated layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherStatus {
    /// Common fields.
    #[serde(flatten)]
    pub info: StatusInfo,
    /// Every other field of the body.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Status of a physical device.
///
/// # Examples
///
/// ```
/// use switchbot_lib::response::DeviceStatus;
/// use serde_json::json;
///
/// let status = DeviceStatus::from_body(json!({
///     "deviceId": "C271111EC0AB",
///     "deviceType": "Meter",
///     "hubDeviceId": "FA7310762361",
///     "humidity": 52,
///     "temperature": 26.1,
///     "battery": 100
/// }))
/// .unwrap();
///
/// let DeviceStatus::Meter(meter) = status else { panic!() };
/// assert_eq!(meter.humidity, Some(52));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeviceStatus {
    /// Bot.
    Bot(BotStatus),
    /// Curtain.
    Curtain(CurtainStatus),
    /// Indoor and outdoor meters.
    Meter(MeterStatus),
    /// Plug.
    Plug(PlugStatus),
    /// Plug Mini.
    PlugMini(PlugMiniStatus),
    /// Smart lock.
    Lock(LockStatus),
    /// Lights.
    Light(LightStatus),
    /// Humidifier.
    Humidifier(HumidifierStatus),
    /// Motion sensor.
    MotionSensor(MotionSensorStatus),
    /// Contact sensor.
    ContactSensor(ContactSensorStatus),
    /// Any other family.
    Other(OtherStatus),
}

impl DeviceStatus {
    /// Parser for the status body.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` if the body lacks a usable `deviceType` or does
    /// not fit its layout.
    pub fn from_body(body: Value) -> Result<Self, Error> {
        Ok(decode_one(body)?)
    }

    /// Returns the fields shared by every status.
    #[must_use]
    pub fn info(&self) -> &StatusInfo {
        match self {
            Self::Bot(s) => &s.info,
            Self::Curtain(s) => &s.info,
            Self::Meter(s) => &s.info,
            Self::Plug(s) => &s.info,
            Self::PlugMini(s) => &s.info,
            Self::Lock(s) => &s.info,
            Self::Light(s) => &s.info,
            Self::Humidifier(s) => &s.info,
            Self::MotionSensor(s) => &s.info,
            Self::ContactSensor(s) => &s.info,
            Self::Other(s) => &s.info,
        }
    }
}

impl Tagged for DeviceStatus {
    const DISCRIMINATOR: &'static str = "deviceType";

    fn decode_tagged(tag: &str, entry: Value) -> Result<Self, serde_json::Error> {
        use serde_json::from_value;

        Ok(match DeviceKind::from_device_type(tag) {
            Some(DeviceKind::Bot) => Self::Bot(from_value(entry)?),
            Some(DeviceKind::Curtain) => Self::Curtain(from_value(entry)?),
            Some(DeviceKind::Meter | DeviceKind::OutdoorMeter) => Self::Meter(from_value(entry)?),
            Some(DeviceKind::Plug) => Self::Plug(from_value(entry)?),
            Some(DeviceKind::PlugMini) => Self::PlugMini(from_value(entry)?),
            Some(DeviceKind::Lock) => Self::Lock(from_value(entry)?),
            Some(DeviceKind::ColorBulb | DeviceKind::StripLight | DeviceKind::CeilingLight) => {
                Self::Light(from_value(entry)?)
            }
            Some(DeviceKind::Humidifier) => Self::Humidifier(from_value(entry)?),
            Some(DeviceKind::MotionSensor) => Self::MotionSensor(from_value(entry)?),
            Some(DeviceKind::ContactSensor) => Self::ContactSensor(from_value(entry)?),
            _ => Self::Other(from_value(entry)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bot_status() {
        let status = DeviceStatus::from_body(json!({
            "deviceId": "CA2A8AB4E8AB",
            "deviceType": "Bot",
            "hubDeviceId": "000000000000",
            "power": "on",
            "battery": 95,
            "version": "V6.3",
            "deviceMode": "pressMode"
        }))
        .unwrap();
        let DeviceStatus::Bot(bot) = status else {
            panic!("expected bot status");
        };
        assert_eq!(bot.power.as_deref(), Some("on"));
        assert_eq!(bot.device_mode.as_deref(), Some("pressMode"));
    }

    #[test]
    fn curtain3_uses_curtain_layout() {
        let status = DeviceStatus::from_body(json!({
            "deviceId": "E2F6032048AB",
            "deviceType": "Curtain3",
            "calibrate": true,
            "group": false,
            "moving": false,
            "slidePosition": 40
        }))
        .unwrap();
        let DeviceStatus::Curtain(curtain) = status else {
            panic!("expected curtain status");
        };
        assert_eq!(curtain.slide_position, Some(40));
        assert_eq!(curtain.info.hub_device_id, None);
    }

    #[test]
    fn light_status_parses_color() {
        let status = DeviceStatus::from_body(json!({
            "deviceId": "6055F92FCFD2",
            "deviceType": "Color Bulb",
            "power": "on",
            "brightness": 80,
            "color": "255:120:0",
            "colorTemperature": 4000
        }))
        .unwrap();
        let DeviceStatus::Light(light) = status else {
            panic!("expected light status");
        };
        assert_eq!(light.rgb(), Some(RgbColor::new(255, 120, 0)));
        assert_eq!(light.color_temperature, Some(4000));
    }

    #[test]
    fn outdoor_meter_uses_meter_layout() {
        let status = DeviceStatus::from_body(json!({
            "deviceId": "D1",
            "deviceType": "WoIOSensor",
            "temperature": -3.5,
            "humidity": 80
        }))
        .unwrap();
        assert!(matches!(status, DeviceStatus::Meter(_)));
        assert_eq!(status.info().device_type, "WoIOSensor");
    }

    #[test]
    fn other_families_keep_all_fields() {
        let body = json!({
            "deviceId": "R1",
            "deviceType": "Robot Vacuum Cleaner S1",
            "workingStatus": "Cleaning",
            "onlineStatus": "online",
            "battery": 88
        });
        let status = DeviceStatus::from_body(body.clone()).unwrap();
        let DeviceStatus::Other(other) = &status else {
            panic!("expected fallback status");
        };
        assert_eq!(other.extra.get("workingStatus"), Some(&json!("Cleaning")));
        assert_eq!(serde_json::to_value(&status).unwrap(), body);
    }

    #[test]
    fn missing_device_type_is_a_decode_error() {
        let err = DeviceStatus::from_body(json!({"deviceId": "X"})).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
