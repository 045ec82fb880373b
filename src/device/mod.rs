// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Devices reported by the device list endpoint.
//!
//! The list endpoint returns physical devices and infrared remotes as
//! heterogeneous JSON arrays. Each entry carries a discriminator
//! (`deviceType` or `remoteType`) that selects one variant of the closed
//! [`Device`] / [`InfraredRemote`] sum types through the tables in
//! [`registry`]. Entries with an unknown discriminator decode into the
//! `Other` variants, which keep every field they carried.
//!
//! ```
//! use switchbot_lib::device::{Device, DeviceList};
//! use serde_json::json;
//!
//! let body = json!({
//!     "deviceList": [
//!         {"deviceId": "A1", "deviceName": "Hall hub", "deviceType": "Hub 2",
//!          "enableCloudService": false, "hubDeviceId": "000000000000"},
//!         {"deviceId": "B2", "deviceName": "Desk", "deviceType": "Bot",
//!          "enableCloudService": true, "hubDeviceId": "A1"}
//!     ],
//!     "infraredRemoteList": []
//! });
//!
//! let list = DeviceList::from_body(body).unwrap();
//! assert!(matches!(list.device_list[0], Device::Hub(_)));
//! assert_eq!(list.device_list[1].device_id(), "B2");
//! ```

mod decode;
pub mod registry;
mod remote;

pub use decode::{DeviceList, Tagged, decode_list, decode_one};
pub use registry::{DeviceKind, RemoteKind};
pub use remote::{InfraredRemote, RemoteInfo, UnknownRemote};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields shared by every physical device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    /// Opaque device identifier, used in command and status paths.
    pub device_id: String,
    /// Name given in the app.
    #[serde(default)]
    pub device_name: String,
    /// Model discriminator.
    pub device_type: String,
    /// Whether cloud control is enabled.
    #[serde(default)]
    pub enable_cloud_service: bool,
    /// Hub the device is paired with, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_device_id: Option<String>,
}

/// Curtain or Curtain 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curtain {
    /// Common fields.
    #[serde(flatten)]
    pub info: DeviceInfo,
    /// Ids of the curtains grouped with this one.
    #[serde(default, rename = "curtainDevicesIds")]
    pub curtain_device_ids: Vec<String>,
    /// Whether the open and close positions are calibrated.
    #[serde(default)]
    pub calibrate: bool,
    /// Whether the curtain is part of a group.
    #[serde(default)]
    pub group: bool,
    /// Whether this is the master of its group.
    #[serde(default)]
    pub master: bool,
    /// Opening direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_direction: Option<String>,
}

/// Smart lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lock {
    /// Common fields.
    #[serde(flatten)]
    pub info: DeviceInfo,
    /// Whether the lock is part of a dual lock group.
    #[serde(default)]
    pub group: bool,
    /// Whether this is the master lock.
    #[serde(default)]
    pub master: bool,
    /// Name of the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Ids of the locks in the group.
    #[serde(default, rename = "lockDevicesIds")]
    pub lock_device_ids: Vec<String>,
}

/// Keypad or Keypad Touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keypad {
    /// Common fields.
    #[serde(flatten)]
    pub info: DeviceInfo,
    /// Lock the keypad is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_device_id: Option<String>,
    /// Passcodes stored on the keypad.
    #[serde(default)]
    pub key_list: Vec<KeypadKey>,
}

/// A passcode stored on a keypad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeypadKey {
    /// Passcode id, used to delete it.
    pub id: i64,
    /// Passcode name.
    pub name: String,
    /// `permanent`, `timeLimit`, `disposable` or `urgent`.
    #[serde(rename = "type")]
    pub key_type: String,
    /// Encrypted passcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Initialization vector of the encrypted passcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
    /// `normal` or `expired`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Creation time, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
}

/// Blind tilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlindTilt {
    /// Common fields.
    #[serde(flatten)]
    pub info: DeviceInfo,
    /// Ids of the blinds grouped with this one.
    #[serde(default, rename = "blindTiltDevicesIds")]
    pub blind_tilt_device_ids: Vec<String>,
    /// Whether the blind is calibrated.
    #[serde(default)]
    pub calibrate: bool,
    /// Whether the blind is part of a group.
    #[serde(default)]
    pub group: bool,
    /// Whether this is the master of its group.
    #[serde(default)]
    pub master: bool,
    /// Closing direction, `up` or `down`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Current slat position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_position: Option<i64>,
}

/// Roller shade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollerShade {
    /// Common fields.
    #[serde(flatten)]
    pub info: DeviceInfo,
    /// Ids of the shades grouped with this one.
    #[serde(default, rename = "groupingDevicesIds")]
    pub grouping_device_ids: Vec<String>,
    /// Whether the shade is part of a group.
    #[serde(default)]
    pub group: bool,
    /// Whether this is the master of its group.
    #[serde(default)]
    pub master: bool,
    /// Name of the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

/// A device whose `deviceType` is not in the registry.
///
/// Fields beyond the common ones are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownDevice {
    /// Common fields.
    #[serde(flatten)]
    pub info: DeviceInfo,
    /// Every other field of the entry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A physical device, one variant per family.
///
/// Serializes back to the flat JSON object it was decoded from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Device {
    /// Any hub model.
    Hub(DeviceInfo),
    /// Bot.
    Bot(DeviceInfo),
    /// Curtain.
    Curtain(Curtain),
    /// Plug.
    Plug(DeviceInfo),
    /// Plug Mini.
    PlugMini(DeviceInfo),
    /// Indoor meter.
    Meter(DeviceInfo),
    /// Outdoor meter.
    OutdoorMeter(DeviceInfo),
    /// Motion sensor.
    MotionSensor(DeviceInfo),
    /// Contact sensor.
    ContactSensor(DeviceInfo),
    /// Water leak detector.
    WaterLeakDetector(DeviceInfo),
    /// Smart lock.
    Lock(Lock),
    /// Keypad.
    Keypad(Keypad),
    /// Color bulb.
    ColorBulb(DeviceInfo),
    /// Strip light.
    StripLight(DeviceInfo),
    /// Ceiling light.
    CeilingLight(DeviceInfo),
    /// S1 / K10 robot vacuum.
    RobotVacuum(DeviceInfo),
    /// S10 robot vacuum.
    RobotVacuumS10(DeviceInfo),
    /// Ultrasonic humidifier.
    Humidifier(DeviceInfo),
    /// Evaporative humidifier.
    EvaporativeHumidifier(DeviceInfo),
    /// Blind tilt.
    BlindTilt(BlindTilt),
    /// Circulator fan.
    CirculatorFan(DeviceInfo),
    /// Roller shade.
    RollerShade(RollerShade),
    /// Relay switch.
    RelaySwitch(DeviceInfo),
    /// Air purifier.
    AirPurifier(DeviceInfo),
    /// Camera.
    Camera(DeviceInfo),
    /// Bluetooth remote.
    Remote(DeviceInfo),
    /// Unknown model.
    Other(UnknownDevice),
}

impl Device {
    /// Returns the fields shared by every device.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        match self {
            Self::Hub(info)
            | Self::Bot(info)
            | Self::Plug(info)
            | Self::PlugMini(info)
            | Self::Meter(info)
            | Self::OutdoorMeter(info)
            | Self::MotionSensor(info)
            | Self::ContactSensor(info)
            | Self::WaterLeakDetector(info)
            | Self::ColorBulb(info)
            | Self::StripLight(info)
            | Self::CeilingLight(info)
            | Self::RobotVacuum(info)
            | Self::RobotVacuumS10(info)
            | Self::Humidifier(info)
            | Self::EvaporativeHumidifier(info)
            | Self::CirculatorFan(info)
            | Self::RelaySwitch(info)
            | Self::AirPurifier(info)
            | Self::Camera(info)
            | Self::Remote(info) => info,
            Self::Curtain(curtain) => &curtain.info,
            Self::Lock(lock) => &lock.info,
            Self::Keypad(keypad) => &keypad.info,
            Self::BlindTilt(blind) => &blind.info,
            Self::RollerShade(shade) => &shade.info,
            Self::Other(other) => &other.info,
        }
    }

    /// Returns the device id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.info().device_id
    }

    /// Returns the raw `deviceType` string.
    #[must_use]
    pub fn device_type(&self) -> &str {
        &self.info().device_type
    }

    /// Returns the family, or `None` for [`Device::Other`].
    #[must_use]
    pub fn kind(&self) -> Option<DeviceKind> {
        DeviceKind::from_device_type(self.device_type())
    }
}

impl Tagged for Device {
    const DISCRIMINATOR: &'static str = "deviceType";

    fn decode_tagged(tag: &str, entry: Value) -> Result<Self, serde_json::Error> {
        use serde_json::from_value;

        let Some(kind) = DeviceKind::from_device_type(tag) else {
            return from_value(entry).map(Self::Other);
        };

        Ok(match kind {
            DeviceKind::Hub => Self::Hub(from_value(entry)?),
            DeviceKind::Bot => Self::Bot(from_value(entry)?),
            DeviceKind::Curtain => Self::Curtain(from_value(entry)?),
            DeviceKind::Plug => Self::Plug(from_value(entry)?),
            DeviceKind::PlugMini => Self::PlugMini(from_value(entry)?),
            DeviceKind::Meter => Self::Meter(from_value(entry)?),
            DeviceKind::OutdoorMeter => Self::OutdoorMeter(from_value(entry)?),
            DeviceKind::MotionSensor => Self::MotionSensor(from_value(entry)?),
            DeviceKind::ContactSensor => Self::ContactSensor(from_value(entry)?),
            DeviceKind::WaterLeakDetector => Self::WaterLeakDetector(from_value(entry)?),
            DeviceKind::Lock => Self::Lock(from_value(entry)?),
            DeviceKind::Keypad => Self::Keypad(from_value(entry)?),
            DeviceKind::ColorBulb => Self::ColorBulb(from_value(entry)?),
            DeviceKind::StripLight => Self::StripLight(from_value(entry)?),
            DeviceKind::CeilingLight => Self::CeilingLight(from_value(entry)?),
            DeviceKind::RobotVacuum => Self::RobotVacuum(from_value(entry)?),
            DeviceKind::RobotVacuumS10 => Self::RobotVacuumS10(from_value(entry)?),
            DeviceKind::Humidifier => Self::Humidifier(from_value(entry)?),
            DeviceKind::EvaporativeHumidifier => Self::EvaporativeHumidifier(from_value(entry)?),
            DeviceKind::BlindTilt => Self::BlindTilt(from_value(entry)?),
            DeviceKind::CirculatorFan => Self::CirculatorFan(from_value(entry)?),
            DeviceKind::RollerShade => Self::RollerShade(from_value(entry)?),
            DeviceKind::RelaySwitch => Self::RelaySwitch(from_value(entry)?),
            DeviceKind::AirPurifier => Self::AirPurifier(from_value(entry)?),
            DeviceKind::Camera => Self::Camera(from_value(entry)?),
            DeviceKind::Remote => Self::Remote(from_value(entry)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(device_type: &str) -> Value {
        json!({
            "deviceId": "C271111EC0AB",
            "deviceName": "Living room",
            "deviceType": device_type,
            "enableCloudService": true,
            "hubDeviceId": "E2F6032048AB"
        })
    }

    #[test]
    fn every_registered_type_decodes_to_its_kind() {
        for kind in DeviceKind::ALL {
            for device_type in kind.device_types() {
                let mut devices: Vec<Device> = decode_list(vec![entry(device_type)]).unwrap();
                assert_eq!(devices.len(), 1, "{device_type}");
                let device = devices.remove(0);
                assert_eq!(device.kind(), Some(kind), "{device_type}");
                assert_eq!(device.device_type(), *device_type);

                let encoded = serde_json::to_value(&device).unwrap();
                let Value::Object(input) = entry(device_type) else {
                    unreachable!()
                };
                for (key, value) in input {
                    assert_eq!(encoded.get(&key), Some(&value), "{device_type}.{key}");
                }
            }
        }
    }

    #[test]
    fn hub_2_copies_hub_device_id() {
        let device = Device::decode_tagged("Hub 2", entry("Hub 2")).unwrap();
        let Device::Hub(info) = device else {
            panic!("expected hub, got {device:?}");
        };
        assert_eq!(info.hub_device_id.as_deref(), Some("E2F6032048AB"));
        assert!(info.enable_cloud_service);
    }

    #[test]
    fn curtain_keeps_type_specific_fields() {
        let input = json!({
            "deviceId": "E2F6032048AB",
            "deviceName": "Curtain 1",
            "deviceType": "Curtain",
            "enableCloudService": true,
            "hubDeviceId": "FA7310762361",
            "curtainDevicesIds": ["E2F6032048AB", "CD8E11F75B97"],
            "calibrate": true,
            "group": true,
            "master": true,
            "openDirection": "left"
        });
        let device = Device::decode_tagged("Curtain", input.clone()).unwrap();
        let Device::Curtain(curtain) = &device else {
            panic!("expected curtain, got {device:?}");
        };
        assert_eq!(curtain.curtain_device_ids.len(), 2);
        assert!(curtain.calibrate && curtain.group && curtain.master);
        assert_eq!(curtain.open_direction.as_deref(), Some("left"));
        assert_eq!(serde_json::to_value(&device).unwrap(), input);
    }

    #[test]
    fn keypad_decodes_key_list() {
        let input = json!({
            "deviceId": "F7538E1ABCEB",
            "deviceName": "Front door keypad",
            "deviceType": "Keypad Touch",
            "enableCloudService": true,
            "hubDeviceId": "E2F6032048AB",
            "lockDeviceId": "C1AB2367F2D5",
            "keyList": [
                {"id": 11, "name": "Guest", "type": "permanent",
                 "password": "Zbrw...", "iv": "00112233", "status": "normal",
                 "createTime": 1_666_001_516_000_i64}
            ]
        });
        let device = Device::decode_tagged("Keypad Touch", input.clone()).unwrap();
        let Device::Keypad(keypad) = &device else {
            panic!("expected keypad, got {device:?}");
        };
        assert_eq!(keypad.key_list[0].key_type, "permanent");
        assert_eq!(keypad.lock_device_id.as_deref(), Some("C1AB2367F2D5"));
        assert_eq!(serde_json::to_value(&device).unwrap(), input);
    }

    #[test]
    fn unknown_type_keeps_extra_fields() {
        let input = json!({
            "deviceId": "ABC",
            "deviceName": "Future gadget",
            "deviceType": "Teleporter",
            "enableCloudService": false,
            "range": 42,
            "modes": ["near", "far"]
        });
        let device = Device::decode_tagged("Teleporter", input.clone()).unwrap();
        let Device::Other(other) = &device else {
            panic!("expected fallback, got {device:?}");
        };
        assert_eq!(other.info.device_id, "ABC");
        assert_eq!(other.extra.get("range"), Some(&json!(42)));
        assert!(!other.extra.contains_key("deviceId"));
        assert_eq!(device.kind(), None);
        assert_eq!(serde_json::to_value(&device).unwrap(), input);
    }

    #[test]
    fn missing_device_id_fails_variant_decode() {
        let result = Device::decode_tagged("Bot", json!({"deviceType": "Bot"}));
        assert!(result.is_err());
    }
}
