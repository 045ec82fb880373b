// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Virtual infrared remotes learned by a hub.
//!
//! Remote ids live in their own namespace and are decoded through the
//! `remoteType` table, never the physical device table.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Tagged;
use super::registry::RemoteKind;

/// Fields shared by every infrared remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteInfo {
    /// Remote identifier, used in command paths.
    pub device_id: String,
    /// Name given in the app.
    #[serde(default)]
    pub device_name: String,
    /// Appliance discriminator.
    pub remote_type: String,
    /// Hub emitting the infrared signals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_device_id: Option<String>,
}

/// A remote whose `remoteType` is not in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownRemote {
    /// Common fields.
    #[serde(flatten)]
    pub info: RemoteInfo,
    /// Every other field of the entry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An infrared remote, one variant per appliance family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InfraredRemote {
    /// Air conditioner.
    AirConditioner(RemoteInfo),
    /// TV, IPTV / streamer, set top box.
    Tv(RemoteInfo),
    /// DVD player or speaker.
    MediaPlayer(RemoteInfo),
    /// Fan.
    Fan(RemoteInfo),
    /// Light.
    Light(RemoteInfo),
    /// Projector.
    Projector(RemoteInfo),
    /// Camera.
    Camera(RemoteInfo),
    /// Air purifier.
    AirPurifier(RemoteInfo),
    /// Water heater.
    WaterHeater(RemoteInfo),
    /// Vacuum cleaner.
    VacuumCleaner(RemoteInfo),
    /// Appliance learned without a template.
    Others(RemoteInfo),
    /// Learned copy of a template.
    Diy(RemoteInfo),
    /// Unknown appliance.
    Other(UnknownRemote),
}

impl InfraredRemote {
    /// Returns the fields shared by every remote.
    #[must_use]
    pub fn info(&self) -> &RemoteInfo {
        match self {
            Self::AirConditioner(info)
            | Self::Tv(info)
            | Self::MediaPlayer(info)
            | Self::Fan(info)
            | Self::Light(info)
            | Self::Projector(info)
            | Self::Camera(info)
            | Self::AirPurifier(info)
            | Self::WaterHeater(info)
            | Self::VacuumCleaner(info)
            | Self::Others(info)
            | Self::Diy(info) => info,
            Self::Other(other) => &other.info,
        }
    }

    /// Returns the remote id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.info().device_id
    }

    /// Returns the raw `remoteType` string.
    #[must_use]
    pub fn remote_type(&self) -> &str {
        &self.info().remote_type
    }

    /// Returns the family, or `None` for [`InfraredRemote::Other`].
    #[must_use]
    pub fn kind(&self) -> Option<RemoteKind> {
        RemoteKind::from_remote_type(self.remote_type())
    }
}

impl Tagged for InfraredRemote {
    const DISCRIMINATOR: &'static str = "remoteType";

    fn decode_tagged(tag: &str, entry: Value) -> Result<Self, serde_json::Error> {
        use serde_json::from_value;

        let Some(kind) = RemoteKind::from_remote_type(tag) else {
            return from_value(entry).map(Self::Other);
        };

        let info: RemoteInfo = from_value(entry)?;
        Ok(match kind {
            RemoteKind::AirConditioner => Self::AirConditioner(info),
            RemoteKind::Tv => Self::Tv(info),
            RemoteKind::MediaPlayer => Self::MediaPlayer(info),
            RemoteKind::Fan => Self::Fan(info),
            RemoteKind::Light => Self::Light(info),
            RemoteKind::Projector => Self::Projector(info),
            RemoteKind::Camera => Self::Camera(info),
            RemoteKind::AirPurifier => Self::AirPurifier(info),
            RemoteKind::WaterHeater => Self::WaterHeater(info),
            RemoteKind::VacuumCleaner => Self::VacuumCleaner(info),
            RemoteKind::Others => Self::Others(info),
            RemoteKind::Diy => Self::Diy(info),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::device::decode_one;

    fn entry(remote_type: &str) -> Value {
        json!({
            "deviceId": "02-202008110034-13",
            "deviceName": "Bedroom",
            "remoteType": remote_type,
            "hubDeviceId": "FA7310762361"
        })
    }

    #[test]
    fn every_registered_type_decodes_to_its_kind() {
        for kind in RemoteKind::ALL {
            for remote_type in kind.remote_types() {
                let remote: InfraredRemote = decode_one(entry(remote_type)).unwrap();
                assert_eq!(remote.kind(), Some(kind), "{remote_type}");
                assert_eq!(serde_json::to_value(&remote).unwrap(), entry(remote_type));
            }
        }
    }

    #[test]
    fn streamer_is_a_tv() {
        let remote = InfraredRemote::decode_tagged("Streamer", entry("Streamer")).unwrap();
        assert!(matches!(remote, InfraredRemote::Tv(_)));
        assert_eq!(remote.remote_type(), "Streamer");
    }

    #[test]
    fn unknown_remote_falls_back() {
        let mut input = entry("Aroma Diffuser");
        input["scent"] = json!("lavender");
        let remote = InfraredRemote::decode_tagged("Aroma Diffuser", input.clone()).unwrap();
        let InfraredRemote::Other(other) = &remote else {
            panic!("expected fallback, got {remote:?}");
        };
        assert_eq!(other.extra.get("scent"), Some(&json!("lavender")));
        assert_eq!(serde_json::to_value(&remote).unwrap(), input);
    }
}
