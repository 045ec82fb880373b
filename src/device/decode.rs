// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polymorphic decoding of device lists.

use serde::Serialize;
use serde_json::Value;

use super::{Device, InfraredRemote};
use crate::error::{DecodeError, Error, ParseError};

/// A sum type decoded from JSON objects carrying a string discriminator.
pub trait Tagged: Sized {
    /// Name of the discriminator field.
    const DISCRIMINATOR: &'static str;

    /// Decodes one entry whose discriminator is `tag`.
    ///
    /// Unknown tags must decode into a fallback variant rather than fail.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the entry does not fit the selected variant.
    fn decode_tagged(tag: &str, entry: Value) -> Result<Self, serde_json::Error>;
}

/// Decodes a heterogeneous list, preserving order.
///
/// The first entry that is not an object, lacks the discriminator, carries a
/// non-string discriminator or does not fit its variant aborts the whole
/// list.
///
/// # Errors
///
/// Returns `DecodeError` naming the index of the failing entry.
///
/// # Examples
///
/// ```
/// use switchbot_lib::device::{Device, decode_list};
/// use serde_json::json;
///
/// let devices: Vec<Device> = decode_list(vec![
///     json!({"deviceId": "1", "deviceType": "Bot"}),
///     json!({"deviceId": "2", "deviceType": "Color Bulb"}),
/// ])
/// .unwrap();
/// assert!(matches!(devices[1], Device::ColorBulb(_)));
///
/// let err = decode_list::<Device>(vec![json!({"deviceId": "3"})]).unwrap_err();
/// assert_eq!(err.to_string(), "entry 0 has no deviceType field");
/// ```
pub fn decode_list<D: Tagged>(entries: Vec<Value>) -> Result<Vec<D>, DecodeError> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| decode_entry(index, entry))
        .collect()
}

/// Decodes a single tagged object, e.g. a status body.
///
/// # Errors
///
/// Same as [`decode_list`], reported at index 0.
pub fn decode_one<D: Tagged>(entry: Value) -> Result<D, DecodeError> {
    decode_entry(0, entry)
}

fn decode_entry<D: Tagged>(index: usize, entry: Value) -> Result<D, DecodeError> {
    let Value::Object(fields) = &entry else {
        return Err(DecodeError::NotAnObject { index });
    };

    let tag = match fields.get(D::DISCRIMINATOR) {
        None => {
            return Err(DecodeError::MissingDiscriminator {
                index,
                field: D::DISCRIMINATOR,
            });
        }
        Some(Value::String(tag)) => tag.clone(),
        Some(_) => {
            return Err(DecodeError::InvalidDiscriminator {
                index,
                field: D::DISCRIMINATOR,
            });
        }
    };

    D::decode_tagged(&tag, entry).map_err(|source| DecodeError::Variant { index, tag, source })
}

/// Body of the device list endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceList {
    /// Physical devices, in service order.
    pub device_list: Vec<Device>,
    /// Infrared remotes, in service order.
    pub infrared_remote_list: Vec<InfraredRemote>,
}

impl DeviceList {
    /// Parser for the device list body.
    ///
    /// The two lists are decoded independently through their own tables; a
    /// missing list is treated as empty.
    ///
    /// # Errors
    ///
    /// - `Error::Parse` if the body is not an object or a list is not an array
    /// - `Error::Decode` if an entry cannot be decoded
    pub fn from_body(body: Value) -> Result<Self, Error> {
        let Value::Object(mut fields) = body else {
            return Err(ParseError::UnexpectedFormat("device list body is not an object".into()).into());
        };

        let devices = take_array(&mut fields, "deviceList")?;
        let remotes = take_array(&mut fields, "infraredRemoteList")?;

        Ok(Self {
            device_list: decode_list(devices)?,
            infrared_remote_list: decode_list(remotes)?,
        })
    }

    /// Finds a physical device by id.
    #[must_use]
    pub fn device(&self, device_id: &str) -> Option<&Device> {
        self.device_list.iter().find(|d| d.device_id() == device_id)
    }

    /// Finds an infrared remote by id.
    #[must_use]
    pub fn remote(&self, device_id: &str) -> Option<&InfraredRemote> {
        self.infrared_remote_list
            .iter()
            .find(|r| r.device_id() == device_id)
    }
}

fn take_array(
    fields: &mut serde_json::Map<String, Value>,
    name: &str,
) -> Result<Vec<Value>, ParseError> {
    match fields.remove(name) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => Ok(entries),
        Some(_) => Err(ParseError::UnexpectedFormat(format!("{name} is not an array"))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::device::{DeviceKind, RemoteKind};

    #[test]
    fn order_is_preserved() {
        let types = ["Curtain", "Bot", "Hub Mini", "Teleporter", "Color Bulb", "Meter"];
        let entries = types
            .iter()
            .enumerate()
            .map(|(i, t)| json!({"deviceId": i.to_string(), "deviceType": t}))
            .collect();

        let devices: Vec<Device> = decode_list(entries).unwrap();

        assert_eq!(devices.len(), types.len());
        for (i, (device, device_type)) in devices.iter().zip(types).enumerate() {
            assert_eq!(device.device_id(), i.to_string());
            assert_eq!(device.device_type(), device_type);
        }
        assert_eq!(devices[0].kind(), Some(DeviceKind::Curtain));
        assert!(matches!(devices[3], Device::Other(_)));
    }

    #[test]
    fn unknown_type_does_not_fail_batch() {
        let devices: Vec<Device> = decode_list(vec![
            json!({"deviceId": "1", "deviceType": "Quantum Toaster"}),
            json!({"deviceId": "2", "deviceType": "Bot"}),
        ])
        .unwrap();
        assert!(matches!(devices[0], Device::Other(_)));
        assert!(matches!(devices[1], Device::Bot(_)));
    }

    #[test]
    fn non_object_entry_aborts_batch() {
        let err = decode_list::<Device>(vec![
            json!({"deviceId": "1", "deviceType": "Bot"}),
            json!("Bot"),
        ])
        .unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject { index: 1 }));
    }

    #[test]
    fn non_string_discriminator_aborts_batch() {
        let err =
            decode_list::<Device>(vec![json!({"deviceId": "1", "deviceType": 7})]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidDiscriminator {
                index: 0,
                field: "deviceType"
            }
        ));
    }

    #[test]
    fn remotes_use_their_own_discriminator() {
        let err = decode_list::<InfraredRemote>(vec![
            json!({"deviceId": "1", "deviceType": "TV"}),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingDiscriminator {
                field: "remoteType",
                ..
            }
        ));
    }

    #[test]
    fn variant_mismatch_reports_index_and_tag() {
        let err = decode_list::<Device>(vec![
            json!({"deviceId": "1", "deviceType": "Bot"}),
            json!({"deviceId": "2", "deviceType": "Curtain", "calibrate": "yes"}),
        ])
        .unwrap_err();
        match err {
            DecodeError::Variant { index, tag, .. } => {
                assert_eq!(index, 1);
                assert_eq!(tag, "Curtain");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn device_list_decodes_both_lists_independently() {
        let body = json!({
            "deviceList": [
                {"deviceId": "500291B269BE", "deviceName": "Office Hub",
                 "deviceType": "Hub 2", "enableCloudService": false,
                 "hubDeviceId": "000000000000"}
            ],
            "infraredRemoteList": [
                {"deviceId": "02-202008110034-13", "deviceName": "Office AC",
                 "remoteType": "Air Conditioner", "hubDeviceId": "500291B269BE"},
                {"deviceId": "500291B269BE", "deviceName": "Same id, other namespace",
                 "remoteType": "Light", "hubDeviceId": "500291B269BE"}
            ]
        });

        let list = DeviceList::from_body(body).unwrap();

        assert_eq!(list.device_list.len(), 1);
        assert_eq!(list.infrared_remote_list.len(), 2);
        assert_eq!(list.infrared_remote_list[0].kind(), Some(RemoteKind::AirConditioner));
        assert!(matches!(list.device("500291B269BE"), Some(Device::Hub(_))));
        assert!(matches!(
            list.remote("500291B269BE"),
            Some(InfraredRemote::Light(_))
        ));
    }

    #[test]
    fn device_list_tolerates_missing_lists() {
        let list = DeviceList::from_body(json!({})).unwrap();
        assert!(list.device_list.is_empty());
        assert!(list.infrared_remote_list.is_empty());
    }

    #[test]
    fn device_list_rejects_non_array() {
        let err = DeviceList::from_body(json!({"deviceList": {}})).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::UnexpectedFormat(_))));
    }
}
