// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Webhook configuration responses.

use serde::{Deserialize, Serialize};

/// Body of a `queryUrl` webhook query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WebhookUrls {
    /// Registered webhook URLs.
    #[serde(default)]
    pub urls: Vec<String>,
}

/// One entry of a `queryDetails` webhook query.
///
/// # Examples
///
/// ```
/// use switchbot_lib::response::WebhookConfig;
///
/// let json = r#"{
///     "url": "https://example.com/hook",
///     "createTime": 123456789,
///     "lastUpdateTime": 123456789,
///     "deviceList": "ALL",
///     "enable": true
/// }"#;
/// let config: WebhookConfig = serde_json::from_str(json).unwrap();
/// assert!(config.enable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfig {
    /// The callback URL.
    pub url: String,
    /// Creation time, epoch milliseconds.
    #[serde(default)]
    pub create_time: i64,
    /// Last update time, epoch milliseconds.
    #[serde(default)]
    pub last_update_time: i64,
    /// Devices reporting to this webhook (`ALL` today).
    #[serde(default)]
    pub device_list: String,
    /// Whether events are delivered.
    pub enable: bool,
}
