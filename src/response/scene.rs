// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Manual scenes.

use serde::{Deserialize, Serialize};

/// A manual scene configured in the SwitchBot app.
///
/// # Examples
///
/// ```
/// use switchbot_lib::response::Scene;
///
/// let json = r#"{"sceneId": "T01-202009221414-48924101", "sceneName": "Good night"}"#;
/// let scene: Scene = serde_json::from_str(json).unwrap();
/// assert_eq!(scene.scene_name, "Good night");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Scene identifier, used to execute it.
    pub scene_id: String,
    /// Name shown in the app.
    pub scene_name: String,
}
