// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart lock and keypad commands.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::command::{Command, CommandSet, Parameter, structured};
use crate::controller::Controller;
use crate::error::{Error, ValueError};
use crate::protocol::Transport;
use crate::response::CommandResponse;
use crate::schema::{CommandSchema, Constraint};

/// Smart lock commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "command")]
pub enum LockCommand {
    /// Lock the door.
    Lock,
    /// Unlock the door.
    Unlock,
    /// Engage the deadbolt (Lock Pro and Ultra).
    Deadbolt,
}

impl Command for LockCommand {
    fn name(&self) -> String {
        match self {
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Deadbolt => "deadbolt",
        }
        .to_string()
    }
}

impl CommandSet for LockCommand {
    type Args = Self;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            CommandSchema::builder("Smart Lock")
                .commands(&["Lock", "Unlock", "Deadbolt"])
                .build()
        })
    }

    fn from_args(args: Self) -> Result<Self, ValueError> {
        Ok(args)
    }
}

impl<T: Transport> Controller<'_, T, LockCommand> {
    /// Locks the door.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn lock(&self) -> Result<CommandResponse, Error> {
        self.apply(&LockCommand::Lock).await
    }

    /// Unlocks the door.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn unlock(&self) -> Result<CommandResponse, Error> {
        self.apply(&LockCommand::Unlock).await
    }

    /// Engages the deadbolt.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn deadbolt(&self) -> Result<CommandResponse, Error> {
        self.apply(&LockCommand::Deadbolt).await
    }
}

/// Kind of keypad passcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyType {
    /// Valid until deleted.
    Permanent,
    /// Valid between a start and an end time.
    TimeLimit,
    /// Valid once within a time window.
    Disposable,
    /// Emergency code.
    Urgent,
}

impl KeyType {
    /// Every accepted wire value.
    pub const ALLOWED: [&'static str; 4] = ["permanent", "timeLimit", "disposable", "urgent"];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permanent => "permanent",
            Self::TimeLimit => "timeLimit",
            Self::Disposable => "disposable",
            Self::Urgent => "urgent",
        }
    }

    /// Returns `true` if the key needs a validity window.
    #[must_use]
    pub const fn is_timed(self) -> bool {
        matches!(self, Self::TimeLimit | Self::Disposable)
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keypad and Keypad Touch commands.
///
/// # Examples
///
/// ```
/// use switchbot_lib::command::{KeyType, KeypadCommand};
///
/// let key = KeypadCommand::create_key("Guest", KeyType::TimeLimit, "12345678", Some(1_700_000_000), Some(1_700_086_400));
/// assert!(key.is_ok());
///
/// let backwards = KeypadCommand::create_key("Guest", KeyType::TimeLimit, "12345678", Some(1_700_086_400), Some(1_700_000_000));
/// assert!(backwards.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypadCommand {
    /// Add a passcode.
    CreateKey {
        /// Label shown in the app.
        name: String,
        /// Passcode kind.
        key_type: KeyType,
        /// 6 to 12 digits.
        password: String,
        /// Validity window in epoch seconds, timed keys only.
        window: Option<(i64, i64)>,
    },
    /// Remove a passcode.
    DeleteKey {
        /// Passcode id reported by the keypad.
        id: u64,
    },
}

impl KeypadCommand {
    /// Creates a `createKey` command.
    ///
    /// The validity window is required for `timeLimit` and `disposable`
    /// keys and ignored otherwise.
    ///
    /// # Errors
    ///
    /// - `ValueError::InvalidFormat` for an empty name or a password that is
    ///   not 6 to 12 digits
    /// - `ValueError::Missing` if a timed key lacks a start or end time
    /// - `ValueError::Ordering` if the start time is not before the end time
    pub fn create_key(
        name: impl Into<String>,
        key_type: KeyType,
        password: impl Into<String>,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Self, ValueError> {
        let name = name.into();
        let password = password.into();

        if name.trim().is_empty() {
            return Err(ValueError::InvalidFormat {
                field: "name",
                message: "must not be empty".to_string(),
            });
        }
        if !(6..=12).contains(&password.len()) || !password.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValueError::InvalidFormat {
                field: "password",
                message: "must be 6 to 12 digits".to_string(),
            });
        }

        let window = if key_type.is_timed() {
            let reason = || format!("when type is {key_type}");
            let start = start_time.ok_or_else(|| ValueError::Missing {
                field: "startTime",
                reason: reason(),
            })?;
            let end = end_time.ok_or_else(|| ValueError::Missing {
                field: "endTime",
                reason: reason(),
            })?;
            if start >= end {
                return Err(ValueError::Ordering {
                    first: "startTime",
                    second: "endTime",
                });
            }
            Some((start, end))
        } else {
            None
        };

        Ok(Self::CreateKey {
            name,
            key_type,
            password,
            window,
        })
    }
}

/// Parameter bag layout of [`KeypadCommand`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all_fields = "camelCase")]
pub enum KeypadParams {
    /// `{"command": "CreateKey", "name", "type", "password", "startTime"?, "endTime"?}`
    CreateKey {
        /// Label.
        name: String,
        /// Passcode kind.
        #[serde(rename = "type")]
        key_type: KeyType,
        /// Digits.
        password: String,
        /// Epoch seconds.
        start_time: Option<i64>,
        /// Epoch seconds.
        end_time: Option<i64>,
    },
    /// `{"command": "DeleteKey", "id": 11}`
    DeleteKey {
        /// Passcode id.
        id: u64,
    },
}

impl Command for KeypadCommand {
    fn name(&self) -> String {
        match self {
            Self::CreateKey { .. } => "createKey",
            Self::DeleteKey { .. } => "deleteKey",
        }
        .to_string()
    }

    fn parameter(&self) -> Parameter {
        match self {
            Self::CreateKey {
                name,
                key_type,
                password,
                window: None,
            } => structured([
                ("name", json!(name)),
                ("type", json!(key_type)),
                ("password", json!(password)),
            ]),
            Self::CreateKey {
                name,
                key_type,
                password,
                window: Some((start, end)),
            } => structured([
                ("name", json!(name)),
                ("type", json!(key_type)),
                ("password", json!(password)),
                ("startTime", json!(start)),
                ("endTime", json!(end)),
            ]),
            Self::DeleteKey { id } => structured([("id", json!(id))]),
        }
    }
}

impl CommandSet for KeypadCommand {
    type Args = KeypadParams;

    fn schema() -> &'static CommandSchema {
        static SCHEMA: OnceLock<CommandSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            let epoch = Constraint::Integer {
                minimum: Some(0),
                maximum: None,
            };
            CommandSchema::builder("Keypad")
                .commands(&["CreateKey", "DeleteKey"])
                .field(
                    "name",
                    Constraint::String {
                        allowed: None,
                        pattern: None,
                        min_length: Some(1),
                        max_length: None,
                    },
                )
                .one_of("type", &KeyType::ALLOWED)
                .pattern("password", r"^\d{6,12}$")
                .field("startTime", epoch.clone())
                .field("endTime", epoch.clone())
                .field("id", epoch)
                .require_when(&["CreateKey"], &["name", "type", "password"])
                .require_when(&["DeleteKey"], &["id"])
                .build()
        })
    }

    fn from_args(args: KeypadParams) -> Result<Self, ValueError> {
        match args {
            KeypadParams::CreateKey {
                name,
                key_type,
                password,
                start_time,
                end_time,
            } => Self::create_key(name, key_type, password, start_time, end_time),
            KeypadParams::DeleteKey { id } => Ok(Self::DeleteKey { id }),
        }
    }
}

impl<T: Transport> Controller<'_, T, KeypadCommand> {
    /// Adds a passcode.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the key is invalid (see
    /// [`KeypadCommand::create_key`]), or error if the command fails.
    pub async fn create_key(
        &self,
        name: &str,
        key_type: KeyType,
        password: &str,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<CommandResponse, Error> {
        let command = KeypadCommand::create_key(name, key_type, password, start_time, end_time)?;
        self.apply(&command).await
    }

    /// Removes a passcode.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn delete_key(&self, id: u64) -> Result<CommandResponse, Error> {
        self.apply(&KeypadCommand::DeleteKey { id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_validated;

    #[test]
    fn lock_names() {
        assert_eq!(LockCommand::Unlock.name(), "unlock");
        let cmd: LockCommand = parse_validated(&json!({"command": "Deadbolt"})).unwrap();
        assert_eq!(cmd, LockCommand::Deadbolt);
    }

    #[test]
    fn permanent_key_omits_window() {
        let cmd: KeypadCommand = parse_validated(&json!({
            "command": "CreateKey",
            "name": "Family",
            "type": "permanent",
            "password": "20240101"
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(cmd.parameter()).unwrap(),
            json!({"name": "Family", "type": "permanent", "password": "20240101"})
        );
    }

    #[test]
    fn timed_key_requires_window() {
        let err = parse_validated::<KeypadCommand>(&json!({
            "command": "CreateKey",
            "name": "Cleaner",
            "type": "timeLimit",
            "password": "123456",
            "startTime": 1_700_000_000
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::Missing { field: "endTime", .. })));
    }

    #[test]
    fn window_must_be_ordered() {
        let err = parse_validated::<KeypadCommand>(&json!({
            "command": "CreateKey",
            "name": "Cleaner",
            "type": "disposable",
            "password": "123456",
            "startTime": 1_700_000_000,
            "endTime": 1_700_000_000
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::Ordering { .. })));
    }

    #[test]
    fn password_pattern_is_checked_by_schema() {
        let err = parse_validated::<KeypadCommand>(&json!({
            "command": "CreateKey",
            "name": "Guest",
            "type": "urgent",
            "password": "12a456"
        }))
        .unwrap_err();
        let Error::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert!(violations.mentions("/password"));
    }

    #[test]
    fn typed_path_checks_password_too() {
        assert!(KeypadCommand::create_key("Guest", KeyType::Urgent, "12345", None, None).is_err());
        assert!(KeypadCommand::create_key("Guest", KeyType::Urgent, "1234567890123", None, None).is_err());
        assert!(KeypadCommand::create_key("Guest", KeyType::Urgent, "123456", None, None).is_ok());
    }

    #[test]
    fn delete_key_parameter() {
        let cmd: KeypadCommand = parse_validated(&json!({"command": "DeleteKey", "id": 11})).unwrap();
        assert_eq!(
            serde_json::to_string(&cmd.to_request()).unwrap(),
            r#"{"commandType":"command","command":"deleteKey","parameter":{"id":11}}"#
        );
    }
}
