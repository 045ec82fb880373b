// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response envelope and body types.
//!
//! Every API call answers with the same envelope:
//!
//! ```json
//! {"statusCode": 100, "message": "success", "body": { ... }}
//! ```
//!
//! `statusCode` is an application level code; `100` means success. The shape
//! of `body` depends on the endpoint, so the caller injects a parser per call
//! through [`ApiResponse::parse_with`].

mod scene;
mod status;
mod webhook;

pub use scene::Scene;
pub use status::{
    BotStatus, ContactSensorStatus, CurtainStatus, DeviceStatus, HumidifierStatus, LightStatus,
    LockStatus, MeterStatus, MotionSensorStatus, OtherStatus, PlugMiniStatus, PlugStatus,
    StatusInfo,
};
pub use webhook::{WebhookConfig, WebhookUrls};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, ParseError};

/// `statusCode` reported on success.
pub const STATUS_SUCCESS: i64 = 100;

/// Decoded response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Application level status code, always [`STATUS_SUCCESS`] once parsed.
    pub status_code: i64,
    /// Message passed through from the service.
    pub message: String,
    /// The decoded body.
    pub body: T,
}

/// Response to a device or scene command; the body is rarely meaningful.
pub type CommandResponse = ApiResponse<Value>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    status_code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    body: Value,
}

impl<T> ApiResponse<T> {
    /// Decodes an envelope and hands its body to `parser`.
    ///
    /// # Errors
    ///
    /// - `Error::Parse` if the bytes are not an envelope
    /// - `Error::Api` if `statusCode` is not [`STATUS_SUCCESS`]
    /// - whatever `parser` returns for the body
    pub fn parse_with<F>(bytes: &[u8], parser: F) -> Result<Self, Error>
    where
        F: FnOnce(Value) -> Result<T, Error>,
    {
        let raw: RawEnvelope = serde_json::from_slice(bytes).map_err(ParseError::Json)?;

        if raw.status_code != STATUS_SUCCESS {
            return Err(Error::Api {
                status_code: raw.status_code,
                message: raw.message,
            });
        }

        Ok(Self {
            status_code: raw.status_code,
            message: raw.message,
            body: parser(raw.body)?,
        })
    }

    /// Returns the body, dropping the envelope.
    #[must_use]
    pub fn into_body(self) -> T {
        self.body
    }

    /// Transforms the body, keeping the envelope.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status_code: self.status_code,
            message: self.message,
            body: f(self.body),
        }
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decodes an envelope whose body maps directly onto `T`.
    ///
    /// # Errors
    ///
    /// Same as [`parse_with`](Self::parse_with).
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        Self::parse_with(bytes, json_body)
    }
}

/// Parser decoding the body with serde.
///
/// # Errors
///
/// Returns `Error::Parse` if the body does not match `T`.
pub fn json_body<T: DeserializeOwned>(body: Value) -> Result<T, Error> {
    serde_json::from_value(body).map_err(|e| Error::Parse(ParseError::Json(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_success_envelope() {
        let bytes = br#"{"statusCode":100,"message":"success","body":{"x":1}}"#;
        let response: ApiResponse<Value> = ApiResponse::parse(bytes).unwrap();
        assert_eq!(response.status_code, 100);
        assert_eq!(response.message, "success");
        assert_eq!(response.body["x"], 1);
    }

    #[test]
    fn non_success_status_passes_message_through() {
        let bytes = br#"{"statusCode":161,"message":"device offline","body":{}}"#;
        let err = ApiResponse::<Value>::parse(bytes).unwrap_err();
        match err {
            Error::Api {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 161);
                assert_eq!(message, "device offline");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parser_is_not_called_on_failure() {
        let bytes = br#"{"statusCode":190,"message":"bad","body":{}}"#;
        let result = ApiResponse::<()>::parse_with(bytes, |_| panic!("parser called"));
        assert!(result.is_err());
    }

    #[test]
    fn injected_parser_receives_body() {
        let bytes = br#"{"statusCode":100,"message":"success","body":[1,2,3]}"#;
        let response =
            ApiResponse::parse_with(bytes, |body| Ok(body.as_array().map_or(0, Vec::len))).unwrap();
        assert_eq!(response.body, 3);
    }

    #[test]
    fn missing_body_defaults_to_null() {
        let bytes = br#"{"statusCode":100,"message":"success"}"#;
        let response: ApiResponse<Value> = ApiResponse::parse(bytes).unwrap();
        assert!(response.body.is_null());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = ApiResponse::<Value>::parse(b"<html>").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
    }

    #[test]
    fn map_keeps_envelope() {
        let bytes = br#"{"statusCode":100,"message":"ok","body":5}"#;
        let response: ApiResponse<u32> = ApiResponse::parse(bytes).unwrap();
        let doubled = response.map(|n| n * 2);
        assert_eq!(doubled.message, "ok");
        assert_eq!(doubled.into_body(), 10);
    }
}
