// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the SwitchBot client.
//!
//! This module provides the error hierarchy used across the library:
//! argument validation, transport, response parsing, device list decoding
//! and schema validation of loosely-typed command parameters.

use std::fmt;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A typed command argument was rejected before any request was sent.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the remote service.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A device list entry could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A loosely-typed command parameter bag failed schema validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The command name is not known for this device family.
    #[error("unknown command {command:?}, expected one of: {}", .valid.join(", "))]
    UnknownCommand {
        /// The rejected command name.
        command: String,
        /// Every command name the device family accepts.
        valid: Vec<&'static str>,
    },

    /// The device family accepts no commands, or its type is unknown.
    #[error("device type {device_type:?} does not accept commands")]
    UnsupportedDevice {
        /// The raw `deviceType` or `remoteType`.
        device_type: String,
    },

    /// The service answered with a non-success `statusCode`.
    #[error("API returned status {status_code}: {message}")]
    Api {
        /// The application level status code (not an HTTP status).
        status_code: i64,
        /// The message passed through from the service.
        message: String,
    },
}

/// Errors raised by the typed command path when an argument is invalid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("{field} value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// The argument that was rejected.
        field: &'static str,
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A value is not part of the accepted set.
    #[error("{field} value {actual:?} should be one of: {}", .allowed.join(", "))]
    NotAllowed {
        /// The argument that was rejected.
        field: &'static str,
        /// The accepted values.
        allowed: Vec<&'static str>,
        /// The actual value that was provided.
        actual: String,
    },

    /// A value has the wrong shape.
    #[error("invalid {field}: {message}")]
    InvalidFormat {
        /// The argument that was rejected.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// An argument required by another argument's value is missing.
    #[error("{field} is required {reason}")]
    Missing {
        /// The missing argument.
        field: &'static str,
        /// Which other argument made it mandatory.
        reason: String,
    },

    /// Two arguments are individually valid but inconsistent.
    #[error("{first} must be before {second}")]
    Ordering {
        /// The argument expected to be smaller.
        first: &'static str,
        /// The argument expected to be larger.
        second: &'static str,
    },
}

/// Errors related to communication with the remote service.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The service's message, or the canonical reason phrase.
        reason: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// An authentication header could not be built.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors related to parsing service responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors raised while decoding a heterogeneous device list.
///
/// A single failing entry aborts the whole list. Every variant carries the
/// position of the offending entry.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The entry is not a JSON object.
    #[error("entry {index} is not an object")]
    NotAnObject {
        /// Position of the entry in the list.
        index: usize,
    },

    /// The discriminator field is absent.
    #[error("entry {index} has no {field} field")]
    MissingDiscriminator {
        /// Position of the entry in the list.
        index: usize,
        /// Name of the discriminator field.
        field: &'static str,
    },

    /// The discriminator field is not a string.
    #[error("entry {index} has a non-string {field} field")]
    InvalidDiscriminator {
        /// Position of the entry in the list.
        index: usize,
        /// Name of the discriminator field.
        field: &'static str,
    },

    /// The entry does not match the layout of its variant.
    #[error("entry {index} ({tag}) could not be decoded: {source}")]
    Variant {
        /// Position of the entry in the list.
        index: usize,
        /// The discriminator value.
        tag: String,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// A single schema violation found in a command parameter bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer of the offending field (`""` for the bag itself).
    pub path: String,
    /// Human readable reason.
    pub reason: String,
}

impl Violation {
    pub(crate) fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

/// Every violation found while validating a command parameter bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the individual violations, in discovery order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns `true` if one of the violations concerns `path`.
    #[must_use]
    pub fn mentions(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid command parameters: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
