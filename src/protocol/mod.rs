// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the SwitchBot cloud API.
//!
//! Every request is signed with the account token and secret (see
//! [`AuthHeaders`]) and returns the raw response bytes. Decoding the
//! `{statusCode, message, body}` envelope is left to the caller so a parser
//! can be chosen per endpoint.
//!
//! # Transports
//!
//! - [`HttpClient`]: reqwest-based HTTPS transport (feature `http`)
//!
//! Any type implementing [`Transport`] can be handed to
//! [`Client::with_transport`](crate::Client::with_transport), which is how
//! tests plug in recording doubles.

mod auth;
#[cfg(feature = "http")]
mod http;

pub use auth::{AuthHeaders, Credentials, sign};
#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use crate::error::ProtocolError;

/// A signed request/response channel to the remote service.
///
/// `path` is relative to the versioned API prefix, e.g. `/devices`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Performs a GET request and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be completed.
    async fn get(&self, path: &str) -> Result<Vec<u8>, ProtocolError>;

    /// Performs a POST request with a JSON body and returns the raw response
    /// body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be completed.
    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, ProtocolError>;
}
