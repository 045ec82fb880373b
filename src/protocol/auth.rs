// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request signing.
//!
//! Each request carries the token, an epoch-millisecond timestamp, a random
//! nonce and an HMAC-SHA256 signature of `token + timestamp + nonce` keyed by
//! the account secret, base64 encoded and uppercased.

use std::fmt;

use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::ProtocolError;

/// Account credentials from the SwitchBot app's developer options.
#[derive(Clone)]
pub struct Credentials {
    token: String,
    secret: String,
}

impl Credentials {
    /// Creates credentials from an open token and secret key.
    #[must_use]
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// Returns the open token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// The four authentication headers attached to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// The open token, sent as `Authorization`.
    pub token: String,
    /// Epoch milliseconds, sent as `t`.
    pub timestamp: i64,
    /// Random per-request value, sent as `nonce`.
    pub nonce: String,
    /// Uppercased base64 signature, sent as `sign`.
    pub signature: String,
}

impl AuthHeaders {
    /// Header carrying the token.
    pub const AUTHORIZATION: &'static str = "Authorization";
    /// Header carrying the timestamp.
    pub const TIMESTAMP: &'static str = "t";
    /// Header carrying the nonce.
    pub const NONCE: &'static str = "nonce";
    /// Header carrying the signature.
    pub const SIGN: &'static str = "sign";

    /// Signs a new request using the current time and a fresh UUID nonce.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidCredentials` if the secret cannot key
    /// the HMAC.
    pub fn generate(credentials: &Credentials) -> Result<Self, ProtocolError> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let nonce = uuid::Uuid::new_v4().to_string();
        Self::with_nonce(credentials, timestamp, nonce)
    }

    /// Signs a request with an explicit timestamp and nonce.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidCredentials` if the secret cannot key
    /// the HMAC.
    pub fn with_nonce(
        credentials: &Credentials,
        timestamp: i64,
        nonce: impl Into<String>,
    ) -> Result<Self, ProtocolError> {
        let nonce = nonce.into();
        let signature = sign(&credentials.token, &credentials.secret, timestamp, &nonce)?;
        Ok(Self {
            token: credentials.token.clone(),
            timestamp,
            nonce,
            signature,
        })
    }

    /// Returns the headers as `(name, value)` pairs.
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, String); 4] {
        [
            (Self::AUTHORIZATION, self.token.clone()),
            (Self::TIMESTAMP, self.timestamp.to_string()),
            (Self::NONCE, self.nonce.clone()),
            (Self::SIGN, self.signature.clone()),
        ]
    }
}

/// Computes the request signature.
///
/// # Errors
///
/// Returns `ProtocolError::InvalidCredentials` if the secret cannot key the
/// HMAC.
pub fn sign(token: &str, secret: &str, timestamp: i64, nonce: &str) -> Result<String, ProtocolError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|e| ProtocolError::InvalidCredentials(e.to_string()))?;
    mac.update(token.as_bytes());
    mac.update(timestamp.to_string().as_bytes());
    mac.update(nonce.as_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(BASE64_STANDARD.encode(digest).to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_matches_reference() {
        let signature = sign("token-abc", "secret-key", 1_700_000_000_000, "nonce-123").unwrap();
        assert_eq!(signature, "GRVAE/QZLQINWXHS6OKSB6WADISZ37TLVSGKMYCSYHG=");
    }

    #[test]
    fn headers_carry_inputs() {
        let creds = Credentials::new("token-abc", "secret-key");
        let headers = AuthHeaders::with_nonce(&creds, 1_700_000_000_000, "nonce-123").unwrap();
        let pairs = headers.pairs();
        assert_eq!(pairs[0], ("Authorization", "token-abc".to_string()));
        assert_eq!(pairs[1], ("t", "1700000000000".to_string()));
        assert_eq!(pairs[2], ("nonce", "nonce-123".to_string()));
        assert_eq!(pairs[3].1, "GRVAE/QZLQINWXHS6OKSB6WADISZ37TLVSGKMYCSYHG=");
    }

    #[test]
    fn generated_nonces_differ() {
        let creds = Credentials::new("token", "secret");
        let a = AuthHeaders::generate(&creds).unwrap();
        let b = AuthHeaders::generate(&creds).unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert!(a.timestamp > 0);
    }

    #[test]
    fn debug_redacts_secret() {
        let creds = Credentials::new("token", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("token"));
        assert!(!debug.contains("hunter2"));
    }
}
