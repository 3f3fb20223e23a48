// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! KuCoin request signer
use async_trait::async_trait;
use http::HeaderValue;
use log::debug;

use crate::constants::*;
use crate::credential::Credential;
use kcsign_core::hash::{base64_encode, hmac_sha256};
use kcsign_core::time::{now, timestamp_millis, DateTime};
use kcsign_core::{Context, Result, SignRequest, SigningRequest};

/// Metadata of one request that goes into its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureInput<'a> {
    /// Milliseconds since unix epoch, the same value sent in `KC-API-TIMESTAMP`.
    pub timestamp_millis: i64,
    /// Upper-case http verb.
    pub method: &'a str,
    /// Path plus `?query` when the request has a query.
    pub endpoint: &'a str,
}

impl SignatureInput<'_> {
    /// Construct string to sign
    ///
    /// ## Format
    ///
    /// ```text
    /// timestamp + METHOD + path + ["?" + query]
    /// ```
    pub fn string_to_sign(&self) -> String {
        format!("{}{}{}", self.timestamp_millis, self.method, self.endpoint)
    }
}

/// Compute the raw HMAC-SHA256 signature of `input` keyed by `secret`.
pub fn compute_signature(secret: &str, input: &SignatureInput<'_>) -> Vec<u8> {
    hmac_sha256(secret.as_bytes(), input.string_to_sign().as_bytes())
}

/// Compute the raw digest sent as `KC-API-PASSPHRASE` for key version 2.
///
/// The passphrase is signed with the account secret.
pub fn encode_passphrase(secret: &str, passphrase: &str) -> Vec<u8> {
    hmac_sha256(secret.as_bytes(), passphrase.as_bytes())
}

/// RequestSigner that implement KuCoin API key version 2 authentication.
///
/// - [Authentication](https://www.kucoin.com/docs/basic-info/connection-method/authentication/creating-a-request)
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a signer.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        parts: &mut http::request::Parts,
        cred: &Self::Credential,
    ) -> Result<()> {
        // Sampled once, every header below must agree on it.
        let timestamp = timestamp_millis(self.time.unwrap_or_else(now));

        let mut req = SigningRequest::build(parts);
        let endpoint = req.endpoint();
        let input = SignatureInput {
            timestamp_millis: timestamp,
            method: req.method.as_str(),
            endpoint: &endpoint,
        };
        debug!(
            "signing method={} endpoint={} timestamp={}",
            input.method, input.endpoint, input.timestamp_millis
        );

        let signature = base64_encode(&compute_signature(&cred.api_secret, &input));
        let passphrase = base64_encode(&encode_passphrase(&cred.api_secret, &cred.api_passphrase));

        req.headers.insert(KC_API_SIGN, sensitive(&signature)?);
        req.headers.insert(KC_API_PASSPHRASE, sensitive(&passphrase)?);
        req.headers.insert(KC_API_KEY, sensitive(&cred.api_key)?);
        req.headers
            .insert(KC_API_TIMESTAMP, HeaderValue::from(timestamp));
        req.headers
            .insert(KC_API_KEY_VERSION, HeaderValue::from_static(KEY_VERSION));

        req.apply(parts);
        Ok(())
    }
}

fn sensitive(v: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(v)?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn fixed_time() -> DateTime {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn input(endpoint: &str) -> SignatureInput<'_> {
        SignatureInput {
            timestamp_millis: 1_700_000_000_000,
            method: "GET",
            endpoint,
        }
    }

    #[test]
    fn test_string_to_sign() {
        assert_eq!(
            input("/api/v1/withdrawals/quotas?currency=USDT").string_to_sign(),
            "1700000000000GET/api/v1/withdrawals/quotas?currency=USDT"
        );
    }

    #[test]
    fn test_compute_signature_is_deterministic() {
        let i = input("/api/v1/withdrawals/quotas?currency=USDT");
        assert_eq!(compute_signature("secret", &i), compute_signature("secret", &i));
        assert_eq!(
            base64_encode(&compute_signature("secret", &i)),
            "BQNiCxLh3IbClK5KG4rlbZe81tAkOLQ6WTCR6NHuGuY="
        );
    }

    #[test_case("other", 1_700_000_000_000, "GET", "/api/v1/withdrawals/quotas?currency=USDT"; "secret")]
    #[test_case("secret", 1_700_000_000_001, "GET", "/api/v1/withdrawals/quotas?currency=USDT"; "timestamp")]
    #[test_case("secret", 1_700_000_000_000, "POST", "/api/v1/withdrawals/quotas?currency=USDT"; "method")]
    #[test_case("secret", 1_700_000_000_000, "GET", "/api/v1/withdrawals/quotas?currency=BTC"; "endpoint")]
    fn test_signature_changes_with_any_input(
        secret: &str,
        timestamp_millis: i64,
        method: &str,
        endpoint: &str,
    ) {
        let base = compute_signature("secret", &input("/api/v1/withdrawals/quotas?currency=USDT"));
        let changed = compute_signature(
            secret,
            &SignatureInput {
                timestamp_millis,
                method,
                endpoint,
            },
        );

        assert_ne!(base, changed);
    }

    #[test]
    fn test_encode_passphrase() {
        assert_eq!(
            base64_encode(&encode_passphrase("secret", "passphrase")),
            "sWd5rQWAxDzYJTY6K2sov6seA0l3uNP70anWxITg8IA="
        );
    }

    #[tokio::test]
    async fn test_sign() -> anyhow::Result<()> {
        let signer = RequestSigner::new().with_time(fixed_time());
        let cred = Credential::new("key", "secret", "passphrase");

        let (mut parts, _) = http::Request::get(
            "https://api.kucoin.com/api/v1/withdrawals/quotas?currency=USDT",
        )
        .body(())?
        .into_parts();

        signer
            .sign_request(&Context::new(), &mut parts, &cred)
            .await?;

        let headers = parts.headers;
        assert_eq!(
            headers.get("KC-API-SIGN").unwrap().to_str()?,
            "BQNiCxLh3IbClK5KG4rlbZe81tAkOLQ6WTCR6NHuGuY="
        );
        assert_eq!(
            headers.get("KC-API-PASSPHRASE").unwrap().to_str()?,
            "sWd5rQWAxDzYJTY6K2sov6seA0l3uNP70anWxITg8IA="
        );
        assert_eq!(headers.get("KC-API-KEY").unwrap().to_str()?, "key");
        assert_eq!(
            headers.get("KC-API-TIMESTAMP").unwrap().to_str()?,
            "1700000000000"
        );
        assert_eq!(headers.get("KC-API-KEY-VERSION").unwrap().to_str()?, "2");
        assert!(headers.get("KC-API-SIGN").unwrap().is_sensitive());
        assert!(headers.get("KC-API-PASSPHRASE").unwrap().is_sensitive());

        // Signing never touches what is transmitted.
        assert_eq!(
            parts.uri.path_and_query().unwrap().as_str(),
            "/api/v1/withdrawals/quotas?currency=USDT"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_with_empty_credential() -> anyhow::Result<()> {
        let signer = RequestSigner::new().with_time(fixed_time());
        let (mut parts, _) = http::Request::get("https://api.kucoin.com/api/v1/accounts")
            .body(())?
            .into_parts();

        signer
            .sign_request(&Context::new(), &mut parts, &Credential::default())
            .await?;

        assert_eq!(parts.headers.get("KC-API-KEY").unwrap().to_str()?, "");
        assert!(parts.headers.contains_key("KC-API-SIGN"));
        Ok(())
    }
}
