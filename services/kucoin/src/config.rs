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

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use crate::constants::*;
use crate::Credential;
use kcsign_core::{utils::Redact, Context};

/// Config carries all the configuration for KuCoin services.
#[derive(Clone, Default)]
pub struct Config {
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`KUCOIN_URL`]
    pub endpoint: Option<String>,
    /// `api_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`KUCOIN_KEY`]
    pub api_key: Option<String>,
    /// `api_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`KUCOIN_SECRET`]
    pub api_secret: Option<String>,
    /// `api_passphrase` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`KUCOIN_PASSPHRASE`]
    pub api_passphrase: Option<String>,
    /// Deadline of a single call, covering connect, send and body read.
    ///
    /// Defaults to 30 seconds. The default reqwest transport adds no deadline
    /// of its own, so this value is the only bound.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set endpoint, for example `https://api.kucoin.com`
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set api_key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set api_secret
    pub fn with_api_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.api_secret = Some(api_secret.into());
        self
    }

    /// Set api_passphrase
    pub fn with_api_passphrase(mut self, api_passphrase: impl Into<String>) -> Self {
        self.api_passphrase = Some(api_passphrase.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(KUCOIN_URL) {
            self.endpoint.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(KUCOIN_KEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(KUCOIN_SECRET) {
            self.api_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(KUCOIN_PASSPHRASE) {
            self.api_passphrase.get_or_insert(v);
        }

        self
    }

    /// Build the credential carried by this config.
    ///
    /// Missing values become empty strings: signing still happens and the
    /// remote side rejects the request.
    pub fn credential(&self) -> Credential {
        Credential::new(
            self.api_key.clone().unwrap_or_default(),
            self.api_secret.clone().unwrap_or_default(),
            self.api_passphrase.clone().unwrap_or_default(),
        )
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(Redact::from))
            .field("api_secret", &self.api_secret.as_ref().map(Redact::from))
            .field(
                "api_passphrase",
                &self.api_passphrase.as_ref().map(Redact::from),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kcsign_core::{SigningCredential, StaticEnv};
    use std::collections::HashMap;

    fn env_ctx() -> Context {
        Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (KUCOIN_URL.to_string(), "https://api.kucoin.com".to_string()),
                (KUCOIN_KEY.to_string(), "env_key".to_string()),
                (KUCOIN_SECRET.to_string(), "env_secret".to_string()),
                (KUCOIN_PASSPHRASE.to_string(), "env_passphrase".to_string()),
            ]),
        })
    }

    #[test]
    fn test_from_env() {
        let config = Config::new().from_env(&env_ctx());

        assert_eq!(config.endpoint.as_deref(), Some("https://api.kucoin.com"));
        assert_eq!(config.api_key.as_deref(), Some("env_key"));
        assert_eq!(config.api_secret.as_deref(), Some("env_secret"));
        assert_eq!(config.api_passphrase.as_deref(), Some("env_passphrase"));
    }

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let config = Config::new()
            .with_api_key("explicit_key")
            .from_env(&env_ctx());

        assert_eq!(config.api_key.as_deref(), Some("explicit_key"));
        assert_eq!(config.api_secret.as_deref(), Some("env_secret"));
    }

    #[test]
    fn test_missing_credential_is_empty_not_error() {
        let cred = Config::new().credential();

        assert_eq!(cred.api_key, "");
        assert!(!cred.is_valid());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new()
            .with_api_key("key-1234567890")
            .with_api_secret("secret-1234567890")
            .with_api_passphrase("my-passphrase-value");

        let out = format!("{config:?}");
        assert!(!out.contains("secret-1234567890"));
        assert!(!out.contains("my-passphrase-value"));
        assert!(!out.contains("key-1234567890"));
    }
}
