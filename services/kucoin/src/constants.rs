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

use std::time::Duration;

use http::HeaderName;

// Headers used in kucoin services.
pub const KC_API_SIGN: HeaderName = HeaderName::from_static("kc-api-sign");
pub const KC_API_PASSPHRASE: HeaderName = HeaderName::from_static("kc-api-passphrase");
pub const KC_API_KEY: HeaderName = HeaderName::from_static("kc-api-key");
pub const KC_API_TIMESTAMP: HeaderName = HeaderName::from_static("kc-api-timestamp");
pub const KC_API_KEY_VERSION: HeaderName = HeaderName::from_static("kc-api-key-version");
pub const API_VERSION: HeaderName = HeaderName::from_static("api-version");

// Header values.
pub const KEY_VERSION: &str = "2";
pub const API_VERSION_VALUE: &str = "1.0";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// Env values used in kucoin services.
pub const KUCOIN_URL: &str = "KUCOIN_URL";
pub const KUCOIN_KEY: &str = "KUCOIN_KEY";
pub const KUCOIN_SECRET: &str = "KUCOIN_SECRET";
pub const KUCOIN_PASSPHRASE: &str = "KUCOIN_PASSPHRASE";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Paths of supported operations.
pub const PATH_WITHDRAWALS_QUOTAS: &str = "/api/v1/withdrawals/quotas";
pub const PATH_ACCOUNTS: &str = "/api/v1/accounts";
