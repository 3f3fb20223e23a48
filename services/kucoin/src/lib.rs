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

//! KuCoin signing and dispatch for kcsign.
//!
//! ## Overview
//!
//! KuCoin authenticates every private call with an HMAC-SHA256 signature over
//! `timestamp + METHOD + path[?query]` keyed by the API secret, sent along
//! with the key, the signed passphrase, the timestamp and the key version.
//!
//! - [`RequestSigner`] computes and attaches those headers.
//! - [`RequestBuilder`] encodes the payload, sets content type and api version, then signs.
//! - [`Dispatcher`] sends, reads the whole body and classifies the outcome.
//! - [`Client`] exposes one method per operation on top of them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use kcsign_core::{Context, OsEnv};
//! use kcsign_http_send_reqwest::ReqwestHttpSend;
//! use kcsign_kucoin::{Client, Config, GetWithdrawalsQuotaRequest};
//!
//! #[tokio::main]
//! async fn main() -> kcsign_core::Result<()> {
//!     let ctx = Context::new()
//!         .with_env(OsEnv)
//!         .with_http_send(ReqwestHttpSend::default());
//!
//!     // Reads KUCOIN_URL, KUCOIN_KEY, KUCOIN_SECRET and KUCOIN_PASSPHRASE.
//!     let config = Config::new().from_env(&ctx);
//!     let client = Client::new(ctx, config)?;
//!
//!     let quota = client
//!         .get_withdrawals_quota(&GetWithdrawalsQuotaRequest::new("USDT"))
//!         .await?;
//!     println!("{quota:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every failure is returned as [`kcsign_core::Error`]; use its
//! [`kind`](kcsign_core::Error::kind) to tell transport, application and
//! decode failures apart. Application errors keep the raw response body.

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{compute_signature, encode_passphrase, RequestSigner, SignatureInput};

mod request;
pub use request::RequestBuilder;

mod dispatch;
pub use dispatch::{Dispatcher, Success};

mod client;
pub use client::Client;

mod types;
pub use types::*;
