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

use bytes::Bytes;
use http::header::CONTENT_LENGTH;
use http::StatusCode;
use log::{debug, error, log_enabled, trace, Level};
use serde::de::DeserializeOwned;

use crate::constants::DEFAULT_TIMEOUT;
use kcsign_core::utils::RedactHeaders;
use kcsign_core::{Context, Error, Result};

/// A successfully decoded response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Success<T> {
    /// Status code in `[200, 300)`.
    pub status: StatusCode,
    /// Decoded body, `T::default()` when the body is empty.
    pub value: T,
}

/// Dispatcher executes signed requests and classifies their outcome.
///
/// Every call is independent: no retry, no shared mutable state.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    ctx: Context,
    timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher sending through the http client of `ctx`.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the deadline of one call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the deadline of one call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute `req` and decode a successful body into `T`.
    ///
    /// - Transport failures and an expired deadline return [`kcsign_core::ErrorKind::Transport`].
    /// - Status outside `[200, 300)` returns [`kcsign_core::ErrorKind::Application`] with the raw body.
    /// - A body that doesn't decode into `T` returns [`kcsign_core::ErrorKind::Decode`].
    ///
    /// Dropping the returned future cancels the call.
    pub async fn execute<T>(&self, req: http::Request<Bytes>) -> Result<Success<T>>
    where
        T: DeserializeOwned + Default,
    {
        let method = req.method().clone();
        let uri = req.uri().clone();
        debug!("dispatch method={method} url={uri}");
        debug!("request headers={:?}", RedactHeaders(req.headers()));

        let resp = match tokio::time::timeout(self.timeout, self.ctx.http_send(req)).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(err)) => {
                error!("dispatch method={method} url={uri} failed: {err}");
                return Err(err);
            }
            Err(_) => {
                error!(
                    "dispatch method={method} url={uri} timed out after {:?}",
                    self.timeout
                );
                return Err(Error::transport(format!(
                    "request timed out after {:?}",
                    self.timeout
                )));
            }
        };

        let (parts, body) = resp.into_parts();
        debug!("response method={method} url={uri} status={}", parts.status);
        if log_enabled!(Level::Trace) {
            trace!("response body={}", String::from_utf8_lossy(&body));
        }

        if !parts.status.is_success() {
            return Err(Error::application(parts.status.as_u16(), body));
        }

        if declares_empty_body(&parts.headers) || body.is_empty() {
            return Ok(Success {
                status: parts.status,
                value: T::default(),
            });
        }

        let value = serde_json::from_slice(&body).map_err(|e| {
            error!("decode response of method={method} url={uri} failed: {e}");
            Error::decode(format!("decode response body failed: {e}")).with_source(e)
        })?;

        Ok(Success {
            status: parts.status,
            value,
        })
    }
}

fn declares_empty_body(headers: &http::HeaderMap) -> bool {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        == Some(0)
}
