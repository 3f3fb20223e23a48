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

use std::mem;

use http::HeaderMap;
use http::Method;

/// Signing context for request.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP path.
    pub path: String,
    /// Raw HTTP query, without the leading `?`.
    pub query: Option<String>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Self {
        let (path, query) = match parts.uri.path_and_query() {
            Some(paq) => (
                paq.path().to_string(),
                paq.query().filter(|q| !q.is_empty()).map(str::to_string),
            ),
            None => ("/".to_string(), None),
        };

        SigningRequest {
            method: parts.method.clone(),
            path,
            query,

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        }
    }

    /// Apply the signing context back to http::request::Parts.
    ///
    /// Only headers are written back, method and uri are never modified by signing.
    pub fn apply(mut self, parts: &mut http::request::Parts) {
        mem::swap(&mut parts.headers, &mut self.headers);
    }

    /// The endpoint as transmitted: path plus `?query` when a query is present.
    ///
    /// ```shell
    /// /api/v1/withdrawals/quotas + currency=USDT => /api/v1/withdrawals/quotas?currency=USDT
    /// ```
    pub fn endpoint(&self) -> String {
        match &self.query {
            Some(q) => {
                let mut s = String::with_capacity(self.path.len() + q.len() + 1);
                s.push_str(&self.path);
                s.push('?');
                s.push_str(q);
                s
            }
            None => self.path.clone(),
        }
    }
}
