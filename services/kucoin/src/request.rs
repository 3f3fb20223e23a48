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

use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};
use log::{debug, log_enabled, trace, Level};
use serde::Serialize;

use crate::constants::*;
use crate::Credential;
use kcsign_core::{Error, Result, Signer};

/// Rewrite `uri` into the form the transport puts on the wire.
///
/// The transport sends the url serialization, which escapes characters like
/// `{` or `"` and resolves `..` segments that `http::Uri` keeps as is. The
/// signature must cover that form.
pub(crate) fn wire_uri(uri: &str) -> Result<Uri> {
    let mut url = url::Url::parse(uri)
        .map_err(|e| Error::request_invalid(format!("url {uri} is not valid")).with_source(e))?;
    url.set_fragment(None);
    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url.as_str().parse()?)
}

/// RequestBuilder assembles one signed outbound request.
///
/// Errors met while collecting headers or encoding the payload are kept and
/// returned by [`RequestBuilder::build`], the first one wins.
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    content_type: Option<HeaderValue>,
    payload: Option<Bytes>,
    error: Option<Error>,
}

impl RequestBuilder {
    /// Create a builder for `method` and a full `uri`.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            content_type: None,
            payload: None,
            error: None,
        }
    }

    /// Append an extra header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            (Err(e), _) => self.fail(e.into()),
            (_, Err(e)) => self.fail(e.into()),
        }
        self
    }

    /// Attach `Authorization: Bearer <token>`.
    pub fn bearer_token(mut self, token: &str) -> Self {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                self.headers.insert(AUTHORIZATION, value);
            }
            Err(e) => self.fail(e.into()),
        }
        self
    }

    /// Set an explicit content type instead of `application/json`.
    pub fn content_type(mut self, content_type: &str) -> Self {
        match HeaderValue::from_str(content_type) {
            Ok(value) => self.content_type = Some(value),
            Err(e) => self.fail(e.into()),
        }
        self
    }

    /// Encode `payload` as json and use it as body.
    pub fn json<P: Serialize + ?Sized>(mut self, payload: &P) -> Self {
        match serde_json::to_vec(payload) {
            Ok(bs) => self.payload = Some(bs.into()),
            Err(e) => self.fail(
                Error::serialization(format!("encode payload as json failed: {e}"))
                    .with_source(e),
            ),
        }
        self
    }

    /// Use pre-encoded bytes as body.
    ///
    /// Pair with [`RequestBuilder::content_type`] for non-json encodings.
    pub fn raw(mut self, body: impl Into<Bytes>) -> Self {
        self.payload = Some(body.into());
        self
    }

    fn fail(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Build the signed request.
    ///
    /// The uri is rewritten into its wire form first, the signature is
    /// computed over exactly what is transmitted.
    pub async fn build(self, signer: &Signer<Credential>) -> Result<http::Request<Bytes>> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let uri = wire_uri(&self.uri.to_string())?;
        let body = self.payload.unwrap_or_default();

        let mut headers = self.headers;
        match self.content_type {
            Some(v) => {
                headers.insert(CONTENT_TYPE, v);
            }
            None => {
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
                }
            }
        }
        headers.insert(API_VERSION, HeaderValue::from_static(API_VERSION_VALUE));

        debug!("build request method={} url={}", self.method, uri);
        if log_enabled!(Level::Trace) && !body.is_empty() {
            trace!("request body={}", String::from_utf8_lossy(&body));
        }

        let mut req = http::Request::new(body);
        *req.method_mut() = self.method;
        *req.uri_mut() = uri;
        *req.headers_mut() = headers;

        let (mut parts, body) = req.into_parts();
        signer.sign(&mut parts).await?;

        Ok(http::Request::from_parts(parts, body))
    }
}
