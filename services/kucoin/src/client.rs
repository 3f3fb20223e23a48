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

use http::uri::{Authority, Scheme};
use http::{Method, Uri};
use log::debug;
use serde::de::DeserializeOwned;

use crate::constants::*;
use crate::types::*;
use crate::request::wire_uri;
use crate::{Config, Credential, Dispatcher, RequestBuilder, RequestSigner};
use kcsign_core::{Context, Error, Result, Signer};

/// Client binds an endpoint, a signer and a dispatcher.
///
/// Every operation goes through [`Client::send`], so all of them share the
/// same signing and dispatch path. `Client` is cheap to clone and safe to
/// share between tasks.
#[derive(Debug, Clone)]
pub struct Client {
    scheme: Scheme,
    authority: Authority,
    base_path: String,
    signer: Signer<Credential>,
    dispatcher: Dispatcher,
}

impl Client {
    /// Create a client from `config`, sending through the http client of `ctx`.
    ///
    /// Returns [`kcsign_core::ErrorKind::ConfigInvalid`] when the endpoint is
    /// missing or isn't an absolute url.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("endpoint is required"))?;

        let uri: Uri = endpoint.parse().map_err(|e| {
            Error::config_invalid(format!("endpoint {endpoint} is not a valid url")).with_source(e)
        })?;
        let parts = uri.into_parts();
        let (Some(scheme), Some(authority)) = (parts.scheme, parts.authority) else {
            return Err(Error::config_invalid(format!(
                "endpoint {endpoint} must contain scheme and host"
            )));
        };
        let base_path = parts
            .path_and_query
            .map(|paq| paq.path().trim_end_matches('/').to_string())
            .unwrap_or_default();

        let dispatcher = Dispatcher::new(ctx.clone())
            .with_timeout(config.timeout.unwrap_or(DEFAULT_TIMEOUT));
        let signer = Signer::new(ctx, config.credential(), RequestSigner::new());

        debug!("kucoin client created with config {config:?}");
        Ok(Self {
            scheme,
            authority,
            base_path,
            signer,
            dispatcher,
        })
    }

    /// Override the deadline of each call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.dispatcher = self.dispatcher.with_timeout(timeout);
        self
    }

    /// Full url of `path` with the given query pairs, in order.
    ///
    /// The url is returned in the form it is sent on the wire.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Uri> {
        let mut s = format!("{}://{}{}", self.scheme, self.authority, self.base_path);
        if !path.starts_with('/') {
            s.push('/');
        }
        s.push_str(path);

        if !query.is_empty() {
            s.push('?');
            s.push_str(
                &form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(query)
                    .finish(),
            );
        }

        wire_uri(&s)
    }

    /// Start a request for `method` on `path` with `query`.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RequestBuilder> {
        Ok(RequestBuilder::new(method, self.url(path, query)?))
    }

    /// Sign, dispatch and decode.
    pub async fn send<T>(&self, builder: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let req = builder.build(&self.signer).await?;
        Ok(self.dispatcher.execute(req).await?.value)
    }

    /// Get withdrawal quota of a currency.
    ///
    /// - [Get Withdrawal Quotas](https://www.kucoin.com/docs/rest/funding/withdrawals/get-withdrawal-quotas)
    pub async fn get_withdrawals_quota(
        &self,
        req: &GetWithdrawalsQuotaRequest,
    ) -> Result<GetWithdrawalsQuotaResponse> {
        let currency = req.currency.trim();
        if currency.is_empty() {
            return Err(Error::request_invalid("currency is required"));
        }

        let mut query = vec![("currency", currency)];
        if let Some(chain) = req.chain.as_deref() {
            query.push(("chain", chain));
        }

        let builder = self.request(Method::GET, PATH_WITHDRAWALS_QUOTAS, &query)?;
        self.send(builder).await
    }

    /// List accounts, optionally filtered by currency and type.
    ///
    /// - [Get Account List](https://www.kucoin.com/docs/rest/account/basic-info/get-account-list-spot-margin-trade_hf)
    pub async fn list_accounts(&self, req: &ListAccountsRequest) -> Result<ListAccountsResponse> {
        let mut query = Vec::new();
        if let Some(currency) = req.currency.as_deref() {
            query.push(("currency", currency));
        }
        if let Some(account_type) = req.account_type.as_deref() {
            query.push(("type", account_type));
        }

        let builder = self.request(Method::GET, PATH_ACCOUNTS, &query)?;
        self.send(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kcsign_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn client(endpoint: &str) -> Result<Client> {
        Client::new(Context::new(), Config::new().with_endpoint(endpoint))
    }

    #[test]
    fn test_missing_endpoint_is_config_error() {
        let err = Client::new(Context::new(), Config::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test_case(""; "empty")]
    #[test_case("api.kucoin.com/path"; "no scheme")]
    #[test_case("/api/v1"; "relative")]
    #[test_case("http://exa mple.com"; "malformed")]
    fn test_invalid_endpoint_is_config_error(endpoint: &str) {
        let err = client(endpoint).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test_case("https://api.kucoin.com", "/api/v1/accounts", &[], "https://api.kucoin.com/api/v1/accounts"; "bare host")]
    #[test_case("https://api.kucoin.com/", "/api/v1/accounts", &[], "https://api.kucoin.com/api/v1/accounts"; "trailing slash")]
    #[test_case("http://127.0.0.1:8080/proxy", "/api/v1/accounts", &[], "http://127.0.0.1:8080/proxy/api/v1/accounts"; "base path")]
    #[test_case("https://api.kucoin.com", "/api/v1/withdrawals/quotas", &[("currency", "USDT")], "https://api.kucoin.com/api/v1/withdrawals/quotas?currency=USDT"; "query")]
    #[test_case("https://api.kucoin.com", "/api/v1/accounts", &[("currency", "BTC"), ("type", "main")], "https://api.kucoin.com/api/v1/accounts?currency=BTC&type=main"; "query order kept")]
    #[test_case("https://api.kucoin.com", "/api/v1/accounts", &[("currency", "a b&c")], "https://api.kucoin.com/api/v1/accounts?currency=a+b%26c"; "query encoded")]
    #[test_case("https://api.kucoin.com", "/api/v1/x{y}", &[("currency", "USDT")], "https://api.kucoin.com/api/v1/x%7By%7D?currency=USDT"; "path escaped")]
    #[test_case("https://api.kucoin.com", "/api/v1/a\"b", &[], "https://api.kucoin.com/api/v1/a%22b"; "quote escaped")]
    #[test_case("https://api.kucoin.com", "/api/v1/a/../b", &[], "https://api.kucoin.com/api/v1/b"; "dot segments resolved")]
    #[test_case("http://127.0.0.1:8080/proxy/../v2", "/api/v1/accounts", &[], "http://127.0.0.1:8080/v2/api/v1/accounts"; "dot segments in base path")]
    fn test_url(endpoint: &str, path: &str, query: &[(&str, &str)], expected: &str) {
        let url = client(endpoint).unwrap().url(path, query).unwrap();
        assert_eq!(url.to_string(), expected);
    }

    #[tokio::test]
    async fn test_empty_currency_is_rejected_locally() {
        let err = client("https://api.kucoin.com")
            .unwrap()
            .get_withdrawals_quota(&GetWithdrawalsQuotaRequest::new("  "))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
