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

//! Request and response shapes of supported operations.

use serde::{Deserialize, Serialize};

/// Request of [`crate::Client::get_withdrawals_quota`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetWithdrawalsQuotaRequest {
    /// Currency, for example `USDT`.
    pub currency: String,
    /// Chain of the currency, the default chain is used when unset.
    pub chain: Option<String>,
}

impl GetWithdrawalsQuotaRequest {
    /// Create a request for `currency`.
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            chain: None,
        }
    }

    /// Set chain.
    pub fn with_chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = Some(chain.into());
        self
    }
}

/// Withdrawal quota of one currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WithdrawalsQuota {
    pub currency: String,
    #[serde(rename = "limitBTCAmount")]
    pub limit_btc_amount: String,
    #[serde(rename = "usedBTCAmount")]
    pub used_btc_amount: String,
    #[serde(rename = "quotaCurrency")]
    pub quota_currency: String,
    #[serde(rename = "limitQuotaCurrencyAmount")]
    pub limit_quota_currency_amount: String,
    #[serde(rename = "usedQuotaCurrencyAmount")]
    pub used_quota_currency_amount: String,
    #[serde(rename = "remainAmount")]
    pub remain_amount: String,
    #[serde(rename = "availableAmount")]
    pub available_amount: String,
    #[serde(rename = "withdrawMinFee")]
    pub withdraw_min_fee: String,
    #[serde(rename = "innerWithdrawMinFee")]
    pub inner_withdraw_min_fee: String,
    #[serde(rename = "withdrawMinSize")]
    pub withdraw_min_size: String,
    #[serde(rename = "isWithdrawEnabled")]
    pub is_withdraw_enabled: bool,
    pub precision: i64,
    pub chain: String,
    pub reason: Option<String>,
    #[serde(rename = "lockedAmount")]
    pub locked_amount: String,
}

/// Response of [`crate::Client::get_withdrawals_quota`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetWithdrawalsQuotaResponse {
    pub code: String,
    pub data: WithdrawalsQuota,
}

/// Request of [`crate::Client::list_accounts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAccountsRequest {
    /// Only accounts of this currency.
    pub currency: Option<String>,
    /// Only accounts of this type: `main`, `trade`, `margin`.
    pub account_type: Option<String>,
}

/// One account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: String,
    pub currency: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub balance: String,
    pub available: String,
    pub holds: String,
}

/// Response of [`crate::Client::list_accounts`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListAccountsResponse {
    pub code: String,
    pub data: Vec<Account>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_withdrawals_quota() {
        let body = r#"{
            "code": "200000",
            "data": {
                "currency": "USDT",
                "limitBTCAmount": "37.83993375",
                "usedBTCAmount": "0.00000000",
                "quotaCurrency": "USDT",
                "limitQuotaCurrencyAmount": "1000000.00000000",
                "usedQuotaCurrencyAmount": "0",
                "remainAmount": "1000000.00000000",
                "availableAmount": "0",
                "withdrawMinFee": "1",
                "innerWithdrawMinFee": "0",
                "withdrawMinSize": "10",
                "isWithdrawEnabled": true,
                "precision": 4,
                "chain": "ERC20",
                "reason": null,
                "lockedAmount": "0"
            }
        }"#;

        let resp: GetWithdrawalsQuotaResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.code, "200000");
        assert_eq!(resp.data.limit_btc_amount, "37.83993375");
        assert_eq!(resp.data.quota_currency, "USDT");
        assert!(resp.data.is_withdraw_enabled);
        assert_eq!(resp.data.precision, 4);
        assert_eq!(resp.data.reason, None);
    }

    #[test]
    fn test_decode_accounts() {
        let body = r#"{"code":"200000","data":[{"id":"5bd6e9286d99522a52e458de","currency":"BTC","type":"main","balance":"237582.04299","available":"237582.032","holds":"0.01099"}]}"#;

        let resp: ListAccountsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.data.len(), 1);
        assert_eq!(resp.data[0].account_type, "main");
        assert_eq!(resp.data[0].holds, "0.01099");
    }
}
