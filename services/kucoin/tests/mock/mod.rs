//! In-process stand-in for the KuCoin API.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use bytes::Bytes;
use hmac::{Hmac, Mac};
use kcsign_core::{HttpSend, Result};
use sha2::Sha256;

pub const KEY: &str = "test_key";
pub const SECRET: &str = "test_secret";
pub const PASSPHRASE: &str = "test_passphrase";

/// What the mock saw of one request.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: http::Method,
    pub uri: http::Uri,
    pub headers: http::HeaderMap,
    pub body: Bytes,
}

/// Records every request and answers like KuCoin would: `401` with a KuCoin
/// error envelope unless every authentication header checks out.
#[derive(Debug, Clone)]
pub struct MockKucoin {
    pub requests: Arc<Mutex<Vec<Recorded>>>,
    status: u16,
    body: &'static str,
}

impl MockKucoin {
    pub fn new(status: u16, body: &'static str) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            status,
            body,
        }
    }

    pub fn last_request(&self) -> Recorded {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

pub fn hmac_b64(key: &str, msg: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes()).unwrap();
    mac.update(msg.as_bytes());
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

fn header<'a>(req: &'a http::Request<Bytes>, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Check the request the way the remote side does, returns the reason of the
/// first mismatch.
pub fn verify(req: &http::Request<Bytes>) -> std::result::Result<(), String> {
    let timestamp = header(req, "KC-API-TIMESTAMP").ok_or("missing KC-API-TIMESTAMP")?;
    if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("timestamp {timestamp} is not decimal milliseconds"));
    }

    let endpoint = req
        .uri()
        .path_and_query()
        .map(|paq| paq.as_str())
        .unwrap_or("/");
    let expected_sign = hmac_b64(SECRET, &format!("{timestamp}{}{endpoint}", req.method()));
    if header(req, "KC-API-SIGN") != Some(expected_sign.as_str()) {
        return Err("KC-API-SIGN mismatch".to_string());
    }
    if header(req, "KC-API-PASSPHRASE") != Some(hmac_b64(SECRET, PASSPHRASE).as_str()) {
        return Err("KC-API-PASSPHRASE mismatch".to_string());
    }
    if header(req, "KC-API-KEY") != Some(KEY) {
        return Err("KC-API-KEY mismatch".to_string());
    }
    if header(req, "KC-API-KEY-VERSION") != Some("2") {
        return Err("KC-API-KEY-VERSION must be 2".to_string());
    }
    if header(req, "Content-Type").is_none() {
        return Err("missing Content-Type".to_string());
    }
    if header(req, "api-version") != Some("1.0") {
        return Err("api-version must be 1.0".to_string());
    }

    Ok(())
}

#[async_trait]
impl HttpSend for MockKucoin {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let verified = verify(&req);
        let (parts, body) = req.into_parts();
        self.requests.lock().unwrap().push(Recorded {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        });

        let resp = match verified {
            Ok(()) => http::Response::builder()
                .status(self.status)
                .body(Bytes::from_static(self.body.as_bytes()))?,
            Err(reason) => http::Response::builder().status(401).body(Bytes::from(
                format!(r#"{{"code":"400005","msg":"{reason}"}}"#),
            ))?,
        };
        Ok(resp)
    }
}
