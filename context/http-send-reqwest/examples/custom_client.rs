use bytes::Bytes;
use kcsign_core::{Context, Result};
use kcsign_http_send_reqwest::ReqwestHttpSend;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Create a custom reqwest client with specific configuration
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .user_agent("kcsign-example/1.0")
        .build()
        .map_err(|e| kcsign_core::Error::config_invalid("build client failed").with_source(e))?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    // The public timestamp endpoint needs no signature.
    let req = http::Request::builder()
        .method("GET")
        .uri("https://api.kucoin.com/api/v1/timestamp")
        .body(Bytes::new())?;

    match ctx.http_send(req).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            println!("{}", String::from_utf8_lossy(resp.body()));
        }
        Err(e) => {
            eprintln!("Request failed: {e}");
        }
    }

    Ok(())
}
