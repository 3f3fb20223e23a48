use kcsign_core::{Context, OsEnv};
use kcsign_http_send_reqwest::ReqwestHttpSend;
use kcsign_kucoin::{Client, Config, GetWithdrawalsQuotaRequest};
use log::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();
    env_logger::init();

    let ctx = Context::new()
        .with_env(OsEnv)
        .with_http_send(ReqwestHttpSend::default());

    // KUCOIN_URL, KUCOIN_KEY, KUCOIN_SECRET, KUCOIN_PASSPHRASE
    let config = Config::new().from_env(&ctx);
    let client = match Client::new(ctx, config) {
        Ok(client) => client,
        Err(err) => {
            error!("create kucoin client failed: {err}");
            std::process::exit(1);
        }
    };

    let currency = std::env::args().nth(1).unwrap_or_else(|| "USDT".to_string());
    match client
        .get_withdrawals_quota(&GetWithdrawalsQuotaRequest::new(currency))
        .await
    {
        Ok(resp) => {
            info!("withdrawals quota: {resp:?}");
            println!("{resp:#?}");
        }
        Err(err) => {
            error!("get withdrawals quota failed: {err}");
            std::process::exit(1);
        }
    }
}
