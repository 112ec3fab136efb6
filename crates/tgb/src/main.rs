use anyhow::Context;
use tracing::{info, warn};

use tgb_core::{
    api::ApiClient, checkpoint::FileCheckpointStore, config::Config, dispatcher::CommandBot,
    polling::Poller, ports::BotApi,
};
use tgb_http::ReqwestTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tgb_core::logging::init("tgb")?;

    let cfg = Config::load()?;
    let transport = ReqwestTransport::new(cfg.http_connect_timeout)?;
    let api = ApiClient::new(cfg.credentials(), transport);

    let me = api.get_me().await.context("getMe failed")?;
    if me.is_known() {
        info!("tgb started: @{} ({})", me.username, me.id);
    } else {
        warn!("getMe returned no identity; continuing");
    }
    info!("Offset file: {}", cfg.offset_file.display());

    let store = FileCheckpointStore::new(cfg.offset_file.clone());
    let bot = CommandBot::new(cfg.random_seed);
    let mut poller = Poller::new(api, store, bot).with_poll_timeout(cfg.poll_timeout_secs);

    // The loop has already logged the failure.
    if poller.run().await.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
