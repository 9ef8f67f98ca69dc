use clap::Parser;

use chat_relay::api::Server;
use chat_relay::config::{RelayArgs, RelayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenv::dotenv();
    chat_relay::init_logging();

    let config = RelayConfig::from_args(RelayArgs::parse());
    let provider = config.provider()?;

    if provider.is_none() {
        log::warn!("{}", config.backend.missing_key_message());
    }

    let addr = format!("0.0.0.0:{}", config.port);
    Server::new(config.session.clone(), config.backend, provider)
        .with_static_dir(config.static_dir.clone())
        .run(&addr)
        .await?;

    Ok(())
}
