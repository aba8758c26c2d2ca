use clap::Parser;
use guestpost_relay::utils::{logger, validation::Validate};
use guestpost_relay::{CliConfig, RelayConfig, RelayServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match RelayConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.logging.is_json() {
        logger::init_json_logger(config.logging.verbose);
    } else {
        logger::init_logger(config.logging.verbose);
    }

    tracing::info!("Starting guestpost-relay");
    tracing::debug!("Config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = RelayServer::new(config).run().await {
        tracing::error!("❌ Server stopped: {}", e);
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    Ok(())
}
