use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "guestpost-relay")]
#[command(about = "Relay guest post seller prices for a batch of domains as JSON")]
pub struct CliConfig {
    #[arg(long, short = 'c', help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "RELAY_UPSTREAM_URL", help = "Base URL of the upstream site")]
    pub upstream_url: Option<String>,

    #[arg(long, help = "User-Agent sent to the upstream site")]
    pub user_agent: Option<String>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, short = 'v', help = "Enable verbose output")]
    pub verbose: bool,
}
