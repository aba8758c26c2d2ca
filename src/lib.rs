pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use config::{cli::CliConfig, RelayConfig, UpstreamConfig};
pub use crate::core::{engine::RelayEngine, session::UpstreamSession};
pub use domain::model::{DomainResult, ResultError, Token};
pub use server::RelayServer;
pub use utils::error::{RelayError, Result};
