pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_range, validate_url, Validate,
};
use cli::CliConfig;
use toml_config::TomlConfig;
use url::Url;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_UPSTREAM_URL: &str = "https://linkdetective.pro";
pub const SEARCH_PATH: &str = "/api/domains";

const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub user_agent: Option<String>,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Page that carries the `_token` form field.
    pub fn homepage_url(&self) -> Result<Url> {
        validate_url("upstream.base_url", &self.base_url)
    }

    pub fn search_url(&self) -> Result<Url> {
        Ok(self.homepage_url()?.join(SEARCH_PATH)?)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_UPSTREAM_URL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: String,
    pub verbose: bool,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
}

impl RelayConfig {
    /// 合併配置：命令列 / 環境變數 > TOML 檔案 > 預設值
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    pub fn merge(cli: &CliConfig, file: TomlConfig) -> Self {
        let server = file.server.unwrap_or_default();
        let upstream = file.upstream.unwrap_or_default();
        let logging = file.logging.unwrap_or_default();

        let format = if cli.json_logs {
            "json".to_string()
        } else {
            logging.format.unwrap_or_else(|| "compact".to_string())
        };

        Self {
            server: ServerConfig {
                host: cli
                    .host
                    .clone()
                    .or(server.host)
                    .unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: cli.port.or(server.port).unwrap_or(DEFAULT_PORT),
            },
            upstream: UpstreamConfig {
                base_url: cli
                    .upstream_url
                    .clone()
                    .or(upstream.base_url)
                    .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
                user_agent: cli.user_agent.clone().or(upstream.user_agent),
            },
            logging: LoggingConfig {
                format,
                verbose: cli.verbose || logging.verbose.unwrap_or(false),
            },
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::merge(&CliConfig::default(), TomlConfig::default())
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;
        self.upstream.search_url()?;
        if let Some(user_agent) = &self.upstream.user_agent {
            validate_non_empty_string("upstream.user_agent", user_agent)?;
        }
        validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        Ok(())
    }
}
