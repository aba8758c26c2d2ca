use crate::utils::error::{RelayError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub upstream: Option<UpstreamSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamSection {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| RelayError::Config {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RelayError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${UPSTREAM_URL})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RelayError::Config {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
host = "127.0.0.1"
port = 9000

[upstream]
base_url = "https://staging.example.com"
user_agent = "relay/1.0"

[logging]
format = "json"
verbose = true
"#,
        )
        .unwrap();

        let server = config.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(9000));
        let upstream = config.upstream.unwrap();
        assert_eq!(
            upstream.base_url.as_deref(),
            Some("https://staging.example.com")
        );
        assert_eq!(upstream.user_agent.as_deref(), Some("relay/1.0"));
        assert_eq!(config.logging.unwrap().format.as_deref(), Some("json"));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("[server]\nport = 8080\n").unwrap();
        assert!(config.upstream.is_none());
        assert!(config.logging.is_none());
        assert_eq!(config.server.unwrap().port, Some(8080));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GUESTPOST_RELAY_TEST_UPSTREAM", "https://mirror.example.com");
        let config = TomlConfig::from_toml_str(
            "[upstream]\nbase_url = \"${GUESTPOST_RELAY_TEST_UPSTREAM}\"\n",
        )
        .unwrap();
        assert_eq!(
            config.upstream.unwrap().base_url.as_deref(),
            Some("https://mirror.example.com")
        );
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let config = TomlConfig::from_toml_str(
            "[upstream]\nbase_url = \"${GUESTPOST_RELAY_SURELY_UNSET}\"\n",
        )
        .unwrap();
        assert_eq!(
            config.upstream.unwrap().base_url.as_deref(),
            Some("${GUESTPOST_RELAY_SURELY_UNSET}")
        );
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = TomlConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert!(matches!(err, RelayError::ConfigValidation { .. }));
    }
}
