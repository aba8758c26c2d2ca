use anyhow::Result;
use guestpost_relay::utils::validation::Validate;
use guestpost_relay::{CliConfig, RelayConfig};
use tempfile::TempDir;

#[tokio::test]
async fn test_resolve_from_toml_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("relay.toml");
    tokio::fs::write(
        &config_path,
        r#"
[server]
host = "127.0.0.1"
port = 9000

[upstream]
base_url = "https://staging.example.com"

[logging]
format = "json"
"#,
    )
    .await?;

    let cli = CliConfig {
        config: Some(config_path),
        verbose: true,
        ..Default::default()
    };
    let config = RelayConfig::resolve(&cli)?;

    assert_eq!(config.server.bind_address(), "127.0.0.1:9000");
    assert_eq!(config.upstream.base_url, "https://staging.example.com");
    assert_eq!(
        config.upstream.search_url()?.as_str(),
        "https://staging.example.com/api/domains"
    );
    assert!(config.logging.is_json());
    assert!(config.logging.verbose);
    assert!(config.validate().is_ok());
    Ok(())
}

#[tokio::test]
async fn test_invalid_file_values_fail_validation() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("relay.toml");
    tokio::fs::write(
        &config_path,
        "[upstream]\nbase_url = \"ftp://example.com\"\n\n[logging]\nformat = \"pretty\"\n",
    )
    .await?;

    let cli = CliConfig {
        config: Some(config_path),
        ..Default::default()
    };
    let config = RelayConfig::resolve(&cli)?;

    assert!(config.validate().is_err());
    Ok(())
}

#[test]
fn test_missing_file_is_a_config_error() {
    let cli = CliConfig {
        config: Some("/nonexistent/relay.toml".into()),
        ..Default::default()
    };
    assert!(RelayConfig::resolve(&cli).is_err());
}
