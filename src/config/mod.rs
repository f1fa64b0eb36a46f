mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./video-storage-query.toml",
        "~/.config/video-storage-query/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let bridge = &config.bridge;
    if bridge.channel.is_empty() {
        anyhow::bail!("Bridge channel name cannot be empty");
    }
    if bridge.permissions_channel.is_empty() {
        anyhow::bail!("Permissions channel name cannot be empty");
    }
    if bridge.channel == bridge.permissions_channel {
        anyhow::bail!(
            "Bridge and permissions channels must differ (both are '{}')",
            bridge.channel
        );
    }

    if config.thumbnail.max_width == Some(0) {
        anyhow::bail!("Thumbnail max_width cannot be 0");
    }

    // Missing roots are tolerated; they list as empty
    for root in config.store.expanded_roots() {
        if !root.exists() {
            tracing::warn!("Storage root does not exist: {:?}", root);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config() {
        let file = write_config("[store]\nroots = [\"/nonexistent/videos\"]\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.store.roots, ["/nonexistent/videos"]);
    }

    #[test]
    fn test_load_config_bad_toml() {
        let file = write_config("[store\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_custom_path() {
        let err = load_config_or_default(Some(Path::new("/nonexistent/config.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_rejects_shared_channel() {
        let mut config = Config::default();
        config.bridge.permissions_channel = config.bridge.channel.clone();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_channel() {
        let mut config = Config::default();
        config.bridge.channel.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let mut config = Config::default();
        config.thumbnail.max_width = Some(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_tolerates_missing_root() {
        let mut config = Config::default();
        config.store.roots = vec!["/nonexistent/videos".into()];
        assert!(validate_config(&config).is_ok());
    }
}
