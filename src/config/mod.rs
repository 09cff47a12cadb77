mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::live_tv::template::PROGRAM_ID_PLACEHOLDER;

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
        "./guideart.toml",
        "~/.config/guideart/config.toml",
        "/etc/guideart/config.toml",
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
    if config.http.timeout_secs == 0 {
        anyhow::bail!("HTTP timeout cannot be 0");
    }

    let mut seen = HashSet::new();
    for service in config.services.iter().filter(|s| s.enabled) {
        if service.name.trim().is_empty() {
            anyhow::bail!("Enabled service has an empty name");
        }
        if !service.url_template.contains(PROGRAM_ID_PLACEHOLDER) {
            anyhow::bail!(
                "Service '{}' url_template must contain {}",
                service.name,
                PROGRAM_ID_PLACEHOLDER
            );
        }
        if !seen.insert(service.name.to_lowercase()) {
            anyhow::bail!("Service '{}' is configured more than once", service.name);
        }
    }

    if !config.images.dir.exists() {
        tracing::warn!("Images directory does not exist yet: {:?}", config.images.dir);
    }

    Ok(())
}
