// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use evcal_core::{APP_NAME, Config as CoreConfig};
use tokio::fs;

const EVCAL_CONFIG_ENV: &str = "EVCAL_CONFIG";

/// Loads the configuration from `--config`, `EVCAL_CONFIG` or the default
/// location, in that order. Only an explicitly given file has to exist.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(EVCAL_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let path = get_config_dir()?.join(APP_NAME).join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(CoreConfig::default());
        }
        path
    };

    tracing::debug!(path = %path.display(), "reading config file");
    let raw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map_err(|e| format!("Invalid config file at {}: {}", path.display(), e))?;
    Ok(raw.core)
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}
