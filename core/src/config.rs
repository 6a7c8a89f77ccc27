// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::{Path, PathBuf};

use jiff::civil::Time;
use serde::de;

use crate::datetime::parse_time;
use crate::{ConflictPolicy, Error, Result};

/// The name of the application.
pub const APP_NAME: &str = "evcal";

/// The time given to new events when none is entered.
pub const DEFAULT_EVENT_TIME: Time = Time::constant(12, 0, 0, 0);

const EVENTS_FILE_NAME: &str = "events.json";

/// Configuration for the calendar.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Path to the JSON file holding all events.
    #[serde(default)]
    pub events_path: Option<PathBuf>,

    /// Default time for new events.
    #[serde(default)]
    pub default_time: Option<ConfigTime>,

    /// What to do when an event is saved into an occupied slot.
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<()> {
        self.events_path = Some(match &self.events_path {
            Some(path) => expand_path(path)?,
            None => get_state_dir()?.join(APP_NAME).join(EVENTS_FILE_NAME),
        });
        Ok(())
    }

    /// The time for new events, falling back to [`DEFAULT_EVENT_TIME`].
    pub fn default_time(&self) -> Time {
        self.default_time
            .map(|t| t.0)
            .unwrap_or(DEFAULT_EVENT_TIME)
    }
}

/// A wall-clock time written as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigTime(pub Time);

impl<'de> serde::Deserialize<'de> for ConfigTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TimeVisitor;

        impl<'de> de::Visitor<'de> for TimeVisitor {
            type Value = ConfigTime;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a time string like "HH:MM""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_time(value)
                    .map(ConfigTime)
                    .map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(TimeVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| Error::Config(format!("invalid path: {}", path.display())))?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| Error::Config("user-specific home directory not found".into()))
}

fn get_config_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| Error::Config("user-specific config directory not found".into()))
}

fn get_state_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(not(unix))]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| Error::Config("user-specific state directory not found".into()))
}
