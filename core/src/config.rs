// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use jiff::tz::TimeZone;

use crate::recurrence::{GENERATE_YEARLY_STEP, LOOKUP_YEARLY_STEP, YearlyStep};
use crate::{Error, Expander};

/// The name of the application.
pub const APP_NAME: &str = "goosecal";

const DB_FILENAME: &str = "goosecal.db";

/// Configuration for the calendar.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory for storing application state, including the database.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// IANA time zone recurrences are stepped in. The system zone when unset.
    #[serde(default)]
    pub timezone: Option<String>,

    /// Yearly policy when expanding a series over a window.
    #[serde(default = "default_yearly_generate")]
    pub yearly_generate: YearlyStep,

    /// Yearly policy when looking up the next occurrence of a series.
    #[serde(default = "default_yearly_lookup")]
    pub yearly_lookup: YearlyStep,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            timezone: None,
            yearly_generate: GENERATE_YEARLY_STEP,
            yearly_lookup: LOOKUP_YEARLY_STEP,
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Error> {
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(expand_path(a).map_err(|e| {
                    Error::Config(format!("failed to expand state directory path: {e}"))
                })?)
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        };

        Ok(())
    }

    /// Path of the database file, or `None` for an in-memory database.
    pub fn db_path(&self) -> Option<PathBuf> {
        self.state_dir.as_ref().map(|dir| dir.join(DB_FILENAME))
    }

    /// The time zone recurrences are stepped in.
    pub fn time_zone(&self) -> Result<TimeZone, Error> {
        match &self.timezone {
            Some(name) => TimeZone::get(name)
                .map_err(|e| Error::Config(format!("unknown time zone '{name}': {e}"))),
            None => Ok(TimeZone::system()),
        }
    }

    /// Builds the expander described by this configuration.
    pub fn expander(&self) -> Result<Expander, Error> {
        Ok(Expander::new(self.time_zone()?)
            .with_yearly_steps(self.yearly_generate, self.yearly_lookup))
    }
}

fn default_yearly_generate() -> YearlyStep {
    GENERATE_YEARLY_STEP
}

fn default_yearly_lookup() -> YearlyStep {
    LOOKUP_YEARLY_STEP
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf, Error> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| Error::Config("invalid path encoding".to_string()))?;

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

    // Handle state directories
    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Error> {
    dirs::home_dir()
        .ok_or_else(|| Error::Config("user-specific home directory not found".to_string()))
}

/// The user-specific configuration directory.
pub fn get_config_dir() -> Result<PathBuf, Error> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| Error::Config("user-specific config directory not found".to_string()))
}

fn get_state_dir() -> Result<PathBuf, Error> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| Error::Config("user-specific state directory not found".to_string()))
}
