use std::{path::PathBuf, time::Duration};

use serde::Serialize;

pub use self::install_location::InstallLocation;
pub use self::target::{TargetConfig, TargetOrdering};
use super::{traits::ResolvableConfiguration, ConfigurationError};

mod install_location;
mod target;



/// The configuration while it is being assembled.
///
/// `None` means "not set yet". Command-line parsing fills this in first, then the
/// configuration file, then the environment and built-in defaults. A source never
/// overwrites a field an earlier (higher-priority) source has set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    pub config_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub pid_file_path: Option<PathBuf>,
    pub daemon_user: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub proxy: Option<String>,

    /// May be zero or negative here, finalization clamps it to at least one second.
    pub sleep_interval_seconds: Option<i64>,

    pub journal_flush_interval_seconds: Option<u64>,
    pub verbosity: Option<u8>,

    pub install_location: InstallLocation,

    pub targets: Vec<TargetConfig>,
}


/// The entire, finalized configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    /// This is the file path this `Configuration` instance was loaded from.
    pub file_path: PathBuf,

    pub install_location: InstallLocation,

    /// `-` means standard error.
    pub log_path: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid_file_path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub daemon_user: Option<String>,

    /// MPD host.
    pub host: String,

    /// MPD port.
    pub port: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    pub sleep_interval_seconds: u64,
    pub journal_flush_interval_seconds: u64,
    pub verbosity: u8,

    /// Never empty.
    pub targets: Vec<TargetConfig>,
}

impl Configuration {
    pub fn sleep_interval(&self) -> Duration {
        Duration::from_secs(self.sleep_interval_seconds)
    }

    pub fn journal_flush_interval(&self) -> Duration {
        Duration::from_secs(self.journal_flush_interval_seconds)
    }

    /// Renders the configuration as TOML. Passwords are masked.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}


impl ResolvableConfiguration for ConfigStore {
    type Resolved = Configuration;

    /// Checks that every field finalization guarantees is present.
    fn resolve(self) -> Result<Self::Resolved, ConfigurationError> {
        let file_path = required(self.config_path, "config_path")?;

        if self.targets.is_empty() {
            return Err(ConfigurationError::Unset { field: "targets" });
        }

        let sleep_interval_seconds = self
            .sleep_interval_seconds
            .and_then(|seconds| u64::try_from(seconds).ok())
            .filter(|seconds| *seconds >= 1)
            .ok_or(ConfigurationError::Unset {
                field: "sleep_interval_seconds",
            })?;

        Ok(Configuration {
            file_path,
            install_location: self.install_location,
            log_path: required(self.log_path, "log_path")?,
            pid_file_path: self.pid_file_path,
            daemon_user: self.daemon_user,
            host: required(self.host, "host")?,
            port: required(self.port, "port")?,
            proxy: self.proxy,
            sleep_interval_seconds,
            journal_flush_interval_seconds: required(
                self.journal_flush_interval_seconds,
                "journal_flush_interval_seconds",
            )?,
            verbosity: required(self.verbosity, "verbosity")?,
            targets: self.targets,
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ConfigurationError> {
    value.ok_or(ConfigurationError::Unset { field })
}
