//! Default locations for the configuration, log and journal files.
//!
//! A per-user install under `~/.mpdscribble` takes precedence over the
//! system-wide one. Which of the two provided the configuration file decides
//! where the log and journal go by default.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{
    utilities::expand_tilde,
    ConfigurationError,
    Environment,
    InstallLocation,
};


/// Default path templates. Per-user templates may start with `~`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    pub home_configuration: String,
    pub home_log: String,
    pub home_journal: String,

    pub system_configuration: PathBuf,
    pub system_log: PathBuf,
    pub system_journal: PathBuf,
}

impl Default for PathLayout {
    fn default() -> Self {
        Self {
            home_configuration: "~/.mpdscribble/mpdscribble.conf".to_string(),
            home_log: "~/.mpdscribble/mpdscribble.log".to_string(),
            home_journal: "~/.mpdscribble/mpdscribble.cache".to_string(),
            system_configuration: PathBuf::from("/etc/mpdscribble.conf"),
            system_log: PathBuf::from("/var/log/mpdscribble/mpdscribble.log"),
            system_journal: PathBuf::from("/var/cache/mpdscribble/mpdscribble.cache"),
        }
    }
}


/// A configuration file found at one of the default locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultConfigurationPath {
    pub path: PathBuf,
    pub install_location: InstallLocation,
}


#[derive(Debug, Clone)]
pub struct PathResolver {
    layout: PathLayout,
    home: Option<String>,
}

impl PathResolver {
    pub fn new(layout: PathLayout, environment: &Environment) -> Self {
        Self {
            layout,
            home: environment.home.clone(),
        }
    }

    fn expand(&self, template: &str) -> PathBuf {
        expand_tilde(template, self.home.as_deref())
    }

    /// The per-user configuration path followed by the system-wide one.
    pub fn configuration_candidates(&self) -> [PathBuf; 2] {
        [
            self.expand(&self.layout.home_configuration),
            self.layout.system_configuration.clone(),
        ]
    }

    /// Looks for an existing configuration file, per-user first.
    /// Finding neither is not an error here, the caller decides.
    pub fn resolve_default_config_path(&self) -> Option<DefaultConfigurationPath> {
        let [home_configuration, system_configuration] = self.configuration_candidates();

        let found = if is_regular_file(&home_configuration) {
            DefaultConfigurationPath {
                path: home_configuration,
                install_location: InstallLocation::UserHome,
            }
        } else if is_regular_file(&system_configuration) {
            DefaultConfigurationPath {
                path: system_configuration,
                install_location: InstallLocation::SystemWide,
            }
        } else {
            return None;
        };

        debug!(
            path = %found.path.display(),
            install_location = ?found.install_location,
            "Found default configuration file."
        );

        Some(found)
    }

    pub fn default_log_path(
        &self,
        install_location: InstallLocation,
    ) -> Result<PathBuf, ConfigurationError> {
        match install_location {
            InstallLocation::UserHome => Ok(self.expand(&self.layout.home_log)),
            InstallLocation::SystemWide => Ok(self.layout.system_log.clone()),
            InstallLocation::Unknown => Err(ConfigurationError::UnknownInstallLocation { kind: "log" }),
        }
    }

    pub fn default_journal_path(
        &self,
        install_location: InstallLocation,
    ) -> Result<PathBuf, ConfigurationError> {
        match install_location {
            InstallLocation::UserHome => Ok(self.expand(&self.layout.home_journal)),
            InstallLocation::SystemWide => Ok(self.layout.system_journal.clone()),
            InstallLocation::Unknown => {
                Err(ConfigurationError::UnknownInstallLocation { kind: "journal" })
            }
        }
    }
}

fn is_regular_file(path: &Path) -> bool {
    path.is_file()
}
