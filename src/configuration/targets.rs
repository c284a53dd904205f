//! Builds the list of submission targets from the sections of a configuration file.
//!
//! The implicit default section only yields a target when it has a `username`
//! and always submits to [`DEFAULT_ENDPOINT_URL`]. Every other section is a
//! named target that must spell out `url`, `username` and `password`.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{
    traits::ResolvableConfigurationWithContext,
    ConfigurationError,
    InstallLocation,
    KeyFile,
    PathResolver,
    TargetConfig,
    TargetOrdering,
    DEFAULT_TARGET_SECTION,
};


/// Where the default target submits to.
pub const DEFAULT_ENDPOINT_URL: &str = "http://post.audioscrobbler.com/";


/// The keys of one section, before fallbacks and required-key checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct UnresolvedTargetConfiguration {
    section: String,
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    journal: Option<String>,

    /// The pre-`journal` spelling, only honoured in the default section.
    legacy_cache: Option<String>,
}

pub(super) struct TargetResolutionContext<'context> {
    pub file_path: &'context Path,
    pub paths: &'context PathResolver,
    pub install_location: InstallLocation,
}


impl UnresolvedTargetConfiguration {
    /// `Ok(None)` when the section is the default section without a username,
    /// meaning no default target is configured.
    fn read(file: &KeyFile, section: &str) -> Result<Option<Self>, ConfigurationError> {
        let read_string = |key: &str| {
            file.get_string(section, key)
                .map(|value| value.filter(|value| !value.is_empty()))
                .map_err(|error| ConfigurationError::malformed(file.path(), error))
        };

        let is_default_section = section == DEFAULT_TARGET_SECTION;

        let username = read_string("username")?;
        if is_default_section && username.is_none() {
            return Ok(None);
        }

        let (url, legacy_cache) = if is_default_section {
            (
                Some(DEFAULT_ENDPOINT_URL.to_string()),
                read_string("cache")?,
            )
        } else {
            (read_string("url")?, None)
        };

        Ok(Some(Self {
            section: section.to_string(),
            url,
            username,
            password: read_string("password")?,
            journal: read_string("journal")?,
            legacy_cache,
        }))
    }
}

impl<'context> ResolvableConfigurationWithContext<'context> for UnresolvedTargetConfiguration {
    type Context = TargetResolutionContext<'context>;
    type Resolved = TargetConfig;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved, ConfigurationError> {
        let missing = |key: &'static str| {
            ConfigurationError::missing_target_key(context.file_path, self.section.as_str(), key)
        };

        let endpoint_url = self.url.clone().ok_or_else(|| missing("url"))?;
        let username = self.username.clone().ok_or_else(|| missing("username"))?;
        let password = self.password.clone().ok_or_else(|| missing("password"))?;

        let journal_path = match (self.journal, self.legacy_cache) {
            (Some(journal), _) => PathBuf::from(journal),
            (None, Some(cache)) => {
                warn!(
                    section = %self.section,
                    "\"cache\" is deprecated, use \"journal\" instead."
                );
                PathBuf::from(cache)
            }
            (None, None) => context
                .paths
                .default_journal_path(context.install_location)?,
        };

        Ok(TargetConfig {
            endpoint_url,
            username,
            password,
            journal_path,
        })
    }
}


/// Extracts every configured target from `file`, then orders them with `ordering`.
pub fn extract_targets(
    file: &KeyFile,
    paths: &PathResolver,
    install_location: InstallLocation,
    ordering: TargetOrdering,
) -> Result<Vec<TargetConfig>, ConfigurationError> {
    let mut targets = Vec::new();

    for section in file.section_names() {
        let Some(unresolved) = UnresolvedTargetConfiguration::read(file, section)? else {
            debug!("No username in the default section, skipping the default target.");
            continue;
        };

        let target = unresolved.resolve(TargetResolutionContext {
            file_path: file.path(),
            paths,
            install_location,
        })?;

        debug!(
            section,
            endpoint_url = %target.endpoint_url,
            "Configured target."
        );
        targets.push(target);
    }

    ordering.apply(&mut targets);

    Ok(targets)
}
