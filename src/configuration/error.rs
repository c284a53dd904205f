//! Errors that abort configuration resolution.
//!
//! Anything in here is fatal: the daemon cannot run with an incomplete
//! configuration. Benign outcomes (an absent optional key, a field that was
//! already set on the command line, an unparsable environment value) never
//! become a [`ConfigurationError`].

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use super::key_file::KeyFileError;


#[derive(Debug, Error, Diagnostic)]
pub enum ConfigurationError {
    #[error("cannot find configuration file (searched: {searched})")]
    #[diagnostic(
        code(mpdscribble::configuration::not_found),
        help("create one of the searched files or pass --conf <PATH>")
    )]
    NoConfigurationFile { searched: String },

    #[error("failed to read configuration file {}", path.display())]
    #[diagnostic(code(mpdscribble::configuration::read))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration file {}", path.display())]
    #[diagnostic(code(mpdscribble::configuration::malformed))]
    Malformed {
        path: PathBuf,
        #[source]
        source: KeyFileError,
    },

    #[error("section [{section}] in {} is missing required key \"{key}\"", path.display())]
    #[diagnostic(
        code(mpdscribble::configuration::missing_key),
        help("every named target needs non-empty url, username and password keys")
    )]
    MissingTargetKey {
        path: PathBuf,
        section: String,
        key: &'static str,
    },

    #[error("no audioscrobbler host configured in {}", path.display())]
    #[diagnostic(
        code(mpdscribble::configuration::no_targets),
        help("set username/password at the top of the file or add a [section] with url, username and password")
    )]
    NoTargets { path: PathBuf },

    #[error("please specify where to put the {kind} file")]
    #[diagnostic(
        code(mpdscribble::configuration::unknown_install_location),
        help("the configuration file was not found in a default location, so there are no default log or journal paths")
    )]
    UnknownInstallLocation { kind: &'static str },

    #[error("configuration field \"{field}\" is still unset after finalization")]
    #[diagnostic(code(mpdscribble::configuration::unset))]
    Unset { field: &'static str },
}

impl ConfigurationError {
    pub fn no_configuration_file<I, P>(searched: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let searched = searched
            .into_iter()
            .map(|path| path.into().display().to_string())
            .collect::<Vec<_>>();

        let searched = if searched.is_empty() {
            "nothing".to_string()
        } else {
            searched.join(", ")
        };

        Self::NoConfigurationFile { searched }
    }

    pub fn malformed(path: impl Into<PathBuf>, source: KeyFileError) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }

    pub fn missing_target_key(
        path: impl Into<PathBuf>,
        section: impl Into<String>,
        key: &'static str,
    ) -> Self {
        Self::MissingTargetKey {
            path: path.into(),
            section: section.into(),
            key,
        }
    }
}
