//! This module contains all configuration-relevant code: the configuration
//! structures as well as everything needed to resolve and validate them.
//!
//! Your starting point should probably be [`ConfigurationResolver::resolve`].
//!
//! # Internals
//! Settings come from four places, in decreasing priority:
//! the command line, the configuration file, the environment and built-in defaults.
//!
//! The command line fills a [`ConfigStore`] before anything here runs. Resolution then
//! threads that store through each step, and no step overwrites a field that is
//! already set:
//!
//! 1. [`PathResolver`] finds the configuration file if none was given and records
//!    the [`InstallLocation`] it was found in,
//! 2. [`loader`] merges the scalar settings from the file,
//! 3. [`targets`] builds the list of submission targets from the file's sections,
//! 4. [`finalize`] applies environment variables and defaults and produces the
//!    read-only [`Configuration`].

#![allow(rustdoc::private_intra_doc_links)]

mod environment;
mod error;
mod finalize;
mod key_file;
mod loader;
mod paths;
mod structure;
mod targets;
mod traits;
mod utilities;

use tracing::debug;

pub use self::environment::Environment;
pub use self::error::ConfigurationError;
pub use self::key_file::KeyFile;
pub use self::paths::{DefaultConfigurationPath, PathLayout, PathResolver};
pub use self::structure::*;


/// Name of the implicit section holding the global settings and the default target.
pub const DEFAULT_TARGET_SECTION: &str = "mpdscribble";


/// Runs the whole resolution pipeline against one environment snapshot.
#[derive(Debug, Clone)]
pub struct ConfigurationResolver {
    environment: Environment,
    paths: PathResolver,
    target_ordering: TargetOrdering,
}

impl ConfigurationResolver {
    pub fn new(environment: Environment, layout: PathLayout) -> Self {
        let paths = PathResolver::new(layout, &environment);

        Self {
            environment,
            paths,
            target_ordering: TargetOrdering::default(),
        }
    }

    /// Uses the current process environment and the standard path layout.
    pub fn from_process_environment() -> Self {
        Self::new(Environment::from_process(), PathLayout::default())
    }

    #[must_use]
    pub fn with_target_ordering(mut self, target_ordering: TargetOrdering) -> Self {
        self.target_ordering = target_ordering;
        self
    }

    /// Resolve `store` (usually pre-filled from the command line) into the final configuration.
    pub fn resolve(&self, mut store: ConfigStore) -> Result<Configuration, ConfigurationError> {
        if store.config_path.is_none() {
            if let Some(found) = self.paths.resolve_default_config_path() {
                store.config_path = Some(found.path);
                store.install_location = found.install_location;
            }
        }

        let Some(config_path) = store.config_path.clone() else {
            return Err(ConfigurationError::no_configuration_file(
                self.paths.configuration_candidates(),
            ));
        };

        debug!(path = %config_path.display(), "Loading configuration file.");
        let file = KeyFile::load(&config_path)?;

        loader::load_scalar_fields(&file, &mut store)?;

        store.targets = targets::extract_targets(
            &file,
            &self.paths,
            store.install_location,
            self.target_ordering,
        )?;

        finalize::finalize(store, &self.environment, &self.paths)
    }
}
