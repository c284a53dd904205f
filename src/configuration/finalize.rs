//! Fills whatever the command line and the file left unset, then validates.

use tracing::debug;

use super::{
    traits::ResolvableConfiguration,
    ConfigStore,
    Configuration,
    ConfigurationError,
    Environment,
    PathResolver,
};


pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 6600;
pub const DEFAULT_JOURNAL_FLUSH_INTERVAL_SECONDS: u64 = 600;
pub const DEFAULT_VERBOSITY: u8 = 1;
pub const MINIMUM_SLEEP_INTERVAL_SECONDS: i64 = 1;


/// Validates the store, applies the fallbacks and produces the final [`Configuration`].
pub fn finalize(
    mut store: ConfigStore,
    environment: &Environment,
    paths: &PathResolver,
) -> Result<Configuration, ConfigurationError> {
    let Some(config_path) = store.config_path.as_ref() else {
        return Err(ConfigurationError::no_configuration_file(
            paths.configuration_candidates(),
        ));
    };

    if store.targets.is_empty() {
        return Err(ConfigurationError::NoTargets {
            path: config_path.clone(),
        });
    }

    apply_fallbacks(&mut store, environment, paths)?;

    store.resolve()
}


/// Applies environment variables and built-in defaults to every field that is still unset.
pub fn apply_fallbacks(
    store: &mut ConfigStore,
    environment: &Environment,
    paths: &PathResolver,
) -> Result<(), ConfigurationError> {
    if store.host.is_none() {
        store.host = Some(
            environment
                .mpd_host
                .clone()
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        );
    }

    if store.port.is_none() {
        store.port = Some(environment.mpd_port().unwrap_or(DEFAULT_PORT));
    }

    if store.log_path.is_none() {
        store.log_path = Some(paths.default_log_path(store.install_location)?);
    }

    if store.proxy.is_none() {
        store.proxy = environment.http_proxy.clone();
    }

    store.sleep_interval_seconds = Some(
        store
            .sleep_interval_seconds
            .filter(|seconds| *seconds >= MINIMUM_SLEEP_INTERVAL_SECONDS)
            .unwrap_or(MINIMUM_SLEEP_INTERVAL_SECONDS),
    );

    store
        .journal_flush_interval_seconds
        .get_or_insert(DEFAULT_JOURNAL_FLUSH_INTERVAL_SECONDS);

    store.verbosity.get_or_insert(DEFAULT_VERBOSITY);

    debug!(
        host = store.host.as_deref(),
        port = store.port,
        proxy = store.proxy.as_deref(),
        "Applied fallbacks."
    );

    Ok(())
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::configuration::{paths::test_support::Sandbox, InstallLocation, TargetConfig};

    fn target() -> TargetConfig {
        TargetConfig {
            endpoint_url: "http://a/".to_string(),
            username: "a".to_string(),
            password: "a".to_string(),
            journal_path: PathBuf::from("/tmp/a"),
        }
    }

    fn loaded_store() -> ConfigStore {
        ConfigStore {
            config_path: Some(PathBuf::from("/etc/mpdscribble.conf")),
            install_location: InstallLocation::SystemWide,
            targets: vec![target()],
            ..ConfigStore::default()
        }
    }

    #[test]
    fn built_in_defaults_when_nothing_is_set() {
        let sandbox = Sandbox::new();
        let environment = Environment::default();

        let configuration = finalize(loaded_store(), &environment, &sandbox.resolver()).unwrap();

        assert_eq!(configuration.host, DEFAULT_HOST);
        assert_eq!(configuration.port, DEFAULT_PORT);
        assert_eq!(configuration.log_path, sandbox.layout().system_log);
        assert_eq!(configuration.proxy, None);
        assert_eq!(configuration.sleep_interval_seconds, 1);
        assert_eq!(
            configuration.journal_flush_interval_seconds,
            DEFAULT_JOURNAL_FLUSH_INTERVAL_SECONDS
        );
        assert_eq!(configuration.verbosity, DEFAULT_VERBOSITY);
    }

    #[test]
    fn environment_fills_host_port_and_proxy() {
        let sandbox = Sandbox::new();
        let environment = Environment {
            mpd_host: Some("mpd.local".to_string()),
            mpd_port: Some("6601".to_string()),
            http_proxy: Some("http://proxy:3128/".to_string()),
            ..sandbox.environment()
        };

        let configuration = finalize(loaded_store(), &environment, &sandbox.resolver()).unwrap();

        assert_eq!(configuration.host, "mpd.local");
        assert_eq!(configuration.port, 6601);
        assert_eq!(configuration.proxy.as_deref(), Some("http://proxy:3128/"));
    }

    #[test]
    fn unparsable_environment_port_uses_default() {
        let sandbox = Sandbox::new();
        let environment = Environment {
            mpd_port: Some("sixty-six".to_string()),
            ..sandbox.environment()
        };

        let configuration = finalize(loaded_store(), &environment, &sandbox.resolver()).unwrap();

        assert_eq!(configuration.port, DEFAULT_PORT);
    }

    #[test]
    fn set_fields_win_over_environment() {
        let sandbox = Sandbox::new();
        let environment = Environment {
            mpd_host: Some("mpd.local".to_string()),
            mpd_port: Some("6601".to_string()),
            http_proxy: Some("http://env-proxy/".to_string()),
            ..sandbox.environment()
        };

        let store = ConfigStore {
            host: Some("file-host".to_string()),
            port: Some(7000),
            proxy: Some("http://file-proxy/".to_string()),
            ..loaded_store()
        };

        let configuration = finalize(store, &environment, &sandbox.resolver()).unwrap();

        assert_eq!(configuration.host, "file-host");
        assert_eq!(configuration.port, 7000);
        assert_eq!(configuration.proxy.as_deref(), Some("http://file-proxy/"));
    }

    #[test]
    fn sleep_interval_is_clamped() {
        let sandbox = Sandbox::new();

        for (configured, expected) in [(Some(-5), 1), (Some(0), 1), (None, 1), (Some(30), 30)] {
            let store = ConfigStore {
                sleep_interval_seconds: configured,
                ..loaded_store()
            };

            let configuration = finalize(store, &Environment::default(), &sandbox.resolver()).unwrap();
            assert_eq!(configuration.sleep_interval_seconds, expected);
        }
    }

    #[test]
    fn missing_configuration_path_is_fatal() {
        let sandbox = Sandbox::new();
        let store = ConfigStore {
            config_path: None,
            ..loaded_store()
        };

        assert!(matches!(
            finalize(store, &Environment::default(), &sandbox.resolver()),
            Err(ConfigurationError::NoConfigurationFile { .. })
        ));
    }

    #[test]
    fn no_targets_is_fatal() {
        let sandbox = Sandbox::new();
        let store = ConfigStore {
            targets: Vec::new(),
            ..loaded_store()
        };

        assert!(matches!(
            finalize(store, &Environment::default(), &sandbox.resolver()),
            Err(ConfigurationError::NoTargets { .. })
        ));
    }

    #[test]
    fn default_log_path_needs_install_location() {
        let sandbox = Sandbox::new();
        let store = ConfigStore {
            install_location: InstallLocation::Unknown,
            ..loaded_store()
        };

        assert!(matches!(
            finalize(store, &Environment::default(), &sandbox.resolver()),
            Err(ConfigurationError::UnknownInstallLocation { kind: "log" })
        ));

        let store = ConfigStore {
            install_location: InstallLocation::Unknown,
            log_path: Some(PathBuf::from("-")),
            ..loaded_store()
        };
        assert!(finalize(store, &Environment::default(), &sandbox.resolver()).is_ok());
    }
}
