//! Merges the scalar settings from the configuration file into a [`ConfigStore`].
//!
//! Every setting is read from the implicit default section. A field that already
//! holds a value was set by the command line and is left untouched.

use std::path::PathBuf;

use tracing::{trace, warn};

use super::{ConfigStore, ConfigurationError, KeyFile, DEFAULT_TARGET_SECTION};


pub const JOURNAL_INTERVAL_KEY: &str = "journal_interval";

/// Deprecated spelling of [`JOURNAL_INTERVAL_KEY`].
pub const LEGACY_JOURNAL_INTERVAL_KEY: &str = "cache_interval";


/// Fill every unset scalar field of `store` from `file`.
pub fn load_scalar_fields(file: &KeyFile, store: &mut ConfigStore) -> Result<(), ConfigurationError> {
    load_path(file, "pidfile", &mut store.pid_file_path)?;
    load_string(file, "daemon_user", &mut store.daemon_user)?;
    load_path(file, "log", &mut store.log_path)?;
    load_string(file, "host", &mut store.host)?;
    load_integer(file, "port", &mut store.port)?;
    load_string(file, "proxy", &mut store.proxy)?;
    load_integer(file, "sleep", &mut store.sleep_interval_seconds)?;

    if !load_integer(
        file,
        JOURNAL_INTERVAL_KEY,
        &mut store.journal_flush_interval_seconds,
    )? && load_integer(
        file,
        LEGACY_JOURNAL_INTERVAL_KEY,
        &mut store.journal_flush_interval_seconds,
    )? {
        warn!(
            "\"{}\" is deprecated, use \"{}\" instead.",
            LEGACY_JOURNAL_INTERVAL_KEY, JOURNAL_INTERVAL_KEY
        );
    }

    load_integer(file, "verbose", &mut store.verbosity)?;

    Ok(())
}


/// Returns whether the value was taken from the file.
pub fn load_string(
    file: &KeyFile,
    key: &str,
    value: &mut Option<String>,
) -> Result<bool, ConfigurationError> {
    if value.is_some() {
        trace!(key, "Already set by a higher-priority source.");
        return Ok(false);
    }

    let loaded = file
        .get_string(DEFAULT_TARGET_SECTION, key)
        .map_err(|error| ConfigurationError::malformed(file.path(), error))?;

    Ok(store_loaded(value, loaded))
}

pub fn load_path(
    file: &KeyFile,
    key: &str,
    value: &mut Option<PathBuf>,
) -> Result<bool, ConfigurationError> {
    let mut loaded = value
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());

    let was_loaded = load_string(file, key, &mut loaded)?;
    if was_loaded {
        *value = loaded.map(PathBuf::from);
    }

    Ok(was_loaded)
}

pub fn load_integer<T>(
    file: &KeyFile,
    key: &str,
    value: &mut Option<T>,
) -> Result<bool, ConfigurationError>
where
    T: TryFrom<i64>,
{
    if value.is_some() {
        trace!(key, "Already set by a higher-priority source.");
        return Ok(false);
    }

    let loaded = file
        .get_integer_as::<T>(DEFAULT_TARGET_SECTION, key)
        .map_err(|error| ConfigurationError::malformed(file.path(), error))?;

    Ok(store_loaded(value, loaded))
}

fn store_loaded<T>(value: &mut Option<T>, loaded: Option<T>) -> bool {
    match loaded {
        Some(loaded) => {
            *value = Some(loaded);
            true
        }
        None => false,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> KeyFile {
        KeyFile::parse(contents, "test.conf").unwrap()
    }

    const FULL_FILE: &str = "\
pidfile = /run/mpdscribble.pid
daemon_user = mpd
log = /var/log/scribble.log
host = music.local
port = 6601
proxy = http://proxy:3128/
sleep = 5
journal_interval = 300
verbose = 2

[libre.fm]
host = ignored
";

    #[test]
    fn loads_every_scalar_field() {
        let mut store = ConfigStore::default();
        load_scalar_fields(&parse(FULL_FILE), &mut store).unwrap();

        assert_eq!(store.pid_file_path, Some(PathBuf::from("/run/mpdscribble.pid")));
        assert_eq!(store.daemon_user.as_deref(), Some("mpd"));
        assert_eq!(store.log_path, Some(PathBuf::from("/var/log/scribble.log")));
        assert_eq!(store.host.as_deref(), Some("music.local"));
        assert_eq!(store.port, Some(6601));
        assert_eq!(store.proxy.as_deref(), Some("http://proxy:3128/"));
        assert_eq!(store.sleep_interval_seconds, Some(5));
        assert_eq!(store.journal_flush_interval_seconds, Some(300));
        assert_eq!(store.verbosity, Some(2));
        assert!(store.targets.is_empty());
    }

    #[test]
    fn already_set_fields_are_untouched() {
        let before = ConfigStore {
            pid_file_path: Some(PathBuf::from("/cli.pid")),
            daemon_user: Some("cli-user".to_string()),
            log_path: Some(PathBuf::from("-")),
            host: Some("cli-host".to_string()),
            port: Some(1),
            proxy: Some("cli-proxy".to_string()),
            sleep_interval_seconds: Some(-4),
            journal_flush_interval_seconds: Some(7),
            verbosity: Some(0),
            ..ConfigStore::default()
        };

        let mut store = before.clone();
        load_scalar_fields(&parse(FULL_FILE), &mut store).unwrap();

        assert_eq!(store, before);
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let file = parse(FULL_FILE);

        let mut once = ConfigStore::default();
        load_scalar_fields(&file, &mut once).unwrap();

        let mut twice = ConfigStore::default();
        load_scalar_fields(&file, &mut twice).unwrap();
        load_scalar_fields(&file, &mut twice).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn absent_keys_stay_unset() {
        let mut store = ConfigStore::default();
        load_scalar_fields(&parse("username = alice\n"), &mut store).unwrap();

        assert_eq!(store, ConfigStore::default());
    }

    #[test]
    fn legacy_interval_alias_is_used_when_current_name_is_absent() {
        let mut store = ConfigStore::default();
        load_scalar_fields(&parse("cache_interval = 120\n"), &mut store).unwrap();

        assert_eq!(store.journal_flush_interval_seconds, Some(120));
    }

    #[test]
    fn current_interval_name_wins_over_alias() {
        let mut store = ConfigStore::default();
        load_scalar_fields(
            &parse("cache_interval = 120\njournal_interval = 60\n"),
            &mut store,
        )
        .unwrap();

        assert_eq!(store.journal_flush_interval_seconds, Some(60));
    }

    #[test]
    fn type_mismatch_is_fatal() {
        let mut store = ConfigStore::default();
        let result = load_scalar_fields(&parse("port = many\n"), &mut store);

        assert!(matches!(result, Err(ConfigurationError::Malformed { .. })));
    }

    #[test]
    fn value_errors_report_the_canonical_path() {
        let temporary_directory = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(temporary_directory.path().join("sub")).unwrap();
        std::fs::write(temporary_directory.path().join("m.conf"), "port = many\n").unwrap();

        let indirect = temporary_directory.path().join("sub").join("..").join("m.conf");
        let canonical = dunce::canonicalize(temporary_directory.path().join("m.conf")).unwrap();

        let file = KeyFile::load(&indirect).unwrap();
        let mut store = ConfigStore::default();

        match load_scalar_fields(&file, &mut store) {
            Err(ConfigurationError::Malformed { path, .. }) => assert_eq!(path, canonical),
            other => panic!("expected a malformed file error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_port_is_fatal() {
        let mut store = ConfigStore::default();
        let result = load_scalar_fields(&parse("port = 65536\n"), &mut store);

        assert!(matches!(result, Err(ConfigurationError::Malformed { .. })));
    }

    #[test]
    fn reports_whether_a_value_was_loaded() {
        let file = parse("host = a\n");

        let mut unset = None;
        assert!(load_string(&file, "host", &mut unset).unwrap());
        assert_eq!(unset.as_deref(), Some("a"));

        let mut set = Some("cli".to_string());
        assert!(!load_string(&file, "host", &mut set).unwrap());
        assert_eq!(set.as_deref(), Some("cli"));

        let mut missing: Option<u16> = None;
        assert!(!load_integer(&file, "port", &mut missing).unwrap());
        assert_eq!(missing, None);
    }
}
