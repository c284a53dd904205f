//! Command-line interface definitions.
//!
//! Anything given here takes priority over the configuration file and the environment.

use std::path::PathBuf;

use clap::Parser;

use crate::configuration::{ConfigStore, TargetOrdering};


/// Largest interval the TOML dump of the configuration can represent.
const MAXIMUM_INTERVAL_SECONDS: u64 = i64::MAX as u64;


/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "mpdscribble",
    author,
    about = "Submits the songs MPD plays to one or more scrobbler services.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, `~/.mpdscribble/mpdscribble.conf` and then
    /// `/etc/mpdscribble.conf` are tried.
    #[arg(
        short = 'c',
        long = "conf",
        help = "Path to the configuration file. Defaults to ~/.mpdscribble/mpdscribble.conf \
                or /etc/mpdscribble.conf, whichever exists."
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[arg(long = "log", help = "Log file path, or \"-\" for standard error.")]
    pub log_path: Option<PathBuf>,

    #[arg(long = "pidfile", help = "Where to write the process id.")]
    pub pid_file_path: Option<PathBuf>,

    #[arg(long = "daemon-user", help = "User to switch to after startup.")]
    pub daemon_user: Option<String>,

    #[arg(long = "host", help = "MPD host. Falls back to $MPD_HOST, then localhost.")]
    pub host: Option<String>,

    #[arg(long = "port", help = "MPD port. Falls back to $MPD_PORT, then 6600.")]
    pub port: Option<u16>,

    #[arg(long = "proxy", help = "HTTP proxy for submissions. Falls back to $http_proxy.")]
    pub proxy: Option<String>,

    #[arg(
        long = "sleep",
        allow_negative_numbers = true,
        help = "Seconds to wait between polls (at least 1)."
    )]
    pub sleep_interval_seconds: Option<i64>,

    #[arg(
        long = "journal-interval",
        alias = "cache-interval",
        value_parser = clap::value_parser!(u64).range(..=MAXIMUM_INTERVAL_SECONDS),
        help = "Seconds between journal flushes. Defaults to 600."
    )]
    pub journal_flush_interval_seconds: Option<u64>,

    #[arg(
        short = 'v',
        long = "verbose",
        help = "Verbosity: 0 warnings, 1 info (default), 2 debug, 3 trace."
    )]
    pub verbosity: Option<u8>,

    #[arg(
        long = "target-order",
        value_enum,
        default_value_t = TargetOrdering::Legacy,
        help = "Order of the configured targets: legacy (last section first) or file."
    )]
    pub target_ordering: TargetOrdering,

    #[arg(
        long = "print-configuration",
        help = "Print the resolved configuration as TOML (passwords masked) and exit."
    )]
    pub print_configuration: bool,
}


impl From<&CLIArgs> for ConfigStore {
    fn from(arguments: &CLIArgs) -> Self {
        ConfigStore {
            config_path: arguments.configuration_file_path.clone(),
            log_path: arguments.log_path.clone(),
            pid_file_path: arguments.pid_file_path.clone(),
            daemon_user: arguments.daemon_user.clone(),
            host: arguments.host.clone(),
            port: arguments.port,
            proxy: arguments.proxy.clone(),
            sleep_interval_seconds: arguments.sleep_interval_seconds,
            journal_flush_interval_seconds: arguments.journal_flush_interval_seconds,
            verbosity: arguments.verbosity,
            ..ConfigStore::default()
        }
    }
}
