use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use tracing::info;

use crate::{
    cli::CLIArgs,
    configuration::{ConfigStore, Configuration, ConfigurationResolver},
    logging::{bootstrap_subscriber, initialize_tracing},
};

mod cli;
mod configuration;
mod logging;


fn log_configuration_summary(configuration: &Configuration) {
    info!(
        file = %configuration.file_path.display(),
        install_location = ?configuration.install_location,
        "Configuration loaded."
    );

    info!(
        host = %configuration.host,
        port = configuration.port,
        sleep = ?configuration.sleep_interval(),
        journal_flush = ?configuration.journal_flush_interval(),
        "MPD connection settings."
    );

    for target in &configuration.targets {
        info!(
            endpoint_url = %target.endpoint_url,
            username = %target.username,
            journal = %target.journal_path.display(),
            "Submission target."
        );
    }
}


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    // Command-line values are set first, so nothing after this overwrites them.
    let initial_store = ConfigStore::from(&cli_args);

    let resolver = ConfigurationResolver::from_process_environment()
        .with_target_ordering(cli_args.target_ordering);

    let configuration = tracing::subscriber::with_default(bootstrap_subscriber(), || {
        resolver.resolve(initial_store)
    })
    .wrap_err("Failed to load configuration.")?;


    if cli_args.print_configuration {
        let rendered = configuration
            .to_toml()
            .into_diagnostic()
            .wrap_err("Failed to render configuration.")?;

        print!("{rendered}");
        return Ok(());
    }


    let logging_raii_guard = initialize_tracing(configuration.verbosity, &configuration.log_path)
        .wrap_err("Failed to initialize tracing.")?;

    info!("Tracing initialized.");
    log_configuration_summary(&configuration);


    drop(logging_raii_guard);
    Ok(())
}
