//! Keyword formatter CLI tool

use anyhow::Result;
use clap::Parser;
use keyword_formatter::config::{Config, Overrides};
use keyword_formatter::errors::{print_error, print_error_with_suggestion};
use log::LevelFilter;
use std::path::Path;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config_file = cli.config.as_deref();

    // Execute the command
    let result = match cli.command {
        Commands::Format { title, keywords } => {
            load_config(config_file, &keywords.overrides())
                .and_then(|config| format_command(&config, &title))
        }
        Commands::Keywords { keywords } => {
            load_config(config_file, &keywords.overrides())
                .and_then(|config| show_keywords(&config))
        }
        Commands::Run { record, store, dry_run, keywords } => {
            let overrides = Overrides { store, dry_run, ..keywords.overrides() };
            load_config(config_file, &overrides)
                .and_then(|config| run_command(&config, record.as_deref()))
        }
    };

    if let Err(e) = result {
        let suggestion =
            e.downcast_ref::<keyword_formatter::Error>().and_then(|err| err.suggestion());
        match suggestion {
            Some(suggestion) => print_error_with_suggestion("Command failed", &e, suggestion),
            None => print_error("Command failed", &e),
        }
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(config_file: Option<&Path>, overrides: &Overrides) -> Result<Config> {
    Ok(Config::load(config_file, overrides)?)
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
