//! Run command implementation

use anyhow::{Context, Result};
use colored::*;
use keyword_formatter::config::Config;
use keyword_formatter::errors::print_warning;
use keyword_formatter::event::{self, RecordRef};
use keyword_formatter::output;
use keyword_formatter::run::run;
use keyword_formatter::store::JsonTitleStore;

pub fn run_command(config: &Config, record: Option<&str>) -> Result<()> {
    let record: RecordRef = match record {
        Some(text) => text.parse()?,
        None => event::record_from_env().context("Failed to resolve the record from the event")?,
    };

    let inputs = config.process()?;
    let mut store = JsonTitleStore::open(&config.store)?;

    if inputs.dry_run {
        print_warning("Dry run: no changes will be written");
    }

    let outcome = run(&mut store, &record, &inputs)?;

    match output::output_path() {
        Some(path) => output::write_outputs(&path, &outcome)?,
        None => print!("{}", output::render_outputs(&outcome)),
    }

    if outcome.applied {
        eprintln!("{} Updated {}", "✓".green(), record);
    } else if outcome.changed {
        eprintln!("{} Dry run: {} not updated", "→".yellow(), record);
    } else {
        eprintln!("{} No title changes needed for {}", "→".cyan(), record);
    }

    Ok(())
}
