//! One formatting run: read the title, format it, write it back

use crate::config::ProcessedInputs;
use crate::errors::Result;
use crate::event::RecordRef;
use crate::format::format_title;
use crate::store::TitleStore;
use log::{debug, info};

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Title before formatting
    pub original: String,
    /// Title after formatting
    pub title: String,
    /// Whether formatting changed the title
    pub changed: bool,
    /// Whether the new title was written back
    pub applied: bool,
}

pub fn run<S: TitleStore>(
    store: &mut S,
    record: &RecordRef,
    inputs: &ProcessedInputs,
) -> Result<Outcome> {
    let original = store.fetch_title(record)?;
    info!("Record {}: {:?}", record, original);
    debug!("Inputs: {:?}", inputs);

    let title = format_title(&original, &inputs.rule, inputs.prefix.as_deref())?;
    let changed = title != original;
    info!("Title: \"{}\"", title);

    let mut outcome = Outcome { original, title, changed, applied: false };

    if !changed {
        info!("No title changes needed");
        return Ok(outcome);
    }

    info!("New title: \"{}\"", outcome.title);

    if inputs.dry_run {
        info!("Dry run: No changes applied");
        return Ok(outcome);
    }

    store.replace_title(record, &outcome.title)?;
    info!("Title updated successfully");
    outcome.applied = true;

    Ok(outcome)
}
