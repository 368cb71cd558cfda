//! Edit command - loads a stored connection, changes it and resubmits it.

use anyhow::Context;
use cloudform_core::prelude::*;
use cloudform_store::ConsoleSink;

use super::draft::{self, DraftArgs};
use crate::ui::{colors, create_spinner, format_duration, print_command_header, print_info};

/// Executes the `cloudform edit` command.
///
/// The record is loaded behind a spinner. A missing record or a failed load
/// is reported as an error.
pub fn run(id: &str, args: &DraftArgs) -> super::Result {
    print_command_header("edit");

    let config = super::load_config(args.config.as_deref())?;
    let dataset = super::open_dataset(&config)?;
    let rt = super::runtime()?;

    let mut form = CloudForm::new(dataset, ConsoleSink::stdout(), FormConfig::from(&config));

    let spinner = create_spinner(&format!("loading {id}"));
    let outcome = rt.block_on(form.load_for_edit(id));
    let elapsed = spinner.elapsed();
    spinner.finish_and_clear();

    match outcome {
        LoadOutcome::Loaded => {}
        LoadOutcome::NotFound => anyhow::bail!("no cloud connection with id '{id}'"),
        LoadOutcome::Failed(error) => {
            return Err(error).with_context(|| format!("failed to load '{id}'"));
        }
        LoadOutcome::Stale => anyhow::bail!("load of '{id}' was superseded"),
    }

    if let Some(record) = form.draft() {
        print_info(&format!(
            "loaded {} {}",
            colors::accent().apply_to(record.name()),
            colors::muted().apply_to(format!("({})", format_duration(elapsed)))
        ));
    }

    args.apply(&mut form)?;
    draft::finish(&mut form, args.dry_run)
}
