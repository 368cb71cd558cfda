//! Create command - builds a new connection and submits it.

use cloudform_core::prelude::*;
use cloudform_store::ConsoleSink;

use super::draft::{self, DraftArgs};
use crate::ui::print_command_header;

/// Executes the `cloudform create` command: opens a blank draft, applies the
/// draft flags and submits the result to the console sink.
pub fn run(args: &DraftArgs) -> super::Result {
    print_command_header("create");

    let config = super::load_config(args.config.as_deref())?;
    let dataset = super::open_dataset(&config)?;

    let mut form = CloudForm::new(dataset, ConsoleSink::stdout(), FormConfig::from(&config));
    form.init_create();
    args.apply(&mut form)?;

    draft::finish(&mut form, args.dry_run)
}
