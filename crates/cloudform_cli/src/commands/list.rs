//! List command - prints stored cloud connections grouped by provider.

use std::path::Path;

use cloudform_core::prelude::*;
use console::style;

use crate::ui::{colors, on_off, pluralise_word, print_command_header, truncate_with_ellipsis, valid_invalid};

const ID_WIDTH: usize = 20;
const NAME_WIDTH: usize = 24;
const GROUPS_WIDTH: usize = 28;
const REGIONS_WIDTH: usize = 36;

/// Lists every record in the dataset, optionally filtered by provider.
pub fn run(provider: Option<Provider>, config_path: Option<&Path>) -> super::Result {
    print_command_header("list");

    let config = super::load_config(config_path)?;
    let dataset = super::open_dataset(&config)?;

    let records: Vec<&CloudRecord> = dataset
        .records()
        .iter()
        .filter(|record| provider.is_none_or(|p| record.provider() == p))
        .collect();

    if records.is_empty() {
        println!(
            "{} {}",
            colors::muted().apply_to("○"),
            colors::secondary().apply_to("no cloud connections")
        );
        return Ok(());
    }

    let count = records.len();
    println!(
        "{}",
        colors::muted().apply_to(format!("{count} {}", pluralise_word(count, "connection", "connections")))
    );

    for p in Provider::ALL {
        let section: Vec<_> = records.iter().filter(|r| r.provider() == p).collect();
        if section.is_empty() {
            continue;
        }

        println!();
        println!(
            "{} {}",
            style(p.name()).bold(),
            colors::muted().apply_to(format!("({})", section.len()))
        );
        print_header();
        for record in section {
            print_row(record);
        }
    }

    Ok(())
}

fn print_header() {
    println!(
        "  {}",
        colors::muted().apply_to(format!(
            "{:<ID_WIDTH$}  {:<NAME_WIDTH$}  {:<GROUPS_WIDTH$}  {:<REGIONS_WIDTH$}  {:<8}  {}",
            "ID", "NAME", "GROUPS", "REGIONS", "EVENTS", "ACTIVITY"
        ))
    );
}

fn print_row(record: &CloudRecord) {
    let id = record.id().unwrap_or("-");
    let groups = join_or_dash(record.cloud_groups().iter().map(String::as_str));
    let regions = join_or_dash(record.regions().iter().map(String::as_str));

    let events = valid_invalid(record.event_process_enabled());
    let events_style = if record.event_process_enabled() {
        colors::success()
    } else {
        colors::error()
    };
    let activity = on_off(record.user_activity_enabled());
    let activity_style = if record.user_activity_enabled() {
        colors::success()
    } else {
        colors::muted()
    };

    println!(
        "  {}  {}  {}  {}  {}  {}",
        colors::accent().apply_to(format!("{id:<ID_WIDTH$}")),
        colors::secondary().apply_to(format!(
            "{:<NAME_WIDTH$}",
            truncate_with_ellipsis(record.name(), NAME_WIDTH)
        )),
        colors::muted().apply_to(format!("{:<GROUPS_WIDTH$}", truncate_with_ellipsis(&groups, GROUPS_WIDTH))),
        colors::muted().apply_to(format!(
            "{:<REGIONS_WIDTH$}",
            truncate_with_ellipsis(&regions, REGIONS_WIDTH)
        )),
        events_style.apply_to(format!("{events:<8}")),
        activity_style.apply_to(activity)
    );
}

/// Joins values with `, `, or returns `-` when there are none.
pub fn join_or_dash<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let joined = values.collect::<Vec<_>>().join(", ");
    if joined.is_empty() { "-".to_string() } else { joined }
}
