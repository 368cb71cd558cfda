//! Show command - prints one cloud connection with secrets masked.

use std::path::Path;

use anyhow::Context;
use cloudform_core::prelude::*;
use console::style;

use super::list::join_or_dash;
use crate::OutputFormat;
use crate::ui::{colors, on_off, print_command_header, print_detail, valid_invalid};

/// Prints record `id` as text or as masked JSON.
pub fn run(id: &str, format: OutputFormat, config_path: Option<&Path>) -> super::Result {
    let config = super::load_config(config_path)?;
    let dataset = super::open_dataset(&config)?;

    let record = dataset
        .get(id)
        .with_context(|| format!("no cloud connection with id '{id}'"))?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&record.redacted()).context("failed to encode record")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            print_command_header("show");
            print_text(id, record);
        }
    }

    Ok(())
}

fn print_text(id: &str, record: &CloudRecord) {
    let provider = record.provider();

    println!(
        "{} {}",
        colors::primary().apply_to(record.name()),
        colors::muted().apply_to(format!("({id})"))
    );
    println!();

    print_detail("provider", &format!("{} ({provider})", provider.name()));
    print_detail("groups", &join_or_dash(record.cloud_groups().iter().map(String::as_str)));
    print_detail("regions", &join_or_dash(record.regions().iter().map(String::as_str)));

    println!();
    println!("{}", style("Credentials").bold());
    print_detail("credential type", record.credential_type().as_str());
    let credentials = record.credentials();
    for &field in editable_fields(provider) {
        if let Some(value) = credentials.display_value(field) {
            let shown = if value.is_empty() { "-".to_string() } else { value };
            print_detail(field.as_str(), &shown);
        }
    }
    print_detail("fingerprint", &credentials.fingerprint());

    println!();
    println!("{}", style("Collection").bold());
    print_detail(
        EventSource::label(provider),
        record.event_source().map_or("-", EventSource::name),
    );
    print_detail("event processing", valid_invalid(record.event_process_enabled()));
    print_detail("user activity", on_off(record.user_activity_enabled()));
    let schedule = record
        .schedule()
        .map_or_else(|| "off".to_string(), ScheduleScanSetting::summary);
    print_detail("scheduled scan", &schedule);
    print_detail("proxy", record.proxy_url().unwrap_or("-"));
}
