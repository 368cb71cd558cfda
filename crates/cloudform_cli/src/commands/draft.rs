//! Draft flags shared by `create` and `edit`, and the submit flow.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use cloudform_core::prelude::*;
use cloudform_core::validate;
use console::style;

use crate::ui::{self, colors, exit, indicators, pluralise_word};

/// Parses a `field=value` credential assignment.
fn parse_credential(s: &str) -> Result<(CredentialField, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid credential '{s}' (expected FIELD=VALUE)"))?;
    let field = field.trim().parse::<CredentialField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

/// Edits applied to a draft before it is submitted.
#[derive(Debug, Clone, Default, Args)]
pub struct DraftArgs {
    /// Switch provider, resetting credentials to that provider's defaults.
    #[arg(short, long)]
    pub provider: Option<Provider>,

    /// Display name of the connection.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Toggle a cloud group (repeatable).
    #[arg(short, long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Toggle a region (repeatable). The mandatory region cannot be removed.
    #[arg(short, long = "region", value_name = "REGION")]
    pub regions: Vec<String>,

    /// Credential type; must belong to the provider.
    #[arg(long)]
    pub credential_type: Option<CredentialType>,

    /// Set a credential field, e.g. `accessKeyId=AKIA...` (repeatable).
    #[arg(long = "cred", value_name = "FIELD=VALUE", value_parser = parse_credential)]
    pub credentials: Vec<(CredentialField, String)>,

    /// Enable scheduled scans with this frequency (hour, day, week, month).
    #[arg(short, long, value_name = "FREQUENCY")]
    pub schedule: Option<Frequency>,

    /// Scheduled scan hour (0-23).
    #[arg(long, value_name = "HOUR")]
    pub hour: Option<String>,

    /// Scheduled scan minute (0-55, multiples of 5).
    #[arg(long, value_name = "MINUTE")]
    pub minute: Option<String>,

    /// Scheduled scan day of month (1-28).
    #[arg(long, value_name = "DAY")]
    pub date: Option<String>,

    /// Scheduled scan weekday (MON..SUN).
    #[arg(long, value_name = "DAY")]
    pub weekday: Option<String>,

    /// Disable scheduled scans.
    #[arg(long, conflicts_with_all = ["schedule", "hour", "minute", "date", "weekday"])]
    pub no_schedule: bool,

    /// CloudTrail name (AWS) or storage account name (Azure, GCP).
    #[arg(long, value_name = "NAME")]
    pub event_source: Option<String>,

    /// Proxy URL; an empty value removes it.
    #[arg(long, value_name = "URL")]
    pub proxy_url: Option<String>,

    /// Enable or disable event processing.
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub event_process: Option<bool>,

    /// Enable or disable user activity collection.
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub user_activity: Option<bool>,

    /// Validate and print the payload without saving it.
    #[arg(long)]
    pub dry_run: bool,

    /// Path to `.cloudform.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl DraftArgs {
    /// Applies every flag to the open draft of `form`.
    ///
    /// Provider comes first since it resets credentials; schedule flags are
    /// applied after the frequency is chosen.
    pub fn apply<L: RecordLookup, S: RecordSink>(&self, form: &mut CloudForm<L, S>) -> super::Result {
        if let Some(provider) = self.provider {
            form.set_provider(provider)?;
        }
        if let Some(name) = &self.name {
            form.set_name(name.as_str())?;
        }
        for group in &self.groups {
            form.toggle_group(group)
                .with_context(|| format!("cannot toggle group '{group}'"))?;
        }
        for region in &self.regions {
            let changed = form
                .toggle_region(region)
                .with_context(|| format!("cannot toggle region '{region}'"))?;
            if !changed {
                ui::print_warning(&format!("region '{region}' is mandatory and stays selected"));
            }
        }
        if let Some(credential_type) = self.credential_type {
            form.set_credential_type(credential_type)?;
        }
        for (field, value) in &self.credentials {
            form.edit_credential_field(*field, value.as_str())?;
        }

        self.apply_schedule(form)?;

        if let Some(name) = &self.event_source {
            form.set_event_source(name)?;
        }
        if let Some(url) = &self.proxy_url {
            form.set_proxy_url(url)?;
        }
        if let Some(enabled) = self.event_process {
            form.set_event_process_enabled(enabled)?;
        }
        if let Some(enabled) = self.user_activity {
            form.set_user_activity_enabled(enabled)?;
        }
        Ok(())
    }

    fn apply_schedule<L: RecordLookup, S: RecordSink>(&self, form: &mut CloudForm<L, S>) -> super::Result {
        if self.no_schedule {
            form.set_schedule_enabled(false)?;
            return Ok(());
        }
        if let Some(frequency) = self.schedule {
            form.set_schedule_enabled(true)?;
            form.set_frequency(frequency)?;
        }
        if let Some(hour) = &self.hour {
            form.set_schedule_hour(hour)?;
        }
        if let Some(minute) = &self.minute {
            form.set_schedule_minute(minute)?;
        }
        if let Some(date) = &self.date {
            form.set_schedule_date(date)?;
        }
        if let Some(weekday) = &self.weekday {
            form.set_schedule_weekday(weekday)?;
        }
        Ok(())
    }
}

/// Validates the draft and either previews it or submits it to the sink.
///
/// Exits with [`exit::INVALID`] when validation fails.
pub fn finish<L: RecordLookup, S: RecordSink>(form: &mut CloudForm<L, S>, dry_run: bool) -> super::Result {
    if dry_run {
        let payload = form.payload()?;
        let errors = validate(payload.record());
        if !errors.is_empty() {
            report_invalid(&errors);
        }
        let json = serde_json::to_string_pretty(&payload.redacted()).context("failed to encode payload")?;
        println!("{json}");
        println!();
        ui::print_info("dry run: nothing was saved");
        return Ok(());
    }

    let rt = super::runtime()?;
    match rt.block_on(form.submit()) {
        Ok(receipt) => {
            println!();
            let verb = if receipt.updated { "updated" } else { "created" };
            let target = receipt.id.as_deref().unwrap_or("new connection");
            ui::print_success(&format!("{verb} {target} at {}", receipt.saved_at));
            Ok(())
        }
        Err(SubmitError::Invalid(errors)) => report_invalid(&errors),
        Err(e) => Err(e).context("failed to save connection"),
    }
}

fn report_invalid(errors: &FieldErrors) -> ! {
    let count = errors.len();
    eprintln!(
        "{} {} {} {}",
        colors::error().apply_to(indicators::ERROR),
        style(count).bold(),
        pluralise_word(count, "field", "fields"),
        colors::secondary().apply_to("failed validation")
    );
    for (key, error) in errors.iter() {
        eprintln!(
            "  {}  {}",
            colors::accent().apply_to(format!("{:<20}", key.as_str())),
            colors::secondary().apply_to(error)
        );
    }
    std::process::exit(exit::INVALID)
}
