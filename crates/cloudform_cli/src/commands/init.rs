//! Init command - creates `.cloudform.toml` configuration file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use cloudform_core::CONFIG_FILENAME;
use cloudform_core::prelude::*;
use console::style;

use crate::ui::{colors, format_duration, indicators, print_command_header, print_info};

/// Executes the `cloudform init` command, writing the default configuration.
///
/// An existing file is left untouched unless `force` is set.
pub fn run(force: bool, output_path: Option<PathBuf>) -> super::Result {
    print_command_header("init");

    let output_path = output_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    if output_path.exists() && !force {
        handle_existing(&output_path);
        return Ok(());
    }

    let start = Instant::now();
    Config::default().save(&output_path)?;

    print_result(&output_path, start.elapsed());
    Ok(())
}

fn handle_existing(path: &Path) {
    println!(
        "{} {} already exists",
        colors::warning().apply_to(indicators::WARNING),
        style(path.display()).bold()
    );
    println!("  {}", colors::secondary().apply_to("use --force to overwrite"));
    println!();
}

fn print_result(path: &Path, elapsed: std::time::Duration) {
    println!(
        "{} {} {}",
        colors::success().apply_to(indicators::ADDED),
        style(path.display()).bold(),
        colors::muted().apply_to(format!("({})", format_duration(elapsed)))
    );
    println!();
    print_info("Run `cloudform list` to see stored connections");
}
