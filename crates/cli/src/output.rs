// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use nbt_core::Target;
use nbt_engine::RunEvent;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Facets with no value render as `-`.
fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Aligned `key: value` listing of a decoded target.
pub fn format_target(target: &Target) -> String {
    let rows = [
        ("target", target.name.as_str()),
        ("app label", target.app_label.as_str()),
        ("os flavor", target.os.as_str()),
        ("accelerator", target.accelerator.as_str()),
        ("python", target.python.as_str()),
    ];
    let mut out = String::new();
    for (key, value) in rows {
        out.push_str(&format!("{:<12} {}\n", format!("{}:", key), or_dash(value)));
    }
    out
}

/// Print a decoded target in text or JSON format.
pub fn print_target(target: &Target, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", format_target(target)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(target)?),
    }
    Ok(())
}

/// Progress line for a run event.
pub fn event_line(event: &RunEvent) -> String {
    match event {
        RunEvent::PodFound { pod, notebook } => {
            format!("Found pod: {} ({})", pod, color::muted(&notebook.to_string()))
        }
        RunEvent::SuitePassed { suite } => format!("{} {}", color::pass("SUCCESS:"), suite),
        RunEvent::SuiteSkipped { suite, missing } => format!(
            "{} {} {}",
            color::muted("SKIPPED:"),
            suite,
            color::muted(&format!("(test file not found at {})", missing.display()))
        ),
    }
}

/// Remote error-file contents between framing lines.
pub fn print_suite_log(log: &str) {
    println!("╭── {} ──", color::header("notebook error log"));
    print!("{}", log);
    if !log.ends_with('\n') {
        println!();
    }
    println!("╰── {} ──", color::header("end log"));
}
