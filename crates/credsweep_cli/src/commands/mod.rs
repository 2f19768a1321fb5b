//! CLI command handlers.

/// Rule listing and inspection.
pub mod rules;
/// Directory tree scanning for leaked credentials.
pub mod scan;
/// Combined local/remote scanning.
pub mod smart;
/// Live credential validation.
pub mod validate;

/// Convenience alias for command return types.
pub type Result<T = ()> = anyhow::Result<T>;

use std::path::Path;

use credsweep_core::ScanReport;

use crate::ui::{colors, exit, indicators, pluralise_word, print_warning};
use crate::{OutputFormat, ScanArgs};

/// Renders a report in the requested format, to stdout or a file.
pub(crate) fn write_report(report: &ScanReport, format: OutputFormat, output: Option<&Path>) -> Result {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Text => render_text(report),
    };

    match output {
        Some(path) => std::fs::write(path, rendered + "\n")?,
        None => println!("{rendered}"),
    }

    Ok(())
}

fn render_text(report: &ScanReport) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();

    for finding in &report.findings {
        let _ = writeln!(
            out,
            "  {} {}",
            colors::error().apply_to(indicators::ERROR),
            colors::secondary().apply_to(finding)
        );
    }

    for error in &report.scan_errors {
        let _ = writeln!(
            out,
            "  {} {}: {}",
            colors::warning().apply_to(indicators::WARNING),
            colors::emphasis().apply_to(&error.source),
            colors::muted().apply_to(&error.message)
        );
    }

    let count = report.summary.total_detections;
    if count == 0 {
        let _ = write!(
            out,
            "{} no credentials found in {}",
            colors::success().apply_to(indicators::SUCCESS),
            colors::emphasis().apply_to(&report.summary.scanned_path)
        );
    } else {
        let _ = write!(
            out,
            "{} {} {} in {}",
            colors::error().apply_to(indicators::ERROR),
            colors::error().bold().apply_to(count),
            pluralise_word(count, "credential", "credentials"),
            colors::emphasis().apply_to(&report.summary.scanned_path)
        );
    }

    out
}

/// Applies the exit-code contract shared by the scan commands: exit 1
/// when findings exist, unless suppressed.
pub(crate) fn handle_exit_code(report: &ScanReport, exit_zero: bool) {
    if !report.scan_errors.is_empty() {
        print_warning(&format!(
            "{} {} could not be scanned",
            report.scan_errors.len(),
            pluralise_word(report.scan_errors.len(), "file", "files")
        ));
    }

    if !exit_zero && report.summary.total_detections > 0 {
        std::process::exit(exit::FINDINGS);
    }
}

/// Whether a command invocation should draw progress/header chrome.
pub(crate) const fn should_show_progress(args: &ScanArgs) -> bool {
    args.output.is_none() && matches!(args.format, OutputFormat::Text)
}
