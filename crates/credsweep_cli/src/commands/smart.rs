//! Smart-scan command - dispatches a target to remote fetch or local
//! traversal.

use std::path::Path;

use anyhow::Context as _;
use credsweep_core::{Config, ScanReport, SmartScan, is_remote_target, smart_scan};

use super::{handle_exit_code, write_report};
use crate::fetch::HttpFetcher;
use crate::scanning::{build_scanner, load_config};
use crate::ui::print_command_header;
use crate::{OutputFormat, SmartScanArgs};

/// Executes the `credsweep smart-scan` command.
pub fn run(args: &SmartScanArgs) -> super::Result {
    if matches!(args.format, OutputFormat::Text) {
        print_command_header("smart-scan");
    }

    let scanner = build_scanner()?;
    let fetcher = HttpFetcher::new()?;
    let config = load_target_config(args)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime")?;

    let result = rt.block_on(smart_scan(&scanner, &args.target, &fetcher, &config))?;

    let report = match result {
        SmartScan::Remote { source, detections } => {
            let findings = detections.iter().map(|d| d.finding.clone()).collect();
            ScanReport::new(&source, findings, vec![])
        }
        SmartScan::Local(tree) => tree.report(),
    };

    write_report(&report, args.format, None)?;

    handle_exit_code(&report, args.exit_zero);
    Ok(())
}

/// Remote targets have no directory to read config from; local targets
/// pick up `.credsweep.toml` beside them unless `--config` overrides.
fn load_target_config(args: &SmartScanArgs) -> super::Result<Config> {
    if is_remote_target(&args.target) {
        match args.config.as_deref() {
            Some(path) => Config::load(path).context("loading configuration"),
            None => Ok(Config::default()),
        }
    } else {
        load_config(args.config.as_deref(), Path::new(&args.target))
    }
}
