//! Scan command - walks a directory tree for leaked credentials.

use std::path::PathBuf;
use std::time::Instant;

use credsweep_core::walk::{collect_files, resolve_root, scan_file, scan_file_lines};
use credsweep_core::{Config, Detection, ScanError, Scanner, TreeScan};
use rayon::prelude::*;

use super::{handle_exit_code, should_show_progress, write_report};
use crate::scanning::{build_scanner, configure_thread_pool, load_config};
use crate::ui::{colors, create_file_progress, format_duration, pluralise_word, print_command_header};
use crate::ScanArgs;

/// Executes the `credsweep scan` command.
pub fn run(args: &ScanArgs) -> super::Result {
    configure_thread_pool(args.concurrency)?;

    let show_progress = should_show_progress(args);
    let start = Instant::now();

    if show_progress {
        print_command_header("scan");
    }

    let scanner = build_scanner()?;
    let root = resolve_root(&args.path)?;

    let mut config = load_config(args.config.as_deref(), &root)?;
    if args.max_file_size.is_some() {
        config.max_file_size = args.max_file_size;
    }

    let (files, walk_errors) = collect_files(&root, &config);

    // Even with nothing to scan the caller gets a well-formed (empty)
    // report; only the chrome line is terminal-only.
    if files.is_empty() && show_progress {
        println!("{} no files to scan", colors::warning().apply_to("●"));
    }

    let (detections, mut errors) = run_parallel_scan(&scanner, &root, &files, &config, args.lines, show_progress);

    let mut all_errors = walk_errors;
    all_errors.append(&mut errors);

    let tree = TreeScan::from_parts(root, detections, all_errors);
    let report = tree.report();

    if show_progress && !files.is_empty() {
        println!(
            "{}",
            colors::muted().apply_to(format!(
                "scanned {} {} in {}",
                files.len(),
                pluralise_word(files.len(), "file", "files"),
                format_duration(start.elapsed())
            ))
        );
        println!();
    }

    write_report(&report, args.format, args.output.as_deref())?;

    handle_exit_code(&report, args.exit_zero);
    Ok(())
}

/// Scans the collected files in parallel, preserving collection order
/// in the output.
fn run_parallel_scan(
    scanner: &Scanner,
    root: &std::path::Path,
    files: &[PathBuf],
    config: &Config,
    lines: bool,
    show_progress: bool,
) -> (Vec<Detection>, Vec<ScanError>) {
    let pb = show_progress.then(|| create_file_progress(files.len()));

    // par_iter + collect keeps item order, so output stays deterministic.
    let results: Vec<Result<Vec<Detection>, ScanError>> = files
        .par_iter()
        .map(|path| {
            let result = if lines {
                scan_file_lines(scanner, root, path, config.max_file_size)
            } else {
                scan_file(scanner, root, path, config.max_file_size)
            };
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            result
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let mut detections = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(found) => detections.extend(found),
            Err(err) => errors.push(err),
        }
    }

    (detections, errors)
}
