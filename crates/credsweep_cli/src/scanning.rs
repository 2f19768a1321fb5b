//! Scanner construction and configuration loading.

use std::path::Path;

use anyhow::Context as _;
use credsweep_core::{Config, RuleRegistry, Scanner};

/// Compiles the built-in rules into a ready scanner.
pub fn build_scanner() -> anyhow::Result<Scanner> {
    let registry = RuleRegistry::builtin().context("compiling built-in rules")?;
    Ok(Scanner::new(registry))
}

/// Loads configuration: an explicit `--config` path must exist and
/// parse; otherwise `.credsweep.toml` is picked up from the scan root
/// when present.
pub fn load_config(explicit: Option<&Path>, scan_root: &Path) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => Config::load(path).context("loading configuration"),
        None => Config::load_from_dir(scan_root).context("loading configuration"),
    }
}

/// Configures the global rayon thread pool with the requested number of
/// threads, if specified.
pub fn configure_thread_pool(concurrency: Option<usize>) -> anyhow::Result<()> {
    if let Some(n) = concurrency {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("failed to configure thread pool")?;
    }
    Ok(())
}
