//! Filesystem traversal: select eligible files, feed them to the scanner.

use std::io::Read;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
#[cfg(feature = "tracing")]
use tracing::debug;

use crate::config::Config;
use crate::finding::{Credential, Detection};
use crate::report::{ScanError, ScanReport};
use crate::scanner::Scanner;

/// Directory names pruned during traversal. Config may extend this set
/// but nothing can shrink it.
pub const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules", "venv", "bin", "__pycache__", "dist"];

/// File extensions recognized as scannable. Matching is a name-suffix
/// check, so a bare `.env` file qualifies. Files outside this set are
/// never opened - a performance/precision tradeoff, not a completeness
/// guarantee.
pub const SCAN_EXTENSIONS: &[&str] = &["py", "js", "ts", "json", "env", "yaml", "yml", "txt", "ini", "md"];

/// Files at or above this size are memory-mapped instead of heap-read.
const MMAP_THRESHOLD: u64 = 32 * 1024;

/// Errors that prevent a traversal from starting at all.
#[derive(Debug, thiserror::Error)]
pub enum TraversalError {
    /// The resolved scan root does not exist.
    #[error("path not found: {path}")]
    PathNotFound {
        /// The absolute path that was resolved and checked.
        path: PathBuf,
    },

    /// The root path could not be resolved to an absolute path.
    #[error("cannot resolve {path}: {source}")]
    Resolve {
        /// The path as given by the caller.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// The raw result of a tree scan, before raw values are discarded.
///
/// [`TreeScan::report`] produces the display-safe [`ScanReport`];
/// [`TreeScan::into_credentials`] is the one explicit path to the raw
/// values for validation.
#[derive(Debug)]
pub struct TreeScan {
    root: PathBuf,
    detections: Vec<Detection>,
    errors: Vec<ScanError>,
}

impl TreeScan {
    /// Assembles a tree scan from already-collected parts. `root` must
    /// be absolute.
    #[must_use]
    pub fn from_parts(root: PathBuf, detections: Vec<Detection>, errors: Vec<ScanError>) -> Self {
        Self {
            root,
            detections,
            errors,
        }
    }

    /// The absolute root that was scanned.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The detections, in discovery order.
    #[must_use]
    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    /// Builds the display-safe report. Raw credential values do not
    /// cross this boundary.
    #[must_use]
    pub fn report(&self) -> ScanReport {
        let findings = self.detections.iter().map(|d| d.finding.clone()).collect();
        ScanReport::new(&self.root.display().to_string(), findings, self.errors.clone())
    }

    /// Consumes the scan, returning the raw credentials for validation.
    #[must_use]
    pub fn into_credentials(self) -> Vec<Credential> {
        self.detections.into_iter().map(Detection::into_credential).collect()
    }
}

/// Walks `root` and scans every eligible file.
///
/// Fails fast only if the root itself is missing; everything below that
/// is isolated per file - an unreadable file becomes a [`ScanError`]
/// entry and traversal continues. Walk order is deterministic for a
/// fixed tree (entries sorted by file name).
pub fn scan_tree(scanner: &Scanner, root: &Path, config: &Config) -> Result<TreeScan, TraversalError> {
    let root = resolve_root(root)?;
    let (files, mut errors) = collect_files(&root, config);

    #[cfg(feature = "tracing")]
    debug!(root = %root.display(), files = files.len(), "scanning tree");

    let mut detections = Vec::new();
    for file in files {
        match scan_file(scanner, &root, &file, config.max_file_size) {
            Ok(found) => detections.extend(found),
            Err(err) => errors.push(err),
        }
    }

    Ok(TreeScan::from_parts(root, detections, errors))
}

/// Resolves the scan root to an absolute path and checks it exists.
pub fn resolve_root(root: &Path) -> Result<PathBuf, TraversalError> {
    let absolute = std::path::absolute(root).map_err(|source| TraversalError::Resolve {
        path: root.to_path_buf(),
        source,
    })?;

    if !absolute.exists() {
        return Err(TraversalError::PathNotFound { path: absolute });
    }
    Ok(absolute)
}

/// Collects eligible files under an absolute root, in deterministic
/// order, along with any walk-level errors (broken links, unreadable
/// directories).
#[must_use]
pub fn collect_files(root: &Path, config: &Config) -> (Vec<PathBuf>, Vec<ScanError>) {
    let extra_dirs = config.exclude_dirs.clone();
    let mut files = Vec::new();
    let mut errors = Vec::new();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .sort_by_file_name(std::ffi::OsStr::cmp)
        .filter_entry(move |entry| {
            // Never filter the root itself; a scan rooted at `dist/` is
            // the caller's explicit choice.
            entry.depth() == 0 || !is_excluded_dir(entry, &extra_dirs)
        })
        .build();

    for result in walker {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) && is_scannable_name(&entry.file_name().to_string_lossy(), config) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => errors.push(ScanError {
                source: "<traversal>".into(),
                message: err.to_string().into(),
            }),
        }
    }

    (files, errors)
}

fn is_excluded_dir(entry: &ignore::DirEntry, extra: &[String]) -> bool {
    if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    EXCLUDED_DIRS.contains(&name.as_ref()) || extra.iter().any(|d| d == name.as_ref())
}

/// Returns `true` if a file name ends with a recognized extension.
fn is_scannable_name(name: &str, config: &Config) -> bool {
    // Suffix match rather than `Path::extension`: a bare `.env` has no
    // extension in path terms but absolutely must be scanned.
    let matches_ext = |ext: &str| {
        name.strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.'))
    };

    SCAN_EXTENSIONS.iter().any(|e| matches_ext(e)) || config.extensions.iter().any(|e| matches_ext(e))
}

/// Reads and scans one file, labelling findings with the root-relative
/// forward-slash path.
pub fn scan_file(
    scanner: &Scanner,
    root: &Path,
    path: &Path,
    max_file_size: Option<u64>,
) -> Result<Vec<Detection>, ScanError> {
    read_and_scan(root, path, max_file_size, |content, label| scanner.scan(content, label))
}

/// Line-mode variant of [`scan_file`]: findings carry 1-based line
/// numbers, at the cost of missing matches that straddle a line break.
pub fn scan_file_lines(
    scanner: &Scanner,
    root: &Path,
    path: &Path,
    max_file_size: Option<u64>,
) -> Result<Vec<Detection>, ScanError> {
    read_and_scan(root, path, max_file_size, |content, label| {
        scanner.scan_lines(content, label)
    })
}

fn read_and_scan(
    root: &Path,
    path: &Path,
    max_file_size: Option<u64>,
    scan: impl FnOnce(&str, &str) -> Vec<Detection>,
) -> Result<Vec<Detection>, ScanError> {
    let label = relative_label(root, path);

    let content = read_text_lossy(path, max_file_size).map_err(|message| ScanError {
        source: label.clone().into(),
        message: message.into(),
    })?;

    Ok(scan(&content, &label))
}

/// Root-relative, forward-slash-normalized source label.
#[must_use]
pub fn relative_label(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<_> = relative.components().map(|c| c.as_os_str().to_string_lossy()).collect();
    parts.join("/")
}

/// Reads a file as text with a permissive decoding policy: invalid
/// UTF-8 sequences are replaced, never fatal. Only I/O failures (and
/// the size cap) are errors.
///
/// Small files are read with a single syscall; large files are
/// memory-mapped so the OS page cache is used directly.
fn read_text_lossy(path: &Path, max_file_size: Option<u64>) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let len = file.metadata().map_err(|e| e.to_string())?.len();

    match max_file_size {
        Some(max) if len > max => return Err(format!("file size {len} exceeds limit {max}")),
        _ => {}
    }

    if len >= MMAP_THRESHOLD {
        read_large_file_mmap(&file)
    } else {
        read_small_file(&mut file, len)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "sizes above any sane cap were already rejected; remaining lengths fit in usize"
)]
fn read_small_file(file: &mut std::fs::File, len: u64) -> Result<String, String> {
    let mut bytes = Vec::with_capacity(len as usize);
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_large_file_mmap(file: &std::fs::File) -> Result<String, String> {
    // SAFETY: The map is read-only and dropped before this function
    // returns. Concurrent truncation could cause SIGBUS; this is the
    // same risk git and ripgrep accept for mmap-based reads.
    #[expect(unsafe_code, reason = "mmap requires unsafe; lifetime is scoped to this function")]
    let mmap = unsafe { memmap2::Mmap::map(file) }.map_err(|e| e.to_string())?;
    Ok(String::from_utf8_lossy(&mmap).into_owned())
}
