//! @dose
//! purpose: File discovery shared by the outline and watch commands. Turns the requested paths
//!     into a sorted, de-duplicated list of files to outline.
//!
//! when-editing:
//!     - !Directories are walked through exclusion::build_walker so gitignore and excludes apply
//!     - Files named explicitly are kept even if their extension isn't configured
//!
//! invariants:
//!     - Output order is deterministic (sorted), so outlines print in a stable order
//!     - Symlinks resolving outside the root are skipped unless --unsafe-follow is given

use crate::cli::CommonOptions;
use crate::config::Config;
use crate::exclusion::{build_exclude_globset, build_walker};
use std::path::{Path, PathBuf};

/// Collect all files to outline under `paths` (or the whole root if empty)
pub fn collect_files(
    paths: &[PathBuf],
    root: &Path,
    config: &Config,
    common: &CommonOptions,
) -> Vec<PathBuf> {
    let root_canon = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let exclusion = common.exclusion_config(&config.exclude);
    let explicit_excludes = build_exclude_globset(&exclusion.patterns);

    let search_paths = if paths.is_empty() {
        vec![root.to_path_buf()]
    } else {
        paths.iter().map(|p| resolve_path(root, p)).collect()
    };

    let mut files = Vec::new();

    for search_path in search_paths {
        if search_path.is_file() {
            let relative = search_path.strip_prefix(root).unwrap_or(&search_path);
            let excluded = explicit_excludes
                .as_ref()
                .is_some_and(|globset| globset.is_match(relative));
            if excluded {
                tracing::debug!("Skipping excluded file {}", search_path.display());
            } else {
                files.push(search_path);
            }
        } else if search_path.is_dir() {
            let mut walker = build_walker(&search_path, &exclusion);
            walker.follow_links(true);
            let unsafe_follow = common.unsafe_follow;
            let boundary = root_canon.clone();
            walker.filter_entry(move |entry| {
                is_allowed_symlink_target(entry, &boundary, unsafe_follow)
            });

            for entry in walker.build().filter_map(|e| e.ok()) {
                let entry_path = entry.path();
                if entry_path.is_file() && config.is_supported(entry_path) {
                    files.push(entry_path.to_path_buf());
                }
            }
        } else {
            tracing::warn!("Path not found: {}", search_path.display());
        }
    }

    // Deterministic ordering + de-dup (e.g. overlapping input paths)
    files.sort();
    files.dedup();
    files
}

/// Resolve a user-supplied path against the root
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Path shown in headers: relative to root, with forward slashes
pub fn display_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}

fn is_allowed_symlink_target(
    entry: &ignore::DirEntry,
    root_canon: &Path,
    unsafe_follow: bool,
) -> bool {
    if unsafe_follow || !entry.path_is_symlink() {
        return true;
    }
    // Only follow symlinks whose resolved targets stay within the root
    match entry.path().canonicalize() {
        Ok(real) => real.starts_with(root_canon),
        Err(_) => false,
    }
}
