//! @dose
//! purpose: Implements the watch command that monitors source files and re-prints the outline
//!     of every file that changes.
//!
//! when-editing:
//!     - !Debouncing is critical for handling rapid file changes (IDE saves)
//!     - Uses notify crate for cross-platform file system watching
//!
//! invariants:
//!     - The initial outline is printed before watching starts
//!     - Config file changes reload outliner.toml and re-print everything
//!     - Each changed file is outlined with a fresh scanner
//!     - Events under excluded dirs, exclude globs or gitignored paths are dropped, same as
//!       the initial walk
//!
//! flows:
//!     - Initial: run the outline command over the watched paths
//!     - Watch: receive notify events, coalesce per path, wait for the debounce window
//!     - Update: re-outline created/modified files, report deleted ones

use super::collect::display_path;
use super::outline::run_outline;
use crate::cli::{OutlineArgs, WatchArgs};
use crate::config::{Config, CONFIG_FILE};
use crate::exclusion::PathExclusion;
use crate::formatter::{paginate, render_section};
use crate::outline::outline_file;
use anyhow::Result;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// The kind of change detected for a file
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ChangeKind {
    Create,
    Modify,
    Delete,
}

pub fn run_watch(args: &WatchArgs, root: &Path, verbose: bool) -> Result<()> {
    let mut config = Config::load(root);
    args.common.apply_to(&mut config);
    let mut exclusion = watch_exclusion(args, root, &config);

    let outline_args = OutlineArgs {
        paths: args.paths.clone(),
        common: args.common.clone(),
        ..Default::default()
    };
    print_full_outline(&outline_args, root, verbose);

    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                let _ = tx.send(event);
            }
            Err(e) => tracing::warn!("watch error: {}", e),
        },
        notify::Config::default(),
    )?;

    let watch_paths = if args.paths.is_empty() {
        vec![root.to_path_buf()]
    } else {
        args.paths.iter().map(|p| root.join(p)).collect()
    };

    for path in &watch_paths {
        watcher.watch(path, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {}", path.display());
    }

    eprintln!("Watching for changes... (press Ctrl+C to stop)");

    let mut pending: BTreeMap<PathBuf, ChangeKind> = BTreeMap::new();
    let mut last_event = Instant::now();
    let debounce = Duration::from_millis(args.debounce);
    let poll_interval = Duration::from_millis(50);

    loop {
        match rx.recv_timeout(poll_interval) {
            Ok(event) => {
                record_event(&event, &mut pending, root, &config, &exclusion);
                last_event = Instant::now();
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if !pending.is_empty() && last_event.elapsed() >= debounce {
                    if args.clear {
                        print!("\x1B[2J\x1B[1;1H");
                    }
                    if pending.contains_key(&root.join(CONFIG_FILE)) {
                        pending.clear();
                        eprintln!("Config changed, re-outlining everything...");
                        config = Config::load(root);
                        args.common.apply_to(&mut config);
                        exclusion = watch_exclusion(args, root, &config);
                        print_full_outline(&outline_args, root, verbose);
                    } else {
                        print_changes(&mut pending, root);
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                tracing::warn!("Watcher disconnected");
                break;
            }
        }
    }

    Ok(())
}

fn watch_exclusion(args: &WatchArgs, root: &Path, config: &Config) -> PathExclusion {
    PathExclusion::new(root, &args.common.exclusion_config(&config.exclude))
}

fn print_full_outline(args: &OutlineArgs, root: &Path, verbose: bool) {
    if let Err(e) = run_outline(args, root, verbose) {
        tracing::warn!("{:#}", e);
    }
}

/// Record a notify event in the pending set, coalescing repeated events per path
fn record_event(
    event: &Event,
    pending: &mut BTreeMap<PathBuf, ChangeKind>,
    root: &Path,
    config: &Config,
    exclusion: &PathExclusion,
) {
    let kind = match &event.kind {
        EventKind::Create(_) => ChangeKind::Create,
        EventKind::Modify(_) => ChangeKind::Modify,
        EventKind::Remove(_) => ChangeKind::Delete,
        _ => return,
    };

    for path in &event.paths {
        let is_config = path.file_name().map(|n| n == CONFIG_FILE).unwrap_or(false);
        if !is_config && (!config.is_supported(path) || exclusion.is_excluded(path)) {
            continue;
        }

        // Events for the config file are keyed by its root path so the loop can find them
        let key = if is_config {
            root.join(CONFIG_FILE)
        } else {
            path.clone()
        };

        pending
            .entry(key)
            .and_modify(|existing| *existing = coalesce(*existing, kind))
            .or_insert(kind);
    }
}

/// Create + Modify stays Create; anything followed by Delete is Delete
fn coalesce(existing: ChangeKind, new: ChangeKind) -> ChangeKind {
    match (existing, new) {
        (ChangeKind::Create, ChangeKind::Modify) => ChangeKind::Create,
        (_, new) => new,
    }
}

fn print_changes(pending: &mut BTreeMap<PathBuf, ChangeKind>, root: &Path) {
    let timestamp = clock_time();

    for (path, kind) in std::mem::take(pending) {
        let label = display_path(root, &path);
        match kind {
            ChangeKind::Delete => println!("[{}] Deleted: {}\n", timestamp, label),
            ChangeKind::Create | ChangeKind::Modify => match outline_file(&path) {
                Ok((_, entries)) => {
                    let page = paginate(entries, None, 0, None);
                    print!("{}", render_section(&label, &page));
                }
                Err(e) => tracing::warn!("{}", e),
            },
        }
    }
}

/// Wall-clock HH:MM:SS (UTC) for change notices
fn clock_time() -> String {
    use std::time::SystemTime;
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!(
        "{:02}:{:02}:{:02}",
        (secs / 3600) % 24,
        (secs / 60) % 60,
        secs % 60
    )
}
