//! @dose
//! purpose: File exclusion for directory walking. Combines .gitignore handling, a fixed list of
//!     build/vendor directories, and glob patterns from outliner.toml and --exclude.
//!
//! when-editing:
//!     - !Override patterns use ! prefix to negate (exclude), so we add ! to user patterns
//!     - The ignore crate handles gitignore parsing automatically
//!
//! invariants:
//!     - Default exclusions (target, .git, ...) are always applied
//!     - Gitignore is respected unless --no-gitignore is passed
//!
//! gotchas:
//!     - The ignore crate's override patterns are inclusive by default, so we negate them
//!     - Symlink handling is separate from this module (see commands::collect)
//!     - PathExclusion only reads the root .gitignore, and only inside a git checkout, matching
//!       the walker's require_git default

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};

/// Configuration for file exclusion during directory walking
#[derive(Debug, Clone)]
pub struct ExclusionConfig {
    /// Glob patterns to exclude
    pub patterns: Vec<String>,
    /// Whether to respect .gitignore files (default: true)
    pub respect_gitignore: bool,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            respect_gitignore: true,
        }
    }
}

/// Directories that are never outlined
const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", "target", "vendor", "node_modules", ".cargo"];

/// Build a WalkBuilder with the given exclusion configuration
pub fn build_walker(root: &Path, config: &ExclusionConfig) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.git_ignore(config.respect_gitignore);
    builder.git_global(config.respect_gitignore);
    builder.git_exclude(config.respect_gitignore);

    // Hidden files are walked; .git is excluded explicitly below
    builder.hidden(false);

    let mut overrides = OverrideBuilder::new(root);

    for dir in DEFAULT_EXCLUDED_DIRS {
        let _ = overrides.add(&format!("!{}/**", dir));
        let _ = overrides.add(&format!("!{}", dir));
    }

    for pattern in &config.patterns {
        if let Err(e) = overrides.add(&format!("!{}", pattern)) {
            tracing::warn!("invalid exclude pattern '{}': {}", pattern, e);
        }
    }

    match overrides.build() {
        Ok(built) => {
            builder.overrides(built);
        }
        Err(e) => tracing::warn!("failed to build exclude overrides: {}", e),
    }

    builder
}

/// Build a GlobSet from patterns, used to filter explicitly named files
pub fn build_exclude_globset(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => {
                tracing::warn!("invalid exclude pattern '{}': {}", pattern, e);
            }
        }
    }

    builder.build().ok()
}

/// Check if a directory name is excluded by default
pub fn is_default_excluded_dir(name: &str) -> bool {
    DEFAULT_EXCLUDED_DIRS.contains(&name)
}

/// Exclusion check for single paths that don't come from a walk (watch events).
///
/// Applies the same three rules as `build_walker`: default directories, exclude globs and the
/// root `.gitignore`. Paths outside the root are never excluded.
#[derive(Debug)]
pub struct PathExclusion {
    roots: Vec<PathBuf>,
    globset: Option<GlobSet>,
    gitignore: Option<Gitignore>,
}

impl PathExclusion {
    pub fn new(root: &Path, config: &ExclusionConfig) -> Self {
        let mut roots = vec![root.to_path_buf()];
        if let Ok(canon) = root.canonicalize() {
            if canon != root {
                roots.push(canon);
            }
        }

        let gitignore = if config.respect_gitignore && root.join(".git").exists() {
            let mut builder = GitignoreBuilder::new(root);
            if let Some(e) = builder.add(root.join(".gitignore")) {
                tracing::debug!("no usable .gitignore: {}", e);
            }
            match builder.build() {
                Ok(gitignore) => Some(gitignore),
                Err(e) => {
                    tracing::warn!("failed to build gitignore matcher: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            roots,
            globset: build_exclude_globset(&config.patterns),
            gitignore,
        }
    }

    /// Whether `path` falls under an excluded directory, glob or gitignore rule
    pub fn is_excluded(&self, path: &Path) -> bool {
        let Some(relative) = self.relative(path) else {
            return false;
        };

        let in_default_dir = relative.components().any(|c| match c {
            Component::Normal(name) => name.to_str().is_some_and(is_default_excluded_dir),
            _ => false,
        });
        if in_default_dir {
            return true;
        }

        if self
            .globset
            .as_ref()
            .is_some_and(|globset| globset.is_match(relative))
        {
            return true;
        }

        self.gitignore.as_ref().is_some_and(|gitignore| {
            gitignore
                .matched_path_or_any_parents(relative, false)
                .is_ignore()
        })
    }

    fn relative<'p>(&self, path: &'p Path) -> Option<&'p Path> {
        if path.is_relative() {
            return Some(path);
        }
        self.roots
            .iter()
            .find_map(|root| path.strip_prefix(root).ok())
    }
}
