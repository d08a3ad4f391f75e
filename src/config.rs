//! @dose
//! purpose: Configuration file parsing for outliner.toml. Handles exclusion patterns, the set
//!     of file extensions to outline, the auto-outline size threshold for `read`, and the
//!     default page size for `outline`.
//!
//! when-editing:
//!     - !Config is loaded once at startup and passed through the call chain
//!     - Every key is optional; missing keys fall back to Default
//!
//! invariants:
//!     - Config::load returns the default config if outliner.toml doesn't exist
//!     - A broken config file is reported and replaced by defaults, never fatal
//!
//! gotchas:
//!     - Extensions are stored without the leading dot ("rs", not ".rs")

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the project root
pub const CONFIG_FILE: &str = "outliner.toml";

/// Files larger than this many bytes are outlined by `read` instead of printed whole
pub const AUTO_OUTLINE_SIZE: usize = 16384;

/// Bytes shown by `read` when a large file has no outline
pub const FALLBACK_BYTES: usize = 1024;

/// Main configuration structure matching outliner.toml
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exclusion patterns (gitignore-style)
    pub exclude: Vec<String>,

    /// File extensions to outline
    pub extensions: Vec<String>,

    /// Settings for the read command
    pub read: ReadConfig,

    /// Settings for the outline command
    pub outline: OutlineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            extensions: vec!["rs".to_string()],
            read: ReadConfig::default(),
            outline: OutlineConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReadConfig {
    /// Size in bytes above which a file is outlined
    pub auto_outline_size: usize,

    /// Bytes of content shown when no outline is available
    pub fallback_bytes: usize,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            auto_outline_size: AUTO_OUTLINE_SIZE,
            fallback_bytes: FALLBACK_BYTES,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct OutlineConfig {
    /// Default number of entries per file (None = all)
    pub limit: Option<usize>,
}

impl Config {
    /// Load configuration from outliner.toml in the given root directory
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                Self::default()
            }
        }
    }

    /// Check whether a path has one of the configured extensions
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }
}
