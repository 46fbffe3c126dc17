//! Configuration for the relay server
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/lmrelay/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the relay server to
    pub bind_addr: SocketAddr,

    /// Base URL of the OpenAI-compatible backend
    pub backend_url: String,

    /// Timeout for a whole backend interaction, in seconds
    pub timeout_secs: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".parse().unwrap(),
            backend_url: "http://localhost:1234".to_string(),
            timeout_secs: 120,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub bind_addr: Option<String>,
    pub backend_url: Option<String>,
    pub timeout_secs: Option<u64>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/lmrelay/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("lmrelay").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Use Config::default().to_toml() as single source of truth
        let template = Self::default().to_toml();

        // Write config (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// If config file exists but cannot be parsed. This is intentional -
    /// a broken config should fail fast with a clear error, not silently
    /// fall back to defaults while the user debugs the wrong thing.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                match toml::from_str(&contents) {
                    Ok(config) => config,
                    Err(e) => {
                        // Fatal error - config exists but is invalid
                        // Print a clear, actionable error message
                        eprintln!(
                            "\n╔══════════════════════════════════════════════════════════════╗"
                        );
                        eprintln!(
                            "║  CONFIG ERROR - Failed to parse configuration file          ║"
                        );
                        eprintln!(
                            "╚══════════════════════════════════════════════════════════════╝\n"
                        );
                        eprintln!("  File: {}\n", path.display());
                        eprintln!("  Error: {}\n", e);
                        eprintln!("  Tip: Check for:\n");
                        eprintln!("    - Missing quotes around string values");
                        eprintln!("    - Invalid boolean values (use true/false)");
                        eprintln!("    - Malformed array syntax");
                        eprintln!("    - Typos in section names\n");
                        eprintln!("  To reset, delete the file and restart lmrelay.\n");
                        std::process::exit(1);
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Config file doesn't exist - use defaults
                FileConfig::default()
            }
            Err(e) => {
                // File exists but can't be read (permissions, etc.)
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // Bind address: env > file > default
        let bind_addr = std::env::var("LMRELAY_BIND")
            .ok()
            .or(file.bind_addr)
            .unwrap_or_else(|| "127.0.0.1:8000".to_string())
            .parse()
            .expect("Invalid bind address");

        // Backend URL: env > file > default
        // Trailing slash is stripped so the completions path can be appended
        let backend_url = std::env::var("LMRELAY_BACKEND_URL")
            .ok()
            .or(file.backend_url)
            .unwrap_or_else(|| "http://localhost:1234".to_string())
            .trim_end_matches('/')
            .to_string();

        // Timeout: env > file > default (120s covers slow local generations)
        let timeout_secs = std::env::var("LMRELAY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.timeout_secs)
            .unwrap_or(120);

        // Subconfig loading with from_file() helpers
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            bind_addr,
            backend_url,
            timeout_secs,
            logging,
        }
    }
}
