// Startup module - displays banner and effective settings
//
// This module provides a professional startup experience showing:
// - Version info and branding
// - Configuration loaded from file
// - Where the relay listens and forwards

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Print the startup banner and effective settings
/// This runs before the server binds
pub fn print_startup(config: &Config) {
    use colors::*;

    // Banner
    println!();
    println!("  {BOLD}{CYAN}lmrelay{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Chat completion relay for OpenAI-compatible backends{RESET}");
    println!();

    // Config file status
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    // Relay info
    println!(
        "  {MAGENTA}▸{RESET} Forwarding to {BOLD}{}{RESET}",
        config.backend_url
    );
    println!(
        "  {MAGENTA}▸{RESET} Backend timeout: {BOLD}{}s{RESET}",
        config.timeout_secs
    );
    if config.logging.file_enabled {
        println!(
            "  {MAGENTA}▸{RESET} File logging: {} {DIM}({} rotation){RESET}",
            config.logging.file_dir.display(),
            config.logging.file_rotation.as_str()
        );
    }
    println!(
        "  {MAGENTA}▸{RESET} Listening on {BOLD}{}{RESET}",
        config.bind_addr
    );
    println!();
}

/// Log startup info through tracing so it also lands in log files
pub fn log_startup(config: &Config) {
    tracing::info!("lmrelay v{} starting", VERSION);
    tracing::info!("Forwarding chat completions to {}", config.backend_url);
    tracing::info!("Backend timeout: {}s", config.timeout_secs);

    if config.logging.file_enabled {
        tracing::info!(
            "File logging to {} ({} rotation)",
            config.logging.file_dir.display(),
            config.logging.file_rotation.as_str()
        );
    }

    tracing::info!("Ready. Waiting for clients...");
}
