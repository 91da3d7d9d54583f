//! ProdView GUI Entry Point
//!
//! Launches the desktop window. Accepts the same global options as the CLI.

#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

use clap::builder::TypedValueParser as _;
use clap::Parser;
use prodview::AppConfig;
use std::path::PathBuf;
use std::time::Duration;

/// ProdView desktop window
#[derive(Parser)]
#[command(name = "prodview-gui")]
#[command(version)]
#[command(about = "Browse the product catalogue in a window", long_about = None)]
struct Cli {
    /// Catalogue endpoint
    #[arg(long, default_value = prodview::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Rows per page
    #[arg(long, default_value_t = prodview::DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    page_size: usize,

    /// Search debounce window in milliseconds
    #[arg(long, default_value_t = prodview::DEFAULT_DEBOUNCE.as_millis() as u64)]
    debounce_ms: u64,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log file (default: next to the executable)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        AppConfig {
            endpoint: self.endpoint,
            page_size: self.page_size,
            debounce: Duration::from_millis(self.debounce_ms),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
            log_file: self.log_file,
            ..AppConfig::default()
        }
    }
}

fn main() {
    let config = Cli::parse().into_config();

    if let Err(e) = prodview::logging::init(config.log_file.as_deref()) {
        eprintln!("warning: {}", e);
    }

    if let Err(e) = prodview::gui::run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_flag_is_accepted() {
        let config = Cli::parse_from(["prodview-gui", "--timeout-secs", "7"]).into_config();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(7)));
        assert_eq!(config.debounce, prodview::DEFAULT_DEBOUNCE);
        assert_eq!(config.page_size, prodview::DEFAULT_PAGE_SIZE);
    }
}
