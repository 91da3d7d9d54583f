//! ProdView - product catalogue browser
//!
//! Fetches a product list once from a JSON endpoint, filters it by a
//! debounced search query and shows it one page at a time.
//!
//! # Features
//!
//! - **One-shot loading**: the catalogue is fetched on a background thread
//! - **Debounced search**: title, description and price are matched once typing pauses
//! - **Pagination**: fixed-size pages with a centred page-link bar
//! - **Frontends**: terminal UI, optional desktop GUI, and one-shot CLI commands
//!
//! # Example
//!
//! ```no_run
//! use prodview::{HttpProductSource, LoadMessage, ProductTable, RowsView, TableSettings};
//!
//! fn main() -> prodview::Result<()> {
//!     let source = HttpProductSource::new(prodview::DEFAULT_ENDPOINT, None)?;
//!     let mut table = ProductTable::new(TableSettings::default());
//!
//!     table.begin_load();
//!     let rx = prodview::spawn_load(source)?;
//!     let message = rx.recv().map_err(|_| prodview::ProdViewError::LoaderDisconnected)?;
//!     table.apply_load(message);
//!
//!     table.on_query_change("backpack");
//!     std::thread::sleep(std::time::Duration::from_millis(600));
//!     table.tick();
//!
//!     if let RowsView::Page(rows) = table.rows() {
//!         for product in rows {
//!             println!("{} {} {}", product.id, product.title, product.price_text());
//!         }
//!     }
//!     println!("{}", table.pagination().to_line());
//!     Ok(())
//! }
//! ```

pub mod debounce;
pub mod error;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod pagination;
pub mod product;
pub mod table;
pub mod tui;

#[cfg(feature = "gui")]
pub mod gui;

use std::path::PathBuf;
use std::time::Duration;
use unicode_width::UnicodeWidthChar;

// Re-export main types
pub use debounce::{Clock, Debouncer, ManualClock, SystemClock};
pub use error::{ProdViewError, Result};
pub use filter::{filter_products, matches, page_count, page_window, paginate};
pub use loader::{load_now, parse_products, spawn_load, HttpProductSource, LoadMessage, ProductSource};
pub use pagination::{LinkKind, PageLink, PaginationBar};
pub use product::Product;
pub use table::{LoadState, ProductTable, RowsView, TableSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Catalogue endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://fakestoreapi.com/products";

/// Rows per page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Quiet period before a typed query is applied
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Numbered links shown in the pagination bar
pub const DEFAULT_PAGE_RANGE: usize = 5;

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`
pub fn truncate_display(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let total: usize = text.chars().filter_map(|c| c.width()).sum();
    if total <= width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    out
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalogue URL
    pub endpoint: String,
    /// Rows per page
    pub page_size: usize,
    /// Search debounce window
    pub debounce: Duration,
    /// Numbered links in the pagination bar
    pub page_range: usize,
    /// Request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Log file; `None` puts it next to the executable
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            page_range: DEFAULT_PAGE_RANGE,
            request_timeout: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// HTTP source for the configured endpoint
    pub fn product_source(&self) -> Result<HttpProductSource> {
        HttpProductSource::new(&self.endpoint, self.request_timeout)
    }

    pub fn table_settings(&self) -> TableSettings {
        TableSettings::from(self)
    }
}
