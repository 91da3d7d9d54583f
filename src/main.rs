//! ProdView CLI
//!
//! Command-line interface for the product catalogue browser.
//! Provides the interactive terminal table and one-shot commands.

use clap::builder::TypedValueParser as _;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use prodview::{
    filter_products, load_now, paginate, truncate_display, AppConfig, PaginationBar,
    ProdViewError, Product,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// ProdView - product catalogue browser
///
/// Fetches the catalogue once, then filters it by a debounced search
/// and shows it five rows at a time.
#[derive(Parser)]
#[command(name = "prodview")]
#[command(author = "ProdView Contributors")]
#[command(version)]
#[command(about = "Browse and search a product catalogue", long_about = None)]
struct Cli {
    /// Catalogue endpoint
    #[arg(long, global = true, default_value = prodview::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Rows per page
    #[arg(long, global = true, default_value_t = prodview::DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    page_size: usize,

    /// Search debounce window in milliseconds
    #[arg(long, global = true, default_value_t = prodview::DEFAULT_DEBOUNCE.as_millis() as u64)]
    debounce_ms: u64,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log file (default: next to the executable)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive table (default)
    Browse,

    /// Print one page of products matching a query
    Search {
        /// Text to look for in title, description or price
        #[arg(allow_hyphen_values = true, default_value = "")]
        query: String,

        /// Page to show, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write the full catalogue to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Format (json, csv)
        #[arg(short, long, default_value = "json")]
        format: String,
    },
}

impl Cli {
    fn config(&self) -> AppConfig {
        AppConfig {
            endpoint: self.endpoint.clone(),
            page_size: self.page_size,
            debounce: Duration::from_millis(self.debounce_ms),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
            log_file: self.log_file.clone(),
            ..AppConfig::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config();

    // Logging is best effort; the tool works without it
    if let Err(e) = prodview::logging::init(config.log_file.as_deref()) {
        eprintln!("{} {}", style("Warning:").yellow().bold(), e);
    }

    let result = match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => prodview::tui::run(&config),

        Commands::Search { query, page, json } => cmd_search(&config, &query, page, json),

        Commands::Export { output, format } => cmd_export(&config, &output, &format),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Fetch the catalogue with a spinner on stderr
fn fetch_with_spinner(config: &AppConfig) -> prodview::Result<Vec<Product>> {
    let source = config.product_source()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Fetching {}", config.endpoint));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let start = Instant::now();
    let result = load_now(&source);
    spinner.finish_and_clear();

    let products = result?;
    eprintln!(
        "{} Fetched {} products in {}",
        style("✓").green().bold(),
        style(products.len()).cyan(),
        HumanDuration(start.elapsed())
    );
    Ok(products)
}

/// One page of search results, with the bar sized from the whole catalogue
struct SearchPage<'a> {
    query: &'a str,
    page: usize,
    page_size: usize,
    matching: usize,
    total: usize,
    rows: Vec<&'a Product>,
    bar: PaginationBar,
}

/// Page numbers start at 1
fn check_page(page: usize) -> prodview::Result<()> {
    if page == 0 {
        return Err(ProdViewError::InvalidPage(page));
    }
    Ok(())
}

fn search_page<'a>(
    products: &'a [Product],
    query: &'a str,
    page: usize,
    config: &AppConfig,
) -> prodview::Result<SearchPage<'a>> {
    check_page(page)?;
    let matching = filter_products(products, query);
    let rows = paginate(&matching, page, config.page_size).to_vec();
    let bar = PaginationBar::build(page, config.page_size, products.len(), config.page_range);
    Ok(SearchPage {
        query,
        page,
        page_size: config.page_size,
        matching: matching.len(),
        total: products.len(),
        rows,
        bar,
    })
}

impl SearchPage<'_> {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "query": self.query,
            "page": self.page,
            "page_size": self.page_size,
            "matching": self.matching,
            "total": self.total,
            "total_pages": self.bar.total_pages(),
            "products": self.rows,
        })
    }

    fn print(&self) {
        println!(
            "{} {} matching '{}' of {} products",
            style("→").cyan().bold(),
            style(self.matching).green(),
            style(self.query).yellow(),
            self.total
        );
        println!();
        println!(
            "  {:>4}  {:<40}  {:>10}  {}",
            style("Id").bold(),
            style("Title").bold(),
            style("Price").bold(),
            style("Description").bold()
        );
        for product in &self.rows {
            println!(
                "  {:>4}  {:<40}  {:>10}  {}",
                style(product.id).dim(),
                truncate_display(&product.title, 40),
                style(product.price_text()).yellow(),
                truncate_display(&product.description, 60)
            );
        }
        if self.rows.is_empty() {
            println!("  {}", style("(no rows on this page)").dim());
        }
        println!();
        println!(
            "  {} {}   {} {} of {}",
            style("Pages:").bold(),
            self.bar.to_line(),
            style("Page").bold(),
            self.page,
            self.bar.total_pages()
        );
    }
}

/// Search command implementation
fn cmd_search(config: &AppConfig, query: &str, page: usize, json: bool) -> prodview::Result<()> {
    // Reject before touching the network
    check_page(page)?;

    let products = fetch_with_spinner(config)?;
    let result = search_page(&products, query, page, config)?;

    if json {
        println!("{}", result.to_json());
    } else {
        result.print();
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    fn parse(format: &str) -> prodview::Result<Self> {
        match format.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ProdViewError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Serialize the catalogue in the requested format
fn write_products<W: Write>(
    writer: &mut W,
    products: &[Product],
    format: ExportFormat,
) -> prodview::Result<()> {
    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, products)?;
            writeln!(writer)?;
        }
        ExportFormat::Csv => {
            writeln!(writer, "id,title,price,description")?;
            for product in products {
                writeln!(
                    writer,
                    "{},{},{},{}",
                    product.id,
                    csv_field(&product.title),
                    product.price_text(),
                    csv_field(&product.description)
                )?;
            }
        }
    }
    Ok(())
}

/// Export command implementation
fn cmd_export(config: &AppConfig, output: &Path, format: &str) -> prodview::Result<()> {
    let format = ExportFormat::parse(format)?;

    let products = fetch_with_spinner(config)?;
    let mut writer = BufWriter::new(File::create(output)?);
    write_products(&mut writer, &products, format)?;
    writer.flush()?;

    println!(
        "{} Exported {} products to {}",
        style("✓").green().bold(),
        style(products.len()).cyan(),
        style(output.display()).cyan()
    );
    Ok(())
}

/// Quote a CSV field when it contains separators, quotes or newlines
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
