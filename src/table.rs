//! Product table component state
//!
//! Owns the loaded catalogue, the raw and debounced queries and the current
//! page. Frontends feed it events (`on_query_change`, `on_page_change`,
//! `apply_load`) and call `tick` from their loop; everything they draw comes
//! from `rows` and `pagination`.

use crate::debounce::{Clock, Debouncer, SystemClock};
use crate::filter::{filter_products, paginate};
use crate::loader::LoadMessage;
use crate::pagination::PaginationBar;
use crate::product::Product;
use crate::AppConfig;
use std::time::{Duration, Instant};

/// Lifecycle of the one-shot catalogue fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Not started; renders as an empty table
    Idle,
    Loading,
    Loaded,
    /// Fetch failed; the message is shown in place of the rows
    Failed(String),
}

/// What the table body shows on this render
#[derive(Debug, PartialEq)]
pub enum RowsView<'a> {
    Loading,
    Failed(&'a str),
    Page(Vec<&'a Product>),
}

/// Layout knobs for the component
#[derive(Debug, Clone, Copy)]
pub struct TableSettings {
    pub page_size: usize,
    pub debounce: Duration,
    pub page_range: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            page_size: crate::DEFAULT_PAGE_SIZE,
            debounce: crate::DEFAULT_DEBOUNCE,
            page_range: crate::DEFAULT_PAGE_RANGE,
        }
    }
}

impl From<&AppConfig> for TableSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            page_size: config.page_size,
            debounce: config.debounce,
            page_range: config.page_range,
        }
    }
}

pub struct ProductTable<C: Clock = SystemClock> {
    products: Vec<Product>,
    load_state: LoadState,
    raw_query: String,
    effective_query: String,
    current_page: usize,
    settings: TableSettings,
    debouncer: Debouncer<String>,
    clock: C,
}

impl ProductTable<SystemClock> {
    pub fn new(settings: TableSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> ProductTable<C> {
    pub fn with_clock(settings: TableSettings, clock: C) -> Self {
        Self {
            products: Vec::new(),
            load_state: LoadState::Idle,
            raw_query: String::new(),
            effective_query: String::new(),
            current_page: 1,
            debouncer: Debouncer::new(settings.debounce),
            settings,
            clock,
        }
    }

    // --- Loading ---

    /// Enter the loading state. The fetch happens once per component, so
    /// this returns `false` if a load was already started.
    pub fn begin_load(&mut self) -> bool {
        if self.load_state != LoadState::Idle {
            return false;
        }
        self.load_state = LoadState::Loading;
        true
    }

    /// Record the outcome of the fetch. The loading flag clears either way.
    pub fn apply_load(&mut self, message: LoadMessage) {
        match message {
            LoadMessage::Loaded(products) => {
                tracing::info!(count = products.len(), "product table loaded");
                self.products = products;
                self.load_state = LoadState::Loaded;
            }
            LoadMessage::Failed(e) => {
                tracing::error!(error = %e, "failed to load products");
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    // --- Query ---

    /// Store the input value now and commit it to the filter once typing
    /// pauses. An unchanged value leaves any pending commit alone.
    pub fn on_query_change(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value == self.raw_query {
            return;
        }
        self.raw_query = value.clone();
        self.debouncer.schedule(value, self.clock.now());
    }

    /// Clear the search box; the filter follows after the debounce window
    pub fn reset(&mut self) {
        self.on_query_change(String::new());
    }

    /// Commit a due query. Returns `true` if the effective query changed hands.
    pub fn tick(&mut self) -> bool {
        match self.debouncer.poll(self.clock.now()) {
            Some(query) => {
                tracing::debug!(query = %query, "search query committed");
                self.effective_query = query;
                true
            }
            None => false,
        }
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn effective_query(&self) -> &str {
        &self.effective_query
    }

    pub fn has_pending_query(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// When the pending query becomes due, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Time until the pending query is due, if any
    pub fn time_to_commit(&self) -> Option<Duration> {
        self.debouncer.remaining(self.clock.now())
    }

    // --- Paging ---

    /// Pagination callback. The page is taken as given.
    pub fn on_page_change(&mut self, page: usize) {
        tracing::debug!(page, "page changed");
        self.current_page = page;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.settings.page_size
    }

    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }

    // --- Derived views ---

    /// Products matching the effective query, in load order
    pub fn filtered(&self) -> Vec<&Product> {
        filter_products(&self.products, &self.effective_query)
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    /// The current page of the filtered set
    pub fn page_rows(&self) -> Vec<&Product> {
        let filtered = self.filtered();
        paginate(&filtered, self.current_page, self.settings.page_size).to_vec()
    }

    pub fn rows(&self) -> RowsView<'_> {
        match &self.load_state {
            LoadState::Loading => RowsView::Loading,
            LoadState::Failed(message) => RowsView::Failed(message),
            LoadState::Idle | LoadState::Loaded => RowsView::Page(self.page_rows()),
        }
    }

    /// Page-link bar. Sized from the full catalogue, not the filtered set.
    pub fn pagination(&self) -> PaginationBar {
        PaginationBar::build(
            self.current_page,
            self.settings.page_size,
            self.products.len(),
            self.settings.page_range,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::ManualClock;
    use crate::error::ProdViewError;

    fn catalogue(n: u64) -> Vec<Product> {
        (1..=n)
            .map(|id| Product::new(id, format!("Item {id}"), id as f64 + 0.5, "plain"))
            .collect()
    }

    fn loaded_table(n: u64) -> (ProductTable<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let mut table = ProductTable::with_clock(TableSettings::default(), clock.clone());
        table.begin_load();
        table.apply_load(LoadMessage::Loaded(catalogue(n)));
        (table, clock)
    }

    fn ids(rows: &[&Product]) -> Vec<u64> {
        rows.iter().map(|p| p.id).collect()
    }

    #[test]
    fn loading_row_until_fetch_resolves() {
        let clock = ManualClock::new();
        let mut table = ProductTable::with_clock(TableSettings::default(), clock);
        assert_eq!(table.rows(), RowsView::Page(vec![]));

        assert!(table.begin_load());
        assert_eq!(table.rows(), RowsView::Loading);

        table.apply_load(LoadMessage::Loaded(catalogue(7)));
        assert!(!table.is_loading());
        match table.rows() {
            RowsView::Page(rows) => assert_eq!(ids(&rows), vec![1, 2, 3, 4, 5]),
            other => panic!("unexpected rows: {other:?}"),
        }
    }

    #[test]
    fn load_runs_once() {
        let (mut table, _clock) = loaded_table(3);
        assert!(!table.begin_load());
        assert_eq!(table.load_state(), &LoadState::Loaded);
    }

    #[test]
    fn failure_leaves_loading_state() {
        let clock = ManualClock::new();
        let mut table = ProductTable::with_clock(TableSettings::default(), clock);
        table.begin_load();
        table.apply_load(LoadMessage::Failed(ProdViewError::UnexpectedStatus {
            status: 404,
            endpoint: "http://localhost/products".into(),
        }));
        assert!(!table.is_loading());
        match table.rows() {
            RowsView::Failed(message) => assert!(message.contains("404")),
            other => panic!("unexpected rows: {other:?}"),
        }
    }

    #[test]
    fn query_commits_after_quiet_period() {
        let (mut table, clock) = loaded_table(12);
        table.on_query_change("Item 1");
        assert_eq!(table.raw_query(), "Item 1");
        assert_eq!(table.effective_query(), "");
        assert!(!table.tick());

        clock.advance(Duration::from_millis(500));
        assert!(table.tick());
        assert_eq!(table.effective_query(), "Item 1");
        // Item 1, Item 10, Item 11, Item 12
        assert_eq!(table.filtered_count(), 4);
    }

    #[test]
    fn repeated_value_keeps_original_deadline() {
        let (mut table, clock) = loaded_table(3);
        table.on_query_change("x");
        let deadline = table.next_deadline();
        clock.advance(Duration::from_millis(300));
        table.on_query_change("x");
        assert_eq!(table.next_deadline(), deadline);
        assert_eq!(table.time_to_commit(), Some(Duration::from_millis(200)));
    }

    #[test]
    fn page_is_not_reset_when_filter_shrinks() {
        let (mut table, clock) = loaded_table(12);
        table.on_page_change(3);
        assert_eq!(ids(&table.page_rows()), vec![11, 12]);

        table.on_query_change("Item 2");
        clock.advance(Duration::from_millis(500));
        table.tick();
        assert_eq!(table.current_page(), 3);
        assert!(table.page_rows().is_empty());
    }

    #[test]
    fn pagination_is_sized_from_full_catalogue() {
        let (mut table, clock) = loaded_table(20);
        table.on_query_change("Item 2");
        clock.advance(Duration::from_millis(500));
        table.tick();
        // "Item 2" and "Item 20"
        assert_eq!(table.filtered_count(), 2);
        assert_eq!(table.pagination().total_pages(), 4);
    }

    #[test]
    fn page_change_is_not_validated() {
        let (mut table, _clock) = loaded_table(5);
        table.on_page_change(0);
        assert_eq!(table.current_page(), 0);
        assert!(table.page_rows().is_empty());
        table.on_page_change(42);
        assert!(table.page_rows().is_empty());
    }
}
