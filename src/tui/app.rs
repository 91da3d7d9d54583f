use crate::debounce::{Clock, SystemClock};
use crate::loader::{spawn_load, LoadMessage};
use crate::pagination::LinkKind;
use crate::table::{LoadState, ProductTable};
use crate::tui::search::SearchState;
use crate::tui::ui;
use crate::{AppConfig, ProdViewError};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

/// Which widget receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Pagination,
}

pub struct App<C: Clock = SystemClock> {
    pub table: ProductTable<C>,
    pub search: SearchState,
    pub focus: Focus,
    /// Index into the pagination bar's links
    pub link_cursor: usize,
    pub status_message: String,
    loader: Option<Receiver<LoadMessage>>,
    pub should_quit: bool,
}

impl App<SystemClock> {
    /// Build the app and start fetching the catalogue
    pub fn start(config: &AppConfig) -> crate::Result<Self> {
        let source = config.product_source()?;
        let mut app = Self::new(ProductTable::new(config.table_settings()));
        let rx = spawn_load(source)?;
        app.attach_loader(rx);
        Ok(app)
    }
}

impl<C: Clock> App<C> {
    pub fn new(table: ProductTable<C>) -> Self {
        let mut app = Self {
            table,
            search: SearchState::default(),
            focus: Focus::Search,
            link_cursor: 0,
            status_message: "Ready".to_string(),
            loader: None,
            should_quit: false,
        };
        app.park_link_cursor();
        app
    }

    /// Take the receiving end of a load. Ignored if the table already loaded.
    pub fn attach_loader(&mut self, rx: Receiver<LoadMessage>) {
        if self.table.begin_load() {
            self.loader = Some(rx);
            self.status_message = "Loading products...".to_string();
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let mut timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if let Some(due) = self.table.time_to_commit() {
                timeout = timeout.min(due);
            }
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            self.on_tick();
            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Drain the loader and commit a due query
    pub fn on_tick(&mut self) {
        self.process_messages();
        if self.table.tick() {
            self.status_message = format!(
                "{} matching products",
                self.table.filtered_count()
            );
        }
    }

    fn process_messages(&mut self) {
        let rx = match &self.loader {
            Some(rx) => rx,
            None => return,
        };

        let message = match rx.try_recv() {
            Ok(message) => message,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => LoadMessage::Failed(ProdViewError::LoaderDisconnected),
        };
        self.loader = None;
        self.table.apply_load(message);

        self.status_message = match self.table.load_state() {
            LoadState::Loaded => format!(
                "Loaded {} products at {}",
                self.table.products().len(),
                chrono::Local::now().format("%H:%M:%S")
            ),
            LoadState::Failed(_) => "Load failed - see log for details".to_string(),
            _ => self.status_message.clone(),
        };
        self.park_link_cursor();
    }

    // --- Actions ---

    fn query_edited(&mut self) {
        self.table.on_query_change(self.search.query.clone());
    }

    /// The "Reset Data" action
    pub fn reset_search(&mut self) {
        self.search.clear();
        self.table.reset();
    }

    fn change_page(&mut self, page: usize) {
        self.table.on_page_change(page);
        self.park_link_cursor();
    }

    fn activate_link(&mut self) {
        if let Some(page) = self.table.pagination().activate(self.link_cursor) {
            self.change_page(page);
        }
    }

    fn activate_kind(&mut self, kind: LinkKind) {
        if let Some(page) = self.table.pagination().target_of(kind) {
            self.change_page(page);
        }
    }

    /// Put the link cursor on the active page, or keep it in range
    fn park_link_cursor(&mut self) {
        let bar = self.table.pagination();
        self.link_cursor = match bar.active_index() {
            Some(i) => i,
            None => self.link_cursor.min(bar.links().len().saturating_sub(1)),
        };
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.reset_search();
                return;
            }
            KeyCode::Esc => {
                if self.focus == Focus::Search && !self.search.query.is_empty() {
                    self.reset_search();
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Search => Focus::Pagination,
                    Focus::Pagination => Focus::Search,
                };
                return;
            }
            KeyCode::PageUp => {
                self.activate_kind(LinkKind::Prev);
                return;
            }
            KeyCode::PageDown => {
                self.activate_kind(LinkKind::Next);
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Pagination => self.handle_pagination_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.insert(c);
                self.query_edited();
            }
            KeyCode::Backspace => {
                if self.search.backspace() {
                    self.query_edited();
                }
            }
            KeyCode::Delete => {
                if self.search.delete() {
                    self.query_edited();
                }
            }
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.move_home(),
            KeyCode::End => self.search.move_end(),
            KeyCode::Down | KeyCode::Enter => {
                self.focus = Focus::Pagination;
            }
            _ => {}
        }
    }

    fn handle_pagination_key(&mut self, key: KeyEvent) {
        let link_count = self.table.pagination().links().len();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.link_cursor = self.link_cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.link_cursor + 1 < link_count {
                    self.link_cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_link(),
            KeyCode::Home => self.activate_kind(LinkKind::First),
            KeyCode::End => self.activate_kind(LinkKind::Last),
            KeyCode::Up => {
                self.focus = Focus::Search;
            }

            // Any other printable char focuses search and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focus = Focus::Search;
                self.search.move_end();
                self.search.insert(c);
                self.query_edited();
            }

            _ => {}
        }
    }
}
