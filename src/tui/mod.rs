//! Terminal frontend

pub mod app;
pub mod colors;
pub mod search;
pub mod ui;

pub use app::{App, Focus};

/// Entry point: start the fetch, take over the terminal, run until quit
pub fn run(config: &crate::AppConfig) -> crate::Result<()> {
    let mut app = App::start(config)?;
    let mut terminal = ratatui::try_init()?;
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
