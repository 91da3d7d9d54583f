use crate::debounce::Clock;
use crate::pagination::PaginationBar;
use crate::table::RowsView;
use crate::tui::app::{App, Focus};
use crate::tui::colors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use unicode_width::UnicodeWidthStr;

const PLACEHOLDER: &str = "Search or enter data";

pub fn draw<C: Clock>(frame: &mut Frame, app: &App<C>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Table
            Constraint::Length(3), // Pagination
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title(frame, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    draw_table(frame, app, chunks[2]);
    draw_pagination(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    if app.focus == Focus::Search {
        // Border (1) + prompt " > " (3)
        let cursor_x = chunks[1].x + 4 + app.search.before_cursor().width() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("Table Data")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    frame.render_widget(title, area);
}

fn draw_search_bar<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(colors::focus_border(app.focus == Focus::Search))
        .title(" Search ")
        .title_bottom(Line::from(" Ctrl+R: Reset Data ").right_aligned());

    let text = if app.search.query.is_empty() {
        Line::from(vec![
            Span::raw(" > "),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::raw(" > "),
            Span::styled(app.search.query.as_str(), Style::default().fg(Color::White)),
        ])
    };

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_table<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let header = Row::new(
        ["Id", "Title", "Price", "Description"]
            .into_iter()
            .map(|name| Cell::from(name).style(colors::header_style())),
    )
    .height(1);

    let widths = [
        Constraint::Length(5),
        Constraint::Percentage(35),
        Constraint::Length(10),
        Constraint::Fill(1),
    ];

    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);

    let placeholder = match app.table.rows() {
        RowsView::Loading => Some(Line::styled(
            "Loading...",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        RowsView::Failed(message) => Some(Line::styled(
            format!("Failed to load products: {}", message),
            Style::default().fg(Color::LightRed),
        )),
        RowsView::Page(products) => {
            let rows: Vec<Row> = products
                .iter()
                .enumerate()
                .map(|(visual_idx, product)| {
                    let bg = colors::row_background(visual_idx);
                    Row::new(vec![
                        Cell::from(product.id.to_string())
                            .style(Style::default().fg(Color::Gray)),
                        Cell::from(product.title.clone())
                            .style(Style::default().fg(Color::White)),
                        Cell::from(product.price_text())
                            .style(Style::default().fg(colors::color_for_price(product.price))),
                        Cell::from(product.description.clone())
                            .style(Style::default().fg(Color::DarkGray)),
                    ])
                    .style(Style::default().bg(bg))
                })
                .collect();

            let table = Table::new(rows, widths).header(header.clone()).block(block.clone());
            frame.render_widget(table, area);
            None
        }
    };

    // Placeholder states span the whole table below the header
    if let Some(line) = placeholder {
        let table = Table::new(Vec::<Row>::new(), widths).header(header).block(block);
        frame.render_widget(table, area);
        let body = Rect {
            y: inner.y.saturating_add(1),
            height: inner.height.saturating_sub(1),
            ..inner
        };
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), body);
    }
}

fn draw_pagination<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let bar: PaginationBar = app.table.pagination();
    let focused = app.focus == Focus::Pagination;

    let mut spans = Vec::new();
    for (i, link) in bar.links().iter().enumerate() {
        let mut style = if link.active {
            Style::default()
                .fg(Color::White)
                .bg(colors::ACTIVE_PAGE_BG)
                .add_modifier(Modifier::BOLD)
        } else if link.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        if focused && i == app.link_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {} ", link.label), style));
        spans.push(Span::raw(" "));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(colors::focus_border(focused))
        .title_bottom(
            Line::from(format!(
                " Page {} of {} ",
                app.table.current_page(),
                bar.total_pages()
            ))
            .right_aligned(),
        );

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_status_bar<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let left = format!(" {}", app.status_message);
    let right = if app.table.has_pending_query() {
        " searching... ".to_string()
    } else {
        format!(
            " {} of {} products ",
            app.table.filtered_count(),
            app.table.products().len()
        )
    };

    let padding = (area.width as usize).saturating_sub(left.width() + right.width());
    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(Color::White)),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(colors::BAR_BG)),
        area,
    );
}
