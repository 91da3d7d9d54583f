use ratatui::style::{Color, Modifier, Style};

pub const BAR_BG: Color = Color::Rgb(40, 40, 50);
pub const HEADER_BG: Color = Color::Rgb(0, 95, 135);
pub const ACTIVE_PAGE_BG: Color = Color::Rgb(37, 99, 235);

pub fn color_for_price(price: f64) -> Color {
    if price < 20.0 {
        Color::Green
    } else if price < 100.0 {
        Color::Yellow
    } else if price < 500.0 {
        Color::LightRed
    } else {
        Color::Magenta
    }
}

/// Alternating row background, like the striped web table
pub fn row_background(visual_idx: usize) -> Color {
    if visual_idx % 2 == 1 {
        Color::Rgb(25, 25, 35)
    } else {
        Color::Reset
    }
}

pub fn header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
