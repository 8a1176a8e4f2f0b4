pub mod board;
pub mod games;
pub mod screen;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use reflex::{app::App, results::GameKind};

const HORIZONTAL_MARGIN: u16 = 2;

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn game_color(game: GameKind) -> Color {
    match game {
        GameKind::Typing => Color::Magenta,
        GameKind::Aim => Color::Cyan,
    }
}

pub fn game_icon(game: GameKind) -> &'static str {
    match game {
        GameKind::Typing => "⌨",
        GameKind::Aim => "◎",
    }
}

/// Splits `area` into a 3-row header, the body and a 1-row legend.
pub fn frame_chunks(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

pub fn render_header(f: &mut Frame, area: Rect, title: &str, color: Color) {
    let header = Paragraph::new(Span::styled(title.to_string(), bold().fg(color)))
        .block(Block::default().borders(Borders::BOTTOM))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

pub fn render_legend(f: &mut Frame, area: Rect, legend: &str) {
    let legend = Paragraph::new(Span::styled(
        legend.to_string(),
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(legend, area);
}

/// Lines centred vertically and horizontally inside `area`.
pub fn render_centered(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let inner = Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: height.min(area.height),
    };
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(widget, inner);
}

pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(&app.state).render(app, f);
}
