use ratatui::{
    style::Style,
    text::{Line, Span},
    Frame,
};

use reflex::app::{App, AppState};
use reflex::results::GameKind;

use super::{
    board::{render_name_entry, render_ranking},
    bold, dim, frame_chunks, game_color, game_icon,
    games::render_game,
    render_centered, render_header, render_legend,
};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Game picker
pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let (header, body, legend) = frame_chunks(f.area());
        render_header(f, header, "Reflex Games", ratatui::style::Color::Yellow);

        let mut lines = vec![
            Line::from(Span::styled("Test your speed and precision", dim())),
            Line::from(""),
        ];
        for (i, game) in GameKind::ALL.into_iter().enumerate() {
            let marker = if game == app.selected { "▶ " } else { "  " };
            let style = if game == app.selected {
                bold().fg(game_color(game))
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{} {}  ({})", game_icon(game), game.title(), i + 1),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Compete for the ranking and show off your skills",
            dim(),
        )));
        render_centered(f, body, lines);
        render_legend(f, legend, "(←/→) choose / (enter) play / (1/2) jump / (esc) quit");
    }
}

/// Ready, playing and finished views of the active game
pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_game(app, f);
    }
}

pub struct NameEntryScreen;

impl Screen for NameEntryScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_name_entry(app, f);
    }
}

pub struct RankingScreen;

impl Screen for RankingScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_ranking(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Menu => Box::new(MenuScreen),
        AppState::Game => Box::new(GameScreen),
        AppState::NameEntry => Box::new(NameEntryScreen),
        AppState::Ranking => Box::new(RankingScreen),
    }
}
