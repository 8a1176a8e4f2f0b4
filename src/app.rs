//! Screen flow of the terminal front end, kept free of terminal I/O so it can
//! be driven headlessly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::aim::{AimSession, ClickOutcome, PlayArea};
use crate::config::{Config, ConfigStore};
use crate::ranking::{MockRanking, NameInput, RankingSubmission, RankingView};
use crate::results::{GameKind, SessionSummary};
use crate::session::{GameSession, GameState, SessionConfig, SessionDriver};
use crate::typing::{TypingSession, WordPool};

/// Play-area units covered by one terminal column.
pub const UNITS_PER_COL: f64 = 10.0;
/// Play-area units covered by one terminal row (cells are about twice as tall as wide).
pub const UNITS_PER_ROW: f64 = 20.0;

const PLAY_MARGIN_X: u16 = 2;
const PLAY_TOP: u16 = 4;
const PLAY_BOTTOM: u16 = 3;

/// A rectangle of terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.width && row >= self.y && row < self.y + self.height
    }

    pub fn to_play_area(self) -> PlayArea {
        PlayArea::new(
            self.width as f64 * UNITS_PER_COL,
            self.height as f64 * UNITS_PER_ROW,
        )
    }
}

/// Cells used for the aim play area in a terminal of `cols` x `rows`.
pub fn play_rect(cols: u16, rows: u16) -> Option<CellRect> {
    let width = cols.checked_sub(PLAY_MARGIN_X * 2)?;
    let height = rows.checked_sub(PLAY_TOP + PLAY_BOTTOM)?;
    if width == 0 || height == 0 {
        return None;
    }
    Some(CellRect {
        x: PLAY_MARGIN_X,
        y: PLAY_TOP,
        width,
        height,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Game,
    NameEntry,
    Ranking,
}

/// The running game, each with its own timers
#[derive(Debug)]
pub enum ActiveGame {
    Typing(SessionDriver<TypingSession>),
    Aim(SessionDriver<AimSession>),
}

impl ActiveGame {
    fn new(kind: GameKind, config: SessionConfig) -> Self {
        match kind {
            GameKind::Typing => ActiveGame::Typing(SessionDriver::new(TypingSession::new(
                config,
                WordPool::builtin(),
            ))),
            GameKind::Aim => ActiveGame::Aim(SessionDriver::new(AimSession::new(config))),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            ActiveGame::Typing(_) => GameKind::Typing,
            ActiveGame::Aim(_) => GameKind::Aim,
        }
    }

    pub fn state(&self) -> GameState {
        match self {
            ActiveGame::Typing(d) => d.game().state(),
            ActiveGame::Aim(d) => d.game().state(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        match self {
            ActiveGame::Typing(d) => d.game().summary(),
            ActiveGame::Aim(d) => d.game().summary(),
        }
    }

    fn start(&mut self, now_ms: u64) {
        match self {
            ActiveGame::Typing(d) => d.start(now_ms),
            ActiveGame::Aim(d) => d.start(now_ms),
        };
    }

    fn advance(&mut self, now_ms: u64) {
        match self {
            ActiveGame::Typing(d) => d.advance(now_ms),
            ActiveGame::Aim(d) => d.advance(now_ms),
        };
    }

    fn teardown(&mut self) {
        match self {
            ActiveGame::Typing(d) => d.teardown(),
            ActiveGame::Aim(d) => d.teardown(),
        }
    }
}

pub struct App {
    pub state: AppState,
    pub selected: GameKind,
    pub game: Option<ActiveGame>,
    pub name_input: NameInput,
    pub submission: Option<RankingSubmission>,
    pub ranking: MockRanking,
    pub config: Config,
    pub should_quit: bool,
    play_rect: Option<CellRect>,
    config_store: Option<Box<dyn ConfigStore>>,
}

impl App {
    pub fn new(config: Config, config_store: Option<Box<dyn ConfigStore>>) -> Self {
        Self {
            state: AppState::Menu,
            selected: config.last_game.unwrap_or(GameKind::Typing),
            game: None,
            name_input: NameInput::new(),
            submission: None,
            ranking: MockRanking::new(),
            config,
            should_quit: false,
            play_rect: None,
            config_store,
        }
    }

    /// Opens a game on its ready screen.
    pub fn open_game(&mut self, kind: GameKind) {
        if let Some(game) = self.game.as_mut() {
            game.teardown();
        }
        self.selected = kind;
        let mut game = ActiveGame::new(kind, self.config.session_config());
        if let ActiveGame::Aim(d) = &mut game {
            d.game_mut().set_area(self.play_rect.map(CellRect::to_play_area));
        }
        self.game = Some(game);
        self.state = AppState::Game;
        self.config.last_game = Some(kind);
        tracing::info!(game = %kind, "opened game");
    }

    pub fn back_to_menu(&mut self) {
        if let Some(mut game) = self.game.take() {
            game.teardown();
        }
        self.state = AppState::Menu;
        self.submission = None;
        self.persist_config();
    }

    pub fn play_rect(&self) -> Option<CellRect> {
        self.play_rect
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.play_rect = play_rect(cols, rows);
        if let Some(ActiveGame::Aim(d)) = self.game.as_mut() {
            d.game_mut().set_area(self.play_rect.map(CellRect::to_play_area));
        }
    }

    pub fn on_tick(&mut self, now_ms: u64) {
        if let Some(game) = self.game.as_mut() {
            game.advance(now_ms);
        }
    }

    pub fn ranking_view(&self) -> RankingView {
        RankingView::new(&self.ranking, self.selected, self.submission.clone())
    }

    pub fn on_key(&mut self, key: KeyEvent, now_ms: u64) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }
        match self.state {
            AppState::Menu => self.on_menu_key(key),
            AppState::Game => self.on_game_key(key, now_ms),
            AppState::NameEntry => self.on_name_key(key),
            AppState::Ranking => self.on_ranking_key(key),
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent, now_ms: u64) -> Option<ClickOutcome> {
        if self.state != AppState::Game || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let rect = self.play_rect?;
        if !rect.contains(mouse.column, mouse.row) {
            return None;
        }
        let Some(ActiveGame::Aim(d)) = self.game.as_mut() else {
            return None;
        };
        // aim at the centre of the clicked cell
        let x = (mouse.column - rect.x) as f64 * UNITS_PER_COL + UNITS_PER_COL / 2.0;
        let y = (mouse.row - rect.y) as f64 * UNITS_PER_ROW + UNITS_PER_ROW / 2.0;
        Some(d.game_mut().click_at(x, y, now_ms))
    }

    fn quit(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.teardown();
        }
        self.persist_config();
        self.should_quit = true;
    }

    fn on_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                self.selected = match self.selected {
                    GameKind::Typing => GameKind::Aim,
                    GameKind::Aim => GameKind::Typing,
                };
            }
            KeyCode::Char('1') => self.open_game(GameKind::Typing),
            KeyCode::Char('2') => self.open_game(GameKind::Aim),
            KeyCode::Enter => self.open_game(self.selected),
            _ => {}
        }
    }

    fn on_game_key(&mut self, key: KeyEvent, now_ms: u64) {
        let Some(game) = self.game.as_mut() else {
            self.state = AppState::Menu;
            return;
        };
        if key.code == KeyCode::Esc {
            self.back_to_menu();
            return;
        }
        match game.state() {
            GameState::Playing => {
                if let ActiveGame::Typing(d) = game {
                    match key.code {
                        KeyCode::Char(c) => {
                            d.game_mut().type_char(c, now_ms);
                        }
                        KeyCode::Backspace => {
                            d.game_mut().backspace(now_ms);
                        }
                        _ => {}
                    }
                }
            }
            GameState::Ready => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => game.start(now_ms),
                KeyCode::Char('k') => self.state = AppState::Ranking,
                _ => {}
            },
            GameState::Finished => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => game.start(now_ms),
                KeyCode::Char('s') => {
                    self.name_input =
                        NameInput::with_value(self.config.player_name.as_deref().unwrap_or(""));
                    self.state = AppState::NameEntry;
                }
                KeyCode::Char('k') => self.state = AppState::Ranking,
                _ => {}
            },
        }
    }

    fn on_name_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state = AppState::Game,
            KeyCode::Backspace => self.name_input.backspace(),
            KeyCode::Enter => self.submit_name(),
            KeyCode::Char(c) => self.name_input.push(c),
            _ => {}
        }
    }

    fn on_ranking_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('b')
        ) {
            self.submission = None;
            self.state = if self.game.is_some() {
                AppState::Game
            } else {
                AppState::Menu
            };
        }
    }

    fn submit_name(&mut self) {
        let Some(summary) = self.game.as_ref().map(ActiveGame::summary) else {
            return;
        };
        let Some(name) = self.name_input.submit() else {
            return;
        };
        match RankingSubmission::new(&summary, &name) {
            Ok(submission) => {
                tracing::info!(
                    game = %submission.game,
                    name = %submission.name,
                    score = submission.score,
                    accuracy = submission.accuracy,
                    "ranking submission"
                );
                self.config.player_name = Some(submission.name.clone());
                self.submission = Some(submission);
                self.state = AppState::Ranking;
                self.persist_config();
            }
            Err(err) => tracing::debug!(%err, "name not accepted"),
        }
    }

    fn persist_config(&self) {
        if let Some(store) = self.config_store.as_ref() {
            if let Err(err) = store.save(&self.config) {
                tracing::warn!(%err, "failed to save config");
            }
        }
    }
}
