pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use reflex::{
    app::App,
    app_dirs::AppDirs,
    clock::{Clock, SystemClock},
    config::{ConfigStore, FileConfigStore},
    logging,
    results::GameKind,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
};

/// reflex mini-games in your terminal: speed typing and aim training
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Two timed reflex games with a shared ranking board. Type words as fast as you can, or click targets before they get stale."
)]
pub struct Cli {
    /// game to open directly instead of the menu
    #[clap(value_enum)]
    game: Option<GameArg>,

    /// session length in seconds
    #[clap(short = 's', long)]
    secs: Option<u32>,

    /// player name to prefill when saving a score
    #[clap(short = 'n', long)]
    name: Option<String>,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum GameArg {
    Typing,
    Aim,
}

impl From<GameArg> for GameKind {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::Typing => GameKind::Typing,
            GameArg::Aim => GameKind::Aim,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        if let Err(err) = logging::init(&path) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    if let Some(secs) = cli.secs {
        config.session_secs = secs;
    }
    if let Some(name) = cli.name.clone() {
        config.player_name = Some(name);
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, Some(Box::new(store)));
    let size = terminal.size()?;
    app.on_resize(size.width, size.height);
    if let Some(game) = cli.game {
        app.open_game(game.into());
    }

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let clock = SystemClock::new();
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    while !app.should_quit {
        terminal.draw(|f| ui::draw(app, f))?;

        let event = runner.step();
        let now = clock.now_ms();
        // timers first, so input never lands on a session that already ran out
        app.on_tick(now);
        match event {
            AppEvent::Tick => {}
            AppEvent::Resize => {
                let size = terminal.size()?;
                app.on_resize(size.width, size.height);
            }
            AppEvent::Key(key) => app.on_key(key, now),
            AppEvent::Mouse(mouse) => {
                app.on_mouse(mouse, now);
            }
        }
    }

    Ok(())
}
