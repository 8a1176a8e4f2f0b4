use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use reflex::aim::{AimSession, Target};
use reflex::app::{ActiveGame, App, CellRect, UNITS_PER_COL, UNITS_PER_ROW};
use reflex::results::{GameKind, SessionSummary};
use reflex::session::{GameSession, GameState};
use reflex::typing::TypingSession;

use super::{bold, dim, frame_chunks, game_color, game_icon, render_centered, render_header, render_legend};

pub fn render_game(app: &App, f: &mut Frame) {
    let Some(game) = app.game.as_ref() else {
        return;
    };
    let kind = game.kind();
    let (header, body, legend) = frame_chunks(f.area());
    render_header(
        f,
        header,
        &format!("{} {}", game_icon(kind), kind.title()),
        game_color(kind),
    );

    match game.state() {
        GameState::Ready => {
            render_ready(f, body, kind, app.config.session_config().duration_secs);
            render_legend(f, legend, "(enter) start / (k) ranking / (esc) back");
        }
        GameState::Playing => {
            match game {
                ActiveGame::Typing(d) => render_typing(f, body, d.game()),
                ActiveGame::Aim(d) => render_aim(f, app.play_rect(), d.game()),
            }
            render_legend(f, legend, "(esc) quit game");
        }
        GameState::Finished => {
            render_finished(f, body, &game.summary());
            render_legend(
                f,
                legend,
                "(r)eplay / (s)ave to ranking / (k) ranking / (esc) back",
            );
        }
    }
}

fn render_ready(f: &mut Frame, area: Rect, kind: GameKind, secs: u32) {
    let (prompt, goal, tips): (&str, String, [&str; 3]) = match kind {
        GameKind::Typing => (
            "Ready for the challenge?",
            format!("Type each word as fast and accurately as you can. You have {secs} seconds."),
            [
                "Faster = more points",
                "Mistakes lower your score",
                "Longer words give more points",
            ],
        ),
        GameKind::Aim => (
            "Ready to test your aim?",
            format!("Click the targets as fast as you can. You have {secs} seconds."),
            [
                "Smaller targets give more points",
                "Faster reactions earn a bonus",
                "Don't click the background! You lose points",
            ],
        ),
    };
    let mut lines = vec![
        Line::from(Span::styled(prompt.to_string(), bold())),
        Line::from(""),
        Line::from(goal),
        Line::from(""),
        Line::from(Span::styled("Tips:", bold())),
    ];
    lines.extend(tips.iter().map(|t| Line::from(Span::styled(format!("• {t}"), dim()))));
    render_centered(f, area, lines);
}

fn timer_style(remaining: u32) -> Style {
    if remaining <= 5 {
        bold().fg(Color::Red).add_modifier(Modifier::SLOW_BLINK)
    } else {
        bold().fg(Color::Yellow)
    }
}

fn status_line(game: GameKind, summary: &SessionSummary) -> Line<'static> {
    let (ok_label, err_label) = match game {
        GameKind::Typing => ("Words", "Errors"),
        GameKind::Aim => ("Hits", "Misses"),
    };
    let mut spans = vec![
        Span::styled(format!("{ok_label}: "), dim()),
        Span::styled(summary.successes.to_string(), bold().fg(Color::Green)),
        Span::raw("   "),
        Span::styled(format!("{err_label}: "), dim()),
        Span::styled(summary.failures.to_string(), bold().fg(Color::Red)),
    ];
    if game == GameKind::Aim {
        spans.push(Span::raw("   "));
        spans.push(Span::styled("Accuracy: ", dim()));
        spans.push(Span::styled(format!("{}%", summary.accuracy), bold()));
    }
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        format!("{}s", summary.remaining_secs),
        timer_style(summary.remaining_secs),
    ));
    spans.push(Span::raw("   "));
    spans.push(Span::styled("Score: ", dim()));
    spans.push(Span::styled(summary.score.to_string(), bold().fg(Color::Cyan)));
    Line::from(spans)
}

fn render_typing(f: &mut Frame, area: Rect, typing: &TypingSession) {
    let summary = typing.summary();
    let word = typing.current_word();
    let input = typing.input();

    // typed prefix green while it matches, red once it diverges
    let on_track = word.starts_with(input);
    let typed_style = if on_track {
        bold().fg(Color::Green)
    } else {
        bold().fg(Color::Red)
    };
    let rest = if on_track { &word[input.len()..] } else { word };

    let lines = vec![
        status_line(GameKind::Typing, &summary),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            word.to_string(),
            bold().fg(Color::Magenta),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(input.to_string(), typed_style),
            Span::styled(rest.to_string(), dim().add_modifier(Modifier::UNDERLINED)),
        ]),
    ];
    render_centered(f, area, lines);
}

fn render_aim(f: &mut Frame, play: Option<CellRect>, aim: &AimSession) {
    let summary = aim.summary();
    let status_area = Rect {
        x: f.area().x,
        y: f.area().y + 3,
        width: f.area().width,
        height: 1,
    };
    f.render_widget(
        Paragraph::new(status_line(GameKind::Aim, &summary)).alignment(Alignment::Center),
        status_area.intersection(f.area()),
    );

    let Some(play) = play else {
        render_centered(
            f,
            f.area(),
            vec![Line::from(Span::styled("Terminal too small", bold().fg(Color::Red)))],
        );
        return;
    };
    let play_area = Rect {
        x: play.x,
        y: play.y,
        width: play.width,
        height: play.height,
    }
    .intersection(f.area());
    f.render_widget(
        Block::default()
            .borders(Borders::NONE)
            .style(Style::default().bg(Color::Black)),
        play_area,
    );

    if aim.targets().is_empty() {
        render_centered(
            f,
            play_area,
            vec![Line::from(Span::styled("Get ready...", dim()))],
        );
    }
    for target in aim.targets() {
        paint_target(f, play_area, target);
    }
}

/// Fills every cell whose centre lies inside the target's circle.
fn paint_target(f: &mut Frame, play_area: Rect, target: &Target) {
    let style = Style::default().fg(Color::Cyan).bg(Color::Black);
    let buf = f.buffer_mut();
    for row in 0..play_area.height {
        let cy = row as f64 * UNITS_PER_ROW + UNITS_PER_ROW / 2.0;
        if cy < target.y || cy > target.y + target.size {
            continue;
        }
        for col in 0..play_area.width {
            let cx = col as f64 * UNITS_PER_COL + UNITS_PER_COL / 2.0;
            if target.contains(cx, cy) {
                buf.set_string(play_area.x + col, play_area.y + row, "█", style);
            }
        }
    }
}

fn render_finished(f: &mut Frame, area: Rect, summary: &SessionSummary) {
    let (ok_label, err_label) = match summary.game {
        GameKind::Typing => ("Correct words", "Errors"),
        GameKind::Aim => ("Hits", "Misses"),
    };
    let color = game_color(summary.game);
    let lines = vec![
        Line::from(Span::styled("Game over!", bold().fg(color))),
        Line::from(""),
        Line::from(vec![
            Span::styled(summary.score.to_string(), bold().fg(color)),
            Span::styled(" final score", dim()),
        ]),
        Line::from(vec![
            Span::styled(summary.successes.to_string(), bold().fg(Color::Green)),
            Span::styled(format!(" {}", ok_label.to_lowercase()), dim()),
        ]),
        Line::from(vec![
            Span::styled(format!("{}%", summary.accuracy), bold().fg(Color::Yellow)),
            Span::styled(" accuracy", dim()),
        ]),
        Line::from(vec![
            Span::styled(summary.failures.to_string(), bold()),
            Span::styled(format!(" {}", err_label.to_lowercase()), dim()),
        ]),
    ];
    render_centered(f, area, lines);
}
