use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use reflex::app::App;
use reflex::ranking::MAX_NAME_LEN;

use super::{bold, dim, frame_chunks, game_color, game_icon, render_centered, render_header, render_legend};

pub fn render_name_entry(app: &App, f: &mut Frame) {
    let Some(game) = app.game.as_ref() else {
        return;
    };
    let summary = game.summary();
    let color = game_color(summary.game);
    let (header, body, legend) = frame_chunks(f.area());
    render_header(f, header, "Great game!", color);

    let value = app.name_input.value();
    let lines = vec![
        Line::from(Span::styled("Enter your name to save your score", dim())),
        Line::from(""),
        Line::from(vec![
            Span::styled(summary.score.to_string(), bold().fg(color)),
            Span::styled(" points", dim()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", dim()),
            Span::styled(value.to_string(), bold()),
            Span::styled("_", dim()),
        ]),
        Line::from(Span::styled(
            format!("{}/{MAX_NAME_LEN}", value.chars().count()),
            dim(),
        )),
    ];
    render_centered(f, body, lines);
    render_legend(
        f,
        legend,
        if app.name_input.can_submit() {
            "(enter) save score / (esc) cancel"
        } else {
            "type a name / (esc) cancel"
        },
    );
}

fn rank_label(rank: u32) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("#{n}"),
    }
}

fn rank_style(rank: u32) -> Style {
    match rank {
        1 => bold().fg(Color::Yellow),
        2 => bold().fg(Color::Gray),
        3 => bold().fg(Color::LightRed),
        _ => Style::default(),
    }
}

pub fn render_ranking(app: &App, f: &mut Frame) {
    let view = app.ranking_view();
    let (header, body, legend) = frame_chunks(f.area());
    render_header(
        f,
        header,
        &format!("{} Global Ranking · {}", game_icon(view.game), view.game.title()),
        game_color(view.game),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if view.candidate.is_some() { 4 } else { 0 }),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .split(body);

    if let Some(candidate) = view.candidate.as_ref() {
        let placement = match view.candidate_position() {
            Some(pos) => format!("would place #{pos}"),
            None => "outside the top 5".to_string(),
        };
        let banner = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(format!("★ {}", candidate.name), bold()),
                Span::styled("  your score", dim()),
            ]),
            Line::from(vec![
                Span::styled(candidate.score.to_string(), bold().fg(Color::Cyan)),
                Span::styled(" points   ", dim()),
                Span::styled(format!("{}%", candidate.accuracy), bold()),
                Span::styled(" accuracy   ", dim()),
                Span::styled(placement, dim()),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(banner, chunks[0]);
    }

    let rows: Vec<Row> = view
        .entries
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(rank_label(e.rank)),
                Cell::from(e.name.clone()),
                Cell::from(e.date.format("%Y-%m-%d").to_string()),
                Cell::from(e.score.to_string()),
                Cell::from(format!("{}%", e.accuracy)),
            ])
            .style(rank_style(e.rank))
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(14),
            Constraint::Length(11),
            Constraint::Length(7),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new(vec!["Rank", "Name", "Date", "Points", "Accuracy"]).style(bold().fg(Color::Yellow)),
    )
    .block(Block::default().borders(Borders::ALL).title("Top 5"));
    f.render_widget(table, chunks[1]);

    render_centered(
        f,
        chunks[2],
        vec![Line::from(Span::styled(
            "Scores are not stored yet; the board shows sample data",
            dim(),
        ))],
    );
    render_legend(f, legend, "(esc) back");
}
