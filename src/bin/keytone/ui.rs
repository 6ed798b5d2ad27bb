//! Status view: tuning fields, instrument, held degrees, key help.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use keytone::tuning::TuningConfig;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(frame.area());

    render_tuning(frame, areas[0], app);
    render_status(frame, areas[1], app);
    render_help(frame, areas[2]);
}

fn describe(config: &TuningConfig) -> String {
    let scheme = config.scheme.map_or("unset (12edo fallback)", |s| s.name());
    format!(
        "base {:.2} Hz | scheme {} | steps {:.1} | unison {:.3} | cents {:.1}",
        config.base_frequency, scheme, config.steps, config.unison, config.cents
    )
}

fn render_tuning(frame: &mut Frame, area: Rect, app: &App) {
    let committed = describe(app.tuning().config());
    let draft = describe(app.tuning().draft());
    let edited = app.tuning().draft() != app.tuning().config();

    let lines = vec![
        Line::from(vec![
            Span::styled("instrument: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                app.router().instrument().name(),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("tuning:     ", Style::default().fg(Color::DarkGray)),
            Span::raw(committed),
        ]),
        Line::from(vec![
            Span::styled("draft:      ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                draft,
                Style::default().fg(if edited { Color::Yellow } else { Color::DarkGray }),
            ),
        ]),
        Line::from(vec![
            Span::styled("held:       ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:?}", app.router().held_degrees()),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];

    let block = Block::default().title(" keytone ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" status ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(app.status()).block(block), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("play: `1234567890-= qwertyuiop[]\\ asdfghjkl;'<enter> zxcvbnm,./"),
        Line::from("F1 simple  F2 harmonic  F3 detuned  F4 scheme  F5 apply tuning"),
        Line::from("arrows: base freq / steps   PgUp/PgDn: cents   Esc: quit"),
    ];
    let block = Block::default().title(" keys ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
