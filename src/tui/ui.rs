//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::features::focus::{Phase, TimerSnapshot};
use crate::tui::app::{App, SettingsForm, FORM_LABELS};
use crate::tui::event::HELP;

/// Height of a block digit.
const GLYPH_HEIGHT: usize = 5;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let snapshot = app.snapshot();

    // Create layout: header, clock, sessions, progress, modes, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Clock
            Constraint::Length(1), // Sessions
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Quick modes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, &snapshot, chunks[0]);
    render_clock(frame, &snapshot, chunks[1]);
    render_sessions(frame, &snapshot, chunks[2]);
    render_progress(frame, &snapshot, chunks[3]);
    render_modes(frame, &snapshot, chunks[4]);
    render_status_bar(frame, app, chunks[5]);

    if let Some(form) = &app.form {
        render_form(frame, form);
    }
}

const fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Work => Color::Red,
        Phase::ShortBreak => Color::Green,
        Phase::LongBreak => Color::Blue,
    }
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let state = if snapshot.is_running { "running" } else { "paused" };
    let title = format!(" {} ({state}) ", snapshot.phase);
    let color = phase_color(snapshot.phase);

    let header = Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(header, area);
}

/// Render the remaining time in block digits.
fn render_clock(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let style = Style::default()
        .fg(phase_color(snapshot.phase))
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line<'_>> = big_text(&snapshot.clock)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, style)))
        .collect();

    // Vertically center within the available rows
    let padding = usize::from(area.height).saturating_sub(GLYPH_HEIGHT) / 2;
    for _ in 0..padding {
        lines.insert(0, Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Render the completed session count.
fn render_sessions(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let line = Line::from(vec![
        Span::raw("Sessions completed: "),
        Span::styled(
            snapshot.completed_work_sessions.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "   long break in {} session{}",
                snapshot.sessions_until_long_break,
                if snapshot.sessions_until_long_break == 1 { "" } else { "s" }
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Render elapsed share of the current phase.
fn render_progress(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let progress = snapshot.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(phase_color(snapshot.phase)))
        .ratio(progress)
        .label(format!("{:.0}%", progress * 100.0));

    frame.render_widget(gauge, area);
}

/// Render the quick-mode buttons.
fn render_modes(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let spans: Vec<Span<'_>> = Phase::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, phase)| {
            let label = format!(" {} {} ", i + 1, phase.short_name());
            let style = if *phase == snapshot.phase {
                Style::default()
                    .fg(Color::Black)
                    .bg(phase_color(*phase))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(phase_color(*phase))
            };
            [Span::styled(label, style), Span::raw("  ")]
        })
        .collect();

    let modes = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Mode "));

    frame.render_widget(modes, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = if app.form.is_some() {
        "Tab:next field | Enter:save | Esc:cancel"
    } else {
        app.status.as_deref().unwrap_or(HELP)
    };

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

/// Render the settings form as a centered popup.
fn render_form(frame: &mut Frame<'_>, form: &SettingsForm) {
    let area = centered_rect(50, 10, frame.area());

    let lines: Vec<Line<'_>> = FORM_LABELS
        .iter()
        .zip(form.fields.iter())
        .enumerate()
        .flat_map(|(i, (label, value))| {
            let focused = i == form.focused;
            let value_style = if focused {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().add_modifier(Modifier::UNDERLINED)
            };
            let marker = if focused { "> " } else { "  " };
            [
                Line::from(vec![
                    Span::raw(format!("{marker}{label:<28}")),
                    Span::styled(format!(" {value:<6}"), value_style),
                ]),
                Line::from(""),
            ]
        })
        .collect();

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Settings ")
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Block-digit rows for a `MM:SS` string.
fn big_text(text: &str) -> Vec<String> {
    let mut rows = vec![String::new(); GLYPH_HEIGHT];
    for c in text.chars() {
        let glyph = glyph(c);
        for (row, part) in rows.iter_mut().zip(glyph.iter()) {
            if !row.is_empty() {
                row.push(' ');
            }
            row.push_str(part);
        }
    }
    rows
}

const fn glyph(c: char) -> [&'static str; GLYPH_HEIGHT] {
    match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => ["  █", "  █", "  █", "  █", "  █"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "█", " ", "█", " "],
        _ => ["   ", "   ", "   ", "   ", "   "],
    }
}
