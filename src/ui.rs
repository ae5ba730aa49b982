use std::collections::BTreeSet;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{heading_state, App, CheckState, Row};
use crate::categories::{self, EventKey};

/// Render the full TUI frame.
pub fn draw(frame: &mut Frame, app: &App, active: &BTreeSet<EventKey>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(1),   // breakpoint tree
            Constraint::Length(1), // help bar
        ])
        .split(frame.area());

    // ── Status bar ──────────────────────────────────────────────
    let total: usize = categories::CATEGORIES
        .iter()
        .map(|(_, types)| types.len())
        .sum();
    let status_text = format!(" Event listener breakpoints | {} of {total} armed", active.len());
    let status_bar = Paragraph::new(Line::from(vec![Span::styled(
        status_text,
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::Cyan));
    frame.render_widget(status_bar, chunks[0]);

    // ── Breakpoint tree ─────────────────────────────────────────
    let lines: Vec<Line> = app
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let line = render_row(app, row, active);
            if i == app.selected {
                line.patch_style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                line
            }
        })
        .collect();

    // viewport height = tree area minus 2 for the block borders
    let viewport = chunks[1].height.saturating_sub(2) as usize;
    let scroll = (app.selected + 1).saturating_sub(viewport) as u16;

    let tree = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Event Listeners ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .scroll((scroll, 0));
    frame.render_widget(tree, chunks[1]);

    // ── Help bar ────────────────────────────────────────────────
    let help = " q: quit | j/k: move | Space: toggle | Enter: expand/toggle | h/l: collapse/expand ";
    let help_bar = Paragraph::new(Line::from(Span::styled(
        help,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help_bar, chunks[2]);
}

fn render_row(app: &App, row: &Row, active: &BTreeSet<EventKey>) -> Line<'static> {
    match *row {
        Row::Heading(category) => {
            let arrow = if app.is_expanded(category) { "▾" } else { "▸" };
            let state = heading_state(category, active);
            Line::from(vec![
                Span::styled(arrow, Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                checkbox(state),
                Span::raw(" "),
                Span::styled(category, Style::default().add_modifier(Modifier::BOLD)),
            ])
        }
        Row::Event {
            category,
            event_type,
        } => {
            let state = if active.contains(&categories::event_key(category, event_type)) {
                CheckState::Checked
            } else {
                CheckState::Unchecked
            };
            Line::from(vec![Span::raw("    "), checkbox(state), Span::raw(" "), Span::raw(event_type)])
        }
    }
}

fn checkbox(state: CheckState) -> Span<'static> {
    match state {
        CheckState::Checked => Span::styled("[x]", Style::default().fg(Color::Green)),
        CheckState::Indeterminate => Span::styled("[-]", Style::default().fg(Color::Yellow)),
        CheckState::Unchecked => Span::raw("[ ]"),
    }
}
