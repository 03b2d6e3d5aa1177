use crate::game::PLAYERS;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let area = centered_rect(80, 80, size);
    let block = Block::default().title("sevens-rs").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    let inner_all = inner(area);

    let logo = r#"
  ____
 / ___|  _____   _____ _ __  ___
 \___ \ / _ \ \ / / _ \ '_ \/ __|
  ___) |  __/\ V /  __/ | | \__ \
 |____/ \___| \_/ \___|_| |_|___/
                                   "#;

    let logo_lines: Vec<Line> = logo
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Red))))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(logo_lines.len() as u16 + 1), Constraint::Min(3)])
        .split(inner_all);

    let logo_para =
        Paragraph::new(logo_lines).wrap(Wrap { trim: false }).alignment(Alignment::Center);
    f.render_widget(logo_para, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut cfg_lines: Vec<Line> = vec![Line::from(Span::styled("Configuration:", bold))];
    for (i, it) in app.menu_items_display().into_iter().enumerate() {
        let style = if i == app.menu_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        cfg_lines.push(Line::from(Span::styled(it, style)));
    }
    cfg_lines.push(Line::from(""));
    cfg_lines.push(Line::from(Span::styled("Seats after Enter:", bold)));
    cfg_lines.extend(lineup_preview(app).into_iter().map(Line::from));
    cfg_lines.push(Line::from(""));
    cfg_lines.push(Line::from(Span::styled("[Enter] Apply  [Esc] Cancel  [Q] Quit", dim)));
    cfg_lines.push(Line::from(Span::styled("[↑/↓] Move  [+/-] Adjust", dim)));
    f.render_widget(Paragraph::new(cfg_lines).wrap(Wrap { trim: true }), cols[0]);

    let rules = vec![
        Line::from(Span::styled("How to play:", bold)),
        Line::from("Whoever holds 7♥ leads."),
        Line::from("A 7 opens its suit's run."),
        Line::from("Add the next card below or above a run."),
        Line::from("No legal card? You must pass."),
        Line::from("First empty hand wins."),
    ];
    f.render_widget(
        Paragraph::new(rules)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::LEFT)),
        cols[1],
    );
}

/// Who will sit where once the pending settings are applied.
fn lineup_preview(app: &AppState) -> Vec<String> {
    (0..PLAYERS)
        .map(|seat| {
            let who = if seat == 0 && app.cfg_human_player {
                String::from("You")
            } else {
                format!("Bot ({})", app.cfg_bot_strategy.label())
            };
            format!("P{}: {who}", seat + 1)
        })
        .collect()
}
