use crate::cards::{Card, Rank, Suit};
use crate::engine::HistoryEntry;
use crate::game::{GameEvent, Seat, PLAYERS};
use crate::runs::is_valid_play;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let status_height: u16 = 2 + 2; // content + borders

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // header
            Constraint::Length(4 + 2),         // runs
            Constraint::Min(5),                // seats
            Constraint::Length(3),             // human hand
            Constraint::Length(status_height), // status bar
        ])
        .split(size);

    let state = app.state();
    let seed = app.last_seed.map(|s| s.to_string()).unwrap_or_else(|| "--".into());
    let header = Paragraph::new(Line::from(format!(
        "Seed: {seed}   Turn: {}   Acting: P{}   On table: {}/52",
        app.table.history_len(),
        state.current_player() + 1,
        state.runs().card_count(),
    )))
    .block(Block::default().title("sevens-rs").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    draw_runs(f, app, chunks[1]);

    let seat_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..PLAYERS).map(|_| Constraint::Ratio(1, PLAYERS as u32)).collect::<Vec<_>>())
        .split(chunks[2]);
    for seat in 0..PLAYERS {
        render_seat(f, seat_chunks[seat], app, seat);
    }

    draw_hand(f, app, chunks[3]);

    // Status bar: split horizontally for info vs keys
    let status_area = chunks[4];
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), status_area);
    let status_inner = inner(status_area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(status_inner);

    let mut left_info = if !app.game_started {
        vec![Line::from("No game yet. Press Space to deal.")]
    } else if let Some(w) = state.winner() {
        vec![Line::from(format!("P{} wins! Press Space for a new game.", w + 1))]
    } else if app.human_seat == Some(state.current_player()) {
        let action_style = if app.selected_is_playable() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        vec![Line::from(vec![
            Span::raw("Your turn: "),
            Span::styled("Enter play", action_style),
            Span::raw(" • "),
            Span::raw("P pass • ←/→ select"),
        ])]
    } else {
        vec![Line::from(format!("Waiting on P{}", state.current_player() + 1))]
    };

    if let Some(err) = app.action_error() {
        left_info.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let right_keys = vec![Line::from(""), Line::from("? help • H history • M menu")];
    let left_para = Paragraph::new(left_info).wrap(Wrap { trim: true });
    let right_para =
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right);
    f.render_widget(left_para, cols[0]);
    f.render_widget(right_para, cols[1]);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

/// One row per suit with thirteen rank slots; played cards light up.
fn draw_runs(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default().title("Runs").borders(Borders::ALL);
    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut lines: Vec<Line> = Vec::with_capacity(4);
    for (suit, run) in app.state().runs().iter() {
        let (glyph, style) = suit_glyph_and_style(suit);
        let mut spans = vec![Span::styled(format!("{glyph} "), style)];
        for rank in Rank::ALL {
            if run.contains(Card::new(suit, rank)) {
                spans.push(Span::styled(format!("{:>3}", rank.label()), style));
            } else {
                spans.push(Span::styled("  ·", dim));
            }
        }
        lines.push(Line::from(spans));
    }
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_seat(f: &mut Frame, area: Rect, app: &AppState, seat: Seat) {
    let state = app.state();
    let mut title = format!("P{}", seat + 1);
    if app.human_seat == Some(seat) {
        title.push_str(" [You]");
    }
    if let Some(label) = app.bot_profile_label(seat) {
        title.push_str(&format!(" [BOT:{label}]"));
    }
    if seat == state.current_player() && !state.is_over() {
        title.push_str(" [Act]");
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if state.winner() == Some(seat) {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if seat == state.current_player() {
        block = block.border_style(Style::default().fg(Color::Yellow));
    } else if app.human_seat == Some(seat) {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }

    let dim = Style::default().add_modifier(Modifier::DIM);
    let cards_left = state.hand(seat).map(|h| h.len()).unwrap_or(0);
    let last = last_event_for(&app.table.history_recent(PLAYERS * 4), seat);
    let mut lines: Vec<Line> = Vec::with_capacity(3);
    lines.push(Line::from(format!("Cards: {cards_left}")));
    lines.push(match last {
        Some(GameEvent::PlayCard { card, .. }) => {
            Line::from(vec![Span::raw("Last: "), card_span(card)])
        }
        Some(GameEvent::PassTurn { .. }) => Line::from("Last: pass"),
        None => Line::from(vec![Span::raw("Last: "), Span::styled("--", dim)]),
    });
    if state.winner() == Some(seat) {
        lines.push(Line::from(Span::styled("Winner!", Style::default().fg(Color::Green))));
    }
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn last_event_for(entries: &[HistoryEntry], seat: Seat) -> Option<GameEvent> {
    entries.iter().rev().map(|e| e.event).find(|ev| ev.player() == seat)
}

fn draw_hand(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default().title("Your hand").borders(Borders::ALL);
    let hand = app.human_hand();
    if hand.is_empty() {
        let text = if app.human_seat.is_some() { "(empty)" } else { "(spectating)" };
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    }
    let runs = app.state().runs();
    let mut spans: Vec<Span> = Vec::with_capacity(hand.len() * 2);
    for (i, &card) in hand.iter().enumerate() {
        let mut span = card_span(card);
        span.style = if is_valid_play(card, runs) {
            span.style.add_modifier(Modifier::BOLD)
        } else {
            span.style.add_modifier(Modifier::DIM)
        };
        if i == app.cursor {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
        spans.push(span);
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn suit_glyph_and_style(s: Suit) -> (char, Style) {
    match s {
        Suit::Hearts => ('♥', Style::default().fg(Color::Red)),
        Suit::Diamonds => ('♦', Style::default().fg(Color::Red)),
        Suit::Clubs => ('♣', Style::default().fg(Color::White)),
        Suit::Spades => ('♠', Style::default().fg(Color::White)),
    }
}

/// Rank plus suit glyph, colored by suit, padded to a fixed width.
fn card_span(card: Card) -> Span<'static> {
    let (glyph, style) = suit_glyph_and_style(card.suit());
    Span::styled(format!("{:>2}{glyph}", card.rank().label()), style)
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = app.table.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No moves yet."));
    } else {
        for entry in entries {
            lines.push(Line::from(format!("{:>3}. {}", entry.turn + 1, entry.event)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let lines = vec![
        Line::from(Span::styled("Rules:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- The holder of 7♥ leads; any 7 starts its suit"),
        Line::from("- Extend a suit one rank below or above its run"),
        Line::from("- Pass only when nothing in hand fits"),
        Line::from("- First to empty their hand wins"),
        Line::from(""),
        Line::from(Span::styled("Table:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- Space: deal / new game"),
        Line::from("- ← / →: select card"),
        Line::from("- Enter: play selected card"),
        Line::from("- P: pass"),
        Line::from("- D: cycle bot strategy"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Menu:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply"),
        Line::from("- Esc: cancel"),
        Line::from("- Q: quit (menu)"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}
