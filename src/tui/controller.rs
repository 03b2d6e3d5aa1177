use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// What a key press asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    Input(InputAction),
    /// A seat move; bots get a chance to answer right away.
    Move(InputAction),
}

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match map_key(app, key.code) {
                        Some(Command::Quit) => break,
                        Some(Command::Input(action)) => {
                            app.handle_input(action);
                        }
                        Some(Command::Move(action)) => {
                            if app.handle_input(action) {
                                app.agents_on_turn();
                            }
                        }
                        None => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.agents_on_turn();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn map_key(app: &AppState, code: KeyCode) -> Option<Command> {
    use InputAction::*;

    match code {
        KeyCode::Char('?') => return Some(Command::Input(ToggleHelp)),
        KeyCode::Char('h') | KeyCode::Char('H') => return Some(Command::Input(ToggleHistory)),
        _ => {}
    }
    // overlays swallow everything else
    if app.help_open() {
        return matches!(code, KeyCode::Esc).then_some(Command::Input(ToggleHelp));
    }
    if app.history_open() {
        let action = match code {
            KeyCode::Up => HistoryUp,
            KeyCode::Down => HistoryDown,
            KeyCode::Esc => ToggleHistory,
            _ => return None,
        };
        return Some(Command::Input(action));
    }

    let action = match (app.scene, code) {
        (_, KeyCode::Char('m') | KeyCode::Char('M')) => ToggleMenu,
        (Scene::Menu, KeyCode::Char('q') | KeyCode::Char('Q')) => return Some(Command::Quit),
        (Scene::Menu, KeyCode::Up) => MenuPrev,
        (Scene::Menu, KeyCode::Down) => MenuNext,
        (Scene::Menu, KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right) => MenuInc,
        (Scene::Menu, KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left) => MenuDec,
        (Scene::Menu, KeyCode::Enter) => MenuApply,
        (Scene::Menu, KeyCode::Esc) => MenuCancel,
        (Scene::Table, KeyCode::Char(' ')) => NewGame,
        (Scene::Table, KeyCode::Left) => CursorPrev,
        (Scene::Table, KeyCode::Right) => CursorNext,
        (Scene::Table, KeyCode::Char('d') | KeyCode::Char('D')) => BotStrategyNext,
        (Scene::Table, KeyCode::Enter) => return Some(Command::Move(PlaySelected)),
        (Scene::Table, KeyCode::Char('p') | KeyCode::Char('P')) => return Some(Command::Move(Pass)),
        _ => return None,
    };
    Some(Command::Input(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_keys_map_to_moves() {
        let mut app = AppState::default();
        app.apply_menu();
        assert_eq!(map_key(&app, KeyCode::Enter), Some(Command::Move(InputAction::PlaySelected)));
        assert_eq!(map_key(&app, KeyCode::Char('p')), Some(Command::Move(InputAction::Pass)));
        assert_eq!(map_key(&app, KeyCode::Char('q')), None, "quit only from the menu");
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = AppState::default();
        app.apply_menu();
        app.handle_input(InputAction::ToggleHelp);
        assert_eq!(map_key(&app, KeyCode::Enter), None);
        assert_eq!(map_key(&app, KeyCode::Esc), Some(Command::Input(InputAction::ToggleHelp)));
    }
}
