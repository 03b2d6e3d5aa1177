use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use sevens_rs::tui::{app::AppState, controller};
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "sevens needs a real terminal (TTY); try `sevens-sim` for headless games. Version: {}",
            sevens_rs::VERSION
        );
        return Ok(());
    }
    let mut terminal = setup_terminal()?;
    let mut app = AppState::default();

    let res = controller::run(&mut terminal, &mut app, Duration::from_millis(100));

    // restore even when the loop failed
    restore_terminal(terminal)?;
    res
}
