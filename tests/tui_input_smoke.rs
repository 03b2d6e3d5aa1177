use sevens_rs::agents::AgentKind;
use sevens_rs::tui::app::{AppState, InputAction, Scene};

fn setup_table_app() -> AppState {
    let mut app = AppState::default();
    app.apply_menu();
    app
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = AppState::default();
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Table));
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn menu_can_seat_four_bots() {
    let mut app = AppState::default();
    // first item toggles the human seat
    let _ = app.handle_input(InputAction::MenuInc);
    let _ = app.handle_input(InputAction::MenuApply);
    assert_eq!(app.human_seat, None);
    for seat in 0..4 {
        assert_eq!(app.agents.agent_kind(seat), Some(AgentKind::Bot));
    }
    assert!(app.human_hand().is_empty());
}

#[test]
fn new_game_deals_and_seats_the_human() {
    let mut app = setup_table_app();
    assert!(!app.game_started);
    let _ = app.handle_input(InputAction::NewGame);
    assert!(app.game_started);
    assert!(app.last_seed.is_some());
    assert_eq!(app.human_hand().len(), 13);
    assert_eq!(app.agents.agent_kind(0), Some(AgentKind::Human));
}

#[test]
fn cursor_wraps_across_the_hand() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::NewGame);
    let n = app.human_hand().len();
    app.cursor = n - 1;
    let _ = app.handle_input(InputAction::CursorNext);
    assert_eq!(app.cursor, 0);
    let _ = app.handle_input(InputAction::CursorPrev);
    assert_eq!(app.cursor, n - 1);
}

#[test]
fn bot_strategy_cycles_on_the_table() {
    let mut app = setup_table_app();
    assert_eq!(app.bot_profile_label(0), None, "human seat has no bot label");
    assert_eq!(app.bot_profile_label(1), Some("Heuristic"));
    let _ = app.handle_input(InputAction::BotStrategyNext);
    assert_eq!(app.bot_profile_label(1), Some("Random"));
    assert!(app.menu_items_display().iter().any(|item| item == "Bot Strategy: Heuristic"));
}
