use crate::agents::{AgentKind, AgentTable, BotAgent, BotProfile, Intent, Strategy};
use crate::cards::Card;
use crate::engine::{GameEngine, Table};
use crate::game::{GameState, Seat, PLAYERS};
use crate::runs::{is_valid_play, Runs};
use rand::Rng;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewGame,
    CursorNext,
    CursorPrev,
    PlaySelected,
    Pass,
    BotStrategyNext,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    // Authoritative game plus history
    pub table: Table,
    pub agents: AgentTable,
    // Index into the human's hand
    pub cursor: usize,
    pub human_seat: Option<Seat>,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_human_player: bool,
    pub cfg_bot_strategy: Strategy,
    pub cfg_bot_delay_ms: u64,
    pub bot_delay_ms: u64,
    pub bot_default_strategy: Strategy,
    pub game_started: bool,
    pub last_seed: Option<u64>,
    pub(crate) bot_profiles: Vec<BotProfile>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        // Empty hands until the first deal.
        let placeholder = GameState::from_parts(0, Default::default(), Runs::new());
        let default_delay = 500;
        let default_strategy = Strategy::Heuristic;
        let default_profile = Self::default_bot_profile(default_delay, default_strategy);
        Self {
            scene: Scene::Menu,
            table: Table::new(placeholder),
            agents: AgentTable::new(),
            cursor: 0,
            human_seat: Some(0),
            menu_index: 0,
            cfg_human_player: true,
            cfg_bot_strategy: default_strategy,
            cfg_bot_delay_ms: default_delay,
            bot_delay_ms: default_delay,
            bot_default_strategy: default_strategy,
            game_started: false,
            last_seed: None,
            bot_profiles: vec![default_profile; PLAYERS],
            help_open: false,
            history_open: false,
            history_offset: 0,
            action_error: None,
            action_error_at: None,
        }
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    pub fn state(&self) -> &GameState {
        self.table.state()
    }

    /// The human player's cards, empty when every seat is a bot.
    pub fn human_hand(&self) -> &[Card] {
        self.human_seat.and_then(|seat| self.state().hand(seat)).unwrap_or(&[])
    }

    pub fn selected_card(&self) -> Option<Card> {
        self.human_hand().get(self.cursor).copied()
    }

    /// Whether the card under the cursor can go down right now.
    pub fn selected_is_playable(&self) -> bool {
        self.selected_card().map(|c| is_valid_play(c, self.state().runs())).unwrap_or(false)
    }

    fn can_act(&self) -> bool {
        if self.scene != Scene::Table || !self.game_started {
            return false;
        }
        if self.state().is_over() {
            return false;
        }
        self.human_seat == Some(self.state().current_player())
    }

    fn queue_intent(&mut self, intent: Intent) -> bool {
        let Some(seat) = self.human_seat else {
            return false;
        };
        if !self.can_act() {
            return false;
        }
        self.clear_action_error();
        self.agents.receive(seat, intent)
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub fn bot_profile_label(&self, seat: Seat) -> Option<&'static str> {
        if !matches!(self.agents.agent_kind(seat), Some(AgentKind::Bot)) {
            return None;
        }
        let strategy =
            self.bot_profiles.get(seat).map(|p| p.strategy).unwrap_or(self.bot_default_strategy);
        Some(strategy.label())
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.table.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewGame => {
                if self.scene == Scene::Table {
                    self.new_game();
                }
                false
            }
            InputAction::CursorNext => {
                self.cursor_step(1);
                false
            }
            InputAction::CursorPrev => {
                self.cursor_step(-1);
                false
            }
            InputAction::PlaySelected => match self.selected_card() {
                Some(card) => self.queue_intent(Intent::Play(card)),
                None => false,
            },
            InputAction::Pass => self.queue_intent(Intent::Pass),
            InputAction::BotStrategyNext => {
                if self.scene == Scene::Table {
                    self.cycle_bot_strategy();
                }
                false
            }
        }
    }

    /// Deal a new game unless one is still running.
    pub fn new_game(&mut self) {
        if self.game_started && !self.state().is_over() {
            return;
        }
        let seed: u64 = rand::rng().random();
        match GameState::initialize_seeded(seed) {
            Ok(state) => {
                self.table.reset(state);
                self.last_seed = Some(seed);
                self.rebuild_agents();
                self.game_started = true;
                self.cursor = 0;
                self.history_offset = 0;
                self.clear_action_error();
            }
            Err(err) => self.set_action_error(err.to_string()),
        }
    }

    fn cursor_step(&mut self, delta: isize) {
        let n = self.human_hand().len();
        if self.scene != Scene::Table || n == 0 {
            return;
        }
        let n = n as isize;
        self.cursor = ((self.cursor as isize + delta).rem_euclid(n)) as usize;
    }

    fn clamp_cursor(&mut self) {
        let n = self.human_hand().len();
        if self.cursor >= n {
            self.cursor = n.saturating_sub(1);
        }
    }

    /// Switch every bot seat to the next strategy.
    pub fn cycle_bot_strategy(&mut self) {
        let next_strategy = self.bot_default_strategy.next();
        self.bot_default_strategy = next_strategy;
        for seat in 0..PLAYERS {
            if !matches!(self.agents.agent_kind(seat), Some(AgentKind::Bot)) {
                continue;
            }
            let next = Self::default_bot_profile(self.bot_delay_ms, next_strategy);
            if let Some(slot) = self.bot_profiles.get_mut(seat) {
                *slot = next.clone();
            }
            self.agents.set_agent(seat, Some(Box::new(BotAgent::new(next))));
        }
    }

    fn set_action_error(&mut self, message: String) {
        self.action_error = Some(message);
        self.action_error_at = Some(Instant::now());
    }

    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table || !self.game_started {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        match self.agents.on_turn(&mut self.table) {
            Ok(true) => {
                self.clear_action_error();
                self.clamp_cursor();
            }
            Ok(false) => {}
            Err(err) => self.set_action_error(err.to_string()),
        }
    }
}
