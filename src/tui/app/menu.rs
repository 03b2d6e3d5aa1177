use crate::agents::{AgentTable, BotAgent, BotProfile, HumanAgent, Strategy};
use crate::game::PLAYERS;

use super::AppState;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    HumanSeat,
    BotStrategy,
    BotDelayMs,
}

const MENU_ITEMS: [MenuItem; 3] = [MenuItem::HumanSeat, MenuItem::BotStrategy, MenuItem::BotDelayMs];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::HumanSeat => {
                let who = if app.cfg_human_player { "You (P1)" } else { "Bot" };
                format!("Seat P1: {who}")
            }
            MenuItem::BotStrategy => {
                format!("Bot Strategy: {}", app.cfg_bot_strategy.label())
            }
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", app.cfg_bot_delay_ms),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::HumanSeat => app.cfg_human_player = !app.cfg_human_player,
            MenuItem::BotStrategy => app.cfg_bot_strategy = app.cfg_bot_strategy.next(),
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(100);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::HumanSeat => app.cfg_human_player = !app.cfg_human_player,
            // two strategies, so stepping back is the same as stepping forward
            MenuItem::BotStrategy => app.cfg_bot_strategy = app.cfg_bot_strategy.next(),
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Table,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.cfg_human_player = self.human_seat.is_some();
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.cfg_bot_strategy = self.bot_default_strategy;
        self.scene = super::Scene::Menu;
    }

    pub fn apply_menu(&mut self) {
        self.human_seat = if self.cfg_human_player { Some(0) } else { None };
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        self.bot_default_strategy = self.cfg_bot_strategy;
        let default_profile =
            Self::default_bot_profile(self.bot_delay_ms, self.bot_default_strategy);
        self.bot_profiles = vec![default_profile; PLAYERS];
        self.rebuild_agents();
        self.game_started = false;
        self.scene = super::Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }

    pub(crate) fn default_bot_profile(delay_ms: u64, strategy: Strategy) -> BotProfile {
        BotProfile::for_strategy(strategy).with_delay_ms(delay_ms, delay_ms)
    }

    /// Seat a fresh human/bot lineup from the active settings.
    pub(crate) fn rebuild_agents(&mut self) {
        self.agents = AgentTable::new();
        self.agents.set_min_action_delay_ms(150);
        for seat in 0..PLAYERS {
            if self.human_seat == Some(seat) {
                self.agents.set_agent(seat, Some(Box::new(HumanAgent::new())));
                continue;
            }
            let profile = self.bot_profiles.get(seat).cloned().unwrap_or_else(|| {
                Self::default_bot_profile(self.bot_delay_ms, self.bot_default_strategy)
            });
            self.agents.set_agent(seat, Some(Box::new(BotAgent::new(profile))));
        }
    }
}
