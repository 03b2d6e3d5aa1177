//! Agents: pluggable players (bots, humans via a front end).
//!
//! An agent only ever sees its own hand and the runs on the table. The
//! `AgentTable` maps seats to agents and drives whichever seat is up.

use crate::cards::Card;
use crate::engine::GameEngine;
use crate::game::{GameEvent, MoveError, Seat, PLAYERS};
use crate::runs::Runs;
use core::fmt;
use std::time::{Duration, Instant};

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// Seat-level intents, typically produced by a UI for a human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Intent {
    Play(Card),
    Pass,
}

/// A seat controller that picks a move when it is its turn.
pub trait PlayerAgent {
    /// Choose an event for `seat` from its own `hand` and the current `runs`.
    ///
    /// Returns `None` when the agent is not ready to act yet (a human who has
    /// not chosen). A well-behaved agent passes only when nothing in `hand` is
    /// playable and otherwise plays one of the playable cards.
    fn decide(&mut self, seat: Seat, hand: &[Card], runs: &Runs) -> Option<GameEvent>;

    /// Called when `seat` may be the current actor. Returns whether an event
    /// was dispatched.
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: Seat) -> Result<bool, MoveError> {
        let event = {
            let state = engine.state();
            if state.is_over() || state.current_player() != seat {
                return Ok(false);
            }
            let Some(hand) = state.hand(seat) else {
                return Ok(false);
            };
            self.decide(seat, hand, state.runs())
        };
        match event {
            Some(ev) => engine.dispatch(ev).map(|_| true),
            None => Ok(false),
        }
    }

    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }

    /// Optionally receive a seat intent; default is to ignore and return false.
    fn receive(&mut self, _intent: Intent) -> bool {
        false
    }
}

mod bots;

pub use bots::{heuristic_scores, BotAgent, BotProfile, Strategy};

/// Executes user-chosen intents when it is their turn.
pub struct HumanAgent {
    pending: Option<Intent>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }

    fn receive(&mut self, intent: Intent) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(intent);
        true
    }

    fn decide(&mut self, seat: Seat, _hand: &[Card], _runs: &Runs) -> Option<GameEvent> {
        self.pending.take().map(|intent| match intent {
            Intent::Play(card) => GameEvent::play(seat, card),
            Intent::Pass => GameEvent::pass(seat),
        })
    }
}

/// One optional agent per seat; drives the agent whose turn it is.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    /// A table with four empty seats.
    pub fn new() -> Self {
        let mut seats = Vec::with_capacity(PLAYERS);
        seats.resize_with(PLAYERS, || None);
        Self { seats, min_action_delay: Duration::from_millis(0), next_action_at: None }
    }

    /// Bots on every seat, one profile each.
    pub fn with_bots(profiles: [BotProfile; PLAYERS]) -> Self {
        let mut table = Self::new();
        for (seat, profile) in profiles.into_iter().enumerate() {
            table.set_agent(seat, Some(Box::new(BotAgent::new(profile))));
        }
        table
    }

    /// Assign an agent to a seat (or remove when `None`). Out-of-range seats
    /// are ignored.
    pub fn set_agent(&mut self, seat: Seat, agent: Option<Box<dyn PlayerAgent>>) {
        if let Some(slot) = self.seats.get_mut(seat) {
            *slot = agent;
        }
    }

    pub fn agent_kind(&self, seat: Seat) -> Option<AgentKind> {
        self.seats.get(seat).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    /// Send an intent to a specific seat agent, if any.
    pub fn receive(&mut self, seat: Seat, intent: Intent) -> bool {
        if let Some(Some(agent)) = self.seats.get_mut(seat) {
            return agent.receive(intent);
        }
        false
    }

    pub fn has_agent(&self, seat: Seat) -> bool {
        self.seats.get(seat).map(|a| a.is_some()).unwrap_or(false)
    }

    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| matches!(ag.kind(), AgentKind::Bot))
    }

    /// Set a global minimum delay between bot actions at the table.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Drive the agent assigned to the current seat, if any.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<bool, MoveError> {
        let seat = engine.state().current_player();
        let Some(Some(agent)) = self.seats.get_mut(seat) else {
            return Ok(false);
        };
        let is_bot = matches!(agent.kind(), AgentKind::Bot);
        let now = Instant::now();
        if is_bot {
            if let Some(next) = self.next_action_at {
                if now < next {
                    return Ok(false);
                }
            }
        }
        let acted = agent.on_turn(engine, seat)?;
        if acted && self.min_action_delay > Duration::from_millis(0) {
            self.next_action_at = Some(now + self.min_action_delay);
        }
        Ok(acted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::engine::Table;
    use crate::game::GameState;
    use std::thread;

    fn opening_table() -> Table {
        let state = GameState::from_parts(
            0,
            [
                vec![Card::SEVEN_OF_HEARTS, Card::new(Suit::Clubs, Rank::Two)],
                vec![Card::new(Suit::Hearts, Rank::Eight), Card::new(Suit::Clubs, Rank::Three)],
                vec![Card::new(Suit::Clubs, Rank::Four)],
                vec![Card::new(Suit::Clubs, Rank::Five)],
            ],
            Runs::new(),
        );
        Table::new(state)
    }

    #[test]
    fn human_acts_only_with_pending_intent() {
        let mut t = opening_table();
        let mut human = HumanAgent::new();
        assert!(!human.on_turn(&mut t, 0).unwrap());
        assert!(human.receive(Intent::Play(Card::SEVEN_OF_HEARTS)));
        assert!(!human.receive(Intent::Pass), "one pending intent at a time");
        assert!(human.on_turn(&mut t, 0).unwrap());
        assert_eq!(t.state().current_player(), 1);
    }

    #[test]
    fn human_intent_error_surfaces() {
        let mut t = opening_table();
        let mut human = HumanAgent::new();
        human.receive(Intent::Pass);
        let err = human.on_turn(&mut t, 0).unwrap_err();
        assert!(matches!(err, MoveError::MustPlay { player: 0, .. }));
        assert_eq!(t.state().current_player(), 0);
    }

    #[test]
    fn delay_ms_throttles_bots() {
        let mut t = opening_table();
        let mut agents = AgentTable::with_bots(std::array::from_fn(|seat| {
            BotProfile::for_strategy(Strategy::Heuristic).with_seed(seat as u64)
        }));
        agents.set_min_action_delay_ms(15);

        assert!(agents.on_turn(&mut t).unwrap());
        assert_eq!(t.state().current_player(), 1);
        assert!(!agents.on_turn(&mut t).unwrap(), "second bot waits out the delay");

        thread::sleep(Duration::from_millis(20));
        assert!(agents.on_turn(&mut t).unwrap());
        assert_eq!(t.state().current_player(), 2);
    }

    #[test]
    fn empty_seat_is_noop() {
        let mut t = opening_table();
        let mut agents = AgentTable::new();
        assert!(!agents.on_turn(&mut t).unwrap());
        assert!(!agents.any_bots());
        assert_eq!(format!("{agents:?}"), "AgentTable(----)");
    }
}
