// Engine API boundary. `GameEngine` is what agents and front ends talk to: it
// exposes the current snapshot and a single dispatch entry point. `Table` is
// the in-process implementation holding the authoritative state.

use crate::game::{GameEvent, GameState, InitError, MoveError};
use core::fmt;

pub trait GameEngine {
    fn state(&self) -> &GameState;
    fn dispatch(&mut self, event: GameEvent) -> Result<(), MoveError>;
}

/// Callback run after every accepted event with the new state.
pub type Observer = Box<dyn FnMut(&GameState, &GameEvent)>;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HistoryEntry {
    /// Zero-based index of the event within the game.
    pub turn: usize,
    pub event: GameEvent,
}

/// Holds the current game and serializes every change through
/// [`GameState::apply_strict`].
pub struct Table {
    state: GameState,
    history: Vec<HistoryEntry>,
    observers: Vec<Observer>,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("state", &self.state)
            .field("history", &self.history.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Table {
    pub fn new(state: GameState) -> Self {
        Self { state, history: Vec::new(), observers: Vec::new() }
    }

    /// A table with a freshly dealt, seeded game.
    pub fn deal_seeded(seed: u64) -> Result<Self, InitError> {
        GameState::initialize_seeded(seed).map(Self::new)
    }

    /// Swap in a new game; history is cleared, observers are kept.
    pub fn reset(&mut self, state: GameState) {
        self.state = state;
        self.history.clear();
    }

    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_recent(&self, n: usize) -> Vec<HistoryEntry> {
        self.history_recent_offset(n, 0)
    }

    /// `n` entries ending `offset` entries before the newest one.
    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<HistoryEntry> {
        let len = self.history.len();
        if n == 0 || len == 0 {
            return Vec::new();
        }
        let max_offset = len.saturating_sub(n);
        let offset = offset.min(max_offset);
        let end = len.saturating_sub(offset);
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    pub fn passes(&self) -> usize {
        self.history.iter().filter(|h| h.event.is_pass()).count()
    }
}

impl GameEngine for Table {
    fn state(&self) -> &GameState {
        &self.state
    }

    fn dispatch(&mut self, event: GameEvent) -> Result<(), MoveError> {
        let next = match self.state.apply_strict(event) {
            Ok(next) => next,
            Err(err) => {
                log::warn!("rejected {event}: {err}");
                return Err(err);
            }
        };
        self.state = next;
        self.history.push(HistoryEntry { turn: self.history.len(), event });
        for observer in &mut self.observers {
            observer(&self.state, &event);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::runs::Runs;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn table() -> Table {
        Table::new(GameState::from_parts(
            0,
            [
                vec![Card::SEVEN_OF_HEARTS, Card::new(Suit::Clubs, Rank::King)],
                vec![Card::new(Suit::Clubs, Rank::Two)],
                vec![Card::new(Suit::Clubs, Rank::Three)],
                vec![Card::new(Suit::Clubs, Rank::Four)],
            ],
            Runs::new(),
        ))
    }

    #[test]
    fn observers_fire_once_per_accepted_event() {
        let mut t = table();
        let seen: Rc<RefCell<Vec<GameEvent>>> = Rc::default();
        let sink = Rc::clone(&seen);
        t.subscribe(Box::new(move |_, ev| sink.borrow_mut().push(*ev)));

        t.dispatch(GameEvent::play(0, Card::SEVEN_OF_HEARTS)).unwrap();
        assert!(t.dispatch(GameEvent::pass(0)).is_err());
        t.dispatch(GameEvent::pass(1)).unwrap();

        assert_eq!(*seen.borrow(), vec![GameEvent::play(0, Card::SEVEN_OF_HEARTS), GameEvent::pass(1)]);
        assert_eq!(t.history_len(), 2);
        assert_eq!(t.passes(), 1);
    }

    #[test]
    fn rejected_event_keeps_state() {
        let mut t = table();
        let before = t.state().clone();
        let err = t.dispatch(GameEvent::pass(0)).unwrap_err();
        assert!(matches!(err, MoveError::MustPlay { .. }));
        assert_eq!(t.state(), &before);
        assert!(t.history().is_empty());
    }

    #[test]
    fn history_paging() {
        let mut t = table();
        t.dispatch(GameEvent::play(0, Card::SEVEN_OF_HEARTS)).unwrap();
        t.dispatch(GameEvent::pass(1)).unwrap();
        t.dispatch(GameEvent::pass(2)).unwrap();
        let last_two = t.history_recent(2);
        assert_eq!(last_two[0].turn, 1);
        assert_eq!(last_two[1].turn, 2);
        let older = t.history_recent_offset(2, 1);
        assert_eq!(older[0].turn, 0);
        assert!(t.history_recent(0).is_empty());

        t.reset(GameState::initialize_seeded(1).unwrap());
        assert_eq!(t.history_len(), 0);
    }
}
