//! Headless game loop: ask the seat's agent for a move, dispatch it, repeat
//! until someone sheds their last card.

use crate::agents::{AgentTable, BotProfile};
use crate::engine::{GameEngine, Table};
use crate::game::{GameState, InitError, MoveError, Seat, PLAYERS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DriverError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Init(#[from] InitError),
    #[error("no winner after {turns} turns")]
    TurnLimit { turns: usize },
    #[error("no agent seated at P{}", .0 + 1)]
    NoAgent(Seat),
    #[error("agent at P{} did not act", .0 + 1)]
    Stalled(Seat),
}

/// Knobs for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct DriverConfig {
    /// Give up after this many events.
    pub max_turns: usize,
    /// Seed for dealing and for bot RNGs; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl DriverConfig {
    pub const DEFAULT_MAX_TURNS: usize = 1000;

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { max_turns: Self::DEFAULT_MAX_TURNS, seed: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameOutcome {
    pub winner: Seat,
    pub turns: usize,
    pub passes: usize,
    pub final_state: GameState,
}

/// Run the game on `table` to completion.
///
/// Every seat needs an agent that acts when asked; bots with a think delay
/// are not suited to this loop.
pub fn play_game(
    table: &mut Table,
    agents: &mut AgentTable,
    max_turns: usize,
) -> Result<GameOutcome, DriverError> {
    loop {
        if let Some(winner) = table.state().winner() {
            log::debug!("P{} wins after {} turns", winner + 1, table.history_len());
            return Ok(GameOutcome {
                winner,
                turns: table.history_len(),
                passes: table.passes(),
                final_state: table.state().clone(),
            });
        }
        if table.history_len() >= max_turns {
            return Err(DriverError::TurnLimit { turns: table.history_len() });
        }
        let seat = table.state().current_player();
        if !agents.has_agent(seat) {
            return Err(DriverError::NoAgent(seat));
        }
        if !agents.on_turn(table)? {
            return Err(DriverError::Stalled(seat));
        }
    }
}

/// Win counts over a batch of games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Tally {
    pub games: usize,
    pub wins: [usize; PLAYERS],
    pub turns: usize,
    pub passes: usize,
}

impl Tally {
    fn record(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        self.wins[outcome.winner] += 1;
        self.turns += outcome.turns;
        self.passes += outcome.passes;
    }

    pub fn win_rate(&self, seat: Seat) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins.get(seat).copied().unwrap_or(0) as f64 / self.games as f64
    }

    pub fn mean_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.turns as f64 / self.games as f64
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "games: {}  mean turns: {:.1}", self.games, self.mean_turns())?;
        for seat in 0..PLAYERS {
            let sep = if seat + 1 < PLAYERS { "\n" } else { "" };
            write!(
                f,
                "P{}: {:>6} wins ({:>5.1}%){sep}",
                seat + 1,
                self.wins[seat],
                self.win_rate(seat) * 100.0
            )?;
        }
        Ok(())
    }
}

/// Play `games` bot-only games and count who wins.
///
/// Each game's deal and bot seeds come from one master RNG, so a fixed
/// `config.seed` replays the whole batch.
pub fn play_many(
    games: usize,
    profiles: &[BotProfile; PLAYERS],
    config: DriverConfig,
) -> Result<Tally, DriverError> {
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut master = ChaCha8Rng::seed_from_u64(seed);
    let mut tally = Tally::default();
    for game in 0..games {
        let deal_seed: u64 = master.random();
        let mut table = Table::deal_seeded(deal_seed)?;
        let mut agents = AgentTable::with_bots(std::array::from_fn(|seat| {
            profiles[seat].clone().with_delay_ms(0, 0).with_seed(master.random())
        }));
        let outcome = play_game(&mut table, &mut agents, config.max_turns)?;
        log::debug!("game {game}: P{} won in {} turns", outcome.winner + 1, outcome.turns);
        tally.record(&outcome);
    }
    log::info!("{} games played, mean {:.1} turns", tally.games, tally.mean_turns());
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::Strategy;

    #[test]
    fn seeded_batches_replay() {
        let profiles = [
            BotProfile::for_strategy(Strategy::Random),
            BotProfile::for_strategy(Strategy::Heuristic),
            BotProfile::for_strategy(Strategy::Random),
            BotProfile::for_strategy(Strategy::Heuristic),
        ];
        let config = DriverConfig::default().with_seed(11);
        let a = play_many(8, &profiles, config).unwrap();
        let b = play_many(8, &profiles, config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.games, 8);
        assert_eq!(a.wins.iter().sum::<usize>(), 8);
    }

    #[test]
    fn missing_agent_is_an_error() {
        let mut table = Table::deal_seeded(5).unwrap();
        let mut agents = AgentTable::new();
        let seat = table.state().current_player();
        assert_eq!(play_game(&mut table, &mut agents, 100), Err(DriverError::NoAgent(seat)));
    }

    #[test]
    fn turn_limit_is_enforced() {
        let mut table = Table::deal_seeded(5).unwrap();
        let mut agents = AgentTable::with_bots(Default::default());
        assert_eq!(
            play_game(&mut table, &mut agents, 3),
            Err(DriverError::TurnLimit { turns: 3 })
        );
    }

    #[test]
    fn empty_tally_display() {
        let t = Tally::default();
        assert_eq!(t.win_rate(0), 0.0);
        assert!(t.to_string().starts_with("games: 0"));
    }
}
