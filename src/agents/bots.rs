use crate::cards::{Card, Rank};
use crate::engine::GameEngine;
use crate::game::{GameEvent, MoveError, Seat};
use crate::runs::{valid_plays, Runs};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::time::{Duration, Instant};

use super::{AgentKind, PlayerAgent};

/// Bot play styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Strategy {
    /// Uniform pick among legal plays.
    Random,
    /// Score each legal play and keep the best one.
    Heuristic,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Random, Strategy::Heuristic];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Random => "Random",
            Strategy::Heuristic => "Heuristic",
        }
    }

    /// Cycle to the next style (used by front ends).
    pub fn next(self) -> Self {
        match self {
            Strategy::Random => Strategy::Heuristic,
            Strategy::Heuristic => Strategy::Random,
        }
    }
}

/// Configuration for a bot's play style and pacing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct BotProfile {
    pub strategy: Strategy,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    pub fn for_strategy(strategy: Strategy) -> Self {
        Self { strategy, min_delay_ms: 0, max_delay_ms: 0, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Think for a random time in `min..=max` milliseconds before acting.
    pub fn with_delay_ms(mut self, min: u64, max: u64) -> Self {
        self.min_delay_ms = min;
        self.max_delay_ms = max;
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_strategy(Strategy::Heuristic)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

/// A bot seat driven by a [`BotProfile`].
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
    next_action_at: Option<Instant>,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state, next_action_at: None }
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn decide(&mut self, seat: Seat, hand: &[Card], runs: &Runs) -> Option<GameEvent> {
        let plays = valid_plays(hand, runs);
        let card = match (plays.as_slice(), self.profile.strategy) {
            ([], _) => return Some(GameEvent::pass(seat)),
            ([only], _) => *only,
            (_, Strategy::Random) => plays[self.state.rng.random_range(0..plays.len())],
            (_, Strategy::Heuristic) => best_by_heuristic(hand, &plays)?,
        };
        Some(GameEvent::play(seat, card))
    }

    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: Seat) -> Result<bool, MoveError> {
        let state = engine.state();
        if state.is_over() || state.current_player() != seat {
            return Ok(false);
        }
        let now = Instant::now();
        let delay = choose_delay_ms(&self.profile, &mut self.state);
        if delay > 0 {
            match self.next_action_at {
                None => {
                    self.next_action_at = Some(now + Duration::from_millis(delay));
                    return Ok(false);
                }
                Some(next) if now < next => {
                    return Ok(false);
                }
                Some(_) => {}
            }
        }
        self.next_action_at = None;

        let event = match state.hand(seat) {
            Some(hand) => self.decide(seat, hand, state.runs()),
            None => None,
        };
        match event {
            Some(ev) => engine.dispatch(ev).map(|_| true),
            None => Ok(false),
        }
    }
}

fn choose_delay_ms(profile: &BotProfile, state: &mut BotState) -> u64 {
    let min = profile.min_delay_ms;
    let max = profile.max_delay_ms.max(min);
    if max == min {
        min
    } else {
        state.rng.random_range(min..=max)
    }
}

/// Score every candidate play against the rest of `hand`.
///
/// Playing a card that still leaves the next card of the run stuck in our own
/// hand keeps opponents blocked, so it scores up; so does a card far from our
/// end card on that side of the 7. Playing our own extreme card of a suit
/// scores down.
pub fn heuristic_scores(hand: &[Card], plays: &[Card]) -> Vec<(Card, i32)> {
    plays.iter().map(|&card| (card, heuristic_score(hand, card))).collect()
}

fn best_by_heuristic(hand: &[Card], plays: &[Card]) -> Option<Card> {
    let mut best: Option<(Card, i32)> = None;
    for (card, score) in heuristic_scores(hand, plays) {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((card, score)),
        }
    }
    best.map(|(card, _)| card)
}

fn heuristic_score(hand: &[Card], card: Card) -> i32 {
    let mut suit_ranks: Vec<Rank> =
        hand.iter().filter(|c| c.suit() == card.suit()).map(|c| c.rank()).collect();
    suit_ranks.sort_unstable();
    let (Some(&lowest), Some(&highest)) = (suit_ranks.first(), suit_ranks.last()) else {
        return 0;
    };

    let mut score = 0;
    if card.rank() == highest {
        score -= 1;
    }
    if card.rank() == lowest {
        score -= 1;
    }
    score += holds_next_in_sequence(card, &suit_ranks);

    let end = if card.rank() < Rank::Seven { lowest } else { highest };
    score + (end.index() as i32 - card.rank().index() as i32).abs()
}

fn holds_next_in_sequence(card: Card, suit_ranks: &[Rank]) -> i32 {
    if matches!(card.rank(), Rank::Ace | Rank::King) {
        return 0;
    }
    let next = if card.rank() > Rank::Seven { card.rank().succ() } else { card.rank().pred() };
    match next {
        Some(r) if suit_ranks.contains(&r) => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn c(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn lone_seven_scores_below_connected_seven() {
        // 7c alone in clubs is both our highest and lowest club
        let hand = vec![
            c(Suit::Clubs, Rank::Seven),
            c(Suit::Spades, Rank::Seven),
            c(Suit::Spades, Rank::Six),
            c(Suit::Spades, Rank::Two),
        ];
        let plays = vec![c(Suit::Clubs, Rank::Seven), c(Suit::Spades, Rank::Seven)];
        let scores = heuristic_scores(&hand, &plays);
        assert_eq!(scores[0], (c(Suit::Clubs, Rank::Seven), -2));
        // 7s: highest spade (-1), holds 6s (+1), distance to highest is 0
        assert_eq!(scores[1], (c(Suit::Spades, Rank::Seven), 0));
        assert_eq!(best_by_heuristic(&hand, &plays), Some(c(Suit::Spades, Rank::Seven)));
    }

    #[test]
    fn distance_to_end_card_counts() {
        let hand = vec![c(Suit::Hearts, Rank::Eight), c(Suit::Hearts, Rank::Queen)];
        // 8h: lowest (-1), 9h not held, distance to Q = 4
        assert_eq!(heuristic_score(&hand, c(Suit::Hearts, Rank::Eight)), 3);
    }

    #[test]
    fn ties_keep_first_candidate() {
        let hand = vec![c(Suit::Clubs, Rank::Seven), c(Suit::Diamonds, Rank::Seven)];
        let plays = hand.clone();
        assert_eq!(best_by_heuristic(&hand, &plays), Some(c(Suit::Clubs, Rank::Seven)));
    }

    #[test]
    fn bot_passes_without_plays_and_plays_otherwise() {
        let runs = Runs::new();
        let stuck = vec![c(Suit::Clubs, Rank::Two)];
        for strategy in Strategy::ALL {
            let mut bot = BotAgent::new(BotProfile::for_strategy(strategy).with_seed(1));
            assert_eq!(bot.decide(3, &stuck, &runs), Some(GameEvent::pass(3)));
            let hand = vec![c(Suit::Clubs, Rank::Two), c(Suit::Hearts, Rank::Seven)];
            assert_eq!(
                bot.decide(3, &hand, &runs),
                Some(GameEvent::play(3, c(Suit::Hearts, Rank::Seven)))
            );
        }
    }

    #[test]
    fn seeded_random_bots_agree() {
        let hand: Vec<Card> = Suit::ALL.iter().map(|&s| c(s, Rank::Seven)).collect();
        let runs = Runs::new();
        let mut a = BotAgent::new(BotProfile::for_strategy(Strategy::Random).with_seed(99));
        let mut b = BotAgent::new(BotProfile::for_strategy(Strategy::Random).with_seed(99));
        for _ in 0..10 {
            assert_eq!(a.decide(0, &hand, &runs), b.decide(0, &hand, &runs));
        }
    }

    #[test]
    fn delay_range_is_respected() {
        let profile = BotProfile::for_strategy(Strategy::Random).with_delay_ms(5, 9);
        let mut state = BotState::new(Some(4));
        for _ in 0..20 {
            let d = choose_delay_ms(&profile, &mut state);
            assert!((5..=9).contains(&d));
        }
    }
}
