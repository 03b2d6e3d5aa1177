use crate::cards::Card;
use crate::deck::Deck;
use crate::runs::{is_valid_play, valid_plays, Runs};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

/// Sevens is always played by exactly four players.
pub const PLAYERS: usize = 4;

/// Number of cards in play at any time.
pub const DECK_SIZE: usize = 52;

/// Player index in `0..PLAYERS`.
pub type Seat = usize;

/// A player's cards in dealt order.
pub type Hand = Vec<Card>;

/// Something a player does on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    PlayCard { player: Seat, card: Card },
    PassTurn { player: Seat },
}

impl GameEvent {
    pub fn play(player: Seat, card: Card) -> Self {
        GameEvent::PlayCard { player, card }
    }

    pub fn pass(player: Seat) -> Self {
        GameEvent::PassTurn { player }
    }

    /// The seat that issued the event.
    pub fn player(&self) -> Seat {
        match *self {
            GameEvent::PlayCard { player, .. } | GameEvent::PassTurn { player } => player,
        }
    }

    pub fn card(&self) -> Option<Card> {
        match *self {
            GameEvent::PlayCard { card, .. } => Some(card),
            GameEvent::PassTurn { .. } => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, GameEvent::PassTurn { .. })
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::PlayCard { player, card } => write!(f, "P{} plays {card}", player + 1),
            GameEvent::PassTurn { player } => write!(f, "P{} passes", player + 1),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MoveError {
    #[error("game is over: P{} already won", .winner + 1)]
    GameOver { winner: Seat },
    #[error("no such player: {0}")]
    NoSuchPlayer(Seat),
    #[error("not P{}'s turn: waiting on P{}", .got + 1, .expected + 1)]
    NotPlayersTurn { expected: Seat, got: Seat },
    #[error("P{} does not hold {card}", .player + 1)]
    CardNotInHand { player: Seat, card: Card },
    #[error("{0} cannot be played onto the current runs")]
    IllegalPlay(Card),
    #[error("P{} must play: {playable} legal card(s) in hand", .player + 1)]
    MustPlay { player: Seat, playable: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InitError {
    #[error("no hand holds the seven of hearts; the deal is corrupt")]
    MissingStartCard,
}

/// Snapshot of a game in progress.
///
/// States are never edited in place from outside: [`GameState::apply`] borrows
/// the current snapshot and returns the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) current_player: Seat,
    pub(crate) players: [Hand; PLAYERS],
    pub(crate) runs: Runs,
    pub(crate) winner: Option<Seat>,
}

impl GameState {
    /// Shuffle a fresh deck with `rng`, deal it, and hand the first turn to
    /// whoever holds the seven of hearts.
    pub fn initialize<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, InitError> {
        let mut deck = Deck::standard();
        deck.shuffle_with(rng);
        Self::from_deck(deck)
    }

    /// Like [`GameState::initialize`] with a reproducible shuffle.
    ///
    /// ```
    /// use sevens_rs::game::GameState;
    ///
    /// let a = GameState::initialize_seeded(7).unwrap();
    /// let b = GameState::initialize_seeded(7).unwrap();
    /// assert_eq!(a, b);
    /// assert!(a.runs().is_empty());
    /// ```
    pub fn initialize_seeded(seed: u64) -> Result<Self, InitError> {
        let mut deck = Deck::standard();
        deck.shuffle_seeded(seed);
        Self::from_deck(deck)
    }

    /// Deal `deck` as-is (no shuffle) and set up the opening turn.
    pub fn from_deck(deck: Deck) -> Result<Self, InitError> {
        let players = deck.deal();
        let current_player = players
            .iter()
            .position(|hand| hand.contains(&Card::SEVEN_OF_HEARTS))
            .ok_or(InitError::MissingStartCard)?;
        log::debug!("dealt {} hands; P{} holds 7h", PLAYERS, current_player + 1);
        Ok(Self { current_player, players, runs: Runs::new(), winner: None })
    }

    /// Build an arbitrary position. No invariant is checked, which makes this
    /// handy for setting up test scenarios and puzzles.
    pub fn from_parts(current_player: Seat, players: [Hand; PLAYERS], runs: Runs) -> Self {
        Self { current_player: current_player % PLAYERS, players, runs, winner: None }
    }

    pub fn current_player(&self) -> Seat {
        self.current_player
    }

    pub fn players(&self) -> &[Hand; PLAYERS] {
        &self.players
    }

    pub fn hand(&self, seat: Seat) -> Option<&[Card]> {
        self.players.get(seat).map(Vec::as_slice)
    }

    pub fn runs(&self) -> &Runs {
        &self.runs
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Seat that would act after the current one.
    pub fn next_player(&self) -> Seat {
        (self.current_player + 1) % PLAYERS
    }

    /// Seat holding `card`, if it is still in someone's hand.
    pub fn holder_of(&self, card: Card) -> Option<Seat> {
        self.players.iter().position(|hand| hand.contains(&card))
    }

    /// Legal plays for `seat` against the current runs.
    pub fn valid_plays_for(&self, seat: Seat) -> Vec<Card> {
        self.hand(seat).map(|hand| valid_plays(hand, &self.runs)).unwrap_or_default()
    }

    /// Cards in hands plus cards on the table.
    pub fn card_count(&self) -> usize {
        self.players.iter().map(Vec::len).sum::<usize>() + self.runs.card_count()
    }

    /// Whether hands and runs together hold every card exactly once.
    pub fn is_conserved(&self) -> bool {
        let mut seen: HashSet<Card> = HashSet::with_capacity(DECK_SIZE);
        let hands = self.players.iter().flatten();
        let table = self.runs.iter().flat_map(|(_, run)| run.as_slice());
        for &card in hands.chain(table) {
            if !seen.insert(card) {
                return false;
            }
        }
        seen.len() == DECK_SIZE
    }

    /// Apply `event` and return the next snapshot.
    ///
    /// Rejects events after the game is won, from a seat whose turn it is not,
    /// and plays of cards the player does not hold. Run adjacency is not
    /// checked here; see [`GameState::apply_strict`].
    pub fn apply(&self, event: GameEvent) -> Result<GameState, MoveError> {
        self.validate(event)?;
        Ok(self.transition(event))
    }

    /// [`GameState::apply`] plus the table rules: the card must extend a run
    /// (or be a 7), and passing is only allowed with no legal play in hand.
    pub fn apply_strict(&self, event: GameEvent) -> Result<GameState, MoveError> {
        self.validate(event)?;
        match event {
            GameEvent::PlayCard { card, .. } if !is_valid_play(card, &self.runs) => {
                return Err(MoveError::IllegalPlay(card));
            }
            GameEvent::PassTurn { player } => {
                let playable = self.valid_plays_for(player).len();
                if playable > 0 {
                    return Err(MoveError::MustPlay { player, playable });
                }
            }
            GameEvent::PlayCard { .. } => {}
        }
        Ok(self.transition(event))
    }

    fn validate(&self, event: GameEvent) -> Result<(), MoveError> {
        if let Some(winner) = self.winner {
            return Err(MoveError::GameOver { winner });
        }
        let player = event.player();
        if player >= PLAYERS {
            return Err(MoveError::NoSuchPlayer(player));
        }
        if player != self.current_player {
            return Err(MoveError::NotPlayersTurn { expected: self.current_player, got: player });
        }
        if let GameEvent::PlayCard { card, .. } = event {
            if !self.players[player].contains(&card) {
                return Err(MoveError::CardNotInHand { player, card });
            }
        }
        Ok(())
    }

    fn transition(&self, event: GameEvent) -> GameState {
        let mut next = self.clone();
        match event {
            GameEvent::PlayCard { player, card } => {
                let hand = &mut next.players[player];
                if let Some(idx) = hand.iter().position(|&c| c == card) {
                    hand.remove(idx);
                }
                next.runs.get_mut(card.suit()).insert(card);
                if next.players[player].is_empty() {
                    log::debug!("P{} played their last card and wins", player + 1);
                    next.winner = Some(player);
                }
            }
            GameEvent::PassTurn { .. } => {}
        }
        log::debug!("{event}");
        next.current_player = self.next_player();
        next
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Runs:")?;
        writeln!(f, "{}", self.runs)?;
        writeln!(f, "Hands:")?;
        for (seat, hand) in self.players.iter().enumerate() {
            let marker = if seat == self.current_player { '>' } else { ' ' };
            let cards: Vec<String> = hand.iter().map(|c| c.to_string()).collect();
            writeln!(f, "{marker} P{} ({:>2}): {}", seat + 1, hand.len(), cards.join(" "))?;
        }
        match self.winner {
            Some(w) => write!(f, "Winner: P{}", w + 1),
            None => write!(f, "Winner: --"),
        }
    }
}
