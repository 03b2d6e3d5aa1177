use crate::cards::{Card, Rank, Suit};
use crate::game::{Hand, PLAYERS};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A standard 52-card deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in canonical order: hearts, diamonds, clubs, spades, each
    /// from Ace to King.
    ///
    /// ```
    /// use sevens_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(s, r)))
            .collect();
        Self { cards }
    }

    /// Wrap an explicit ordering, e.g. a replayed shuffle.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Uniform (Fisher-Yates) shuffle driven by the provided RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deal round-robin: card `i` goes to hand `i % 4`. Relative order is kept
    /// within each hand.
    pub fn deal(self) -> [Hand; PLAYERS] {
        let mut hands: [Hand; PLAYERS] = Default::default();
        for (i, card) in self.cards.into_iter().enumerate() {
            hands[i % PLAYERS].push(card);
        }
        hands
    }
}
