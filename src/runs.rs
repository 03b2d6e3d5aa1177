//! Per-suit runs on the table and the legality rules that extend them.
//!
//! A run starts with its suit's 7 and grows one card at a time at either
//! end, so a run built from legal plays is always one contiguous rank
//! interval containing the 7.

use crate::cards::{Card, Rank, Suit};
use std::fmt;

/// Cards played in one suit, sorted by rank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Run {
    cards: Vec<Card>,
}

impl Run {
    pub fn new() -> Self {
        Self::default()
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

    pub fn low(&self) -> Option<Rank> {
        self.cards.first().map(|c| c.rank())
    }

    pub fn high(&self) -> Option<Rank> {
        self.cards.last().map(|c| c.rank())
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// True when the run is empty or forms one gap-free interval holding the 7.
    pub fn is_contiguous(&self) -> bool {
        if self.cards.is_empty() {
            return true;
        }
        let has_seven = self.cards.iter().any(|c| c.is_seven());
        has_seven && self.cards.windows(2).all(|w| w[0].rank().index() + 1 == w[1].rank().index())
    }

    /// Place `card` on the run: sevens and first cards seed it, lower cards go
    /// to the front, anything else to the back. The run is re-sorted
    /// afterwards so out-of-order input still leaves it ordered.
    pub(crate) fn insert(&mut self, card: Card) {
        match self.low() {
            Some(low) if !card.is_seven() && card.rank() < low => self.cards.insert(0, card),
            _ => self.cards.push(card),
        }
        self.cards.sort_by_key(|c| c.rank());
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cards.is_empty() {
            return f.write_str("--");
        }
        let parts: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        f.write_str(&parts.join(" "))
    }
}

/// Runs for all four suits. A suit nobody has opened is an empty run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Runs {
    by_suit: [Run; 4],
}

impl Runs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, suit: Suit) -> &Run {
        &self.by_suit[suit.index()]
    }

    pub(crate) fn get_mut(&mut self, suit: Suit) -> &mut Run {
        &mut self.by_suit[suit.index()]
    }

    /// Build runs from explicit card lists, one entry per suit. Cards are
    /// sorted into place; nothing else is checked.
    pub fn from_cards<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        let mut runs = Self::new();
        for card in cards {
            runs.get_mut(card.suit()).insert(card);
        }
        runs
    }

    pub fn iter(&self) -> impl Iterator<Item = (Suit, &Run)> {
        Suit::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Total number of cards on the table.
    pub fn card_count(&self) -> usize {
        self.by_suit.iter().map(Run::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_suit.iter().all(Run::is_empty)
    }

    pub fn contains(&self, card: Card) -> bool {
        self.get(card.suit()).contains(card)
    }
}

impl fmt::Display for Runs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (suit, run)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<9}{}", format!("{}:", suit.name()), run)?;
        }
        Ok(())
    }
}

/// Whether `card` may be played onto `runs`.
///
/// A 7 is always playable. Any other card needs its suit's run to be open and
/// must sit exactly one rank below its lowest card or one above its highest.
///
/// ```
/// use sevens_rs::cards::{Card, Rank, Suit};
/// use sevens_rs::runs::{is_valid_play, Runs};
///
/// let runs = Runs::from_cards([Card::new(Suit::Hearts, Rank::Seven)]);
/// assert!(is_valid_play(Card::new(Suit::Hearts, Rank::Eight), &runs));
/// assert!(!is_valid_play(Card::new(Suit::Spades, Rank::Eight), &runs));
/// ```
pub fn is_valid_play(card: Card, runs: &Runs) -> bool {
    if card.is_seven() {
        return true;
    }
    let run = runs.get(card.suit());
    let (Some(low), Some(high)) = (run.low(), run.high()) else {
        return false;
    };
    let idx = card.rank().index();
    idx + 1 == low.index() || idx == high.index() + 1
}

/// The cards of `hand` playable against the current `runs`, in hand order.
///
/// Each card is judged against the same snapshot; playing one card never
/// makes another card from the same hand legal here.
pub fn valid_plays(hand: &[Card], runs: &Runs) -> Vec<Card> {
    hand.iter().copied().filter(|&c| is_valid_play(c, runs)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    fn sample_runs() -> Runs {
        Runs::from_cards([
            c(Suit::Hearts, Rank::Six),
            c(Suit::Hearts, Rank::Seven),
            c(Suit::Hearts, Rank::Eight),
            c(Suit::Spades, Rank::Seven),
            c(Suit::Spades, Rank::Eight),
            c(Suit::Spades, Rank::Nine),
            c(Suit::Diamonds, Rank::Seven),
        ])
    }

    #[test]
    fn legality_matches_reference_table() {
        let runs = sample_runs();
        let legal = [
            c(Suit::Hearts, Rank::Five),
            c(Suit::Hearts, Rank::Nine),
            c(Suit::Spades, Rank::Six),
            c(Suit::Spades, Rank::Ten),
            c(Suit::Diamonds, Rank::Six),
            c(Suit::Diamonds, Rank::Eight),
            c(Suit::Clubs, Rank::Seven),
        ];
        let illegal =
            [c(Suit::Hearts, Rank::Four), c(Suit::Hearts, Rank::Ten), c(Suit::Clubs, Rank::Eight)];
        for card in legal {
            assert!(is_valid_play(card, &runs), "{card} should be playable");
        }
        for card in illegal {
            assert!(!is_valid_play(card, &runs), "{card} should not be playable");
        }
    }

    #[test]
    fn valid_plays_keeps_hand_order() {
        let runs = sample_runs();
        let hand = vec![
            c(Suit::Clubs, Rank::Seven),
            c(Suit::Hearts, Rank::King),
            c(Suit::Hearts, Rank::Five),
            c(Suit::Spades, Rank::Ten),
        ];
        assert_eq!(
            valid_plays(&hand, &runs),
            vec![c(Suit::Clubs, Rank::Seven), c(Suit::Hearts, Rank::Five), c(Suit::Spades, Rank::Ten)]
        );
    }

    #[test]
    fn valid_plays_judges_against_snapshot() {
        // 8h only becomes playable once 7h is down, which this query never does
        let hand = vec![c(Suit::Hearts, Rank::Seven), c(Suit::Hearts, Rank::Eight)];
        assert_eq!(valid_plays(&hand, &Runs::new()), vec![c(Suit::Hearts, Rank::Seven)]);
    }

    #[test]
    fn insert_keeps_run_sorted() {
        let mut run = Run::new();
        run.insert(c(Suit::Hearts, Rank::Seven));
        run.insert(c(Suit::Hearts, Rank::Six));
        run.insert(c(Suit::Hearts, Rank::Eight));
        run.insert(c(Suit::Hearts, Rank::Five));
        let ranks: Vec<Rank> = run.as_slice().iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Rank::Five, Rank::Six, Rank::Seven, Rank::Eight]);
        assert!(run.is_contiguous());
    }

    #[test]
    fn contiguity_detects_gaps_and_missing_seven() {
        let gap = Runs::from_cards([c(Suit::Clubs, Rank::Seven), c(Suit::Clubs, Rank::Nine)]);
        assert!(!gap.get(Suit::Clubs).is_contiguous());
        let no_seven = Runs::from_cards([c(Suit::Clubs, Rank::Eight), c(Suit::Clubs, Rank::Nine)]);
        assert!(!no_seven.get(Suit::Clubs).is_contiguous());
        assert!(Run::new().is_contiguous());
    }

    #[test]
    fn runs_count_and_display() {
        let runs = sample_runs();
        assert_eq!(runs.card_count(), 7);
        assert!(runs.contains(c(Suit::Diamonds, Rank::Seven)));
        let text = runs.to_string();
        assert!(text.contains("hearts:  6h 7h 8h"));
        assert!(text.contains("clubs:   --"));
    }
}
