use std::fmt;
use std::str::FromStr;

/// Card ranks from Ace (low) to King (high).
///
/// Sevens plays aces low: a suit's run can stretch down to the Ace and up to
/// the King but never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Zero-based position in the rank order (Ace = 0, King = 12).
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Inverse of [`Rank::index`].
    pub fn from_index(index: usize) -> Option<Rank> {
        Self::ALL.get(index).copied()
    }

    /// The rank one step above, or `None` for the King.
    pub fn succ(self) -> Option<Rank> {
        Self::from_index(self.index() + 1)
    }

    /// The rank one step below, or `None` for the Ace.
    pub fn pred(self) -> Option<Rank> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let r = match upper.as_str() {
            "A" | "1" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            _ => return Err(RankParseError::Invalid(s.to_string())),
        };
        Ok(r)
    }
}

/// The four suits, in deck generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
            Suit::Spades => 's',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        match t.to_ascii_lowercase().as_str() {
            "hearts" => Ok(Suit::Hearts),
            "diamonds" => Ok(Suit::Diamonds),
            "clubs" => Ok(Suit::Clubs),
            "spades" => Ok(Suit::Spades),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'h' => Ok(Suit::Hearts),
            'd' => Ok(Suit::Diamonds),
            'c' => Ok(Suit::Clubs),
            's' => Ok(Suit::Spades),
            _ => Err(SuitParseError::Invalid(c.to_string())),
        }
    }
}

/// A playing card: suit + rank.
///
/// ```
/// use sevens_rs::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Suit::Hearts, Rank::Seven);
/// assert_eq!(card.to_string(), "7h");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    suit: Suit,
    rank: Rank,
}

impl Card {
    /// The card that opens the game.
    pub const SEVEN_OF_HEARTS: Card = Card::new(Suit::Hearts, Rank::Seven);

    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub fn is_seven(self) -> bool {
        self.rank == Rank::Seven
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        // suit is always the last char; everything before it is the rank
        let Some(suit_ch) = t.chars().last() else {
            return Err(CardParseError::Invalid(s.to_string()));
        };
        let rank_str = &t[..t.len() - suit_ch.len_utf8()];
        if rank_str.is_empty() {
            return Err(CardParseError::Invalid(s.to_string()));
        }
        let rank = Rank::from_str(rank_str)?;
        let suit = Suit::try_from(suit_ch)?;
        Ok(Card::new(suit, rank))
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use sevens_rs::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("7h, 8h 10s").unwrap();
/// assert_eq!(cards[0], Card::new(Suit::Hearts, Rank::Seven));
/// assert_eq!(cards[2], Card::new(Suit::Spades, Rank::Ten));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_display_and_from_str() {
        assert_eq!(Rank::Ten.to_string(), "10");
        assert_eq!(Rank::from_str("T").unwrap(), Rank::Ten);
        assert_eq!(Rank::from_str("a").unwrap(), Rank::Ace);
        assert!(Rank::from_str("0").is_err());
    }

    #[test]
    fn ranks_are_ace_low() {
        assert!(Rank::Ace < Rank::Two);
        assert!(Rank::Queen < Rank::King);
        assert_eq!(Rank::Ace.index(), 0);
        assert_eq!(Rank::Seven.index(), 6);
        assert_eq!(Rank::King.index(), 12);
    }

    #[test]
    fn succ_and_pred_stop_at_the_ends() {
        assert_eq!(Rank::Seven.succ(), Some(Rank::Eight));
        assert_eq!(Rank::Seven.pred(), Some(Rank::Six));
        assert_eq!(Rank::King.succ(), None);
        assert_eq!(Rank::Ace.pred(), None);
    }

    #[test]
    fn suit_display_and_from_str() {
        assert_eq!(Suit::Spades.to_string(), "s");
        assert_eq!(Suit::from_str("h").unwrap(), Suit::Hearts);
        assert_eq!(Suit::from_str("Diamonds").unwrap(), Suit::Diamonds);
        assert!(Suit::from_str("x").is_err());
    }

    #[test]
    fn card_display_and_from_str() {
        let ten = Card::new(Suit::Diamonds, Rank::Ten);
        assert_eq!(ten.to_string(), "10d");
        assert_eq!(Card::from_str("10d").unwrap(), ten);
        assert_eq!(Card::from_str("Td").unwrap(), ten);
        assert_eq!(Card::from_str("qs").unwrap(), Card::new(Suit::Spades, Rank::Queen));
        assert!(Card::from_str("h").is_err());
        assert!(Card::from_str("").is_err());
    }

    #[test]
    fn parse_many_cards() {
        let xs = parse_cards("7h, 6h 8c").unwrap();
        assert_eq!(xs.len(), 3);
        assert_eq!(xs[1], Card::new(Suit::Hearts, Rank::Six));
        assert_eq!(xs[2], Card::new(Suit::Clubs, Rank::Eight));
        assert!(parse_cards("7h zz").is_err());
    }
}
