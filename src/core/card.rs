use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rand::Rng;

use super::PokerError;

/// Card rank.
/// The discriminant is the position in the sequence 2..A so the
/// derived ordering is the poker ordering.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Rank {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the ranks.
/// This is what `Rank::values()` returns
const RANKS: [Rank; 13] = [
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
    Rank::Ace,
];

impl Rank {
    /// Get all of the `Rank`'s that are possible, lowest first.
    ///
    /// ```
    /// use poker_range::core::Rank;
    ///
    /// assert_eq!(13, Rank::values().len());
    /// assert_eq!(Rank::Two, Rank::values()[0]);
    /// ```
    pub const fn values() -> [Rank; 13] {
        RANKS
    }

    /// Take a position (0 for Two, 12 for Ace) and convert it to a rank.
    pub fn from_u8(v: u8) -> Option<Rank> {
        RANKS.get(usize::from(v)).copied()
    }

    /// Parse a rank character. Letters are case-insensitive.
    ///
    /// ```
    /// use poker_range::core::Rank;
    ///
    /// assert_eq!(Some(Rank::Ten), Rank::from_char('t'));
    /// assert_eq!(None, Rank::from_char('1'));
    /// ```
    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            'A' => Some(Rank::Ace),
            'K' => Some(Rank::King),
            'Q' => Some(Rank::Queen),
            'J' => Some(Rank::Jack),
            'T' => Some(Rank::Ten),
            '9' => Some(Rank::Nine),
            '8' => Some(Rank::Eight),
            '7' => Some(Rank::Seven),
            '6' => Some(Rank::Six),
            '5' => Some(Rank::Five),
            '4' => Some(Rank::Four),
            '3' => Some(Rank::Three),
            '2' => Some(Rank::Two),
            _ => None,
        }
    }

    /// The canonical character for this rank.
    pub fn to_char(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::King => 'K',
            Rank::Queen => 'Q',
            Rank::Jack => 'J',
            Rank::Ten => 'T',
            Rank::Nine => '9',
            Rank::Eight => '8',
            Rank::Seven => '7',
            Rank::Six => '6',
            Rank::Five => '5',
            Rank::Four => '4',
            Rank::Three => '3',
            Rank::Two => '2',
        }
    }

    /// Absolute positional gap between two ranks, 0 through 12.
    ///
    /// ```
    /// use poker_range::core::Rank;
    ///
    /// assert_eq!(12, Rank::difference(Rank::Two, Rank::Ace));
    /// assert_eq!(1, Rank::difference(Rank::King, Rank::Queen));
    /// ```
    pub fn difference(a: Rank, b: Rank) -> u8 {
        u8::from(a).abs_diff(u8::from(b))
    }

    /// The next higher rank, if any.
    pub fn next(self) -> Option<Rank> {
        Rank::from_u8(u8::from(self) + 1)
    }

    /// The next lower rank, if any.
    pub fn prev(self) -> Option<Rank> {
        u8::from(self).checked_sub(1).and_then(Rank::from_u8)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank as u8
    }
}

impl TryFrom<char> for Rank {
    type Error = PokerError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Rank::from_char(c).ok_or(PokerError::InvalidSymbol(c))
    }
}

impl FromStr for Rank {
    type Err = PokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::try_from(c),
            (Some(c), Some(_)) => Err(PokerError::InvalidSymbol(c)),
            (None, _) => Err(PokerError::InvalidSymbol(' ')),
        }
    }
}

impl TryFrom<String> for Rank {
    type Error = PokerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> Self {
        rank.to_string()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Enum for the four different suits.
/// Ordered clubs < diamonds < hearts < spades so that
/// cards of the same rank are comparable.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Suit {
    /// Clubs
    Club = 0,
    /// Diamonds
    Diamond = 1,
    /// Hearts
    Heart = 2,
    /// Spades
    Spade = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

impl Suit {
    /// Provide all the Suit's that there are, lowest first.
    pub const fn suits() -> [Suit; 4] {
        SUITS
    }

    /// Parse a suit from an ASCII letter (either case) or one of the
    /// four unicode suit symbols.
    ///
    /// ```
    /// use poker_range::core::Suit;
    ///
    /// assert_eq!(Some(Suit::Spade), Suit::from_char('S'));
    /// assert_eq!(Some(Suit::Heart), Suit::from_char('♥'));
    /// assert_eq!(None, Suit::from_char('x'));
    /// ```
    pub fn from_char(c: char) -> Option<Suit> {
        match c {
            'c' | 'C' | '♣' => Some(Suit::Club),
            'd' | 'D' | '♦' => Some(Suit::Diamond),
            'h' | 'H' | '♥' => Some(Suit::Heart),
            's' | 'S' | '♠' => Some(Suit::Spade),
            _ => None,
        }
    }

    /// The lowercase ASCII letter for this suit.
    pub fn to_char(self) -> char {
        match self {
            Suit::Club => 'c',
            Suit::Diamond => 'd',
            Suit::Heart => 'h',
            Suit::Spade => 's',
        }
    }

    /// The unicode glyph for this suit. This is what `Display` writes.
    pub fn glyph(self) -> char {
        match self {
            Suit::Club => '♣',
            Suit::Diamond => '♦',
            Suit::Heart => '♥',
            Suit::Spade => '♠',
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = PokerError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Suit::from_char(c).ok_or(PokerError::InvalidSymbol(c))
    }
}

impl FromStr for Suit {
    type Err = PokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Suit::try_from(c),
            (Some(c), Some(_)) => Err(PokerError::InvalidSymbol(c)),
            (None, _) => Err(PokerError::InvalidSymbol(' ')),
        }
    }
}

impl TryFrom<String> for Suit {
    type Error = PokerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Suit> for String {
    fn from(suit: Suit) -> Self {
        suit.to_string()
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// The interned 52 card catalogue in ascending order.
static ALL_CARDS: LazyLock<Vec<Card>> = LazyLock::new(|| {
    Rank::values()
        .into_iter()
        .flat_map(|rank| Suit::suits().into_iter().map(move |suit| Card::new(rank, suit)))
        .collect()
});

/// The main struct of this library.
/// This is a carrier for Suit and Rank combined.
///
/// Field order matters: the derived ordering compares the rank
/// first and breaks ties on the suit.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Card {
    /// The face rank of this card.
    pub rank: Rank,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Every card in the deck, lowest first.
    pub fn all() -> &'static [Card] {
        &ALL_CARDS
    }

    /// Pick a uniformly random card using the given rng.
    ///
    /// ```
    /// use poker_range::core::Card;
    /// use rand::{SeedableRng, rngs::StdRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let card = Card::random(&mut rng);
    /// assert!(Card::all().contains(&card));
    /// ```
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let idx = rng.random_range(0..ALL_CARDS.len());
        ALL_CARDS[idx]
    }

    /// Pick a uniformly random card with the thread local rng.
    pub fn make_random() -> Self {
        Self::random(&mut rand::rng())
    }
}

impl FromStr for Card {
    type Err = PokerError;

    /// Parse a two character card like `As`, `td` or `K♥`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => {
                let rank = Rank::from_char(r).ok_or_else(|| PokerError::InvalidCard(s.into()))?;
                let suit = Suit::from_char(su).ok_or_else(|| PokerError::InvalidCard(s.into()))?;
                Ok(Card::new(rank, suit))
            }
            _ => Err(PokerError::InvalidCard(s.into())),
        }
    }
}

impl TryFrom<&str> for Card {
    type Error = PokerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Card {
    type Error = PokerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;
    use std::mem;

    #[test]
    fn test_constructor() {
        let c = Card::new(Rank::Three, Suit::Spade);
        assert_eq!(Suit::Spade, c.suit);
        assert_eq!(Rank::Three, c.rank);
    }

    #[test]
    fn test_compare() {
        let c1 = Card::new(Rank::Three, Suit::Spade);
        let c2 = Card::new(Rank::Four, Suit::Club);
        let c3 = Card::new(Rank::Four, Suit::Spade);

        assert!(c1 == c1);
        // Rank wins over suit
        assert!(c1 < c2);
        assert!(c2 > c1);
        // Suit breaks the tie
        assert!(c3 > c2);
    }

    #[test]
    fn test_rank_cmp() {
        assert!(Rank::Two < Rank::Ace);
        assert!(Rank::King < Rank::Ace);
        assert!(Rank::Nine < Rank::Ten);
        assert_eq!(Rank::Two, Rank::Two);
    }

    #[test]
    fn test_suit_cmp() {
        assert!(Suit::Club < Suit::Diamond);
        assert!(Suit::Diamond < Suit::Heart);
        assert!(Suit::Heart < Suit::Spade);
    }

    #[test]
    fn test_rank_from_u8() {
        assert_eq!(Some(Rank::Two), Rank::from_u8(0));
        assert_eq!(Some(Rank::Ace), Rank::from_u8(12));
        assert_eq!(None, Rank::from_u8(13));
    }

    #[test]
    fn test_rank_chars_round_trip() {
        for rank in Rank::values() {
            assert_eq!(Some(rank), Rank::from_char(rank.to_char()));
            assert_eq!(
                Some(rank),
                Rank::from_char(rank.to_char().to_ascii_lowercase())
            );
        }
    }

    #[test]
    fn test_rank_difference() {
        assert_eq!(0, Rank::difference(Rank::Five, Rank::Five));
        assert_eq!(3, Rank::difference(Rank::Five, Rank::Eight));
        assert_eq!(3, Rank::difference(Rank::Eight, Rank::Five));
        assert_eq!(12, Rank::difference(Rank::Ace, Rank::Two));
    }

    #[test]
    fn test_rank_next_prev() {
        assert_eq!(Some(Rank::Three), Rank::Two.next());
        assert_eq!(None, Rank::Ace.next());
        assert_eq!(Some(Rank::King), Rank::Ace.prev());
        assert_eq!(None, Rank::Two.prev());
    }

    #[test]
    fn test_rank_parse_errors() {
        assert!(matches!("1".parse::<Rank>(), Err(PokerError::InvalidSymbol('1'))));
        assert!(matches!("AK".parse::<Rank>(), Err(PokerError::InvalidSymbol('A'))));
        assert!("".parse::<Rank>().is_err());
        assert!(matches!(Rank::try_from('X'), Err(PokerError::InvalidSymbol('X'))));
    }

    #[test]
    fn test_suit_aliases() {
        assert_eq!(Suit::Club, "c".parse::<Suit>().unwrap());
        assert_eq!(Suit::Club, "C".parse::<Suit>().unwrap());
        assert_eq!(Suit::Club, "♣".parse::<Suit>().unwrap());
        assert_eq!(Suit::Diamond, "♦".parse::<Suit>().unwrap());
        assert_eq!(Suit::Heart, "H".parse::<Suit>().unwrap());
        assert_eq!(Suit::Spade, "♠".parse::<Suit>().unwrap());
        assert!(matches!("x".parse::<Suit>(), Err(PokerError::InvalidSymbol('x'))));
    }

    #[test]
    fn test_display() {
        assert_eq!("♠", Suit::Spade.to_string());
        assert_eq!("A♠", Card::new(Rank::Ace, Suit::Spade).to_string());
        assert_eq!("T♦", Card::new(Rank::Ten, Suit::Diamond).to_string());
    }

    #[test]
    fn test_card_parse() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spade), "As".parse().unwrap());
        assert_eq!(Card::new(Rank::Ten, Suit::Heart), "th".parse().unwrap());
        assert_eq!(Card::new(Rank::King, Suit::Club), "K♣".parse().unwrap());
    }

    #[test]
    fn test_card_parse_errors() {
        assert!(matches!("A".parse::<Card>(), Err(PokerError::InvalidCard(_))));
        assert!(matches!("Asd".parse::<Card>(), Err(PokerError::InvalidCard(_))));
        assert!(matches!("Ax".parse::<Card>(), Err(PokerError::InvalidCard(_))));
        assert!(matches!("1s".parse::<Card>(), Err(PokerError::InvalidCard(_))));
    }

    #[test]
    fn test_display_parses_back() {
        for card in Card::all() {
            assert_eq!(*card, card.to_string().parse::<Card>().unwrap());
        }
    }

    #[test]
    fn test_all_cards() {
        let cards = Card::all();
        assert_eq!(52, cards.len());
        assert!(cards.windows(2).all(|w| w[0] < w[1]));
        let uniq: HashSet<_> = cards.iter().collect();
        assert_eq!(52, uniq.len());
    }

    #[test]
    fn test_random_is_seeded() {
        let mut rng_one = StdRng::seed_from_u64(420);
        let mut rng_two = StdRng::seed_from_u64(420);
        for _ in 0..10 {
            assert_eq!(Card::random(&mut rng_one), Card::random(&mut rng_two));
        }
        let _ = Card::make_random();
    }

    #[test]
    fn test_size() {
        // Card should be really small. Hopefully just two u8's
        assert!(mem::size_of::<Card>() <= 4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_strings() {
        let card = Card::new(Rank::Queen, Suit::Diamond);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!("\"Q♦\"", json);
        assert_eq!(card, serde_json::from_str::<Card>("\"Qd\"").unwrap());
        assert!(serde_json::from_str::<Card>("\"Qx\"").is_err());
        assert_eq!("\"T\"", serde_json::to_string(&Rank::Ten).unwrap());
        assert_eq!(Suit::Spade, serde_json::from_str::<Suit>("\"s\"").unwrap());
    }
}
