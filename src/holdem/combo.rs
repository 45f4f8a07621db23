use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::core::{Card, Deck, PokerError};

use super::{Hand, Shape};

static ALL_COMBOS: LazyLock<Vec<Combo>> = LazyLock::new(|| {
    let mut combos = Deck::new().combos();
    combos.sort_by(|a, b| b.cmp(a));
    combos
});

/// A specific two card holding, e.g. `A♠K♥`.
///
/// The higher card is always stored first so the same two cards
/// always make the same combo regardless of the order they were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Combo {
    first: Card,
    second: Card,
}

impl Combo {
    /// Create a combo from two distinct cards.
    ///
    /// ```
    /// use poker_range::core::Card;
    /// use poker_range::holdem::Combo;
    ///
    /// let kh: Card = "Kh".parse().unwrap();
    /// let as_: Card = "As".parse().unwrap();
    /// let combo = Combo::new(kh, as_).unwrap();
    /// assert_eq!(as_, combo.first());
    /// assert!(Combo::new(kh, kh).is_err());
    /// ```
    pub fn new(a: Card, b: Card) -> Result<Self, PokerError> {
        if a == b {
            return Err(PokerError::InvalidCombo(format!("{a}{b}")));
        }
        Ok(Self::ordered(a, b))
    }

    /// The cards must already be known to be distinct.
    pub(crate) fn ordered(a: Card, b: Card) -> Self {
        debug_assert!(a != b);
        Self {
            first: a.max(b),
            second: a.min(b),
        }
    }

    /// All 1326 two card combos, strongest first.
    pub fn all() -> &'static [Combo] {
        &ALL_COMBOS
    }

    /// The higher card.
    pub fn first(&self) -> Card {
        self.first
    }

    /// The lower card.
    pub fn second(&self) -> Card {
        self.second
    }

    pub fn is_pair(&self) -> bool {
        self.first.rank == self.second.rank
    }

    pub fn is_suited(&self) -> bool {
        self.first.suit == self.second.suit
    }

    pub fn is_offsuit(&self) -> bool {
        !self.is_pair() && !self.is_suited()
    }

    pub fn shape(&self) -> Shape {
        if self.is_pair() {
            Shape::Pair
        } else if self.is_suited() {
            Shape::Suited
        } else {
            Shape::Offsuit
        }
    }

    /// The starting hand this combo belongs to.
    pub fn to_hand(&self) -> Hand {
        match self.shape() {
            Shape::Pair => Hand::pair(self.first.rank),
            shape => Hand::non_pair(self.first.rank, self.second.rank, shape),
        }
    }
}

impl Ord for Combo {
    /// Pairs sort above non-pairs. Within the same ranks suited beats
    /// offsuit, then the suits of the first and second card decide.
    fn cmp(&self, other: &Self) -> Ordering {
        let key = |c: &Combo| {
            (
                c.is_pair(),
                c.first.rank,
                c.second.rank,
                c.is_suited(),
                c.first.suit,
                c.second.suit,
            )
        };
        key(self).cmp(&key(other))
    }
}

impl PartialOrd for Combo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Combo {
    type Err = PokerError;

    /// Parse four characters, two cards back to back: `AsKh`, `7♦7♣`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PokerError::InvalidCombo(s.to_string());
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 {
            return Err(invalid());
        }

        let a: Card = chars[..2]
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| invalid())?;
        let b: Card = chars[2..]
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| invalid())?;

        if a == b {
            return Err(invalid());
        }
        Ok(Self::ordered(a, b))
    }
}

impl TryFrom<&str> for Combo {
    type Error = PokerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Combo {
    type Error = PokerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Combo> for String {
    fn from(combo: Combo) -> Self {
        combo.to_string()
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rank, Suit};
    use std::collections::HashSet;

    fn combo(s: &str) -> Combo {
        s.parse().unwrap()
    }

    #[test]
    fn test_normalized() {
        let c = combo("KhAs");
        assert_eq!(Card::new(Rank::Ace, Suit::Spade), c.first());
        assert_eq!(Card::new(Rank::King, Suit::Heart), c.second());
        assert_eq!(combo("AsKh"), c);
        // Same rank, higher suit first
        assert_eq!(Suit::Spade, combo("5c5s").first().suit);
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "AsK", "AsKhQ", "AsAs", "5s5s", "AxKh", "1sKh", "AKs+"] {
            assert!(
                matches!(bad.parse::<Combo>(), Err(PokerError::InvalidCombo(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_parse_glyphs_and_case() {
        assert_eq!(combo("AsKh"), combo("A♠K♥"));
        assert_eq!(combo("AsKh"), combo("aSkH"));
    }

    #[test]
    fn test_display() {
        assert_eq!("A♠K♥", combo("KhAs").to_string());
        assert_eq!(combo("Td9d"), combo(&combo("Td9d").to_string()));
    }

    #[test]
    fn test_to_hand() {
        assert_eq!("AKo", combo("AsKh").to_hand().to_string());
        assert_eq!("AKs", combo("AdKd").to_hand().to_string());
        assert_eq!("77", combo("7c7h").to_hand().to_string());
        assert_eq!(Shape::Pair, combo("7c7h").shape());
        assert!(combo("AsKh").is_offsuit());
        assert!(!combo("7c7h").is_offsuit());
    }

    #[test]
    fn test_ordering() {
        // Pairs above non-pairs
        assert!(combo("2c2d") > combo("AsKs"));
        // Pairs by first card then second card
        assert!(combo("AsAh") > combo("AsAd"));
        assert!(combo("AsAc") > combo("AhAd"));
        // Ranks decide before shape
        assert!(combo("AcKd") > combo("AsQs"));
        // Suited beats offsuit on the same ranks
        assert!(combo("AcKc") > combo("AsKh"));
        // Then the first card's suit
        assert!(combo("AsKh") > combo("AhKs"));
    }

    #[test]
    fn test_first_card_is_higher() {
        for c in Combo::all() {
            assert!(c.first() > c.second());
        }
    }

    #[test]
    fn test_all_combos() {
        let all = Combo::all();
        assert_eq!(1326, all.len());
        let uniq: HashSet<_> = all.iter().collect();
        assert_eq!(1326, uniq.len());
        assert!(all.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(combo("AsAh"), all[0]);
        let hands: HashSet<_> = all.iter().map(|c| c.to_hand()).collect();
        assert_eq!(169, hands.len());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&combo("AsKh")).unwrap();
        assert_eq!("\"A♠K♥\"", json);
        assert_eq!(combo("AsKh"), serde_json::from_str::<Combo>(&json).unwrap());
        assert!(serde_json::from_str::<Combo>("\"AsAs\"").is_err());
    }
}
