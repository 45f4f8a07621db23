use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::core::{Card, PokerError, Rank, Suit};

use super::Combo;

/// How the two cards of a `Hand` relate to each other.
///
/// The derived order is `Offsuit < Suited < Pair`, which is the
/// tie-break the hand ordering wants.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Shape {
    /// Two different ranks of different suits.
    Offsuit,
    /// Two different ranks of the same suit.
    Suited,
    /// Both cards have the same rank.
    Pair,
}

impl Shape {
    /// How many combos a hand of this shape covers.
    pub fn combo_count(self) -> usize {
        match self {
            Shape::Pair => 6,
            Shape::Suited => 4,
            Shape::Offsuit => 12,
        }
    }

    /// The trailing character in hand notation, if any.
    pub fn to_char(self) -> Option<char> {
        match self {
            Shape::Pair => None,
            Shape::Suited => Some('s'),
            Shape::Offsuit => Some('o'),
        }
    }
}

/// Enum to represent which shapes a range token asks for.
/// `Suitedness::Suited` will mean that all cards have the same suit
/// `Suitedness::OffSuit` will mean that all cards have the different suit
/// `Suitedness::Any` makes no promises.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Suitedness {
    /// All of the cards are the same suit
    Suited,
    /// None of the cards are the same suit
    OffSuit,
    /// No promises about suit.
    Any,
}

impl Suitedness {
    /// The non-pair shapes this covers, suited first.
    pub fn shapes(self) -> &'static [Shape] {
        match self {
            Suitedness::Suited => &[Shape::Suited],
            Suitedness::OffSuit => &[Shape::Offsuit],
            Suitedness::Any => &[Shape::Suited, Shape::Offsuit],
        }
    }

    /// Parse the optional `s`/`o` marker. Case-insensitive.
    pub fn from_char(c: char) -> Option<Suitedness> {
        match c {
            's' | 'S' => Some(Suitedness::Suited),
            'o' | 'O' => Some(Suitedness::OffSuit),
            _ => None,
        }
    }
}

static ALL_HANDS: LazyLock<Vec<Hand>> = LazyLock::new(|| {
    let mut hands = Vec::with_capacity(169);
    let values = Rank::values();
    for (i, first) in values.iter().enumerate() {
        for second in &values[..=i] {
            if first == second {
                hands.push(Hand::pair(*first));
            } else {
                hands.push(Hand::non_pair(*first, *second, Shape::Suited));
                hands.push(Hand::non_pair(*first, *second, Shape::Offsuit));
            }
        }
    }
    hands.sort_by(|a, b| b.cmp(a));
    hands
});

static PAIR_HANDS: LazyLock<Vec<Hand>> = LazyLock::new(|| by_shape(Shape::Pair));
static SUITED_HANDS: LazyLock<Vec<Hand>> = LazyLock::new(|| by_shape(Shape::Suited));
static OFFSUIT_HANDS: LazyLock<Vec<Hand>> = LazyLock::new(|| by_shape(Shape::Offsuit));

fn by_shape(shape: Shape) -> Vec<Hand> {
    ALL_HANDS
        .iter()
        .filter(|h| h.shape == shape)
        .copied()
        .collect()
}

/// `Hand` is a preflop starting hand archetype: two ranks plus a shape.
///
/// The ranks are always stored high first, so `AKs` and `KAs` are the
/// same hand. A pair always has shape `Shape::Pair` and a non-pair
/// never does.
///
/// ```
/// use poker_range::core::Rank;
/// use poker_range::holdem::{Hand, Shape};
///
/// let hand: Hand = "kas".parse().unwrap();
/// assert_eq!(Rank::Ace, hand.first());
/// assert_eq!(Shape::Suited, hand.shape());
/// assert_eq!("AKs", hand.to_string());
/// assert_eq!(4, hand.to_combos().len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Hand {
    first: Rank,
    second: Rank,
    shape: Shape,
}

impl Hand {
    /// Create a hand from two ranks and a shape. The ranks can be
    /// given in either order.
    ///
    /// Fails if a pair is given a non-pair shape or two different
    /// ranks are given `Shape::Pair`.
    pub fn new(first: Rank, second: Rank, shape: Shape) -> Result<Self, PokerError> {
        let is_pair = first == second;
        if is_pair != (shape == Shape::Pair) {
            let marker = shape.to_char().map(String::from).unwrap_or_default();
            return Err(PokerError::InvalidHand(format!("{first}{second}{marker}")));
        }
        Ok(if is_pair {
            Self::pair(first)
        } else {
            Self::non_pair(first, second, shape)
        })
    }

    pub(crate) fn pair(rank: Rank) -> Self {
        Self {
            first: rank,
            second: rank,
            shape: Shape::Pair,
        }
    }

    /// Ranks must differ and shape can't be `Pair`.
    pub(crate) fn non_pair(a: Rank, b: Rank, shape: Shape) -> Self {
        debug_assert!(a != b && shape != Shape::Pair);
        Self {
            first: a.max(b),
            second: a.min(b),
            shape,
        }
    }

    /// All 169 starting hands, strongest first.
    pub fn all() -> &'static [Hand] {
        &ALL_HANDS
    }

    /// The 13 pairs, `AA` first.
    pub fn pairs() -> &'static [Hand] {
        &PAIR_HANDS
    }

    /// The 78 suited hands, `AKs` first.
    pub fn suited_hands() -> &'static [Hand] {
        &SUITED_HANDS
    }

    /// The 78 offsuit hands, `AKo` first.
    pub fn offsuit_hands() -> &'static [Hand] {
        &OFFSUIT_HANDS
    }

    /// The higher (or equal) rank.
    pub fn first(&self) -> Rank {
        self.first
    }

    /// The lower (or equal) rank.
    pub fn second(&self) -> Rank {
        self.second
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_pair(&self) -> bool {
        self.shape == Shape::Pair
    }

    pub fn is_suited(&self) -> bool {
        self.shape == Shape::Suited
    }

    pub fn is_offsuit(&self) -> bool {
        self.shape == Shape::Offsuit
    }

    /// Positional distance between the two ranks.
    pub fn gap(&self) -> u8 {
        Rank::difference(self.first, self.second)
    }

    pub fn is_connector(&self) -> bool {
        self.gap() == 1
    }

    pub fn is_one_gapper(&self) -> bool {
        self.gap() == 2
    }

    pub fn is_two_gapper(&self) -> bool {
        self.gap() == 3
    }

    pub fn is_suited_connector(&self) -> bool {
        self.is_suited() && self.is_connector()
    }

    /// Both ranks are T or better.
    pub fn is_broadway(&self) -> bool {
        self.second >= Rank::Ten
    }

    /// 6 for a pair, 4 suited, 12 offsuit.
    pub fn combo_count(&self) -> usize {
        self.shape.combo_count()
    }

    /// Every concrete combo this hand covers. Suits are enumerated
    /// clubs first so the output order is fixed.
    pub fn to_combos(&self) -> Vec<Combo> {
        let suits = Suit::suits();
        let mut combos = Vec::with_capacity(self.combo_count());
        match self.shape {
            Shape::Pair => {
                for (i, suit_one) in suits.iter().enumerate() {
                    for suit_two in &suits[i + 1..] {
                        combos.push(Combo::ordered(
                            Card::new(self.first, *suit_one),
                            Card::new(self.second, *suit_two),
                        ));
                    }
                }
            }
            Shape::Suited => {
                for suit in suits {
                    combos.push(Combo::ordered(
                        Card::new(self.first, suit),
                        Card::new(self.second, suit),
                    ));
                }
            }
            Shape::Offsuit => {
                for suit_one in suits {
                    for suit_two in suits.into_iter().filter(|s| *s != suit_one) {
                        combos.push(Combo::ordered(
                            Card::new(self.first, suit_one),
                            Card::new(self.second, suit_two),
                        ));
                    }
                }
            }
        }
        combos
    }
}

impl Ord for Hand {
    /// Pairs beat non-pairs, higher pairs beat lower ones. Non-pairs
    /// compare the high rank, then the kicker, then suited beats offsuit.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.is_pair(), self.first, self.second, self.shape).cmp(&(
            other.is_pair(),
            other.first,
            other.second,
            other.shape,
        ))
    }
}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Hand {
    type Err = PokerError;

    /// Parse `AA`, `AKs` or `AKo`. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PokerError::InvalidHand(s.to_string());
        let chars: Vec<char> = s.chars().collect();

        let (first, second) = match chars.as_slice() {
            [a, b] | [a, b, _] => (
                Rank::from_char(*a).ok_or_else(invalid)?,
                Rank::from_char(*b).ok_or_else(invalid)?,
            ),
            _ => return Err(invalid()),
        };

        match chars.get(2) {
            None if first == second => Ok(Self::pair(first)),
            Some(marker) if first != second => {
                let shape = match Suitedness::from_char(*marker) {
                    Some(Suitedness::Suited) => Shape::Suited,
                    Some(Suitedness::OffSuit) => Shape::Offsuit,
                    _ => return Err(invalid()),
                };
                Ok(Self::non_pair(first, second, shape))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<&str> for Hand {
    type Error = PokerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Hand {
    type Error = PokerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Hand> for String {
    fn from(hand: Hand) -> Self {
        hand.to_string()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)?;
        if let Some(marker) = self.shape.to_char() {
            write!(f, "{marker}")?;
        }
        Ok(())
    }
}
