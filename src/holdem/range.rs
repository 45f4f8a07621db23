use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::{Level, event};

use crate::core::{PokerError, Rank};

use super::render;
use super::{Combo, Hand, Lexer, Shape, Suitedness, Token};

/// Something a `Range` can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    Hand(Hand),
    Combo(Combo),
}

impl From<Hand> for Member {
    fn from(hand: Hand) -> Self {
        Member::Hand(hand)
    }
}

impl From<Combo> for Member {
    fn from(combo: Combo) -> Self {
        Member::Combo(combo)
    }
}

impl FromStr for Member {
    type Err = PokerError;

    /// Two or three characters parse as a `Hand`, four as a `Combo`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().count() {
            2 | 3 => s.parse().map(Member::Hand),
            4 => s.parse().map(Member::Combo),
            _ => Err(PokerError::InvalidMember(s.to_string())),
        }
    }
}

/// A set of starting hands, written in the usual compact notation.
///
/// Internally a range is a set of `Hand`s that are fully covered plus a
/// set of loose `Combo`s that don't fill their hand. The two never
/// overlap. Everything else (all combos, size, the canonical string) is
/// derived from those on first use and cached.
///
/// ```
/// use poker_range::holdem::{Hand, Range};
///
/// let range: Range = "22+ AJs+ KQo AsKh".parse().unwrap();
/// assert_eq!(78 + 12 + 12 + 1, range.size());
/// assert!(range.contains("AsKh".parse::<poker_range::holdem::Combo>().unwrap()));
/// assert!(!range.contains("AKo".parse::<Hand>().unwrap()));
/// assert_eq!("22+, AJs+, A♠K♥, KQo", range.to_string());
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Range {
    hands: BTreeSet<Hand>,
    combos: BTreeSet<Combo>,
    all_combos: OnceLock<BTreeSet<Combo>>,
    all_hands: OnceLock<BTreeSet<Hand>>,
    pieces: OnceLock<Vec<String>>,
}

impl Range {
    /// Build a range from hands and combos.
    ///
    /// Combos that are already covered by one of the hands are dropped
    /// and combos that together make up a whole hand are replaced by
    /// that hand.
    pub fn new<H, C>(hands: H, combos: C) -> Self
    where
        H: IntoIterator<Item = Hand>,
        C: IntoIterator<Item = Combo>,
    {
        let mut hands: BTreeSet<Hand> = hands.into_iter().collect();

        let mut by_hand: BTreeMap<Hand, Vec<Combo>> = BTreeMap::new();
        for combo in combos {
            by_hand.entry(combo.to_hand()).or_default().push(combo);
        }

        let mut loose = BTreeSet::new();
        for (hand, group) in by_hand {
            if hands.contains(&hand) {
                continue;
            }
            let group: BTreeSet<Combo> = group.into_iter().collect();
            if group.len() == hand.combo_count() {
                hands.insert(hand);
            } else {
                loose.extend(group);
            }
        }

        Self {
            hands,
            combos: loose,
            ..Default::default()
        }
    }

    /// The range holding every hand.
    pub fn full() -> Self {
        Self::new(Hand::all().iter().copied(), [])
    }

    /// Read the whole file as a range string.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PokerError> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }

    /// Hands whose every combo is in the range.
    pub fn hands(&self) -> &BTreeSet<Hand> {
        &self.hands
    }

    /// Combos that were added individually and don't complete a hand.
    pub fn combos(&self) -> &BTreeSet<Combo> {
        &self.combos
    }

    /// Every combo in the range.
    pub fn all_combos(&self) -> &BTreeSet<Combo> {
        self.all_combos.get_or_init(|| {
            self.hands
                .iter()
                .flat_map(Hand::to_combos)
                .chain(self.combos.iter().copied())
                .collect()
        })
    }

    /// Every hand that has at least one combo in the range.
    pub fn all_hands(&self) -> &BTreeSet<Hand> {
        self.all_hands.get_or_init(|| {
            self.hands
                .iter()
                .copied()
                .chain(self.combos.iter().map(Combo::to_hand))
                .collect()
        })
    }

    /// Number of combos, 0 through 1326.
    pub fn size(&self) -> usize {
        self.all_combos().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty() && self.combos.is_empty()
    }

    /// Share of all 1326 combos, as a percentage rounded to two places.
    pub fn percent(&self) -> f64 {
        let share = self.size() as f64 / Combo::all().len() as f64;
        (share * 100.0 * 100.0).round() / 100.0
    }

    /// The canonical pieces that `Display` joins with `", "`.
    pub fn pieces(&self) -> &[String] {
        self.pieces.get_or_init(|| render::pieces(self.all_combos()))
    }

    /// Is the combo in the range, or for a hand, are all of its combos?
    pub fn contains(&self, member: impl Into<Member>) -> bool {
        match member.into() {
            Member::Hand(hand) => self.hands.contains(&hand),
            Member::Combo(combo) => self.all_combos().contains(&combo),
        }
    }

    /// Number of full hands of each shape.
    pub fn shape_counts(&self) -> [(Shape, usize); 3] {
        let count = |shape: Shape| self.hands.iter().filter(|h| h.shape() == shape).count();
        [
            (Shape::Pair, count(Shape::Pair)),
            (Shape::Suited, count(Shape::Suited)),
            (Shape::Offsuit, count(Shape::Offsuit)),
        ]
    }

    /// Parse `member` as a hand or combo and check it.
    ///
    /// ```
    /// use poker_range::holdem::Range;
    ///
    /// let range: Range = "AsKh".parse().unwrap();
    /// assert!(range.contains_str("AsKh").unwrap());
    /// assert!(!range.contains_str("AKo").unwrap());
    /// assert!(range.contains_str("AsK").is_err());
    /// assert!(range.contains_str("AKsKh").is_err());
    /// ```
    pub fn contains_str(&self, member: &str) -> Result<bool, PokerError> {
        let member: Member = member.parse()?;
        Ok(self.contains(member))
    }
}

/// Inclusive span of ranks, empty when `low > high`.
fn rank_span(low: Rank, high: Rank) -> impl Iterator<Item = Rank> {
    Rank::values()
        .into_iter()
        .filter(move |r| *r >= low && *r <= high)
}

/// Every rank strictly below `high`.
fn kickers_below(high: Rank) -> impl Iterator<Item = Rank> {
    Rank::values().into_iter().filter(move |r| *r < high)
}

fn insert_non_pairs(
    hands: &mut BTreeSet<Hand>,
    high: Rank,
    kickers: impl Iterator<Item = Rank>,
    suitedness: Suitedness,
) {
    for kicker in kickers {
        for shape in suitedness.shapes() {
            hands.insert(Hand::non_pair(high, kicker, *shape));
        }
    }
}

/// Write everything `token` names into the hand or combo set.
fn expand(token: &Token, hands: &mut BTreeSet<Hand>, combos: &mut BTreeSet<Combo>) {
    match *token {
        Token::All => hands.extend(Hand::all().iter().copied()),
        Token::Pair(rank) => {
            hands.insert(Hand::pair(rank));
        }
        Token::PairPlus(rank) => hands.extend(rank_span(rank, Rank::Ace).map(Hand::pair)),
        Token::PairMinus(rank) => hands.extend(rank_span(Rank::Two, rank).map(Hand::pair)),
        Token::PairDash { low, high } => hands.extend(rank_span(low, high).map(Hand::pair)),
        Token::NonPair {
            high,
            kicker,
            suitedness,
        } => insert_non_pairs(hands, high, std::iter::once(kicker), suitedness),
        Token::NonPairPlus {
            high,
            kicker,
            suitedness,
        } => insert_non_pairs(
            hands,
            high,
            kickers_below(high).filter(move |k| *k >= kicker),
            suitedness,
        ),
        Token::NonPairMinus {
            high,
            kicker,
            suitedness,
        } => insert_non_pairs(hands, high, rank_span(Rank::Two, kicker), suitedness),
        Token::NonPairDash {
            high,
            low,
            top,
            suitedness,
        } => insert_non_pairs(hands, high, rank_span(low, top), suitedness),
        Token::GapDash {
            low,
            high,
            gap,
            suitedness,
        } => {
            for h in rank_span(low, high) {
                let kicker = u8::from(h).checked_sub(gap).and_then(Rank::from_u8);
                insert_non_pairs(hands, h, kicker.into_iter(), suitedness);
            }
        }
        Token::AnyKicker { high, suitedness } => {
            insert_non_pairs(hands, high, kickers_below(high), suitedness)
        }
        Token::AnyKickerPlus { high, suitedness } => {
            for h in rank_span(high, Rank::Ace) {
                insert_non_pairs(hands, h, kickers_below(h), suitedness);
            }
        }
        Token::AnyKickerMinus { high, suitedness } => {
            for h in rank_span(Rank::Two, high) {
                insert_non_pairs(hands, h, kickers_below(h), suitedness);
            }
        }
        Token::Combo(combo) => {
            combos.insert(combo);
        }
    }
}

impl FromStr for Range {
    type Err = PokerError;

    /// Parse a range string. Fails on the first token that isn't valid,
    /// nothing is built in that case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut hands = BTreeSet::new();
        let mut combos = BTreeSet::new();
        let mut full = false;

        for token in Lexer::new(s) {
            let token = token?;
            // Keep lexing after XX so a bad token later still fails.
            if full {
                continue;
            }
            event!(Level::TRACE, %token, kind = ?token.kind(), "Expanding range token");
            full = token == Token::All;
            expand(&token, &mut hands, &mut combos);
        }

        let range = if full {
            Range::full()
        } else {
            Range::new(hands, combos)
        };
        event!(
            Level::DEBUG,
            hands = range.hands.len(),
            combos = range.combos.len(),
            size = range.size(),
            "Parsed range"
        );
        Ok(range)
    }
}

impl TryFrom<&str> for Range {
    type Error = PokerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Range {
    type Error = PokerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Range> for String {
    fn from(range: Range) -> Self {
        range.to_string()
    }
}

impl FromIterator<Hand> for Range {
    fn from_iter<T: IntoIterator<Item = Hand>>(iter: T) -> Self {
        Self::new(iter, [])
    }
}

impl FromIterator<Combo> for Range {
    fn from_iter<T: IntoIterator<Item = Combo>>(iter: T) -> Self {
        Self::new([], iter)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pieces().join(", "))
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Range").field(&self.to_string()).finish()
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        self.all_combos() == other.all_combos()
    }
}

impl Eq for Range {}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.all_combos().hash(state);
    }
}

impl PartialOrd for Range {
    /// Ranges order by size. Two different ranges of the same size
    /// are not comparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.size().cmp(&other.size()) {
            Ordering::Equal if self != other => None,
            ord => Some(ord),
        }
    }
}
