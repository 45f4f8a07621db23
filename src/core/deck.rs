use crate::core::card::Card;
use crate::holdem::Combo;
use std::ops::Index;

use rand::Rng;
use rand::seq::SliceRandom;

/// `Deck` is the normal 52 card deck. Cards are kept in a flat vec so
/// that it can be shuffled and dealt from the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// Card storage.
    cards: Vec<Card>,
}

impl Deck {
    /// Create the full 52 card deck, lowest card first.
    ///
    /// ```
    /// use poker_range::core::Deck;
    ///
    /// assert_eq!(52, Deck::new().len());
    /// ```
    pub fn new() -> Self {
        Self {
            cards: Card::all().to_vec(),
        }
    }

    /// Given a card, is it in the current deck?
    pub fn contains(&self, c: &Card) -> bool {
        self.cards.contains(c)
    }

    /// Given a card remove it from the deck if it is present.
    pub fn remove(&mut self, c: &Card) -> bool {
        match self.cards.iter().position(|x| x == c) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all of the cards been dealt from this deck?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get an iterator from this deck
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Randomly shuffle the deck.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng)
    }

    /// Deal a card if there is one there to deal.
    /// None if the deck is empty
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Every two card combo that can still be dealt from this deck.
    ///
    /// ```
    /// use poker_range::core::Deck;
    ///
    /// assert_eq!(1326, Deck::new().combos().len());
    /// ```
    pub fn combos(&self) -> Vec<Combo> {
        let mut combos = Vec::with_capacity(self.len() * self.len().saturating_sub(1) / 2);
        for (i, first) in self.cards.iter().enumerate() {
            // Cards in a deck are unique.
            combos.extend(
                self.cards[i + 1..]
                    .iter()
                    .map(|second| Combo::ordered(*first, *second)),
            );
        }
        combos
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for Deck {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

/// Turn a deck into an iterator
impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;
    /// Consume this deck and create a new iterator.
    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_contains_in() {
        let d = Deck::new();
        assert!(d.contains(&Card::new(Rank::Eight, Suit::Heart)));
    }

    #[test]
    fn test_remove() {
        let mut d = Deck::new();
        let c = Card::new(Rank::Ace, Suit::Heart);
        assert!(d.contains(&c));
        assert!(d.remove(&c));
        assert!(!d.contains(&c));
        assert!(!d.remove(&c));
        assert_eq!(51, d.len());
    }

    #[test]
    fn test_deal_until_empty() {
        let mut d = Deck::new();
        let mut dealt = 0;
        while d.deal().is_some() {
            dealt += 1;
        }
        assert_eq!(52, dealt);
        assert!(d.is_empty());
        assert_eq!(None, d.deal());
    }

    #[test]
    fn test_shuffle_rng() {
        let mut d_one = Deck::new();
        let mut d_two = Deck::new();

        let mut rng_one = StdRng::seed_from_u64(420);
        let mut rng_two = StdRng::seed_from_u64(420);

        d_one.shuffle(&mut rng_one);
        d_two.shuffle(&mut rng_two);

        assert_eq!(d_one, d_two);
        assert_ne!(Deck::new(), d_one);
        assert_eq!(52, d_one.len());
    }

    #[test]
    fn test_combos_after_removal() {
        let mut d = Deck::new();
        d.remove(&Card::new(Rank::Ace, Suit::Spade));
        // 51 choose 2
        assert_eq!(1275, d.combos().len());
        assert!(d.combos().iter().all(|c| c.first() > c.second()));
        assert!(
            d.combos()
                .iter()
                .all(|c| c.first().rank != Rank::Ace || c.first().suit != Suit::Spade)
        );
    }

    #[test]
    fn test_index() {
        let d = Deck::new();
        assert_eq!(Card::new(Rank::Two, Suit::Club), d[0]);
        assert_eq!(Card::new(Rank::Ace, Suit::Spade), d[51]);
    }
}
