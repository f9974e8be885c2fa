use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShoeError {
    #[error("the shoe is empty")]
    Exhausted,
    #[error("duplicate card in shoe: {0}")]
    DuplicateCard(Card),
}

/// The pool of cards a round is dealt from. The top of the shoe is the end of
/// the backing vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    pub const FULL: usize = 52;

    /// A fresh 52-card shoe in canonical order: hearts, spades, diamonds,
    /// clubs, each Ace through King.
    ///
    /// ```
    /// use blackjack_rs::shoe::Shoe;
    ///
    /// let shoe = Shoe::new();
    /// assert_eq!(shoe.len(), 52);
    /// ```
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(Self::FULL);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// A shoe dealt in exactly the given order: the first card is drawn first.
    pub fn stacked<I>(cards: I) -> Result<Self, ShoeError>
    where
        I: IntoIterator<Item = Card>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for card in cards {
            if !seen.insert(card) {
                return Err(ShoeError::DuplicateCard(card));
            }
            ordered.push(card);
        }
        ordered.reverse();
        Ok(Self { cards: ordered })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, bottom first; the last element is the next draw.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle with the thread-local RNG.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw the top card.
    pub fn draw_next(&mut self) -> Result<Card, ShoeError> {
        self.cards.pop().ok_or(ShoeError::Exhausted)
    }
}

impl Default for Shoe {
    fn default() -> Self {
        Self::new()
    }
}
