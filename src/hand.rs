use crate::cards::Card;
use std::fmt;

/// The score a hand must reach for blackjack; anything above busts.
pub const BLACKJACK: u8 = 21;

/// Score a sequence of cards under blackjack ace rules.
///
/// Every Ace starts at 11; while the total is over 21 and an Ace is still
/// counted high, it is downgraded to 1.
///
/// ```
/// use blackjack_rs::cards::parse_cards;
/// use blackjack_rs::hand::score_cards;
///
/// assert_eq!(score_cards(&parse_cards("A♥ 6♠").unwrap()), 17);
/// assert_eq!(score_cards(&parse_cards("A♥ A♠ 9♦").unwrap()), 21);
/// ```
pub fn score_cards(cards: &[Card]) -> u8 {
    let (total, _) = score_with_soft_aces(cards);
    u8::try_from(total).unwrap_or(u8::MAX)
}

// Returns the final total and how many aces are still counted as 11.
fn score_with_soft_aces(cards: &[Card]) -> (u16, u8) {
    let mut total: u16 = 0;
    let mut aces: u8 = 0;
    for card in cards {
        total += u16::from(card.value());
        if card.rank().is_ace() {
            aces += 1;
        }
    }
    while total > u16::from(BLACKJACK) && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    (total, aces)
}

/// Cards held by one participant for the duration of a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> u8 {
        score_cards(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK
    }

    /// Exactly two cards totalling 21.
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.score() == BLACKJACK
    }

    /// Whether an Ace is still being counted as 11.
    pub fn is_soft(&self) -> bool {
        let (total, soft_aces) = score_with_soft_aces(&self.cards);
        soft_aces > 0 && total <= u16::from(BLACKJACK)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for card in &self.cards {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self { cards: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn hand(s: &str) -> Hand {
        parse_cards(s).unwrap().into_iter().collect()
    }

    #[test]
    fn scores_soft_and_hard_totals() {
        assert_eq!(hand("A♥ 6♠").score(), 17);
        assert_eq!(hand("A♥ A♠ 9♦").score(), 21);
        assert_eq!(hand("A♥ A♠ A♦ 9♣").score(), 12);
        assert_eq!(hand("10♥ K♠").score(), 20);
        assert_eq!(hand("K♥ Q♠ 5♦").score(), 25);
    }

    #[test]
    fn empty_hand_scores_zero() {
        assert_eq!(Hand::new().score(), 0);
        assert!(!Hand::new().is_soft());
    }

    #[test]
    fn blackjack_needs_two_cards() {
        assert!(hand("A♥ K♠").is_blackjack());
        assert!(!hand("7♥ 7♠ 7♦").is_blackjack());
        assert!(!hand("A♥ 9♠").is_blackjack());
    }

    #[test]
    fn bust_and_soft_flags() {
        assert!(hand("K♥ Q♠ 5♦").is_bust());
        assert!(hand("A♥ 6♠").is_soft());
        assert!(!hand("A♥ 6♠ 9♦").is_soft());
        assert!(hand("A♥ A♠ 9♦").is_soft());
    }

    #[test]
    fn display_joins_cards() {
        assert_eq!(hand("A♥ 10♠").to_string(), "A♥ 10♠");
        assert_eq!(Hand::new().to_string(), "");
    }

    #[test]
    fn clear_releases_cards() {
        let mut h = hand("2♥ 3♠");
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.score(), 0);
    }
}
