//! Seats at the table: the human player and the automated dealer.
//!
//! Both wrap a [`Participant`] (a name and a hand) and get the shared hand
//! operations through [`Seat`]. They differ in how they decide to hit: the
//! player is asked through a [`Console`], the dealer follows a threshold.

use crate::cards::Card;
use crate::console::{parse_bet, parse_decision, Console, HandSummary, Prompt, TableEvent};
use crate::hand::Hand;
use crate::money::Money;
use crate::round::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stand,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankrollError {
    #[error("cannot take ${requested}, only ${available} available")]
    InsufficientFunds { requested: Money, available: Money },
}

/// A display name and the cards currently held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    name: String,
    hand: Hand,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), hand: Hand::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn take_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    pub fn score(&self) -> u8 {
        self.hand.score()
    }
}

/// Hand operations shared by everyone at the table.
pub trait Seat {
    fn participant(&self) -> &Participant;
    fn participant_mut(&mut self) -> &mut Participant;

    fn name(&self) -> &str {
        self.participant().name()
    }

    fn hand(&self) -> &Hand {
        self.participant().hand()
    }

    fn take_card(&mut self, card: Card) {
        self.participant_mut().take_card(card);
    }

    fn clear_hand(&mut self) {
        self.participant_mut().clear_hand();
    }

    fn score(&self) -> u8 {
        self.participant().score()
    }

    fn summary(&self) -> HandSummary {
        HandSummary {
            name: self.name().to_string(),
            cards: self.hand().as_slice().to_vec(),
            score: self.score(),
            balance: None,
        }
    }
}

/// The human seat: a hand plus a bankroll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    participant: Participant,
    balance: Money,
}

impl Player {
    pub fn new(name: impl Into<String>, balance: Money) -> Self {
        Self { participant: Participant::new(name), balance }
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn credit(&mut self, amount: Money) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub fn debit(&mut self, amount: Money) -> Result<(), BankrollError> {
        self.balance = self.balance.checked_sub(amount).ok_or(
            BankrollError::InsufficientFunds { requested: amount, available: self.balance },
        )?;
        Ok(())
    }

    /// Ask for a wager until one parses and fits the balance. The amount is
    /// not deducted here.
    pub fn place_bet(&self, console: &mut dyn Console) -> Result<Money, GameError> {
        loop {
            console.show(&TableEvent::Balance(self.balance))?;
            let line = console.prompt(&Prompt::Bet { balance: self.balance })?;
            let line = line.ok_or(GameError::InputClosed)?;
            match parse_bet(&line, self.balance) {
                Ok(bet) => {
                    console.show(&TableEvent::BetAccepted(bet))?;
                    return Ok(bet);
                }
                Err(err) => {
                    log::debug!("bet rejected: {err}");
                    console.show(&TableEvent::from(err))?;
                }
            }
        }
    }

    /// Ask hit or stand until the answer is one of the accepted letters.
    pub fn decide_hit_or_stand(&self, console: &mut dyn Console) -> Result<Decision, GameError> {
        loop {
            let line = console.prompt(&Prompt::HitOrStand)?.ok_or(GameError::InputClosed)?;
            match parse_decision(&line) {
                Some(decision) => return Ok(decision),
                None => console.show(&TableEvent::InvalidDecision)?,
            }
        }
    }
}

impl Seat for Player {
    fn participant(&self) -> &Participant {
        &self.participant
    }

    fn participant_mut(&mut self) -> &mut Participant {
        &mut self.participant
    }

    fn summary(&self) -> HandSummary {
        HandSummary {
            name: self.name().to_string(),
            cards: self.hand().as_slice().to_vec(),
            score: self.score(),
            balance: Some(self.balance),
        }
    }
}

/// The automated seat. It has no bankroll and never asks anyone anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dealer {
    participant: Participant,
}

impl Dealer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { participant: Participant::new(name) }
    }

    /// Hit while below `stands_at`.
    pub fn decide_hit_or_stand(&self, stands_at: u8) -> Decision {
        if self.score() < stands_at {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }
}

impl Seat for Dealer {
    fn participant(&self) -> &Participant {
        &self.participant
    }

    fn participant_mut(&mut self) -> &mut Participant {
        &mut self.participant
    }
}
