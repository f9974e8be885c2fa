//! One round of play, from the bet to settlement.
//!
//! The controller walks an explicit [`Phase`] machine:
//!
//! ```text
//! Dealt -> PlayerTurn <-> DealerTurn(AfterHit)
//!              |
//!              +-> DealerTurn(AfterStand) -> Settled
//! ```
//!
//! Every phase can also jump straight to `Settled` when someone reaches 21
//! or busts. The dealer reacts differently depending on how the player left
//! their turn: after a hit it draws at most one card against a fixed 18,
//! after a stand it draws until it matches the player's score.

use crate::console::{Console, TableEvent};
use crate::hand::BLACKJACK;
use crate::money::Money;
use crate::participant::{BankrollError, Dealer, Decision, Player, Seat};
use crate::shoe::{Shoe, ShoeError};
use std::io;

/// The dealer's stand threshold when it answers a player hit.
pub const DEALER_STANDS_AFTER_HIT: u8 = 18;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum GameError {
    #[error(transparent)]
    Shoe(#[from] ShoeError),
    #[error(transparent)]
    Bankroll(#[from] BankrollError),
    #[error("input closed before the game finished")]
    InputClosed,
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
    /// Dealer's first two cards made 21. Checked before the player's.
    DealerBlackjack,
    /// Player's first two cards made 21.
    PlayerBlackjack,
    /// Player hit to exactly 21.
    PlayerHitTwentyOne,
    PlayerBust,
    /// Dealer drew to exactly 21.
    DealerHitTwentyOne,
    DealerBust,
    /// Final comparison after a stand, player ahead.
    PlayerOutscored { player: u8, dealer: u8 },
    /// Final comparison after a stand, dealer ahead or tied.
    DealerHolds { player: u8, dealer: u8 },
}

impl Outcome {
    pub fn player_wins(self) -> bool {
        self.payout_multiplier() > 0
    }

    /// Multiple of the bet credited back at settlement; the bet itself was
    /// already taken when it was placed.
    pub fn payout_multiplier(self) -> u64 {
        match self {
            Outcome::PlayerBlackjack | Outcome::PlayerHitTwentyOne => 3,
            Outcome::DealerBust | Outcome::PlayerOutscored { .. } => 2,
            Outcome::DealerBlackjack
            | Outcome::PlayerBust
            | Outcome::DealerHitTwentyOne
            | Outcome::DealerHolds { .. } => 0,
        }
    }

    /// Whether the dealer's own draw ended the round.
    pub fn decided_by_dealer_draw(self) -> bool {
        matches!(self, Outcome::DealerHitTwentyOne | Outcome::DealerBust)
    }

    pub fn payout(self, bet: Money) -> Money {
        bet.times(self.payout_multiplier())
    }

    pub fn announcement(self) -> String {
        match self {
            Outcome::DealerBlackjack | Outcome::DealerHitTwentyOne => {
                "BlackJack! Dealer wins!".to_string()
            }
            Outcome::PlayerBlackjack => "BlackJack! You win!".to_string(),
            Outcome::PlayerHitTwentyOne => "Winner, winner, chicken dinner! BlackJack!".to_string(),
            Outcome::PlayerBust => "BUST! You lose.".to_string(),
            Outcome::DealerBust => "Dealer BUST! You win.".to_string(),
            Outcome::PlayerOutscored { player, dealer } => {
                format!("You scored {player} to the dealer's {dealer}. You win!")
            }
            Outcome::DealerHolds { player, dealer } => {
                format!("You scored {player} to the dealer's {dealer}. You lose!")
            }
        }
    }
}

/// Which path led into the dealer's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerTurn {
    /// The player just hit without busting.
    AfterHit,
    /// The player stood on `stands_at`.
    AfterStand { stands_at: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    Dealt,
    PlayerTurn,
    DealerTurn(DealerTurn),
    Settled(Outcome),
}

/// What happened in a finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub bet: Money,
    pub outcome: Outcome,
    pub payout: Money,
    pub player_score: u8,
    pub dealer_score: u8,
    /// Every phase entered, in order.
    pub phases: Vec<Phase>,
}

impl RoundReport {
    pub fn entered_player_turn(&self) -> bool {
        self.phases.contains(&Phase::PlayerTurn)
    }

    pub fn entered_dealer_turn(&self, turn: DealerTurn) -> bool {
        self.phases.contains(&Phase::DealerTurn(turn))
    }
}

/// A round in progress. It borrows both seats for its whole lifetime and
/// owns the shoe it deals from.
#[derive(Debug)]
pub struct Round<'a> {
    player: &'a mut Player,
    dealer: &'a mut Dealer,
    shoe: Shoe,
    bet: Money,
    phase: Phase,
    phases: Vec<Phase>,
}

impl<'a> Round<'a> {
    /// Take a bet, deal from `shoe` and play until the round settles.
    ///
    /// Both hands are empty again when this returns. If the round cannot
    /// finish (empty shoe, closed input) the stake is returned before the
    /// error is surfaced.
    pub fn play(
        player: &'a mut Player,
        dealer: &'a mut Dealer,
        shoe: Shoe,
        console: &mut dyn Console,
    ) -> Result<RoundReport, GameError> {
        let bet = player.place_bet(console)?;
        player.debit(bet)?;

        let mut round =
            Round { player, dealer, shoe, bet, phase: Phase::Dealt, phases: Vec::new() };
        let outcome = match round.run(console) {
            Ok(outcome) => outcome,
            Err(err) => {
                round.abort();
                return Err(err);
            }
        };

        let payout = outcome.payout(bet);
        round.player.credit(payout);
        let report = RoundReport {
            bet,
            outcome,
            payout,
            player_score: round.player.score(),
            dealer_score: round.dealer.score(),
            phases: std::mem::take(&mut round.phases),
        };
        round.clear_hands();
        log::info!(
            "round settled: {outcome:?}, bet {bet}, payout {payout}, balance {}",
            round.player.balance()
        );
        console.show(&TableEvent::Settled { outcome, payout })?;
        if outcome.decided_by_dealer_draw() {
            console.show(&TableEvent::WinnerDecided)?;
        }
        Ok(report)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    fn run(&mut self, console: &mut dyn Console) -> Result<Outcome, GameError> {
        self.deal()?;
        self.phases.push(Phase::Dealt);
        console.show(&TableEvent::Dealt { shoe_len: self.shoe.len() })?;
        console.show(&TableEvent::Hand(self.player.summary()))?;
        console.show(&TableEvent::Hand(self.dealer.summary()))?;

        loop {
            let next = match self.phase {
                Phase::Dealt => self.check_naturals(),
                Phase::PlayerTurn => self.player_turn(console)?,
                Phase::DealerTurn(DealerTurn::AfterHit) => self.dealer_answers_hit(console)?,
                Phase::DealerTurn(DealerTurn::AfterStand { stands_at }) => {
                    self.dealer_draws_to(stands_at, console)?
                }
                Phase::Settled(outcome) => return Ok(outcome),
            };
            self.enter(next);
        }
    }

    fn enter(&mut self, next: Phase) {
        log::debug!("round phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        self.phases.push(next);
    }

    // Player, dealer, player, dealer.
    fn deal(&mut self) -> Result<(), GameError> {
        for _ in 0..2 {
            let card = self.shoe.draw_next()?;
            self.player.take_card(card);
            let card = self.shoe.draw_next()?;
            self.dealer.take_card(card);
        }
        log::debug!("dealt {} / {}", self.player.hand(), self.dealer.hand());
        Ok(())
    }

    fn check_naturals(&self) -> Phase {
        if self.dealer.score() == BLACKJACK {
            Phase::Settled(Outcome::DealerBlackjack)
        } else if self.player.score() == BLACKJACK {
            Phase::Settled(Outcome::PlayerBlackjack)
        } else {
            Phase::PlayerTurn
        }
    }

    fn player_turn(&mut self, console: &mut dyn Console) -> Result<Phase, GameError> {
        match self.player.decide_hit_or_stand(console)? {
            Decision::Hit => {
                let card = self.shoe.draw_next()?;
                self.player.take_card(card);
                console.show(&TableEvent::PlayerDrew(card))?;
                console.show(&TableEvent::Hand(self.player.summary()))?;
                let score = self.player.score();
                Ok(if score == BLACKJACK {
                    Phase::Settled(Outcome::PlayerHitTwentyOne)
                } else if score > BLACKJACK {
                    Phase::Settled(Outcome::PlayerBust)
                } else {
                    Phase::DealerTurn(DealerTurn::AfterHit)
                })
            }
            Decision::Stand => {
                console.show(&TableEvent::PlayerStood)?;
                console.show(&TableEvent::Hand(self.player.summary()))?;
                let stands_at = self.player.score();
                Ok(Phase::DealerTurn(DealerTurn::AfterStand { stands_at }))
            }
        }
    }

    // At most one card, then the player decides again.
    fn dealer_answers_hit(&mut self, console: &mut dyn Console) -> Result<Phase, GameError> {
        if self.dealer.decide_hit_or_stand(DEALER_STANDS_AFTER_HIT) == Decision::Stand {
            console.show(&TableEvent::DealerStands)?;
            return Ok(Phase::PlayerTurn);
        }
        Ok(match self.dealer_draw(console)? {
            BLACKJACK => Phase::Settled(Outcome::DealerHitTwentyOne),
            score if score > BLACKJACK => Phase::Settled(Outcome::DealerBust),
            _ => Phase::PlayerTurn,
        })
    }

    fn dealer_draws_to(
        &mut self,
        stands_at: u8,
        console: &mut dyn Console,
    ) -> Result<Phase, GameError> {
        if self.dealer.decide_hit_or_stand(stands_at) == Decision::Stand {
            console.show(&TableEvent::DealerStands)?;
        }
        while self.dealer.decide_hit_or_stand(stands_at) == Decision::Hit {
            match self.dealer_draw(console)? {
                BLACKJACK => return Ok(Phase::Settled(Outcome::DealerHitTwentyOne)),
                score if score > BLACKJACK => return Ok(Phase::Settled(Outcome::DealerBust)),
                _ => {}
            }
        }
        let (player, dealer) = (self.player.score(), self.dealer.score());
        let outcome = if player > dealer {
            Outcome::PlayerOutscored { player, dealer }
        } else {
            Outcome::DealerHolds { player, dealer }
        };
        Ok(Phase::Settled(outcome))
    }

    fn dealer_draw(&mut self, console: &mut dyn Console) -> Result<u8, GameError> {
        let card = self.shoe.draw_next()?;
        self.dealer.take_card(card);
        console.show(&TableEvent::DealerDrew(card))?;
        console.show(&TableEvent::Hand(self.dealer.summary()))?;
        Ok(self.dealer.score())
    }

    fn clear_hands(&mut self) {
        self.player.clear_hand();
        self.dealer.clear_hand();
    }

    fn abort(&mut self) {
        log::warn!("round aborted in {:?}; returning stake {}", self.phase, self.bet);
        self.player.credit(self.bet);
        self.clear_hands();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::console::ScriptedConsole;

    fn stacked(cards: &str) -> Shoe {
        Shoe::stacked(parse_cards(cards).unwrap()).unwrap()
    }

    fn seats() -> (Player, Dealer) {
        (Player::new("You", Money::from_whole(1000)), Dealer::new("Bellagio"))
    }

    #[test]
    fn payout_multipliers() {
        let bet = Money::from_whole(10);
        assert_eq!(Outcome::PlayerBlackjack.payout(bet), Money::from_whole(30));
        assert_eq!(Outcome::PlayerHitTwentyOne.payout(bet), Money::from_whole(30));
        assert_eq!(Outcome::DealerBust.payout(bet), Money::from_whole(20));
        assert_eq!(
            Outcome::PlayerOutscored { player: 20, dealer: 19 }.payout(bet),
            Money::from_whole(20)
        );
        assert_eq!(Outcome::DealerHolds { player: 19, dealer: 19 }.payout(bet), Money::ZERO);
        assert_eq!(Outcome::DealerBlackjack.payout(bet), Money::ZERO);
        assert_eq!(Outcome::PlayerBust.payout(bet), Money::ZERO);
        assert_eq!(Outcome::DealerHitTwentyOne.payout(bet), Money::ZERO);
    }

    #[test]
    fn player_natural_pays_triple() {
        let (mut p, mut d) = seats();
        let mut console = ScriptedConsole::new(["100"]);
        let report =
            Round::play(&mut p, &mut d, stacked("A♥ 5♠ K♦ 9♣"), &mut console).unwrap();
        assert_eq!(report.outcome, Outcome::PlayerBlackjack);
        assert_eq!(report.payout, Money::from_whole(300));
        assert_eq!(p.balance(), Money::from_whole(1200));
        assert!(!report.entered_player_turn());
    }

    #[test]
    fn double_natural_goes_to_dealer() {
        let (mut p, mut d) = seats();
        let mut console = ScriptedConsole::new(["100"]);
        let report =
            Round::play(&mut p, &mut d, stacked("A♥ A♠ K♦ Q♣"), &mut console).unwrap();
        assert_eq!(report.outcome, Outcome::DealerBlackjack);
        assert_eq!(p.balance(), Money::from_whole(900));
    }

    #[test]
    fn hands_are_cleared_after_settlement() {
        let (mut p, mut d) = seats();
        let mut console = ScriptedConsole::new(["1", "s"]);
        Round::play(&mut p, &mut d, stacked("10♥ 10♠ 8♦ 9♣"), &mut console).unwrap();
        assert!(p.hand().is_empty());
        assert!(d.hand().is_empty());
    }

    #[test]
    fn settlement_is_the_last_event() {
        let (mut p, mut d) = seats();
        let mut console = ScriptedConsole::new(["1", "s"]);
        let report =
            Round::play(&mut p, &mut d, stacked("10♥ 10♠ 8♦ 9♣"), &mut console).unwrap();
        assert_eq!(report.outcome, Outcome::DealerHolds { player: 18, dealer: 19 });
        assert_eq!(
            console.events().last(),
            Some(&TableEvent::Settled { outcome: report.outcome, payout: Money::ZERO })
        );
    }
}
