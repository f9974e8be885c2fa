use blackjack_rs::cards::parse_cards;
use blackjack_rs::console::{Prompt, ScriptedConsole, TableEvent};
use blackjack_rs::money::Money;
use blackjack_rs::participant::{Dealer, Player, Seat};
use blackjack_rs::round::{DealerTurn, GameError, Outcome, Phase, Round, RoundReport};
use blackjack_rs::shoe::{Shoe, ShoeError};

fn stacked(cards: &str) -> Shoe {
    Shoe::stacked(parse_cards(cards).unwrap()).unwrap()
}

fn seats() -> (Player, Dealer) {
    (Player::new("You", Money::from_whole(10_000)), Dealer::new("Bellagio"))
}

fn play(cards: &str, inputs: &[&str]) -> (Player, Dealer, ScriptedConsole, RoundReport) {
    let (mut p, mut d) = seats();
    let mut console = ScriptedConsole::new(inputs.iter().copied());
    let report = Round::play(&mut p, &mut d, stacked(cards), &mut console).unwrap();
    (p, d, console, report)
}

fn count(console: &ScriptedConsole, pred: impl Fn(&TableEvent) -> bool) -> usize {
    console.events().iter().filter(|e| pred(*e)).count()
}

#[test]
fn dealer_natural_ends_round_before_player_turn() {
    let (p, _, console, report) = play("5♥ A♠ 9♦ K♣", &["100"]);
    assert_eq!(report.outcome, Outcome::DealerBlackjack);
    assert_eq!(p.balance(), Money::from_whole(9_900));
    assert!(!report.entered_player_turn());
    assert_eq!(console.prompts(), &[Prompt::Bet { balance: Money::from_whole(10_000) }]);
    assert_eq!(report.phases, vec![Phase::Dealt, Phase::Settled(Outcome::DealerBlackjack)]);
}

#[test]
fn hitting_to_twenty_one_pays_triple() {
    let (p, _, console, report) = play("10♥ 9♠ 6♦ 7♣ 5♥", &["100", "h"]);
    assert_eq!(report.outcome, Outcome::PlayerHitTwentyOne);
    assert_eq!(report.player_score, 21);
    assert_eq!(report.payout, Money::from_whole(300));
    assert_eq!(p.balance(), Money::from_whole(10_200));
    assert_eq!(count(&console, |e| matches!(e, TableEvent::DealerDrew(_))), 0);
}

#[test]
fn tie_after_stand_goes_to_dealer() {
    let (p, _, _, report) = play("10♥ 5♠ 9♦ 4♣ 10♠", &["100", "s"]);
    assert_eq!(report.outcome, Outcome::DealerHolds { player: 19, dealer: 19 });
    assert_eq!(p.balance(), Money::from_whole(9_900));
    assert!(report.entered_dealer_turn(DealerTurn::AfterStand { stands_at: 19 }));
}

#[test]
fn dealer_busts_drawing_to_players_score() {
    let (p, _, console, report) = play("10♥ 6♠ 5♦ 8♣ K♠", &["100", "s"]);
    assert_eq!(report.outcome, Outcome::DealerBust);
    assert_eq!(report.dealer_score, 24);
    assert_eq!(p.balance(), Money::from_whole(10_100));
    assert!(console.events().contains(&TableEvent::PlayerStood));
}

#[test]
fn dealer_draws_once_after_a_hit_then_player_decides_again() {
    let (p, _, console, report) = play("5♥ 10♠ 6♦ 7♣ 2♥ 3♠", &["50", "h", "s"]);
    assert_eq!(report.outcome, Outcome::DealerHolds { player: 13, dealer: 20 });
    assert_eq!(p.balance(), Money::from_whole(9_950));
    assert_eq!(
        report.phases,
        vec![
            Phase::Dealt,
            Phase::PlayerTurn,
            Phase::DealerTurn(DealerTurn::AfterHit),
            Phase::PlayerTurn,
            Phase::DealerTurn(DealerTurn::AfterStand { stands_at: 13 }),
            Phase::Settled(report.outcome),
        ]
    );
    assert_eq!(count(&console, |e| matches!(e, TableEvent::DealerDrew(_))), 1);
    assert_eq!(count(&console, |e| matches!(e, TableEvent::DealerStands)), 1);
}

#[test]
fn dealer_busts_on_its_single_draw_after_a_hit() {
    let (p, _, console, report) = play("5♥ 10♠ 6♦ 6♣ 2♥ K♠", &["100", "h"]);
    assert_eq!(report.outcome, Outcome::DealerBust);
    assert_eq!(report.payout, Money::from_whole(200));
    assert_eq!(p.balance(), Money::from_whole(10_100));
    assert!(report
        .phases
        .ends_with(&[Phase::DealerTurn(DealerTurn::AfterHit), Phase::Settled(Outcome::DealerBust)]));
    assert_eq!(count(&console, |e| matches!(e, TableEvent::DealerDrew(_))), 1);
    assert_eq!(console.events().last(), Some(&TableEvent::WinnerDecided));
}

#[test]
fn dealer_hits_twenty_one_on_its_single_draw_after_a_hit() {
    let (p, _, console, report) = play("5♥ 10♠ 6♦ 6♣ 2♥ 5♠", &["100", "h"]);
    assert_eq!(report.outcome, Outcome::DealerHitTwentyOne);
    assert_eq!(report.payout, Money::ZERO);
    assert_eq!(p.balance(), Money::from_whole(9_900));
    assert!(report.phases.ends_with(&[
        Phase::DealerTurn(DealerTurn::AfterHit),
        Phase::Settled(Outcome::DealerHitTwentyOne),
    ]));
    assert_eq!(count(&console, |e| matches!(e, TableEvent::DealerDrew(_))), 1);
    assert_eq!(console.events().last(), Some(&TableEvent::WinnerDecided));
}

#[test]
fn opening_deal_reports_the_shoe_left() {
    let (_, _, console, _) = play("10♥ 6♠ 5♦ 8♣ K♠", &["100", "s"]);
    assert_eq!(count(&console, |e| *e == TableEvent::Dealt { shoe_len: 1 }), 1);
}

#[test]
fn comparison_settlement_has_no_winner_line() {
    let (_, _, console, _) = play("10♥ 5♠ 9♦ 4♣ 10♠", &["100", "s"]);
    assert!(!console.events().contains(&TableEvent::WinnerDecided));
}

#[test]
fn dealer_on_eighteen_does_not_answer_a_hit() {
    let (_, _, console, report) = play("2♥ 10♠ 3♦ 8♣ 4♥", &["10", "h", "s"]);
    assert_eq!(report.outcome, Outcome::DealerHolds { player: 9, dealer: 18 });
    assert_eq!(count(&console, |e| matches!(e, TableEvent::DealerDrew(_))), 0);
    assert_eq!(count(&console, |e| matches!(e, TableEvent::DealerStands)), 2);
}

#[test]
fn player_bust_after_hit() {
    let (p, _, _, report) = play("10♥ 9♠ 6♦ 8♣ K♥", &["100", "h"]);
    assert_eq!(report.outcome, Outcome::PlayerBust);
    assert_eq!(report.player_score, 26);
    assert_eq!(p.balance(), Money::from_whole(9_900));
}

#[test]
fn dealer_hits_to_twenty_one_after_stand() {
    let (p, _, _, report) = play("10♥ 6♠ 10♦ 5♣ K♠", &["100", "s"]);
    assert_eq!(report.outcome, Outcome::DealerHitTwentyOne);
    assert_eq!(p.balance(), Money::from_whole(9_900));
}

#[test]
fn soft_ace_drops_to_one_instead_of_busting() {
    let (_, _, _, report) = play("A♥ 10♠ 6♦ 7♣ 10♥ 2♠", &["10", "h", "s"]);
    assert_eq!(report.outcome, Outcome::DealerHolds { player: 17, dealer: 19 });
    assert!(report.entered_dealer_turn(DealerTurn::AfterHit));
}

#[test]
fn exhausted_shoe_during_deal_refunds_the_stake() {
    let (mut p, mut d) = seats();
    let mut console = ScriptedConsole::new(["100"]);
    let err = Round::play(&mut p, &mut d, stacked("10♥ 9♠ 8♦"), &mut console).unwrap_err();
    assert!(matches!(err, GameError::Shoe(ShoeError::Exhausted)));
    assert_eq!(p.balance(), Money::from_whole(10_000));
    assert!(p.hand().is_empty());
    assert!(d.hand().is_empty());
}

#[test]
fn exhausted_shoe_during_dealer_draw_refunds_the_stake() {
    let (mut p, mut d) = seats();
    let mut console = ScriptedConsole::new(["100", "s"]);
    let err = Round::play(&mut p, &mut d, stacked("10♥ 5♠ 9♦ 4♣"), &mut console).unwrap_err();
    assert!(matches!(err, GameError::Shoe(ShoeError::Exhausted)));
    assert_eq!(p.balance(), Money::from_whole(10_000));
}

#[test]
fn closed_input_mid_round_refunds_the_stake() {
    let (mut p, mut d) = seats();
    let mut console = ScriptedConsole::new(["100"]);
    let err = Round::play(&mut p, &mut d, stacked("10♥ 6♠ 5♦ 8♣ K♠"), &mut console).unwrap_err();
    assert!(matches!(err, GameError::InputClosed));
    assert_eq!(p.balance(), Money::from_whole(10_000));
    assert!(p.hand().is_empty());
}

#[test]
fn invalid_answers_are_reprompted() {
    let inputs = ["abc", "20000", "12.345", "25", "x", "stand", "s"];
    let (p, _, console, report) = play("10♥ 6♠ 5♦ 8♣ K♠", &inputs);
    assert_eq!(report.bet, Money::from_whole(25));
    assert_eq!(p.balance(), Money::from_whole(10_025));
    assert_eq!(count(&console, |e| *e == TableEvent::InvalidBet), 2);
    assert!(console.events().contains(&TableEvent::BetRejected {
        bet: Money::from_whole(20_000),
        balance: Money::from_whole(10_000),
    }));
    assert_eq!(count(&console, |e| *e == TableEvent::InvalidDecision), 2);
    assert_eq!(console.remaining_inputs(), 0);
}

#[test]
fn negative_bet_is_taken_as_its_size() {
    let (p, _, console, _) = play("5♥ A♠ 9♦ K♣", &["-40"]);
    assert!(console.events().contains(&TableEvent::BetAccepted(Money::from_whole(40))));
    assert_eq!(p.balance(), Money::from_whole(9_960));
}

#[test]
fn zero_bet_plays_for_nothing() {
    let (p, _, _, report) = play("10♥ 6♠ 5♦ 8♣ K♠", &["0", "s"]);
    assert_eq!(report.outcome, Outcome::DealerBust);
    assert_eq!(report.payout, Money::ZERO);
    assert_eq!(p.balance(), Money::from_whole(10_000));
}
