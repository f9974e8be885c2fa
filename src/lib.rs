//! blackjack-rs: single-player blackjack against an automated dealer
//!
//! Goals:
//! - Exact, deterministic scoring and settlement (money is held in cents)
//! - Rules engine independent of any terminal: rounds talk to a [`console::Console`]
//! - No panics on bad input; every prompt re-asks until it gets a valid answer
//!
//! ## Quick start: play a scripted round
//! ```
//! use blackjack_rs::cards::parse_cards;
//! use blackjack_rs::console::ScriptedConsole;
//! use blackjack_rs::money::Money;
//! use blackjack_rs::participant::{Dealer, Player};
//! use blackjack_rs::round::{Outcome, Round};
//! use blackjack_rs::shoe::Shoe;
//!
//! let mut player = Player::new("You", Money::from_whole(100));
//! let mut dealer = Dealer::new("Bellagio");
//! // Dealt player, dealer, player, dealer; then the dealer's draw.
//! let shoe = Shoe::stacked(parse_cards("10♥ 6♠ 5♦ 8♣ K♠").unwrap()).unwrap();
//! let mut console = ScriptedConsole::new(["10", "s"]);
//!
//! let report = Round::play(&mut player, &mut dealer, shoe, &mut console).unwrap();
//! assert_eq!(report.outcome, Outcome::DealerBust);
//! assert_eq!(player.balance(), Money::from_whole(110));
//! ```
//!
//! ## Play
//! ```sh
//! cargo run --bin blackjack-rs            # line console
//! cargo run --bin blackjack-rs -- --tui   # full-screen TUI
//! ```

pub mod cards;
pub mod config;
pub mod console;
pub mod hand;
pub mod money;
pub mod participant;
pub mod round;
pub mod session;
pub mod shoe;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
