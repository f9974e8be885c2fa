use crate::config::TableConfig;
use crate::console::{parse_play_again, Console, Prompt, TableEvent};
use crate::money::Money;
use crate::participant::{Dealer, Player};
use crate::round::{GameError, Outcome, Round, RoundReport};
use crate::shoe::Shoe;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// Running totals for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SessionSummary {
    pub rounds_played: u32,
    pub player_wins: u32,
    pub dealer_wins: u32,
    pub player_blackjacks: u32,
    pub starting_balance: Money,
    pub balance: Money,
}

impl SessionSummary {
    pub fn new(starting_balance: Money) -> Self {
        Self {
            rounds_played: 0,
            player_wins: 0,
            dealer_wins: 0,
            player_blackjacks: 0,
            starting_balance,
            balance: starting_balance,
        }
    }

    fn record(&mut self, report: &RoundReport, balance: Money) {
        self.rounds_played += 1;
        if report.outcome.player_wins() {
            self.player_wins += 1;
        } else {
            self.dealer_wins += 1;
        }
        if report.outcome == Outcome::PlayerBlackjack {
            self.player_blackjacks += 1;
        }
        self.balance = balance;
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const WIDTH: usize = 40;
        const TEXT_WIDTH: usize = "player blackjacks".len() + 8;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds played", self.rounds_played)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds won", self.player_wins)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds lost", self.dealer_wins)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "player blackjacks", self.player_blackjacks)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "starting balance", self.starting_balance)?;
        write!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "final balance", self.balance)
    }
}

/// Ask whether to deal another round until the answer is Y or N.
pub fn ask_play_again(console: &mut dyn Console) -> Result<bool, GameError> {
    loop {
        let line = console.prompt(&Prompt::PlayAgain)?.ok_or(GameError::InputClosed)?;
        match parse_play_again(&line) {
            Some(again) => return Ok(again),
            None => console.show(&TableEvent::InvalidPlayAgain)?,
        }
    }
}

/// A sitting at the table: one player, one dealer, as many rounds as the
/// player wants. Every round gets its own freshly shuffled shoe.
#[derive(Debug)]
pub struct Session<R = ChaCha8Rng> {
    config: TableConfig,
    player: Player,
    dealer: Dealer,
    rng: R,
    summary: SessionSummary,
}

impl Session<ChaCha8Rng> {
    /// Session shuffling with ChaCha8, seeded from the config or at random.
    /// The seed is logged so a session can be replayed.
    pub fn new(config: TableConfig) -> Self {
        let seed = config.rng_seed.unwrap_or_else(rand::random);
        log::info!("session shuffle seed {seed}");
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: TableConfig, rng: R) -> Self {
        let player = Player::new(config.player_name.clone(), config.starting_balance);
        let dealer = Dealer::new(config.dealer_name.clone());
        let summary = SessionSummary::new(config.starting_balance);
        Self { config, player, dealer, rng, summary }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Build and shuffle a fresh shoe, then play one round with it.
    pub fn play_round(&mut self, console: &mut dyn Console) -> Result<RoundReport, GameError> {
        let mut shoe = Shoe::new();
        shoe.shuffle_with(&mut self.rng);
        self.play_round_with(shoe, console)
    }

    /// Play one round from a prepared shoe.
    pub fn play_round_with(
        &mut self,
        shoe: Shoe,
        console: &mut dyn Console,
    ) -> Result<RoundReport, GameError> {
        console.show(&TableEvent::RoundStarted { shoe_len: shoe.len() })?;
        if self.config.show_shoe {
            console.show(&TableEvent::ShoeListing(shoe.cards().to_vec()))?;
        }
        if self.player.balance().is_zero() {
            log::warn!("player has no funds left; only a zero bet can be placed");
        }
        let report = Round::play(&mut self.player, &mut self.dealer, shoe, console)?;
        self.summary.record(&report, self.player.balance());
        Ok(report)
    }

    /// Play rounds until the player declines another one or input closes.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<SessionSummary, GameError> {
        loop {
            match self.play_round(console) {
                Ok(_) => {}
                Err(GameError::InputClosed) => break,
                Err(err) => return Err(err),
            }
            match ask_play_again(console) {
                Ok(true) => {}
                Ok(false) | Err(GameError::InputClosed) => break,
                Err(err) => return Err(err),
            }
        }
        self.summary.balance = self.player.balance();
        log::info!(
            "session over after {} rounds, balance {}",
            self.summary.rounds_played,
            self.summary.balance
        );
        console.show(&TableEvent::SessionOver(self.summary.clone()))?;
        Ok(self.summary.clone())
    }
}
