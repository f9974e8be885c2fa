use crate::money::Money;

/// Every session starts the player with this much.
pub const STARTING_BALANCE: Money = Money::from_whole(10_000);

/// Table setup for one session. Rule constants live with the round logic;
/// this only covers who sits at the table and how the shoe is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub starting_balance: Money,
    pub player_name: String,
    pub dealer_name: String,
    /// Seed for the session's shuffle RNG; `None` draws one at random.
    pub rng_seed: Option<u64>,
    /// List the shuffled shoe at the start of every round.
    pub show_shoe: bool,
}

impl TableConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_shoe_listing(mut self, show: bool) -> Self {
        self.show_shoe = show;
        self
    }

    pub fn with_starting_balance(mut self, balance: Money) -> Self {
        self.starting_balance = balance;
        self
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            player_name: "You".to_string(),
            dealer_name: "Bellagio".to_string(),
            rng_seed: None,
            show_shoe: true,
        }
    }
}
