//! The boundary between the rules engine and whoever is sitting at the table.
//!
//! The round and session logic never print or read directly. They emit
//! [`TableEvent`]s and ask [`Prompt`]s through a [`Console`]. Two consoles
//! ship with the library: [`LineConsole`] for a plain terminal transcript and
//! [`ScriptedConsole`] for driving games from tests. The Ratatui frontend in
//! [`crate::tui`] is a third.

use crate::cards::Card;
use crate::money::{Money, MoneyParseError};
use crate::participant::Decision;
use crate::round::Outcome;
use crate::session::SessionSummary;
use crossterm::style::Stylize;
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};

/// A question the table needs answered before play can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Prompt {
    Bet { balance: Money },
    HitOrStand,
    PlayAgain,
}

impl Prompt {
    pub fn text(&self) -> &'static str {
        match self {
            Prompt::Bet { .. } => "How much would you like to bet? ",
            Prompt::HitOrStand => "Enter H to hit, S to stand: ",
            Prompt::PlayAgain => "Play again? Y/N: ",
        }
    }
}

/// Who holds what, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandSummary {
    pub name: String,
    pub cards: Vec<Card>,
    pub score: u8,
    pub balance: Option<Money>,
}

impl fmt::Display for HandSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        writeln!(f, "\t{}", "-".repeat(60))?;
        writeln!(f, "\tWho:  {}", self.name)?;
        writeln!(f, "\tHand: {}", cards.join(" "))?;
        write!(f, "\tScore: {}", self.score)?;
        if let Some(balance) = self.balance {
            write!(f, "\n\tBalance: ${balance}")?;
        }
        Ok(())
    }
}

/// Everything the table announces during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableEvent {
    /// A round is about to start from a shoe of `shoe_len` cards.
    RoundStarted { shoe_len: usize },
    /// The freshly shuffled shoe, bottom card first.
    ShoeListing(Vec<Card>),
    Balance(Money),
    InvalidBet,
    BetRejected { bet: Money, balance: Money },
    BetAccepted(Money),
    InvalidDecision,
    InvalidPlayAgain,
    /// The opening four cards are out.
    Dealt { shoe_len: usize },
    Hand(HandSummary),
    PlayerDrew(Card),
    PlayerStood,
    DealerDrew(Card),
    DealerStands,
    Settled { outcome: Outcome, payout: Money },
    /// Follows a settlement decided by the dealer's own draw.
    WinnerDecided,
    SessionOver(SessionSummary),
}

impl TableEvent {
    /// Bookkeeping events a transcript can skip.
    pub fn is_status(&self) -> bool {
        matches!(self, TableEvent::RoundStarted { .. } | TableEvent::Dealt { .. })
    }
}

impl fmt::Display for TableEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableEvent::RoundStarted { shoe_len } => {
                write!(f, "New round: {shoe_len} cards in the shoe.")
            }
            TableEvent::Dealt { shoe_len } => write!(f, "Dealt; {shoe_len} cards left in the shoe."),
            TableEvent::ShoeListing(cards) => {
                let lines: Vec<String> = cards.iter().map(Card::to_string).collect();
                write!(f, "{}", lines.join("\n"))
            }
            TableEvent::Balance(balance) => write!(f, "You have ${balance}"),
            TableEvent::InvalidBet => write!(f, "Whoops. Something went wrong. Try again."),
            TableEvent::BetRejected { bet, balance } => {
                write!(f, "You cannot bet ${bet}, as you only have ${balance}")
            }
            TableEvent::BetAccepted(bet) => write!(f, "Thank you for betting ${bet}"),
            TableEvent::InvalidDecision => write!(f, "H and S are the only valid choices."),
            TableEvent::InvalidPlayAgain => write!(f, "Y and N are the only valid choices."),
            TableEvent::Hand(summary) => write!(f, "{summary}"),
            TableEvent::PlayerDrew(card) => write!(f, "You drew:  {card}"),
            TableEvent::PlayerStood => write!(f, "You chose to stand."),
            TableEvent::DealerDrew(card) => write!(f, "Dealer drew:  {card}"),
            TableEvent::DealerStands => write!(f, "Dealer stands."),
            TableEvent::Settled { outcome, .. } => write!(f, "{}", outcome.announcement()),
            TableEvent::WinnerDecided => write!(f, "We have a winner."),
            TableEvent::SessionOver(summary) => write!(f, "{summary}"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BetError {
    #[error("invalid bet: {0}")]
    Invalid(#[from] MoneyParseError),
    #[error("bet ${bet} exceeds balance ${balance}")]
    ExceedsBalance { bet: Money, balance: Money },
}

impl From<BetError> for TableEvent {
    fn from(err: BetError) -> Self {
        match err {
            BetError::Invalid(_) => TableEvent::InvalidBet,
            BetError::ExceedsBalance { bet, balance } => TableEvent::BetRejected { bet, balance },
        }
    }
}

/// Validate a typed wager against the current balance. A bet of zero is
/// accepted.
pub fn parse_bet(input: &str, balance: Money) -> Result<Money, BetError> {
    let bet: Money = input.parse()?;
    if bet > balance {
        return Err(BetError::ExceedsBalance { bet, balance });
    }
    Ok(bet)
}

/// `H`/`h` hits, `S`/`s` stands, anything else is rejected.
pub fn parse_decision(input: &str) -> Option<Decision> {
    match input.trim() {
        "H" | "h" => Some(Decision::Hit),
        "S" | "s" => Some(Decision::Stand),
        _ => None,
    }
}

/// `Y`/`y` continues, `N`/`n` stops, anything else is rejected.
pub fn parse_play_again(input: &str) -> Option<bool> {
    match input.trim() {
        "Y" | "y" => Some(true),
        "N" | "n" => Some(false),
        _ => None,
    }
}

/// The interactive collaborator the table talks to.
pub trait Console {
    /// Present an event to the human.
    fn show(&mut self, event: &TableEvent) -> io::Result<()>;

    /// Block until the human answers `prompt`. `Ok(None)` means no more input
    /// will ever arrive.
    fn prompt(&mut self, prompt: &Prompt) -> io::Result<Option<String>>;
}

/// Line-by-line terminal console: events are printed, answers are read one
/// line at a time.
#[derive(Debug)]
pub struct LineConsole<R, W> {
    reader: R,
    writer: W,
    styled: bool,
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    /// Console on the process's stdin/stdout. Outcomes are colored when
    /// `styled` is set.
    pub fn stdio(styled: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), styled)
    }
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(reader: R, writer: W, styled: bool) -> Self {
        Self { reader, writer, styled }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn render(&self, event: &TableEvent) -> String {
        let text = event.to_string();
        if !self.styled {
            return text;
        }
        match event {
            TableEvent::Settled { outcome, .. } if outcome.player_wins() => {
                text.green().bold().to_string()
            }
            TableEvent::Settled { .. } => text.red().bold().to_string(),
            TableEvent::InvalidBet
            | TableEvent::BetRejected { .. }
            | TableEvent::InvalidDecision
            | TableEvent::InvalidPlayAgain => text.yellow().to_string(),
            TableEvent::ShoeListing(_) => text.dim().to_string(),
            _ => text,
        }
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn show(&mut self, event: &TableEvent) -> io::Result<()> {
        if event.is_status() {
            return Ok(());
        }
        let line = self.render(event);
        writeln!(self.writer, "{line}")
    }

    fn prompt(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt.text())?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Console fed from a fixed list of answers. Records every prompt and event,
/// and reports closed input once the answers run out.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<Prompt>,
    events: Vec<TableEvent>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn push_input(&mut self, input: impl Into<String>) {
        self.inputs.push_back(input.into());
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn events(&self) -> &[TableEvent] {
        &self.events
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn show(&mut self, event: &TableEvent) -> io::Result<()> {
        self.events.push(event.clone());
        Ok(())
    }

    fn prompt(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        self.prompts.push(*prompt);
        Ok(self.inputs.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use std::io::Cursor;

    #[test]
    fn bet_validation() {
        let balance = Money::from_whole(100);
        assert_eq!(parse_bet("100", balance), Ok(balance));
        assert_eq!(parse_bet("0", balance), Ok(Money::ZERO));
        assert!(matches!(parse_bet("abc", balance), Err(BetError::Invalid(_))));
        assert_eq!(
            parse_bet("100.01", balance),
            Err(BetError::ExceedsBalance { bet: Money::from_cents(10001), balance })
        );
    }

    #[test]
    fn single_letter_choices() {
        assert_eq!(parse_decision("h"), Some(Decision::Hit));
        assert_eq!(parse_decision(" S "), Some(Decision::Stand));
        assert_eq!(parse_decision("stand"), None);
        assert_eq!(parse_decision(""), None);
        assert_eq!(parse_play_again("Y"), Some(true));
        assert_eq!(parse_play_again("n"), Some(false));
        assert_eq!(parse_play_again("yes"), None);
    }

    #[test]
    fn hand_summary_layout() {
        let summary = HandSummary {
            name: "You".to_string(),
            cards: vec![Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::Six, Suit::Spades)],
            score: 17,
            balance: Some(Money::from_whole(9900)),
        };
        let text = summary.to_string();
        assert!(text.contains("\tWho:  You"));
        assert!(text.contains("\tHand: A♥ 6♠"));
        assert!(text.contains("\tScore: 17"));
        assert!(text.ends_with("\tBalance: $9900.00"));
    }

    #[test]
    fn line_console_reads_lines_and_reports_eof() {
        let input = Cursor::new("25\r\nh\n");
        let mut console = LineConsole::new(input, Vec::new(), false);
        let bet = Prompt::Bet { balance: Money::from_whole(100) };
        assert_eq!(console.prompt(&bet).unwrap().as_deref(), Some("25"));
        assert_eq!(console.prompt(&Prompt::HitOrStand).unwrap().as_deref(), Some("h"));
        assert_eq!(console.prompt(&Prompt::PlayAgain).unwrap(), None);
        console.show(&TableEvent::Dealt { shoe_len: 48 }).unwrap();
        console.show(&TableEvent::DealerStands).unwrap();
        let out = String::from_utf8(console.into_writer()).unwrap();
        assert!(out.starts_with("How much would you like to bet? "));
        assert!(out.ends_with("Dealer stands.\n"));
    }

    #[test]
    fn scripted_console_records_traffic() {
        let mut console = ScriptedConsole::new(["y"]);
        console.show(&TableEvent::PlayerStood).unwrap();
        assert_eq!(console.prompt(&Prompt::PlayAgain).unwrap().as_deref(), Some("y"));
        assert_eq!(console.prompt(&Prompt::PlayAgain).unwrap(), None);
        assert_eq!(console.prompts().len(), 2);
        assert_eq!(console.events(), &[TableEvent::PlayerStood]);
    }
}
