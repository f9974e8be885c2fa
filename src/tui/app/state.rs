use crate::console::{HandSummary, Prompt, TableEvent};
use crate::money::Money;
use crate::round::Outcome;
use crate::session::SessionSummary;
use crate::tui::logger::LogBuffer;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Table,
    SessionOver(SessionSummary),
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    Char(char),
    Backspace,
    Submit,
    ToggleHelp,
    ToggleLog,
    /// Esc: closes the top overlay, or asks to quit when none is open.
    Close,
    Quit,
}

/// Everything the TUI renders, rebuilt from the table events it is shown.
#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub player: Option<HandSummary>,
    pub dealer: Option<HandSummary>,
    pub balance: Option<Money>,
    pub bet: Option<Money>,
    pub last_outcome: Option<(Outcome, Money)>,
    pub shoe_size: Option<usize>,
    transcript: VecDeque<String>,
    pending: Option<Prompt>,
    input: String,
    input_error: Option<String>,
    submitted: Option<String>,
    quit_requested: bool,
    help_open: bool,
    log_open: bool,
    log: LogBuffer,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LogBuffer::new())
    }
}

impl AppState {
    pub const TRANSCRIPT_LIMIT: usize = 200;
    const MAX_AMOUNT_LEN: usize = 12;

    pub fn new(log: LogBuffer) -> Self {
        Self {
            scene: Scene::Table,
            player: None,
            dealer: None,
            balance: None,
            bet: None,
            last_outcome: None,
            shoe_size: None,
            transcript: VecDeque::new(),
            pending: None,
            input: String::new(),
            input_error: None,
            submitted: None,
            quit_requested: false,
            help_open: false,
            log_open: false,
            log,
        }
    }

    /// Fold one table event into the rendered state.
    pub fn record(&mut self, event: &TableEvent) {
        match event {
            TableEvent::RoundStarted { shoe_len } => {
                self.shoe_size = Some(*shoe_len);
                self.player = None;
                self.dealer = None;
                self.bet = None;
                self.last_outcome = None;
            }
            TableEvent::Dealt { shoe_len } => {
                self.shoe_size = Some(*shoe_len);
                return;
            }
            TableEvent::ShoeListing(cards) => {
                self.push_line(format!("New shoe shuffled: {} cards", cards.len()));
                return;
            }
            TableEvent::Balance(balance) => self.balance = Some(*balance),
            TableEvent::BetAccepted(bet) => {
                self.bet = Some(*bet);
                self.last_outcome = None;
                self.input_error = None;
            }
            TableEvent::InvalidBet
            | TableEvent::BetRejected { .. }
            | TableEvent::InvalidDecision
            | TableEvent::InvalidPlayAgain => self.input_error = Some(event.to_string()),
            TableEvent::Hand(summary) => {
                // Only the player's summary carries a balance.
                if let Some(balance) = summary.balance {
                    self.balance = Some(balance);
                    self.player = Some(summary.clone());
                } else {
                    self.dealer = Some(summary.clone());
                }
                let cards: Vec<String> = summary.cards.iter().map(|c| c.to_string()).collect();
                self.push_line(format!("{}: {} ({})", summary.name, cards.join(" "), summary.score));
                return;
            }
            TableEvent::PlayerDrew(_) | TableEvent::DealerDrew(_) => {
                if let Some(shoe) = self.shoe_size.as_mut() {
                    *shoe = shoe.saturating_sub(1);
                }
            }
            TableEvent::Settled { outcome, payout } => {
                self.last_outcome = Some((*outcome, *payout));
            }
            TableEvent::SessionOver(summary) => {
                self.scene = Scene::SessionOver(summary.clone());
                return;
            }
            _ => {}
        }
        self.push_line(event.to_string());
    }

    fn push_line(&mut self, line: String) {
        self.transcript.push_back(line);
        while self.transcript.len() > Self::TRANSCRIPT_LIMIT {
            self.transcript.pop_front();
        }
    }

    pub fn transcript(&self) -> impl Iterator<Item = &str> {
        self.transcript.iter().map(String::as_str)
    }

    pub fn log_lines(&self, n: usize) -> Vec<String> {
        self.log.recent(n)
    }

    /// Start waiting for an answer to `prompt`.
    pub fn begin_prompt(&mut self, prompt: Prompt) {
        self.pending = Some(prompt);
        self.input.clear();
        self.submitted = None;
    }

    pub fn pending_prompt(&self) -> Option<Prompt> {
        self.pending
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    pub fn input_error(&self) -> Option<&str> {
        self.input_error.as_deref()
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn log_open(&self) -> bool {
        self.log_open
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// The submitted answer, ending the pending prompt.
    pub fn take_submitted(&mut self) -> Option<String> {
        let answer = self.submitted.take();
        if answer.is_some() {
            self.pending = None;
            self.input.clear();
            self.input_error = None;
        }
        answer
    }

    /// Apply an input action. Returns true when it submitted an answer.
    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleHelp => {
                self.log_open = false;
                self.help_open = !self.help_open;
                false
            }
            InputAction::ToggleLog => {
                self.help_open = false;
                self.log_open = !self.log_open;
                false
            }
            InputAction::Close => {
                if self.help_open {
                    self.help_open = false;
                } else if self.log_open {
                    self.log_open = false;
                } else {
                    self.quit_requested = true;
                }
                false
            }
            InputAction::Quit => {
                self.quit_requested = true;
                false
            }
            _ if self.help_open || self.log_open => false,
            InputAction::Backspace => {
                self.input.pop();
                false
            }
            InputAction::Char(c) => self.answer_char(c),
            InputAction::Submit => match self.pending {
                Some(Prompt::Bet { .. }) => {
                    self.submitted = Some(self.input.clone());
                    true
                }
                _ => false,
            },
        }
    }

    // Bets are typed then submitted; letter prompts answer on the keypress.
    fn answer_char(&mut self, c: char) -> bool {
        match self.pending {
            Some(Prompt::Bet { .. }) => {
                let accepted = c.is_ascii_digit() || matches!(c, '.' | '-' | '+');
                if accepted && self.input.len() < Self::MAX_AMOUNT_LEN {
                    self.input.push(c);
                }
                false
            }
            Some(_) => {
                self.submitted = Some(c.to_string());
                true
            }
            None => false,
        }
    }
}
