use blackjack_rs::config::TableConfig;
use blackjack_rs::console::LineConsole;
use blackjack_rs::round::GameError;
use blackjack_rs::session::{Session, SessionSummary};
use blackjack_rs::tui::{logger::TuiLogger, TuiConsole};
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::LevelFilter;
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};

/// Single-player blackjack against an automated dealer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Play in the full-screen terminal UI
    #[arg(long)]
    tui: bool,

    /// Seed the shuffle for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Do not print the shuffled shoe before each round
    #[arg(long)]
    hide_shoe: bool,
}

impl Args {
    fn table_config(&self) -> TableConfig {
        let config = TableConfig::default().with_shoe_listing(!self.hide_shoe);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let terminal = (|| -> io::Result<_> {
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
        Terminal::new(CrosstermBackend::new(stdout))
    })();
    if terminal.is_err() {
        // Undo whatever part of the setup went through.
        let mut stdout = io::stdout();
        let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
    terminal
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    // Every step runs; the first failure is reported.
    let raw = disable_raw_mode();
    let screen =
        crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    raw.and(screen).and(cursor)
}

/// The session's own error wins over a failure to restore the terminal.
fn session_result_first<T>(
    session: Result<T, GameError>,
    restored: io::Result<()>,
) -> Result<T, GameError> {
    match (session, restored) {
        (Err(err), Err(restore_err)) => {
            eprintln!("blackjack-rs: failed to restore the terminal: {restore_err}");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(_), Err(restore_err)) => Err(restore_err.into()),
        (Ok(value), Ok(())) => Ok(value),
    }
}

fn run_tui(config: TableConfig) -> Result<SessionSummary, GameError> {
    let log = TuiLogger::install(LevelFilter::Info).unwrap_or_default();
    let mut console = TuiConsole::new(setup_terminal()?, log);
    let mut session = Session::new(config);
    let res = session.run(&mut console).and_then(|summary| {
        console.wait_for_dismiss()?;
        Ok(summary)
    });

    // Always attempt to restore terminal
    let restored = restore_terminal(console.into_terminal());
    session_result_first(res, restored)
}

fn run_lines(config: TableConfig) -> Result<SessionSummary, GameError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let mut console = LineConsole::stdio(io::stdout().is_terminal());
    let summary = Session::new(config).run(&mut console)?;
    Ok(summary)
}

fn main() -> Result<(), GameError> {
    let args = Args::parse();
    let config = args.table_config();

    if args.tui && io::stdout().is_terminal() {
        let summary = run_tui(config)?;
        println!("{summary}");
        return Ok(());
    }
    if args.tui {
        eprintln!("blackjack-rs TUI requires a real terminal (TTY); using the line console.");
    }
    run_lines(config).map(|_| ())
}
