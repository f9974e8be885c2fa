use crate::console::{Console, Prompt, TableEvent};
use crate::tui::app::{AppState, InputAction};
use crate::tui::logger::LogBuffer;
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

/// [`Console`] that renders the table full-screen and answers prompts from
/// key presses. Blocks inside [`Console::prompt`] until the prompt is
/// answered or the user quits.
pub struct TuiConsole {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    app: AppState,
    tick_rate: Duration,
}

impl TuiConsole {
    pub fn new(terminal: Terminal<CrosstermBackend<Stdout>>, log: LogBuffer) -> Self {
        Self { terminal, app: AppState::new(log), tick_rate: Duration::from_millis(250) }
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }

    pub fn into_terminal(self) -> Terminal<CrosstermBackend<Stdout>> {
        self.terminal
    }

    fn draw(&mut self) -> io::Result<()> {
        let app = &self.app;
        self.terminal.draw(|f| ui::draw(f, app))?;
        Ok(())
    }

    fn next_action(&mut self) -> io::Result<Option<InputAction>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(&self.app, key)),
            _ => Ok(None),
        }
    }

    /// Keep the final screen up until any key is pressed.
    pub fn wait_for_dismiss(&mut self) -> io::Result<()> {
        loop {
            self.draw()?;
            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        return Ok(());
                    }
                }
            }
        }
    }
}

impl Console for TuiConsole {
    fn show(&mut self, event: &TableEvent) -> io::Result<()> {
        self.app.record(event);
        self.draw()
    }

    fn prompt(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        self.app.begin_prompt(*prompt);
        loop {
            // Redraw every tick so the log overlay stays current.
            self.draw()?;
            if let Some(action) = self.next_action()? {
                if self.app.handle_input(action) {
                    return Ok(self.app.take_submitted());
                }
                if self.app.quit_requested() {
                    log::info!("player left the table");
                    return Ok(None);
                }
            }
        }
    }
}

/// Translate a key press into an input action for `app`.
pub fn map_key(app: &AppState, key: KeyEvent) -> Option<InputAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputAction::Quit);
    }
    match key.code {
        KeyCode::Char('?') => Some(InputAction::ToggleHelp),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(InputAction::ToggleLog),
        KeyCode::Esc => Some(InputAction::Close),
        _ if app.help_open() || app.log_open() => None,
        KeyCode::Enter => Some(InputAction::Submit),
        KeyCode::Backspace => Some(InputAction::Backspace),
        KeyCode::Char(c) => Some(InputAction::Char(c)),
        _ => None,
    }
}
