//! Full-screen Ratatui frontend. [`TuiConsole`] implements the same
//! [`Console`](crate::console::Console) boundary as the line console, so the
//! rules engine runs unchanged underneath it.

pub mod app;
pub mod controller;
pub mod logger;
mod ui;

pub use controller::TuiConsole;
