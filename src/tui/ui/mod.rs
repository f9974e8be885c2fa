mod layout;
mod table;

use crate::tui::app::{AppState, Scene};
use ratatui::prelude::Frame;

pub fn draw(f: &mut Frame, app: &AppState) {
    match &app.scene {
        Scene::Table => table::draw_table(f, app),
        Scene::SessionOver(summary) => table::draw_session_over(f, summary),
    }
}
