use crate::cards::Card;
use crate::console::{HandSummary, Prompt};
use crate::session::SessionSummary;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

const CARD_WIDTH: u16 = 7;

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(5), // dealer
            Constraint::Length(5), // player
            Constraint::Min(3),    // transcript
            Constraint::Length(4), // status bar
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    draw_seat(f, chunks[1], app.dealer.as_ref(), "Dealer", Color::Magenta);
    draw_seat(f, chunks[2], app.player.as_ref(), "Player", Color::Cyan);
    draw_transcript(f, chunks[3], app);
    draw_status(f, chunks[4], app);

    if app.help_open() {
        draw_help(f);
    } else if app.log_open() {
        draw_log(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let money = |m: Option<crate::money::Money>| m.map(|m| format!("${m}")).unwrap_or("--".into());
    let shoe = app.shoe_size.map(|n| n.to_string()).unwrap_or("--".into());
    let mut spans = vec![Span::raw(format!(
        "Balance: {}   Bet: {}   Shoe: {} cards",
        money(app.balance),
        money(app.bet),
        shoe
    ))];
    if let Some((outcome, payout)) = app.last_outcome {
        let color = if outcome.player_wins() { Color::Green } else { Color::Red };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("Last: {} (+${payout})", outcome.announcement()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }
    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().title("blackjack-rs").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_seat(f: &mut Frame, area: Rect, seat: Option<&HandSummary>, role: &str, color: Color) {
    let title = match seat {
        Some(s) => format!("{role}: {}  [score {}]", s.name, s.score),
        None => role.to_string(),
    };
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if seat.is_some_and(|s| s.score > crate::hand::BLACKJACK) {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    } else {
        block = block.border_style(Style::default().fg(color));
    }
    f.render_widget(block, area);

    let cards = seat.map(|s| s.cards.as_slice()).unwrap_or(&[]);
    let inner_area = inner(area);
    if cards.is_empty() {
        let dim = Style::default().add_modifier(Modifier::DIM);
        f.render_widget(Paragraph::new(Span::styled("no cards", dim)), inner_area);
        return;
    }
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(cards.iter().map(|_| Constraint::Length(CARD_WIDTH)).collect::<Vec<_>>())
        .split(inner_area);
    for (card, slot) in cards.iter().zip(slots.iter()) {
        render_card_widget(f, *slot, *card);
    }
}

fn draw_transcript(f: &mut Frame, area: Rect, app: &AppState) {
    let visible = usize::from(area.height.saturating_sub(2));
    let lines: Vec<&str> = app.transcript().collect();
    let tail = &lines[lines.len().saturating_sub(visible)..];
    let para = Paragraph::new(tail.iter().map(|l| Line::from(*l)).collect::<Vec<_>>())
        .block(Block::default().title("Table").borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(inner(area));

    let mut left: Vec<Line> = Vec::with_capacity(2);
    match app.pending_prompt() {
        Some(prompt @ Prompt::Bet { .. }) => left.push(Line::from(vec![
            Span::raw(prompt.text()),
            Span::styled(app.input_text(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])),
        Some(prompt) => left.push(Line::from(prompt.text())),
        None => left.push(Line::from(Span::styled(
            "Dealing...",
            Style::default().add_modifier(Modifier::DIM),
        ))),
    }
    if let Some(err) = app.input_error() {
        left.push(Line::from(Span::styled(err, Style::default().fg(Color::Yellow))));
    }

    let right = vec![Line::from(""), Line::from("? help • L log • Esc quit")];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Betting:", bold)),
        Line::from("- 0-9 and '.': type the amount"),
        Line::from("- Backspace: delete"),
        Line::from("- Enter: place the bet"),
        Line::from(""),
        Line::from(Span::styled("Your turn:", bold)),
        Line::from("- H: hit"),
        Line::from("- S: stand"),
        Line::from(""),
        Line::from(Span::styled("After a round:", bold)),
        Line::from("- Y / N: play again or leave"),
        Line::from(""),
        Line::from("- L: log • Esc or Ctrl-C: leave the table"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let block = Block::default().title("Help").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_log(f: &mut Frame, app: &AppState) {
    let area = centered_rect(80, 70, f.area());
    let visible = usize::from(area.height.saturating_sub(3));
    let mut lines: Vec<Line> = app.log_lines(visible).into_iter().map(Line::from).collect();
    if lines.is_empty() {
        lines.push(Line::from("No log records yet."));
    }
    lines.push(Line::from(Span::styled(
        "Close: L or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let block = Block::default().title("Log").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), inner(area));
}

pub(super) fn draw_session_over(f: &mut Frame, summary: &SessionSummary) {
    let area = centered_rect(60, 60, f.area());
    let net_color = if summary.balance >= summary.starting_balance { Color::Green } else { Color::Red };
    let mut lines: Vec<Line> = summary.to_string().lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("You leave the table with ${}", summary.balance),
        Style::default().fg(net_color).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "Press any key to exit",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let block = Block::default().title("Session over").borders(Borders::ALL);
    f.render_widget(Clear, f.area());
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), inner(area));
}

fn suit_style(card: Card) -> Style {
    if card.suit().is_red() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_card_widget(f: &mut Frame, area: Rect, card: Card) {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = inner(area);
    f.render_widget(block, area);
    let text = Line::from(Span::styled(card.to_string(), suit_style(card)));
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner_area);
}
