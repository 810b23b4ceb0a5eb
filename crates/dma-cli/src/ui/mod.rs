//! TUI rendering. Orchestrates all panes.

pub mod analytics;
pub mod results;
pub mod survey_form;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Survey => survey_form::draw(f, rows[1], app),
    Screen::Results => results::draw(f, rows[1], app),
    Screen::Dashboard => analytics::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " DMA Survey · Data Maturity Assessment",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let live = if app.is_live() {
    Span::styled(" ● LIVE ", Style::default().fg(Color::Black).bg(Color::Green))
  } else {
    Span::raw("")
  };
  let right = Span::styled(
    format!(" {date} "),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let used = (left.content.chars().count()
    + live.content.chars().count()
    + right.content.chars().count()) as u16;
  let pad = area.width.saturating_sub(used);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    live,
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.screen {
    Screen::Survey => (
      "SURVEY",
      "Tab/↑↓ move  1-5 rate  ←→ adjust  Enter submit  Esc quit",
    ),
    Screen::Results => ("RESULTS", "Updates every few seconds  q quit"),
    Screen::Dashboard => ("ANALYTICS", "Updates every few seconds  q quit"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
