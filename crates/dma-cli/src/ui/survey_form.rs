//! Survey form: organisation input, five rating rows, submit button.

use dma_core::{questionnaire::QUESTIONS, survey::Rating};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Focus};

const ACCENT: Color = Color::Rgb(0x66, 0x7e, 0xea);

/// Render the survey form into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let mut constraints = vec![Constraint::Length(3)]; // organisation
  constraints.extend(QUESTIONS.iter().map(|_| Constraint::Min(4)));
  constraints.push(Constraint::Length(3)); // submit

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints(constraints)
    .split(area);

  draw_organisation(f, rows[0], app);
  for (i, text) in QUESTIONS.iter().enumerate() {
    draw_question(f, rows[i + 1], app, i, text);
  }
  draw_submit(f, rows[QUESTIONS.len() + 1], app);
}

fn border_style(focused: bool) -> Style {
  if focused {
    Style::default().fg(ACCENT)
  } else {
    Style::default().fg(Color::DarkGray)
  }
}

fn draw_organisation(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.focus == Focus::Organisation;
  let block = Block::default()
    .title(" Organisation * ")
    .borders(Borders::ALL)
    .border_style(border_style(focused));

  let text = if app.organisation.is_empty() && !focused {
    Line::from(Span::styled(
      "Your organisation name",
      Style::default().fg(Color::DarkGray),
    ))
  } else {
    let cursor = if focused { "▏" } else { "" };
    Line::from(format!("{}{cursor}", app.organisation))
  };
  f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_question(f: &mut Frame, area: Rect, app: &App, index: usize, text: &str) {
  let focused = app.focus == Focus::Question(index);
  let block = Block::default()
    .title(format!(" Question {} ", index + 1))
    .borders(Borders::ALL)
    .border_style(border_style(focused));

  let chosen = app.ratings[index];
  let mut scale: Vec<Span> = (Rating::MIN..=Rating::MAX)
    .map(|v| {
      let style = if chosen == Some(v) {
        Style::default()
          .fg(Color::White)
          .bg(ACCENT)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      Span::styled(format!(" {v} "), style)
    })
    .flat_map(|s| [s, Span::raw(" ")])
    .collect();

  scale.push(match chosen {
    Some(v) => Span::styled(
      format!("  Selected: {v}/5"),
      Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ),
    None => Span::styled(
      "  Please select a rating",
      Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC),
    ),
  });

  let lines = vec![Line::from(text.to_owned()), Line::from(scale)];
  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
    area,
  );
}

fn draw_submit(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.focus == Focus::Submit;
  let style = if focused {
    Style::default()
      .fg(Color::White)
      .bg(ACCENT)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Gray)
  };
  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(border_style(focused));
  f.render_widget(
    Paragraph::new(Line::from(Span::styled("  Submit Survey  ", style)))
      .centered()
      .block(block),
    area,
  );
}
