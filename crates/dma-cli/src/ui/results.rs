//! Results screen: the respondent's score and rubric beside live community
//! analytics.

use dma_core::questionnaire::Questionnaire;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{app::App, ui::analytics};

/// Render the results screen into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
    .split(area);

  draw_own_result(f, cols[0], app);
  analytics::draw(f, cols[1], app);
}

fn draw_own_result(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Your Results ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let Some(receipt) = app.receipt else {
    f.render_widget(Paragraph::new("No submission yet.").block(block), area);
    return;
  };

  let mut lines = vec![
    Line::from(Span::styled(
      format!("{}/25", receipt.total_score),
      Style::default()
        .fg(Color::Rgb(0x66, 0x7e, 0xea))
        .add_modifier(Modifier::BOLD),
    ))
    .centered(),
    Line::from(Span::styled(
      receipt.maturity_level.label(),
      Style::default().add_modifier(Modifier::BOLD),
    ))
    .centered(),
    Line::from(""),
    Line::from(Span::styled(
      "Scoring Rubric",
      Style::default().add_modifier(Modifier::UNDERLINED),
    )),
  ];

  for band in Questionnaire::standard().rubric {
    let own = band.level == receipt.maturity_level;
    let range = if band.min_score == band.max_score {
      format!("{} points", band.min_score)
    } else {
      format!("{}-{} points", band.min_score, band.max_score)
    };
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let (heading, body) = if own {
      (heading.fg(Color::Green), Style::default().fg(Color::Green))
    } else {
      (heading, Style::default().fg(Color::Gray))
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      format!("{} ({range})", band.level),
      heading,
    )));
    lines.push(Line::from(Span::styled(band.description, body)));
  }

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
    area,
  );
}
