//! Community analytics pane: headline metrics, level distribution, question
//! averages and the most recent responses.

use dma_core::{analytics::Analytics, scoring::MaturityLevel};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{BarChart, Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::App;

/// Render the analytics pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Community Analytics ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(analytics) = &app.analytics else {
    let msg = app
      .refresh_error
      .as_deref()
      .map_or_else(|| "Loading…".to_owned(), |e| format!("Error: {e}"));
    f.render_widget(
      Paragraph::new(msg).style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  if analytics.is_empty() {
    let msg = if app.receipt.is_some() {
      "You are the first participant! More analytics will be available as \
       others complete the survey."
    } else {
      "No survey responses yet. More analytics will be available as users \
       complete the survey."
    };
    f.render_widget(
      Paragraph::new(msg)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Cyan)),
      inner,
    );
    return;
  }

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(2),  // metrics
      Constraint::Length(10), // distribution
      Constraint::Length(7),  // question averages
      Constraint::Min(0),     // recent responses
    ])
    .split(inner);

  draw_metrics(f, rows[0], analytics, app.refresh_error.as_deref());
  draw_distribution(f, rows[1], analytics);
  draw_question_averages(f, rows[2], analytics);
  draw_recent(f, rows[3], analytics);
}

fn draw_metrics(f: &mut Frame, area: Rect, a: &Analytics, error: Option<&str>) {
  let stats = &a.statistics;
  let bold = Style::default().add_modifier(Modifier::BOLD);
  let mut spans = vec![
    Span::raw("Total Responses "),
    Span::styled(stats.total_responses.to_string(), bold),
    Span::raw("   Average Score "),
    Span::styled(format!("{:.2}/25", stats.average_score), bold),
    Span::raw(format!("   Range {}–{}", stats.min_score, stats.max_score)),
  ];
  if let Some(e) = error {
    spans.push(Span::styled(
      format!("   (stale: {e})"),
      Style::default().fg(Color::Red),
    ));
  }
  let updated = Line::from(Span::styled(
    format!(
      "updated {}",
      a.taken_at.with_timezone(&chrono::Local).format("%H:%M:%S")
    ),
    Style::default().fg(Color::DarkGray),
  ));
  f.render_widget(Paragraph::new(vec![Line::from(spans), updated]), area);
}

fn short_label(level: MaturityLevel) -> &'static str {
  level.label().trim_end_matches(" Level")
}

fn draw_distribution(f: &mut Frame, area: Rect, a: &Analytics) {
  let bars: Vec<(&str, u64)> = a
    .distribution
    .iter()
    .map(|lc| (short_label(lc.level), lc.count))
    .collect();

  let chart = BarChart::default()
    .block(Block::default().title("Maturity Level Distribution"))
    .data(bars.as_slice())
    .bar_width(11)
    .bar_gap(2)
    .bar_style(Style::default().fg(Color::Rgb(0x76, 0x4b, 0xa2)))
    .value_style(
      Style::default()
        .fg(Color::White)
        .bg(Color::Rgb(0x76, 0x4b, 0xa2))
        .add_modifier(Modifier::BOLD),
    );
  f.render_widget(chart, area);
}

fn draw_question_averages(f: &mut Frame, area: Rect, a: &Analytics) {
  let mut lines = vec![Line::from(Span::styled(
    "Average rating per question",
    Style::default().add_modifier(Modifier::BOLD),
  ))];
  for (i, avg) in a.statistics.question_averages.iter().enumerate() {
    let filled = (avg * 4.0).round() as usize;
    lines.push(Line::from(vec![
      Span::raw(format!("Q{}  {avg:.2}  ", i + 1)),
      Span::styled("█".repeat(filled), Style::default().fg(Color::Cyan)),
    ]));
  }
  f.render_widget(Paragraph::new(lines), area);
}

fn draw_recent(f: &mut Frame, area: Rect, a: &Analytics) {
  let block = Block::default()
    .title(" Recent Responses ")
    .borders(Borders::TOP)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = a
    .responses
    .iter()
    .map(|r| {
      let when = r.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M");
      ListItem::new(Line::from(vec![
        Span::styled(format!("{when}  "), Style::default().fg(Color::DarkGray)),
        Span::styled(
          format!("{:<28}", r.organisation),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{:>2}/25  ", r.total_score)),
        Span::styled(
          r.maturity_level.label(),
          Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ),
      ]))
    })
    .collect();

  f.render_widget(List::new(items).block(block), area);
}
