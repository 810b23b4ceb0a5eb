//! `dma`: terminal client for the DMA survey.
//!
//! # Usage
//!
//! ```
//! dma --url http://localhost:8080
//! dma --dashboard --interval 5
//! dma --config ~/.config/dma/config.toml
//! ```

mod app;
mod client;
mod ui;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use app::{App, Screen};
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dma_core::poll::{DEFAULT_INTERVAL, Poller};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "dma", about = "Terminal client for the DMA survey")]
struct Args {
  /// Path to a TOML config file (url, interval_secs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the survey server (default: http://localhost:8080).
  #[arg(long, env = "DMA_URL")]
  url: Option<String>,

  /// Seconds between analytics refreshes (default: 3).
  #[arg(long, env = "DMA_REFRESH_SECS", value_parser = clap::value_parser!(u64).range(1..))]
  interval: Option<u64>,

  /// Skip the survey and open the live analytics view.
  #[arg(long)]
  dashboard: bool,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:           String,
  #[serde(default)]
  interval_secs: Option<u64>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
  };
  let interval = args
    .interval
    .or(file_cfg.interval_secs)
    .filter(|s| *s > 0)
    .map_or(DEFAULT_INTERVAL, Duration::from_secs);

  let client = ApiClient::new(api_config)?;
  let mut app = App::new(client, Poller::new(interval));
  if args.dashboard {
    app.open(Screen::Dashboard).await;
  }

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;
  app.shutdown().await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    app.drain_updates();
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await
    {
      break;
    }
  }

  Ok(())
}
