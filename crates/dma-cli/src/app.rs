//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dma_core::{
  analytics::Analytics,
  error::{FieldError, ValidationErrors},
  poll::{PollHandle, Poller},
  response::Receipt,
  survey::{QUESTION_COUNT, Rating, SurveyForm},
};
use tokio::sync::mpsc;

use crate::client::ApiClient;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Filling in the assessment.
  Survey,
  /// The respondent's own result plus live community analytics.
  Results,
  /// Live community analytics only.
  Dashboard,
}

/// Which part of the survey form has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Organisation,
  /// 0-based question index.
  Question(usize),
  Submit,
}

impl Focus {
  fn next(self) -> Self {
    match self {
      Self::Organisation => Self::Question(0),
      Self::Question(i) if i + 1 < QUESTION_COUNT => Self::Question(i + 1),
      Self::Question(_) => Self::Submit,
      Self::Submit => Self::Organisation,
    }
  }

  fn prev(self) -> Self {
    match self {
      Self::Organisation => Self::Submit,
      Self::Question(0) => Self::Organisation,
      Self::Question(i) => Self::Question(i - 1),
      Self::Submit => Self::Question(QUESTION_COUNT - 1),
    }
  }
}

type Update = anyhow::Result<Analytics>;

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,
  pub focus:  Focus,

  /// Organisation name as typed.
  pub organisation: String,

  /// Chosen rating per question; `None` until the respondent picks one.
  pub ratings: [Option<u8>; QUESTION_COUNT],

  /// Result of this respondent's submission.
  pub receipt: Option<Receipt>,

  /// Most recent analytics snapshot received from the poller.
  pub analytics: Option<Analytics>,

  /// Set when the latest poll failed; cleared on the next success.
  pub refresh_error: Option<String>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,

  poller:  Poller,
  poll:    Option<PollHandle>,
  updates: Option<mpsc::UnboundedReceiver<Update>>,
}

impl App {
  pub fn new(client: ApiClient, poller: Poller) -> Self {
    Self {
      screen: Screen::Survey,
      focus: Focus::Organisation,
      organisation: String::new(),
      ratings: [None; QUESTION_COUNT],
      receipt: None,
      analytics: None,
      refresh_error: None,
      status_msg: String::new(),
      client: Arc::new(client),
      poller,
      poll: None,
      updates: None,
    }
  }

  /// Whether the analytics view is being refreshed in the background.
  pub fn is_live(&self) -> bool { self.poll.is_some() }

  // ── Form ──────────────────────────────────────────────────────────────────

  /// The form as currently filled in.
  pub fn form(&self) -> SurveyForm {
    SurveyForm {
      organisation: self.organisation.clone(),
      ratings: self.ratings.map(|r| r.map(i64::from)),
      ..SurveyForm::default()
    }
  }

  fn choose(&mut self, question: usize, value: u8) {
    if let Some(r) = Rating::new(value) {
      self.ratings[question] = Some(r.get());
    }
  }

  /// Validate locally, then submit. A failure leaves the form intact.
  async fn submit(&mut self) {
    let form = self.form();
    if let Err(errs) = form.clone().validate() {
      self.status_msg = describe_missing(&errs);
      return;
    }

    self.status_msg = "Submitting…".into();
    match self.client.submit(&form).await {
      Ok(receipt) => {
        self.receipt = Some(receipt);
        self.status_msg = String::new();
        self.open(Screen::Results).await;
      }
      Err(e) => {
        self.status_msg = format!("Error submitting survey: {e}. Please try again.");
      }
    }
  }

  // ── Polling ───────────────────────────────────────────────────────────────

  /// Switch to an analytics screen and start refreshing it.
  pub async fn open(&mut self, screen: Screen) {
    self.stop_polling().await;
    self.screen = screen;
    if screen == Screen::Survey {
      return;
    }

    let client = self.client.clone();
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = self.poller.spawn(
      move || {
        let client = client.clone();
        async move { client.analytics().await }
      },
      move |update: Update| {
        let _ = tx.send(update);
      },
    );
    self.poll = Some(handle);
    self.updates = Some(rx);
  }

  async fn stop_polling(&mut self) {
    self.updates = None;
    if let Some(handle) = self.poll.take() {
      handle.stop().await;
    }
  }

  /// Apply any snapshots delivered since the last frame.
  pub fn drain_updates(&mut self) {
    let Some(rx) = self.updates.as_mut() else { return };
    while let Ok(update) = rx.try_recv() {
      match update {
        Ok(snapshot) => {
          self.analytics = Some(snapshot);
          self.refresh_error = None;
        }
        Err(e) => self.refresh_error = Some(e.to_string()),
      }
    }
  }

  /// Stop background work before the terminal is restored.
  pub async fn shutdown(&mut self) { self.stop_polling().await; }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.screen {
      Screen::Survey => self.handle_survey_key(key).await,
      Screen::Results | Screen::Dashboard => !matches!(key.code, KeyCode::Char('q') | KeyCode::Esc),
    }
  }

  async fn handle_survey_key(&mut self, key: KeyEvent) -> bool {
    match (self.focus, key.code) {
      (_, KeyCode::Esc) => return false,
      (_, KeyCode::Tab | KeyCode::Down) => self.focus = self.focus.next(),
      (_, KeyCode::BackTab | KeyCode::Up) => self.focus = self.focus.prev(),

      // Organisation text input
      (Focus::Organisation, KeyCode::Char(c)) => self.organisation.push(c),
      (Focus::Organisation, KeyCode::Backspace) => {
        self.organisation.pop();
      }
      (Focus::Organisation, KeyCode::Enter) => self.focus = self.focus.next(),

      // Ratings
      (Focus::Question(i), KeyCode::Char(c @ '1'..='5')) => {
        self.choose(i, c as u8 - b'0');
        self.focus = self.focus.next();
      }
      (Focus::Question(i), KeyCode::Right | KeyCode::Char('l')) => {
        let next = self.ratings[i].map_or(Rating::MIN, |r| r.saturating_add(1));
        self.choose(i, next.min(Rating::MAX));
      }
      (Focus::Question(i), KeyCode::Left | KeyCode::Char('h')) => {
        let prev = self.ratings[i].map_or(Rating::MIN, |r| r.saturating_sub(1));
        self.choose(i, prev.max(Rating::MIN));
      }
      (Focus::Question(_), KeyCode::Enter) => self.focus = self.focus.next(),
      (Focus::Question(_), KeyCode::Char('q')) => return false,

      // Submit
      (Focus::Submit, KeyCode::Enter) => self.submit().await,
      (Focus::Submit, KeyCode::Char('q')) => return false,

      _ => {}
    }
    true
  }
}

/// Status-bar text naming what still has to be filled in.
pub fn describe_missing(errs: &ValidationErrors) -> String {
  let mut parts = Vec::new();
  if errs.iter().any(|e| matches!(e, FieldError::MissingOrganisation)) {
    parts.push("Please fill in all required fields (Organisation)".to_owned());
  }
  let unanswered: Vec<String> = errs
    .iter()
    .filter_map(|e| match e {
      FieldError::Unanswered { question } | FieldError::OutOfRange { question, .. } => {
        Some(format!("Question {question}"))
      }
      FieldError::MissingOrganisation => None,
    })
    .collect();
  if !unanswered.is_empty() {
    parts.push(format!("Please answer all questions. Missing: {}", unanswered.join(", ")));
  }
  parts.join(". ")
}
