//! One formatting pass over the active document.
//!
//! The pass is synchronous: resolve the settings snapshot, hand the captured
//! text to the engine, write the result back if it differs, restore the
//! cursor, and pick the notice to show. The orchestrator does no text work of
//! its own, so running it twice with a well-behaved engine leaves the second
//! pass a no-op.
//!
//! Cursor restoration reapplies the (line, column) captured before the pass.
//! Lines inserted or removed above the cursor are not accounted for, so the
//! restored position may point at different content afterwards.

use std::{
  fmt,
  sync::{
    Arc,
    atomic::{
      AtomicBool,
      Ordering,
    },
  },
};

use crate::{
  document::{
    DocumentState,
    EditorDocument,
  },
  engine::FormattingEngine,
  messages::{
    NoticeText,
    Notification,
  },
  settings::SettingsSnapshot,
};

#[derive(Clone)]
pub struct FormatOrchestrator {
  engine:    Arc<dyn FormattingEngine>,
  text:      NoticeText,
  in_flight: Arc<AtomicBool>,
}

impl fmt::Debug for FormatOrchestrator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FormatOrchestrator")
      .field("text", &self.text)
      .field("in_flight", &self.is_busy())
      .finish_non_exhaustive()
  }
}

/// Clears the in-flight flag when the pass ends, including on unwind.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::Release);
  }
}

impl FormatOrchestrator {
  pub fn new<E: FormattingEngine + 'static>(engine: E) -> Self {
    Self::from_arc(Arc::new(engine))
  }

  pub fn from_arc(engine: Arc<dyn FormattingEngine>) -> Self {
    Self {
      engine,
      text: NoticeText::default(),
      in_flight: Arc::new(AtomicBool::new(false)),
    }
  }

  pub fn with_text(mut self, text: NoticeText) -> Self {
    self.text = text;
    self
  }

  pub fn text(&self) -> &NoticeText {
    &self.text
  }

  /// Whether a pass is running. Clones share this flag.
  pub fn is_busy(&self) -> bool {
    self.in_flight.load(Ordering::Acquire)
  }

  fn begin(&self) -> Option<InFlight<'_>> {
    self
      .in_flight
      .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
      .ok()
      .map(|_| InFlight(&self.in_flight))
  }

  /// Format `doc`, whose contents and cursor were captured as `state`, with
  /// the given settings.
  ///
  /// Returns the notice to show, or `None` when another pass is still
  /// running (the request is dropped). On any failure the document is left
  /// untouched.
  pub fn format_active_document<D>(
    &self,
    doc: &mut D,
    state: DocumentState,
    settings: &SettingsSnapshot,
  ) -> Option<Notification>
  where
    D: EditorDocument + ?Sized,
  {
    let Some(_pass) = self.begin() else {
      tracing::warn!("format requested while a pass is already running, ignoring");
      return None;
    };

    let config = match settings.resolve(&self.engine.default_gaps()) {
      Ok(config) => config,
      Err(err) => {
        tracing::warn!("cannot resolve settings: {err}");
        let notice = err.notice(settings.show_more_detailed_error_messages());
        return Some(Notification::FormatFailure(notice));
      },
    };

    let formatted = match self.engine.format(&state.text, &config) {
      Ok(formatted) => formatted,
      Err(err) => {
        tracing::warn!("formatting engine failed: {err}");
        return Some(Notification::FormatFailure(err.message().to_string()));
      },
    };

    let changed = formatted != state.text;
    if changed {
      doc.replace_text(&formatted);
      doc.set_cursor(state.cursor);
    }
    tracing::debug!(changed, cursor = ?state.cursor, "document formatted");

    let notification = if settings.notify_when_unchanged() && !changed {
      Notification::FormatNoOpSuccess(self.text.already_formatted.clone())
    } else {
      Notification::FormatSuccess(self.text.formatted.clone())
    };
    Some(notification)
  }
}
