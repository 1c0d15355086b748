use std::time::Duration;

use the_dispatch::{
  ActionContext,
  ActionRegistry,
  DispatchResult,
};
use the_formatter::{
  ActionTrigger,
  CanonicalConfig,
  ConfigurationModel,
  EditorDocument,
  EngineError,
  FORMAT_DOCUMENT,
  FormatContext,
  FormatOrchestrator,
  GapField,
  InputValidator,
  MemoryDocument,
  MessageCenter,
  MessageLevel,
  Notification,
  Notifier,
  Position,
  SettingsSurface,
};
use the_formatter_event::ManualClock;

/// Puts `before_top_level_headings` blank lines after the first heading
/// line, or fails on an unclosed code fence.
fn heading_engine(text: &str, config: &CanonicalConfig) -> Result<String, EngineError> {
  if text.matches("```").count() % 2 == 1 {
    return Err(EngineError::new("Unclosed code block."));
  }
  let Some((heading, rest)) = text.split_once('\n') else {
    return Ok(text.to_string());
  };
  let body = rest.trim_start_matches('\n');
  let gap = "\n".repeat(config.gaps.before_top_level_headings + 1);
  Ok(format!("{heading}{gap}{body}"))
}

struct Host {
  document:     Option<MemoryDocument>,
  settings:     SettingsSurface<(), ManualClock>,
  orchestrator: FormatOrchestrator,
  messages:     MessageCenter,
  clock:        ManualClock,
}

impl Host {
  fn new(document: Option<MemoryDocument>) -> Self {
    let clock = ManualClock::new();
    Self {
      document,
      settings: SettingsSurface::with_validator(
        ConfigurationModel::default(),
        (),
        InputValidator::with_clock(clock.clone()),
      ),
      orchestrator: FormatOrchestrator::new(heading_engine),
      messages: MessageCenter::default(),
      clock,
    }
  }

  fn edit(&mut self, field: GapField, value: &str) -> bool {
    self.settings.edit(field, value, &mut self.messages)
  }

  fn doc(&self) -> &MemoryDocument {
    self.document.as_ref().unwrap()
  }
}

impl ActionContext for Host {
  fn editable_document_active(&self) -> bool {
    self.document.is_some()
  }
}

impl Notifier for Host {
  fn display(&mut self, message: &str) {
    self.messages.display(message);
  }

  fn notify(&mut self, notification: &Notification) {
    self.messages.notify(notification);
  }
}

impl FormatContext for Host {
  type Document = MemoryDocument;

  fn settings(&self) -> &ConfigurationModel {
    self.settings.model()
  }

  fn orchestrator(&self) -> &FormatOrchestrator {
    &self.orchestrator
  }

  fn active_document(&mut self) -> Option<&mut MemoryDocument> {
    self.document.as_mut()
  }
}

fn registry() -> ActionRegistry<Host> {
  let mut registry = ActionRegistry::new();
  ActionTrigger::register(&mut registry);
  registry
}

#[test]
fn action_is_offered_only_with_an_editable_document() {
  let registry = registry();

  let idle = Host::new(None);
  assert!(registry.available(&idle).is_empty());

  let editing = Host::new(Some(MemoryDocument::new("")));
  let titles: Vec<_> = registry
    .available(&editing)
    .iter()
    .map(|action| action.title)
    .collect();
  assert_eq!(titles, vec!["Format Document"]);
}

#[test]
fn invoking_without_document_does_nothing() {
  let registry = registry();
  let mut host = Host::new(None);

  assert_eq!(
    registry.invoke(FORMAT_DOCUMENT, &mut host),
    DispatchResult::Continue
  );
  assert_eq!(host.messages.history_len(), 0);
}

#[test]
fn format_action_rewrites_document_and_notifies_once() {
  let registry = registry();
  let cursor = Position::new(1, 3);
  let mut host = Host::new(Some(
    MemoryDocument::new("# A\nBody").with_cursor(cursor),
  ));
  assert!(host.edit(GapField::BeforeTopLevelHeadings, "3"));

  assert_eq!(
    registry.invoke(FORMAT_DOCUMENT, &mut host),
    DispatchResult::Handled
  );
  assert_eq!(host.doc().text(), "# A\n\n\n\nBody");
  assert_eq!(host.doc().cursor(), cursor);
  assert_eq!(host.messages.texts(), vec!["Document Formatted!"]);
  assert_eq!(host.messages.active().unwrap().level, MessageLevel::Info);
}

#[test]
fn second_invocation_reports_already_formatted() {
  let registry = registry();
  let mut host = Host::new(Some(MemoryDocument::new("# A\nBody")));

  registry.invoke(FORMAT_DOCUMENT, &mut host);
  let after_first = host.doc().text();
  registry.invoke(FORMAT_DOCUMENT, &mut host);

  assert_eq!(host.doc().text(), after_first);
  assert_eq!(host.doc().revisions(), 1);
  assert_eq!(host.messages.texts(), vec![
    "Document Formatted!",
    "Document is already formatted!"
  ]);
}

#[test]
fn settings_edits_apply_to_the_next_invocation() {
  let registry = registry();
  let mut host = Host::new(Some(MemoryDocument::new("# A\nBody")));

  assert!(host.edit(GapField::BeforeTopLevelHeadings, "0"));
  registry.invoke(FORMAT_DOCUMENT, &mut host);
  assert_eq!(host.doc().text(), "# A\nBody");

  assert!(host.edit(GapField::BeforeTopLevelHeadings, "1"));
  registry.invoke(FORMAT_DOCUMENT, &mut host);
  assert_eq!(host.doc().text(), "# A\n\nBody");
}

#[test]
fn engine_failure_is_shown_verbatim_and_document_kept() {
  let registry = registry();
  let mut host = Host::new(Some(MemoryDocument::new("# A\n```\ncode")));

  assert_eq!(
    registry.invoke(FORMAT_DOCUMENT, &mut host),
    DispatchResult::Handled
  );
  assert_eq!(host.doc().text(), "# A\n```\ncode");
  assert_eq!(host.doc().revisions(), 0);
  assert_eq!(host.messages.texts(), vec!["Unclosed code block."]);
  assert_eq!(host.messages.active().unwrap().level, MessageLevel::Error);
}

#[test]
fn invalid_edits_warn_once_per_window_and_block_formatting() {
  let registry = registry();
  let mut host = Host::new(Some(MemoryDocument::new("# A\nBody")));
  let warning = "Please enter a valid number.\nIt should be at least 0.";

  assert!(!host.edit(GapField::BeforeTopLevelHeadings, "-"));
  host.clock.advance(Duration::from_millis(200));
  assert!(!host.edit(GapField::BeforeTopLevelHeadings, "-1"));
  host.clock.advance(Duration::from_millis(200));
  assert!(!host.edit(GapField::BeforeSubHeadings, "x"));
  assert_eq!(host.messages.texts(), vec![warning]);
  assert_eq!(host.messages.active().unwrap().level, MessageLevel::Warning);

  registry.invoke(FORMAT_DOCUMENT, &mut host);
  assert_eq!(host.doc().revisions(), 0);
  assert_eq!(
    host.messages.active().unwrap().text,
    the_formatter::settings::UNREADABLE_SETTINGS
  );

  host.clock.advance(Duration::from_millis(1000));
  assert!(!host.edit(GapField::BeforeTopLevelHeadings, "-12"));
  assert_eq!(host.messages.active().unwrap().text, warning);
}

#[test]
fn empty_gap_falls_back_to_engine_default() {
  let registry = registry();
  let mut host = Host::new(Some(MemoryDocument::new("# A\nBody")));

  assert!(host.edit(GapField::BeforeTopLevelHeadings, ""));
  registry.invoke(FORMAT_DOCUMENT, &mut host);
  // Engine default for top-level headings is 3
  assert_eq!(host.doc().text(), "# A\n\n\n\nBody");
}
