//! Blank-line normalisation for structured text documents.
//!
//! The text transformation itself belongs to an external
//! [`FormattingEngine`]. This crate owns everything around it: the
//! user-tunable gap settings, the rate-limited feedback shown while those
//! settings are typed, the pass that runs the engine over the active document
//! and the action that triggers that pass.
//!
//! ```
//! use the_formatter::{
//!   CanonicalConfig,
//!   ConfigurationModel,
//!   DocumentState,
//!   EditorDocument,
//!   EngineError,
//!   FormatOrchestrator,
//!   GapField,
//!   MemoryDocument,
//!   Notification,
//!   Position,
//! };
//!
//! fn engine(text: &str, config: &CanonicalConfig) -> Result<String, EngineError> {
//!   let gap = "\n".repeat(config.gaps.before_top_level_headings + 1);
//!   Ok(text.replacen('\n', &gap, 1))
//! }
//!
//! let mut model = ConfigurationModel::default();
//! model.set(GapField::BeforeTopLevelHeadings, "3");
//!
//! let orchestrator = FormatOrchestrator::new(engine);
//! let mut doc = MemoryDocument::new("# A\nBody").with_cursor(Position::new(1, 0));
//! let state = DocumentState::capture(&doc);
//!
//! let notification = orchestrator.format_active_document(&mut doc, state, &model.snapshot());
//! assert_eq!(doc.text(), "# A\n\n\n\nBody");
//! assert!(matches!(notification, Some(Notification::FormatSuccess(_))));
//! ```

pub mod action;
pub mod document;
pub mod engine;
pub mod messages;
pub mod orchestrator;
pub mod position;
pub mod settings;
pub mod validator;

pub use action::{
  ActionTrigger,
  FORMAT_DOCUMENT,
  FormatContext,
};
pub use document::{
  DocumentState,
  EditorDocument,
  MemoryDocument,
};
pub use engine::{
  CanonicalConfig,
  EngineError,
  FormattingEngine,
  GapCounts,
};
pub use messages::{
  MessageCenter,
  MessageLevel,
  NoticeText,
  Notification,
  Notifier,
};
pub use orchestrator::FormatOrchestrator;
pub use position::Position;
pub use settings::{
  ConfigurationModel,
  GapField,
  GapGroup,
  OptionField,
  SettingsError,
  SettingsSnapshot,
  is_valid_gap,
};
pub use validator::{
  FileStore,
  InputValidator,
  SettingsStore,
  SettingsSurface,
};
