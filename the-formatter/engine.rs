//! Contract with the formatting engine.
//!
//! The engine is the pure text transformation that decides where blank lines
//! go. It lives outside this crate; all the formatter needs is something that
//! turns `(text, config)` into new text or a failure message. Engines must be
//! deterministic and idempotent: formatting already formatted text with the
//! same config returns it unchanged.

use thiserror::Error;

use crate::settings::GapField;

/// Blank-line counts for every structural boundary the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GapCounts {
  pub before_top_level_headings:         usize,
  pub before_first_sub_heading:          usize,
  pub before_sub_headings:               usize,
  pub after_properties:                  usize,
  pub before_contents:                   usize,
  pub before_contents_after_code_blocks: usize,
  pub before_code_blocks:                usize,
  pub before_code_blocks_after_headings: usize,
}

impl Default for GapCounts {
  fn default() -> Self {
    Self {
      before_top_level_headings:         3,
      before_first_sub_heading:          1,
      before_sub_headings:               2,
      after_properties:                  2,
      before_contents:                   0,
      before_contents_after_code_blocks: 0,
      before_code_blocks:                0,
      before_code_blocks_after_headings: 0,
    }
  }
}

impl GapCounts {
  pub fn get(&self, field: GapField) -> usize {
    match field {
      GapField::BeforeTopLevelHeadings => self.before_top_level_headings,
      GapField::BeforeFirstSubHeading => self.before_first_sub_heading,
      GapField::BeforeSubHeadings => self.before_sub_headings,
      GapField::AfterProperties => self.after_properties,
      GapField::BeforeContents => self.before_contents,
      GapField::BeforeContentsAfterCodeBlocks => self.before_contents_after_code_blocks,
      GapField::BeforeCodeBlocks => self.before_code_blocks,
      GapField::BeforeCodeBlocksAfterHeadings => self.before_code_blocks_after_headings,
    }
  }

  pub fn set(&mut self, field: GapField, count: usize) {
    let slot = match field {
      GapField::BeforeTopLevelHeadings => &mut self.before_top_level_headings,
      GapField::BeforeFirstSubHeading => &mut self.before_first_sub_heading,
      GapField::BeforeSubHeadings => &mut self.before_sub_headings,
      GapField::AfterProperties => &mut self.after_properties,
      GapField::BeforeContents => &mut self.before_contents,
      GapField::BeforeContentsAfterCodeBlocks => &mut self.before_contents_after_code_blocks,
      GapField::BeforeCodeBlocks => &mut self.before_code_blocks,
      GapField::BeforeCodeBlocksAfterHeadings => &mut self.before_code_blocks_after_headings,
    };
    *slot = count;
  }
}

/// Fully resolved settings handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalConfig {
  pub gaps:                              GapCounts,
  pub insert_newline:                    bool,
  pub notify_when_unchanged:             bool,
  pub show_more_detailed_error_messages: bool,
}

impl Default for CanonicalConfig {
  fn default() -> Self {
    Self {
      gaps:                              GapCounts::default(),
      insert_newline:                    true,
      notify_when_unchanged:             true,
      show_more_detailed_error_messages: false,
    }
  }
}

/// The engine could not format the text. The message is shown to the user
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
  message: String,
}

impl EngineError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

pub trait FormattingEngine: Send + Sync {
  fn format(&self, text: &str, config: &CanonicalConfig) -> Result<String, EngineError>;

  /// Counts used for gaps the user left empty.
  fn default_gaps(&self) -> GapCounts {
    GapCounts::default()
  }
}

impl<F> FormattingEngine for F
where
  F: Fn(&str, &CanonicalConfig) -> Result<String, EngineError> + Send + Sync,
{
  fn format(&self, text: &str, config: &CanonicalConfig) -> Result<String, EngineError> {
    (self)(text, config)
  }
}
