//! Live formatter settings.
//!
//! Gap values are kept exactly as the user typed them. An empty string means
//! "let the engine decide"; anything else is expected to be a plain decimal
//! number but is stored even when it is not. Whether a value is usable is a
//! separate question answered by [`is_valid_gap`], and turning the strings
//! into numbers only happens when a [`SettingsSnapshot`] is resolved for a
//! formatting pass.

use the_formatter_loader::{
  PersistedFormatOptions,
  PersistedHeadingGaps,
  PersistedOtherGaps,
  PersistedOtherOptions,
  PersistedSettings,
};
use thiserror::Error;

use crate::engine::{
  CanonicalConfig,
  GapCounts,
};

/// Notice shown when a snapshot holds a gap value that is not a number.
pub const UNREADABLE_SETTINGS: &str =
  "Failed to read settings. Some of them are possibly not positive number values.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapGroup {
  HeadingGaps,
  OtherGaps,
}

impl GapGroup {
  pub const fn key(self) -> &'static str {
    match self {
      Self::HeadingGaps => "headingGaps",
      Self::OtherGaps => "otherGaps",
    }
  }

  pub const fn title(self) -> &'static str {
    match self {
      Self::HeadingGaps => "Heading Gaps",
      Self::OtherGaps => "Other Gaps",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapField {
  BeforeTopLevelHeadings,
  BeforeFirstSubHeading,
  BeforeSubHeadings,
  AfterProperties,
  BeforeContents,
  BeforeContentsAfterCodeBlocks,
  BeforeCodeBlocks,
  BeforeCodeBlocksAfterHeadings,
}

impl GapField {
  pub const ALL: [GapField; 8] = [
    Self::BeforeTopLevelHeadings,
    Self::BeforeFirstSubHeading,
    Self::BeforeSubHeadings,
    Self::AfterProperties,
    Self::BeforeContents,
    Self::BeforeContentsAfterCodeBlocks,
    Self::BeforeCodeBlocks,
    Self::BeforeCodeBlocksAfterHeadings,
  ];

  pub const fn group(self) -> GapGroup {
    match self {
      Self::BeforeTopLevelHeadings | Self::BeforeFirstSubHeading | Self::BeforeSubHeadings => {
        GapGroup::HeadingGaps
      },
      _ => GapGroup::OtherGaps,
    }
  }

  /// Key inside the group in the persisted layout.
  pub const fn key(self) -> &'static str {
    match self {
      Self::BeforeTopLevelHeadings => "beforeTopLevelHeadings",
      Self::BeforeFirstSubHeading => "beforeFirstSubHeading",
      Self::BeforeSubHeadings => "beforeSubHeadings",
      Self::AfterProperties => "afterProperties",
      Self::BeforeContents => "beforeContents",
      Self::BeforeContentsAfterCodeBlocks => "beforeContentsAfterCodeBlocks",
      Self::BeforeCodeBlocks => "beforeCodeBlocks",
      Self::BeforeCodeBlocksAfterHeadings => "beforeCodeBlocksAfterHeadings",
    }
  }

  /// Value used when the persisted layout has no entry for this field. Also
  /// the placeholder a settings surface shows for an empty input.
  pub const fn default_value(self) -> &'static str {
    match self {
      Self::BeforeTopLevelHeadings => "3",
      Self::BeforeFirstSubHeading => "1",
      Self::BeforeSubHeadings => "2",
      Self::AfterProperties => "2",
      Self::BeforeContents
      | Self::BeforeContentsAfterCodeBlocks
      | Self::BeforeCodeBlocks
      | Self::BeforeCodeBlocksAfterHeadings => "0",
    }
  }

  pub const fn title(self) -> &'static str {
    match self {
      Self::BeforeTopLevelHeadings => "Before Top Level Headings",
      Self::BeforeFirstSubHeading => "Before First Sub Heading",
      Self::BeforeSubHeadings => "Before Sub Headings",
      Self::AfterProperties => "After Properties",
      Self::BeforeContents => "Before Contents",
      Self::BeforeContentsAfterCodeBlocks => "Before Contents After Code Blocks",
      Self::BeforeCodeBlocks => "Before Code Blocks",
      Self::BeforeCodeBlocksAfterHeadings => "Before Code Blocks After Headings",
    }
  }

  pub const fn description(self) -> &'static str {
    match self {
      Self::BeforeTopLevelHeadings => "Decides gaps before highest level of headings.",
      Self::BeforeFirstSubHeading => "Decides the child heading gap right before a parent heading.",
      Self::BeforeSubHeadings => "Decides gaps before headings that are not in the highest level.",
      Self::AfterProperties => "Decides the gap after a YAML properties.",
      Self::BeforeContents => {
        "Decides gaps before contents (ex: Text section right before headings)."
      },
      Self::BeforeContentsAfterCodeBlocks => {
        "Decides gaps before contents that are right after code blocks."
      },
      Self::BeforeCodeBlocks => "Decides gaps before code blocks.",
      Self::BeforeCodeBlocksAfterHeadings => {
        "Decides gaps before code blocks that are right after headings."
      },
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionField {
  InsertNewline,
  NotifyWhenUnchanged,
  ShowMoreDetailedErrorMessages,
}

impl OptionField {
  pub const fn default_value(self) -> bool {
    match self {
      Self::InsertNewline | Self::NotifyWhenUnchanged => true,
      Self::ShowMoreDetailedErrorMessages => false,
    }
  }
}

/// A gap value is usable when it is empty or made only of ASCII digits.
///
/// No trimming happens, so surrounding whitespace, a sign or any other
/// character makes the value invalid.
pub fn is_valid_gap(value: &str) -> bool {
  value.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
  #[error("{field:?} has value {value:?}, which is not a whole number of 0 or more")]
  InvalidGap { field: GapField, value: String },
  #[error("{field:?} has value {value:?}, which is too large")]
  GapOutOfRange { field: GapField, value: String },
}

impl SettingsError {
  pub fn field(&self) -> GapField {
    match self {
      Self::InvalidGap { field, .. } | Self::GapOutOfRange { field, .. } => *field,
    }
  }

  /// Text shown to the user. Detailed notices name the field and its value.
  pub fn notice(&self, detailed: bool) -> String {
    if !detailed {
      return UNREADABLE_SETTINGS.to_string();
    }
    let (field, value, reason) = match self {
      Self::InvalidGap { field, value } => (field, value, "is not a whole number of 0 or more"),
      Self::GapOutOfRange { field, value } => (field, value, "is too large"),
    };
    format!(
      "{UNREADABLE_SETTINGS}\n{}: {value:?} {reason}.",
      field.title()
    )
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingGaps {
  pub before_top_level_headings: String,
  pub before_first_sub_heading:  String,
  pub before_sub_headings:       String,
}

impl Default for HeadingGaps {
  fn default() -> Self {
    Self {
      before_top_level_headings: GapField::BeforeTopLevelHeadings.default_value().into(),
      before_first_sub_heading:  GapField::BeforeFirstSubHeading.default_value().into(),
      before_sub_headings:       GapField::BeforeSubHeadings.default_value().into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherGaps {
  pub after_properties:                  String,
  pub before_contents:                   String,
  pub before_contents_after_code_blocks: String,
  pub before_code_blocks:                String,
  pub before_code_blocks_after_headings: String,
}

impl Default for OtherGaps {
  fn default() -> Self {
    Self {
      after_properties:                  GapField::AfterProperties.default_value().into(),
      before_contents:                   GapField::BeforeContents.default_value().into(),
      before_contents_after_code_blocks: GapField::BeforeContentsAfterCodeBlocks
        .default_value()
        .into(),
      before_code_blocks:                GapField::BeforeCodeBlocks.default_value().into(),
      before_code_blocks_after_headings: GapField::BeforeCodeBlocksAfterHeadings
        .default_value()
        .into(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
  /// End the document with a newline.
  pub insert_newline: bool,
}

impl Default for FormatOptions {
  fn default() -> Self {
    Self {
      insert_newline: OptionField::InsertNewline.default_value(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtherOptions {
  /// Use a distinct notice when formatting changed nothing.
  pub notify_when_unchanged:             bool,
  /// Explain which setting broke when settings cannot be read.
  pub show_more_detailed_error_messages: bool,
}

impl Default for OtherOptions {
  fn default() -> Self {
    Self {
      notify_when_unchanged:             OptionField::NotifyWhenUnchanged.default_value(),
      show_more_detailed_error_messages: OptionField::ShowMoreDetailedErrorMessages
        .default_value(),
    }
  }
}

/// The full set of user-tunable settings.
///
/// This is a plain value. The settings surface mutates it field by field;
/// formatting passes only ever see a [`SettingsSnapshot`] taken from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationModel {
  pub heading_gaps:   HeadingGaps,
  pub other_gaps:     OtherGaps,
  pub format_options: FormatOptions,
  pub other_options:  OtherOptions,
}

impl ConfigurationModel {
  pub fn get(&self, field: GapField) -> &str {
    match field {
      GapField::BeforeTopLevelHeadings => &self.heading_gaps.before_top_level_headings,
      GapField::BeforeFirstSubHeading => &self.heading_gaps.before_first_sub_heading,
      GapField::BeforeSubHeadings => &self.heading_gaps.before_sub_headings,
      GapField::AfterProperties => &self.other_gaps.after_properties,
      GapField::BeforeContents => &self.other_gaps.before_contents,
      GapField::BeforeContentsAfterCodeBlocks => &self.other_gaps.before_contents_after_code_blocks,
      GapField::BeforeCodeBlocks => &self.other_gaps.before_code_blocks,
      GapField::BeforeCodeBlocksAfterHeadings => &self.other_gaps.before_code_blocks_after_headings,
    }
  }

  fn slot_mut(&mut self, field: GapField) -> &mut String {
    match field {
      GapField::BeforeTopLevelHeadings => &mut self.heading_gaps.before_top_level_headings,
      GapField::BeforeFirstSubHeading => &mut self.heading_gaps.before_first_sub_heading,
      GapField::BeforeSubHeadings => &mut self.heading_gaps.before_sub_headings,
      GapField::AfterProperties => &mut self.other_gaps.after_properties,
      GapField::BeforeContents => &mut self.other_gaps.before_contents,
      GapField::BeforeContentsAfterCodeBlocks => {
        &mut self.other_gaps.before_contents_after_code_blocks
      },
      GapField::BeforeCodeBlocks => &mut self.other_gaps.before_code_blocks,
      GapField::BeforeCodeBlocksAfterHeadings => {
        &mut self.other_gaps.before_code_blocks_after_headings
      },
    }
  }

  /// Store `value` as-is and report whether it is a usable gap.
  pub fn set(&mut self, field: GapField, value: impl Into<String>) -> bool {
    let slot = self.slot_mut(field);
    *slot = value.into();
    is_valid_gap(slot)
  }

  pub fn option(&self, option: OptionField) -> bool {
    match option {
      OptionField::InsertNewline => self.format_options.insert_newline,
      OptionField::NotifyWhenUnchanged => self.other_options.notify_when_unchanged,
      OptionField::ShowMoreDetailedErrorMessages => {
        self.other_options.show_more_detailed_error_messages
      },
    }
  }

  pub fn set_option(&mut self, option: OptionField, value: bool) {
    match option {
      OptionField::InsertNewline => self.format_options.insert_newline = value,
      OptionField::NotifyWhenUnchanged => self.other_options.notify_when_unchanged = value,
      OptionField::ShowMoreDetailedErrorMessages => {
        self.other_options.show_more_detailed_error_messages = value
      },
    }
  }

  /// Fields currently holding a value that [`is_valid_gap`] rejects.
  pub fn invalid_fields(&self) -> impl Iterator<Item = GapField> + '_ {
    GapField::ALL
      .into_iter()
      .filter(|field| !is_valid_gap(self.get(*field)))
  }

  pub fn snapshot(&self) -> SettingsSnapshot {
    SettingsSnapshot {
      model: self.clone(),
    }
  }

  /// Build a model from the persisted layout, filling absent leaves with
  /// their defaults.
  pub fn from_persisted(persisted: PersistedSettings) -> Self {
    fn gap(value: Option<String>, field: GapField) -> String {
      value.unwrap_or_else(|| field.default_value().to_string())
    }
    fn option(value: Option<bool>, field: OptionField) -> bool {
      value.unwrap_or(field.default_value())
    }

    let PersistedSettings {
      heading_gaps,
      other_gaps,
      format_options,
      other_options,
    } = persisted;

    Self {
      heading_gaps:   HeadingGaps {
        before_top_level_headings: gap(
          heading_gaps.before_top_level_headings,
          GapField::BeforeTopLevelHeadings,
        ),
        before_first_sub_heading:  gap(
          heading_gaps.before_first_sub_heading,
          GapField::BeforeFirstSubHeading,
        ),
        before_sub_headings:       gap(heading_gaps.before_sub_headings, GapField::BeforeSubHeadings),
      },
      other_gaps:     OtherGaps {
        after_properties:                  gap(other_gaps.after_properties, GapField::AfterProperties),
        before_contents:                   gap(other_gaps.before_contents, GapField::BeforeContents),
        before_contents_after_code_blocks: gap(
          other_gaps.before_contents_after_code_blocks,
          GapField::BeforeContentsAfterCodeBlocks,
        ),
        before_code_blocks:                gap(other_gaps.before_code_blocks, GapField::BeforeCodeBlocks),
        before_code_blocks_after_headings: gap(
          other_gaps.before_code_blocks_after_headings,
          GapField::BeforeCodeBlocksAfterHeadings,
        ),
      },
      format_options: FormatOptions {
        insert_newline: option(format_options.insert_newline, OptionField::InsertNewline),
      },
      other_options:  OtherOptions {
        notify_when_unchanged:             option(
          other_options.notify_when_unchanged,
          OptionField::NotifyWhenUnchanged,
        ),
        show_more_detailed_error_messages: option(
          other_options.show_more_detailed_error_messages,
          OptionField::ShowMoreDetailedErrorMessages,
        ),
      },
    }
  }

  pub fn to_persisted(&self) -> PersistedSettings {
    let gap = |field: GapField| Some(self.get(field).to_string());
    PersistedSettings {
      heading_gaps:   PersistedHeadingGaps {
        before_top_level_headings: gap(GapField::BeforeTopLevelHeadings),
        before_first_sub_heading:  gap(GapField::BeforeFirstSubHeading),
        before_sub_headings:       gap(GapField::BeforeSubHeadings),
      },
      other_gaps:     PersistedOtherGaps {
        after_properties:                  gap(GapField::AfterProperties),
        before_contents:                   gap(GapField::BeforeContents),
        before_contents_after_code_blocks: gap(GapField::BeforeContentsAfterCodeBlocks),
        before_code_blocks:                gap(GapField::BeforeCodeBlocks),
        before_code_blocks_after_headings: gap(GapField::BeforeCodeBlocksAfterHeadings),
      },
      format_options: PersistedFormatOptions {
        insert_newline: Some(self.format_options.insert_newline),
      },
      other_options:  PersistedOtherOptions {
        notify_when_unchanged:             Some(self.other_options.notify_when_unchanged),
        show_more_detailed_error_messages: Some(
          self.other_options.show_more_detailed_error_messages,
        ),
      },
    }
  }
}

/// Settings frozen at the start of a formatting pass.
///
/// Later edits to the [`ConfigurationModel`] it came from are not visible
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSnapshot {
  model: ConfigurationModel,
}

impl SettingsSnapshot {
  pub fn get(&self, field: GapField) -> &str {
    self.model.get(field)
  }

  pub fn notify_when_unchanged(&self) -> bool {
    self.model.other_options.notify_when_unchanged
  }

  pub fn show_more_detailed_error_messages(&self) -> bool {
    self.model.other_options.show_more_detailed_error_messages
  }

  pub fn insert_newline(&self) -> bool {
    self.model.format_options.insert_newline
  }

  /// Turn every gap into a number. Empty values take the matching entry of
  /// `defaults`, which is the engine's own idea of a default, not zero.
  pub fn resolve(&self, defaults: &GapCounts) -> Result<CanonicalConfig, SettingsError> {
    let mut gaps = GapCounts::default();
    for field in GapField::ALL {
      let value = self.get(field);
      let count = if value.is_empty() {
        defaults.get(field)
      } else if !is_valid_gap(value) {
        return Err(SettingsError::InvalidGap {
          field,
          value: value.to_string(),
        });
      } else {
        value
          .parse::<usize>()
          .map_err(|_| SettingsError::GapOutOfRange {
            field,
            value: value.to_string(),
          })?
      };
      gaps.set(field, count);
    }

    Ok(CanonicalConfig {
      gaps,
      insert_newline: self.insert_newline(),
      notify_when_unchanged: self.notify_when_unchanged(),
      show_more_detailed_error_messages: self.show_more_detailed_error_messages(),
    })
  }
}
