//! Live editing of settings.
//!
//! Every keystroke in a gap input is stored and persisted straight away. Only
//! the warning about an unusable value is rate limited, so a burst of typing
//! produces at most one warning and never loses a write.

use std::{
  path::{
    Path,
    PathBuf,
  },
  time::Duration,
};

use anyhow::Result;
use the_formatter_event::{
  Clock,
  LimiterState,
  RateLimiter,
  SystemClock,
};
use the_formatter_loader::PersistedSettings;

use crate::{
  messages::{
    NoticeText,
    Notification,
    Notifier,
  },
  settings::{
    ConfigurationModel,
    GapField,
    OptionField,
    SettingsSnapshot,
    is_valid_gap,
  },
};

/// Length of the window in which repeated warnings are swallowed.
pub const WARNING_WINDOW: Duration = Duration::from_millis(1000);

/// Leading-edge rate limited warning emitter.
///
/// One slot shared by all fields: a warning about one field suppresses
/// warnings about any other field until the window closes.
#[derive(Debug, Clone)]
pub struct InputValidator<C = SystemClock> {
  limiter: RateLimiter<C>,
}

impl Default for InputValidator<SystemClock> {
  fn default() -> Self {
    Self::new()
  }
}

impl InputValidator<SystemClock> {
  pub fn new() -> Self {
    Self::with_clock(SystemClock)
  }
}

impl<C: Clock> InputValidator<C> {
  pub fn with_clock(clock: C) -> Self {
    Self {
      limiter: RateLimiter::new(clock, WARNING_WINDOW),
    }
  }

  /// The warning to show now, or `None` if one was shown less than
  /// [`WARNING_WINDOW`] ago.
  pub fn report_invalid(&mut self, message: impl Into<String>) -> Option<Notification> {
    if self.limiter.check() {
      Some(Notification::ValidationWarning(message.into()))
    } else {
      tracing::debug!("validation warning suppressed");
      None
    }
  }

  /// [`Self::report_invalid`] for values that fail [`is_valid_gap`]; valid
  /// values never produce a warning and do not touch the rate limiter.
  pub fn validate(&mut self, value: &str, message: &str) -> Option<Notification> {
    if is_valid_gap(value) {
      return None;
    }
    self.report_invalid(message)
  }

  pub fn state(&self) -> LimiterState {
    self.limiter.state()
  }
}

/// Where settings go after every edit.
pub trait SettingsStore {
  fn save(&mut self, settings: &PersistedSettings) -> Result<()>;
}

/// For hosts that persist settings themselves.
impl SettingsStore for () {
  fn save(&mut self, _settings: &PersistedSettings) -> Result<()> {
    Ok(())
  }
}

/// Writes settings to a fixed path, JSON or TOML by extension.
///
/// Override files are only ever read: they are layered over the written file
/// on [`FileStore::load`] and win over anything saved through the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
  path:      PathBuf,
  overrides: Vec<PathBuf>,
}

impl FileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path:      path.into(),
      overrides: Vec::new(),
    }
  }

  /// Store at [`the_formatter_loader::settings_file`], with
  /// [`the_formatter_loader::user_config_file`] layered on top.
  pub fn default_location() -> Result<Self> {
    Ok(
      Self::new(the_formatter_loader::settings_file()?)
        .with_override(the_formatter_loader::user_config_file()?),
    )
  }

  /// Add a TOML file merged over the settings on load. Later overrides win.
  pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
    self.overrides.push(path.into());
    self
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn overrides(&self) -> &[PathBuf] {
    &self.overrides
  }

  /// Read the settings back with overrides applied, filling anything missing
  /// with defaults. Missing files are skipped.
  pub fn load(&self) -> Result<ConfigurationModel> {
    let persisted = the_formatter_loader::load_layered(&self.path, &self.overrides)?;
    Ok(ConfigurationModel::from_persisted(persisted))
  }
}

impl SettingsStore for FileStore {
  fn save(&mut self, settings: &PersistedSettings) -> Result<()> {
    the_formatter_loader::save_file(&self.path, settings)
  }
}

/// The settings screen: owns the live model and keeps it persisted.
#[derive(Debug)]
pub struct SettingsSurface<S = (), C = SystemClock> {
  model:     ConfigurationModel,
  validator: InputValidator<C>,
  store:     S,
  text:      NoticeText,
}

impl<S: SettingsStore> SettingsSurface<S, SystemClock> {
  pub fn new(model: ConfigurationModel, store: S) -> Self {
    Self::with_validator(model, store, InputValidator::new())
  }
}

impl<S: SettingsStore, C: Clock> SettingsSurface<S, C> {
  pub fn with_validator(model: ConfigurationModel, store: S, validator: InputValidator<C>) -> Self {
    Self {
      model,
      validator,
      store,
      text: NoticeText::default(),
    }
  }

  pub fn with_text(mut self, text: NoticeText) -> Self {
    self.text = text;
    self
  }

  pub fn model(&self) -> &ConfigurationModel {
    &self.model
  }

  pub fn snapshot(&self) -> SettingsSnapshot {
    self.model.snapshot()
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  /// Apply one edit of a gap input. The value is stored and persisted
  /// whether or not it is valid; an invalid value additionally produces a
  /// rate-limited warning. Returns whether the value is valid.
  pub fn edit<N>(&mut self, field: GapField, value: impl Into<String>, notifier: &mut N) -> bool
  where
    N: Notifier + ?Sized,
  {
    let valid = self.model.set(field, value);
    if !valid {
      tracing::debug!(field = field.key(), value = self.model.get(field), "invalid gap value");
      if let Some(warning) = self.validator.report_invalid(self.text.invalid_gap.clone()) {
        notifier.notify(&warning);
      }
    }
    self.persist();
    valid
  }

  pub fn set_option(&mut self, option: OptionField, value: bool) {
    self.model.set_option(option, value);
    self.persist();
  }

  fn persist(&mut self) {
    if let Err(err) = self.store.save(&self.model.to_persisted()) {
      tracing::error!("failed to persist settings: {err:#}");
    }
  }
}

#[cfg(test)]
mod tests {
  use the_formatter_event::ManualClock;

  use super::*;
  use crate::messages::MessageCenter;

  #[derive(Default)]
  struct RecordingStore {
    saves: Vec<PersistedSettings>,
  }

  impl SettingsStore for RecordingStore {
    fn save(&mut self, settings: &PersistedSettings) -> Result<()> {
      self.saves.push(settings.clone());
      Ok(())
    }
  }

  struct FailingStore;

  impl SettingsStore for FailingStore {
    fn save(&mut self, _settings: &PersistedSettings) -> Result<()> {
      anyhow::bail!("disk full")
    }
  }

  fn make_surface<S: SettingsStore>(store: S) -> (SettingsSurface<S, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let surface = SettingsSurface::with_validator(
      ConfigurationModel::default(),
      store,
      InputValidator::with_clock(clock.clone()),
    );
    (surface, clock)
  }

  #[test]
  fn empty_value_never_warns() {
    let (mut surface, _clock) = make_surface(());
    let mut center = MessageCenter::default();

    for field in GapField::ALL {
      assert!(surface.edit(field, "", &mut center));
    }
    assert_eq!(center.history_len(), 0);
  }

  #[test]
  fn negative_and_non_numeric_values_warn() {
    let invalid_gap = NoticeText::default().invalid_gap;

    for value in ["-1", "abc"] {
      let (mut surface, _clock) = make_surface(());
      let mut center = MessageCenter::default();
      assert!(!surface.edit(GapField::BeforeSubHeadings, value, &mut center));
      assert_eq!(center.texts(), vec![invalid_gap.as_str()]);
    }
  }

  #[test]
  fn burst_of_invalid_edits_warns_once() {
    let (mut surface, clock) = make_surface(RecordingStore::default());
    let mut center = MessageCenter::default();

    for (i, value) in ["a", "ab", "abc", "-", "-1"].into_iter().enumerate() {
      let field = GapField::ALL[i % GapField::ALL.len()];
      surface.edit(field, value, &mut center);
      clock.advance(Duration::from_millis(100));
    }

    assert_eq!(center.history_len(), 1);
    // Every edit was still stored and persisted
    assert_eq!(surface.store().saves.len(), 5);
    assert_eq!(surface.model().get(GapField::BeforeFirstSubHeading), "ab");
  }

  #[test]
  fn warning_carries_first_message_in_window() {
    let clock = ManualClock::new();
    let mut validator = InputValidator::with_clock(clock.clone());

    assert_eq!(
      validator.report_invalid("first"),
      Some(Notification::ValidationWarning("first".into()))
    );
    clock.advance(Duration::from_millis(999));
    assert_eq!(validator.report_invalid("second"), None);

    clock.advance(Duration::from_millis(1));
    assert_eq!(
      validator.report_invalid("third"),
      Some(Notification::ValidationWarning("third".into()))
    );
  }

  #[test]
  fn validate_skips_valid_values() {
    let clock = ManualClock::new();
    let mut validator = InputValidator::with_clock(clock);

    assert_eq!(validator.validate("12", "bad"), None);
    assert_eq!(validator.state(), LimiterState::Ready);
    assert!(validator.validate("1 2", "bad").is_some());
    assert!(validator.validate("x", "bad").is_none());
  }

  #[test]
  fn store_failure_does_not_block_edit() {
    let (mut surface, _clock) = make_surface(FailingStore);
    let mut center = MessageCenter::default();

    assert!(surface.edit(GapField::BeforeCodeBlocks, "4", &mut center));
    assert_eq!(surface.model().get(GapField::BeforeCodeBlocks), "4");
    assert_eq!(center.history_len(), 0);
  }

  #[test]
  fn option_changes_are_persisted() {
    let (mut surface, _clock) = make_surface(RecordingStore::default());
    surface.set_option(OptionField::NotifyWhenUnchanged, false);

    let saved = surface.store().saves.last().unwrap();
    assert_eq!(saved.other_options.notify_when_unchanged, Some(false));
    assert!(!surface.snapshot().notify_when_unchanged());
  }

  #[test]
  fn toml_file_store_round_trips_model() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("config.toml"));

    let mut surface = SettingsSurface::new(ConfigurationModel::default(), store.clone());
    let mut center = MessageCenter::default();
    surface.edit(GapField::BeforeContents, "4", &mut center);
    surface.set_option(OptionField::InsertNewline, false);

    let loaded = store.load().unwrap();
    assert_eq!(loaded.get(GapField::BeforeContents), "4");
    assert!(!loaded.option(OptionField::InsertNewline));
    assert_eq!(&loaded, surface.model());
  }

  #[test]
  fn file_store_layers_overrides_over_saved_settings() {
    let dir = tempfile::tempdir().unwrap();
    let overrides = dir.path().join("config.toml");
    std::fs::write(
      &overrides,
      "[headingGaps]\nbeforeSubHeadings = \"6\"\n\n[otherOptions]\nnotifyWhenUnchanged = false\n",
    )
    .unwrap();
    let store = FileStore::new(dir.path().join("settings.json")).with_override(&overrides);

    let mut surface = SettingsSurface::new(ConfigurationModel::default(), store.clone());
    let mut center = MessageCenter::default();
    surface.edit(GapField::BeforeTopLevelHeadings, "1", &mut center);
    surface.edit(GapField::BeforeSubHeadings, "9", &mut center);

    let loaded = store.load().unwrap();
    assert_eq!(loaded.get(GapField::BeforeTopLevelHeadings), "1");
    assert_eq!(loaded.get(GapField::BeforeSubHeadings), "6");
    assert!(!loaded.option(OptionField::NotifyWhenUnchanged));
    // Overrides are never written back
    assert!(
      std::fs::read_to_string(&overrides)
        .unwrap()
        .contains("beforeSubHeadings = \"6\"")
    );
  }

  #[test]
  fn default_location_pairs_settings_with_user_config() {
    let store = FileStore::default_location().unwrap();
    assert!(store.path().ends_with("settings.json"));
    assert_eq!(store.overrides().len(), 1);
    assert!(store.overrides()[0].ends_with("config.toml"));
    assert_eq!(store.path().parent(), store.overrides()[0].parent());
  }

  #[test]
  fn file_store_round_trips_model() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("settings.json"));
    assert_eq!(store.load().unwrap(), ConfigurationModel::default());

    let mut surface = SettingsSurface::new(ConfigurationModel::default(), store.clone());
    let mut center = MessageCenter::default();
    surface.edit(GapField::BeforeTopLevelHeadings, "", &mut center);
    surface.edit(GapField::BeforeContents, "oops", &mut center);

    let loaded = store.load().unwrap();
    assert_eq!(loaded.get(GapField::BeforeTopLevelHeadings), "");
    assert_eq!(loaded.get(GapField::BeforeContents), "oops");
  }
}
