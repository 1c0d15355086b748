//! On-disk shape of the formatter settings.
//!
//! Every group and every leaf is optional. Missing leaves are filled in by
//! whoever turns this layout into a live settings model; this module never
//! invents values. Gap leaves are strings (possibly empty), option leaves are
//! booleans. Unknown keys are ignored.

use std::path::Path;

use anyhow::{
  Context,
  Result,
};
use serde::{
  Deserialize,
  Serialize,
};

use crate::merge_toml_values;

/// Depth at which layered TOML files merge: group tables, then leaves.
const MERGE_DEPTH: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedSettings {
  pub heading_gaps:   PersistedHeadingGaps,
  pub other_gaps:     PersistedOtherGaps,
  pub format_options: PersistedFormatOptions,
  pub other_options:  PersistedOtherOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedHeadingGaps {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub before_top_level_headings: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub before_first_sub_heading:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub before_sub_headings:       Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedOtherGaps {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub after_properties:                  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub before_contents:                   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub before_contents_after_code_blocks: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub before_code_blocks:                Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub before_code_blocks_after_headings: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedFormatOptions {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub insert_newline: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedOtherOptions {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notify_when_unchanged:              Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub show_more_detailed_error_messages: Option<bool>,
}

impl PersistedSettings {
  pub fn from_json_str(input: &str) -> Result<Self> {
    serde_json::from_str(input).context("failed to parse settings JSON")
  }

  pub fn to_json_string(&self) -> Result<String> {
    serde_json::to_string_pretty(self).context("failed to serialize settings")
  }

  pub fn from_toml_str(input: &str) -> Result<Self> {
    toml::from_str(input).context("failed to parse settings TOML")
  }

  pub fn to_toml_string(&self) -> Result<String> {
    toml::to_string_pretty(self).context("failed to serialize settings")
  }
}

/// Load settings from `path`, picking the format from the extension
/// (`.toml`, anything else is read as JSON).
pub fn load_file(path: impl AsRef<Path>) -> Result<PersistedSettings> {
  let path = path.as_ref();
  let contents = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read settings from '{}'", path.display()))?;
  let settings = if is_toml(path) {
    PersistedSettings::from_toml_str(&contents)
  } else {
    PersistedSettings::from_json_str(&contents)
  };
  settings.with_context(|| format!("invalid settings file '{}'", path.display()))
}

/// Write settings in the format [`load_file`] expects for `path`, creating
/// parent directories as needed.
pub fn save_file(path: impl AsRef<Path>, settings: &PersistedSettings) -> Result<()> {
  let path = path.as_ref();
  crate::ensure_parent_dir(path)?;
  let contents = if is_toml(path) {
    settings.to_toml_string()?
  } else {
    settings.to_json_string()?
  };
  std::fs::write(path, contents)
    .with_context(|| format!("failed to write settings to '{}'", path.display()))?;
  tracing::debug!(path = %path.display(), "settings saved");
  Ok(())
}

/// Merge TOML files in order, later files overriding earlier ones leaf by
/// leaf. Files that do not exist are skipped; files that exist but do not
/// parse are an error.
pub fn load_layered_toml<I, P>(paths: I) -> Result<PersistedSettings>
where
  I: IntoIterator<Item = P>,
  P: AsRef<Path>,
{
  layer_toml(toml::Value::Table(toml::Table::new()), paths)
}

/// Load `base` (skipped when missing) and merge the TOML `overrides` on top
/// of it, the same way [`load_layered_toml`] merges its files.
pub fn load_layered<I, P>(base: impl AsRef<Path>, overrides: I) -> Result<PersistedSettings>
where
  I: IntoIterator<Item = P>,
  P: AsRef<Path>,
{
  let base = base.as_ref();
  let base = if base.exists() {
    load_file(base)?
  } else {
    tracing::debug!(path = %base.display(), "settings file missing, using defaults");
    PersistedSettings::default()
  };
  let base = toml::Value::try_from(base).context("failed to convert settings to TOML")?;
  layer_toml(base, overrides)
}

fn layer_toml<I, P>(mut merged: toml::Value, paths: I) -> Result<PersistedSettings>
where
  I: IntoIterator<Item = P>,
  P: AsRef<Path>,
{
  for path in paths {
    let path = path.as_ref();
    if !path.exists() {
      tracing::debug!(path = %path.display(), "settings layer missing, skipping");
      continue;
    }
    let contents = std::fs::read_to_string(path)
      .with_context(|| format!("failed to read settings from '{}'", path.display()))?;
    let layer: toml::Value = toml::from_str(&contents)
      .with_context(|| format!("failed to parse settings TOML '{}'", path.display()))?;
    merged = merge_toml_values(merged, layer, MERGE_DEPTH);
  }

  merged
    .try_into()
    .context("merged settings do not match the settings layout")
}

fn is_toml(path: &Path) -> bool {
  path
    .extension()
    .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
