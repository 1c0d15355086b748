pub mod config;

use std::path::{
  Path,
  PathBuf,
};

use anyhow::{
  Context,
  Result,
};
use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

pub use config::{
  PersistedFormatOptions,
  PersistedHeadingGaps,
  PersistedOtherGaps,
  PersistedOtherOptions,
  PersistedSettings,
  load_file,
  load_layered,
  load_layered_toml,
  save_file,
};

const APP_DIR: &str = "the-formatter";

/// Directory holding the formatter's settings.
///
/// `THE_FORMATTER_CONFIG_DIR` wins when set, otherwise the platform config
/// directory is used.
pub fn config_dir() -> Result<PathBuf> {
  if let Ok(dir) = std::env::var("THE_FORMATTER_CONFIG_DIR") {
    return Ok(PathBuf::from(dir));
  }
  let strategy = choose_base_strategy().context("unable to find the config directory")?;
  let mut path = strategy.config_dir();
  path.push(APP_DIR);
  Ok(path)
}

/// Settings written by the host on every edit.
pub fn settings_file() -> Result<PathBuf> {
  Ok(config_dir()?.join("settings.json"))
}

/// Hand-edited overrides, layered over [`settings_file`] on load.
pub fn user_config_file() -> Result<PathBuf> {
  Ok(config_dir()?.join("config.toml"))
}

/// Merge two TOML documents, merging values from `right` onto `left`
///
/// `merge_depth` sets the nesting depth up to which tables are merged instead
/// of overridden. Below that depth, and for any non-table value, `right`
/// replaces `left` outright.
///
/// With a depth of 2, merging
///
/// ```toml
/// [headingGaps]
/// beforeSubHeadings = "4"
/// ```
///
/// onto
///
/// ```toml
/// [headingGaps]
/// beforeTopLevelHeadings = "3"
/// beforeSubHeadings = "2"
/// ```
///
/// keeps `beforeTopLevelHeadings = "3"` and takes `beforeSubHeadings = "4"`.
pub fn merge_toml_values(left: toml::Value, right: toml::Value, merge_depth: usize) -> toml::Value {
  use toml::Value;

  match (left, right) {
    (Value::Table(mut left_map), Value::Table(right_map)) if merge_depth > 0 => {
      for (rname, rvalue) in right_map {
        let merged = match left_map.remove(&rname) {
          Some(lvalue) => merge_toml_values(lvalue, rvalue, merge_depth - 1),
          None => rvalue,
        };
        left_map.insert(rname, merged);
      }
      Value::Table(left_map)
    },
    (_, value) => value,
  }
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create '{}'", parent.display()))?;
  }
  Ok(())
}
