//! 設定の型と読み込み
//!
//! 設定はワークスペースの [`SETTINGS_FILE`] から一度読み込み、検証済みの
//! [`LocalizationSettings`] として呼び出し側が所有する。実行中の再読み込みは
//! サポートしない（設定変更はオーケストレーターの作り直し）。

mod types;

use std::path::Path;

pub use types::{
    ConfigError,
    LocalizationSettings,
    ValidationError,
};

/// Settings file looked up in the workspace root.
pub const SETTINGS_FILE: &str = ".loctable.json";

/// Loads validated settings for a workspace.
///
/// Looks for [`SETTINGS_FILE`] under `workspace_root`; a missing file (or
/// `None` root) falls back to [`LocalizationSettings::default`]. Whatever the
/// source, the result is validated before it is returned, so a caller never
/// holds an invalid settings value.
///
/// # Errors
/// - [`ConfigError::IoError`] / [`ConfigError::ParseError`]: the file exists
///   but could not be read or parsed
/// - [`ConfigError::ValidationErrors`]: the settings are invalid
pub fn load_settings(workspace_root: Option<&Path>) -> Result<LocalizationSettings, ConfigError> {
    let settings = match workspace_root {
        Some(root) => read_settings_file(&root.join(SETTINGS_FILE))?.unwrap_or_else(|| {
            tracing::debug!(root = %root.display(), "No settings file, using defaults");
            LocalizationSettings::default()
        }),
        None => LocalizationSettings::default(),
    };

    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!(?settings, "Settings loaded");

    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<Option<LocalizationSettings>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    tracing::debug!(path = %path.display(), "Loading settings file");
    let content = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}
