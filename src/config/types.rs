use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::store::LanguageCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "supportedLanguages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizationSettings {
    /// Where the published table is fetched from. May stay empty when the
    /// caller supplies the URL per refresh (e.g. the CLI).
    pub source_url: String,

    /// Languages the application supports, in the table's column order.
    /// The table header must carry exactly this set.
    pub supported_languages: Vec<LanguageCode>,

    /// Active language at startup, and the language callers may opt into
    /// falling back to. Must be one of `supported_languages`.
    pub fallback_language: LanguageCode,

    /// Header name of the key column.
    pub key_column: String,

    /// Cell token an author writes to mean "intentionally empty text",
    /// as opposed to a missing translation.
    pub blank_marker: String,
}

impl Default for LocalizationSettings {
    fn default() -> Self {
        Self {
            source_url: String::new(),
            supported_languages: vec![LanguageCode::new("en")],
            fallback_language: LanguageCode::new("en"),
            key_column: "KEY".to_string(),
            blank_marker: "[blank]".to_string(),
        }
    }
}

impl LocalizationSettings {
    /// # Errors
    /// - Empty or duplicated language codes
    /// - Fallback language outside the supported set
    /// - Empty key column name or blank marker
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.supported_languages.is_empty() {
            errors.push(ValidationError::new(
                "supportedLanguages",
                "At least one language code is required. Example: [\"en\", \"es\"]",
            ));
        }

        for (index, code) in self.supported_languages.iter().enumerate() {
            if code.as_str().is_empty() {
                errors.push(ValidationError::new(
                    format!("supportedLanguages[{index}]"),
                    "Language code cannot be empty",
                ));
            } else if code.as_str().chars().any(char::is_whitespace) {
                errors.push(ValidationError::new(
                    format!("supportedLanguages[{index}]"),
                    format!("Language code '{code}' must not contain whitespace"),
                ));
            }
        }

        let mut seen: HashSet<&LanguageCode> = HashSet::new();
        for (index, code) in self.supported_languages.iter().enumerate() {
            if !seen.insert(code) {
                errors.push(ValidationError::new(
                    format!("supportedLanguages[{index}]"),
                    format!("Language code '{code}' is listed more than once"),
                ));
            }
        }

        if !self.supported_languages.contains(&self.fallback_language) {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                format!(
                    "Fallback language '{}' is not in 'supportedLanguages'",
                    self.fallback_language
                ),
            ));
        }

        if self.key_column.trim().is_empty() {
            errors.push(ValidationError::new(
                "keyColumn",
                "The key column name cannot be empty. Example: \"KEY\"",
            ));
        }

        if self.blank_marker.trim().is_empty() {
            errors.push(ValidationError::new(
                "blankMarker",
                "The blank marker cannot be empty. Example: \"[blank]\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
