use std::collections::HashMap;
use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::decode::DecodeError;

/// A language code drawn from the configured supported set (e.g. "en", "es").
///
/// Deliberately a newtype over a string rather than a closed enum, so adding
/// a language is a configuration change, not a code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// One cell of a localization entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationCell {
    /// Translated text. An intentionally blank cell (authored with the blank
    /// marker) is `Text("")` — distinct from a missing translation.
    Text(String),
    /// The cell was empty in the source table; the translation is missing.
    Incomplete,
}

/// ロケール → 翻訳値のマッピング（1 キー分）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationEntry {
    pub values: HashMap<LanguageCode, TranslationCell>,
}

/// Errors returned from a lookup against the store.
///
/// Returned, never panicked across the query boundary; the caller decides the
/// fallback (show the key, fall back to a default language, placeholder, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The key is absent from the store
    #[error("Key '{key}' not found")]
    KeyNotFound { key: String },
    /// The key exists but has no translation for the requested language
    #[error("Key '{key}' has no translation for language '{language}'")]
    EntryIncomplete { key: String, language: LanguageCode },
    /// No table has been published yet (still loading, or the first fetch failed)
    #[error("No localization table has been published yet")]
    StoreNotReady,
}

/// Defines errors that may occur while building the store from records
#[derive(Error, Debug)]
pub enum BuildError {
    /// The table has no records at all, not even a header
    #[error("Table is empty, expected a header row")]
    EmptyTable,
    /// The header's key column name does not match the configured one
    #[error("Header key column is '{found}', expected '{expected}'")]
    KeyColumnMismatch { expected: String, found: String },
    /// The header's language set differs from the configured supported set
    #[error(
        "Header languages [{}] do not match the configured set [{}]",
        join_codes(found),
        join_codes(expected)
    )]
    SchemaMismatch {
        expected: Vec<LanguageCode>,
        found: Vec<LanguageCode>,
    },
    /// A data row's key cell is empty after trimming
    #[error("Row {row} has an empty key")]
    EmptyKey { row: u64 },
    /// The underlying decoder rejected a row
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

fn join_codes(codes: &[LanguageCode]) -> String {
    codes.iter().map(LanguageCode::as_str).collect::<Vec<_>>().join(", ")
}

/// Data-quality findings from a successful build. Surfaced, not discarded,
/// so a caller can decide to block publishing or fall back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildDiagnostics {
    /// Keys that occurred more than once (each listed once); last occurrence won
    pub duplicate_keys: Vec<String>,
    /// `(key, language)` pairs whose cell was empty in the source table
    pub incomplete: Vec<(String, LanguageCode)>,
}

impl BuildDiagnostics {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicate_keys.is_empty() && self.incomplete.is_empty()
    }
}

/// A successful build: the immutable store plus its diagnostics.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub store: LocalizationStore,
    pub diagnostics: BuildDiagnostics,
}

/// キー → [`LocalizationEntry`] の不変マッピング
///
/// 構築後は変更されない。公開はオーケストレーターが `Arc` 差し替えで行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationStore {
    pub(super) entries: HashMap<String, LocalizationEntry>,
    pub(super) languages: Vec<LanguageCode>,
}

impl LocalizationStore {
    /// Resolves a key to its translation for one language.
    ///
    /// # Errors
    /// - [`LookupError::KeyNotFound`]: the key is absent
    /// - [`LookupError::EntryIncomplete`]: the key exists but the language's
    ///   cell was recorded as missing
    pub fn resolve(&self, key: &str, language: &LanguageCode) -> Result<&str, LookupError> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| LookupError::KeyNotFound { key: key.to_string() })?;

        match entry.values.get(language) {
            Some(TranslationCell::Text(text)) => Ok(text),
            Some(TranslationCell::Incomplete) | None => Err(LookupError::EntryIncomplete {
                key: key.to_string(),
                language: language.clone(),
            }),
        }
    }

    /// Returns the entry for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LocalizationEntry> {
        self.entries.get(key)
    }

    /// The language columns, in header order.
    #[must_use]
    pub fn languages(&self) -> &[LanguageCode] {
        &self.languages
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
