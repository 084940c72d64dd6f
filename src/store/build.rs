//! レコード列からストアを構築する
//!
//! 構築は入力テキストと設定された言語セットの純粋関数。グローバル状態の
//! 読み書きは行わない。

use std::collections::{
    BTreeSet,
    HashMap,
    HashSet,
};

use crate::config::LocalizationSettings;
use crate::decode::{
    DecodeError,
    RawRecord,
};
use crate::store::escape;
use crate::store::types::{
    BuildDiagnostics,
    BuildError,
    BuildOutput,
    LanguageCode,
    LocalizationEntry,
    LocalizationStore,
    TranslationCell,
};

/// Builds an immutable [`LocalizationStore`] from decoded records.
///
/// The first record is consumed as the header: key column name, then the
/// language columns in order. The header's language set must equal the
/// configured supported set exactly — a partially supported table fails fast
/// with [`BuildError::SchemaMismatch`] instead of degrading at runtime.
///
/// Data rows are trimmed, escape-decoded once, and ingested with last-wins
/// duplicate handling. Duplicates and empty cells are collected into
/// [`BuildDiagnostics`]; both are data-quality warnings, not fatal errors.
/// Any decoder error aborts the build.
///
/// # Errors
/// - [`BuildError::EmptyTable`]: no header record
/// - [`BuildError::KeyColumnMismatch`] / [`BuildError::SchemaMismatch`]:
///   header does not match the configured schema
/// - [`BuildError::EmptyKey`]: a data row's key is empty after trimming
/// - [`BuildError::Decode`]: the decoder rejected a row
pub fn build<I>(records: I, settings: &LocalizationSettings) -> Result<BuildOutput, BuildError>
where
    I: IntoIterator<Item = Result<RawRecord, DecodeError>>,
{
    let mut records = records.into_iter();

    let header = records.next().ok_or(BuildError::EmptyTable)??;
    let languages = check_header(&header, settings)?;

    let mut entries: HashMap<String, LocalizationEntry> = HashMap::new();
    let mut duplicates: BTreeSet<String> = BTreeSet::new();

    for result in records {
        let record = result?;
        let mut fields = record.fields.iter();

        let key = fields.next().map(|f| f.trim()).unwrap_or_default();
        if key.is_empty() {
            return Err(BuildError::EmptyKey { row: record.index });
        }

        let values = languages
            .iter()
            .zip(fields)
            .map(|(language, raw)| (language.clone(), decode_cell(raw, settings)))
            .collect();

        if entries.insert(key.to_string(), LocalizationEntry { values }).is_some() {
            duplicates.insert(key.to_string());
        }
    }

    let store = LocalizationStore { entries, languages };
    let diagnostics = BuildDiagnostics {
        duplicate_keys: duplicates.into_iter().collect(),
        incomplete: collect_incomplete(&store),
    };

    if !diagnostics.is_clean() {
        tracing::warn!(
            duplicates = diagnostics.duplicate_keys.len(),
            incomplete = diagnostics.incomplete.len(),
            "Table built with data-quality warnings"
        );
    }

    Ok(BuildOutput { store, diagnostics })
}

/// ヘッダー検証。キー列名と言語セットを設定と突き合わせる。
fn check_header(
    header: &RawRecord,
    settings: &LocalizationSettings,
) -> Result<Vec<LanguageCode>, BuildError> {
    let mut fields = header.fields.iter();

    let key_column = fields.next().map(|f| f.trim()).unwrap_or_default();
    if !key_column.eq_ignore_ascii_case(&settings.key_column) {
        return Err(BuildError::KeyColumnMismatch {
            expected: settings.key_column.clone(),
            found: key_column.to_string(),
        });
    }

    let languages: Vec<LanguageCode> = fields.map(|f| LanguageCode::new(f.trim())).collect();

    let found: HashSet<&LanguageCode> = languages.iter().collect();
    let expected: HashSet<&LanguageCode> = settings.supported_languages.iter().collect();
    // セット比較に加えて列数も見る（重複した言語列はセットでは消えてしまう）
    if found != expected || found.len() != languages.len() {
        return Err(BuildError::SchemaMismatch {
            expected: settings.supported_languages.clone(),
            found: languages,
        });
    }

    Ok(languages)
}

/// 1 セル分のデコード。トリム → 空判定 → ブランクマーカー → エスケープ解決。
fn decode_cell(raw: &str, settings: &LocalizationSettings) -> TranslationCell {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        TranslationCell::Incomplete
    } else if trimmed == settings.blank_marker {
        TranslationCell::Text(String::new())
    } else {
        TranslationCell::Text(escape::decode(trimmed))
    }
}

/// Collects `(key, language)` pairs still incomplete in the final store, in
/// sorted order. Computed after ingestion so that a duplicate row completing
/// an earlier empty cell is not reported.
fn collect_incomplete(store: &LocalizationStore) -> Vec<(String, LanguageCode)> {
    let mut incomplete: Vec<(String, LanguageCode)> = store
        .entries
        .iter()
        .flat_map(|(key, entry)| {
            entry.values.iter().filter_map(|(language, cell)| {
                matches!(cell, TranslationCell::Incomplete)
                    .then(|| (key.clone(), language.clone()))
            })
        })
        .collect();
    incomplete.sort();
    incomplete
}
