//! 区切りテキストのデコーダー
//!
//! RFC4180 準拠のクォート処理（クォート内の改行・カンマを保持）で生テキストを
//! 順序付きレコード列に変換する。ヘッダーの意味論はここでは解釈しない。

use csv::ReaderBuilder;
use thiserror::Error;

/// Defines errors that may occur while decoding the raw table text
#[derive(Error, Debug)]
pub enum DecodeError {
    /// A row's field count does not match the header width
    #[error("Row {row} has {found} fields, expected {expected}")]
    MalformedRow {
        /// Zero-based record index (the header is record 0)
        row: u64,
        expected: u64,
        found: u64,
    },
    /// The input is not valid UTF-8
    #[error("Row {row} is not valid UTF-8: {message}")]
    InvalidUtf8 { row: u64, message: String },
    /// Any other parse failure reported by the underlying reader
    #[error("Failed to parse table: {0}")]
    Csv(#[from] csv::Error),
}

/// One decoded table row: ordered raw field strings, first field is the key.
///
/// Ephemeral — consumed by the store build and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Zero-based record index within the table
    pub index: u64,
    /// Field values in column order, quoting already resolved
    pub fields: Vec<String>,
}

/// 区切りテキストを [`RawRecord`] の遅延列へ変換するデコーダー
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: csv::Reader<&'a [u8]>,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder over raw table bytes.
    ///
    /// The header row is not treated specially here; it is yielded as record
    /// 0 and interpreted by the store build. Rows whose width differs from
    /// record 0 fail with [`DecodeError::MalformedRow`].
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(bytes);
        Self { reader }
    }

    /// Returns the finite, lazy record sequence.
    ///
    /// Not restartable; decoding the same input again requires a new
    /// [`Decoder`]. Malformed rows are yielded as errors, never dropped —
    /// the caller decides whether to abort or skip-and-report.
    pub fn records(self) -> impl Iterator<Item = Result<RawRecord, DecodeError>> + 'a {
        self.reader.into_records().enumerate().map(|(index, result)| {
            let index = index as u64;
            match result {
                Ok(record) => Ok(RawRecord {
                    index,
                    fields: record.iter().map(String::from).collect(),
                }),
                Err(err) => Err(classify_error(index, err)),
            }
        })
    }
}

/// csv クレートのエラーをデコーダーのエラー分類に写す
fn classify_error(row: u64, err: csv::Error) -> DecodeError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => DecodeError::MalformedRow {
            row,
            expected: *expected_len,
            found: *len,
        },
        csv::ErrorKind::Utf8 { err: utf8_err, .. } => DecodeError::InvalidUtf8 {
            row,
            message: utf8_err.to_string(),
        },
        _ => DecodeError::Csv(err),
    }
}
