//! loctable
//!
//! リモート公開された CSV テーブルから構築するランタイム用ローカライズストア
//!
//! Raw bytes → [`decode`] → ordered records → [`store`] (keyed mapping) →
//! [`orchestrator::Localizer`] queries → resolved string.

pub mod config;
pub mod decode;
pub mod fetch;
pub mod orchestrator;
pub mod store;

// Localizer を再エクスポート
pub use orchestrator::Localizer;
pub use store::{
    LanguageCode,
    LocalizationStore,
    LookupError,
};
