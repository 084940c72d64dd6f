//! ローカライズストア
mod build;
pub mod escape;
mod types;

pub use build::build;
pub use types::{
    BuildDiagnostics,
    BuildError,
    BuildOutput,
    LanguageCode,
    LocalizationEntry,
    LocalizationStore,
    LookupError,
    TranslationCell,
};
