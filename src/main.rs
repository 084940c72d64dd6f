//! Entry point for the loctable command line tool.
//!
//! Fetches a published table, builds the store, and resolves one key:
//! `loctable <url-or-path> <key> [language]`.

use std::process::ExitCode;
use std::sync::Arc;

use loctable::Localizer;
use loctable::config;
use loctable::fetch::{
    Fetch,
    FileFetcher,
    HttpFetcher,
};
use loctable::store::LanguageCode;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let mut args = std::env::args().skip(1);
    let (Some(source), Some(key)) = (args.next(), args.next()) else {
        eprintln!("Usage: loctable <url-or-path> <key> [language]");
        return ExitCode::FAILURE;
    };
    let language = args.next();

    match run(&source, &key, language.as_deref()).await {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    source: &str,
    key: &str,
    language: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    let workspace = std::env::current_dir().ok();
    let mut settings = config::load_settings(workspace.as_deref())?;
    settings.source_url = source.to_string();

    let fetcher: Arc<dyn Fetch> = if std::path::Path::new(source).exists() {
        Arc::new(FileFetcher)
    } else {
        Arc::new(HttpFetcher::new())
    };

    let localizer = Localizer::new(settings, fetcher)?;
    localizer.refresh().await?;

    if let Some(code) = language {
        localizer.set_active_language(LanguageCode::new(code))?;
    }

    Ok(localizer.localize(key)?)
}
