//! フェッチとストア構築のオーケストレーター
//!
//! ライフサイクル「データなし → 取得中 → 準備完了 / 失敗」を所有し、現在の
//! ストアと準備状態をコンシューマーへ公開する。グローバルなシングルトンでは
//! なく、明示的に所有されるインスタンスを参照で引き回す。
//!
//! # 公開の原子性
//!
//! 公開済みストアは `Arc` の差し替えで置き換える。リーダーは差し替え前後の
//! どちらかのストアを常に全体として観測し、構築途中の状態は見えない。

use std::sync::{
    Arc,
    PoisonError,
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
};

use thiserror::Error;
use tokio::sync::{
    Mutex,
    watch,
};

use crate::config::{
    ConfigError,
    LocalizationSettings,
    ValidationError,
};
use crate::decode::{
    DecodeError,
    Decoder,
};
use crate::fetch::{
    Fetch,
    TransportError,
};
use crate::store::{
    self,
    BuildError,
    BuildOutput,
    LanguageCode,
    LocalizationStore,
    LookupError,
};

/// Lifecycle of the orchestrator.
///
/// `Ready` transitions back to `Fetching` only on an explicit refresh; there
/// is no way back to `Uninitialized`. While a refresh is in flight the last
/// good store stays queryable (serve stale while revalidating).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// No fetch has been attempted yet
    Uninitialized,
    /// A fetch/build is in flight
    Fetching,
    /// A store has been published
    Ready,
    /// The first build failed before any store was published
    Failed,
}

/// Defines errors that may occur during a refresh attempt.
///
/// All of these are fatal to that attempt only; a previously published store
/// is always retained.
#[derive(Error, Debug)]
pub enum RefreshError {
    /// The fetch collaborator failed
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The raw text could not be decoded into records
    #[error(transparent)]
    Decode(DecodeError),
    /// The records could not be built into a store
    #[error(transparent)]
    Build(BuildError),
}

impl From<BuildError> for RefreshError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Decode(decode) => Self::Decode(decode),
            other => Self::Build(other),
        }
    }
}

/// Error returned when switching to a language outside the supported set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Language '{language}' is not in the supported set")]
pub struct UnsupportedLanguage {
    pub language: LanguageCode,
}

/// Result of a refresh request that did not itself fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new store was built and published
    Published,
    /// Another refresh was already in flight; this request was ignored
    AlreadyInFlight,
}

/// Diagnostics surface for tooling and logging.
///
/// Not required for the correctness of `localize`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshDiagnostics {
    /// Duplicate keys from the last successful build (last occurrence won)
    pub duplicate_keys: Vec<String>,
    /// `(key, language)` pairs with a missing translation in the last build
    pub incomplete: Vec<(String, LanguageCode)>,
    /// Rendered error of the most recent failed refresh, if any
    pub last_failure: Option<String>,
}

/// プロセス全体で 1 つ所有されるローカライズのフロントエンド
///
/// `refresh` がフェッチ → デコード → 構築 → 公開を 1 本のタスクとして実行し、
/// クエリ (`localize` など) は公開済みストアに対して同期・非ブロッキングで走る。
pub struct Localizer {
    settings: LocalizationSettings,
    fetcher: Arc<dyn Fetch>,

    /// 公開済みストア。`Arc` ごと差し替え、フィールド単位では変更しない。
    published: RwLock<Option<Arc<LocalizationStore>>>,

    /// 現在のアクティブ言語。フェッチでは変更されない。
    active_language: RwLock<LanguageCode>,

    state_tx: watch::Sender<RefreshState>,
    state_rx: watch::Receiver<RefreshState>,

    /// リフレッシュの単一飛行を保証するゲート
    refresh_gate: Mutex<()>,

    diagnostics: RwLock<RefreshDiagnostics>,
}

/// ポイズニングされたロックは内側の値をそのまま使う（ライター側は
/// パニックしない設計のため、実際には到達しない）
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// リフレッシュの future がフェッチ途中で破棄されたとき、`Fetching` のまま
/// 取り残されないように直前の状態へ戻すガード
struct AbandonGuard<'a> {
    state_tx: &'a watch::Sender<RefreshState>,
    previous: RefreshState,
    armed: bool,
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!(state = ?self.previous, "Refresh abandoned, restoring state");
            let _previous = self.state_tx.send_replace(self.previous);
        }
    }
}

impl Localizer {
    /// Creates an orchestrator in the `Uninitialized` state.
    ///
    /// The active language starts as the configured fallback language.
    ///
    /// # Errors
    /// - [`ConfigError::ValidationErrors`]: the settings are invalid, or
    ///   `source_url` is empty (the orchestrator has nothing to fetch from)
    pub fn new(
        settings: LocalizationSettings,
        fetcher: Arc<dyn Fetch>,
    ) -> Result<Self, ConfigError> {
        let mut errors = settings.validate().err().unwrap_or_default();
        if settings.source_url.trim().is_empty() {
            errors.push(ValidationError::new(
                "sourceUrl",
                "A source URL is required to refresh from",
            ));
        }
        if !errors.is_empty() {
            return Err(ConfigError::ValidationErrors(errors));
        }

        let (state_tx, state_rx) = watch::channel(RefreshState::Uninitialized);
        let active_language = RwLock::new(settings.fallback_language.clone());

        Ok(Self {
            settings,
            fetcher,
            published: RwLock::new(None),
            active_language,
            state_tx,
            state_rx,
            refresh_gate: Mutex::new(()),
            diagnostics: RwLock::new(RefreshDiagnostics::default()),
        })
    }

    /// Fetches the table, builds a store, and publishes it.
    ///
    /// Only one refresh runs at a time; a request while another is in flight
    /// is ignored and returns [`RefreshOutcome::AlreadyInFlight`]. On failure
    /// the previously published store (if any) is retained and keeps being
    /// served; the error is also recorded in [`Self::diagnostics`].
    ///
    /// Dropping the returned future abandons the attempt at the fetch await
    /// point; publication happens synchronously after it, so an abandoned
    /// refresh can never corrupt the published store. The lifecycle state is
    /// restored to its pre-refresh value on abandonment.
    ///
    /// # Errors
    /// - [`RefreshError::Transport`] / [`RefreshError::Decode`] /
    ///   [`RefreshError::Build`]: fatal to this attempt only
    pub async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        let Ok(_gate) = self.refresh_gate.try_lock() else {
            tracing::debug!("Refresh already in flight, ignoring request");
            return Ok(RefreshOutcome::AlreadyInFlight);
        };

        let previous = self.state();
        self.transition(RefreshState::Fetching);
        let mut abandon = AbandonGuard { state_tx: &self.state_tx, previous, armed: true };

        let result = self.fetch_and_build().await;
        abandon.armed = false;
        drop(abandon);

        match result {
            Ok(output) => {
                self.publish(output);
                Ok(RefreshOutcome::Published)
            }
            Err(err) => {
                write_lock(&self.diagnostics).last_failure = Some(err.to_string());

                if self.is_ready() {
                    tracing::warn!(error = %err, "Refresh failed, retaining published table");
                    self.transition(RefreshState::Ready);
                } else {
                    tracing::error!(error = %err, "Refresh failed with no published table");
                    self.transition(RefreshState::Failed);
                }
                Err(err)
            }
        }
    }

    /// フェッチ（唯一のサスペンド点）→ デコード → 構築
    async fn fetch_and_build(&self) -> Result<BuildOutput, RefreshError> {
        let url = &self.settings.source_url;
        tracing::info!(url, "Fetching localization table");

        let bytes = self.fetcher.fetch(url).await?;
        let output = store::build(Decoder::new(&bytes).records(), &self.settings)?;

        Ok(output)
    }

    /// 新しいストアを原子的に公開する
    fn publish(&self, output: BuildOutput) {
        let store = Arc::new(output.store);

        *write_lock(&self.published) = Some(Arc::clone(&store));
        *write_lock(&self.diagnostics) = RefreshDiagnostics {
            duplicate_keys: output.diagnostics.duplicate_keys,
            incomplete: output.diagnostics.incomplete,
            last_failure: None,
        };

        tracing::info!(keys = store.len(), "Published localization table");
        self.transition(RefreshState::Ready);
    }

    fn transition(&self, next: RefreshState) {
        tracing::debug!(state = ?next, "Orchestrator state transition");
        let _previous = self.state_tx.send_replace(next);
    }

    /// Whether a store has been published and queries can succeed.
    ///
    /// Stays `true` during a refresh once the first build has been published.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        read_lock(&self.published).is_some()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RefreshState {
        *self.state_rx.borrow()
    }

    /// A receiver that observes every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RefreshState> {
        self.state_rx.clone()
    }

    /// Waits until the first store has been published.
    ///
    /// Returns immediately if one already is. Consumers that prefer to
    /// degrade gracefully can skip this and handle
    /// [`LookupError::StoreNotReady`] instead.
    pub async fn wait_ready(&self) {
        let mut state_rx = self.state_rx.clone();
        while !self.is_ready() {
            if state_rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// The currently published store, if any.
    #[must_use]
    pub fn current_store(&self) -> Option<Arc<LocalizationStore>> {
        read_lock(&self.published).clone()
    }

    /// The current active language.
    #[must_use]
    pub fn active_language(&self) -> LanguageCode {
        read_lock(&self.active_language).clone()
    }

    /// Switches the active language.
    ///
    /// O(1) value swap: never triggers a fetch, rebuild, or state transition —
    /// all languages for a key are already resident once a store is published.
    ///
    /// # Errors
    /// - [`UnsupportedLanguage`]: the code is not in the configured set
    pub fn set_active_language(&self, language: LanguageCode) -> Result<(), UnsupportedLanguage> {
        if !self.settings.supported_languages.contains(&language) {
            return Err(UnsupportedLanguage { language });
        }

        tracing::debug!(language = %language, "Switching active language");
        *write_lock(&self.active_language) = language;
        Ok(())
    }

    /// Resolves a key in the active language.
    ///
    /// # Errors
    /// - [`LookupError::StoreNotReady`]: no store published yet
    /// - [`LookupError::KeyNotFound`] / [`LookupError::EntryIncomplete`]:
    ///   per-store resolution failures; the caller decides the fallback
    pub fn localize(&self, key: &str) -> Result<String, LookupError> {
        let language = self.active_language();
        self.localize_in(key, &language)
    }

    /// Resolves a key in an explicit language.
    pub fn localize_in(&self, key: &str, language: &LanguageCode) -> Result<String, LookupError> {
        let store = self.current_store().ok_or(LookupError::StoreNotReady)?;
        store.resolve(key, language).map(String::from)
    }

    /// Resolves a key in the active language, falling back to the configured
    /// fallback language when the active language's cell is incomplete.
    ///
    /// The fallback is an explicit caller opt-in; `localize` never
    /// substitutes silently.
    pub fn localize_or_fallback(&self, key: &str) -> Result<String, LookupError> {
        match self.localize(key) {
            Err(LookupError::EntryIncomplete { .. }) => {
                self.localize_in(key, &self.settings.fallback_language)
            }
            other => other,
        }
    }

    /// The diagnostics surface: duplicates, incomplete entries, last failure.
    #[must_use]
    pub fn diagnostics(&self) -> RefreshDiagnostics {
        read_lock(&self.diagnostics).clone()
    }

    /// The settings this orchestrator was built with.
    #[must_use]
    pub const fn settings(&self) -> &LocalizationSettings {
        &self.settings
    }
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("settings", &self.settings)
            .field("state", &self.state())
            .field("ready", &self.is_ready())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    use googletest::prelude::*;

    use super::*;
    use crate::fetch::TransportError;

    /// 応答列を順に返すスタブフェッチャー
    struct StubFetcher {
        responses: StdMutex<VecDeque<Result<String, u16>>>,
    }

    impl StubFetcher {
        fn new(responses: Vec<Result<&str, u16>>) -> Arc<Self> {
            Arc::new(Self {
                responses: StdMutex::new(
                    responses.into_iter().map(|r| r.map(String::from)).collect(),
                ),
            })
        }
    }

    impl Fetch for StubFetcher {
        fn fetch<'a>(
            &'a self,
            url: &'a str,
        ) -> futures::future::BoxFuture<'a, Result<Vec<u8>, TransportError>> {
            Box::pin(async move {
                let next = self.responses.lock().unwrap().pop_front();
                match next {
                    Some(Ok(body)) => Ok(body.into_bytes()),
                    Some(Err(status)) => {
                        Err(TransportError::Status { status, url: url.to_string() })
                    }
                    None => panic!("unexpected extra fetch"),
                }
            })
        }
    }

    fn settings() -> LocalizationSettings {
        LocalizationSettings {
            source_url: "https://example.test/table.csv".to_string(),
            supported_languages: vec![LanguageCode::new("en"), LanguageCode::new("es")],
            fallback_language: LanguageCode::new("en"),
            ..LocalizationSettings::default()
        }
    }

    const TABLE: &str = "KEY,en,es\ngreeting,Hello,Hola\nfarewell,Bye,Adios";

    #[tokio::test]
    async fn query_before_first_build_is_store_not_ready() {
        let localizer = Localizer::new(settings(), StubFetcher::new(vec![])).unwrap();

        assert_that!(localizer.state(), eq(RefreshState::Uninitialized));
        assert_that!(localizer.is_ready(), eq(false));
        assert_that!(localizer.localize("greeting"), err(eq(&LookupError::StoreNotReady)));
    }

    #[tokio::test]
    async fn successful_refresh_publishes_store() {
        let localizer = Localizer::new(settings(), StubFetcher::new(vec![Ok(TABLE)])).unwrap();

        let outcome = localizer.refresh().await.unwrap();

        assert_that!(outcome, eq(RefreshOutcome::Published));
        assert_that!(localizer.state(), eq(RefreshState::Ready));
        assert_that!(localizer.is_ready(), eq(true));
        assert_that!(localizer.localize("greeting").unwrap(), eq("Hello"));
        assert_that!(
            localizer.localize_in("greeting", &LanguageCode::new("es")).unwrap(),
            eq("Hola")
        );
    }

    #[tokio::test]
    async fn first_refresh_failure_transitions_to_failed() {
        let localizer = Localizer::new(settings(), StubFetcher::new(vec![Err(503)])).unwrap();

        let result = localizer.refresh().await;

        assert!(matches!(result, Err(RefreshError::Transport(_))));
        assert_that!(localizer.state(), eq(RefreshState::Failed));
        assert_that!(localizer.is_ready(), eq(false));
        assert_that!(localizer.localize("greeting"), err(eq(&LookupError::StoreNotReady)));
        assert_that!(localizer.diagnostics().last_failure, some(contains_substring("503")));
    }

    #[tokio::test]
    async fn failed_refresh_after_success_retains_old_store() {
        let fetcher = StubFetcher::new(vec![Ok(TABLE), Err(500)]);
        let localizer = Localizer::new(settings(), fetcher).unwrap();
        localizer.refresh().await.unwrap();

        let before = localizer.localize("greeting").unwrap();
        let result = localizer.refresh().await;

        assert!(result.is_err());
        assert_that!(localizer.state(), eq(RefreshState::Ready));
        assert_that!(localizer.localize("greeting").unwrap(), eq(before.as_str()));
        assert_that!(localizer.diagnostics().last_failure, some(anything()));
    }

    #[tokio::test]
    async fn schema_mismatch_refresh_keeps_prior_store() {
        let fetcher = StubFetcher::new(vec![Ok(TABLE), Ok("KEY,en\ngreeting,Hello")]);
        let localizer = Localizer::new(settings(), fetcher).unwrap();
        localizer.refresh().await.unwrap();

        let result = localizer.refresh().await;

        assert!(matches!(result, Err(RefreshError::Build(BuildError::SchemaMismatch { .. }))));
        assert_that!(
            localizer.localize_in("farewell", &LanguageCode::new("es")).unwrap(),
            eq("Adios")
        );
    }

    #[tokio::test]
    async fn successful_refresh_swaps_store_atomically() {
        let fetcher =
            StubFetcher::new(vec![Ok(TABLE), Ok("KEY,en,es\ngreeting,Howdy,Buenas")]);
        let localizer = Localizer::new(settings(), fetcher).unwrap();
        localizer.refresh().await.unwrap();
        let old_store = localizer.current_store().unwrap();

        localizer.refresh().await.unwrap();

        let new_store = localizer.current_store().unwrap();
        assert!(!Arc::ptr_eq(&old_store, &new_store));
        // 旧ストアの読み手には差し替え前の内容がそのまま見える
        assert_that!(old_store.resolve("greeting", &LanguageCode::new("en")).unwrap(), eq("Hello"));
        assert_that!(localizer.localize("greeting").unwrap(), eq("Howdy"));
    }

    #[tokio::test]
    async fn switching_language_causes_no_state_transition_or_fetch() {
        let localizer = Localizer::new(settings(), StubFetcher::new(vec![Ok(TABLE)])).unwrap();
        localizer.refresh().await.unwrap();
        let mut state_rx = localizer.subscribe();
        state_rx.mark_unchanged();

        localizer.set_active_language(LanguageCode::new("es")).unwrap();

        assert_that!(localizer.state(), eq(RefreshState::Ready));
        assert!(!state_rx.has_changed().unwrap());
        assert_that!(localizer.localize("greeting").unwrap(), eq("Hola"));
        // スタブに余分なフェッチが飛べば StubFetcher が panic する
    }

    #[tokio::test]
    async fn active_language_defaults_to_fallback() {
        let localizer = Localizer::new(settings(), StubFetcher::new(vec![])).unwrap();

        assert_that!(localizer.active_language(), eq(&LanguageCode::new("en")));
    }

    #[tokio::test]
    async fn unsupported_language_is_rejected() {
        let localizer = Localizer::new(settings(), StubFetcher::new(vec![])).unwrap();

        let result = localizer.set_active_language(LanguageCode::new("pt"));

        assert!(result.is_err());
        assert_that!(localizer.active_language(), eq(&LanguageCode::new("en")));
    }

    #[tokio::test]
    async fn localize_or_fallback_uses_fallback_for_incomplete_cell() {
        let table = "KEY,en,es\nfarewell,Bye,";
        let localizer = Localizer::new(settings(), StubFetcher::new(vec![Ok(table)])).unwrap();
        localizer.refresh().await.unwrap();
        localizer.set_active_language(LanguageCode::new("es")).unwrap();

        assert_that!(
            localizer.localize("farewell"),
            err(matches_pattern!(LookupError::EntryIncomplete { .. }))
        );
        assert_that!(localizer.localize_or_fallback("farewell").unwrap(), eq("Bye"));
    }

    #[tokio::test]
    async fn localize_or_fallback_still_reports_missing_keys() {
        let localizer = Localizer::new(settings(), StubFetcher::new(vec![Ok(TABLE)])).unwrap();
        localizer.refresh().await.unwrap();

        assert_that!(
            localizer.localize_or_fallback("missing"),
            err(matches_pattern!(LookupError::KeyNotFound { .. }))
        );
    }

    #[tokio::test]
    async fn successful_refresh_exposes_build_diagnostics() {
        let table = "KEY,en,es\ngreeting,Hello,Hola\ngreeting,Howdy,Buenas\nfarewell,Bye,";
        let localizer = Localizer::new(settings(), StubFetcher::new(vec![Ok(table)])).unwrap();

        localizer.refresh().await.unwrap();

        let diagnostics = localizer.diagnostics();
        assert_that!(diagnostics.duplicate_keys, elements_are![eq("greeting")]);
        assert_that!(diagnostics.incomplete, len(eq(1)));
        assert_that!(diagnostics.last_failure, none());
    }

    #[tokio::test]
    async fn diagnostics_failure_is_cleared_by_next_success() {
        let fetcher = StubFetcher::new(vec![Err(500), Ok(TABLE)]);
        let localizer = Localizer::new(settings(), fetcher).unwrap();

        let _failed = localizer.refresh().await;
        assert_that!(localizer.diagnostics().last_failure, some(anything()));

        localizer.refresh().await.unwrap();
        assert_that!(localizer.diagnostics().last_failure, none());
    }

    #[tokio::test]
    async fn concurrent_refresh_is_ignored() {
        /// 通知を受けるまで応答を保留するフェッチャー
        struct BlockingFetcher {
            release: tokio::sync::Notify,
        }

        impl Fetch for BlockingFetcher {
            fn fetch<'a>(
                &'a self,
                _url: &'a str,
            ) -> futures::future::BoxFuture<'a, Result<Vec<u8>, TransportError>> {
                Box::pin(async move {
                    self.release.notified().await;
                    Ok(TABLE.as_bytes().to_vec())
                })
            }
        }

        let fetcher = Arc::new(BlockingFetcher { release: tokio::sync::Notify::new() });
        let localizer =
            Arc::new(Localizer::new(settings(), Arc::clone(&fetcher) as Arc<dyn Fetch>).unwrap());

        let first = tokio::spawn({
            let localizer = Arc::clone(&localizer);
            async move { localizer.refresh().await }
        });

        // 最初のリフレッシュがフェッチで停止するまで待つ
        let mut state_rx = localizer.subscribe();
        while *state_rx.borrow() != RefreshState::Fetching {
            state_rx.changed().await.unwrap();
        }

        let second = localizer.refresh().await.unwrap();
        assert_that!(second, eq(RefreshOutcome::AlreadyInFlight));

        fetcher.release.notify_one();
        let first = first.await.unwrap().unwrap();
        assert_that!(first, eq(RefreshOutcome::Published));
        assert_that!(localizer.localize("greeting").unwrap(), eq("Hello"));
    }

    #[tokio::test]
    async fn abandoned_refresh_restores_previous_state() {
        /// 応答せず保留し続けるフェッチャー
        struct StalledFetcher;

        impl Fetch for StalledFetcher {
            fn fetch<'a>(
                &'a self,
                _url: &'a str,
            ) -> futures::future::BoxFuture<'a, Result<Vec<u8>, TransportError>> {
                Box::pin(futures::future::pending())
            }
        }

        let localizer = Arc::new(Localizer::new(settings(), Arc::new(StalledFetcher)).unwrap());

        let task = tokio::spawn({
            let localizer = Arc::clone(&localizer);
            async move { localizer.refresh().await }
        });

        let mut state_rx = localizer.subscribe();
        while *state_rx.borrow() != RefreshState::Fetching {
            state_rx.changed().await.unwrap();
        }

        task.abort();
        let _aborted = task.await;

        // フェッチ途中で破棄されても Fetching のまま取り残されない
        assert_that!(localizer.state(), eq(RefreshState::Uninitialized));
        assert_that!(localizer.is_ready(), eq(false));
    }

    #[tokio::test]
    async fn wait_ready_returns_after_publish() {
        let localizer =
            Arc::new(Localizer::new(settings(), StubFetcher::new(vec![Ok(TABLE)])).unwrap());

        let waiter = tokio::spawn({
            let localizer = Arc::clone(&localizer);
            async move {
                localizer.wait_ready().await;
                localizer.localize("greeting")
            }
        });

        localizer.refresh().await.unwrap();

        assert_that!(waiter.await.unwrap().unwrap(), eq("Hello"));
    }

    #[tokio::test]
    async fn invalid_settings_are_rejected_at_construction() {
        let invalid = LocalizationSettings {
            supported_languages: vec![],
            ..settings()
        };

        let result = Localizer::new(invalid, StubFetcher::new(vec![]));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
    }

    #[tokio::test]
    async fn empty_source_url_is_rejected_at_construction() {
        // デフォルト設定は source_url が空。フェッチ先なしでは構築できない。
        let result = Localizer::new(LocalizationSettings::default(), StubFetcher::new(vec![]));

        match result {
            Err(ConfigError::ValidationErrors(errors)) => {
                assert!(errors.iter().any(|e| e.field_path == "sourceUrl"));
            }
            other => panic!("expected ValidationErrors, got {other:?}"),
        }
    }
}
