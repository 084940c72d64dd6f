//! テーブル取得の境界
//!
//! コアは取得を不透明な協調者として扱う。リトライ・バックオフ・認証は
//! 呼び出し側のフェッチャー実装の責務。

use futures::future::BoxFuture;
use thiserror::Error;

/// Defines errors that may occur while retrieving the raw table
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP request itself failed (connect, TLS, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("Unexpected HTTP status {status} from '{url}'")]
    Status { status: u16, url: String },
    /// Reading a local table file failed
    #[error("Failed to read local table: {0}")]
    Io(#[from] std::io::Error),
}

/// 生テーブルのバイト列を取得する能力
///
/// オブジェクトセーフにするため `BoxFuture` を返す。
pub trait Fetch: Send + Sync {
    /// Retrieves the raw table bytes published at `url`.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, TransportError>>;
}

/// HTTP(S) 経由のフェッチャー
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuses an existing client (connection pool, timeouts already set).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        Box::pin(async move {
            tracing::debug!(url, "Fetching table over HTTP");
            let response = self.client.get(url).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            Ok(response.bytes().await?.to_vec())
        })
    }
}

/// ローカルファイルからのフェッチャー（CLI・オフライン用途）
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl Fetch for FileFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        Box::pin(async move {
            tracing::debug!(path = url, "Reading table from file");
            Ok(tokio::fs::read(url).await?)
        })
    }
}
