use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::LedgerError;

/// Convert a URL to a filesystem-safe cache key
///
/// Every run of non-alphanumeric characters in the trimmed URL collapses
/// into a single `_`.
pub fn cache_key(url: &str) -> String {
    let mut key = String::with_capacity(url.len());
    let mut in_separator = false;
    for c in url.trim().chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c);
            in_separator = false;
        } else if !in_separator {
            key.push('_');
            in_separator = true;
        }
    }
    key
}

/// Flat-file cache of fetched pages, keyed by sanitized URL
///
/// Entries are never expired; staleness is handled by the caller through
/// the force-refetch flag. Shared across runs without locking, so
/// concurrent runs over one directory are last-writer-wins.
#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    /// Create a cache rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.html"))
    }

    /// Return the cached text for a key, if an entry exists
    pub fn load(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    /// Persist page text under a key, creating the cache directory first
    pub fn store(&self, key: &str, text: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), text)
    }
}

/// Network transport that retrieves a page body by URL
///
/// Implemented by the real HTTP client below and by test doubles, so the
/// rest of the pipeline never needs live network access in tests.
#[async_trait]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<String, LedgerError>;
}

/// Transport backed by reqwest, with an identifying User-Agent and a
/// bounded per-request timeout
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the client; a non-success status on any request later
    /// surfaces as a fetch error
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(LedgerError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, LedgerError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LedgerError::Fetch {
                url: url.to_string(),
                source: e,
            })?;

        response.text().await.map_err(|e| LedgerError::Fetch {
            url: url.to_string(),
            source: e,
        })
    }
}

/// Retrieves pages through the cache
///
/// A cache hit returns the stored text without touching the network.
/// A miss (or a forced refetch) performs one GET, persists the body,
/// then pauses for the configured delay so network access stays
/// serialized and rate-limited. No retry: a failed fetch is fatal.
pub struct Fetcher<T: Transport> {
    transport: T,
    cache: PageCache,
    delay: Duration,
}

impl<T: Transport> Fetcher<T> {
    /// Create a fetcher from a transport, a cache and a post-fetch delay
    pub fn new(transport: T, cache: PageCache, delay: Duration) -> Self {
        Self {
            transport,
            cache,
            delay,
        }
    }

    /// Fetch a page, preferring the cache unless `force` is set
    pub async fn fetch(&self, url: &str, force: bool) -> Result<String, LedgerError> {
        let key = cache_key(url);

        if !force {
            if let Some(text) = self.cache.load(&key) {
                ::log::debug!("Cache hit for {}", url);
                return Ok(text);
            }
        }

        ::log::info!("Fetching {}", url);
        let text = self.transport.get(url).await?;
        self.cache.store(&key, &text)?;
        tokio::time::sleep(self.delay).await;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport double that counts network calls
    struct CountingTransport {
        body: String,
        calls: AtomicUsize,
    }

    impl CountingTransport {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn get(&self, _url: &str) -> Result<String, LedgerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    fn test_fetcher(body: &str, dir: &std::path::Path) -> Fetcher<CountingTransport> {
        Fetcher::new(
            CountingTransport::new(body),
            PageCache::new(dir),
            Duration::from_millis(0),
        )
    }

    #[test]
    fn test_cache_key_collapses_non_alphanumeric_runs() {
        assert_eq!(
            cache_key("https://example.com/wiki/Loot"),
            "https_example_com_wiki_Loot"
        );
        assert_eq!(cache_key("  a+b==c  "), "a_b_c");
        assert_eq!(cache_key("plain123"), "plain123");
    }

    #[test]
    fn test_cache_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());

        assert!(cache.load("missing").is_none());
        cache.store("key", "<html>hi</html>").unwrap();
        assert_eq!(cache.load("key").as_deref(), Some("<html>hi</html>"));
    }

    #[tokio::test]
    async fn test_fetch_is_idempotent_over_cache() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = test_fetcher("<html>page</html>", dir.path());
        let url = "https://example.com/wiki/Widget";

        let first = fetcher.fetch(url, false).await.unwrap();
        let second = fetcher.fetch(url, false).await.unwrap();

        assert_eq!(first, second);
        // Exactly one network call for two fetches
        assert_eq!(fetcher.transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_force_refetch_bypasses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = test_fetcher("<html>page</html>", dir.path());
        let url = "https://example.com/wiki/Widget";

        fetcher.fetch(url, false).await.unwrap();
        fetcher.fetch(url, true).await.unwrap();

        assert_eq!(fetcher.transport.calls.load(Ordering::SeqCst), 2);
    }
}
