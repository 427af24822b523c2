//! Batch tile fetchers.
//!
//! Both fetchers dispatch a whole batch of URLs at once and hand back the
//! response bodies in request order. A single failed download fails the
//! batch; nothing partial is ever returned.

use super::http::{AsyncHttpClient, HttpClient};
use super::types::{AsyncTileFetcher, ProviderError, TileFetcher};
use crate::config::DownloadConfig;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Blocking batch fetcher backed by a dedicated thread pool.
///
/// Each batch is spread across `parallel_downloads` worker threads and
/// collected back in request order.
pub struct HttpTileFetcher<C: HttpClient> {
    client: C,
    pool: rayon::ThreadPool,
}

impl<C: HttpClient> HttpTileFetcher<C> {
    /// Creates a fetcher with the default download configuration.
    pub fn new(client: C) -> Result<Self, ProviderError> {
        Self::with_config(client, &DownloadConfig::default())
    }

    /// Creates a fetcher whose pool size follows `config`.
    pub fn with_config(client: C, config: &DownloadConfig) -> Result<Self, ProviderError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel_downloads().max(1))
            .thread_name(|i| format!("tile-fetch-{}", i))
            .build()
            .map_err(|e| {
                ProviderError::HttpError(format!("Failed to create download pool: {}", e))
            })?;

        Ok(Self { client, pool })
    }
}

impl<C: HttpClient> TileFetcher for HttpTileFetcher<C> {
    fn fetch_many(&self, urls: &[String]) -> Result<Vec<Vec<u8>>, ProviderError> {
        debug!(tiles = urls.len(), "Fetching tile batch");

        let result: Result<Vec<Vec<u8>>, ProviderError> = self
            .pool
            .install(|| urls.par_iter().map(|url| self.client.get(url)).collect());

        if let Err(e) = &result {
            warn!(tiles = urls.len(), error = %e, "Tile batch failed");
        }
        result
    }
}

/// Non-blocking batch fetcher.
///
/// All requests of a batch are in flight at once and awaited as a unit.
pub struct AsyncHttpTileFetcher<C: AsyncHttpClient> {
    client: C,
}

impl<C: AsyncHttpClient> AsyncHttpTileFetcher<C> {
    /// Creates a fetcher around the given async HTTP client.
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: AsyncHttpClient> AsyncTileFetcher for AsyncHttpTileFetcher<C> {
    async fn fetch_many(&self, urls: &[String]) -> Result<Vec<Vec<u8>>, ProviderError> {
        debug!(tiles = urls.len(), "Fetching tile batch");

        let requests: Vec<_> = urls.iter().map(|url| self.client.get(url)).collect();
        let result = futures::future::try_join_all(requests).await;

        if let Err(e) = &result {
            warn!(tiles = urls.len(), error = %e, "Tile batch failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockAsyncHttpClient, MockHttpClient};
    use std::time::Duration;

    /// Echoes the URL back as the body, optionally failing one URL.
    struct EchoClient {
        fail_on: Option<String>,
    }

    impl HttpClient for EchoClient {
        fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
            if self.fail_on.as_deref() == Some(url) {
                return Err(ProviderError::HttpError(format!("HTTP 500 from {}", url)));
            }
            Ok(url.as_bytes().to_vec())
        }
    }

    /// Echo client whose latency decreases with the URL index, so later
    /// requests finish first.
    struct ReverseLatencyClient;

    impl AsyncHttpClient for ReverseLatencyClient {
        async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
            let index: u64 = url.rsplit('/').next().unwrap().parse().unwrap();
            tokio::time::sleep(Duration::from_millis(20 - index)).await;
            Ok(url.as_bytes().to_vec())
        }
    }

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("http://tiles.test/{}", i)).collect()
    }

    #[test]
    fn test_blocking_fetch_preserves_order() {
        let fetcher = HttpTileFetcher::with_config(
            EchoClient { fail_on: None },
            &DownloadConfig::new().with_parallel_downloads(8),
        )
        .unwrap();

        let urls = urls(64);
        let bodies = fetcher.fetch_many(&urls).unwrap();

        assert_eq!(bodies.len(), urls.len());
        for (url, body) in urls.iter().zip(&bodies) {
            assert_eq!(body, url.as_bytes());
        }
    }

    #[test]
    fn test_blocking_fetch_fails_atomically() {
        let urls = urls(16);
        let fetcher = HttpTileFetcher::new(EchoClient {
            fail_on: Some(urls[7].clone()),
        })
        .unwrap();

        let result = fetcher.fetch_many(&urls);
        assert!(matches!(result, Err(ProviderError::HttpError(_))));
    }

    #[test]
    fn test_blocking_fetch_empty_batch() {
        let fetcher = HttpTileFetcher::new(MockHttpClient {
            response: Ok(vec![1]),
        })
        .unwrap();
        assert!(fetcher.fetch_many(&[]).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_async_fetch_preserves_order() {
        let fetcher = AsyncHttpTileFetcher::new(ReverseLatencyClient);

        let urls = urls(16);
        let bodies = fetcher.fetch_many(&urls).await.unwrap();

        assert_eq!(bodies.len(), 16);
        for (url, body) in urls.iter().zip(&bodies) {
            assert_eq!(body, url.as_bytes());
        }
    }

    #[tokio::test]
    async fn test_async_fetch_error_propagates() {
        let fetcher = AsyncHttpTileFetcher::new(MockAsyncHttpClient {
            response: Err(ProviderError::HttpError("404".to_string())),
        });

        let result = fetcher.fetch_many(&urls(4)).await;
        assert!(result.is_err());
    }
}
