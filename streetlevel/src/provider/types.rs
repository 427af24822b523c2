//! Provider types and traits

use std::fmt;
use std::future::Future;

/// Errors that can occur while fetching tiles.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed
    HttpError(String),
    /// Invalid response data from provider
    InvalidResponse(String),
    /// A batch returned a different number of buffers than URLs requested
    IncompleteBatch { expected: usize, received: usize },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ProviderError::IncompleteBatch { expected, received } => write!(
                f,
                "Incomplete batch: requested {} tiles, received {}",
                expected, received
            ),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Blocking batch download of tile URLs.
///
/// Implementors must return exactly one buffer per URL, in request order.
/// Stitching relies on list position rather than on any coordinate carried
/// by the response, so reordering results corrupts the output image.
pub trait TileFetcher: Send + Sync {
    /// Downloads every URL in `urls` as one batch.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any single download fails.
    fn fetch_many(&self, urls: &[String]) -> Result<Vec<Vec<u8>>, ProviderError>;
}

/// Non-blocking batch download of tile URLs.
///
/// Same contract as [`TileFetcher`]: one buffer per URL, request order,
/// atomic failure.
pub trait AsyncTileFetcher: Send + Sync {
    /// Downloads every URL in `urls` as one concurrent batch.
    fn fetch_many(
        &self,
        urls: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<u8>>, ProviderError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = ProviderError::HttpError("HTTP 404 Not Found".to_string());
        assert_eq!(err.to_string(), "HTTP error: HTTP 404 Not Found");
    }

    #[test]
    fn test_incomplete_batch_display() {
        let err = ProviderError::IncompleteBatch {
            expected: 16,
            received: 15,
        };
        assert_eq!(
            err.to_string(),
            "Incomplete batch: requested 16 tiles, received 15"
        );
    }

    #[test]
    fn test_fetcher_traits_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn TileFetcher>();
    }
}
