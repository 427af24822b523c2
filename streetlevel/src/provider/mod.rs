//! Tile fetch collaborators.
//!
//! This module provides the HTTP client abstraction and the batch fetchers
//! the panorama engines download their tiles with. Each engine is generic
//! over [`TileFetcher`] (blocking) or [`AsyncTileFetcher`] (non-blocking),
//! so tests can substitute in-memory fetchers.
//!
//! ```ignore
//! use streetlevel::provider::{HttpTileFetcher, ReqwestClient};
//!
//! let fetcher = HttpTileFetcher::new(ReqwestClient::new()?)?;
//! let bodies = fetcher.fetch_many(&urls)?;
//! ```

mod fetch;
mod http;
mod types;

pub use fetch::{AsyncHttpTileFetcher, HttpTileFetcher};
pub use http::{
    AsyncHttpClient, AsyncReqwestClient, HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS,
};
pub use types::{AsyncTileFetcher, ProviderError, TileFetcher};

#[cfg(test)]
pub use http::tests::{MockAsyncHttpClient, MockHttpClient};
