use async_trait::async_trait;

use crate::error::AppError;
use crate::models::entry::RawEntry;

/// Source of raw directory listings and target of extraction requests.
///
/// Implementations wrap whatever transport serves the listing API; the
/// in-process [`FsBackend`](crate::backend::fs::FsBackend) serves a local
/// directory tree directly. `location` is the percent-decoded path of the
/// browsed directory relative to the served root (empty string for the
/// root itself).
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn fetch_listing(&self, location: &str) -> Result<Vec<RawEntry>, AppError>;

    /// Triggers extraction of the archive at `path` (relative to the served
    /// root). Resolves once the request has been acknowledged.
    async fn request_extract(&self, path: &str) -> Result<(), AppError>;
}
