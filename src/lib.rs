//! Core library for a remote directory browser.
//!
//! The crate is split along the seam the browser UI sits on: an
//! [`ApiClient`] supplies raw directory listings and accepts extraction
//! requests, a pure listing transformation turns raw records into view
//! entries, and a [`DirController`] ties the two together with explicit
//! error outcomes and last-request-wins refresh semantics. [`FsBackend`]
//! is an in-process client serving a local directory tree, including tar
//! extraction with progress tracking.

mod backend;
mod client;
mod config;
mod controller;
mod error;
mod listing;
mod location;
mod models;
pub(crate) mod path_util;

pub use backend::extract::ArchiveType;
pub use backend::fs::FsBackend;
pub use client::ApiClient;
pub use config::BackendConfig;
pub use controller::{DirController, RefreshOutcome};
pub use error::AppError;
pub use listing::transform_listing;
pub use location::{LocationProvider, MemoryLocation};
pub use models::entry::{Entry, PathKind, RawEntry};
pub use models::progress::ExtractionProgress;

/// Composition root for a browser over a local directory tree: wires an
/// [`FsBackend`] and an in-memory location into a [`DirController`]
/// mounted under `app_root_prefix`.
pub fn local_browser(
    config: BackendConfig,
    app_root_prefix: &str,
) -> Result<DirController<FsBackend, MemoryLocation>, AppError> {
    let backend = FsBackend::new(config)?;
    let location = MemoryLocation::new(app_root_prefix);
    Ok(DirController::new(backend, location, app_root_prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn local_browser_lists_navigates_and_extracts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/readme.md"), "hello").unwrap();

        let controller = local_browser(BackendConfig::new(dir.path()), "/files").unwrap();

        let outcome = controller.refresh().await.unwrap();
        let entries = match outcome {
            RefreshOutcome::Published(entries) => entries,
            RefreshOutcome::Superseded => panic!("expected published outcome"),
        };
        // root listing: no parent entry
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "docs");
        assert_eq!(entries[0].path, "/files/docs/");
        assert_eq!(entries[0].kind, PathKind::Directory);

        controller.location().navigate("/files/docs");
        controller.refresh().await.unwrap();

        let entries = controller.entries();
        assert_eq!(entries[0], Entry::parent());
        assert_eq!(entries[1].name, "readme.md");
        assert_eq!(entries[1].path, "/files/docs/readme.md");
    }

    #[tokio::test]
    async fn local_browser_surfaces_listing_errors() {
        let dir = tempfile::tempdir().unwrap();
        let controller = local_browser(BackendConfig::new(dir.path()), "/files").unwrap();

        controller.location().navigate("/files/missing");
        let err = controller.refresh().await.unwrap_err();

        assert!(matches!(err, AppError::DirectoryNotFound(_)));
        assert!(controller.entries().is_empty());
    }
}
