use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::client::ApiClient;
use crate::error::AppError;
use crate::listing::transform_listing;
use crate::location::LocationProvider;
use crate::models::entry::Entry;
use crate::path_util::{percent_decode, strip_prefix_once};

/// Result of a [`DirController::refresh`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The fetched listing was published as the current view state.
    Published(Vec<Entry>),
    /// A newer refresh was issued while this one was in flight; its
    /// response was discarded and the view state left untouched.
    Superseded,
}

/// View controller for the directory browser.
///
/// Collaborators are injected at construction: an [`ApiClient`] for listing
/// and extraction requests and a [`LocationProvider`] for the browsed
/// location. Concurrent refreshes are resolved last-request-wins: every
/// refresh takes a token from a monotonically increasing sequence and only
/// the holder of the newest token may publish its response.
pub struct DirController<C, L> {
    client: C,
    location: L,
    app_root_prefix: String,
    view_state: Mutex<Vec<Entry>>,
    refresh_seq: AtomicU64,
}

impl<C: ApiClient, L: LocationProvider> DirController<C, L> {
    pub fn new(client: C, location: L, app_root_prefix: impl Into<String>) -> Self {
        DirController {
            client,
            location,
            app_root_prefix: app_root_prefix.into(),
            view_state: Mutex::new(Vec::new()),
            refresh_seq: AtomicU64::new(0),
        }
    }

    /// The injected location provider, for navigation by the embedding
    /// application.
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Snapshot of the currently published view state.
    pub fn entries(&self) -> Vec<Entry> {
        self.view_state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Fetches the listing for the current location, transforms it and
    /// publishes it as the view state. Fully replaces any prior state.
    pub async fn refresh(&self) -> Result<RefreshOutcome, AppError> {
        let token = self.refresh_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let location = self.location.current();
        let suffix = percent_decode(&strip_prefix_once(&location, &self.app_root_prefix))?;

        log::debug!("refreshing listing for {location}");
        let raw = self.client.fetch_listing(&suffix).await?;
        let entries = transform_listing(raw, &location, &self.app_root_prefix);

        // The token comparison happens under the view-state lock so that
        // check and publish are one critical section: a newer refresh has
        // already bumped the sequence before fetching, so a stale holder
        // can never overwrite state the newer one published.
        let mut state = self
            .view_state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.refresh_seq.load(Ordering::SeqCst) != token {
            log::debug!("discarding superseded listing response for {location}");
            return Ok(RefreshOutcome::Superseded);
        }
        *state = entries.clone();
        Ok(RefreshOutcome::Published(entries))
    }

    /// Requests extraction of the item at `path` (an application-rooted
    /// path as published in the view state) and refreshes the listing once
    /// the request has been acknowledged. Failures of either step are
    /// returned to the caller; the view state is left as it was.
    pub async fn request_extract(&self, path: &str) -> Result<RefreshOutcome, AppError> {
        let relative = strip_prefix_once(path, &self.app_root_prefix);
        log::debug!("requesting extraction of {relative}");
        self.client.request_extract(&relative).await?;
        self.refresh().await
    }
}
