//! Listing transformation: turns raw API records into view entries and
//! synthesizes the parent-directory navigation record.

use crate::models::entry::{Entry, RawEntry};
use crate::path_util::{leaf_name, strip_trailing_slash};

/// Transforms raw listing records into view entries.
///
/// Each entry's display name is the last segment of its path, derived after
/// ignoring one trailing slash; the rewritten path is the original path
/// (trailing slash intact) mounted under `app_root_prefix`. When
/// `current_location` is not the application root, a synthetic `..` entry is
/// prepended. The relative order of raw entries is preserved.
pub fn transform_listing(
    raw: Vec<RawEntry>,
    current_location: &str,
    app_root_prefix: &str,
) -> Vec<Entry> {
    let mut entries: Vec<Entry> = raw
        .into_iter()
        .map(|raw| Entry {
            name: leaf_name(&raw.path).to_string(),
            path: format!("{app_root_prefix}/{}", raw.path),
            kind: raw.kind,
            extraction_supported: raw.extraction_supported,
        })
        .collect();

    if strip_trailing_slash(current_location) != strip_trailing_slash(app_root_prefix) {
        entries.insert(0, Entry::parent());
    }

    entries
}
