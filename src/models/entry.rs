use serde::{Deserialize, Serialize};

/// Kind of a filesystem item, spelled `DIRECTORY`/`FILE` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PathKind {
    Directory,
    File,
}

/// A single item as returned by the listing API, before any view
/// transformation. `path` is relative to the served root and carries a
/// trailing `/` when the item is a directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: PathKind,
    #[serde(default)]
    pub extraction_supported: bool,
}

/// A directory or file record as surfaced to the view: display name plus an
/// application-rooted path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: PathKind,
    #[serde(default)]
    pub extraction_supported: bool,
}

impl Entry {
    /// The synthetic "go up one directory level" record, prepended to
    /// non-root listings.
    pub fn parent() -> Entry {
        Entry {
            name: "..".to_string(),
            path: "../".to_string(),
            kind: PathKind::Directory,
            extraction_supported: false,
        }
    }
}
