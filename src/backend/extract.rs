//! Archive handling for the filesystem backend: supported-type detection,
//! extraction destination selection and tar unpacking.

use std::path::{Path, PathBuf};

use tar_no_std::TarArchiveRef;

use crate::error::AppError;

/// Supported archive types, gated by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    Tar,
}

impl ArchiveType {
    pub fn file_extension(self) -> &'static str {
        match self {
            ArchiveType::Tar => "tar",
        }
    }

    /// Detects the archive type of a file name or path, case-insensitively.
    pub fn from_path(path: &str) -> Option<ArchiveType> {
        let extension = Path::new(path).extension()?.to_str()?;
        [ArchiveType::Tar]
            .into_iter()
            .find(|archive_type| archive_type.file_extension().eq_ignore_ascii_case(extension))
    }

    pub fn supports(path: &str) -> bool {
        ArchiveType::from_path(path).is_some()
    }
}

/// Picks the first available extraction directory next to the archive: the
/// archive path minus its extension, then `name (1)`, `name (2)` and so on.
pub(crate) fn extraction_destination(archive: &Path) -> PathBuf {
    let base = archive.with_extension("");
    let mut dest = base.clone();
    let mut i = 1;
    while dest.exists() {
        dest = PathBuf::from(format!("{} ({i})", base.display()));
        i += 1;
    }
    dest
}

/// Sum of the entry sizes of a tar archive, in bytes.
pub(crate) fn total_size(bytes: &[u8]) -> Result<u64, AppError> {
    let archive = parse(bytes)?;
    Ok(archive.entries().map(|entry| entry.data().len() as u64).sum())
}

/// Unpacks a tar archive under `dest`, reporting each written entry's size
/// through `on_entry`. Entry names are sanitized: leading `./` is trimmed
/// and entries with `.` or `..` path components are skipped.
pub(crate) fn unpack(
    bytes: &[u8],
    dest: &Path,
    mut on_entry: impl FnMut(u64),
) -> Result<u64, AppError> {
    let archive = parse(bytes)?;
    let mut written = 0u64;

    for entry in archive.entries() {
        let filename = entry.filename();
        let name = filename
            .as_str()
            .map_err(|_| AppError::Extraction("archive entry name is not valid UTF-8".to_string()))?;
        let name = name.trim_start_matches("./");
        if name.is_empty() {
            continue;
        }
        if name.split('/').any(|component| component == ".." || component == ".") {
            log::warn!("skipping archive entry with unsafe path: {name}");
            continue;
        }

        let target = dest.join(name);
        if name.ends_with('/') {
            std::fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, entry.data())?;

        let size = entry.data().len() as u64;
        written += size;
        on_entry(size);
    }

    Ok(written)
}

fn parse(bytes: &[u8]) -> Result<TarArchiveRef<'_>, AppError> {
    TarArchiveRef::new(bytes)
        .map_err(|_| AppError::Extraction("malformed tar archive".to_string()))
}
