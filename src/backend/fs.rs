use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::backend::extract::{self, ArchiveType};
use crate::client::ApiClient;
use crate::config::BackendConfig;
use crate::error::AppError;
use crate::models::entry::{PathKind, RawEntry};
use crate::models::progress::ExtractionProgress;
use crate::path_util::is_within_scope;

/// In-process listing source serving a local directory tree.
///
/// Listings carry root-relative forward-slash paths with a trailing `/` on
/// directories, ordered directories-first and then case-insensitively.
/// Extraction unpacks supported archives next to the archive file and
/// tracks per-archive progress in memory.
#[derive(Clone)]
pub struct FsBackend {
    config: BackendConfig,
    progress: Arc<Mutex<HashMap<String, ExtractionProgress>>>,
}

impl FsBackend {
    pub fn new(config: BackendConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(FsBackend {
            config,
            progress: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf, AppError> {
        let relative = relative.trim_start_matches('/');
        let joined = self.config.root_directory.join(relative);
        let escapes = relative.split('/').any(|component| component == "..")
            || !is_within_scope(
                &joined.to_string_lossy(),
                &self.config.root_directory.to_string_lossy(),
            );
        if escapes {
            return Err(AppError::General(format!(
                "path escapes the served root: {relative}"
            )));
        }
        Ok(joined)
    }

    fn list_dir(&self, location: &str) -> Result<Vec<RawEntry>, AppError> {
        let dir_path = self.resolve(location)?;
        if !dir_path.exists() {
            return Err(AppError::DirectoryNotFound(dir_path.display().to_string()));
        }
        if !dir_path.is_dir() {
            return Err(AppError::NotDirectory(dir_path.display().to_string()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir_path)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if !self.config.show_hidden_files && file_name.starts_with('.') {
                continue;
            }

            let is_directory = entry.file_type()?.is_dir();
            let relative = entry
                .path()
                .strip_prefix(&self.config.root_directory)
                .map_err(|_| {
                    AppError::General(format!(
                        "listed entry is outside the served root: {}",
                        entry.path().display()
                    ))
                })?
                .to_string_lossy()
                .replace('\\', "/");
            let mut path = relative;
            if is_directory && !path.ends_with('/') {
                path.push('/');
            }

            entries.push(RawEntry {
                path,
                kind: if is_directory {
                    PathKind::Directory
                } else {
                    PathKind::File
                },
                extraction_supported: !is_directory && ArchiveType::supports(&file_name),
            });
        }

        entries.sort_by(|a, b| {
            let rank = |entry: &RawEntry| match entry.kind {
                PathKind::Directory => 0,
                PathKind::File => 1,
            };
            rank(a)
                .cmp(&rank(b))
                .then_with(|| a.path.to_lowercase().cmp(&b.path.to_lowercase()))
        });

        Ok(entries)
    }

    /// Extracts the archive at the given root-relative path into the first
    /// available directory next to it, tracking progress under the
    /// archive's relative path. A second extraction of the same archive is
    /// rejected while the first is still running.
    pub fn extract(&self, relative: &str) -> Result<ExtractionProgress, AppError> {
        if !ArchiveType::supports(relative) {
            return Err(AppError::Extraction(format!(
                "cannot extract {relative}: unsupported file type"
            )));
        }

        let file = self.resolve(relative)?;
        if !file.exists() {
            return Err(AppError::Extraction(format!(
                "file was not found: {}",
                file.display()
            )));
        }

        let id = relative.trim_start_matches('/').to_string();
        let archive_len = fs::metadata(&file)?.len();

        // The in-progress check and the placeholder insert must be one
        // critical section: a concurrent call for the same archive either
        // sees the unfinished placeholder or runs after this extraction
        // completed. The placeholder carries the archive's byte size as a
        // provisional total so it never reads as finished.
        {
            let mut progress_map = self.lock_progress();
            if let Some(existing) = progress_map.get(&id) {
                if !existing.is_finished() {
                    return Err(AppError::Extraction(format!(
                        "extraction already in progress for {id}"
                    )));
                }
            }
            progress_map.insert(
                id.clone(),
                ExtractionProgress {
                    id: id.clone(),
                    total_size: archive_len.max(1),
                    extracted_size: 0,
                    destination_path: String::new(),
                    started_at: Utc::now(),
                },
            );
        }

        let result = self.run_unpack(&file, &id);
        if result.is_err() {
            self.lock_progress().remove(&id);
        }
        result
    }

    fn run_unpack(&self, file: &Path, id: &str) -> Result<ExtractionProgress, AppError> {
        let bytes = fs::read(file)?;
        let total_size = extract::total_size(&bytes)?;
        let dest = extract::extraction_destination(file);
        fs::create_dir_all(&dest)?;

        {
            let mut map = self.lock_progress();
            if let Some(entry) = map.get_mut(id) {
                entry.total_size = total_size;
                entry.destination_path = dest.display().to_string();
            }
        }

        let progress_map = self.progress.clone();
        let written = extract::unpack(&bytes, &dest, |size| {
            let mut map = progress_map
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(entry) = map.get_mut(id) {
                entry.extracted_size += size;
            }
        })?;
        log::debug!("extracted {written} bytes from {id} into {}", dest.display());

        let mut map = self.lock_progress();
        let entry = map
            .get_mut(id)
            .ok_or_else(|| AppError::Extraction(format!("progress lost for {id}")))?;
        entry.extracted_size = entry.total_size;
        Ok(entry.clone())
    }

    /// Progress of the extraction started for the given archive, if any.
    pub fn extraction_progress(&self, id: &str) -> Option<ExtractionProgress> {
        self.lock_progress().get(id.trim_start_matches('/')).cloned()
    }

    /// Drops progress records of finished extractions started before the
    /// given age.
    pub fn clear_finished_progress(&self, older_than: Duration) {
        let cutoff = Utc::now() - older_than;
        self.lock_progress()
            .retain(|_, progress| !progress.is_finished() || progress.started_at > cutoff);
    }

    fn lock_progress(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<String, ExtractionProgress>> {
        self.progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ApiClient for FsBackend {
    async fn fetch_listing(&self, location: &str) -> Result<Vec<RawEntry>, AppError> {
        self.list_dir(location)
    }

    async fn request_extract(&self, path: &str) -> Result<(), AppError> {
        let backend = self.clone();
        let path = path.to_string();
        tokio::task::spawn_blocking(move || backend.extract(&path))
            .await
            .map_err(|err| AppError::General(format!("extraction task failed: {err}")))??;
        Ok(())
    }
}
