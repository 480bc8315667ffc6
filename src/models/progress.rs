use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress of a single extraction, keyed by the archive's relative path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionProgress {
    pub id: String,
    pub total_size: u64,
    pub extracted_size: u64,
    pub destination_path: String,
    pub started_at: DateTime<Utc>,
}

impl ExtractionProgress {
    pub fn is_finished(&self) -> bool {
        self.extracted_size >= self.total_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(extracted: u64, total: u64) -> ExtractionProgress {
        ExtractionProgress {
            id: "docs/archive.tar".to_string(),
            total_size: total,
            extracted_size: extracted,
            destination_path: "/srv/files/docs/archive".to_string(),
            started_at: Utc::now(),
        }
    }

    #[test]
    fn finished_when_all_bytes_extracted() {
        assert!(!progress(0, 10).is_finished());
        assert!(!progress(9, 10).is_finished());
        assert!(progress(10, 10).is_finished());
    }

    #[test]
    fn empty_archive_counts_as_finished() {
        assert!(progress(0, 0).is_finished());
    }
}
