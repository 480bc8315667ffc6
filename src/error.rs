use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Not a directory: {0}")]
    NotDirectory(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    General(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
