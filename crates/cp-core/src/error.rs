use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpError {
    #[error("Invalid priority label {label:?} at row {row}")]
    InvalidLabel { row: usize, label: String },
    #[error("Training corpus is empty")]
    EmptyCorpus,
    #[error("Corpus error: {0}")]
    Corpus(String),
    #[error("Model load failed: {0}")]
    ModelLoad(String),
    #[error("Model save failed: {0}")]
    ModelSave(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CpError>;
