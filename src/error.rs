use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyScoreError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Fix timestamp {time:.1}s is not after the previous fix at {last:.1}s")]
    NonMonotonicFix { time: f64, last: f64 },

    #[error("Trace index {index} is no longer live (store holds {len} points)")]
    StaleIndex { index: usize, len: usize },
}

pub type SkResult<T> = Result<T, SkyScoreError>;
