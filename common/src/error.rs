//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("chunk size must be at least 1 (got {0})")]
    InvalidChunkSize(usize),

    #[error("classifier returned {actual} results for a chunk of {expected} texts")]
    ResultCountMismatch { expected: usize, actual: usize },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("Excel error: {0}")]
    Excel(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
