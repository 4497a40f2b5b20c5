//! Sentiment Dashboard Common Library
//!
//! CLIとデスクトップで共有される型とバッチ分類ロジック

pub mod types;
pub mod error;
pub mod classifier;
pub mod runner;
pub mod table;
pub mod summary;
pub mod parser;
pub mod dashboard;
pub mod export;

pub use types::{ClassificationResult, SentimentLabel};
pub use error::{Error, Result};
pub use classifier::{from_fn, Classifier, FnClassifier};
pub use runner::{classify_all, classify_single, Progress, SingleOutcome, DEFAULT_CHUNK_SIZE, EMPTY_TEXT_WARNING};
pub use table::{AnalysisTable, DataTable, CONFIDENCE_COLUMN, PREVIEW_ROWS, SENTIMENT_COLUMN};
pub use summary::{sentiment_bars, BatchSummary, ConfidenceHistogram, LabelCount, DEFAULT_HISTOGRAM_BINS};
pub use parser::{extract_json, parse_classifier_response};
pub use dashboard::{handle, handle_with_progress, run_batch, BatchReport, Request, Response, RunSettings, SingleReport};
