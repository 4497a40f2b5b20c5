//! ダッシュボードのリクエスト処理
//!
//! 入力（テキスト or CSV+列名）と分類器から、結果・チャート用集計・進捗イベントを返す。
//! 描画（CLI出力、デスクトップUI）はこの外側で行う。

use crate::classifier::Classifier;
use crate::error::Result;
use crate::runner::{classify_all, classify_single, Progress, SingleOutcome, DEFAULT_CHUNK_SIZE};
use crate::summary::{sentiment_bars, BatchSummary, DEFAULT_HISTOGRAM_BINS};
use crate::table::{AnalysisTable, DataTable};
use crate::types::{ClassificationResult, SentimentLabel};

/// 解析実行時の設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSettings {
    pub chunk_size: usize,
    pub histogram_bins: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

/// ユーザー操作1回分の入力
#[derive(Debug, Clone)]
pub enum Request {
    Single { text: String },
    Batch { table: DataTable, column: String },
}

/// 単一テキスト解析の結果
#[derive(Debug, Clone, PartialEq)]
pub struct SingleReport {
    pub text: String,
    pub result: ClassificationResult,
    pub bars: [(SentimentLabel, f32); 2],
}

/// バッチ解析の結果
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub table: AnalysisTable,
    pub summary: BatchSummary,
    /// チャンクごとの進捗（発生順）
    pub progress: Vec<Progress>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Warning(&'static str),
    Single(SingleReport),
    Batch(BatchReport),
}

/// リクエストを処理
pub fn handle<C>(request: Request, classifier: &C, settings: &RunSettings) -> Result<Response>
where
    C: Classifier + ?Sized,
{
    handle_with_progress(request, classifier, settings, |_| {})
}

/// リクエストを処理（進捗をリアルタイムでも通知）
pub fn handle_with_progress<C, F>(
    request: Request,
    classifier: &C,
    settings: &RunSettings,
    on_progress: F,
) -> Result<Response>
where
    C: Classifier + ?Sized,
    F: FnMut(Progress),
{
    match request {
        Request::Single { text } => match classify_single(&text, classifier)? {
            SingleOutcome::Warning(message) => Ok(Response::Warning(message)),
            SingleOutcome::Classified(result) => {
                let bars = sentiment_bars(&result);
                Ok(Response::Single(SingleReport { text, result, bars }))
            }
        },
        Request::Batch { table, column } => {
            run_batch(table, &column, classifier, settings, on_progress).map(Response::Batch)
        }
    }
}

/// CSVの指定列をバッチ解析
pub fn run_batch<C, F>(
    table: DataTable,
    column: &str,
    classifier: &C,
    settings: &RunSettings,
    mut on_progress: F,
) -> Result<BatchReport>
where
    C: Classifier + ?Sized,
    F: FnMut(Progress),
{
    let texts = table.column_values(column)?;
    let mut progress = Vec::new();

    let results = classify_all(&texts, classifier, settings.chunk_size, |p| {
        progress.push(p);
        on_progress(p);
    })?;

    let summary = BatchSummary::from_results(&results, settings.histogram_bins);
    let table = AnalysisTable::new(table, column, results)?;

    Ok(BatchReport {
        table,
        summary,
        progress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::from_fn;
    use crate::error::Error;
    use crate::runner::EMPTY_TEXT_WARNING;
    use std::cell::RefCell;

    /// "terrible" を含めばNEGATIVE、それ以外はPOSITIVE
    fn keyword(texts: &[String]) -> Result<Vec<ClassificationResult>> {
        Ok(texts
            .iter()
            .map(|t| {
                if t.contains("terrible") {
                    ClassificationResult::new("NEGATIVE", 0.9)
                } else {
                    ClassificationResult::new("POSITIVE", 0.7)
                }
            })
            .collect())
    }

    #[test]
    fn test_single_warning() {
        let classifier = from_fn(keyword);
        let response = handle(
            Request::Single { text: String::new() },
            &classifier,
            &RunSettings::default(),
        )
        .unwrap();
        assert_eq!(response, Response::Warning(EMPTY_TEXT_WARNING));
    }

    #[test]
    fn test_single_report_has_bars() {
        let classifier = from_fn(keyword);
        let response = handle(
            Request::Single { text: "terrible".into() },
            &classifier,
            &RunSettings::default(),
        )
        .unwrap();

        let Response::Single(report) = response else {
            panic!("single report expected");
        };
        assert_eq!(report.result.label, SentimentLabel::Negative);
        assert_eq!(report.bars[1], (SentimentLabel::Negative, 0.9));
    }

    #[test]
    fn test_batch_end_to_end() {
        let table = DataTable::from_csv_str(
            "review\ngreat product\nterrible service\nit was okay\n",
        )
        .unwrap();
        let calls = RefCell::new(Vec::new());
        let classifier = from_fn(|chunk: &[String]| {
            calls.borrow_mut().push(chunk.len());
            keyword(chunk)
        });
        let settings = RunSettings {
            chunk_size: 2,
            ..Default::default()
        };

        let mut live = Vec::new();
        let response = handle_with_progress(
            Request::Batch {
                table,
                column: "review".into(),
            },
            &classifier,
            &settings,
            |p| live.push(p.fraction),
        )
        .unwrap();

        assert_eq!(*calls.borrow(), vec![2, 1]);
        let Response::Batch(report) = response else {
            panic!("batch report expected");
        };
        assert_eq!(report.table.len(), 3);
        assert_eq!(report.table.results()[1].label, SentimentLabel::Negative);
        assert!(report.table.results().iter().all(|r| r.has_valid_score()));
        assert_eq!(report.progress.len(), 2);
        assert_eq!(report.progress.last().unwrap().fraction, 1.0);
        assert_eq!(live.len(), 2);
        assert_eq!(report.summary.distribution[0].label, SentimentLabel::Positive);
        assert_eq!(report.summary.distribution[0].count, 2);
    }

    #[test]
    fn test_batch_missing_column() {
        let table = DataTable::from_csv_str("text\nhello\n").unwrap();
        let classifier = from_fn(keyword);
        let err = handle(
            Request::Batch {
                table,
                column: "review".into(),
            },
            &classifier,
            &RunSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound(_)));
    }
}
