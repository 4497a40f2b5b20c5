//! バッチ分類ランナー
//!
//! テキスト列を固定サイズのチャンクに分割して分類器を呼び出し、
//! チャンクごとに進捗を通知する。

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::types::ClassificationResult;
use serde::Serialize;

/// 1回の分類器呼び出しで渡す件数のデフォルト
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// 空テキスト時の警告メッセージ
pub const EMPTY_TEXT_WARNING: &str = "Please enter some text to analyze.";

/// チャンク処理後の進捗
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// 処理済み件数
    pub processed: usize,
    /// 全件数
    pub total: usize,
    /// 進捗率 (0.0-1.0)
    pub fraction: f32,
}

impl Progress {
    pub fn new(processed: usize, total: usize) -> Self {
        let fraction = if total == 0 {
            1.0
        } else {
            (processed as f64 / total as f64).min(1.0) as f32
        };
        Self {
            processed,
            total,
            fraction,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

/// 全テキストをチャンク単位で分類
///
/// - チャンクごとに `classifier` を1回呼び出す（最後のチャンクは短くてよい）
/// - 結果は入力順に連結される
/// - 各チャンクの後に `on_progress` を呼ぶ。最後の値は必ず 1.0
/// - 分類器のエラーはそのまま返し、途中結果は破棄する
pub fn classify_all<C, F>(
    texts: &[String],
    classifier: &C,
    chunk_size: usize,
    mut on_progress: F,
) -> Result<Vec<ClassificationResult>>
where
    C: Classifier + ?Sized,
    F: FnMut(Progress),
{
    if chunk_size == 0 {
        return Err(Error::InvalidChunkSize(chunk_size));
    }

    let total = texts.len();
    let mut results = Vec::with_capacity(total);

    for chunk in texts.chunks(chunk_size) {
        let chunk_results = classifier.classify(chunk)?;
        if chunk_results.len() != chunk.len() {
            return Err(Error::ResultCountMismatch {
                expected: chunk.len(),
                actual: chunk_results.len(),
            });
        }
        results.extend(chunk_results);
        on_progress(Progress::new(results.len(), total));
    }

    Ok(results)
}

/// 単一テキスト解析の結果
#[derive(Debug, Clone, PartialEq)]
pub enum SingleOutcome {
    /// 入力が空のため分類しなかった
    Warning(&'static str),
    Classified(ClassificationResult),
}

/// 単一テキストを分類（chunk_size=1 のバッチとして扱う）
pub fn classify_single<C>(text: &str, classifier: &C) -> Result<SingleOutcome>
where
    C: Classifier + ?Sized,
{
    if text.is_empty() {
        return Ok(SingleOutcome::Warning(EMPTY_TEXT_WARNING));
    }

    let mut results = classify_all(&[text.to_string()], classifier, 1, |_| {})?;
    let result = results.pop().ok_or(Error::ResultCountMismatch {
        expected: 1,
        actual: 0,
    })?;
    Ok(SingleOutcome::Classified(result))
}
