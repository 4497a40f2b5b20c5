//! 分類器の境界
//!
//! モデル本体はブラックボックスとして扱い、
//! テキスト列 -> 分類結果列 の関数だけを要求する。

use crate::error::Result;
use crate::types::ClassificationResult;

/// テキスト分類器
///
/// 入力と同じ順序で、入力と同じ件数の結果を返すこと。
pub trait Classifier {
    fn classify(&self, texts: &[String]) -> Result<Vec<ClassificationResult>>;

    /// 表示用の名前
    fn name(&self) -> &str {
        "custom"
    }
}

/// クロージャを分類器として包む（テストのスタブ等）
pub struct FnClassifier<F>(F);

/// クロージャから分類器を作成
///
/// # Examples
/// ```
/// use sentiment_dashboard_common::{from_fn, Classifier, ClassificationResult};
///
/// let stub = from_fn(|texts: &[String]| {
///     Ok(texts.iter().map(|_| ClassificationResult::new("POSITIVE", 1.0)).collect())
/// });
/// let results = stub.classify(&["ok".to_string()]).unwrap();
/// assert_eq!(results.len(), 1);
/// ```
pub fn from_fn<F>(f: F) -> FnClassifier<F>
where
    F: Fn(&[String]) -> Result<Vec<ClassificationResult>>,
{
    FnClassifier(f)
}

impl<F> Classifier for FnClassifier<F>
where
    F: Fn(&[String]) -> Result<Vec<ClassificationResult>>,
{
    fn classify(&self, texts: &[String]) -> Result<Vec<ClassificationResult>> {
        (self.0)(texts)
    }
}
