//! 分類器レスポンスパーサー
//!
//! 外部分類器の出力からJSONを抽出し、分類結果の配列としてパースする

use crate::error::{Error, Result};
use crate::types::ClassificationResult;

/// レスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の [...] 配列
/// 3. エラー
///
/// # Examples
/// ```
/// use sentiment_dashboard_common::extract_json;
///
/// let response = "result: [{\"label\": \"POSITIVE\", \"score\": 0.9}]";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('['));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 分類器レスポンスをパース
///
/// `[{"label": "POSITIVE", "score": 0.98}, ...]` 形式。
/// 件数が `expected` と異なる場合、scoreが [0,1] 外の場合はエラー。
pub fn parse_classifier_response(response: &str, expected: usize) -> Result<Vec<ClassificationResult>> {
    let json_str = extract_json(response)?;
    let results: Vec<ClassificationResult> = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("分類結果 JSONパースエラー: {}", e)))?;

    if results.len() != expected {
        return Err(Error::ResultCountMismatch {
            expected,
            actual: results.len(),
        });
    }

    if let Some(bad) = results.iter().find(|r| !r.has_valid_score()) {
        return Err(Error::Parse(format!(
            "scoreが範囲外です: {} ({})",
            bad.score, bad.label
        )));
    }

    Ok(results)
}
