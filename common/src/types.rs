//! 分類結果の型定義
//!
//! CLIとデスクトップで共有される型:
//! - SentimentLabel: モデルが返すラベル（POSITIVE/NEGATIVE/その他）
//! - ClassificationResult: テキスト1件の分類結果

use serde::{Deserialize, Serialize};
use std::fmt;

/// 感情ラベル
///
/// 二値モデルは POSITIVE/NEGATIVE のみ返すが、
/// 多クラスモデルのラベルは `Other` にそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Other(String),
}

impl SentimentLabel {
    pub fn as_str(&self) -> &str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Other(label) => label.as_str(),
        }
    }

    /// 大文字小文字を区別せずにパース
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("positive") {
            SentimentLabel::Positive
        } else if s.eq_ignore_ascii_case("negative") {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Other(s.to_string())
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SentimentLabel {
    fn from(s: String) -> Self {
        SentimentLabel::parse(&s)
    }
}

impl From<&str> for SentimentLabel {
    fn from(s: &str) -> Self {
        SentimentLabel::parse(s)
    }
}

impl From<SentimentLabel> for String {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// テキスト1件の分類結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: SentimentLabel,

    /// 予測ラベルの確信度 (0.0-1.0)
    pub score: f32,
}

impl ClassificationResult {
    pub fn new(label: impl Into<SentimentLabel>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    pub fn has_valid_score(&self) -> bool {
        (0.0..=1.0).contains(&self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse_case_insensitive() {
        assert_eq!(SentimentLabel::parse("positive"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::parse(" NEGATIVE "), SentimentLabel::Negative);
        assert_eq!(
            SentimentLabel::parse("neutral"),
            SentimentLabel::Other("neutral".to_string())
        );
    }

    #[test]
    fn test_label_display() {
        assert_eq!(SentimentLabel::Positive.to_string(), "POSITIVE");
        assert_eq!(SentimentLabel::Other("NEUTRAL".into()).to_string(), "NEUTRAL");
    }

    #[test]
    fn test_result_serialize() {
        let result = ClassificationResult::new("POSITIVE", 0.5);
        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"label":"POSITIVE","score":0.5}"#);
    }

    #[test]
    fn test_result_deserialize_lowercase_label() {
        let json = r#"{"label": "negative", "score": 0.91}"#;
        let result: ClassificationResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!(result.has_valid_score());
    }

    #[test]
    fn test_score_out_of_range() {
        assert!(!ClassificationResult::new("POSITIVE", 1.2).has_valid_score());
        assert!(!ClassificationResult::new("POSITIVE", -0.1).has_valid_score());
    }
}
