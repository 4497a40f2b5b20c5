//! 集計（チャート用データ）
//!
//! - 単一テキスト: POSITIVE/NEGATIVE の棒グラフ値
//! - バッチ: ラベル分布（円グラフ）と確信度ヒストグラム

use crate::types::{ClassificationResult, SentimentLabel};
use serde::Serialize;
use std::collections::HashMap;

/// ヒストグラムのビン数デフォルト
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// 単一テキスト結果の棒グラフ値
///
/// 予測ラベル側はscore、反対側は 1-score。
/// 二値以外のラベルの場合は両方 1-score。
pub fn sentiment_bars(result: &ClassificationResult) -> [(SentimentLabel, f32); 2] {
    let positive = if result.label == SentimentLabel::Positive {
        result.score
    } else {
        1.0 - result.score
    };
    let negative = if result.label == SentimentLabel::Negative {
        result.score
    } else {
        1.0 - result.score
    };
    [
        (SentimentLabel::Positive, positive),
        (SentimentLabel::Negative, negative),
    ]
}

/// ラベルごとの件数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: SentimentLabel,
    pub count: usize,
}

/// 確信度ヒストグラム（ラベル別）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceHistogram {
    pub bins: usize,
    pub labels: Vec<SentimentLabel>,
    /// counts[ラベル][ビン]
    pub counts: Vec<Vec<usize>>,
}

impl ConfidenceHistogram {
    pub fn new(results: &[ClassificationResult], labels: Vec<SentimentLabel>, bins: usize) -> Self {
        let bins = bins.max(1);
        let mut counts = vec![vec![0; bins]; labels.len()];

        for result in results {
            if let Some(label_idx) = labels.iter().position(|l| *l == result.label) {
                counts[label_idx][Self::bin_index(result.score, bins)] += 1;
            }
        }

        Self { bins, labels, counts }
    }

    /// スコアのビン番号（1.0 は最後のビン）
    pub fn bin_index(score: f32, bins: usize) -> usize {
        let clamped = score.clamp(0.0, 1.0);
        ((clamped * bins as f32) as usize).min(bins - 1)
    }

    /// ビンの範囲 [start, end)
    pub fn bin_range(&self, bin: usize) -> (f32, f32) {
        let width = 1.0 / self.bins as f32;
        (bin as f32 * width, (bin + 1) as f32 * width)
    }

    pub fn bin_total(&self, bin: usize) -> usize {
        self.counts.iter().map(|c| c[bin]).sum()
    }

    pub fn max_bin_total(&self) -> usize {
        (0..self.bins).map(|b| self.bin_total(b)).max().unwrap_or(0)
    }
}

/// バッチ解析の集計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    /// 件数の多い順（同数はラベル名順）
    pub distribution: Vec<LabelCount>,
    pub histogram: ConfidenceHistogram,
    pub mean_confidence: f32,
}

impl BatchSummary {
    pub fn from_results(results: &[ClassificationResult], bins: usize) -> Self {
        let mut counts: HashMap<&SentimentLabel, usize> = HashMap::new();
        for result in results {
            *counts.entry(&result.label).or_insert(0) += 1;
        }

        let mut distribution: Vec<LabelCount> = counts
            .into_iter()
            .map(|(label, count)| LabelCount {
                label: label.clone(),
                count,
            })
            .collect();
        distribution.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.label.as_str().cmp(b.label.as_str()))
        });

        let labels = distribution.iter().map(|d| d.label.clone()).collect();
        let histogram = ConfidenceHistogram::new(results, labels, bins);

        let mean_confidence = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.score).sum::<f32>() / results.len() as f32
        };

        Self {
            total: results.len(),
            distribution,
            histogram,
            mean_confidence,
        }
    }

    /// ラベルの割合 (0.0-1.0)
    pub fn share(&self, label: &SentimentLabel) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.distribution
            .iter()
            .find(|d| d.label == *label)
            .map(|d| d.count as f32 / self.total as f32)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(label: &str, score: f32) -> ClassificationResult {
        ClassificationResult::new(label, score)
    }

    #[test]
    fn test_sentiment_bars_positive() {
        let bars = sentiment_bars(&result("POSITIVE", 0.9));
        assert_eq!(bars[0], (SentimentLabel::Positive, 0.9));
        assert!((bars[1].1 - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_sentiment_bars_negative() {
        let bars = sentiment_bars(&result("NEGATIVE", 0.75));
        assert!((bars[0].1 - 0.25).abs() < 1e-6);
        assert_eq!(bars[1].1, 0.75);
    }

    #[test]
    fn test_sentiment_bars_other_label() {
        let bars = sentiment_bars(&result("NEUTRAL", 0.6));
        assert!((bars[0].1 - 0.4).abs() < 1e-6);
        assert!((bars[1].1 - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_distribution_sorted_by_count() {
        let results = vec![
            result("NEGATIVE", 0.9),
            result("POSITIVE", 0.8),
            result("NEGATIVE", 0.7),
            result("NEUTRAL", 0.6),
        ];
        let summary = BatchSummary::from_results(&results, DEFAULT_HISTOGRAM_BINS);

        assert_eq!(summary.total, 4);
        let labels: Vec<&str> = summary.distribution.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["NEGATIVE", "NEUTRAL", "POSITIVE"]);
        assert_eq!(summary.distribution[0].count, 2);
        assert!((summary.share(&SentimentLabel::Negative) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_histogram_bins() {
        let results = vec![
            result("POSITIVE", 1.0),
            result("POSITIVE", 0.95),
            result("NEGATIVE", 0.55),
            result("NEGATIVE", 0.0),
        ];
        let summary = BatchSummary::from_results(&results, 10);
        let hist = &summary.histogram;

        assert_eq!(hist.bins, 10);
        assert_eq!(hist.bin_total(9), 2);
        assert_eq!(hist.bin_total(5), 1);
        assert_eq!(hist.bin_total(0), 1);
        assert_eq!(hist.max_bin_total(), 2);
        let (start, end) = hist.bin_range(9);
        assert!((start - 0.9).abs() < 1e-6);
        assert!((end - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_histogram_zero_bins_falls_back_to_one() {
        let results = vec![result("POSITIVE", 0.3)];
        let summary = BatchSummary::from_results(&results, 0);
        assert_eq!(summary.histogram.bins, 1);
        assert_eq!(summary.histogram.bin_total(0), 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::from_results(&[], DEFAULT_HISTOGRAM_BINS);
        assert_eq!(summary.total, 0);
        assert!(summary.distribution.is_empty());
        assert_eq!(summary.mean_confidence, 0.0);
        assert_eq!(summary.histogram.max_bin_total(), 0);
    }
}
