//! 辞書ベースの感情分類器
//!
//! 単語ごとの極性を合計し、ロジスティック関数で POSITIVE/NEGATIVE の確信度に変換する。
//! - 否定語の直後 NEGATION_WINDOW 語は極性を反転
//! - 強調語は直後の感情語の極性を倍率で調整

use regex::Regex;
use sentiment_dashboard_common::{Classifier, ClassificationResult, Result, SentimentLabel};
use std::collections::{HashMap, HashSet};

/// 否定語の影響が及ぶ語数
const NEGATION_WINDOW: usize = 3;
/// 極性合計 -> 確率 の傾き
const STEEPNESS: f32 = 3.0;
/// 強調語を重ねたときの倍率の上限
const MAX_MULTIPLIER: f32 = 4.0;

const POSITIVE_WORDS: &[(&str, f32)] = &[
    ("love", 0.8),
    ("loved", 0.8),
    ("like", 0.5),
    ("liked", 0.5),
    ("great", 0.8),
    ("good", 0.6),
    ("excellent", 0.9),
    ("amazing", 0.9),
    ("awesome", 0.8),
    ("fantastic", 0.9),
    ("wonderful", 0.8),
    ("perfect", 0.9),
    ("best", 0.8),
    ("better", 0.4),
    ("happy", 0.7),
    ("nice", 0.5),
    ("recommend", 0.6),
    ("helpful", 0.6),
    ("friendly", 0.6),
    ("fast", 0.3),
    ("easy", 0.4),
    ("enjoy", 0.6),
    ("enjoyed", 0.6),
    ("pleased", 0.6),
    ("satisfied", 0.6),
    ("beautiful", 0.7),
    ("works", 0.3),
    ("fine", 0.3),
    ("okay", 0.3),
    ("ok", 0.3),
    ("thanks", 0.4),
];

const NEGATIVE_WORDS: &[(&str, f32)] = &[
    ("hate", -0.8),
    ("hated", -0.8),
    ("terrible", -0.9),
    ("awful", -0.9),
    ("horrible", -0.9),
    ("bad", -0.6),
    ("worst", -0.9),
    ("worse", -0.5),
    ("poor", -0.6),
    ("disappointing", -0.7),
    ("disappointed", -0.7),
    ("broken", -0.7),
    ("slow", -0.4),
    ("rude", -0.7),
    ("useless", -0.8),
    ("waste", -0.7),
    ("boring", -0.5),
    ("annoying", -0.6),
    ("angry", -0.7),
    ("sad", -0.6),
    ("expensive", -0.3),
    ("problem", -0.5),
    ("fail", -0.7),
    ("failed", -0.7),
    ("wrong", -0.5),
    ("dirty", -0.6),
    ("unhelpful", -0.7),
    ("refund", -0.4),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "neither", "nor", "cannot", "hardly",
    "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt",
    "wasn't", "wasnt", "aren't", "arent", "won't", "wont", "can't", "cant",
];

const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.5),
    ("really", 1.4),
    ("extremely", 1.8),
    ("absolutely", 1.6),
    ("incredibly", 1.7),
    ("so", 1.3),
    ("quite", 1.2),
    ("somewhat", 0.7),
    ("slightly", 0.6),
];

pub struct LexiconClassifier {
    words: HashMap<String, f32>,
    negations: HashSet<String>,
    intensifiers: HashMap<String, f32>,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    pub fn new() -> Self {
        let words = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS)
            .map(|(w, s)| (w.to_string(), *s))
            .collect();
        let negations = NEGATIONS.iter().map(|w| w.to_string()).collect();
        let intensifiers = INTENSIFIERS.iter().map(|(w, m)| (w.to_string(), *m)).collect();

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    /// 単語を追加（既存の単語は上書き）
    pub fn with_word(mut self, word: &str, polarity: f32) -> Self {
        self.words.insert(word.to_lowercase(), polarity);
        self
    }

    fn tokenize(text: &str) -> Vec<String> {
        lazy_static::lazy_static! {
            static ref WORD_RE: Regex = Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap();
        }

        let lower = text.to_lowercase().replace('’', "'");
        WORD_RE
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// テキストの極性合計（正: ポジティブ、負: ネガティブ）
    pub fn polarity(&self, text: &str) -> f32 {
        let mut total: f32 = 0.0;
        let mut negation_left = 0usize;
        let mut multiplier: f32 = 1.0;

        for token in Self::tokenize(text) {
            if let Some(m) = self.intensifiers.get(&token) {
                multiplier = (multiplier * *m).min(MAX_MULTIPLIER);
                continue;
            }

            // 強調語は直後の1語にだけ掛かる
            let weight = std::mem::replace(&mut multiplier, 1.0);
            if self.negations.contains(&token) {
                negation_left = NEGATION_WINDOW;
                continue;
            }

            if let Some(polarity) = self.words.get(&token) {
                let sign: f32 = if negation_left > 0 { -1.0 } else { 1.0 };
                total += *polarity * weight * sign;
            }
            negation_left = negation_left.saturating_sub(1);
        }

        total
    }

    pub fn classify_text(&self, text: &str) -> ClassificationResult {
        let polarity = self.polarity(text);
        let polarity = if polarity.is_finite() { polarity } else { 0.0 };
        let positive = 1.0 / (1.0 + (-STEEPNESS * polarity).exp());
        if positive >= 0.5 {
            ClassificationResult::new(SentimentLabel::Positive, positive)
        } else {
            ClassificationResult::new(SentimentLabel::Negative, 1.0 - positive)
        }
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, texts: &[String]) -> Result<Vec<ClassificationResult>> {
        Ok(texts.iter().map(|t| self.classify_text(t)).collect())
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
