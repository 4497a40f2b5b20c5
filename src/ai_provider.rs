use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 分類器の種類
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// 組み込みの辞書ベース分類器（オフライン）
    #[default]
    Lexicon,
    /// 外部コマンド（stdin: JSON配列, stdout: [{label, score}]）
    Command,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::Lexicon => "lexicon",
            AiProvider::Command => "command",
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
