//! sentiment-dashboard
//!
//! テキスト感情分析ダッシュボードのCLI側ライブラリ（分類器の構築、表示、出力）

pub mod ai_provider;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
