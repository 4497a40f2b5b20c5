use clap::{Parser, Subcommand};
use crate::ai_provider::AiProvider;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sentiment-dashboard")]
#[command(about = "テキスト感情分析ダッシュボード", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 分類器 (lexicon/command)。省略時は設定ファイルの値
    #[arg(long, global = true)]
    pub provider: Option<AiProvider>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// テキスト1件の感情を解析
    Analyze {
        /// 解析するテキスト
        text: Option<String>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// CSVの列を一括解析して結果を出力
    Batch {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 解析する列名（省略時は対話的に選択）
        #[arg(short, long)]
        column: Option<String>,

        /// 出力ファイル/ディレクトリ（デフォルト: ./sentiment_analysis_results.csv）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// バッチサイズ（一度に分類する件数、省略時は設定ファイルの値）
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// CSVの列一覧と先頭行を表示
    Preview {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 表示する行数
        #[arg(short = 'n', long, default_value = "5")]
        rows: usize,
    },

    /// 設定を表示/編集
    Config {
        /// 分類器を設定
        #[arg(long)]
        set_provider: Option<AiProvider>,

        /// バッチサイズを設定
        #[arg(long)]
        set_chunk_size: Option<usize>,

        /// 外部分類コマンドを設定
        #[arg(long)]
        set_command: Option<String>,

        /// 外部分類コマンドの引数
        #[arg(long, num_args = 1.., allow_hyphen_values = true, requires = "set_command")]
        command_args: Option<Vec<String>>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!("both".parse::<ExportFormat>().unwrap(), ExportFormat::Both);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_parse_batch_command() {
        let cli = Cli::parse_from([
            "sentiment-dashboard",
            "batch",
            "reviews.csv",
            "--column",
            "review",
            "-b",
            "2",
            "--format",
            "both",
        ]);
        match cli.command {
            Commands::Batch { input, column, format, batch_size, .. } => {
                assert_eq!(input, PathBuf::from("reviews.csv"));
                assert_eq!(column.as_deref(), Some("review"));
                assert_eq!(format, ExportFormat::Both);
                assert_eq!(batch_size, Some(2));
            }
            _ => panic!("batch command expected"),
        }
    }

    #[test]
    fn test_parse_analyze_without_text() {
        let cli = Cli::parse_from(["sentiment-dashboard", "analyze", "--provider", "lexicon"]);
        assert_eq!(cli.provider, Some(AiProvider::Lexicon));
        assert!(matches!(cli.command, Commands::Analyze { text: None, json: false }));
    }
}
