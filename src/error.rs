use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("分類コマンドが設定されていません。`sentiment-dashboard config --set-command YOUR_COMMAND` で設定してください")]
    MissingClassifierCommand,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("解析する列が指定されていません。--column で指定してください（候補: {0}）")]
    MissingColumn(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("CSV出力エラー: {0}")]
    CsvExport(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] sentiment_dashboard_common::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
