use std::path::PathBuf;

use sentiment_dashboard_common::{BatchReport, DataTable, SingleReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Single,
    Batch,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Single => "Single Text Analysis",
            Mode::Batch => "Batch Analysis from CSV",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub mode: Mode,
    pub input_text: String,
    pub warning: Option<&'static str>,
    pub single: Option<SingleReport>,
    pub table: Option<DataTable>,
    pub source_path: Option<PathBuf>,
    pub column: Option<String>,
    pub batch: Option<BatchReport>,
    /// sentiment/confidence 付きの表示用テーブル
    pub results_view: Option<DataTable>,
    pub progress: f32,
}

impl AppState {
    /// 新しいCSVを読み込んだらバッチ結果を破棄
    pub fn set_table(&mut self, table: DataTable, path: PathBuf) {
        self.column = table.headers().first().cloned();
        self.table = Some(table);
        self.source_path = Some(path);
        self.batch = None;
        self.results_view = None;
        self.progress = 0.0;
    }

    pub fn set_batch(&mut self, report: BatchReport) {
        self.results_view = Some(report.table.augmented());
        self.batch = Some(report);
        self.progress = 1.0;
    }
}
