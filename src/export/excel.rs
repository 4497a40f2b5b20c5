//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを生成してファイルに保存

use crate::error::{DashboardError, Result};
use sentiment_dashboard_common::export::excel_core::generate_excel_buffer;
use sentiment_dashboard_common::{AnalysisTable, BatchSummary};
use std::path::Path;

pub fn generate_excel(table: &AnalysisTable, summary: &BatchSummary, output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(table, summary)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)
        .map_err(|e| DashboardError::ExcelGeneration(format!("保存エラー: {}", e)))?;
    Ok(())
}
