//! CSV出力
//!
//! 元のCSVに sentiment/confidence 列を付加して書き出す（UTF-8、ヘッダー付き）

use crate::error::{DashboardError, Result};
use sentiment_dashboard_common::AnalysisTable;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn generate_csv(table: &AnalysisTable, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)
        .map_err(|e| DashboardError::CsvExport(format!("{}: {}", output_path.display(), e)))?;
    table
        .write_csv(BufWriter::new(file))
        .map_err(|e| DashboardError::CsvExport(e.to_string()))?;
    Ok(())
}
