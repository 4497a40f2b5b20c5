pub mod csv;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use sentiment_dashboard_common::BatchReport;
use std::path::{Path, PathBuf};

/// 出力ファイル名のデフォルト（拡張子なし）
pub const DEFAULT_FILE_STEM: &str = "sentiment_analysis_results";

fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_FILE_STEM, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let csv_path = output.join(format!("{}.csv", DEFAULT_FILE_STEM));
        let excel_path = output.join(format!("{}.xlsx", DEFAULT_FILE_STEM));
        (csv_path, excel_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_FILE_STEM);
        let csv_path = parent.join(format!("{}.csv", stem));
        let excel_path = parent.join(format!("{}.xlsx", stem));
        (csv_path, excel_path)
    }
}

/// 解析結果を出力し、書き出したファイルのパスを返す
pub fn export_results(
    report: &BatchReport,
    format: &ExportFormat,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    match format {
        ExportFormat::Csv => {
            let output_path = output_path_for_format(output, "csv");
            println!("- CSVを出力中...");
            csv::generate_csv(&report.table, &output_path)?;
            println!("✔ CSV出力: {}", output_path.display());
            written.push(output_path);
        }
        ExportFormat::Excel => {
            let output_path = output_path_for_format(output, "xlsx");
            println!("- Excelを生成中...");
            excel::generate_excel(&report.table, &report.summary, &output_path)?;
            println!("✔ Excel出力: {}", output_path.display());
            written.push(output_path);
        }
        ExportFormat::Both => {
            let (csv_path, excel_path) = output_paths_for_both(output);

            println!("- CSVを出力中...");
            csv::generate_csv(&report.table, &csv_path)?;
            println!("✔ CSV出力: {}", csv_path.display());

            println!("- Excelを生成中...");
            excel::generate_excel(&report.table, &report.summary, &excel_path)?;
            println!("✔ Excel出力: {}", excel_path.display());

            written.push(csv_path);
            written.push(excel_path);
        }
    }

    Ok(written)
}
