//! Excel生成（共通ライブラリ）
//!
//! 結果シート（元の列 + sentiment/confidence）と集計シートを生成

use crate::summary::BatchSummary;
use crate::error::{Error, Result};
use crate::table::AnalysisTable;
use rust_xlsxwriter::*;

const RESULTS_SHEET: &str = "Results";
const SUMMARY_SHEET: &str = "Summary";

/// Excelをバッファに生成
///
/// # Arguments
/// * `table` - 分類結果付きテーブル
/// * `summary` - ラベル分布と確信度ヒストグラム
pub fn generate_excel_buffer(table: &AnalysisTable, summary: &BatchSummary) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let percent_format = Format::new().set_num_format("0.00%");

    let augmented = table.augmented();
    let confidence_col = augmented.column_index(&table.confidence_column())?;

    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(RESULTS_SHEET)
            .map_err(|e| Error::Excel(format!("シート名設定エラー: {}", e)))?;

        for (col, header) in augmented.headers().iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, header, &header_format)
                .map_err(|e| Error::Excel(format!("ヘッダー書き込みエラー: {}", e)))?;
        }

        for (row_idx, (row, result)) in augmented.rows().iter().zip(table.results()).enumerate() {
            let excel_row = row_idx as u32 + 1;
            for (col, value) in row.iter().enumerate() {
                if col == confidence_col {
                    worksheet
                        .write_number_with_format(excel_row, col as u16, result.score as f64, &percent_format)
                        .map_err(|e| Error::Excel(format!("値書き込みエラー: {}", e)))?;
                } else {
                    worksheet
                        .write_string(excel_row, col as u16, value)
                        .map_err(|e| Error::Excel(format!("値書き込みエラー: {}", e)))?;
                }
            }
        }
    }

    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SUMMARY_SHEET)
            .map_err(|e| Error::Excel(format!("シート名設定エラー: {}", e)))?;

        for (col, header) in ["Sentiment", "Count", "Share"].iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(|e| Error::Excel(format!("ヘッダー書き込みエラー: {}", e)))?;
        }

        for (idx, entry) in summary.distribution.iter().enumerate() {
            let row = idx as u32 + 1;
            worksheet
                .write_string(row, 0, entry.label.as_str())
                .map_err(|e| Error::Excel(format!("集計書き込みエラー: {}", e)))?;
            worksheet
                .write_number(row, 1, entry.count as f64)
                .map_err(|e| Error::Excel(format!("集計書き込みエラー: {}", e)))?;
            worksheet
                .write_number_with_format(row, 2, summary.share(&entry.label) as f64, &percent_format)
                .map_err(|e| Error::Excel(format!("集計書き込みエラー: {}", e)))?;
        }

        let total_row = summary.distribution.len() as u32 + 1;
        worksheet
            .write_string_with_format(total_row, 0, "Total", &header_format)
            .map_err(|e| Error::Excel(format!("集計書き込みエラー: {}", e)))?;
        worksheet
            .write_number(total_row, 1, summary.total as f64)
            .map_err(|e| Error::Excel(format!("集計書き込みエラー: {}", e)))?;

        worksheet
            .set_column_width(0, 16)
            .map_err(|e| Error::Excel(format!("列幅設定エラー: {}", e)))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(format!("Excel保存エラー: {}", e)))
}
