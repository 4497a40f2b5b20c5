//! ターミナル表示
//!
//! プレビュー表、単一テキストの結果、バッチ集計（分布・ヒストグラム）を出力する

use sentiment_dashboard_common::{BatchSummary, DataTable, Response, SingleReport};

/// 棒グラフの幅（文字数）
const BAR_WIDTH: usize = 30;
/// プレビューで1セルに表示する最大文字数
const CELL_MAX_CHARS: usize = 40;

/// 0.0-1.0 の値をASCII棒に変換
pub fn bar(fraction: f32, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f32).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() > CELL_MAX_CHARS {
        let head: String = cell.chars().take(CELL_MAX_CHARS - 1).collect();
        format!("{}…", head)
    } else {
        cell.to_string()
    }
}

pub fn print_preview(table: &DataTable, rows: usize) {
    println!("列: {}", table.headers().join(", "));
    println!("行数: {}\n", table.len());

    for (i, row) in table.head(rows).iter().enumerate() {
        println!("[{}]", i + 1);
        for (header, cell) in table.headers().iter().zip(row) {
            println!("  {}: {}", header, truncate(cell));
        }
    }
}

pub fn print_single(report: &SingleReport) {
    println!("Sentiment: {}", report.result.label);
    println!("Confidence: {:.2}%\n", report.result.score * 100.0);

    for (label, value) in &report.bars {
        println!("  {:<10} {} {:.2}", label.as_str(), bar(*value, BAR_WIDTH), value);
    }
}

pub fn print_batch_summary(summary: &BatchSummary) {
    println!("Sentiment Distribution ({}件)", summary.total);
    for entry in &summary.distribution {
        let share = summary.share(&entry.label);
        println!(
            "  {:<10} {} {:>5} ({:.1}%)",
            entry.label.as_str(),
            bar(share, BAR_WIDTH),
            entry.count,
            share * 100.0
        );
    }
    println!("  平均確信度: {:.2}%\n", summary.mean_confidence * 100.0);

    let histogram = &summary.histogram;
    let max = histogram.max_bin_total().max(1);
    println!("Confidence Score Distribution");
    for bin in 0..histogram.bins {
        let (start, end) = histogram.bin_range(bin);
        let count = histogram.bin_total(bin);
        println!(
            "  {:.2}-{:.2} {} {}",
            start,
            end,
            bar(count as f32 / max as f32, BAR_WIDTH),
            count
        );
    }
}

pub fn print_response(response: &Response) {
    match response {
        Response::Warning(message) => println!("⚠ {}", message),
        Response::Single(report) => print_single(report),
        Response::Batch(report) => print_batch_summary(&report.summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar() {
        assert_eq!(bar(0.0, 4), "....");
        assert_eq!(bar(0.5, 4), "##..");
        assert_eq!(bar(1.0, 4), "####");
        assert_eq!(bar(1.5, 4), "####");
        assert_eq!(bar(-0.2, 4), "....");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        let long = "a".repeat(100);
        let truncated = truncate(&long);
        assert_eq!(truncated.chars().count(), CELL_MAX_CHARS);
        assert!(truncated.ends_with('…'));
    }
}
