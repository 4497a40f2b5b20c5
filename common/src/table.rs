//! CSVテーブル
//!
//! アップロードされたCSVを文字列のまま保持し、
//! 分類結果の列（sentiment, confidence）を行順を保って付加する。

use crate::error::{Error, Result};
use crate::types::ClassificationResult;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// 付加するラベル列
pub const SENTIMENT_COLUMN: &str = "sentiment";
/// 付加する確信度列
pub const CONFIDENCE_COLUMN: &str = "confidence";
/// 付加する列名がテキスト列と重なるときの接尾辞
pub const DERIVED_SUFFIX: &str = "_result";
/// プレビュー表示の行数
pub const PREVIEW_ROWS: usize = 5;

/// ヘッダー付きの文字列テーブル
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// CSVを読み込み（1行目はヘッダー）
    ///
    /// 列数が揃っていない行はCSVエラーになる
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|v| v.to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_reader(content.as_bytes())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 先頭n行
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// 指定列の値を行順に取得
    pub fn column_values(&self, name: &str) -> Result<Vec<String>> {
        let index = self.column_index(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect())
    }

    /// CSVとして書き出し（ヘッダー付き、カンマ区切り）
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::Parse(format!("UTF-8変換エラー: {}", e)))
    }
}

/// 分類結果を付加したテーブル
///
/// 行数・行順は元のテーブルと一致し、i行目の結果はi行目のテキストの分類結果
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTable {
    source: DataTable,
    text_column: String,
    results: Vec<ClassificationResult>,
}

impl AnalysisTable {
    pub fn new(
        source: DataTable,
        text_column: &str,
        results: Vec<ClassificationResult>,
    ) -> Result<Self> {
        source.column_index(text_column)?;
        if results.len() != source.len() {
            return Err(Error::ResultCountMismatch {
                expected: source.len(),
                actual: results.len(),
            });
        }

        Ok(Self {
            source,
            text_column: text_column.to_string(),
            results,
        })
    }

    /// アップロードされた元のテーブル
    pub fn source(&self) -> &DataTable {
        &self.source
    }

    pub fn text_column(&self) -> &str {
        &self.text_column
    }

    pub fn results(&self) -> &[ClassificationResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 付加するラベル列の名前
    pub fn sentiment_column(&self) -> String {
        self.derived_column(SENTIMENT_COLUMN)
    }

    /// 付加する確信度列の名前
    pub fn confidence_column(&self) -> String {
        self.derived_column(CONFIDENCE_COLUMN)
    }

    /// テキスト列は上書きしない（同名なら接尾辞付きで追加）
    fn derived_column(&self, name: &str) -> String {
        if name == self.text_column {
            format!("{}{}", name, DERIVED_SUFFIX)
        } else {
            name.to_string()
        }
    }

    fn column_slot(headers: &mut Vec<String>, name: &str) -> usize {
        match headers.iter().position(|h| h == name) {
            Some(index) => index,
            None => {
                headers.push(name.to_string());
                headers.len() - 1
            }
        }
    }

    /// sentiment/confidence 列を付加したテーブル
    ///
    /// 同名の列が既にあれば値を置き換える（テキスト列を除く）
    pub fn augmented(&self) -> DataTable {
        let mut headers = self.source.headers.clone();
        let sentiment_idx = Self::column_slot(&mut headers, &self.sentiment_column());
        let confidence_idx = Self::column_slot(&mut headers, &self.confidence_column());

        let rows = self
            .source
            .rows
            .iter()
            .zip(&self.results)
            .map(|(row, result)| {
                let mut row = row.clone();
                if row.len() < headers.len() {
                    row.resize(headers.len(), String::new());
                }
                row[sentiment_idx] = result.label.to_string();
                row[confidence_idx] = result.score.to_string();
                row
            })
            .collect();

        DataTable { headers, rows }
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        self.augmented().write_csv(writer)
    }

    pub fn to_csv_string(&self) -> Result<String> {
        self.augmented().to_csv_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentimentLabel;

    const REVIEWS: &str = "id,review\n1,great product\n2,\"terrible, slow service\"\n3,it was okay\n";

    #[test]
    fn test_from_csv_str() {
        let table = DataTable::from_csv_str(REVIEWS).unwrap();
        assert_eq!(table.headers(), &["id", "review"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1][1], "terrible, slow service");
    }

    #[test]
    fn test_column_values_in_row_order() {
        let table = DataTable::from_csv_str(REVIEWS).unwrap();
        let values = table.column_values("review").unwrap();
        assert_eq!(values, vec!["great product", "terrible, slow service", "it was okay"]);
    }

    #[test]
    fn test_missing_column() {
        let table = DataTable::from_csv_str(REVIEWS).unwrap();
        let err = table.column_values("text").unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound(ref c) if c == "text"));
    }

    #[test]
    fn test_ragged_csv_is_error() {
        let err = DataTable::from_csv_str("a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_head() {
        let table = DataTable::from_csv_str(REVIEWS).unwrap();
        assert_eq!(table.head(PREVIEW_ROWS).len(), 3);
        assert_eq!(table.head(2).len(), 2);
    }

    #[test]
    fn test_augmented_appends_columns() {
        let table = DataTable::from_csv_str(REVIEWS).unwrap();
        let results = vec![
            ClassificationResult::new("POSITIVE", 0.9),
            ClassificationResult::new("NEGATIVE", 0.8),
            ClassificationResult::new("POSITIVE", 0.6),
        ];
        let analysis = AnalysisTable::new(table, "review", results).unwrap();
        let augmented = analysis.augmented();

        assert_eq!(augmented.headers(), &["id", "review", "sentiment", "confidence"]);
        assert_eq!(augmented.rows()[1], vec!["2", "terrible, slow service", "NEGATIVE", "0.8"]);
    }

    #[test]
    fn test_existing_sentiment_column_is_replaced() {
        let table = DataTable::from_csv_str("text,sentiment\nhello,old\n").unwrap();
        let analysis = AnalysisTable::new(
            table,
            "text",
            vec![ClassificationResult::new(SentimentLabel::Positive, 1.0)],
        )
        .unwrap();
        let augmented = analysis.augmented();

        assert_eq!(augmented.headers(), &["text", "sentiment", "confidence"]);
        assert_eq!(augmented.rows()[0], vec!["hello", "POSITIVE", "1"]);
    }

    #[test]
    fn test_text_column_named_sentiment_is_kept() {
        let table = DataTable::from_csv_str("sentiment\ngreat product\nterrible\n").unwrap();
        let results = vec![
            ClassificationResult::new("POSITIVE", 0.9),
            ClassificationResult::new("NEGATIVE", 0.9),
        ];
        let analysis = AnalysisTable::new(table, "sentiment", results).unwrap();
        assert_eq!(analysis.sentiment_column(), "sentiment_result");
        assert_eq!(analysis.confidence_column(), "confidence");

        let csv = analysis.to_csv_string().unwrap();
        let reparsed = DataTable::from_csv_str(&csv).unwrap();
        assert_eq!(reparsed.headers(), &["sentiment", "sentiment_result", "confidence"]);
        assert_eq!(
            reparsed.column_values("sentiment").unwrap(),
            vec!["great product", "terrible"]
        );
        assert_eq!(
            reparsed.column_values("sentiment_result").unwrap(),
            vec!["POSITIVE", "NEGATIVE"]
        );
    }

    #[test]
    fn test_text_column_named_confidence_is_kept() {
        let table = DataTable::from_csv_str("confidence\nsure thing\n").unwrap();
        let analysis = AnalysisTable::new(
            table,
            "confidence",
            vec![ClassificationResult::new(SentimentLabel::Positive, 0.75)],
        )
        .unwrap();
        let augmented = analysis.augmented();

        assert_eq!(augmented.headers(), &["confidence", "sentiment", "confidence_result"]);
        assert_eq!(augmented.rows()[0], vec!["sure thing", "POSITIVE", "0.75"]);
    }

    #[test]
    fn test_result_count_must_match_rows() {
        let table = DataTable::from_csv_str(REVIEWS).unwrap();
        let err = AnalysisTable::new(table, "review", vec![]).unwrap_err();
        assert!(matches!(err, Error::ResultCountMismatch { expected: 3, actual: 0 }));
    }

    #[test]
    fn test_csv_quotes_round_trip() {
        let table = DataTable::from_csv_str(REVIEWS).unwrap();
        let csv = table.to_csv_string().unwrap();
        assert!(csv.starts_with("id,review\n"));
        assert_eq!(DataTable::from_csv_str(&csv).unwrap(), table);
    }
}
