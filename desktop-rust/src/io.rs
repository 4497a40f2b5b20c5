use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use sentiment_dashboard::export::{csv::generate_csv, DEFAULT_FILE_STEM};
use sentiment_dashboard_common::{AnalysisTable, DataTable};

pub fn load_table(path: &Path) -> Result<DataTable> {
    DataTable::from_path(path).with_context(|| format!("read {}", path.display()))
}

pub fn save_results(path: &Path, table: &AnalysisTable) -> Result<()> {
    generate_csv(table, path).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn default_results_path(source: Option<&Path>) -> PathBuf {
    let file_name = format!("{DEFAULT_FILE_STEM}.csv");
    match source.and_then(|s| s.parent()) {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_next_to_source() {
        let path = default_results_path(Some(Path::new("data/reviews.csv")));
        assert_eq!(path, PathBuf::from("data/sentiment_analysis_results.csv"));
    }

    #[test]
    fn default_path_without_source() {
        assert_eq!(
            default_results_path(None),
            PathBuf::from("sentiment_analysis_results.csv")
        );
    }
}
