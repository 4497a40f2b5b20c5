mod command_cli;
mod lexicon;

pub use command_cli::CommandClassifier;
pub use lexicon::LexiconClassifier;

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::{DashboardError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use sentiment_dashboard_common::{run_batch, BatchReport, Classifier, DataTable, RunSettings};
use tracing::{debug, info};

/// プロセス内で共有する分類器
pub type SharedClassifier = Box<dyn Classifier + Send + Sync>;

/// 設定から分類器を構築（1プロセスにつき1回）
pub fn build_classifier(provider: AiProvider, config: &Config) -> Result<SharedClassifier> {
    info!(%provider, "loading classifier");
    match provider {
        AiProvider::Lexicon => Ok(Box::new(LexiconClassifier::new())),
        AiProvider::Command => {
            let program = config
                .classifier_command
                .clone()
                .filter(|c| !c.trim().is_empty())
                .ok_or(DashboardError::MissingClassifierCommand)?;
            Ok(Box::new(CommandClassifier::new(
                program,
                config.classifier_args.clone(),
            )))
        }
    }
}

/// CSVの指定列を一括解析（プログレスバー表示付き）
pub fn analyze_table<C>(
    table: DataTable,
    column: &str,
    classifier: &C,
    settings: &RunSettings,
    verbose: bool,
) -> Result<BatchReport>
where
    C: Classifier + ?Sized,
{
    let total = table.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut last_processed = 0;
    let mut batch_idx = 0;
    let report = run_batch(table, column, classifier, settings, |progress| {
        batch_idx += 1;
        if verbose {
            pb.println(format!(
                "  バッチ {}: {}件",
                batch_idx,
                progress.processed - last_processed
            ));
        }
        debug!(
            processed = progress.processed,
            total = progress.total,
            fraction = progress.fraction,
            "chunk classified"
        );
        last_processed = progress.processed;
        pb.set_position(progress.processed as u64);
    });

    match report {
        Ok(report) => {
            pb.finish_and_clear();
            info!(rows = report.table.len(), classifier = classifier.name(), "batch analysis complete");
            Ok(report)
        }
        Err(e) => {
            pb.abandon();
            Err(e.into())
        }
    }
}
