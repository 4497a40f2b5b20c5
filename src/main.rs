use clap::Parser;
use dialoguer::{Input, Select};
use sentiment_dashboard::{analyzer, cli, config, display, error, export, logging};
use sentiment_dashboard_common::{handle, DataTable, Request, Response};
use cli::{Cli, Commands};
use config::Config;
use error::{DashboardError, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    let config = Config::load()?;
    let provider = cli.provider.unwrap_or(config.provider);

    match cli.command {
        Commands::Analyze { text, json } => {
            let text = match text {
                Some(text) => text,
                None => Input::new()
                    .with_prompt("Enter text to analyze")
                    .allow_empty(true)
                    .interact_text()
                    .map_err(|e| DashboardError::Prompt(e.to_string()))?,
            };

            let classifier = analyzer::build_classifier(provider, &config)?;
            let response = handle(
                Request::Single { text },
                classifier.as_ref(),
                &config.run_settings(),
            )?;

            match (&response, json) {
                (Response::Single(report), true) => {
                    println!("{}", serde_json::to_string_pretty(&report.result)?);
                }
                _ => display::print_response(&response),
            }
        }

        Commands::Batch { input, column, output, format, batch_size } => {
            println!("📊 sentiment-dashboard - 一括解析\n");

            // 1. CSV読み込み
            println!("[1/3] CSVを読み込み中...");
            let table = load_table(&input)?;
            println!("✔ {}行を読み込み\n", table.len());
            display::print_preview(&table, sentiment_dashboard_common::PREVIEW_ROWS);
            println!();

            let column = match column {
                Some(column) => column,
                None => select_column(&table)?,
            };

            let mut settings = config.run_settings();
            if let Some(size) = batch_size {
                settings.chunk_size = size;
            }

            // 2. 分類
            println!("[2/3] 感情分析中... (列: {}, 分類器: {})", column, provider);
            let classifier = analyzer::build_classifier(provider, &config)?;
            let report = analyzer::analyze_table(
                table,
                &column,
                classifier.as_ref(),
                &settings,
                cli.verbose,
            )?;
            println!("✔ 解析完了\n");
            display::print_batch_summary(&report.summary);
            println!();

            // 3. 出力
            println!("[3/3] 結果を保存中...");
            let output = output.unwrap_or_else(|| PathBuf::from("."));
            export::export_results(&report, &format, &output)?;

            println!("\n✅ 完了");
        }

        Commands::Preview { input, rows } => {
            let table = load_table(&input)?;
            display::print_preview(&table, rows);
        }

        Commands::Config { set_provider, set_chunk_size, set_command, command_args, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(provider) = set_provider {
                config.provider = provider;
                println!("✔ 分類器を設定しました: {}", provider);
                changed = true;
            }

            if let Some(size) = set_chunk_size {
                config.set_chunk_size(size)?;
                println!("✔ バッチサイズを設定しました: {}", size);
                changed = true;
            }

            if let Some(command) = set_command {
                config.set_command(command, command_args.unwrap_or_default());
                println!("✔ 分類コマンドを設定しました");
                changed = true;
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  分類器: {}", config.provider);
                println!("  バッチサイズ: {}", config.chunk_size);
                println!("  ヒストグラムのビン数: {}", config.histogram_bins);
                match &config.classifier_command {
                    Some(command) => println!(
                        "  分類コマンド: {} {}",
                        command,
                        config.classifier_args.join(" ")
                    ),
                    None => println!("  分類コマンド: 未設定"),
                }
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn load_table(path: &Path) -> Result<DataTable> {
    if !path.exists() {
        return Err(DashboardError::FileNotFound(path.display().to_string()));
    }
    Ok(DataTable::from_path(path)?)
}

/// 解析する列を対話的に選択（非対話環境ではエラー）
fn select_column(table: &DataTable) -> Result<String> {
    let headers = table.headers();
    if headers.is_empty() || !std::io::stdin().is_terminal() {
        return Err(DashboardError::MissingColumn(headers.join(", ")));
    }

    let selection = Select::new()
        .with_prompt("Select the text column to analyze")
        .items(headers)
        .default(0)
        .interact()
        .map_err(|e| DashboardError::Prompt(e.to_string()))?;

    Ok(headers[selection].clone())
}
