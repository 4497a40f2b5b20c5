use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText};
use eframe::egui::{FontData, FontDefinitions, FontFamily};
use sentiment_dashboard::analyzer::build_classifier;
use sentiment_dashboard::config::Config;
use sentiment_dashboard_common::{
    handle_with_progress, Classifier, DataTable, Progress, Request, Response, RunSettings,
    PREVIEW_ROWS,
};

use crate::charts;
use crate::io::{default_results_path, load_table, save_results};
use crate::model::{AppState, Mode};

const TABLE_ROW_HEIGHT: f32 = 18.0;

type SharedClassifier = Arc<dyn Classifier + Send + Sync>;

enum UiMessage {
    Progress(Progress),
    Done(Result<Response, String>),
}

pub struct DesktopApp {
    state: AppState,
    classifier: Option<SharedClassifier>,
    settings: RunSettings,
    status: String,
    request_rx: Option<Receiver<UiMessage>>,
    running: bool,
}

impl DesktopApp {
    pub fn new() -> Self {
        let mut status = String::new();
        let config = Config::load().unwrap_or_else(|err| {
            status = format!("Config load failed, using defaults: {err}");
            Config::default()
        });

        // 分類器は起動時に1回だけ構築する
        let classifier: Option<SharedClassifier> = match build_classifier(config.provider, &config) {
            Ok(classifier) => Some(Arc::from(classifier)),
            Err(err) => {
                status = format!("Classifier unavailable: {err}");
                None
            }
        };

        Self {
            state: AppState::default(),
            classifier,
            settings: config.run_settings(),
            status,
            request_rx: None,
            running: false,
        }
    }

    fn classifier_name(&self) -> &str {
        self.classifier.as_ref().map(|c| c.name()).unwrap_or("none")
    }

    fn open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .pick_file()
        {
            match load_table(&path) {
                Ok(table) => {
                    self.status = format!("Loaded {} ({} rows)", path.display(), table.len());
                    self.state.set_table(table, path);
                }
                Err(err) => self.status = format!("Load failed: {err:#}"),
            }
        }
    }

    fn save_results(&mut self) {
        let Some(report) = &self.state.batch else {
            self.status = "No results to save".to_string();
            return;
        };
        let default_path = default_results_path(self.state.source_path.as_deref());
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(
                default_path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("sentiment_analysis_results.csv"),
            )
            .save_file()
        {
            match save_results(&path, &report.table) {
                Ok(_) => self.status = format!("Saved {}", path.display()),
                Err(err) => self.status = format!("Save failed: {err:#}"),
            }
        }
    }

    fn run_single(&mut self) {
        self.state.warning = None;
        self.state.single = None;
        let request = Request::Single {
            text: self.state.input_text.clone(),
        };
        self.spawn_request(request);
    }

    fn run_batch(&mut self) {
        let (Some(table), Some(column)) = (&self.state.table, &self.state.column) else {
            self.status = "Open a CSV file and select a column first".to_string();
            return;
        };
        let request = Request::Batch {
            table: table.clone(),
            column: column.clone(),
        };
        self.state.batch = None;
        self.state.results_view = None;
        self.state.progress = 0.0;
        self.spawn_request(request);
    }

    fn spawn_request(&mut self, request: Request) {
        let Some(classifier) = self.classifier.clone() else {
            self.status = "No classifier is configured".to_string();
            return;
        };
        let settings = self.settings;
        let (tx, rx) = mpsc::channel();
        self.request_rx = Some(rx);
        self.running = true;
        self.status = "Analyzing...".to_string();

        std::thread::spawn(move || {
            let progress_tx = tx.clone();
            let result = handle_with_progress(request, &*classifier, &settings, |progress| {
                let _ = progress_tx.send(UiMessage::Progress(progress));
            });
            let _ = tx.send(UiMessage::Done(result.map_err(|err| err.to_string())));
        });
    }

    fn poll_messages(&mut self) {
        let Some(rx) = &self.request_rx else {
            return;
        };

        let Some(result) = drain_messages(rx, &mut self.state.progress) else {
            return;
        };
        self.request_rx = None;
        self.running = false;

        match result {
            Ok(Response::Warning(message)) => {
                self.state.warning = Some(message);
                self.status.clear();
            }
            Ok(Response::Single(report)) => {
                self.state.single = Some(report);
                self.status.clear();
            }
            Ok(Response::Batch(report)) => {
                self.status = format!("Analysis complete! ({} rows)", report.table.len());
                self.state.set_batch(report);
            }
            Err(err) => self.status = format!("Analysis failed: {err}"),
        }
    }

    fn render_single(&mut self, ui: &mut egui::Ui) {
        ui.heading("Analyze Text Sentiment");
        ui.label("Enter text to analyze:");
        ui.add(
            egui::TextEdit::multiline(&mut self.state.input_text)
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );

        if ui
            .add_enabled(!self.running, egui::Button::new("Analyze Sentiment"))
            .clicked()
        {
            self.run_single();
        }
        if self.running {
            ui.spinner();
        }

        if let Some(message) = self.state.warning {
            ui.colored_label(Color32::from_rgb(246, 196, 69), message);
        }

        let Some(report) = &self.state.single else {
            return;
        };

        ui.separator();
        ui.columns(2, |cols| {
            cols[0].label(RichText::new("Sentiment").small());
            cols[0].label(RichText::new(report.result.label.as_str()).heading());
            cols[1].label(RichText::new("Confidence").small());
            cols[1].label(RichText::new(format!("{:.2}%", report.result.score * 100.0)).heading());
        });
        ui.add_space(8.0);
        charts::sentiment_bars(ui, &report.bars);

        if ui.button("Copy as JSON").clicked() {
            match serde_json::to_string_pretty(&report.result) {
                Ok(json) => ui.output_mut(|o| o.copied_text = json),
                Err(err) => self.status = format!("Copy failed: {err}"),
            }
        }
    }

    fn render_batch(&mut self, ui: &mut egui::Ui) {
        ui.heading("Batch Analysis from CSV");
        ui.horizontal(|ui| {
            if ui.add_enabled(!self.running, egui::Button::new("Open CSV...")).clicked() {
                self.open_csv();
            }
            if let Some(path) = &self.state.source_path {
                ui.label(path.display().to_string());
            }
        });

        let Some(table) = &self.state.table else {
            ui.label("Upload a CSV file with a column of text to analyze.");
            return;
        };

        ui.add_space(8.0);
        ui.label("Preview of uploaded data:");
        let preview = DataTable::new(table.headers().to_vec(), table.head(PREVIEW_ROWS).to_vec());
        egui::ScrollArea::horizontal()
            .id_source("preview_scroll")
            .show(ui, |ui| {
                table_grid(ui, "preview_grid", &preview);
            });

        ui.add_space(8.0);
        let headers = table.headers().to_vec();
        let selected = self.state.column.clone().unwrap_or_default();
        egui::ComboBox::from_label("Select text column for analysis")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for header in &headers {
                    ui.selectable_value(&mut self.state.column, Some(header.clone()), header.as_str());
                }
            });

        ui.horizontal(|ui| {
            let enabled = !self.running && self.state.column.is_some();
            if ui.add_enabled(enabled, egui::Button::new("Run Batch Analysis")).clicked() {
                self.run_batch();
            }
            ui.label(format!("Batch size: {}", self.settings.chunk_size));
        });

        if self.running || self.state.batch.is_some() {
            ui.add(egui::ProgressBar::new(self.state.progress).show_percentage());
        }

        let (Some(report), Some(view)) = (&self.state.batch, &self.state.results_view) else {
            return;
        };

        ui.separator();
        ui.colored_label(Color32::from_rgb(0, 204, 150), "Analysis complete!");
        ui.label("Results:");
        egui::ScrollArea::both()
            .id_source("results_scroll")
            .max_height(280.0)
            .show_rows(ui, TABLE_ROW_HEIGHT, view.len(), |ui, range| {
                let rows = DataTable::new(view.headers().to_vec(), view.rows()[range].to_vec());
                table_grid(ui, "results_grid", &rows);
            });

        ui.add_space(12.0);
        ui.heading("Visualization");
        charts::distribution_pie(ui, &report.summary);
        ui.add_space(12.0);
        charts::confidence_histogram(ui, &report.summary.histogram);

        ui.add_space(12.0);
        if ui.button("Download Results as CSV").clicked() {
            self.save_results();
        }
    }
}

const WORKER_LOST: &str = "analysis worker stopped without a result";

/// 受信済みメッセージを処理し、完了していれば結果を返す
///
/// ワーカーが結果を送らずに終了した場合もエラーとして完了扱いにする
fn drain_messages(rx: &Receiver<UiMessage>, progress: &mut f32) -> Option<Result<Response, String>> {
    loop {
        match rx.try_recv() {
            Ok(UiMessage::Progress(p)) => *progress = p.fraction,
            Ok(UiMessage::Done(result)) => return Some(result),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => return Some(Err(WORKER_LOST.to_string())),
        }
    }
}

fn table_grid(ui: &mut egui::Ui, id: &str, table: &DataTable) {
    egui::Grid::new(id).striped(true).min_col_width(60.0).show(ui, |ui| {
        for header in table.headers() {
            ui.label(RichText::new(header).strong());
        }
        ui.end_row();
        for row in table.rows() {
            for cell in row {
                ui.label(cell.as_str());
            }
            ui.end_row();
        }
    });
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\meiryo.ttc",
        r"C:\Windows\Fonts\msgothic.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ];

    // CSVの本文にCJKが含まれても表示できるようにフォールバックを追加
    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("cjk_fallback".to_string(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("cjk_fallback".to_string());
            fonts.families
                .entry(FontFamily::Monospace)
                .or_default()
                .push("cjk_fallback".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.running {
            ctx.request_repaint();
        }
        self.poll_messages();

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Sentiment Analysis Dashboard");
                ui.separator();
                if !self.status.is_empty() {
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                }
            });
            ui.label("Analyze sentiment from text typed in directly or from a column of a CSV file.");
        });

        egui::SidePanel::left("options").resizable(false).show(ctx, |ui| {
            ui.heading("Options");
            ui.label("Choose analysis type:");
            for mode in [Mode::Single, Mode::Batch] {
                ui.radio_value(&mut self.state.mode, mode, mode.label());
            }
            ui.separator();
            ui.label(RichText::new(format!("Classifier: {}", self.classifier_name())).small());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.state.mode {
                Mode::Single => self.render_single(ui),
                Mode::Batch => self.render_batch(ui),
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_reports_progress_until_done() {
        let (tx, rx) = mpsc::channel();
        tx.send(UiMessage::Progress(Progress::new(2, 3))).unwrap();
        let mut progress = 0.0;

        assert!(drain_messages(&rx, &mut progress).is_none());
        assert!(progress > 0.6 && progress < 0.7);

        tx.send(UiMessage::Progress(Progress::new(3, 3))).unwrap();
        tx.send(UiMessage::Done(Ok(Response::Warning("empty")))).unwrap();
        let result = drain_messages(&rx, &mut progress);
        assert_eq!(result, Some(Ok(Response::Warning("empty"))));
        assert_eq!(progress, 1.0);
    }

    #[test]
    fn drain_finishes_when_worker_is_gone() {
        let (tx, rx) = mpsc::channel::<UiMessage>();
        drop(tx);
        let mut progress = 0.0;

        let result = drain_messages(&rx, &mut progress);
        assert_eq!(result, Some(Err(WORKER_LOST.to_string())));
    }
}
