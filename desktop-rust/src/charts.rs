use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Shape, Stroke};
use sentiment_dashboard_common::{BatchSummary, ConfidenceHistogram, SentimentLabel};

const PALETTE: &[Color32] = &[
    Color32::from_rgb(99, 110, 250),
    Color32::from_rgb(171, 99, 250),
    Color32::from_rgb(255, 161, 90),
    Color32::from_rgb(25, 211, 243),
    Color32::from_rgb(255, 102, 146),
];

/// パイの円弧を分割する1ステップの角度
const PIE_STEP: f32 = TAU / 120.0;

pub fn label_color(label: &SentimentLabel, index: usize) -> Color32 {
    match label {
        SentimentLabel::Positive => Color32::from_rgb(0, 204, 150),
        SentimentLabel::Negative => Color32::from_rgb(239, 85, 59),
        SentimentLabel::Other(_) => PALETTE[index % PALETTE.len()],
    }
}

fn axis_color(ui: &egui::Ui) -> Color32 {
    ui.visuals().weak_text_color()
}

/// 単一テキスト結果の棒グラフ (0.0-1.0)
pub fn sentiment_bars(ui: &mut egui::Ui, bars: &[(SentimentLabel, f32); 2]) {
    ui.label(RichText::new("Sentiment Analysis Result").strong());

    let size = egui::vec2(ui.available_width().min(420.0), 220.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let plot = Rect::from_min_max(
        rect.min + egui::vec2(36.0, 8.0),
        rect.max - egui::vec2(8.0, 24.0),
    );
    let text_color = ui.visuals().text_color();

    for tick in [0.0_f32, 0.5, 1.0] {
        let y = plot.bottom() - tick * plot.height();
        painter.line_segment([Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)], (0.5, axis_color(ui)));
        painter.text(
            Pos2::new(plot.left() - 4.0, y),
            Align2::RIGHT_CENTER,
            format!("{tick:.1}"),
            FontId::proportional(11.0),
            text_color,
        );
    }

    let slot = plot.width() / bars.len() as f32;
    for (i, (label, value)) in bars.iter().enumerate() {
        let center = plot.left() + slot * (i as f32 + 0.5);
        let bar_width = slot * 0.5;
        let top = plot.bottom() - value.clamp(0.0, 1.0) * plot.height();
        let bar = Rect::from_min_max(
            Pos2::new(center - bar_width / 2.0, top),
            Pos2::new(center + bar_width / 2.0, plot.bottom()),
        );
        painter.rect_filled(bar, 2.0, label_color(label, i));
        painter.text(
            Pos2::new(center, top - 2.0),
            Align2::CENTER_BOTTOM,
            format!("{value:.2}"),
            FontId::proportional(11.0),
            text_color,
        );
        painter.text(
            Pos2::new(center, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            label.as_str(),
            FontId::proportional(12.0),
            text_color,
        );
    }
}

/// ラベル分布の円グラフ
pub fn distribution_pie(ui: &mut egui::Ui, summary: &BatchSummary) {
    ui.label(RichText::new("Sentiment Distribution").strong());
    if summary.total == 0 {
        ui.label("No rows to chart.");
        return;
    }

    ui.horizontal(|ui| {
        let (response, painter) = ui.allocate_painter(egui::vec2(220.0, 220.0), Sense::hover());
        let center = response.rect.center();
        let radius = response.rect.width().min(response.rect.height()) / 2.0 - 6.0;

        let mut start = -TAU / 4.0;
        for (i, entry) in summary.distribution.iter().enumerate() {
            let sweep = TAU * entry.count as f32 / summary.total as f32;
            let color = label_color(&entry.label, i);

            // 扇形は凸多角形にならないので細い三角形に分けて描く
            let steps = (sweep / PIE_STEP).ceil().max(1.0) as usize;
            for step in 0..steps {
                let a0 = start + sweep * step as f32 / steps as f32;
                let a1 = start + sweep * (step + 1) as f32 / steps as f32;
                let p0 = center + radius * egui::vec2(a0.cos(), a0.sin());
                let p1 = center + radius * egui::vec2(a1.cos(), a1.sin());
                painter.add(Shape::convex_polygon(vec![center, p0, p1], color, Stroke::NONE));
            }
            start += sweep;
        }

        ui.vertical(|ui| {
            for (i, entry) in summary.distribution.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.colored_label(label_color(&entry.label, i), "■");
                    ui.label(format!(
                        "{}  {} ({:.1}%)",
                        entry.label,
                        entry.count,
                        summary.share(&entry.label) * 100.0
                    ));
                });
            }
        });
    });
}

/// 確信度ヒストグラム（ラベル別の積み上げ）
pub fn confidence_histogram(ui: &mut egui::Ui, histogram: &ConfidenceHistogram) {
    ui.label(RichText::new("Confidence Score Distribution").strong());

    let size = egui::vec2(ui.available_width().min(520.0), 240.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let plot = Rect::from_min_max(
        rect.min + egui::vec2(36.0, 8.0),
        rect.max - egui::vec2(8.0, 36.0),
    );
    let text_color = ui.visuals().text_color();
    let max = histogram.max_bin_total().max(1);

    painter.line_segment([plot.left_bottom(), plot.right_bottom()], (1.0, axis_color(ui)));
    painter.text(
        Pos2::new(plot.left() - 4.0, plot.top()),
        Align2::RIGHT_TOP,
        max.to_string(),
        FontId::proportional(11.0),
        text_color,
    );
    painter.text(
        Pos2::new(plot.left() - 4.0, plot.bottom()),
        Align2::RIGHT_BOTTOM,
        "0",
        FontId::proportional(11.0),
        text_color,
    );

    let slot = plot.width() / histogram.bins as f32;
    for bin in 0..histogram.bins {
        let left = plot.left() + slot * bin as f32 + 1.0;
        let right = left + slot - 2.0;
        let mut bottom = plot.bottom();

        for (label_idx, label) in histogram.labels.iter().enumerate() {
            let count = histogram.counts[label_idx][bin];
            if count == 0 {
                continue;
            }
            let height = count as f32 / max as f32 * plot.height();
            let segment = Rect::from_min_max(Pos2::new(left, bottom - height), Pos2::new(right, bottom));
            painter.rect_filled(segment, 0.0, label_color(label, label_idx));
            bottom -= height;
        }
    }

    for bin in [0, histogram.bins] {
        let x = plot.left() + slot * bin as f32;
        painter.text(
            Pos2::new(x, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            format!("{:.1}", bin as f32 / histogram.bins as f32),
            FontId::proportional(11.0),
            text_color,
        );
    }
    painter.text(
        Pos2::new(plot.center().x, rect.bottom()),
        Align2::CENTER_BOTTOM,
        "Confidence Score",
        FontId::proportional(12.0),
        text_color,
    );

    ui.horizontal(|ui| {
        for (i, label) in histogram.labels.iter().enumerate() {
            ui.colored_label(label_color(label, i), format!("■ {label}"));
        }
    });
}
