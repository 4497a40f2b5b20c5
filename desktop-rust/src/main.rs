mod app;
mod charts;
mod io;
mod model;

use app::{configure_fonts, DesktopApp};

fn main() -> eframe::Result<()> {
    sentiment_dashboard::logging::init_tracing(false);

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Sentiment Analysis Dashboard",
        options,
        Box::new(|cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(DesktopApp::new())
        }),
    )
}
