pub mod app;
pub mod table;

pub use app::ProdViewApp;

/// Entry point: launch the native GUI window
pub fn run(config: crate::AppConfig) -> crate::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("ProdView - Table Data")
            .with_inner_size([1100.0, 640.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ProdView",
        native_options,
        Box::new(move |cc| Ok(Box::new(ProdViewApp::new(cc, &config)))),
    )
    .map_err(|e| crate::ProdViewError::Gui(e.to_string()))
}
