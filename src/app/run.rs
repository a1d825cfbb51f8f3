//! Top-level entry point for running the plotter as a native window.

use std::sync::mpsc::Receiver;

use eframe::egui;

use crate::config::PlotterConfig;
use crate::data::sources::SourceMode;
use crate::session::PlotSession;
use crate::sink::RxCommand;
use crate::transport::CancelToken;

use super::PlotterApp;

/// Launch the plotter in a native window.
///
/// Commands from `rx` are applied to a fresh session built from `cfg` and `mode`.
/// Closing the window cancels `cancel`, which stops the reader threads, and tears the
/// session down. The call blocks until the window is closed.
pub fn run_plotter(
    rx: Receiver<RxCommand>,
    cfg: PlotterConfig,
    mode: SourceMode,
    cancel: CancelToken,
) -> eframe::Result<()> {
    let session = PlotSession::new(&cfg, mode);
    let x_axis = cfg.x_axis;

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1200.0, 700.0)),
        ..Default::default()
    };

    eframe::run_native(
        &cfg.title,
        opts,
        Box::new(move |cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(PlotterApp::new(&cc.egui_ctx, session, rx, cancel, x_axis)))
        }),
    )
}
