//! TDIS event display entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod state;
mod ui;
mod util;
mod viewer;

use std::path::PathBuf;

use app::TdisViewApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "TDIS Event Display",
        opts,
        Box::new(move |cc| {
            ui::theme::configure_style(&cc.egui_ctx);
            let mut app = TdisViewApp::default();
            match initial_file {
                Some(path) => app.load_file(&path),
                None => app.load_bundled(),
            }
            Ok(Box::new(app))
        }),
    )
}
