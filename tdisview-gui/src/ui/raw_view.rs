//! Raw data window.

use eframe::egui;

use crate::app::TdisViewApp;
use crate::util::format_number;

impl TdisViewApp {
    /// Render the loaded text in a scrollable monospace window.
    pub(crate) fn render_raw_window(&mut self, ctx: &egui::Context) {
        let title = match &self.source {
            Some(source) => format!("Raw data: {}", source.display_name()),
            None => "Raw data".to_string(),
        };

        egui::Window::new(title)
            .id(egui::Id::new("raw_data"))
            .open(&mut self.ui_state.show_raw)
            .default_size([520.0, 480.0])
            .resizable(true)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "{} lines, {} bytes",
                        format_number(self.raw_text.lines().count()),
                        format_number(self.raw_text.len())
                    ))
                    .weak(),
                );
                ui.separator();
                egui::ScrollArea::both()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut self.raw_text.as_str())
                                .code_editor()
                                .desired_width(f32::INFINITY),
                        );
                    });
            });
    }
}
