//! Top bar (event selection, file controls) and bottom bar (time slider, status).

use eframe::egui;
use rfd::FileDialog;

use super::theme::{accent, form_label, primary_button, ThemeColors};
use crate::app::TdisViewApp;
use crate::state::StatusKind;

impl TdisViewApp {
    /// Render the top panel with the event selector and file controls.
    pub(crate) fn render_top_panel(&mut self, ctx: &egui::Context) {
        let colors = ThemeColors::from_ctx(ctx);

        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_header)
                    .inner_margin(egui::Margin::symmetric(16.0, 8.0)),
            )
            .show(ctx, |ui| {
                ui.set_min_height(36.0);
                ui.horizontal_centered(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(10.0, 0.0);

                    ui.label(
                        egui::RichText::new("TDIS mTPC")
                            .size(14.0)
                            .strong()
                            .color(accent::BLUE),
                    );
                    ui.separator();

                    self.render_event_selector(ui);
                    ui.separator();

                    if ui.button("Open file").clicked() {
                        if let Some(path) = FileDialog::new()
                            .add_filter("Track data", &["txt"])
                            .pick_file()
                        {
                            self.load_file(&path);
                        }
                    }
                    ui.toggle_value(&mut self.ui_state.show_raw, "Raw data");
                    ui.toggle_value(&mut self.ui_state.show_pad_grid, "Pad grid");

                    if let Some(source) = &self.source {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(source.display_name()).color(colors.text_muted),
                            );
                        });
                    }
                });
            });
    }

    fn render_event_selector(&mut self, ui: &mut egui::Ui) {
        let has_events = self.session.has_events();

        ui.label(form_label("Event"));
        let response = ui.add_enabled(
            has_events,
            egui::TextEdit::singleline(&mut self.ui_state.event_input).desired_width(80.0),
        );
        let submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if ui.add_enabled(has_events, primary_button("Show")).clicked() || submitted {
            self.show_requested_event();
        }
        if ui.add_enabled(has_events, egui::Button::new("Next Track")).clicked() {
            self.next_track();
        }
    }

    /// Render the bottom panel with the time slider and status message.
    pub(crate) fn render_bottom_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("bottom_bar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(16.0, 8.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(form_label("Time"));
                    let max_time = self.session.max_time();
                    let mut time = self.session.time_cursor();
                    let slider = egui::Slider::new(&mut time, 0.0..=max_time)
                        .step_by(0.1)
                        .suffix(" ns");
                    if ui
                        .add_enabled(self.session.current_event().is_some(), slider)
                        .changed()
                    {
                        self.session.set_time_cursor(time);
                    }
                    ui.label(
                        egui::RichText::new(format!("max {max_time:.1} ns"))
                            .color(ThemeColors::from_ui(ui).text_dim),
                    );
                });

                ui.add_space(4.0);
                let color = match self.status.kind {
                    StatusKind::Info => ThemeColors::from_ui(ui).text_primary,
                    StatusKind::Warning => accent::AMBER,
                    StatusKind::Error => accent::RED,
                };
                ui.label(egui::RichText::new(&self.status.text).color(color));
            });
    }
}
