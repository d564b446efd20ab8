//! Statistics side panel rendering.

use eframe::egui::{self, Stroke};
use tdisview_core::EventSummary;

use super::theme::{section_header, stat_label, stat_value, stat_value_highlight, ThemeColors};
use crate::app::TdisViewApp;
use crate::util::{format_number, format_optional};
use crate::viewer::plane_color32;

impl TdisViewApp {
    /// Render a single stat row with label on left and value on right.
    fn stat_row(ui: &mut egui::Ui, label: &str, value: &str, highlight: bool) {
        ui.horizontal(|ui| {
            ui.label(stat_label(label));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if highlight {
                    ui.label(stat_value_highlight(value));
                } else {
                    ui.label(stat_value(value));
                }
            });
        });
    }

    fn section_divider(ui: &mut egui::Ui, title: &str) {
        ui.add_space(12.0);
        let colors = ThemeColors::from_ui(ui);
        ui.painter().hline(
            ui.available_rect_before_wrap().x_range(),
            ui.cursor().top(),
            Stroke::new(1.0, colors.border),
        );
        ui.add_space(8.0);
        ui.label(section_header(title).color(colors.text_dim));
        ui.add_space(4.0);
    }

    /// Render the side panel with file, event, and legend statistics.
    pub(crate) fn render_side_panel(&self, ctx: &egui::Context) {
        egui::SidePanel::right("statistics")
            .resizable(false)
            .exact_width(240.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                self.render_statistics(ui);
            });
    }

    fn render_statistics(&self, ui: &mut egui::Ui) {
        let colors = ThemeColors::from_ui(ui);
        let events = self.session.events();

        if events.is_empty() {
            ui.label(
                egui::RichText::new("No data loaded")
                    .size(11.0)
                    .color(colors.text_dim),
            );
            return;
        }

        ui.label(section_header("File").color(colors.text_dim));
        ui.add_space(4.0);
        Self::stat_row(ui, "Events", &format_number(events.len()), false);
        Self::stat_row(ui, "Hits", &format_number(events.total_hits()), false);
        if self.report.malformed_fields > 0 {
            Self::stat_row(
                ui,
                "Malformed",
                &format_number(self.report.malformed_fields),
                false,
            );
        }

        let (Some(number), Some(record)) = (
            self.session.current_event_number(),
            self.session.current_event(),
        ) else {
            return;
        };
        let summary = EventSummary::from_record(number, record);

        Self::section_divider(ui, &format!("Event {number}"));
        Self::stat_row(ui, "Hits", &format_number(summary.n_hits), true);
        Self::stat_row(
            ui,
            "Time",
            &format!(
                "{} – {} ns",
                format_optional(summary.time_first, 1),
                format_optional(summary.time_last, 1)
            ),
            false,
        );
        Self::stat_row(
            ui,
            "ADC mean",
            &format_optional(summary.amplitude_mean, 1),
            false,
        );
        Self::stat_row(ui, "Rings", &summary.n_rings.to_string(), false);
        Self::stat_row(ui, "Pads", &summary.n_pads.to_string(), false);
        Self::stat_row(ui, "Planes", &summary.n_planes.to_string(), false);

        if let Some(fit) = summary.track_fit {
            Self::section_divider(ui, "Track");
            Self::stat_row(ui, "p", &format!("{:.4} GeV/c", fit.momentum), false);
            Self::stat_row(ui, "θ", &format!("{:.2}°", fit.theta_deg), false);
            Self::stat_row(ui, "φ", &format!("{:.2}°", fit.phi_deg), false);
            Self::stat_row(ui, "z vertex", &format!("{:.4} m", fit.z_vertex), false);
        } else if !record.track_params.is_empty() {
            Self::section_divider(ui, "Track");
            let params: Vec<_> = record.track_params.iter().map(f64::to_string).collect();
            ui.label(stat_value(&params.join(" ")));
        }

        if let Some(Ok(projection)) = self.session.projection() {
            Self::section_divider(ui, "Visible");
            Self::stat_row(
                ui,
                &format!("t ≤ {:.1} ns", self.session.time_cursor()),
                &format!("{} hits", format_number(projection.len())),
                false,
            );
            for (label, color) in &projection.legend {
                ui.horizontal(|ui| {
                    ui.colored_label(plane_color32(*color), "●");
                    ui.label(stat_label(label));
                });
            }
        }
    }
}
