//! Main view (central panel) rendering: the Z-Y and X-Y projections.

use eframe::egui;
use egui_plot::{Legend, Plot, PlotPoints, Points, VLine};
use tdisview_core::{Projection, ProjectionView};

use super::theme::{section_header, ThemeColors};
use crate::app::TdisViewApp;
use crate::viewer::{pad_grid_points, plane_color32, plane_positions};

const HIT_RADIUS: f32 = 3.5;

impl TdisViewApp {
    /// Render the central panel with both projections side by side.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let projection = match self.session.projection() {
                Some(Ok(projection)) => projection,
                Some(Err(e)) => {
                    ui.centered_and_justified(|ui| {
                        ui.colored_label(
                            super::theme::accent::RED,
                            format!("Cannot draw event: {e}"),
                        );
                    });
                    return;
                }
                None => {
                    ui.centered_and_justified(|ui| ui.label("No event data to display."));
                    return;
                }
            };

            let show_grid = self.ui_state.show_pad_grid;
            ui.columns(2, |columns| {
                render_view(&mut columns[0], &projection, ProjectionView::Side, show_grid);
                render_view(&mut columns[1], &projection, ProjectionView::Top, show_grid);
            });
        });
    }
}

fn render_view(ui: &mut egui::Ui, projection: &Projection, view: ProjectionView, show_grid: bool) {
    let colors = ThemeColors::from_ui(ui);
    ui.label(section_header(view.title()));

    Plot::new(view.title())
        .data_aspect(1.0)
        .x_axis_label(view.x_axis_title())
        .y_axis_label(view.y_axis_title())
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            if show_grid {
                match view {
                    ProjectionView::Top => {
                        plot_ui.points(
                            Points::new(PlotPoints::from(pad_grid_points().to_vec()))
                                .color(colors.pad_grid)
                                .radius(1.0),
                        );
                    }
                    ProjectionView::Side => {
                        for z in plane_positions() {
                            plot_ui.vline(VLine::new(z).color(colors.pad_grid));
                        }
                    }
                }
            }

            for (label, color, coords) in projection.series(view) {
                plot_ui.points(
                    Points::new(PlotPoints::from(coords))
                        .color(plane_color32(color))
                        .radius(HIT_RADIUS)
                        .filled(true)
                        .name(label),
                );
            }
        });
}
