//! Colors and text styles of the event display.
//!
//! Dark and light palettes share one set of accents; the active palette
//! follows `Visuals::dark_mode`, which eframe keeps in sync with the system.

use eframe::egui::{self, Color32, FontFamily, FontId, Id, Rounding, Stroke, TextStyle, Visuals};

/// Accent colors used by both palettes.
pub mod accent {
    use eframe::egui::Color32;

    pub const BLUE: Color32 = Color32::from_rgb(0x3b, 0x8e, 0xea);
    pub const GREEN: Color32 = Color32::from_rgb(0x22, 0xa6, 0x6b);
    pub const AMBER: Color32 = Color32::from_rgb(0xe8, 0xa3, 0x17);
    pub const RED: Color32 = Color32::from_rgb(0xe0, 0x4f, 0x4f);
}

/// Palette of the non-accent colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeColors {
    pub canvas: Color32,
    pub bg_panel: Color32,
    pub bg_header: Color32,
    pub bg_input: Color32,
    pub border: Color32,
    pub border_strong: Color32,
    pub hover: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_dim: Color32,
    /// Pad outlines and plane lines behind the hits.
    pub pad_grid: Color32,
    selection_alpha: f32,
}

impl ThemeColors {
    pub const DARK: Self = Self {
        canvas: Color32::from_rgb(0x16, 0x18, 0x1c),
        bg_panel: Color32::from_rgb(0x1c, 0x1f, 0x24),
        bg_header: Color32::from_rgb(0x23, 0x27, 0x2e),
        bg_input: Color32::from_rgb(0x29, 0x2d, 0x35),
        border: Color32::from_rgb(0x33, 0x38, 0x40),
        border_strong: Color32::from_rgb(0x46, 0x4c, 0x56),
        hover: Color32::from_rgb(0x35, 0x3b, 0x45),
        text_primary: Color32::from_rgb(0xdd, 0xe1, 0xe6),
        text_muted: Color32::from_rgb(0x8a, 0x91, 0x9b),
        text_dim: Color32::from_rgb(0x62, 0x69, 0x73),
        pad_grid: Color32::from_rgb(0x38, 0x3d, 0x45),
        selection_alpha: 0.3,
    };

    pub const LIGHT: Self = Self {
        canvas: Color32::from_rgb(0xf3, 0xf4, 0xf6),
        bg_panel: Color32::from_rgb(0xff, 0xff, 0xff),
        bg_header: Color32::from_rgb(0xf8, 0xf9, 0xfa),
        bg_input: Color32::from_rgb(0xee, 0xf0, 0xf2),
        border: Color32::from_rgb(0xd3, 0xd7, 0xdc),
        border_strong: Color32::from_rgb(0xbb, 0xc0, 0xc7),
        hover: Color32::from_rgb(0xe2, 0xe5, 0xe9),
        text_primary: Color32::from_rgb(0x1d, 0x21, 0x27),
        text_muted: Color32::from_rgb(0x5f, 0x66, 0x70),
        text_dim: Color32::from_rgb(0x8b, 0x92, 0x9c),
        pad_grid: Color32::from_rgb(0xd9, 0xdd, 0xe2),
        selection_alpha: 0.2,
    };

    /// Palette for a dark or light mode.
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    pub fn from_ctx(ctx: &egui::Context) -> Self {
        Self::for_mode(ctx.style().visuals.dark_mode)
    }

    pub fn from_ui(ui: &egui::Ui) -> Self {
        Self::for_mode(ui.visuals().dark_mode)
    }

    fn visuals(&self, base: Visuals) -> Visuals {
        let mut visuals = base;
        let rounding = Rounding::same(3.0);

        visuals.window_fill = self.bg_panel;
        visuals.panel_fill = self.bg_panel;
        visuals.faint_bg_color = self.canvas;
        visuals.extreme_bg_color = self.bg_input;

        let widgets = &mut visuals.widgets;
        for (state, fill, text, stroke) in [
            (&mut widgets.noninteractive, self.bg_input, self.text_muted, self.border),
            (&mut widgets.inactive, self.bg_input, self.text_primary, self.border_strong),
            (&mut widgets.hovered, self.hover, self.text_primary, accent::BLUE),
            (&mut widgets.active, accent::BLUE, Color32::WHITE, accent::BLUE),
        ] {
            state.bg_fill = fill;
            state.weak_bg_fill = fill;
            state.fg_stroke = Stroke::new(1.0, text);
            state.bg_stroke = Stroke::new(1.0, stroke);
            state.rounding = rounding;
        }

        visuals.selection.bg_fill = accent::BLUE.gamma_multiply(self.selection_alpha);
        visuals.selection.stroke = Stroke::new(1.0, accent::BLUE);
        visuals
    }
}

fn apply_theme(ctx: &egui::Context, dark_mode: bool) {
    let base = if dark_mode {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    let visuals = ThemeColors::for_mode(dark_mode).visuals(base);

    ctx.style_mut(|style| {
        style.visuals = visuals;
        style.text_styles = [
            (TextStyle::Small, FontId::new(10.0, FontFamily::Monospace)),
            (TextStyle::Body, FontId::new(12.0, FontFamily::Monospace)),
            (TextStyle::Button, FontId::new(12.0, FontFamily::Monospace)),
            (TextStyle::Heading, FontId::new(14.0, FontFamily::Monospace)),
            (TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace)),
        ]
        .into();
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.slider_width = 360.0;
    });
}

/// Applies the palette matching the current mode.
pub fn configure_style(ctx: &egui::Context) {
    let dark_mode = ctx.style().visuals.dark_mode;
    apply_theme(ctx, dark_mode);
    ctx.data_mut(|d| d.insert_temp(theme_id(), dark_mode));
}

fn theme_id() -> Id {
    Id::new("tdisview_theme_dark_mode")
}

/// Re-applies the palette when the mode changed since the last frame.
pub fn apply_system_theme(ctx: &egui::Context) {
    let dark_mode = ctx.style().visuals.dark_mode;
    let applied = ctx.data(|d| d.get_temp::<bool>(theme_id()));
    if applied != Some(dark_mode) {
        configure_style(ctx);
    }
}

/// Button for the main action of a row.
pub fn primary_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).color(Color32::WHITE))
        .fill(accent::GREEN)
        .rounding(Rounding::same(3.0))
}

/// Uppercase panel section title.
pub fn section_header(text: &str) -> egui::RichText {
    egui::RichText::new(text.to_uppercase()).size(11.0).strong()
}

pub fn form_label(text: &str) -> egui::RichText {
    egui::RichText::new(text.to_uppercase()).size(10.0)
}

pub fn stat_label(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0).weak()
}

pub fn stat_value(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0)
}

pub fn stat_value_highlight(text: &str) -> egui::RichText {
    stat_value(text).color(accent::GREEN).strong()
}
